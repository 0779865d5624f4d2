use std::sync::Arc;

use crate::constants::ANALYSIS_LATENCY;
use crate::error::Result;
use crate::qmf::{AnalysisEngine, SubbandPair};
use crate::registers::{ControlSnapshot, RegisterFile};
use crate::signal_processing::Sample;

use super::delay::ControlDelay;
use super::frame::{Frame, HandshakeMonitor, StreamFlags};

/// Analysis engine behind a valid/ready input port and a subband output port
///
/// The engine result is registered, so a sample accepted on step `t` is
/// presented on step `t + 1`. The stage only accepts when the downstream
/// consumer is ready and the register file has it enabled.
///
/// Disabling never withdraws a frame that is already on offer: it stays
/// valid until the consumer takes it, and nothing new is presented until
/// the stage is enabled again.
#[derive(Debug)]
pub struct AnalysisStage {
    engine: AnalysisEngine,
    regs: Arc<RegisterFile>,
    control: ControlSnapshot,
    flags: ControlDelay<ANALYSIS_LATENCY>,
    input: HandshakeMonitor,
    offered: bool,
    steps: u64,
}

impl AnalysisStage {
    pub fn new(regs: Arc<RegisterFile>, out_shift: u32) -> Result<Self> {
        let control = ControlSnapshot::capture(&regs)?;
        Ok(Self {
            engine: AnalysisEngine::new(regs.num_taps(), out_shift),
            regs,
            control,
            flags: ControlDelay::new(),
            input: HandshakeMonitor::new("analysis input"),
            offered: false,
            steps: 0,
        })
    }

    /// Frame presented on the output port during the current step
    pub fn output(&self) -> Frame<SubbandPair> {
        let head = self.flags.head();
        Frame {
            data: self.engine.output(),
            valid: head.valid && (self.control.enabled || self.offered),
            last: head.last,
        }
    }

    /// Input readiness for the current step given downstream readiness
    pub fn in_ready(&self, out_ready: bool) -> bool {
        self.control.enabled && out_ready
    }

    /// Run one step: settle the handshakes, then clock every register
    ///
    /// Returns the input readiness that was presented to the producer.
    pub fn tick(&mut self, input: Frame<Sample>, out_ready: bool) -> bool {
        let ready = self.clock(input, out_ready);
        self.control.refresh(&self.regs);
        ready
    }

    /// Clock edge without refreshing the control snapshot
    pub(crate) fn clock(&mut self, input: Frame<Sample>, out_ready: bool) -> bool {
        let presented = self.output().valid;
        let advance = self.in_ready(out_ready);
        let accepted = self.input.observe(input.valid, advance);

        // a held frame may still drain while disabled
        let moves = advance || (presented && out_ready);
        if moves {
            if accepted {
                self.engine.step(input.data, true, &self.control.coefficients);
            }
            self.flags.shift(StreamFlags {
                valid: accepted,
                last: accepted && input.last,
            });
        }
        self.offered = presented && !moves;

        self.steps += 1;
        advance
    }

    /// Adopt the processor-wide snapshot for the next step
    pub(crate) fn follow(&mut self, control: &ControlSnapshot) {
        self.control.follow(control);
    }

    /// Zero the tap lines and drop anything in flight; registers untouched
    pub fn clear_state(&mut self) {
        self.engine.clear_state();
        self.flags.clear();
        self.input.clear();
        self.offered = false;
    }

    /// Return to the power-on state; registers untouched
    pub fn reset(&mut self) {
        self.clear_state();
        self.engine.reset();
    }

    pub fn registers(&self) -> &Arc<RegisterFile> {
        &self.regs
    }

    /// Whether the current step runs enabled
    pub fn enabled(&self) -> bool {
        self.control.enabled
    }

    /// Snapshot the current step runs against
    pub fn control(&self) -> &ControlSnapshot {
        &self.control
    }

    pub fn latency(&self) -> usize {
        self.flags.depth()
    }

    pub fn in_flight(&self) -> usize {
        self.flags.occupancy()
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }
}
