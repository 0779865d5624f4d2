use std::sync::Arc;

use crate::constants::SYNTHESIS_LATENCY;
use crate::error::Result;
use crate::qmf::{HighBandPolarity, SynthesisEngine};
use crate::registers::{ControlSnapshot, RegisterFile};
use crate::signal_processing::Sample;

use super::delay::ControlDelay;
use super::frame::{Frame, HandshakeMonitor, StreamFlags};

/// Readiness presented to the two subband producers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JoinReady {
    pub low: bool,
    pub high: bool,
}

impl JoinReady {
    pub fn both(&self) -> bool {
        self.low && self.high
    }
}

/// Synthesis engine behind a joined pair of subband input ports
///
/// Both subbands are consumed on the same step or not at all: each port is
/// only ready while the other port is valid. A pair accepted on step `t`
/// is presented on step `t + 2`.
///
/// As with the analysis stage, a sample already on offer stays valid
/// through a disable until the sink takes it.
#[derive(Debug)]
pub struct SynthesisStage {
    engine: SynthesisEngine,
    regs: Arc<RegisterFile>,
    control: ControlSnapshot,
    flags: ControlDelay<SYNTHESIS_LATENCY>,
    low_port: HandshakeMonitor,
    high_port: HandshakeMonitor,
    offered: bool,
    steps: u64,
}

impl SynthesisStage {
    pub fn new(
        regs: Arc<RegisterFile>,
        out_shift: u32,
        polarity: HighBandPolarity,
    ) -> Result<Self> {
        let control = ControlSnapshot::capture(&regs)?;
        Ok(Self {
            engine: SynthesisEngine::new(regs.num_taps(), out_shift, polarity),
            regs,
            control,
            flags: ControlDelay::new(),
            low_port: HandshakeMonitor::new("synthesis low"),
            high_port: HandshakeMonitor::new("synthesis high"),
            offered: false,
            steps: 0,
        })
    }

    /// Frame presented on the output port during the current step
    pub fn output(&self) -> Frame<Sample> {
        let head = self.flags.head();
        Frame {
            data: self.engine.output(),
            valid: head.valid && (self.control.enabled || self.offered),
            last: head.last,
        }
    }

    /// Whether a complete pair would be accepted this step
    pub fn can_accept(&self, out_ready: bool) -> bool {
        self.control.enabled && out_ready
    }

    /// Port readiness for the current step
    pub fn join_ready(&self, low_valid: bool, high_valid: bool, out_ready: bool) -> JoinReady {
        let advance = self.can_accept(out_ready);
        JoinReady {
            low: advance && high_valid,
            high: advance && low_valid,
        }
    }

    /// Run one step: settle the join handshake, then clock every register
    pub fn tick(&mut self, low: Frame<Sample>, high: Frame<Sample>, out_ready: bool) -> JoinReady {
        let ready = self.clock(low, high, out_ready);
        self.control.refresh(&self.regs);
        ready
    }

    /// Clock edge without refreshing the control snapshot
    pub(crate) fn clock(
        &mut self,
        low: Frame<Sample>,
        high: Frame<Sample>,
        out_ready: bool,
    ) -> JoinReady {
        let presented = self.output().valid;
        let advance = self.can_accept(out_ready);
        let ready = self.join_ready(low.valid, high.valid, out_ready);

        let low_taken = self.low_port.observe(low.valid, ready.low);
        let high_taken = self.high_port.observe(high.valid, ready.high);
        debug_assert_eq!(low_taken, high_taken, "join consumed only one subband");
        let accepted = low_taken && high_taken;

        // a held sample may still drain while disabled
        let moves = advance || (presented && out_ready);
        if moves {
            if accepted {
                self.engine.step(low.data, high.data, true, &self.control.coefficients);
            } else {
                self.engine.drain();
            }
            self.flags.shift(StreamFlags {
                valid: accepted,
                last: accepted && (low.last || high.last),
            });
        }
        self.offered = presented && !moves;

        self.steps += 1;
        ready
    }

    /// Adopt the processor-wide snapshot for the next step
    pub(crate) fn follow(&mut self, control: &ControlSnapshot) {
        self.control.follow(control);
    }

    /// Zero the tap lines and drop anything in flight; registers untouched
    pub fn clear_state(&mut self) {
        self.engine.clear_state();
        self.flags.clear();
        self.low_port.clear();
        self.high_port.clear();
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

    pub fn enabled(&self) -> bool {
        self.control.enabled
    }

    pub fn control(&self) -> &ControlSnapshot {
        &self.control
    }

    pub fn polarity(&self) -> HighBandPolarity {
        self.engine.polarity()
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
