use std::sync::Arc;

use crate::config::QmfConfig;
use crate::error::Result;
use crate::qmf::SubbandPair;
use crate::registers::{ControlSnapshot, RegisterFile};
use crate::signal_processing::Sample;
use crate::stream::{AnalysisStage, Frame, SynthesisStage};

/// Subband-domain processing between analysis and synthesis
///
/// Applied combinationally to the pair on the wire, so it may be evaluated
/// several times for the same pair while the pipeline is stalled.
pub trait SubbandProcessor: Send {
    fn process(&self, pair: SubbandPair) -> SubbandPair;
}

/// Passes both subbands through unchanged
pub struct Passthrough;

impl SubbandProcessor for Passthrough {
    fn process(&self, pair: SubbandPair) -> SubbandPair {
        pair
    }
}

/// Everything visible at the processor's ports during one step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepResult {
    /// Readiness presented to the sample producer
    pub in_ready: bool,
    /// Readiness of the synthesis join toward the subband wire
    pub subband_ready: bool,
    /// Frame presented to the sink
    pub output: Frame<Sample>,
    /// Subband pair on the wire between the stages
    pub subbands: Frame<SubbandPair>,
}

/// Analysis and synthesis stages clocked by one scheduler
///
/// Both stages share one register file and observe the same step
/// boundary: every `tick` evaluates all handshakes from pre-step register
/// values before either stage is clocked, and a single snapshot taken after
/// the edge drives both stages through the next step.
pub struct QmfProcessor {
    analysis: AnalysisStage,
    synthesis: SynthesisStage,
    subband: Box<dyn SubbandProcessor>,
    regs: Arc<RegisterFile>,
    control: ControlSnapshot,
}

impl QmfProcessor {
    pub fn new(config: &QmfConfig) -> Result<Self> {
        let coefficients = config.coefficient_set()?;
        let regs = Arc::new(RegisterFile::with_coefficients(
            &coefficients,
            config.start_enabled,
        ));
        log::info!(
            "QMF bank: {} taps, prototype {}, shift {}, synthesis {:?}",
            config.ntaps,
            config.prototype,
            config.out_shift,
            config.synthesis_polarity
        );

        let control = ControlSnapshot::capture(&regs)?;
        let mut analysis = AnalysisStage::new(Arc::clone(&regs), config.out_shift)?;
        let mut synthesis = SynthesisStage::new(
            Arc::clone(&regs),
            config.out_shift,
            config.synthesis_polarity,
        )?;
        analysis.follow(&control);
        synthesis.follow(&control);

        Ok(Self {
            analysis,
            synthesis,
            subband: Box::new(Passthrough),
            regs,
            control,
        })
    }

    pub fn with_subband_processor(mut self, processor: Box<dyn SubbandProcessor>) -> Self {
        self.subband = processor;
        self
    }

    /// Advance the whole chain by one step
    pub fn tick(&mut self, input: Frame<Sample>, sink_ready: bool) -> StepResult {
        let output = self.synthesis.output();
        let subbands = self.analysis.output();
        let wire = subbands.map(|pair| self.subband.process(pair));

        let low = wire.map(|pair| pair.low);
        let high = wire.map(|pair| pair.high);
        let downstream_ready = self.synthesis.can_accept(sink_ready);
        let join = self.synthesis.clock(low, high, sink_ready);
        debug_assert!(!wire.valid || join.both() == downstream_ready);
        let in_ready = self.analysis.clock(input, downstream_ready);

        self.control.refresh(&self.regs);
        self.analysis.follow(&self.control);
        self.synthesis.follow(&self.control);

        StepResult {
            in_ready,
            subband_ready: downstream_ready,
            output,
            subbands: wire,
        }
    }

    /// Push a block through the chain and collect the reconstruction
    ///
    /// The final sample is sent with `last` and the chain is clocked until
    /// that marker comes out, with the sink always ready. Returns an empty
    /// vector for an empty block. Stops early if the chain is disabled for
    /// longer than a block's worth of steps.
    pub fn process_block(&mut self, samples: &[Sample]) -> Vec<Sample> {
        self.run_block(samples, |_| {})
    }

    /// Like [`process_block`](Self::process_block), also returning every
    /// subband pair that crossed into the synthesis stage
    pub fn process_block_with_subbands(
        &mut self,
        samples: &[Sample],
    ) -> (Vec<Sample>, Vec<SubbandPair>) {
        let mut subbands = Vec::with_capacity(samples.len());
        let out = self.run_block(samples, |pair| subbands.push(pair));
        (out, subbands)
    }

    fn run_block<F>(&mut self, samples: &[Sample], mut on_pair: F) -> Vec<Sample>
    where
        F: FnMut(SubbandPair),
    {
        let mut out = Vec::with_capacity(samples.len());
        if samples.is_empty() {
            return out;
        }

        let budget = samples.len() + self.latency() + 1;
        let mut next = 0usize;
        let mut idle_steps = 0usize;

        loop {
            let input = match samples.get(next) {
                Some(&s) => Frame::valid(s).with_last(next + 1 == samples.len()),
                None => Frame::idle(),
            };
            let step = self.tick(input, true);
            if input.transfers(step.in_ready) {
                next += 1;
                idle_steps = 0;
            } else {
                idle_steps += 1;
            }

            if step.subbands.transfers(step.subband_ready) {
                on_pair(step.subbands.data);
            }
            if step.output.transfers(true) {
                out.push(step.output.data);
                if step.output.last {
                    break;
                }
            }
            if idle_steps > budget {
                log::warn!(
                    "Block stalled after {} of {} samples (enabled: {})",
                    next,
                    samples.len(),
                    self.regs.enabled()
                );
                break;
            }
        }
        out
    }

    /// Zero every tap line and pipeline register; configuration stays
    pub fn clear_state(&mut self) {
        self.analysis.clear_state();
        self.synthesis.clear_state();
    }

    /// Return both stages to their power-on state; configuration stays
    pub fn reset(&mut self) {
        self.analysis.reset();
        self.synthesis.reset();
    }

    /// Control-plane handle to the shared register file
    pub fn registers(&self) -> Arc<RegisterFile> {
        Arc::clone(&self.regs)
    }

    /// Steps from accepting a sample to presenting its reconstruction
    pub fn latency(&self) -> usize {
        self.analysis.latency() + self.synthesis.latency()
    }

    pub fn analysis(&self) -> &AnalysisStage {
        &self.analysis
    }

    pub fn synthesis(&self) -> &SynthesisStage {
        &self.synthesis
    }
}
