#![allow(dead_code)]

use std::sync::Arc;

use qmfbank::qmf::{AnalysisEngine, HighBandPolarity, SubbandPair, SynthesisEngine};
use qmfbank::registers::RegisterFile;
use qmfbank::signal_processing::{CoefficientSet, Sample};
use qmfbank::stream::Frame;
use qmfbank::{QmfConfig, QmfProcessor};

/// Run samples through a fresh analysis engine, one enabled step each
pub fn run_analysis(samples: &[Sample], set: &CoefficientSet, out_shift: u32) -> Vec<SubbandPair> {
    let mut engine = AnalysisEngine::new(set.num_taps(), out_shift);
    samples.iter().map(|&s| engine.step(s, true, set)).collect()
}

/// Run subband pairs through a fresh synthesis engine and flush the
/// summation register, so output `n` belongs to pair `n`
pub fn run_synthesis(
    pairs: &[SubbandPair],
    set: &CoefficientSet,
    out_shift: u32,
    polarity: HighBandPolarity,
) -> Vec<Sample> {
    let mut engine = SynthesisEngine::new(set.num_taps(), out_shift, polarity);
    let mut out: Vec<Sample> = pairs
        .iter()
        .map(|p| engine.step(p.low, p.high, true, set))
        .collect();
    if !pairs.is_empty() {
        out.remove(0);
        out.push(engine.drain());
    }
    out
}

pub fn shared_registers(set: &CoefficientSet, enabled: bool) -> Arc<RegisterFile> {
    Arc::new(RegisterFile::with_coefficients(set, enabled))
}

/// One delivered output frame and the step it was delivered on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delivery {
    pub step: usize,
    pub data: Sample,
    pub last: bool,
}

/// Clock a processor until every sample has been delivered
///
/// `source_valid(step)` decides whether the producer offers its next
/// sample on a step it is not already holding one, and
/// `sink_ready(step)` drives the sink's readiness.
pub fn drive_processor<V, R>(
    proc: &mut QmfProcessor,
    samples: &[Sample],
    max_steps: usize,
    mut source_valid: V,
    mut sink_ready: R,
) -> Vec<Delivery>
where
    V: FnMut(usize) -> bool,
    R: FnMut(usize) -> bool,
{
    let mut delivered = Vec::new();
    let mut next = 0usize;
    let mut holding = false;

    for step in 0..max_steps {
        if !holding && next < samples.len() {
            holding = source_valid(step);
        }
        let input = if holding {
            Frame::valid(samples[next]).with_last(next + 1 == samples.len())
        } else {
            Frame::idle()
        };
        let ready = sink_ready(step);
        let result = proc.tick(input, ready);

        if input.transfers(result.in_ready) {
            next += 1;
            holding = false;
        }
        if result.output.transfers(ready) {
            delivered.push(Delivery {
                step,
                data: result.output.data,
                last: result.output.last,
            });
            if result.output.last {
                break;
            }
        }
    }
    delivered
}

pub fn processor(polarity: HighBandPolarity) -> QmfProcessor {
    let config = QmfConfig {
        synthesis_polarity: polarity,
        ..Default::default()
    };
    QmfProcessor::new(&config).unwrap()
}
