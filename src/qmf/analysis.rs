use crate::signal_processing::{CoefficientSet, FirFilterCore, Sample};

/// Low and high subband samples produced on the same step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubbandPair {
    pub low: Sample,
    pub high: Sample,
}

impl SubbandPair {
    pub fn new(low: Sample, high: Sample) -> Self {
        Self { low, high }
    }
}

/// Two-channel QMF analysis engine
///
/// Runs a low-pass FIR with the prototype and a high-pass FIR with its
/// sign-alternated mirror in lock-step on the same input sample, so both
/// subbands always come from the same step.
#[derive(Debug, Clone)]
pub struct AnalysisEngine {
    fir_low: FirFilterCore,
    fir_high: FirFilterCore,
    output: SubbandPair,
}

impl AnalysisEngine {
    pub fn new(ntaps: usize, out_shift: u32) -> Self {
        Self {
            fir_low: FirFilterCore::new(ntaps, out_shift),
            fir_high: FirFilterCore::new(ntaps, out_shift),
            output: SubbandPair::default(),
        }
    }

    /// Split one input sample into its low and high subband samples
    ///
    /// With `enable` false neither tap line moves and the previous output
    /// is returned unchanged; callers must not treat it as a new result.
    pub fn step(&mut self, sample: Sample, enable: bool, h0: &CoefficientSet) -> SubbandPair {
        if enable {
            self.output = SubbandPair {
                low: self.fir_low.step(sample, h0.prototype()),
                high: self.fir_high.step(sample, h0.mirror()),
            };
        }
        self.output
    }

    /// Last computed output
    pub fn output(&self) -> SubbandPair {
        self.output
    }

    /// Zero both tap lines, keeping the held output
    pub fn clear_state(&mut self) {
        self.fir_low.clear_state();
        self.fir_high.clear_state();
    }

    pub fn reset(&mut self) {
        self.fir_low.reset();
        self.fir_high.reset();
        self.output = SubbandPair::default();
    }

    pub fn num_taps(&self) -> usize {
        self.fir_low.num_taps()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_impulse_splits_into_prototype_and_mirror() {
        let h0 = CoefficientSet::new(vec![100, 200, 300]).unwrap();
        let mut engine = AnalysisEngine::new(3, 0);

        let mut low = Vec::new();
        let mut high = Vec::new();
        for x in [1, 0, 0] {
            let out = engine.step(x, true, &h0);
            low.push(out.low);
            high.push(out.high);
        }
        assert_eq!(low, vec![100, 200, 300]);
        assert_eq!(high, vec![100, -200, 300]);
    }

    #[test]
    fn test_disabled_step_holds_state_and_output() {
        let h0 = CoefficientSet::johnston_8a();
        let mut engine = AnalysisEngine::new(8, 15);

        let held = engine.step(20000, true, &h0);
        assert_eq!(engine.step(-5000, false, &h0), held);
        assert_eq!(engine.fir_low.tap_line()[0], 20000);

        // the disabled sample never entered the tap line
        let next = engine.step(0, true, &h0);
        assert_eq!(engine.fir_low.tap_line()[..2], [0, 20000]);
        assert_ne!(next, held);
    }

    #[test]
    fn test_clear_state_keeps_output() {
        let h0 = CoefficientSet::johnston_8a();
        let mut engine = AnalysisEngine::new(8, 15);
        let out = engine.step(10000, true, &h0);
        engine.clear_state();
        assert_eq!(engine.output(), out);
        assert_eq!(engine.step(0, true, &h0), SubbandPair::default());
    }
}
