use serde::{Deserialize, Serialize};

use crate::signal_processing::{CoefficientSet, FirFilterCore, Sample, saturate};

/// How the filtered high band is combined with the filtered low band
///
/// Both choices filter the high band with the mirrored prototype. For a
/// Johnston prototype `Additive` gives a practical reconstruction with a
/// two-peak impulse response about 4.5 dB below unity, while `Subtractive`
/// cancels the odd-symmetric cross terms and approaches a pure delay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum HighBandPolarity {
    /// merged = low' + high'
    #[default]
    Additive,
    /// merged = low' - high'
    Subtractive,
}

/// Two-channel QMF synthesis engine
///
/// Filters each subband through its own FIR (low with the prototype, high
/// with the mirror), registers the filtered pair, and sums the registered
/// pair on the following step. A result therefore leaves `step` one call
/// after its inputs went in.
#[derive(Debug, Clone)]
pub struct SynthesisEngine {
    fir_low: FirFilterCore,
    fir_high: FirFilterCore,
    polarity: HighBandPolarity,
    filtered: (Sample, Sample),
    merged: Sample,
}

impl SynthesisEngine {
    pub fn new(ntaps: usize, out_shift: u32, polarity: HighBandPolarity) -> Self {
        Self {
            fir_low: FirFilterCore::new(ntaps, out_shift),
            fir_high: FirFilterCore::new(ntaps, out_shift),
            polarity,
            filtered: (0, 0),
            merged: 0,
        }
    }

    /// Accept one synchronized subband pair and return the merged sample of
    /// the pair accepted on the previous enabled step
    ///
    /// With `enable` false nothing moves and the held merged sample is returned.
    pub fn step(&mut self, low: Sample, high: Sample, enable: bool, h0: &CoefficientSet) -> Sample {
        if !enable {
            return self.merged;
        }
        self.merged = self.sum_filtered();
        self.filtered = (
            self.fir_low.step(low, h0.prototype()),
            self.fir_high.step(high, h0.mirror()),
        );
        self.merged
    }

    /// Advance the summation register without accepting a new pair
    ///
    /// Used by the streaming layer to push a pipeline bubble: the filtered
    /// pair and both tap lines stay where they are.
    pub fn drain(&mut self) -> Sample {
        self.merged = self.sum_filtered();
        self.merged
    }

    fn sum_filtered(&self) -> Sample {
        let (low, high) = (self.filtered.0 as i64, self.filtered.1 as i64);
        match self.polarity {
            HighBandPolarity::Additive => saturate(low + high),
            HighBandPolarity::Subtractive => saturate(low - high),
        }
    }

    /// Last merged output
    pub fn output(&self) -> Sample {
        self.merged
    }

    /// Zero both tap lines and the filtered-pair register
    pub fn clear_state(&mut self) {
        self.fir_low.clear_state();
        self.fir_high.clear_state();
        self.filtered = (0, 0);
    }

    pub fn reset(&mut self) {
        self.fir_low.reset();
        self.fir_high.reset();
        self.filtered = (0, 0);
        self.merged = 0;
    }

    pub fn polarity(&self) -> HighBandPolarity {
        self.polarity
    }

    pub fn num_taps(&self) -> usize {
        self.fir_low.num_taps()
    }
}
