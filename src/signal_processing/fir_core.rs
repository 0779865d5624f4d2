use super::fixed_point::{Coefficient, Sample, normalize};

/// Fixed-point tapped-delay-line FIR engine
///
/// Owns the tap line of the most recent `ntaps` samples. Coefficients are
/// passed in on every step so the caller decides which set (prototype or
/// mirror) is applied; the engine itself never stores them.
///
/// Products are accumulated in `i64`, which exceeds the
/// `DATA_WIDTH + COEF_WIDTH + ceil(log2(ntaps))` bits needed for any
/// practical tap count, and only the final shifted value is saturated.
#[derive(Debug, Clone)]
pub struct FirFilterCore {
    delay_line: Vec<Sample>,
    pos: usize,
    out_shift: u32,
}

impl FirFilterCore {
    /// Create an engine with an all-zero tap line
    pub fn new(ntaps: usize, out_shift: u32) -> Self {
        assert!(ntaps > 0, "FIR engine needs at least one tap");
        Self {
            delay_line: vec![0; ntaps],
            pos: 0,
            out_shift,
        }
    }

    /// Shift one sample into the tap line and return the filtered sample
    ///
    /// Tap 0 multiplies the sample just shifted in, tap 1 the one before it,
    /// and so on.
    pub fn step(&mut self, sample: Sample, coefficients: &[Coefficient]) -> Sample {
        debug_assert_eq!(coefficients.len(), self.delay_line.len());
        self.delay_line[self.pos] = sample;

        let acc = self.accumulate(coefficients);

        self.pos += 1;
        if self.pos == self.delay_line.len() {
            self.pos = 0;
        }
        normalize(acc, self.out_shift)
    }

    /// Dot product of the tap line (newest first) with `coefficients`
    fn accumulate(&self, coefficients: &[Coefficient]) -> i64 {
        let n = self.delay_line.len();
        let mut acc = 0i64;

        // Two contiguous reverse ranges instead of modulo indexing.
        let mut tap_i = 0usize;
        for delay_idx in (0..=self.pos).rev() {
            acc += coefficients[tap_i] as i64 * self.delay_line[delay_idx] as i64;
            tap_i += 1;
        }
        for delay_idx in ((self.pos + 1)..n).rev() {
            acc += coefficients[tap_i] as i64 * self.delay_line[delay_idx] as i64;
            tap_i += 1;
        }
        debug_assert_eq!(tap_i, n);
        acc
    }

    /// Zero the tap line without touching anything else
    pub fn clear_state(&mut self) {
        self.delay_line.fill(0);
    }

    /// Return to the power-on state
    pub fn reset(&mut self) {
        self.clear_state();
        self.pos = 0;
    }

    /// Tap line contents, most recent sample first
    pub fn tap_line(&self) -> Vec<Sample> {
        let n = self.delay_line.len();
        (0..n)
            .map(|i| self.delay_line[(self.pos + n - 1 - i) % n])
            .collect()
    }

    pub fn num_taps(&self) -> usize {
        self.delay_line.len()
    }

    pub fn out_shift(&self) -> u32 {
        self.out_shift
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_impulse_response_reproduces_coefficients() {
        let coeffs = [100, -200, 300, -400];
        let mut fir = FirFilterCore::new(4, 0);

        let mut out = vec![fir.step(1, &coeffs)];
        for _ in 0..5 {
            out.push(fir.step(0, &coeffs));
        }
        assert_eq!(out, vec![100, -200, 300, -400, 0, 0]);
    }

    #[test]
    fn test_tap_line_is_newest_first() {
        let coeffs = [0; 3];
        let mut fir = FirFilterCore::new(3, 15);
        for s in [1, 2, 3, 4] {
            fir.step(s, &coeffs);
        }
        assert_eq!(fir.tap_line(), vec![4, 3, 2]);
    }

    #[test]
    fn test_output_saturates_instead_of_wrapping() {
        let coeffs = [i16::MAX; 4];
        let mut fir = FirFilterCore::new(4, 15);
        let mut last = 0;
        for _ in 0..4 {
            last = fir.step(i16::MAX, &coeffs);
        }
        assert_eq!(last, i16::MAX);

        let mut fir = FirFilterCore::new(4, 15);
        for _ in 0..4 {
            last = fir.step(i16::MIN, &coeffs);
        }
        assert_eq!(last, i16::MIN);
    }

    #[test]
    fn test_clear_state_zeroes_tap_line() {
        let coeffs = [16384; 2];
        let mut fir = FirFilterCore::new(2, 15);
        fir.step(1000, &coeffs);
        fir.step(2000, &coeffs);
        fir.clear_state();
        assert_eq!(fir.tap_line(), vec![0, 0]);
        assert_eq!(fir.step(0, &coeffs), 0);
    }

    #[test]
    fn test_single_tap_is_scaled_passthrough() {
        let mut fir = FirFilterCore::new(1, 15);
        assert_eq!(fir.step(20000, &[16384]), 10000);
        assert_eq!(fir.step(-20000, &[16384]), -10000);
    }
}
