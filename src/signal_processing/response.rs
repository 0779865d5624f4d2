//! Frequency response of Q1.15 coefficient sets
//!
//! Frequencies are normalized to the sample rate: 0.0 is DC, 0.5 is Nyquist.

use num_complex::Complex64;
use std::f64::consts::PI;

use super::fixed_point::Coefficient;

/// Evaluate H(e^jw) of a Q1.15 coefficient set
pub fn response_at(coefficients: &[Coefficient], normalized_freq: f64) -> Complex64 {
    let w = 2.0 * PI * normalized_freq;
    coefficients
        .iter()
        .enumerate()
        .map(|(n, &c)| Complex64::from_polar(c as f64 / 32768.0, -w * n as f64))
        .sum()
}

/// |H(e^jw)| as a linear gain
pub fn magnitude_at(coefficients: &[Coefficient], normalized_freq: f64) -> f64 {
    response_at(coefficients, normalized_freq).norm()
}

/// |H(e^jw)| in dB, floored at -200 dB for exact zeros
pub fn magnitude_db(coefficients: &[Coefficient], normalized_freq: f64) -> f64 {
    20.0 * magnitude_at(coefficients, normalized_freq).max(1e-10).log10()
}
