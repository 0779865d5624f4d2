//! Q1.15 fixed-point helpers
//!
//! Samples and coefficients are 16-bit two's-complement fractions in
//! [-1.0, 1.0). Products and sums are carried in an `i64` accumulator and
//! narrowed only once, through [`normalize`] or [`saturate`].

use crate::constants::{COEF_WIDTH, DATA_WIDTH};

/// One Q1.15 sample
pub type Sample = i16;

/// One Q1.15 filter coefficient
pub type Coefficient = i16;

const Q15_SCALE: f32 = 32768.0;

/// Clamp a wide value to the 16-bit signed range
#[inline]
pub fn saturate(value: i64) -> Sample {
    value.clamp(i16::MIN as i64, i16::MAX as i64) as Sample
}

/// Arithmetic right shift by `shift` bits, then saturate to Q1.15
#[inline]
pub fn normalize(acc: i64, shift: u32) -> Sample {
    saturate(acc >> shift)
}

/// Convert a float in [-1.0, 1.0) to Q1.15 with rounding and saturation
pub fn to_q15(value: f32) -> Sample {
    saturate((value * Q15_SCALE).round() as i64)
}

/// Convert a Q1.15 value to float
pub fn from_q15(value: Sample) -> f32 {
    value as f32 / Q15_SCALE
}

/// Minimum accumulator width in bits that cannot overflow for `ntaps` products
pub fn accumulator_bits(ntaps: usize) -> u32 {
    let growth = ntaps
        .max(1)
        .checked_next_power_of_two()
        .map_or(usize::BITS, |n| n.trailing_zeros());
    DATA_WIDTH + COEF_WIDTH + growth
}
