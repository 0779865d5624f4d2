//! Fixed-point widths, register map layout and reference coefficients
//!
//! These define the numeric format shared by every stage of the filter bank
//! and the address map of the control/coefficient register file.

/// Sample width in bits (Q1.15)
pub const DATA_WIDTH: u32 = 16;

/// Coefficient width in bits (Q1.15)
pub const COEF_WIDTH: u32 = 16;

/// Right shift that renormalizes a Q1.15 x Q1.15 product back to Q1.15
pub const OUT_SHIFT: u32 = 15;

/// Largest normalization shift accepted by the configuration.
/// The accumulator is 64 bits wide, so anything above this only discards signal.
pub const MAX_OUT_SHIFT: u32 = 30;

/// Tap count of the Johnston 8A prototype
pub const JOHNSTON_8A_TAPS: usize = 8;

/// Johnston 8A half-band low-pass prototype, quantized to Q1.15 (tap 0 first)
pub const JOHNSTON_8A: [i16; JOHNSTON_8A_TAPS] =
    [308, -2315, 2275, 16056, 16056, 2275, -2315, 308];

/// Register address of the global enable flag (bit 0)
pub const REG_ENABLE: u32 = 0x00;

/// Address stride between registers; tap `k` lives at `(k + 1) * REG_STRIDE`
pub const REG_STRIDE: u32 = 4;

/// Fixed latency of the analysis stage in steps (acceptance to presentation)
pub const ANALYSIS_LATENCY: usize = 1;

/// Fixed latency of the synthesis stage in steps (one FIR pass plus the summation)
pub const SYNTHESIS_LATENCY: usize = 2;
