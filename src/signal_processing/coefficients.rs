use crate::constants::JOHNSTON_8A;
use crate::error::{QmfError, Result};

use super::fixed_point::Coefficient;

/// Derive the high-pass mirror of a low-pass prototype
///
/// `c'[n] = c[n]` for even `n`, `c'[n] = -c[n]` for odd `n`, which is
/// `H(-z)`: the prototype response reflected about a quarter of the
/// sample rate. Negation saturates, so `i16::MIN` at an odd tap maps to
/// `i16::MAX`.
pub fn alternate_signs(coefficients: &[Coefficient]) -> Vec<Coefficient> {
    coefficients
        .iter()
        .enumerate()
        .map(|(n, &c)| if n % 2 == 0 { c } else { c.saturating_neg() })
        .collect()
}

/// Prototype low-pass set together with its derived mirror
///
/// Immutable once built; a coefficient change produces a new set, so a
/// filtering pass can never observe a half-updated prototype.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoefficientSet {
    prototype: Vec<Coefficient>,
    mirror: Vec<Coefficient>,
}

impl CoefficientSet {
    /// Build a set from prototype taps (tap 0 first)
    ///
    /// # Errors
    /// Returns `QmfError::CoefficientCount` for an empty prototype
    pub fn new(prototype: Vec<Coefficient>) -> Result<Self> {
        if prototype.is_empty() {
            return Err(QmfError::CoefficientCount {
                expected: 1,
                actual: 0,
            });
        }
        let mirror = alternate_signs(&prototype);
        Ok(Self { prototype, mirror })
    }

    /// Build a set and check it against the configured tap count
    pub fn with_taps(prototype: Vec<Coefficient>, ntaps: usize) -> Result<Self> {
        if prototype.len() != ntaps {
            return Err(QmfError::CoefficientCount {
                expected: ntaps,
                actual: prototype.len(),
            });
        }
        Self::new(prototype)
    }

    /// All-zero set, the register file's power-on contents
    pub fn zeroed(ntaps: usize) -> Result<Self> {
        Self::new(vec![0; ntaps])
    }

    /// Johnston 8A prototype
    pub fn johnston_8a() -> Self {
        Self {
            prototype: JOHNSTON_8A.to_vec(),
            mirror: alternate_signs(&JOHNSTON_8A),
        }
    }

    /// Low-pass prototype taps
    pub fn prototype(&self) -> &[Coefficient] {
        &self.prototype
    }

    /// High-pass taps derived by sign alternation
    pub fn mirror(&self) -> &[Coefficient] {
        &self.mirror
    }

    pub fn num_taps(&self) -> usize {
        self.prototype.len()
    }
}
