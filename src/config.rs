//! Construction-time configuration for the filter bank.
//!
//! These parameters size the tap lines and fix the numeric format; they are
//! not runtime-mutable. Only the register file contents (enable flag and
//! coefficients) change while the stages run.
//!
//! ## TOML format
//!
//! ```toml
//! ntaps = 8
//! out_shift = 15
//! synthesis_polarity = "additive"   # or "subtractive"
//! start_enabled = true
//!
//! [prototype]
//! kind = "johnston8a"               # or "custom" / "remez"
//! # coefficients = [308, -2315, 2275, 16056, 16056, 2275, -2315, 308]
//! # transition = 0.1
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{JOHNSTON_8A_TAPS, MAX_OUT_SHIFT, OUT_SHIFT};
use crate::error::{QmfError, Result};
use crate::qmf::HighBandPolarity;
use crate::signal_processing::{Coefficient, CoefficientSet, accumulator_bits, design_prototype};

/// Source of the low-pass prototype loaded into the register file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PrototypeConfig {
    /// Johnston 8A (requires `ntaps = 8`)
    #[default]
    Johnston8a,
    /// Explicit Q1.15 taps, tap 0 first
    Custom { coefficients: Vec<Coefficient> },
    /// Parks-McClellan half-band design with the given transition width
    Remez { transition: f64 },
}

impl fmt::Display for PrototypeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Johnston8a => write!(f, "johnston8a"),
            Self::Custom { coefficients } => write!(f, "custom({} taps)", coefficients.len()),
            Self::Remez { transition } => write!(f, "remez({})", transition),
        }
    }
}

impl FromStr for PrototypeConfig {
    type Err = String;

    /// Parses `johnston8a`, `remez:<transition>` or a comma-separated tap list
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("johnston8a") {
            return Ok(Self::Johnston8a);
        }
        if let Some(t) = s.strip_prefix("remez:") {
            let transition: f64 = t
                .trim()
                .parse()
                .map_err(|_| format!("invalid transition width: {}", t))?;
            return Ok(Self::Remez { transition });
        }
        let coefficients = s
            .split(',')
            .map(|c| c.trim().parse::<Coefficient>())
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|_| format!("invalid coefficient list: {}", s))?;
        Ok(Self::Custom { coefficients })
    }
}

/// Filter bank configuration
///
/// Use `QmfConfig::default()` for the Johnston 8A bank with Q1.15
/// normalization.
///
/// # Example
/// ```
/// use qmfbank::config::QmfConfig;
///
/// let config = QmfConfig::default();
/// assert_eq!(config.ntaps, 8);
/// assert_eq!(config.out_shift, 15);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QmfConfig {
    /// Tap count of every FIR engine
    pub ntaps: usize,
    /// Accumulator right shift before saturation (15 for Q1.15 x Q1.15)
    pub out_shift: u32,
    /// Prototype loaded into the register file at construction
    pub prototype: PrototypeConfig,
    /// How the synthesis stage combines its filtered subbands
    pub synthesis_polarity: HighBandPolarity,
    /// Initial value of the enable register
    pub start_enabled: bool,
}

impl Default for QmfConfig {
    fn default() -> Self {
        Self {
            ntaps: JOHNSTON_8A_TAPS,
            out_shift: OUT_SHIFT,
            prototype: PrototypeConfig::Johnston8a,
            synthesis_polarity: HighBandPolarity::Additive,
            start_enabled: true,
        }
    }
}

impl QmfConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| QmfError::Config(format!("TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| QmfError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&content)
    }

    /// Check parameter ranges and prototype consistency
    pub fn validate(&self) -> Result<()> {
        if self.ntaps == 0 {
            return Err(QmfError::Config("ntaps must be at least 1".to_string()));
        }
        if self.out_shift > MAX_OUT_SHIFT {
            return Err(QmfError::Config(format!(
                "out_shift {} exceeds {}",
                self.out_shift, MAX_OUT_SHIFT
            )));
        }
        if accumulator_bits(self.ntaps) > i64::BITS {
            return Err(QmfError::Config(format!(
                "{} taps overflow a {}-bit accumulator",
                self.ntaps,
                i64::BITS
            )));
        }
        match &self.prototype {
            PrototypeConfig::Johnston8a if self.ntaps != JOHNSTON_8A_TAPS => {
                Err(QmfError::Config(format!(
                    "johnston8a prototype has {} taps, ntaps is {}",
                    JOHNSTON_8A_TAPS, self.ntaps
                )))
            }
            PrototypeConfig::Custom { coefficients } if coefficients.len() != self.ntaps => {
                Err(QmfError::CoefficientCount {
                    expected: self.ntaps,
                    actual: coefficients.len(),
                })
            }
            _ => Ok(()),
        }
    }

    /// Build the prototype coefficient set this configuration describes
    pub fn coefficient_set(&self) -> Result<CoefficientSet> {
        self.validate()?;
        match &self.prototype {
            PrototypeConfig::Johnston8a => Ok(CoefficientSet::johnston_8a()),
            PrototypeConfig::Custom { coefficients } => {
                CoefficientSet::with_taps(coefficients.clone(), self.ntaps)
            }
            PrototypeConfig::Remez { transition } => design_prototype(self.ntaps, *transition),
        }
    }
}
