use thiserror::Error;

#[derive(Error, Debug)]
pub enum QmfError {
    #[error("Register address {0:#06x} is not mapped")]
    UnmappedAddress(u32),

    #[error("Coefficient set has {actual} taps, expected {expected}")]
    CoefficientCount { expected: usize, actual: usize },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Filter design failed: {0}")]
    FilterDesign(String),

    #[error("WAV I/O error: {0}")]
    Wav(#[from] hound::Error),
}

pub type Result<T> = std::result::Result<T, QmfError>;
