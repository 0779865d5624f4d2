pub mod config;
pub mod constants;
pub mod error;
pub mod processing;
pub mod qmf;
pub mod registers;
pub mod signal_processing;
pub mod stream;
pub mod wav;

#[cfg(feature = "simulation")]
pub mod simulation;

pub use config::{PrototypeConfig, QmfConfig};
pub use error::{QmfError, Result};
pub use processing::{Passthrough, QmfProcessor, StepResult, SubbandProcessor};
pub use qmf::{AnalysisEngine, HighBandPolarity, SubbandPair, SynthesisEngine};
pub use registers::{ControlSnapshot, RegisterFile};
pub use wav::{read_wav, save_subbands_wav, save_wav};
