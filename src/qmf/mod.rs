pub mod analysis;
pub mod synthesis;

pub use analysis::{AnalysisEngine, SubbandPair};
pub use synthesis::{HighBandPolarity, SynthesisEngine};
