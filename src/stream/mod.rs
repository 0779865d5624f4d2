pub mod analysis_stage;
pub mod delay;
pub mod frame;
pub mod packing;
pub mod synthesis_stage;

pub use analysis_stage::AnalysisStage;
pub use delay::ControlDelay;
pub use frame::{Frame, HandshakeMonitor, StreamFlags};
pub use packing::{pack_stereo, unpack_stereo};
pub use synthesis_stage::{JoinReady, SynthesisStage};
