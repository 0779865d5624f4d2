pub mod drive;

#[allow(unused_imports)]
pub use drive::{
    Delivery, drive_processor, processor, run_analysis, run_synthesis, shared_registers,
};
#[allow(unused_imports)]
pub use qmfbank::simulation::{
    HandshakeJitter, apply_noise, attenuation_db, generate_constant, generate_impulse,
    generate_nyquist, generate_sine, generate_two_tone, max_abs_error, peak, rms, white_noise,
};
