//! Test signal generation and measurement helpers.

mod measure;
mod noise;
mod signal;

pub use measure::{attenuation_db, max_abs_error, peak, rms};
pub use noise::{HandshakeJitter, apply_noise, white_noise};
pub use signal::{
    generate_constant, generate_impulse, generate_nyquist, generate_sine, generate_two_tone,
};
