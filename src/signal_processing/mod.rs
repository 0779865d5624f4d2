pub mod coefficients;
pub mod design;
pub mod fir_core;
pub mod fixed_point;
pub mod response;

pub use coefficients::{CoefficientSet, alternate_signs};
pub use design::design_prototype;
pub use fir_core::FirFilterCore;
pub use fixed_point::{
    Coefficient, Sample, accumulator_bits, from_q15, normalize, saturate, to_q15,
};
pub use response::{magnitude_at, magnitude_db};
