use std::f32::consts::PI;

use crate::signal_processing::{Sample, to_q15};

/// Sinusoid with the given period in samples and amplitude as a fraction of full scale
pub fn generate_sine(len: usize, period: f32, amplitude: f32) -> Vec<Sample> {
    (0..len)
        .map(|n| to_q15(amplitude * (2.0 * PI * n as f32 / period).sin()))
        .collect()
}

/// Alternating +a, -a sequence (the Nyquist tone)
pub fn generate_nyquist(len: usize, amplitude: Sample) -> Vec<Sample> {
    (0..len)
        .map(|n| if n % 2 == 0 { amplitude } else { amplitude.saturating_neg() })
        .collect()
}

/// Single nonzero sample at index 0
pub fn generate_impulse(len: usize, amplitude: Sample) -> Vec<Sample> {
    let mut samples = vec![0; len];
    if let Some(first) = samples.first_mut() {
        *first = amplitude;
    }
    samples
}

pub fn generate_constant(len: usize, value: Sample) -> Vec<Sample> {
    vec![value; len]
}

/// Two sinusoids summed, one per band
pub fn generate_two_tone(
    len: usize,
    low_period: f32,
    high_period: f32,
    amplitude: f32,
) -> Vec<Sample> {
    (0..len)
        .map(|n| {
            let t = n as f32;
            let low = (2.0 * PI * t / low_period).sin();
            let high = (2.0 * PI * t / high_period).sin();
            to_q15(0.5 * amplitude * (low + high))
        })
        .collect()
}
