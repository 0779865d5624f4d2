use crate::signal_processing::Sample;

/// Largest absolute sample value
pub fn peak(signal: &[Sample]) -> i32 {
    signal.iter().map(|&s| (s as i32).abs()).max().unwrap_or(0)
}

/// Root mean square in LSBs
pub fn rms(signal: &[Sample]) -> f64 {
    if signal.is_empty() {
        return 0.0;
    }
    let sum: f64 = signal.iter().map(|&s| (s as f64) * (s as f64)).sum();
    (sum / signal.len() as f64).sqrt()
}

/// Level of `signal` below `reference` in dB (positive when quieter)
pub fn attenuation_db(reference: &[Sample], signal: &[Sample]) -> f64 {
    let r = rms(reference).max(1e-10);
    let s = rms(signal).max(1e-10);
    20.0 * (r / s).log10()
}

/// Largest absolute difference between `output[n + delay]` and `input[n]`
pub fn max_abs_error(input: &[Sample], output: &[Sample], delay: usize) -> i32 {
    input
        .iter()
        .zip(output.iter().skip(delay))
        .map(|(&x, &y)| (x as i32 - y as i32).abs())
        .max()
        .unwrap_or(0)
}
