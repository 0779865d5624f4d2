mod test_signals;

use qmfbank::qmf::{HighBandPolarity, SubbandPair, SynthesisEngine};
use qmfbank::signal_processing::{CoefficientSet, Sample};
use test_signals::{
    apply_noise, generate_impulse, generate_sine, max_abs_error, peak, processor, run_analysis,
    run_synthesis, white_noise,
};

const IMPULSE: Sample = 32767;

fn reconstruct(input: &[Sample], polarity: HighBandPolarity) -> Vec<Sample> {
    let set = CoefficientSet::johnston_8a();
    run_synthesis(&run_analysis(input, &set, 15), &set, 15, polarity)
}

fn peak_index(signal: &[Sample]) -> usize {
    signal
        .iter()
        .enumerate()
        .max_by_key(|(_, x)| (**x as i32).abs())
        .map(|(i, _)| i)
        .unwrap()
}

#[test]
fn test_impulse_reconstruction_additive() {
    let out = reconstruct(&generate_impulse(32, IMPULSE), HighBandPolarity::Additive);

    let ratio = peak(&out) as f64 / IMPULSE as f64;
    assert!(
        (0.5..=0.7).contains(&ratio),
        "additive peak ratio {:.3} outside 0.5..0.7",
        ratio
    );
    // two equal lobes either side of the filter-pair delay
    assert_eq!(out[6], out[8]);
    assert_eq!(out[6], 19461);
    assert!(out[16..].iter().all(|&x| x == 0));
}

#[test]
fn test_impulse_reconstruction_subtractive() {
    let out = reconstruct(&generate_impulse(32, IMPULSE), HighBandPolarity::Subtractive);

    let ratio = peak(&out) as f64 / IMPULSE as f64;
    assert!(
        (0.97..=1.03).contains(&ratio),
        "subtractive peak ratio {:.3} outside 0.97..1.03",
        ratio
    );
    // delay of NTAPS - 1 samples through both filters
    assert_eq!(peak_index(&out), 7);
    for (n, &x) in out.iter().enumerate() {
        if n != 7 {
            assert!(x.abs() < 100, "residue {} at {}", x, n);
        }
    }
}

#[test]
fn test_streaming_chain_matches_direct_engines() {
    let input = generate_sine(200, 37.0, 0.6);
    for polarity in [HighBandPolarity::Additive, HighBandPolarity::Subtractive] {
        let mut proc = processor(polarity);
        assert_eq!(proc.process_block(&input), reconstruct(&input, polarity));
    }
}

#[test]
fn test_linearity_within_two_lsb() {
    let set = CoefficientSet::johnston_8a();
    let pairs = |seed: u64| -> Vec<SubbandPair> {
        let low = white_noise(300, 2000.0, Some(seed)).unwrap();
        let high = white_noise(300, 2000.0, Some(seed + 100)).unwrap();
        low.into_iter()
            .zip(high)
            .map(|(l, h)| SubbandPair::new(l.clamp(-6000, 6000), h.clamp(-6000, 6000)))
            .collect()
    };
    let a = pairs(1);
    let b = pairs(2);
    let sum: Vec<SubbandPair> = a
        .iter()
        .zip(&b)
        .map(|(x, y)| SubbandPair::new(x.low + y.low, x.high + y.high))
        .collect();

    for polarity in [HighBandPolarity::Additive, HighBandPolarity::Subtractive] {
        let out_a = run_synthesis(&a, &set, 15, polarity);
        let out_b = run_synthesis(&b, &set, 15, polarity);
        let out_sum = run_synthesis(&sum, &set, 15, polarity);
        for n in 0..sum.len() {
            let diff = out_a[n] as i32 + out_b[n] as i32 - out_sum[n] as i32;
            assert!(diff.abs() <= 2, "{:?}: diff {} at {}", polarity, diff, n);
        }
    }
}

#[test]
fn test_output_lags_accepted_pair_by_one_step() {
    let set = CoefficientSet::new(vec![16384]).unwrap();
    let mut engine = SynthesisEngine::new(1, 15, HighBandPolarity::Additive);

    assert_eq!(engine.step(1000, 200, true, &set), 0);
    assert_eq!(engine.step(0, 0, true, &set), 600);
    assert_eq!(engine.step(0, 0, true, &set), 0);
}

#[test]
fn test_disabled_step_holds_everything() {
    let set = CoefficientSet::new(vec![16384]).unwrap();
    let mut engine = SynthesisEngine::new(1, 15, HighBandPolarity::Subtractive);

    engine.step(1000, 200, true, &set);
    assert_eq!(engine.step(-5000, 5000, false, &set), 0);
    assert_eq!(engine.step(0, 0, true, &set), 400);
}

#[test]
fn test_sum_saturates() {
    let set = CoefficientSet::new(vec![32767]).unwrap();
    let mut engine = SynthesisEngine::new(1, 15, HighBandPolarity::Additive);
    engine.step(30000, 30000, true, &set);
    assert_eq!(engine.drain(), i16::MAX);

    let mut engine = SynthesisEngine::new(1, 15, HighBandPolarity::Subtractive);
    engine.step(-30000, 30000, true, &set);
    assert_eq!(engine.drain(), i16::MIN);
}

#[test]
fn test_subtractive_reconstruction_of_noisy_sine() {
    let mut input = generate_sine(400, 37.0, 0.4);
    apply_noise(&mut input, 1000.0, Some(42)).unwrap();
    let out = reconstruct(&input, HighBandPolarity::Subtractive);

    let delay = 7;
    let signal: f64 = input.iter().map(|&x| (x as f64).powi(2)).sum();
    let error: f64 = input
        .iter()
        .zip(&out[delay..])
        .map(|(&x, &y)| (y as f64 - x as f64).powi(2))
        .sum();
    let snr_db = 10.0 * (signal / error).log10();
    assert!(snr_db > 35.0, "reconstruction SNR {:.1} dB", snr_db);
    assert!(max_abs_error(&input, &out, delay) < 200);
}

#[test]
fn test_reset_clears_summation_register() {
    let set = CoefficientSet::johnston_8a();
    let pairs: Vec<SubbandPair> = (0..30)
        .map(|n| SubbandPair::new((n * 509 % 6000 - 3000) as Sample, (n * 71 % 900) as Sample))
        .collect();

    let mut engine = SynthesisEngine::new(8, 15, HighBandPolarity::Additive);
    for p in &pairs[..6] {
        engine.step(p.low, p.high, true, &set);
    }
    assert_ne!(engine.drain(), 0);

    engine.reset();
    assert_eq!(engine.output(), 0);
    let mut fresh = SynthesisEngine::new(8, 15, HighBandPolarity::Additive);
    for p in &pairs {
        assert_eq!(
            engine.step(p.low, p.high, true, &set),
            fresh.step(p.low, p.high, true, &set)
        );
    }
}
