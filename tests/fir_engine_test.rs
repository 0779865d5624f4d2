use qmfbank::constants::{JOHNSTON_8A, JOHNSTON_8A_TAPS};
use qmfbank::signal_processing::{
    CoefficientSet, FirFilterCore, accumulator_bits, alternate_signs,
};

#[test]
fn test_impulse_response_reproduces_taps() {
    let taps = [3, -2, 1, 5, -7];
    let mut fir = FirFilterCore::new(taps.len(), 0);

    let mut response = vec![fir.step(1, &taps)];
    for _ in 1..taps.len() + 2 {
        response.push(fir.step(0, &taps));
    }
    assert_eq!(response, vec![3, -2, 1, 5, -7, 0, 0]);
}

#[test]
fn test_q15_normalization_floors() {
    let mut fir = FirFilterCore::new(1, 15);
    // 0.5 * 0.5 = 0.25
    assert_eq!(fir.step(16384, &[16384]), 8192);
    // -1 LSB scaled down stays at -1 with an arithmetic shift
    assert_eq!(fir.step(-1, &[1]), -1);
    assert_eq!(fir.step(1, &[1]), 0);
}

#[test]
fn test_accumulator_saturates_instead_of_wrapping() {
    let taps = [i16::MAX; 8];
    let mut fir = FirFilterCore::new(8, 15);
    let mut last = 0;
    for _ in 0..8 {
        last = fir.step(i16::MAX, &taps);
    }
    assert_eq!(last, i16::MAX);

    let mut fir = FirFilterCore::new(8, 15);
    for _ in 0..8 {
        last = fir.step(i16::MIN, &taps);
    }
    assert_eq!(last, i16::MIN);
}

#[test]
fn test_wide_accumulation_before_narrowing() {
    // Intermediate partial sums leave the 16-bit range but the total does not
    let taps = [32767, 32767, -32768, -32767];
    let mut fir = FirFilterCore::new(4, 15);
    for x in [20000, 20000, 20000] {
        fir.step(x, &taps);
    }
    // window (newest first): 20000, 20000, 20000, 20000
    let y = fir.step(20000, &taps);
    let expected = ((20000i64 * (32767 + 32767 - 32768 - 32767)) >> 15) as i16;
    assert_eq!(y, expected);
}

#[test]
fn test_clear_state_zeroes_tap_line() {
    let taps = [1, 2, 3];
    let mut fir = FirFilterCore::new(3, 0);
    for x in [100, -200, 300] {
        fir.step(x, &taps);
    }
    assert_eq!(fir.tap_line(), vec![300, -200, 100]);

    fir.clear_state();
    assert_eq!(fir.tap_line(), vec![0, 0, 0]);
    assert_eq!(fir.step(1, &taps), 1);
    assert_eq!(fir.step(0, &taps), 2);
}

#[test]
fn test_mirror_of_johnston_8a() {
    let set = CoefficientSet::johnston_8a();
    assert_eq!(
        set.mirror(),
        &[308, 2315, 2275, -16056, 16056, -2275, -2315, -308]
    );
    assert_eq!(set.prototype(), &JOHNSTON_8A);
}

#[test]
fn test_double_alternation_restores_prototype() {
    for len in [2usize, 4, 8, 16] {
        let prototype: Vec<i16> = (0..len).map(|i| (i as i16 * 977) % 30000 - 15000).collect();
        assert_eq!(alternate_signs(&alternate_signs(&prototype)), prototype);
    }
}

#[test]
fn test_alternation_is_index_parity_only() {
    // odd length and asymmetric sets are not special-cased
    assert_eq!(alternate_signs(&[5, 5, 5]), vec![5, -5, 5]);
    assert_eq!(alternate_signs(&[-1]), vec![-1]);
    assert_eq!(alternate_signs(&[0, i16::MIN]), vec![0, i16::MAX]);
}

#[test]
fn test_reset_matches_fresh_engine() {
    let taps = [3, -2, 1, 5, -7];
    let mut fir = FirFilterCore::new(taps.len(), 0);
    for x in [9, 8, 7] {
        fir.step(x, &taps);
    }
    fir.reset();
    assert_eq!(fir.tap_line(), vec![0; 5]);

    let mut fresh = FirFilterCore::new(taps.len(), 0);
    for x in [1, 0, 0, -4, 11, 2, 0, 6] {
        assert_eq!(fir.step(x, &taps), fresh.step(x, &taps));
    }
    assert_eq!(fir.tap_line(), fresh.tap_line());
}

#[test]
fn test_accumulator_width_fits_i64() {
    assert_eq!(accumulator_bits(1), 32);
    assert_eq!(accumulator_bits(JOHNSTON_8A_TAPS), 35);
    assert_eq!(accumulator_bits(9), 36);
    assert!(accumulator_bits(1 << 20) <= i64::BITS);
    assert!(accumulator_bits(usize::MAX) > i64::BITS);
}
