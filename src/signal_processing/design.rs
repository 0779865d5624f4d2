use crate::error::{QmfError, Result};
use pm_remez::{BandSetting, constant, pm_parameters, pm_remez};

use super::coefficients::CoefficientSet;
use super::fixed_point::to_q15;

/// Band edge of a half-band filter, in cycles per sample
const HALF_BAND_EDGE: f64 = 0.25;

/// Design a half-band low-pass QMF prototype and quantize it to Q1.15
///
/// Uses the Parks-McClellan (Remez) algorithm with unity passband gain on
/// `[0, 0.25 - transition/2]` and a stopband on `[0.25 + transition/2, 0.5]`.
///
/// # Arguments
/// * `ntaps` - Prototype length (even lengths give the usual QMF symmetry)
/// * `transition` - Total transition width in cycles per sample, in (0, 0.5)
///
/// # Errors
/// Returns `QmfError::FilterDesign` if the parameters are invalid or the
/// exchange algorithm does not converge
pub fn design_prototype(ntaps: usize, transition: f64) -> Result<CoefficientSet> {
    if ntaps < 2 {
        return Err(QmfError::FilterDesign(format!(
            "prototype needs at least 2 taps, got {}",
            ntaps
        )));
    }
    if !(transition > 0.0 && transition < 2.0 * HALF_BAND_EDGE) {
        return Err(QmfError::FilterDesign(format!(
            "transition width {} outside (0, 0.5)",
            transition
        )));
    }

    let pass_end = HALF_BAND_EDGE - transition / 2.0;
    let stop_start = HALF_BAND_EDGE + transition / 2.0;

    let bands = [
        BandSetting::new(0.0, pass_end, constant(1.0))
            .map_err(|e| QmfError::FilterDesign(format!("Passband: {:?}", e)))?,
        BandSetting::new(stop_start, 0.5, constant(0.0))
            .map_err(|e| QmfError::FilterDesign(format!("Stopband: {:?}", e)))?,
    ];

    let params = pm_parameters(ntaps, &bands)
        .map_err(|e| QmfError::FilterDesign(format!("PM parameters: {:?}", e)))?;

    let design =
        pm_remez(&params).map_err(|e| QmfError::FilterDesign(format!("PM Remez: {:?}", e)))?;

    let taps = design
        .impulse_response
        .iter()
        .map(|&h| to_q15(h as f32))
        .collect();

    log::debug!("Designed {}-tap prototype, transition {:.3}", ntaps, transition);

    CoefficientSet::with_taps(taps, ntaps)
}
