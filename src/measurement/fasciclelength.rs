use crate::calibration::Calibration;
use crate::measurement::intersection::intersectionsolver::IntersectionPoint;
use crate::model::curvemodel::CurveModel;

/// Arc length of a fascicle between its two aponeurosis crossings, in
/// millimetres: the Riemann sum of calibrated segment lengths over unit
/// column steps. Exact for straight fascicles; for curved ones the error
/// shrinks with the column step, fixed here at one pixel.
///
/// Assumes an already validated fascicle; the crossing columns may come in
/// either order.
pub fn fascicle_length(
    fascicle: &CurveModel,
    upper: &IntersectionPoint,
    lower: &IntersectionPoint,
    calibration: &Calibration,
) -> f64 {
    let start = upper.column.min(lower.column);
    let end = upper.column.max(lower.column);

    let mut length = 0.0;
    for col in (start + 1)..=end {
        let delta_row = fascicle.value(col as f64) - fascicle.value((col - 1) as f64);
        let rise = delta_row * calibration.vertical;
        let run = calibration.horizontal; // one column per step
        length += (rise * rise + run * run).sqrt();
    }
    length
}
