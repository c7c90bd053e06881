use std::collections::HashMap;

use tracing::debug;

use crate::calibration::Calibration;
use crate::math::curve::nonparametriccurve::nonparametriccurve::Point2D;
use crate::math::curve::polynomial::Polynomial;
use crate::measurement::measurementerror::MeasurementError;
use crate::model::curvemodel::CurveModel;

/// Degree of the smoothing fit laid over the thickness samples.
pub const SMOOTHING_DEGREE: usize = 5;

// ─────────────────────────────────────────────
// BoundaryInput
// ─────────────────────────────────────────────

/// One aponeurosis as the thickness measurer accepts it: a continuous model,
/// an explicit point set, or both. Explicit points win when both are given;
/// with neither, the measurement fails with `MissingInput`.
#[derive(Clone, Copy)]
pub struct BoundaryInput<'a> {
    model: Option<&'a CurveModel>,
    points: Option<&'a [Point2D]>,
}

impl<'a> BoundaryInput<'a> {
    pub fn from_model(model: &'a CurveModel) -> BoundaryInput<'a> {
        BoundaryInput { model: Some(model), points: None }
    }

    pub fn from_points(points: &'a [Point2D]) -> BoundaryInput<'a> {
        BoundaryInput { model: None, points: Some(points) }
    }

    pub fn new(model: Option<&'a CurveModel>, points: Option<&'a [Point2D]>) -> BoundaryInput<'a> {
        BoundaryInput { model, points }
    }

    fn resolve(&self, interval: (f64, f64)) -> Result<Vec<Point2D>, MeasurementError> {
        if let Some(points) = self.points {
            return Ok(points.to_vec());
        }
        if let Some(model) = self.model {
            return Ok(match model.sample() {
                Some(sample) => sample.to_vec(),
                None => model.sample_over(interval),
            });
        }
        Err(MeasurementError::MissingInput(
            "aponeurosis needs a curve model or a point set".to_owned(),
        ))
    }
}

// ─────────────────────────────────────────────
// ThicknessProfile
// ─────────────────────────────────────────────

/// Muscle thickness per column, in millimetres, with a continuous smoothing
/// fit over the samples. Abscissas are strictly increasing.
#[derive(Debug)]
pub struct ThicknessProfile {
    pub abscissas: Vec<f64>,
    pub thickness: Vec<f64>,
    pub smoothing: Polynomial,
}

/// Perpendicular distance between the two aponeuroses at every integer
/// column of `[start, end]` where both boundaries carry a point rounding to
/// that exact column. Columns without a match in either point set are
/// silently skipped, a documented approximation of the sampling stage
/// rather than an error.
pub fn muscle_thickness(
    upper: BoundaryInput<'_>,
    lower: BoundaryInput<'_>,
    start: i64,
    end: i64,
    calibration: &Calibration,
) -> Result<ThicknessProfile, MeasurementError> {
    let interval = (start as f64, end as f64);
    let upper_points = upper.resolve(interval)?;
    let lower_points = lower.resolve(interval)?;

    let upper_rows = rows_by_column(&upper_points);
    let lower_rows = rows_by_column(&lower_points);

    let mut abscissas = Vec::new();
    let mut thickness = Vec::new();
    for col in start..=end {
        let (Some(row_u), Some(row_l)) = (upper_rows.get(&col), lower_rows.get(&col)) else {
            continue;
        };
        thickness.push((row_u - row_l).abs() * calibration.vertical);
        abscissas.push(col as f64 * calibration.horizontal);
    }

    debug!(
        columns = (end - start + 1),
        matched = abscissas.len(),
        "thickness profile sampled"
    );

    let smoothing = Polynomial::least_squares_fit(&abscissas, &thickness, SMOOTHING_DEGREE)
        .ok_or_else(|| {
            MeasurementError::MissingInput(
                "no column of the interval is sampled by both aponeuroses".to_owned(),
            )
        })?;

    Ok(ThicknessProfile { abscissas, thickness, smoothing })
}

/// First point per rounded column; later duplicates are ignored, matching
/// the first-hit lookup of the acquisition pipeline.
fn rows_by_column(points: &[Point2D]) -> HashMap<i64, f64> {
    let mut rows = HashMap::with_capacity(points.len());
    for pt in points {
        rows.entry(pt.x().round() as i64).or_insert(pt.y());
    }
    rows
}
