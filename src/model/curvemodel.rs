use std::sync::Arc;

use crate::math::curve::curve::Curve;
use crate::math::curve::nonparametriccurve::nonparametriccurve::Point2D;
use crate::math::curve::polynomial::Polynomial;
use crate::measurement::measurementerror::MeasurementError;

// ─────────────────────────────────────────────
// CurveModel
// ─────────────────────────────────────────────

/// The shared currency of the measurement engine: a continuous curve over
/// the column axis, its closed domain, and optionally a pixel-rounded
/// discretization with one point per integer column. The continuous and the
/// discrete face always describe the same fitted curve, so downstream code
/// never diverges between the two representations.
///
/// Models are produced by the fitting stage and shared immutably; measurers
/// only ever read them.
#[derive(Clone)]
pub struct CurveModel {
    curve: Arc<dyn Curve>,
    domain: (f64, f64),
    sample: Option<Vec<Point2D>>,
}

impl CurveModel {
    /// Wrap a fitted curve and discretize it over `interval`, one point per
    /// unit column step with rows rounded to the nearest pixel.
    pub fn from_curve(curve: Arc<dyn Curve>, interval: (f64, f64)) -> CurveModel {
        let sample = discretize(curve.as_ref(), interval);
        CurveModel {
            curve,
            domain: interval,
            sample: Some(sample),
        }
    }

    /// Wrap a fitted curve without precomputing a sample. Candidate
    /// fascicles only need evaluation, not a point set.
    pub fn new_unsampled(curve: Arc<dyn Curve>, interval: (f64, f64)) -> CurveModel {
        CurveModel {
            curve,
            domain: interval,
            sample: None,
        }
    }

    /// Adapter for line-detection output: `row = column * coefs[0] +
    /// coefs[1]`. The line is promoted to a degree-1 continuous model so
    /// lines and splines are indistinguishable downstream. Coefficients
    /// beyond the first two are ignored.
    pub fn from_line_coefficients(
        coefs: &[f64],
        interval: (f64, f64),
    ) -> Result<CurveModel, MeasurementError> {
        if coefs.len() < 2 {
            return Err(MeasurementError::InvalidParameter(
                "line equation needs 2 coefficients (slope, intercept)".to_owned(),
            ));
        }
        let line = Polynomial::new(vec![coefs[0], coefs[1]]).ok_or_else(|| {
            MeasurementError::InvalidParameter("degenerate line coefficients".to_owned())
        })?;
        Ok(Self::from_curve(Arc::new(line), interval))
    }

    pub fn value(&self, x: f64) -> f64 {
        self.curve.value(x)
    }

    pub fn derivative(&self, x: f64) -> f64 {
        self.curve.derivative(x)
    }

    pub fn second_derivative(&self, x: f64) -> f64 {
        self.curve.second_derivative(x)
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn sample(&self) -> Option<&[Point2D]> {
        self.sample.as_deref()
    }

    /// Pixel-rounded discretization over an arbitrary interval, regardless
    /// of whether a sample was precomputed.
    pub fn sample_over(&self, interval: (f64, f64)) -> Vec<Point2D> {
        discretize(self.curve.as_ref(), interval)
    }
}

impl std::fmt::Debug for CurveModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CurveModel")
            .field("domain", &self.domain)
            .field("sample", &self.sample)
            .finish_non_exhaustive()
    }
}

fn discretize(curve: &dyn Curve, interval: (f64, f64)) -> Vec<Point2D> {
    let start = interval.0.floor() as i64;
    let end = interval.1.floor() as i64;
    (start..=end)
        .map(|col| {
            let x = col as f64;
            Point2D::new(x, curve.value(x).round())
        })
        .collect()
}
