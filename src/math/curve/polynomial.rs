use nalgebra::{
    DMatrix,
    DVector
};

use crate::math::curve::curve::Curve;

// ─────────────────────────────────────────────
// Polynomial
// ─────────────────────────────────────────────

/// Dense polynomial evaluated in Horner form at `u = (x - origin) / scale`.
///
/// Coefficients are stored in descending powers of `u`. The origin/scale
/// frame keeps the Vandermonde system of `least_squares_fit` well
/// conditioned for higher degrees; raw-coefficient constructors use the
/// identity frame so pixel-space line equations keep their meaning.
#[derive(Debug)]
pub struct Polynomial {
    coefs: Vec<f64>,
    deriv_coefs: Vec<f64>,
    deriv2_coefs: Vec<f64>,
    origin: f64,
    scale: f64,
}

impl Polynomial {
    /// Polynomial in raw pixel coordinates. Coefficients in descending
    /// powers. Returns `None` for an empty coefficient list.
    pub fn new(coefs: Vec<f64>) -> Option<Polynomial> {
        Self::with_frame(coefs, 0.0, 1.0)
    }

    pub fn with_frame(coefs: Vec<f64>, origin: f64, scale: f64) -> Option<Polynomial> {
        if coefs.is_empty() || scale == 0.0 {
            return None;
        }
        let deriv_coefs = compute_deriv_coefs(&coefs);
        let deriv2_coefs = compute_deriv_coefs(&deriv_coefs);
        Some(Polynomial { coefs, deriv_coefs, deriv2_coefs, origin, scale })
    }

    /// Least-squares fit of `degree` over the sample pairs, solved through
    /// an SVD of the Vandermonde matrix in a shifted and scaled frame. The
    /// requested degree is capped at `n - 1` so the system never becomes
    /// underdetermined.
    pub fn least_squares_fit(xs: &[f64], ys: &[f64], degree: usize) -> Option<Polynomial> {
        if xs.is_empty() || xs.len() != ys.len() {
            return None;
        }
        let degree = degree.min(xs.len() - 1);

        let min_x = xs.iter().cloned().fold(f64::INFINITY, f64::min);
        let max_x = xs.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let origin = (min_x + max_x) / 2.0;
        let half_range = (max_x - min_x) / 2.0;
        let scale = if half_range > 0.0 { half_range } else { 1.0 };

        let vandermonde = DMatrix::from_fn(xs.len(), degree + 1, |i, j| {
            let u = (xs[i] - origin) / scale;
            u.powi((degree - j) as i32)
        });
        let rhs = DVector::from_column_slice(ys);

        let solution = vandermonde.svd(true, true).solve(&rhs, 1.0e-12).ok()?;
        Self::with_frame(solution.iter().cloned().collect(), origin, scale)
    }

    pub fn degree(&self) -> usize {
        self.coefs.len() - 1
    }

    fn evaluate(&self, coefs: &[f64], x: f64) -> f64 {
        let u = (x - self.origin) / self.scale;
        let mut result = coefs[0];
        for &beta in &coefs[1..] {
            result = f64::mul_add(result, u, beta);
        }
        result
    }
}

fn compute_deriv_coefs(coefs: &[f64]) -> Vec<f64> {
    let order = coefs.len() - 1;
    if order == 0 {
        vec![0.0]
    } else {
        (0..order)
            .map(|i| (order - i) as f64 * coefs[i])
            .collect()
    }
}

impl Curve for Polynomial {
    fn value(&self, x: f64) -> f64 {
        self.evaluate(&self.coefs, x)
    }

    fn derivative(&self, x: f64) -> f64 {
        self.evaluate(&self.deriv_coefs, x) / self.scale
    }

    fn second_derivative(&self, x: f64) -> f64 {
        self.evaluate(&self.deriv2_coefs, x) / (self.scale * self.scale)
    }
}
