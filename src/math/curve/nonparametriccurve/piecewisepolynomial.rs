use nalgebra::{
    DMatrix,
    DVector
};

use crate::math::curve::curve::Curve;
use crate::math::curve::nonparametriccurve::nonparametriccurve::{
    NonparametricCurve,
    Point2D
};

// ─────────────────────────────────────────────
// Subpolynomial
// ─────────────────────────────────────────────

struct Subpolynomial {
    coefs: Vec<f64>,
    deriv_coefs: Option<Vec<f64>>,
    deriv2_coefs: Option<Vec<f64>>,
    lhs_x: f64,
}

impl Subpolynomial {
    fn new(coefs: Vec<f64>, lhs_x: f64, with_deriv: bool) -> Subpolynomial {
        let (deriv_coefs, deriv2_coefs) = if with_deriv {
            let d1 = Self::compute_deriv_coefs(&coefs);
            let d2 = Self::compute_deriv_coefs(&d1);
            (Some(d1), Some(d2))
        } else {
            (None, None)
        };
        Subpolynomial { coefs, deriv_coefs, deriv2_coefs, lhs_x }
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

    fn value(&self, x: f64) -> f64 {
        self.evaluate(&self.coefs, x)
    }

    fn derivative(&self, x: f64) -> Option<f64> {
        self.deriv_coefs
            .as_ref()
            .map(|d| self.evaluate(d, x))
    }

    fn second_derivative(&self, x: f64) -> Option<f64> {
        self.deriv2_coefs
            .as_ref()
            .map(|d| self.evaluate(d, x))
    }

    fn evaluate(&self, coefs: &[f64], x: f64) -> f64 {
        let x_diff = x - self.lhs_x;
        let mut result = coefs[0];
        for &beta in &coefs[1..] {
            result = f64::mul_add(result, x_diff, beta);
        }
        result
    }
}

// ─────────────────────────────────────────────
// Coefficient generation
// ─────────────────────────────────────────────

fn generate_linear_coef_list(points: &[Point2D]) -> Option<Vec<Vec<f64>>> {
    Some(
        (0..(points.len() - 1))
            .map(|i| vec![
                Point2D::slope(&points[i], &points[i + 1]),
                points[i].y(),
            ])
            .collect()
    )
}

/// Cubic coefficients per interval from the knot second derivatives
/// (moments) m[0..=n], stored in Horner order [d, c, b, a] for
/// S_i(x) = a + b*(x-x_i) + c*(x-x_i)^2 + d*(x-x_i)^3.
fn cubic_coefs_from_moments(points: &[Point2D], h: &[f64], m: &[f64]) -> Vec<Vec<f64>> {
    (0..h.len())
        .map(|i| {
            let d = (m[i + 1] - m[i]) / (6.0 * h[i]);
            let c = m[i] / 2.0;
            let b = (points[i + 1].y() - points[i].y()) / h[i]
                  - h[i] * (2.0 * m[i] + m[i + 1]) / 6.0;
            let a = points[i].y();
            vec![d, c, b, a]
        })
        .collect()
}

/// Natural cubic spline: second derivative vanishes at both end knots. The
/// interior rows come from C2 continuity:
///   h[i-1]*m[i-1] + 2*(h[i-1]+h[i])*m[i] + h[i]*m[i+1]
///     = 6*( (y[i+1]-y[i])/h[i] - (y[i]-y[i-1])/h[i-1] )
fn generate_natural_cubic_coef_list(points: &[Point2D]) -> Option<Vec<Vec<f64>>> {
    let n = points.len() - 1;
    let h: Vec<f64> = (0..n).map(|i| points[i + 1].x() - points[i].x()).collect();

    let mut mat = DMatrix::<f64>::zeros(n + 1, n + 1);
    let mut rhs = DVector::<f64>::zeros(n + 1);

    for i in 1..n {
        mat[(i, i - 1)] = h[i - 1];
        mat[(i, i)]     = 2.0 * (h[i - 1] + h[i]);
        mat[(i, i + 1)] = h[i];
        rhs[i] = 6.0 * (
            (points[i + 1].y() - points[i].y()) / h[i]
          - (points[i].y()     - points[i - 1].y()) / h[i - 1]
        );
    }
    mat[(0, 0)] = 1.0; // m[0] = 0
    mat[(n, n)] = 1.0; // m[n] = 0

    let m = mat.lu().solve(&rhs)?;
    Some(cubic_coefs_from_moments(points, &h, m.as_slice()))
}

// ─────────────────────────────────────────────
// PolynomialType
// ─────────────────────────────────────────────

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum PolynomialType {
    Linear,
    NaturalCubic,
}

fn get_necessary_points(polynomial_type: PolynomialType) -> usize {
    match polynomial_type {
        PolynomialType::Linear       => 2,
        PolynomialType::NaturalCubic => 3,
    }
}

// ─────────────────────────────────────────────
// PiecewisePolynomial
// ─────────────────────────────────────────────

/// Piecewise interpolant through knot points sorted by ascending x.
/// Evaluation outside the knot range extrapolates along the end segments,
/// which root searches near the muscle borders rely on.
pub struct PiecewisePolynomial {
    max_x: f64,
    polynomial_type: PolynomialType,
    subpolynomial_list: Vec<Subpolynomial>,
    has_derivatives: bool,
}

impl PiecewisePolynomial {
    /// Interpolant without precomputed derivative coefficients.
    pub fn new(
        polynomial_type: PolynomialType,
        points: Vec<Point2D>,
    ) -> Option<PiecewisePolynomial> {
        Self::new_inner(polynomial_type, points, false)
    }

    /// Interpolant with first and second derivative coefficients, required
    /// wherever the curve feeds tangent or curvature computations.
    pub fn new_with_derivatives(
        polynomial_type: PolynomialType,
        points: Vec<Point2D>,
    ) -> Option<PiecewisePolynomial> {
        Self::new_inner(polynomial_type, points, true)
    }

    fn new_inner(
        polynomial_type: PolynomialType,
        points: Vec<Point2D>,
        with_deriv: bool,
    ) -> Option<PiecewisePolynomial> {
        if points.len() < get_necessary_points(polynomial_type) {
            return None;
        }

        let coef_list = match polynomial_type {
            PolynomialType::Linear       => generate_linear_coef_list(&points),
            PolynomialType::NaturalCubic => generate_natural_cubic_coef_list(&points),
        }?;

        let subpolynomial_list = (0..(points.len() - 1))
            .map(|i| Subpolynomial::new(coef_list[i].clone(), points[i].x(), with_deriv))
            .collect();

        Some(PiecewisePolynomial {
            subpolynomial_list,
            max_x: points.last().map(|pt| pt.x())?,
            polynomial_type,
            has_derivatives: with_deriv,
        })
    }

    pub fn polynomial_type(&self) -> PolynomialType {
        self.polynomial_type
    }

    pub fn has_derivatives(&self) -> bool {
        self.has_derivatives
    }

    fn find_segment(&self, x: f64) -> usize {
        if x <= self.min_x() {
            0
        } else if x >= self.max_x {
            self.subpolynomial_list.len() - 1
        } else {
            self.subpolynomial_list
                .partition_point(|s| s.lhs_x <= x)
                .saturating_sub(1)
        }
    }
}

impl NonparametricCurve for PiecewisePolynomial {
    fn points(&self) -> Vec<Point2D> {
        let mut pts: Vec<Point2D> = self
            .subpolynomial_list
            .iter()
            .map(|s| Point2D::new(s.lhs_x, s.value(s.lhs_x)))
            .collect();
        if let Some(last) = self.subpolynomial_list.last() {
            pts.push(Point2D::new(self.max_x, last.value(self.max_x)));
        }
        pts
    }

    fn min_x(&self) -> f64 {
        self.subpolynomial_list[0].lhs_x
    }

    fn max_x(&self) -> f64 {
        self.max_x
    }
}

impl Curve for PiecewisePolynomial {
    fn value(&self, x: f64) -> f64 {
        let i = self.find_segment(x);
        self.subpolynomial_list[i].value(x)
    }

    fn derivative(&self, x: f64) -> f64 {
        let i = self.find_segment(x);
        self.subpolynomial_list[i]
            .derivative(x)
            .expect("derivative coefficients not built: use new_with_derivatives")
    }

    fn second_derivative(&self, x: f64) -> f64 {
        let i = self.find_segment(x);
        self.subpolynomial_list[i]
            .second_derivative(x)
            .expect("derivative coefficients not built: use new_with_derivatives")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn knots(values: &[(f64, f64)]) -> Vec<Point2D> {
        values.iter().map(|&(x, y)| Point2D::new(x, y)).collect()
    }

    #[test]
    fn linear_interpolates_between_knots() {
        let pp = PiecewisePolynomial::new_with_derivatives(
            PolynomialType::Linear,
            knots(&[(0.0, 0.0), (10.0, 5.0), (20.0, 25.0)]),
        )
        .unwrap();
        assert_relative_eq!(pp.value(5.0), 2.5);
        assert_relative_eq!(pp.value(15.0), 15.0);
        assert_relative_eq!(pp.derivative(3.0), 0.5);
        assert_relative_eq!(pp.derivative(15.0), 2.0);
    }

    #[test]
    fn linear_extrapolates_along_end_segments() {
        let pp = PiecewisePolynomial::new(
            PolynomialType::Linear,
            knots(&[(0.0, 1.0), (10.0, 11.0)]),
        )
        .unwrap();
        assert_relative_eq!(pp.value(-5.0), -4.0);
        assert_relative_eq!(pp.value(20.0), 21.0);
    }

    #[test]
    fn natural_cubic_passes_through_knots() {
        let pts = knots(&[(0.0, 0.0), (1.0, 2.0), (2.0, 1.0), (3.0, 3.0), (4.0, 2.5)]);
        let pp = PiecewisePolynomial::new_with_derivatives(
            PolynomialType::NaturalCubic,
            pts.clone(),
        )
        .unwrap();
        for pt in &pts {
            assert_relative_eq!(pp.value(pt.x()), pt.y(), epsilon = 1.0e-10);
        }
        // Natural boundary condition: curvature vanishes at the end knots.
        assert_relative_eq!(pp.second_derivative(0.0), 0.0, epsilon = 1.0e-10);
        assert_relative_eq!(pp.second_derivative(4.0), 0.0, epsilon = 1.0e-10);
    }

    #[test]
    fn natural_cubic_is_c1_at_interior_knots() {
        let pp = PiecewisePolynomial::new_with_derivatives(
            PolynomialType::NaturalCubic,
            knots(&[(0.0, 0.0), (1.0, 1.0), (2.0, 0.0), (3.0, 1.0)]),
        )
        .unwrap();
        let eps = 1.0e-6;
        for knot in [1.0, 2.0] {
            let left = pp.derivative(knot - eps);
            let right = pp.derivative(knot + eps);
            assert_relative_eq!(left, right, epsilon = 1.0e-4);
        }
    }

    #[test]
    fn too_few_points_rejected() {
        assert!(PiecewisePolynomial::new(PolynomialType::Linear, knots(&[(0.0, 1.0)])).is_none());
        assert!(
            PiecewisePolynomial::new(PolynomialType::NaturalCubic, knots(&[(0.0, 1.0), (1.0, 2.0)]))
                .is_none()
        );
    }
}
