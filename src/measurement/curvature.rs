use crate::math::curve::nonparametriccurve::nonparametriccurve::Point2D;
use crate::model::curvemodel::CurveModel;

/// Discrete gradient along a sequence: central differences at interior
/// samples, one-sided differences at the edges, unit spacing.
fn gradient(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    match n {
        0 => Vec::new(),
        1 => vec![0.0],
        _ => {
            let mut grad = vec![0.0; n];
            grad[0] = values[1] - values[0];
            grad[n - 1] = values[n - 1] - values[n - 2];
            for i in 1..(n - 1) {
                grad[i] = (values[i + 1] - values[i - 1]) / 2.0;
            }
            grad
        }
    }
}

/// Pointwise curvature of an ordered 2-D point sequence, from discrete
/// first and second gradients along the sequence:
/// `(x'y'' - y'x'') / (x'^2 + y'^2)^(3/2)`. The sequence may be any
/// parametrization of the curve; accuracy depends on sample density.
pub fn discrete_curvature(points: &[Point2D]) -> Vec<f64> {
    let xs: Vec<f64> = points.iter().map(|pt| pt.x()).collect();
    let ys: Vec<f64> = points.iter().map(|pt| pt.y()).collect();

    let x_prime = gradient(&xs);
    let y_prime = gradient(&ys);
    let x_second = gradient(&x_prime);
    let y_second = gradient(&y_prime);

    (0..points.len())
        .map(|i| {
            let speed_squared = x_prime[i] * x_prime[i] + y_prime[i] * y_prime[i];
            (x_prime[i] * y_second[i] - y_prime[i] * x_second[i]) / speed_squared.powf(1.5)
        })
        .collect()
}

/// Curvature of a curve model at the given columns, from its analytic
/// derivatives: the same closed form specialized to a function graph,
/// `f'' / (1 + f'^2)^(3/2)`.
pub fn analytic_curvature(model: &CurveModel, columns: &[f64]) -> Vec<f64> {
    columns
        .iter()
        .map(|&x| {
            let first = model.derivative(x);
            let second = model.second_derivative(x);
            second / (1.0 + first * first).powf(1.5)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::curve::curve::Curve;
    use crate::math::curve::polynomial::Polynomial;
    use approx::assert_abs_diff_eq;
    use std::sync::Arc;

    #[test]
    fn straight_line_has_zero_curvature_in_both_modes() {
        let points: Vec<Point2D> = (0..100)
            .map(|i| Point2D::new(i as f64, 0.5 * i as f64 + 3.0))
            .collect();
        for kappa in discrete_curvature(&points) {
            assert_abs_diff_eq!(kappa, 0.0, epsilon = 1.0e-12);
        }

        let model =
            CurveModel::from_line_coefficients(&[0.5, 3.0], (0.0, 100.0)).unwrap();
        let columns: Vec<f64> = (0..100).map(|c| c as f64).collect();
        for kappa in analytic_curvature(&model, &columns) {
            assert_abs_diff_eq!(kappa, 0.0, epsilon = 1.0e-12);
        }
    }

    #[test]
    fn discrete_circle_curvature_is_inverse_radius() {
        let radius = 50.0;
        let n = 720;
        let points: Vec<Point2D> = (0..n)
            .map(|i| {
                let theta = 2.0 * std::f64::consts::PI * i as f64 / n as f64;
                Point2D::new(radius * theta.cos(), radius * theta.sin())
            })
            .collect();
        let curvature = discrete_curvature(&points);
        // Interior samples only; the one-sided edge gradients are cruder.
        for &kappa in &curvature[2..(n as usize - 2)] {
            assert_abs_diff_eq!(kappa.abs(), 1.0 / radius, epsilon = 1.0e-4);
        }
    }

    /// Upper semicircle as a function graph with analytic derivatives.
    struct Semicircle {
        radius: f64,
    }

    impl Curve for Semicircle {
        fn value(&self, x: f64) -> f64 {
            (self.radius * self.radius - x * x).sqrt()
        }

        fn derivative(&self, x: f64) -> f64 {
            -x / self.value(x)
        }

        fn second_derivative(&self, x: f64) -> f64 {
            let y = self.value(x);
            -self.radius * self.radius / (y * y * y)
        }
    }

    #[test]
    fn analytic_circle_curvature_is_inverse_radius() {
        let radius = 80.0;
        let model = CurveModel::new_unsampled(
            Arc::new(Semicircle { radius }),
            (-40.0, 40.0),
        );
        let columns: Vec<f64> = (-40..=40).map(|c| c as f64).collect();
        for kappa in analytic_curvature(&model, &columns) {
            assert_abs_diff_eq!(kappa.abs(), 1.0 / radius, epsilon = 1.0e-10);
        }
    }

    #[test]
    fn discrete_and_analytic_modes_agree_on_a_smooth_curve() {
        // Gentle parabola sampled one point per column.
        let poly = Polynomial::new(vec![0.001, -0.1, 120.0]).unwrap();
        let points: Vec<Point2D> = (0..=200)
            .map(|c| {
                let x = c as f64;
                Point2D::new(x, poly.value(x))
            })
            .collect();
        let model = CurveModel::new_unsampled(Arc::new(poly), (0.0, 200.0));

        let discrete = discrete_curvature(&points);
        let columns: Vec<f64> = (0..=200).map(|c| c as f64).collect();
        let analytic = analytic_curvature(&model, &columns);

        for i in 2..=198 {
            assert_abs_diff_eq!(discrete[i], analytic[i], epsilon = 1.0e-5);
        }
    }

    #[test]
    fn degenerate_inputs_do_not_panic() {
        assert!(discrete_curvature(&[]).is_empty());
        let single = discrete_curvature(&[Point2D::new(0.0, 0.0)]);
        assert_eq!(single.len(), 1);
        assert!(single[0].is_nan());
    }
}
