use serde::Deserialize;

/// Tolerances for the scalar Newton iteration. `step_tolerance` is the
/// convergence threshold on the iterate update; both values are calibrated
/// per imaging setup together with the solver's acceptance thresholds.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct RootFindingSettings {
    pub step_tolerance: f64,
    pub max_iterations: usize,
}

impl Default for RootFindingSettings {
    fn default() -> RootFindingSettings {
        RootFindingSettings {
            step_tolerance: 0.01,
            max_iterations: 200,
        }
    }
}

/// A converged root together with the residual left at the solution. The
/// residual is screened separately by the acceptance filter, so convergence
/// of the iteration alone never implies acceptance.
#[derive(Debug, Clone, Copy)]
pub struct Root {
    pub x: f64,
    pub residual: f64,
    pub iterations: usize,
}

/// Half-width of the central difference used for the local slope, in
/// columns. Pixel-scale curves are smooth at this resolution.
const SLOPE_HALF_WIDTH: f64 = 0.5;

/// Largest per-iteration step, in columns. Caps the excursions Newton takes
/// across near-flat stretches of the difference curve.
const MAX_STEP: f64 = 25.0;

/// Newton iteration on `f` from the start point `x0`, with the slope taken
/// from a central finite difference. Returns `None` when the iteration does
/// not converge within the cap, when the local slope degenerates, or when
/// the iterate leaves the finite range; callers treat all three as a normal
/// rejection, never an error.
pub fn find_root<F>(f: F, x0: f64, settings: &RootFindingSettings) -> Option<Root>
where
    F: Fn(f64) -> f64,
{
    let mut x = x0;

    for iteration in 1..=settings.max_iterations {
        let residual = f(x);
        let slope = (f(x + SLOPE_HALF_WIDTH) - f(x - SLOPE_HALF_WIDTH))
            / (2.0 * SLOPE_HALF_WIDTH);
        if slope.abs() < 1.0e-12 {
            return None;
        }

        let step = (residual / slope).clamp(-MAX_STEP, MAX_STEP);
        x -= step;
        if !x.is_finite() {
            return None;
        }

        if step.abs() < settings.step_tolerance {
            return Some(Root {
                x,
                residual: f(x),
                iterations: iteration,
            });
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn finds_root_of_linear_function() {
        let settings = RootFindingSettings::default();
        let root = find_root(|x| 2.0 * x - 8.0, 0.0, &settings).unwrap();
        assert_abs_diff_eq!(root.x, 4.0, epsilon = 0.01);
        assert!(root.residual.abs() < 0.1);
    }

    #[test]
    fn finds_nearest_root_of_cubic_from_start_point() {
        // Roots at -3, 0, 3; starting near the right one must stay there.
        let settings = RootFindingSettings::default();
        let f = |x: f64| x * (x - 3.0) * (x + 3.0);
        let root = find_root(f, 2.6, &settings).unwrap();
        assert_abs_diff_eq!(root.x, 3.0, epsilon = 0.05);
    }

    #[test]
    fn rootless_function_does_not_converge() {
        let settings = RootFindingSettings::default();
        assert!(find_root(|x| x * x + 1.0, 0.3, &settings).is_none());
    }

    #[test]
    fn flat_function_rejected() {
        let settings = RootFindingSettings::default();
        assert!(find_root(|_| 1.0, 0.0, &settings).is_none());
    }
}
