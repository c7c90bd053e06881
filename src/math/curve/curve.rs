

/// A continuous, twice differentiable 1-D function over the image column
/// axis. Implementors extrapolate outside their knot range so that root
/// searches may evaluate slightly beyond it.
pub trait Curve: Send + Sync {
    fn value(&self, x: f64) -> f64;

    fn derivative(&self, x: f64) -> f64;

    fn second_derivative(&self, x: f64) -> f64;
}
