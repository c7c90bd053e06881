use serde::Deserialize;

/// Pixel-to-millimetre conversion factors, one per image axis. Produced by
/// the calibration stage of the acquisition pipeline; every measurer takes
/// them as plain positive scalars.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct Calibration {
    /// Millimetres per pixel along the column axis.
    pub horizontal: f64,
    /// Millimetres per pixel along the row axis.
    pub vertical: f64,
}

impl Calibration {
    pub fn new(horizontal: f64, vertical: f64) -> Calibration {
        Calibration { horizontal, vertical }
    }

    /// One millimetre per pixel on both axes, the convention of all
    /// pixel-space tests.
    pub fn identity() -> Calibration {
        Calibration { horizontal: 1.0, vertical: 1.0 }
    }
}

impl Default for Calibration {
    fn default() -> Calibration {
        Calibration::identity()
    }
}
