use image::{
    Rgb,
    RgbImage
};
use serde::Deserialize;

use crate::calibration::Calibration;
use crate::measurement::intersection::intersectionsolver::IntersectionPoint;
use crate::model::curvemodel::CurveModel;

/// Lookahead window, in columns, over which a tangent is laid out before
/// its calibrated slope is turned into an angle. Also the length of the
/// drawn tangent segments.
pub const TANGENT_WINDOW: u32 = 150;

const OVERLAY_COLOR: Rgb<u8> = Rgb([255, 0, 255]);

/// How a calibrated slope ratio becomes an angle in degrees.
///
/// The reference pipeline applies `tan` to the ratio where `atan` is
/// mathematically meant; `LegacyTangent` reproduces that computation
/// verbatim for comparisons against reference measurements and must be
/// selected explicitly. `ArcTangent` is the corrected default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AngleConvention {
    #[default]
    ArcTangent,
    LegacyTangent,
}

impl AngleConvention {
    fn degrees_from_ratio(&self, ratio: f64) -> f64 {
        match self {
            AngleConvention::ArcTangent => ratio.atan().to_degrees(),
            AngleConvention::LegacyTangent => ratio.tan().to_degrees(),
        }
    }
}

/// Pennation angle between a fascicle and an aponeurosis at their shared
/// crossing, in degrees: the absolute difference of the two per-curve
/// angle estimates. Tangent slopes come from a central finite difference
/// over one column on each side of the crossing.
pub fn pennation_angle(
    boundary: &CurveModel,
    fascicle: &CurveModel,
    at: &IntersectionPoint,
    calibration: &Calibration,
    convention: AngleConvention,
) -> f64 {
    let fascicle_angle = tangent_angle(fascicle, at, calibration, convention);
    let boundary_angle = tangent_angle(boundary, at, calibration, convention);
    (fascicle_angle - boundary_angle).abs()
}

/// Same computation, additionally drawing both tangent segments into the
/// caller's raster for visual inspection. The overlay is a pure side
/// effect; the returned angle is identical to `pennation_angle`.
pub fn pennation_angle_with_overlay(
    boundary: &CurveModel,
    fascicle: &CurveModel,
    at: &IntersectionPoint,
    calibration: &Calibration,
    convention: AngleConvention,
    canvas: &mut RgbImage,
) -> f64 {
    draw_tangent(fascicle, at, canvas);
    draw_tangent(boundary, at, canvas);
    pennation_angle(boundary, fascicle, at, calibration, convention)
}

fn central_difference_slope(curve: &CurveModel, column: f64) -> f64 {
    (curve.value(column + 1.0) - curve.value(column - 1.0)) / 2.0
}

fn tangent_angle(
    curve: &CurveModel,
    at: &IntersectionPoint,
    calibration: &Calibration,
    convention: AngleConvention,
) -> f64 {
    let column = at.column as f64;
    let slope = central_difference_slope(curve, column);

    // Rise and run of the tangent across the lookahead window, scaled to
    // physical units per axis.
    let span = (TANGENT_WINDOW - 1) as f64;
    let rise = slope * span * calibration.vertical;
    let run = span * calibration.horizontal;
    convention.degrees_from_ratio(rise / run)
}

fn draw_tangent(curve: &CurveModel, at: &IntersectionPoint, canvas: &mut RgbImage) {
    let column = at.column as f64;
    let slope = central_difference_slope(curve, column);
    let intercept = curve.value(column) - column * slope;

    for step in 0..TANGENT_WINDOW {
        let col = column + step as f64;
        let row = slope * col + intercept;
        if col >= 0.0 && row >= 0.0 && (col as u32) < canvas.width() && (row as u32) < canvas.height()
        {
            canvas.put_pixel(col as u32, row as u32, OVERLAY_COLOR);
        }
    }
}
