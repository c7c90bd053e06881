use crate::measurement::intersection::intersectionsolver::IntersectionPoint;

/// Locates a fascicle along the muscle as a single scalar: the calibrated
/// horizontal distance, in millimetres, between one of its crossings and a
/// reference point. Ideally the reference is the point where the two
/// aponeuroses meet, so all fascicles of one image share an origin.
pub fn locate_fascicle(
    crossing: &IntersectionPoint,
    reference: &IntersectionPoint,
    horizontal_calibration: f64,
) -> f64 {
    ((crossing.column - reference.column).abs() as f64) * horizontal_calibration
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn reference_equal_to_crossing_is_zero() {
        let at = IntersectionPoint { row: 140, column: 160 };
        assert_relative_eq!(locate_fascicle(&at, &at, 0.7), 0.0);
    }

    #[test]
    fn grows_with_the_column_gap() {
        let reference = IntersectionPoint { row: 0, column: 0 };
        let mut last = -1.0;
        for column in [5, 40, 90, 200] {
            let crossing = IntersectionPoint { row: 140, column };
            let loc = locate_fascicle(&crossing, &reference, 1.0);
            assert!(loc > last);
            last = loc;
        }
    }

    #[test]
    fn direction_does_not_matter() {
        let reference = IntersectionPoint { row: 0, column: 100 };
        let left = IntersectionPoint { row: 140, column: 60 };
        let right = IntersectionPoint { row: 140, column: 140 };
        assert_relative_eq!(
            locate_fascicle(&left, &reference, 0.5),
            locate_fascicle(&right, &reference, 0.5),
        );
        assert_relative_eq!(locate_fascicle(&left, &reference, 0.5), 20.0);
    }
}
