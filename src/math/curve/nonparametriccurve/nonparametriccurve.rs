

/// A 2-D pixel-space point. `x` is the column (the independent axis shared
/// by all curve models), `y` is the row, which grows with tissue depth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point2D {
    x: f64,
    y: f64
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Point2D {
        Point2D { x, y }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn slope(lhs_pt: &Point2D, rhs_pt: &Point2D) -> f64 {
        (rhs_pt.y - lhs_pt.y) / (rhs_pt.x - lhs_pt.x)
    }

    pub fn distance_squared(lhs_pt: &Point2D, rhs_pt: &Point2D) -> f64 {
        let dx = rhs_pt.x - lhs_pt.x;
        let dy = rhs_pt.y - lhs_pt.y;
        dx * dx + dy * dy
    }
}

pub trait NonparametricCurve {
    fn points(&self) -> Vec<Point2D>;

    fn min_x(&self) -> f64;

    fn max_x(&self) -> f64;
}
