pub mod calibration;
pub mod configuration;

pub mod math {
    pub mod rootfinding;

    pub mod curve {
        pub mod curve;
        pub mod polynomial;
        pub mod nonparametriccurve {
            pub mod nonparametriccurve;
            pub mod piecewisepolynomial;
        }
    }
}

pub mod model {
    pub mod curvemodel;
}

pub mod measurement {
    pub mod curvature;
    pub mod fasciclelength;
    pub mod fasciclelocation;
    pub mod measurementerror;
    pub mod pennationangle;
    pub mod thickness;

    pub mod intersection {
        pub mod candidatefilter;
        pub mod intersectionsolver;
    }
}
