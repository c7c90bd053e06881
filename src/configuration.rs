use std::fs::File;
use std::io::{
    BufReader,
    Read
};
use std::path::Path;

use serde::Deserialize;

use crate::calibration::Calibration;
use crate::measurement::intersection::candidatefilter::SolverSettings;
use crate::measurement::measurementerror::MeasurementError;
use crate::measurement::pennationangle::AngleConvention;

/// Per-setup measurement settings, loaded from a JSON document. Every
/// acceptance threshold of the intersection solver is calibrated for the
/// imaging rig at hand, so none of them is hard-coded; a missing field
/// falls back to its documented default.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct MeasurementConfiguration {
    pub calibration: Calibration,
    pub solver: SolverSettings,
    pub angle_convention: AngleConvention,
}

impl MeasurementConfiguration {
    pub fn from_reader<R: Read>(reader: R) -> Result<MeasurementConfiguration, MeasurementError> {
        let configuration = serde_json::from_reader(reader)?;
        Ok(configuration)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<MeasurementConfiguration, MeasurementError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn full_document_parses() {
        let json = r#"{
            "calibration": { "horizontal": 0.06, "vertical": 0.05 },
            "solver": {
                "root_finding": { "step_tolerance": 0.02, "max_iterations": 150 },
                "residual_tolerance": 0.4,
                "min_separation": 120.0
            },
            "angle_convention": "legacy_tangent"
        }"#;
        let configuration = MeasurementConfiguration::from_reader(json.as_bytes()).unwrap();
        assert_relative_eq!(configuration.calibration.horizontal, 0.06);
        assert_relative_eq!(configuration.solver.residual_tolerance, 0.4);
        assert_relative_eq!(configuration.solver.root_finding.step_tolerance, 0.02);
        assert_eq!(configuration.solver.root_finding.max_iterations, 150);
        assert_relative_eq!(configuration.solver.min_separation, 120.0);
        assert_eq!(configuration.angle_convention, AngleConvention::LegacyTangent);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let configuration = MeasurementConfiguration::from_reader("{}".as_bytes()).unwrap();
        assert_relative_eq!(configuration.calibration.horizontal, 1.0);
        assert_relative_eq!(configuration.solver.residual_tolerance, 0.5);
        assert_relative_eq!(configuration.solver.min_separation, 100.0);
        assert_eq!(configuration.angle_convention, AngleConvention::ArcTangent);
    }

    #[test]
    fn malformed_document_is_a_parse_error() {
        let err = MeasurementConfiguration::from_reader("not json".as_bytes()).unwrap_err();
        assert!(matches!(err, MeasurementError::JsonParse(_)));
    }
}
