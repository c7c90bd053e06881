use serde::Deserialize;

use crate::math::rootfinding::RootFindingSettings;

// ─────────────────────────────────────────────
// SolverSettings
// ─────────────────────────────────────────────

/// Acceptance thresholds of the intersection search. They encode a physical
/// prior (minimum visible fascicle length, direction of fibre travel,
/// agreement with the image's own geometry) and are calibrated per imaging
/// setup, so they are configuration, never constants at the call site.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct SolverSettings {
    pub root_finding: RootFindingSettings,
    /// Largest residual, in rows, still counted as a true crossing.
    pub residual_tolerance: f64,
    /// Smallest pixel distance between the two crossings of a visible
    /// fascicle.
    pub min_separation: f64,
}

impl Default for SolverSettings {
    fn default() -> SolverSettings {
        SolverSettings {
            root_finding: RootFindingSettings::default(),
            residual_tolerance: 0.5,
            min_separation: 100.0,
        }
    }
}

// ─────────────────────────────────────────────
// CandidateGeometry
// ─────────────────────────────────────────────

/// Everything the acceptance filter needs to know about one candidate
/// fascicle after both root solves converged: the crossing columns, the
/// residuals left by the solver, the fascicle depth (row) at each crossing,
/// and the search interval.
#[derive(Debug, Clone, Copy)]
pub struct CandidateGeometry {
    pub upper_column: f64,
    pub lower_column: f64,
    pub upper_residual: f64,
    pub lower_residual: f64,
    pub depth_at_upper: f64,
    pub depth_at_lower: f64,
    pub search_interval: (f64, f64),
}

/// Why a candidate was dropped. Rejection is normal filtering; the reasons
/// exist so each predicate stays individually testable, not for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionReason {
    /// The crossing with the upper aponeurosis must lie left of the
    /// crossing with the lower one.
    ColumnOrdering,
    /// The fascicle must run from shallow to deep as the column grows.
    TravelDirection,
    /// A solver residual exceeded the tolerance; the "root" is not a true
    /// crossing.
    ResidualTooLarge,
    /// The two crossings lie closer than the minimum visible fascicle
    /// length.
    SeparationTooSmall,
    /// A crossing fell outside the muscle region under search.
    OutsideSearchRange,
}

impl CandidateGeometry {
    pub fn columns_ordered(&self) -> bool {
        self.upper_column < self.lower_column
    }

    pub fn travels_deeper(&self) -> bool {
        self.depth_at_upper < self.depth_at_lower
    }

    pub fn residuals_within(&self, tolerance: f64) -> bool {
        self.upper_residual.abs() < tolerance && self.lower_residual.abs() < tolerance
    }

    pub fn separation_squared(&self) -> f64 {
        let dc = self.upper_column - self.lower_column;
        let dr = self.depth_at_upper - self.depth_at_lower;
        dc * dc + dr * dr
    }

    pub fn inside_search_range(&self) -> bool {
        self.upper_column > self.search_interval.0 && self.lower_column < self.search_interval.1
    }

    /// Runs the predicate chain in order and reports the first failure.
    /// `None` means the candidate is accepted.
    pub fn first_rejection(&self, settings: &SolverSettings) -> Option<RejectionReason> {
        if !self.columns_ordered() {
            return Some(RejectionReason::ColumnOrdering);
        }
        if !self.travels_deeper() {
            return Some(RejectionReason::TravelDirection);
        }
        if !self.residuals_within(settings.residual_tolerance) {
            return Some(RejectionReason::ResidualTooLarge);
        }
        if self.separation_squared() <= settings.min_separation * settings.min_separation {
            return Some(RejectionReason::SeparationTooSmall);
        }
        if !self.inside_search_range() {
            return Some(RejectionReason::OutsideSearchRange);
        }
        None
    }
}
