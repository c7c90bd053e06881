use rayon::prelude::*;
use tracing::debug;

use crate::math::rootfinding::find_root;
use crate::measurement::intersection::candidatefilter::{
    CandidateGeometry,
    SolverSettings
};
use crate::model::curvemodel::CurveModel;

// ─────────────────────────────────────────────
// Intersection records
// ─────────────────────────────────────────────

/// A fascicle/aponeurosis crossing, recorded in integer pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntersectionPoint {
    pub row: i32,
    pub column: i32,
}

/// A candidate that survived the acceptance filter, with both crossings
/// resolved. `index` is the candidate's position in the input list.
#[derive(Clone)]
pub struct AcceptedFascicle {
    pub index: usize,
    pub fascicle: CurveModel,
    pub upper: IntersectionPoint,
    pub lower: IntersectionPoint,
}

// ─────────────────────────────────────────────
// IntersectionSolver
// ─────────────────────────────────────────────

/// Finds, for each candidate fascicle, its crossing with both aponeuroses
/// inside a muscle region, and keeps only the candidates whose geometry
/// matches the physical prior of the acceptance filter. Candidates that
/// fail any predicate, or whose root solves do not converge, are dropped
/// silently; the solver degrades to a smaller accepted set, never to an
/// error.
pub struct IntersectionSolver {
    settings: SolverSettings,
}

impl IntersectionSolver {
    pub fn new(settings: SolverSettings) -> IntersectionSolver {
        IntersectionSolver { settings }
    }

    pub fn with_defaults() -> IntersectionSolver {
        IntersectionSolver::new(SolverSettings::default())
    }

    pub fn settings(&self) -> &SolverSettings {
        &self.settings
    }

    /// Screens every candidate against the two aponeuroses over
    /// `search_interval`. The upper-boundary solve starts at the left edge
    /// of the interval, the lower-boundary solve at its midpoint.
    ///
    /// Candidates are independent, so they are screened in parallel; the
    /// order-preserving collect keeps the accepted set deterministic for
    /// identical input order.
    pub fn find_intersections(
        &self,
        upper: &CurveModel,
        lower: &CurveModel,
        candidates: &[CurveModel],
        search_interval: (f64, f64),
    ) -> Vec<AcceptedFascicle> {
        let accepted: Vec<AcceptedFascicle> = candidates
            .par_iter()
            .enumerate()
            .filter_map(|(index, fascicle)| {
                self.screen_candidate(upper, lower, fascicle, search_interval)
                    .map(|(upper_pt, lower_pt)| AcceptedFascicle {
                        index,
                        fascicle: fascicle.clone(),
                        upper: upper_pt,
                        lower: lower_pt,
                    })
            })
            .collect();

        debug!(
            candidates = candidates.len(),
            accepted = accepted.len(),
            "fascicle intersection search finished"
        );
        accepted
    }

    fn screen_candidate(
        &self,
        upper: &CurveModel,
        lower: &CurveModel,
        fascicle: &CurveModel,
        search_interval: (f64, f64),
    ) -> Option<(IntersectionPoint, IntersectionPoint)> {
        let (a, b) = search_interval;
        let root_finding = &self.settings.root_finding;

        let upper_root = find_root(|x| upper.value(x) - fascicle.value(x), a, root_finding)?;
        let lower_root =
            find_root(|x| lower.value(x) - fascicle.value(x), (a + b) / 2.0, root_finding)?;

        let geometry = CandidateGeometry {
            upper_column: upper_root.x,
            lower_column: lower_root.x,
            upper_residual: upper_root.residual,
            lower_residual: lower_root.residual,
            depth_at_upper: fascicle.value(upper_root.x),
            depth_at_lower: fascicle.value(lower_root.x),
            search_interval,
        };
        if geometry.first_rejection(&self.settings).is_some() {
            return None;
        }

        Some((
            IntersectionPoint {
                row: geometry.depth_at_upper.round() as i32,
                column: geometry.upper_column.round() as i32,
            },
            IntersectionPoint {
                row: geometry.depth_at_lower.round() as i32,
                column: geometry.lower_column.round() as i32,
            },
        ))
    }
}
