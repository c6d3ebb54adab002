//! # Algorithms
//!
//! The solvers of this crate. Each invocation owns its working data (tableau or allocation)
//! exclusively; nothing is shared between solves, so independent solves can run concurrently
//! without synchronization.
use thiserror::Error;

use crate::data::error::InvalidInput;

pub mod branch_and_bound;
pub mod graphical;
pub mod simplex;
pub mod transportation;
pub(crate) mod utilities;

/// Configuration shared by all solvers.
///
/// The iteration caps are safety nets: the deterministic tie-break rules prevent cycling on all
/// known inputs, but no solver is allowed to loop forever. Exceeding a cap is reported as a
/// `SolveError`, never by panicking.
#[derive(Debug, Clone, PartialEq)]
pub struct SolveOptions {
    /// Absolute tolerance used in all floating-point comparisons.
    pub tolerance: f64,
    /// Maximum number of basis changes in a single simplex run.
    pub max_pivots: usize,
    /// Maximum number of sub-problems branch and bound may explore.
    pub max_nodes: usize,
    /// Maximum number of improvement steps in the transportation optimality loop.
    pub max_improvements: usize,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            tolerance: 1e-9,
            max_pivots: 10_000,
            max_nodes: 10_000,
            max_improvements: 1_000,
        }
    }
}

impl SolveOptions {
    /// Replace the comparison tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Replace the pivot cap.
    #[must_use]
    pub fn with_max_pivots(mut self, max_pivots: usize) -> Self {
        self.max_pivots = max_pivots;
        self
    }

    /// Replace the node cap.
    #[must_use]
    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = max_nodes;
        self
    }

    /// Replace the improvement step cap.
    #[must_use]
    pub fn with_max_improvements(mut self, max_improvements: usize) -> Self {
        self.max_improvements = max_improvements;
        self
    }
}

/// A solve attempt that could not produce an outcome.
///
/// Infeasibility and unboundedness are outcomes, not errors; this type covers input rejected
/// before solving and the hard caps that bound worst-case running time.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolveError {
    /// The input was rejected before any solving began.
    #[error(transparent)]
    InvalidInput(#[from] InvalidInput),
    /// The simplex loop exceeded the configured number of basis changes.
    #[error("no optimum after {0} pivots")]
    PivotLimit(usize),
    /// Branch and bound exceeded the configured number of sub-problems.
    #[error("no proven optimum after exploring {0} sub-problems")]
    NodeLimit(usize),
    /// The transportation improvement loop exceeded its configured step count.
    #[error("no optimal allocation after {0} improvement steps")]
    ImprovementLimit(usize),
}
