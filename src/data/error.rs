//! # Input validation errors
//!
//! Problems are validated eagerly when they are constructed. Anything wrong with the data a caller
//! provides is reported through the `InvalidInput` type before any solving begins; solver outcomes
//! such as infeasibility are values, not errors.
use thiserror::Error;

/// A logical problem with caller-provided data.
///
/// Created only before solving starts; a value of this type implies that no solver mutated any
/// state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidInput {
    /// The problem has no variables or no constraints.
    #[error("problem is empty: {0}")]
    Empty(&'static str),
    /// Two parts of the problem description disagree on a dimension.
    ///
    /// The coefficient matrix is leading: constraint rows, right-hand sides and cost coefficients
    /// all need to match it.
    #[error("dimension mismatch for {quantity}: expected {expected}, found {found}")]
    DimensionMismatch {
        /// Description of the value with the offending length.
        quantity: &'static str,
        /// Length implied by the rest of the problem.
        expected: usize,
        /// Length actually provided.
        found: usize,
    },
    /// A value is NaN or infinite.
    #[error("non-finite value for {0}")]
    NonFinite(&'static str),
    /// A value is negative where the problem class does not allow it.
    #[error("negative value for {0}")]
    Negative(&'static str),
    /// The solver requires a specific number of decision variables.
    #[error("expected exactly {expected} decision variables, found {found}")]
    VariableCount {
        /// Number of variables the solver supports.
        expected: usize,
        /// Number of variables in the problem.
        found: usize,
    },
    /// The method selector does not name a known solution method.
    #[error("unknown solution method: {0}")]
    UnknownMethod(String),
    /// The core simplex method only accepts standard-form problems.
    ///
    /// All constraints need to be of the `<=` type with a non-negative right-hand side; other
    /// problems go through the Big-M path instead.
    #[error("problem is not in standard form: {0}")]
    NotStandardForm(&'static str),
}
