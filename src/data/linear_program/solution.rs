//! # Representation of solutions
//!
//! Once a linear program is fully solved, a solution is derived. Values of auxiliary variables
//! (slack, surplus, artificial) are dropped before a solution is handed to the caller; only the
//! original decision variables remain.

/// A solution to a linear program.
///
/// Contains the objective value in terms of the original problem (a minimized problem that was
/// negated internally reports its true minimum) and one value per original decision variable.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    /// Value of the objective function for this solution.
    pub objective_value: f64,
    /// Solution values, ordered as the variables of the original problem.
    pub variable_values: Vec<f64>,
}

impl Solution {
    /// Create a new `Solution` instance.
    ///
    /// A plain constructor.
    pub fn new(objective_value: f64, variable_values: Vec<f64>) -> Self {
        Self { objective_value, variable_values }
    }
}
