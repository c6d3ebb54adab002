//! # Building blocks to describe linear programs.
use crate::data::linear_program::solution::Solution;

/// A `Constraint` is a type of (in)equality.
#[allow(missing_docs)]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ConstraintType {
    Equal,
    Greater,
    Less,
}

/// Direction of optimization.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Objective {
    Maximize,
    #[default]
    Minimize,
}

/// Direction of a variable bound added during branching.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum BoundDirection {
    /// x >= b, a `>=` constraint row.
    Lower,
    /// x <= b, a `<=` constraint row.
    Upper,
}

/// After solving, either an optimum is found or the problem is determined to be infeasible or
/// unbounded.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq)]
pub enum LinearProgramType {
    FiniteOptimum(Solution),
    Infeasible,
    Unbounded,
}

impl LinearProgramType {
    /// The contained solution, if a finite optimum was found.
    pub fn into_solution(self) -> Option<Solution> {
        match self {
            LinearProgramType::FiniteOptimum(solution) => Some(solution),
            _ => None,
        }
    }
}
