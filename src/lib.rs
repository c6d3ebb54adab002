//! # A linear program and transportation problem solver
//!
//! Linear programs are solved with the tableau-based primal simplex method, extended with the
//! Big-M technique for `>=` and `=` constraints and with branch and bound for integer
//! restrictions. Two-variable programs can alternatively be solved exactly by corner-point
//! enumeration. Transportation problems get an initial basic feasible solution from the
//! northwest corner rule, the least cost method or Vogel's approximation, and are driven to
//! optimality with the MODI improvement loop.
//!
//! All solvers are deterministic: entering columns, branching variables and improvement loops
//! follow documented tie-break rules, so equal inputs give equal outputs.
#![warn(missing_docs)]

pub mod algorithm;
pub mod data;

#[cfg(test)]
pub(crate) mod tests;
