//! # Linear algebra
//!
//! Dense numeric containers shared by the solvers.
pub mod matrix;
