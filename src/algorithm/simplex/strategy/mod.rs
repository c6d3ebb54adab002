//! # Strategies
//!
//! Interchangeable decision rules used within the simplex method.
pub mod pivot_rule;
