//! # Linear programs
//!
//! Representation of linear programs and their solutions.
pub mod elements;
pub mod general_form;
pub mod solution;
