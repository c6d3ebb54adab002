//! # Shared test problems
//!
//! Small problems with hand-verified solutions, used by the unit tests of several modules.
