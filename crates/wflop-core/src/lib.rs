//! Core domain types for WFLOP solver benchmarking.
//!
//! This crate holds the problem-instance model shared by the generator and
//! the results tooling, the identity scheme that correlates generated
//! instances with solver output, and the unified error type used across
//! the workspace.

pub mod error;
pub mod identity;
pub mod model;

pub use error::{WflopError, WflopResult};
pub use identity::{instance_identity, parse_identity};
pub use model::{PhysicalConstants, ProblemInstance, WindProfile};
