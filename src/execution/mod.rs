//! Path execution: the real-time stepper and its concurrent validator.
//!
//! [`ConstantVelocityExecutor`] drives a robot proxy through a path at
//! constant linear speed. A single `execute` call owns one primary stepping
//! loop plus, optionally, one concurrent validation task that re-checks the
//! remaining path for newly discovered collisions. Every recoverable
//! failure — missing robot, degenerate path, mid-motion collision, battery
//! exhaustion, user cancellation — is reported through the returned
//! [`ExecutionResult`], never raised to the caller.

mod config;
mod executor;
mod result;

pub use config::{ConfigError, ExecutorConfig};
pub use executor::{CancelHandle, ConstantVelocityExecutor};
pub use result::{ExecutionResult, ExecutionStatus};
