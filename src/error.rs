//! Error types for the amplifier designer.
//!
//! This module provides a unified error type [`DesignError`] that covers
//! all error conditions that can occur during the design search, MNA
//! assembly and solving, and netlist export.

use thiserror::Error;

use crate::amplifier::Check;
use crate::circuit::{BranchId, NodeId};

/// Result type alias using [`DesignError`].
pub type Result<T> = std::result::Result<T, DesignError>;

/// Unified error type for all designer operations.
#[derive(Error, Debug)]
pub enum DesignError {
    // ============ Input Errors ============
    /// Invalid parameter value
    #[error("Invalid parameter '{param}': {message}")]
    InvalidParameter { param: String, message: String },

    // ============ Search Errors ============
    /// The design search exhausted its iteration budget
    #[error("Design search did not converge after {iterations} iterations (last failing check: {last_check})")]
    ConvergenceFailure { iterations: usize, last_check: Check },

    // ============ MNA Errors ============
    /// Node index outside the system
    #[error("Node {node} is out of range for a system with {num_nodes} nodes")]
    NodeOutOfRange { node: NodeId, num_nodes: usize },

    /// Voltage source branch index outside the system
    #[error("Branch {branch} is out of range for a system with {num_sources} voltage sources")]
    BranchOutOfRange { branch: BranchId, num_sources: usize },

    /// Voltage source branch stamped twice
    #[error("Branch {branch} has already been stamped")]
    DuplicateBranch { branch: BranchId },

    /// Matrix is singular and cannot be solved
    #[error("Singular matrix - circuit may have a short circuit or floating node")]
    SingularMatrix,

    // ============ I/O Errors ============
    /// Error writing the netlist file
    #[error("Failed to write netlist file '{path}': {source}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Error writing to an output stream
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DesignError {
    /// Create an invalid parameter error
    pub fn invalid_parameter(param: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            param: param.into(),
            message: message.into(),
        }
    }

    /// Create a convergence failure error
    pub fn convergence_failure(iterations: usize, last_check: Check) -> Self {
        Self::ConvergenceFailure {
            iterations,
            last_check,
        }
    }
}

/// Reject values that are not finite and strictly positive.
pub(crate) fn require_positive(param: &str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(DesignError::invalid_parameter(
            param,
            format!("expected a finite value greater than zero, got {value}"),
        ))
    }
}
