//! MNA (Modified Nodal Analysis) solver.
//!
//! This module provides the linear engine used to verify a finished design.
//!
//! ## Modified Nodal Analysis
//!
//! MNA assembles a system of equations Ax = z where:
//! - x contains node voltages and branch currents
//! - A is the conductance/coefficient matrix
//! - z is the source vector
//!
//! The matrix structure is:
//! ```text
//! [ G   B ] [ v ]   [ i ]
//! [ C   D ] [ j ] = [ e ]
//! ```
//!
//! where:
//! - G is the conductance matrix (node equations)
//! - B, C connect voltage sources to nodes (C = Bᵀ here)
//! - D is 0 for ideal voltage sources
//! - v is the vector of node voltages
//! - j is the vector of voltage source currents
//! - i is the sum of current sources into each node
//! - e is the vector of voltage source values
//!
//! Ground is node 0 and never owns a row or column.

mod lu;
mod mna;

pub use lu::{DenseLu, PIVOT_THRESHOLD};
pub use mna::{MnaSystem, NodeVoltages};
