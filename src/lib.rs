//! # CE Designer
//!
//! Bias-point design and verification for a single-stage common-emitter
//! BJT amplifier.
//!
//! This library provides:
//! - A fixed-drop BJT model and the four-resistor bias network around it
//! - DC operating-point and midband gain evaluation
//! - A fixed-step search that tunes R1/R2/RC/RE towards a target gain while
//!   keeping the transistor forward-active
//! - A Modified Nodal Analysis (MNA) solver used to re-check the result
//! - SPICE netlist export of the accepted design
//!
//! ## Architecture
//!
//! - [`components`] - Device parameters and the resistor network
//! - [`amplifier`] - Bias point, gain and the design search
//! - [`circuit`] - Node addressing and the fixed verification topology
//! - [`solver`] - MNA stamping and dense LU solving
//! - [`netlist`] - Netlist writer
//!
//! ## Usage
//!
//! ```no_run
//! use ce_designer::{design_amplifier, CeTopology};
//!
//! let design = design_amplifier(0.1, 12.0, None)?;
//! let check = CeTopology::default().verify(&design)?;
//! println!("gain {:.2}, base {:.3} V", design.voltage_gain, check.base_voltage());
//! # Ok::<(), ce_designer::DesignError>(())
//! ```
//!
//! ### CLI
//!
//! ```bash
//! ce-design --vin 100m --vcc 12 --gain 40
//! ```

pub mod amplifier;
pub mod circuit;
pub mod components;
pub mod error;
pub mod netlist;
pub mod solver;
pub mod units;

// Re-export main types for convenience
pub use amplifier::{design_amplifier, DesignConfig, DesignResult, DesignSearch, DesignWarning};
pub use circuit::CeTopology;
pub use error::{DesignError, Result};

/// Thermal voltage used for the intrinsic emitter resistance (26 mV)
pub const THERMAL_VOLTAGE: f64 = 0.026;
