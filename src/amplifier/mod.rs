//! Common-emitter amplifier design.
//!
//! - [`bias`] - DC operating point from a Thevenin-reduced divider
//! - [`gain`] - midband small-signal gain
//! - [`design`] - the fixed-step search that tunes R1/R2/RC/RE
//!
//! ## Search Method
//!
//! Starting from R1 = 10k, R2 = 2k, RC = 4.7k, RE = 470, each iteration
//! repairs the first failing check:
//!
//! | Check | Fails when | Correction |
//! |-------|------------|------------|
//! | Activity | V_CE ≤ V_CE(sat) + 0.1 or I_C ≤ 0 | RC += max(50, 5%), R2 -= 50 (≥ 100) |
//! | Headroom | Vin·Av > VCC - V_E - 0.5 | RE += max(20, 5%) |
//! | Gain match | \|Av - target\| > 0.05 | RE ± max(10, 2%) (≥ 10) |
//! | Base bias | V_B > VCC / 2 | R2 -= 50 (≥ 100) |

pub mod bias;
pub mod config;
pub mod design;
pub mod gain;

pub use bias::{operating_point, OperatingPoint};
pub use config::DesignConfig;
pub use design::{
    design_amplifier, max_possible_gain, Check, DesignResult, DesignSearch, DesignWarning,
};
pub use gain::voltage_gain;
