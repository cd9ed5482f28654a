//! BJT (Bipolar Junction Transistor) device model.
//!
//! A fixed-drop large-signal model: the base-emitter junction conducts at a
//! constant turn-on voltage, the collector current is β times the base
//! current, and the device stays linear only while V_CE clears the
//! saturation floor.

use crate::error::{require_positive, DesignError, Result};
use crate::THERMAL_VOLTAGE;

/// Parameters for a BJT model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviceParameters {
    /// Forward current gain (β_F)
    pub beta_f: f64,
    /// Base-emitter turn-on voltage (V_BE(on))
    pub v_be_on: f64,
    /// Collector-emitter saturation voltage (V_CE(sat))
    pub v_ce_sat: f64,
}

impl Default for DeviceParameters {
    fn default() -> Self {
        Self {
            beta_f: 100.0,
            v_be_on: 0.7,
            v_ce_sat: 0.2,
        }
    }
}

impl DeviceParameters {
    /// Create a validated parameter set.
    pub fn new(beta_f: f64, v_be_on: f64, v_ce_sat: f64) -> Result<Self> {
        let beta_f = require_positive("beta_f", beta_f)?;
        for (param, value) in [("v_be_on", v_be_on), ("v_ce_sat", v_ce_sat)] {
            if !value.is_finite() {
                return Err(DesignError::invalid_parameter(
                    param,
                    format!("expected a finite voltage, got {value}"),
                ));
            }
        }
        Ok(Self {
            beta_f,
            v_be_on,
            v_ce_sat,
        })
    }

    /// Intrinsic emitter resistance r_e = V_T / I_C.
    ///
    /// Returns 0 when the device carries no collector current. That makes
    /// any gain computed from it optimistic, so callers gate on activity first.
    pub fn emitter_resistance(collector_current: f64) -> f64 {
        if collector_current > 0.0 {
            THERMAL_VOLTAGE / collector_current
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_params() {
        let p = DeviceParameters::default();
        assert_eq!(p.beta_f, 100.0);
        assert_eq!(p.v_be_on, 0.7);
        assert_eq!(p.v_ce_sat, 0.2);
    }

    #[test]
    fn test_rejects_bad_beta() {
        assert!(DeviceParameters::new(0.0, 0.7, 0.2).is_err());
        assert!(DeviceParameters::new(f64::NAN, 0.7, 0.2).is_err());
        assert!(DeviceParameters::new(200.0, f64::INFINITY, 0.2).is_err());
        assert!(DeviceParameters::new(200.0, 0.65, 0.1).is_ok());
    }

    #[test]
    fn test_emitter_resistance() {
        assert_relative_eq!(DeviceParameters::emitter_resistance(1e-3), 26.0);
        assert_eq!(DeviceParameters::emitter_resistance(0.0), 0.0);
        assert_eq!(DeviceParameters::emitter_resistance(-1e-3), 0.0);
    }
}
