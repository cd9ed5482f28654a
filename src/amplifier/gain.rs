//! Midband small-signal voltage gain.

use crate::components::DeviceParameters;

/// Voltage gain magnitude |A_v| = R_C / (R_E + r_e) with r_e = V_T / I_C.
///
/// With no collector current r_e falls back to 0, giving R_C / R_E.
pub fn voltage_gain(rc: f64, re: f64, collector_current: f64) -> f64 {
    rc / (re + DeviceParameters::emitter_resistance(collector_current))
}
