//! DC operating point of the common-emitter stage.

use crate::components::{BiasNetwork, DeviceParameters};

/// DC currents (A) and voltages (V) of the transistor at rest.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OperatingPoint {
    pub base_current: f64,
    pub collector_current: f64,
    pub emitter_current: f64,
    pub collector_voltage: f64,
    pub emitter_voltage: f64,
    pub collector_emitter_voltage: f64,
}

impl OperatingPoint {
    /// Whether the device sits in its forward-active region: V_CE clears
    /// `V_CE(sat) + margin` and collector current flows.
    pub fn is_active(&self, device: &DeviceParameters, margin: f64) -> bool {
        self.collector_emitter_voltage > device.v_ce_sat + margin && self.collector_current > 0.0
    }
}

/// Compute the operating point by reducing R1/R2 to its Thevenin equivalent.
///
/// I_B = (V_th - V_BE(on)) / (R_th + (β+1)·R_E)
///
/// Total over strictly positive resistor values. No physical validity is
/// implied; an off or saturated device still yields numbers, so check
/// [`OperatingPoint::is_active`].
pub fn operating_point(
    supply_voltage: f64,
    network: &BiasNetwork,
    device: &DeviceParameters,
) -> OperatingPoint {
    let (v_th, r_th) = network.thevenin(supply_voltage);
    let beta = device.beta_f;

    let base_current = (v_th - device.v_be_on) / (r_th + (beta + 1.0) * network.re);
    let collector_current = beta * base_current;
    let emitter_current = collector_current + base_current;
    let emitter_voltage = emitter_current * network.re;
    let collector_voltage = supply_voltage - collector_current * network.rc;

    OperatingPoint {
        base_current,
        collector_current,
        emitter_current,
        collector_voltage,
        emitter_voltage,
        collector_emitter_voltage: collector_voltage - emitter_voltage,
    }
}
