//! The four-resistor bias network of a common-emitter stage.

use crate::error::{require_positive, Result};

/// Resistor values of the bias network, in ohms.
///
/// ```text
///   Vcc ──┬─────────┐
///         R1        RC
///         │         │ C
///         ├── B ──  Q
///         R2        │ E
///         │         RE
///   GND ──┴─────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiasNetwork {
    /// Upper base divider resistor (supply to base)
    pub r1: f64,
    /// Lower base divider resistor (base to ground)
    pub r2: f64,
    /// Collector load resistor
    pub rc: f64,
    /// Emitter degeneration resistor
    pub re: f64,
}

impl Default for BiasNetwork {
    /// The starting point of the design search.
    fn default() -> Self {
        Self {
            r1: 10_000.0,
            r2: 2_000.0,
            rc: 4_700.0,
            re: 470.0,
        }
    }
}

impl BiasNetwork {
    /// Create a network, rejecting non-positive or non-finite values.
    pub fn new(r1: f64, r2: f64, rc: f64, re: f64) -> Result<Self> {
        Ok(Self {
            r1: require_positive("r1", r1)?,
            r2: require_positive("r2", r2)?,
            rc: require_positive("rc", rc)?,
            re: require_positive("re", re)?,
        })
    }

    /// Thevenin equivalent (V_th, R_th) of the R1/R2 divider fed from `supply_voltage`.
    pub fn thevenin(&self, supply_voltage: f64) -> (f64, f64) {
        let sum = self.r1 + self.r2;
        (supply_voltage * self.r2 / sum, self.r1 * self.r2 / sum)
    }

    /// Unloaded base voltage set by the divider.
    pub fn base_voltage(&self, supply_voltage: f64) -> f64 {
        self.thevenin(supply_voltage).0
    }

    /// Bit pattern of all four values, used to detect revisited candidates.
    pub(crate) fn fingerprint(&self) -> [u64; 4] {
        [
            self.r1.to_bits(),
            self.r2.to_bits(),
            self.rc.to_bits(),
            self.re.to_bits(),
        ]
    }
}
