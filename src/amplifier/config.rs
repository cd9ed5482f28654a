//! Configuration for the design search.

use crate::components::{BiasNetwork, DeviceParameters};

/// Default iteration budget for the design search.
pub const DEFAULT_MAX_ITERATIONS: usize = 1000;

/// Default acceptance window around the target gain.
pub const DEFAULT_GAIN_TOLERANCE: f64 = 0.05;

/// Default margin (V) kept between the output peak and the supply rail.
pub const DEFAULT_HEADROOM_MARGIN: f64 = 0.5;

/// Default margin (V) above V_CE(sat) for the device to count as active.
pub const DEFAULT_SATURATION_MARGIN: f64 = 0.1;

/// Configuration for the design search.
#[derive(Debug, Clone)]
pub struct DesignConfig {
    /// Maximum search iterations before giving up.
    pub max_iterations: usize,
    /// Accepted |gain - target|.
    pub gain_tolerance: f64,
    /// Output headroom margin (volts).
    pub headroom_margin: f64,
    /// Margin above the saturation voltage (volts).
    pub saturation_margin: f64,
    /// Starting resistor values.
    pub initial: BiasNetwork,
    /// Transistor model.
    pub device: DeviceParameters,
}

impl Default for DesignConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            gain_tolerance: DEFAULT_GAIN_TOLERANCE,
            headroom_margin: DEFAULT_HEADROOM_MARGIN,
            saturation_margin: DEFAULT_SATURATION_MARGIN,
            initial: BiasNetwork::default(),
            device: DeviceParameters::default(),
        }
    }
}

impl DesignConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the iteration budget.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the gain acceptance window.
    pub fn with_gain_tolerance(mut self, tolerance: f64) -> Self {
        self.gain_tolerance = tolerance;
        self
    }

    /// Set the output headroom margin (in volts).
    pub fn with_headroom_margin(mut self, margin: f64) -> Self {
        self.headroom_margin = margin;
        self
    }

    /// Set the margin above V_CE(sat) (in volts).
    pub fn with_saturation_margin(mut self, margin: f64) -> Self {
        self.saturation_margin = margin;
        self
    }

    /// Set the starting resistor values.
    pub fn with_initial(mut self, initial: BiasNetwork) -> Self {
        self.initial = initial;
        self
    }

    /// Set the transistor model.
    pub fn with_device(mut self, device: DeviceParameters) -> Self {
        self.device = device;
        self
    }
}
