//! Fixed-step design search.
//!
//! The search is a small state machine over the candidate [`BiasNetwork`].
//! Every iteration evaluates the candidate, finds the first failing
//! [`Check`] in priority order and applies that check's correction. A
//! candidate that passes all four checks is the design.

use std::collections::HashSet;
use std::fmt;

use crate::components::{BiasNetwork, DeviceParameters};
use crate::error::{require_positive, DesignError, Result};

use super::bias::{operating_point, OperatingPoint};
use super::config::DesignConfig;
use super::gain::voltage_gain;

/// Acceptance checks, in the order the search repairs them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Check {
    /// Device must be forward-active.
    Activity,
    /// Output peak must stay clear of the supply rail.
    Headroom,
    /// Gain must sit within tolerance of the target.
    GainMatch,
    /// Divider must keep the base in the lower half of the supply.
    BaseBias,
}

impl fmt::Display for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Check::Activity => "activity",
            Check::Headroom => "output headroom",
            Check::GainMatch => "gain match",
            Check::BaseBias => "base bias",
        };
        f.write_str(name)
    }
}

/// Non-fatal diagnostics raised during a search.
#[derive(Debug, Clone, PartialEq)]
pub enum DesignWarning {
    /// The requested gain exceeded the headroom limit and was reduced.
    ClampedTarget { requested: f64, clamped: f64 },
    /// A gain trim led back to an earlier candidate, so the gain-matching
    /// step was scaled down.
    StepRefined { iteration: usize, scale: f64 },
}

impl fmt::Display for DesignWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DesignWarning::ClampedTarget { requested, clamped } => write!(
                f,
                "target gain {requested:.2} too high for Vin and VCC, reduced to {clamped:.2}"
            ),
            DesignWarning::StepRefined { iteration, scale } => write!(
                f,
                "search revisited a candidate at iteration {iteration}, gain step scaled to {scale}"
            ),
        }
    }
}

/// An accepted amplifier design.
#[derive(Debug, Clone, PartialEq)]
pub struct DesignResult {
    /// Final resistor values
    pub network: BiasNetwork,
    /// Achieved midband gain magnitude
    pub voltage_gain: f64,
    /// Q-point of the final design
    pub operating_point: OperatingPoint,
    pub supply_voltage: f64,
    pub input_peak_voltage: f64,
    /// Effective target after clamping
    pub target_gain: f64,
    pub device: DeviceParameters,
    /// Iterations consumed, including the accepting one
    pub iterations: usize,
    pub warnings: Vec<DesignWarning>,
}

impl DesignResult {
    /// Peak output swing for the design's input peak.
    pub fn output_peak_voltage(&self) -> f64 {
        self.input_peak_voltage * self.voltage_gain
    }

    /// Unloaded divider voltage at the base.
    pub fn base_voltage(&self) -> f64 {
        self.network.base_voltage(self.supply_voltage)
    }

    /// Whether the search had to clamp the requested gain.
    pub fn target_was_clamped(&self) -> bool {
        self.warnings
            .iter()
            .any(|w| matches!(w, DesignWarning::ClampedTarget { .. }))
    }
}

/// Largest gain the supply can carry: half the rail over the input peak.
pub fn max_possible_gain(input_peak_voltage: f64, supply_voltage: f64) -> f64 {
    (supply_voltage / 2.0) / input_peak_voltage
}

/// Run the search with the default configuration.
///
/// A `target_gain` of `None`, zero or below means "as much gain as the
/// supply allows".
pub fn design_amplifier(
    input_peak_voltage: f64,
    supply_voltage: f64,
    target_gain: Option<f64>,
) -> Result<DesignResult> {
    DesignSearch::new().run(input_peak_voltage, supply_voltage, target_gain)
}

// ============ Corrections ============
//
// One pure function per check; each maps a failing candidate to the next.

/// Activity fix: larger collector load, lower base drive.
fn widen_collector(net: BiasNetwork) -> BiasNetwork {
    BiasNetwork {
        rc: net.rc + (net.rc * 0.05).max(50.0),
        r2: (net.r2 - 50.0).max(100.0),
        ..net
    }
}

/// Headroom fix: more emitter degeneration.
fn raise_emitter(net: BiasNetwork) -> BiasNetwork {
    BiasNetwork {
        re: net.re + (net.re * 0.05).max(20.0),
        ..net
    }
}

/// Gain fix: nudge R_E against the gain error, floored at 10 ohm.
fn trim_emitter(net: BiasNetwork, gain_too_high: bool, scale: f64) -> BiasNetwork {
    let step = (net.re * 0.02).max(10.0) * scale;
    let re = if gain_too_high {
        net.re + step
    } else {
        (net.re - step).max(10.0)
    };
    BiasNetwork { re, ..net }
}

/// Base bias fix: pull the divider down, floored at 100 ohm.
fn lower_base(net: BiasNetwork) -> BiasNetwork {
    BiasNetwork {
        r2: (net.r2 - 50.0).max(100.0),
        ..net
    }
}

/// Detects a gain-trim limit cycle and scales the trim step down.
///
/// The search is deterministic, so reaching an already visited candidate
/// through a gain trim proves the trim is bouncing around the target.
/// Revisits reached through any other correction are left alone: a smaller
/// gain step cannot break them.
#[derive(Debug, Clone)]
struct CycleGuard {
    visited: HashSet<[u64; 4]>,
    gain_scale: f64,
}

impl Default for CycleGuard {
    fn default() -> Self {
        Self {
            visited: HashSet::new(),
            gain_scale: 1.0,
        }
    }
}

impl CycleGuard {
    /// Record `net`, reached by applying `via`. Returns the new scale when
    /// the gain step was halved.
    fn observe(&mut self, net: &BiasNetwork, via: Check) -> Option<f64> {
        if self.visited.insert(net.fingerprint()) || via != Check::GainMatch {
            return None;
        }
        self.gain_scale *= 0.5;
        self.visited.clear();
        self.visited.insert(net.fingerprint());
        Some(self.gain_scale)
    }

    fn gain_scale(&self) -> f64 {
        self.gain_scale
    }
}

/// One evaluated candidate.
#[derive(Debug, Clone, Copy)]
struct Evaluation {
    op: OperatingPoint,
    gain: f64,
}

/// Fixed inputs of one search run.
#[derive(Debug, Clone, Copy)]
struct Request {
    input_peak_voltage: f64,
    supply_voltage: f64,
    target_gain: f64,
}

/// Design search driver.
#[derive(Debug, Clone, Default)]
pub struct DesignSearch {
    config: DesignConfig,
}

impl DesignSearch {
    /// Create a search with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a search with custom configuration.
    pub fn with_config(config: DesignConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &DesignConfig {
        &self.config
    }

    /// Search for a network meeting every check.
    pub fn run(
        &self,
        input_peak_voltage: f64,
        supply_voltage: f64,
        target_gain: Option<f64>,
    ) -> Result<DesignResult> {
        let input_peak_voltage = require_positive("input_peak_voltage", input_peak_voltage)?;
        let supply_voltage = require_positive("supply_voltage", supply_voltage)?;
        self.validate_config()?;

        let mut warnings = Vec::new();
        let max_gain = max_possible_gain(input_peak_voltage, supply_voltage);
        let target_gain = match target_gain {
            Some(t) if t.is_nan() => {
                return Err(DesignError::invalid_parameter(
                    "target_gain",
                    "target gain is NaN",
                ));
            }
            Some(t) if t > max_gain => {
                let warning = DesignWarning::ClampedTarget {
                    requested: t,
                    clamped: max_gain,
                };
                tracing::warn!(requested = t, clamped = max_gain, "{warning}");
                warnings.push(warning);
                max_gain
            }
            Some(t) if t > 0.0 => t,
            _ => max_gain,
        };

        let request = Request {
            input_peak_voltage,
            supply_voltage,
            target_gain,
        };
        let _span = tracing::debug_span!(
            "design_search",
            vin = input_peak_voltage,
            vcc = supply_voltage,
            target = target_gain
        )
        .entered();

        let device = self.config.device;
        let mut net = self.config.initial;
        let mut cycles = CycleGuard::default();
        let mut last_check = Check::Activity;

        for iter in 0..self.config.max_iterations {
            if let Some(scale) = cycles.observe(&net, last_check) {
                let warning = DesignWarning::StepRefined {
                    iteration: iter,
                    scale,
                };
                tracing::warn!(iteration = iter, scale, "{warning}");
                warnings.push(warning);
            }

            let eval = self.evaluate(supply_voltage, &net);
            let Some(check) = self.first_failing(&request, &net, &eval) else {
                tracing::debug!(iterations = iter + 1, gain = eval.gain, "design accepted");
                return Ok(DesignResult {
                    network: net,
                    voltage_gain: eval.gain,
                    operating_point: eval.op,
                    supply_voltage,
                    input_peak_voltage,
                    target_gain,
                    device,
                    iterations: iter + 1,
                    warnings,
                });
            };

            tracing::trace!(
                iter,
                %check,
                gain = eval.gain,
                vce = eval.op.collector_emitter_voltage,
                "check failed"
            );
            last_check = check;
            net = match check {
                Check::Activity => widen_collector(net),
                Check::Headroom => raise_emitter(net),
                Check::GainMatch => {
                    trim_emitter(net, eval.gain > target_gain, cycles.gain_scale())
                }
                Check::BaseBias => lower_base(net),
            };
        }

        Err(DesignError::convergence_failure(
            self.config.max_iterations,
            last_check,
        ))
    }

    fn validate_config(&self) -> Result<()> {
        let config = &self.config;
        if config.max_iterations == 0 {
            return Err(DesignError::invalid_parameter(
                "max_iterations",
                "iteration budget must be at least 1",
            ));
        }
        require_positive("gain_tolerance", config.gain_tolerance)?;
        for (param, value) in [
            ("headroom_margin", config.headroom_margin),
            ("saturation_margin", config.saturation_margin),
        ] {
            if !value.is_finite() {
                return Err(DesignError::invalid_parameter(
                    param,
                    format!("expected a finite margin, got {value}"),
                ));
            }
        }
        let init = &config.initial;
        BiasNetwork::new(init.r1, init.r2, init.rc, init.re)?;
        Ok(())
    }

    fn evaluate(&self, supply_voltage: f64, net: &BiasNetwork) -> Evaluation {
        let op = operating_point(supply_voltage, net, &self.config.device);
        let gain = voltage_gain(net.rc, net.re, op.collector_current);
        Evaluation { op, gain }
    }

    /// First check the candidate fails, in repair order.
    fn first_failing(&self, req: &Request, net: &BiasNetwork, eval: &Evaluation) -> Option<Check> {
        let config = &self.config;

        if !eval.op.is_active(&config.device, config.saturation_margin) {
            return Some(Check::Activity);
        }

        let output_peak = req.input_peak_voltage * eval.gain;
        if output_peak > req.supply_voltage - eval.op.emitter_voltage - config.headroom_margin {
            return Some(Check::Headroom);
        }

        if (eval.gain - req.target_gain).abs() > config.gain_tolerance {
            return Some(Check::GainMatch);
        }

        if net.base_voltage(req.supply_voltage) > req.supply_voltage / 2.0 {
            return Some(Check::BaseBias);
        }

        None
    }
}
