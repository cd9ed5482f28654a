//! Fixed net map of the amplifier and MNA verification of a design.

use crate::amplifier::DesignResult;
use crate::error::Result;
use crate::solver::{MnaSystem, NodeVoltages};

use super::{BranchId, NodeId};

/// Node numbering of the resistive verification circuit.
///
/// The transistor is left out, so the collector net is the RC/RE divider
/// and the base net is the unloaded R1/R2 divider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CeTopology {
    pub supply: NodeId,
    pub base: NodeId,
    pub collector: NodeId,
    pub supply_branch: BranchId,
}

impl Default for CeTopology {
    fn default() -> Self {
        Self {
            supply: NodeId(1),
            base: NodeId(2),
            collector: NodeId(3),
            supply_branch: BranchId(0),
        }
    }
}

impl CeTopology {
    /// Non-ground nodes in the map.
    pub const NUM_NODES: usize = 3;
    /// Voltage sources in the map.
    pub const NUM_SOURCES: usize = 1;

    /// Stamp the design's resistors and supply, then solve.
    pub fn build_and_solve(
        &self,
        r1: f64,
        r2: f64,
        rc: f64,
        re: f64,
        supply_voltage: f64,
    ) -> Result<NodeVoltages> {
        let mut mna = MnaSystem::new(Self::NUM_NODES, Self::NUM_SOURCES);
        mna.stamp_resistor(self.supply, self.base, r1)?;
        mna.stamp_resistor(self.base, NodeId::GROUND, r2)?;
        mna.stamp_resistor(self.supply, self.collector, rc)?;
        mna.stamp_resistor(self.collector, NodeId::GROUND, re)?;
        mna.stamp_voltage_source(self.supply, NodeId::GROUND, supply_voltage, self.supply_branch)?;
        mna.solve()
    }

    /// Re-solve an accepted design independently of the search.
    pub fn verify(&self, design: &DesignResult) -> Result<Verification> {
        let net = &design.network;
        let solution =
            self.build_and_solve(net.r1, net.r2, net.rc, net.re, design.supply_voltage)?;
        Ok(Verification {
            topology: *self,
            solution,
            expected_base_voltage: design.base_voltage(),
        })
    }
}

/// Outcome of [`CeTopology::verify`].
#[derive(Debug, Clone, PartialEq)]
pub struct Verification {
    pub topology: CeTopology,
    pub solution: NodeVoltages,
    /// Thevenin base voltage the search worked with
    pub expected_base_voltage: f64,
}

impl Verification {
    fn read(&self, node: NodeId) -> f64 {
        self.solution.voltage(node).unwrap_or(f64::NAN)
    }

    pub fn supply_voltage(&self) -> f64 {
        self.read(self.topology.supply)
    }

    pub fn base_voltage(&self) -> f64 {
        self.read(self.topology.base)
    }

    /// Voltage at the RC/RE junction (output net).
    pub fn collector_voltage(&self) -> f64 {
        self.read(self.topology.collector)
    }

    /// Current drawn from the supply (positive when sourcing).
    pub fn supply_current(&self) -> f64 {
        -self
            .solution
            .branch_current(self.topology.supply_branch)
            .unwrap_or(f64::NAN)
    }

    /// Solved base voltage minus the design's Thevenin voltage.
    pub fn base_voltage_error(&self) -> f64 {
        self.base_voltage() - self.expected_base_voltage
    }

    /// Labelled node voltages, in node order.
    pub fn named_voltages(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("Node 1 (supply)", self.supply_voltage()),
            ("Node 2 (base)", self.base_voltage()),
            ("Node 3 (collector)", self.collector_voltage()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amplifier::design_amplifier;
    use approx::assert_relative_eq;

    #[test]
    fn test_divider_reference_circuit() {
        let v = CeTopology::default()
            .build_and_solve(10_000.0, 2_000.0, 4_700.0, 470.0, 12.0)
            .unwrap();

        assert_relative_eq!(v.voltage(NodeId(1)).unwrap(), 12.0, epsilon = 1e-9);
        assert_relative_eq!(v.voltage(NodeId(2)).unwrap(), 2.0, epsilon = 1e-9);
        assert_relative_eq!(
            v.voltage(NodeId(3)).unwrap(),
            12.0 * 470.0 / 5_170.0,
            epsilon = 1e-9
        );
        // Supply feeds both dividers.
        let i = 12.0 / 12_000.0 + 12.0 / 5_170.0;
        assert_relative_eq!(v.branch_current(BranchId(0)).unwrap(), -i, max_relative = 1e-9);
    }

    #[test]
    fn test_verify_design() {
        let design = design_amplifier(0.1, 12.0, Some(10.0)).unwrap();
        let check = CeTopology::default().verify(&design).unwrap();

        assert_relative_eq!(check.supply_voltage(), 12.0, epsilon = 1e-9);
        assert!(check.base_voltage_error().abs() < 1e-9);
        assert!(check.supply_current() > 0.0);
        assert_eq!(check.named_voltages().len(), 3);
    }

    #[test]
    fn test_invalid_resistor_rejected() {
        assert!(CeTopology::default()
            .build_and_solve(10_000.0, 0.0, 4_700.0, 470.0, 12.0)
            .is_err());
    }
}
