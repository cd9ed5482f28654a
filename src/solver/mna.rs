//! MNA system assembly and solving.

use crate::circuit::{BranchId, NodeId, VarIndex};
use crate::error::{require_positive, DesignError, Result};

use super::lu::DenseLu;

/// MNA system Ax = z, assembled by stamping and solved once.
///
/// The matrix is pre-sized to `num_nodes + num_sources` and never resized.
/// [`MnaSystem::solve`] consumes the system, so every stamp has to happen
/// before the solve.
#[derive(Debug, Clone)]
pub struct MnaSystem {
    /// System matrix A (row-major)
    a: Vec<f64>,
    /// Source vector z
    z: Vec<f64>,
    /// Number of non-ground nodes (N)
    num_nodes: usize,
    /// Number of voltage sources (M)
    num_sources: usize,
    /// Which source branches have been stamped
    stamped: Vec<bool>,
}

impl MnaSystem {
    /// Create an empty system for `num_nodes` non-ground nodes and
    /// `num_sources` ideal voltage sources.
    pub fn new(num_nodes: usize, num_sources: usize) -> Self {
        let size = num_nodes + num_sources;
        Self {
            a: vec![0.0; size * size],
            z: vec![0.0; size],
            num_nodes,
            num_sources,
            stamped: vec![false; num_sources],
        }
    }

    /// Matrix dimension (N + M).
    pub fn size(&self) -> usize {
        self.num_nodes + self.num_sources
    }

    /// Number of non-ground nodes.
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// Number of voltage sources.
    pub fn num_sources(&self) -> usize {
        self.num_sources
    }

    /// Get matrix element at (row, col).
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.a[row * self.size() + col]
    }

    /// Get source vector element.
    pub fn source(&self, row: usize) -> f64 {
        self.z[row]
    }

    fn add(&mut self, row: usize, col: usize, value: f64) {
        let size = self.size();
        self.a[row * size + col] += value;
    }

    /// Map a node to its matrix row, `None` for ground.
    fn row_of(&self, node: NodeId) -> Result<Option<usize>> {
        if node.0 > self.num_nodes {
            return Err(DesignError::NodeOutOfRange {
                node,
                num_nodes: self.num_nodes,
            });
        }
        Ok(VarIndex::Voltage(node).to_index(self.num_nodes))
    }

    /// Stamp a resistor between two nodes.
    /// For a conductance G = 1/R between nodes n1 and n2:
    ///   A[n1,n1] += G
    ///   A[n2,n2] += G
    ///   A[n1,n2] -= G
    ///   A[n2,n1] -= G
    pub fn stamp_resistor(&mut self, n1: NodeId, n2: NodeId, resistance: f64) -> Result<()> {
        let resistance = require_positive("resistance", resistance)?;
        let i = self.row_of(n1)?;
        let j = self.row_of(n2)?;
        let g = 1.0 / resistance;

        if let Some(i) = i {
            self.add(i, i, g);
        }
        if let Some(j) = j {
            self.add(j, j, g);
        }
        if let (Some(i), Some(j)) = (i, j) {
            self.add(i, j, -g);
            self.add(j, i, -g);
        }
        Ok(())
    }

    /// Stamp an ideal voltage source between two nodes with its branch
    /// current at `branch`.
    /// V[n+] - V[n-] = E
    pub fn stamp_voltage_source(
        &mut self,
        n_pos: NodeId,
        n_neg: NodeId,
        voltage: f64,
        branch: BranchId,
    ) -> Result<()> {
        if branch.0 >= self.num_sources {
            return Err(DesignError::BranchOutOfRange {
                branch,
                num_sources: self.num_sources,
            });
        }
        if self.stamped[branch.0] {
            return Err(DesignError::DuplicateBranch { branch });
        }
        if !voltage.is_finite() {
            return Err(DesignError::invalid_parameter(
                "voltage",
                format!("expected a finite source voltage, got {voltage}"),
            ));
        }
        let i = self.row_of(n_pos)?;
        let j = self.row_of(n_neg)?;
        let br = self.num_nodes + branch.0;

        // KVL equation: V[n+] - V[n-] = E
        if let Some(i) = i {
            self.add(br, i, 1.0);
            self.add(i, br, 1.0);
        }
        if let Some(j) = j {
            self.add(br, j, -1.0);
            self.add(j, br, -1.0);
        }
        self.z[br] = voltage;
        self.stamped[branch.0] = true;
        Ok(())
    }

    /// Factor and solve the assembled system.
    pub fn solve(self) -> Result<NodeVoltages> {
        let size = self.size();
        tracing::debug!(
            nodes = self.num_nodes,
            sources = self.num_sources,
            "solving MNA system"
        );
        let lu = DenseLu::factor(&self.a, size)?;
        let x = lu.solve(&self.z);

        if x.iter().any(|v| !v.is_finite()) {
            return Err(DesignError::SingularMatrix);
        }

        Ok(NodeVoltages {
            x,
            num_nodes: self.num_nodes,
        })
    }
}

/// Solution of an [`MnaSystem`]: node voltages followed by source branch
/// currents.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeVoltages {
    x: Vec<f64>,
    num_nodes: usize,
}

impl NodeVoltages {
    /// Voltage at a node. Ground reads as 0 V, nodes outside the system as `None`.
    pub fn voltage(&self, node: NodeId) -> Option<f64> {
        if node.0 > self.num_nodes {
            return None;
        }
        Some(match VarIndex::Voltage(node).to_index(self.num_nodes) {
            Some(i) => self.x[i],
            None => 0.0,
        })
    }

    /// Current through a voltage source, flowing from n+ into the source.
    pub fn branch_current(&self, branch: BranchId) -> Option<f64> {
        VarIndex::Current(branch)
            .to_index(self.num_nodes)
            .and_then(|i| self.x.get(i).copied())
    }

    /// Node voltages only (node k at offset k-1).
    pub fn node_voltages(&self) -> &[f64] {
        &self.x[..self.num_nodes]
    }

    /// Source branch currents only.
    pub fn branch_currents(&self) -> &[f64] {
        &self.x[self.num_nodes..]
    }

    /// The full solution vector.
    pub fn as_slice(&self) -> &[f64] {
        &self.x
    }
}
