//! Node and branch identifiers shared by the verification map and the MNA
//! builder.

use std::fmt;

/// Net number as it appears in the netlist (`1` = supply, `2` = base, ...).
///
/// `NodeId(0)` is the reference net and has no unknown of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    /// Reference net, 0 V by definition.
    pub const GROUND: NodeId = NodeId(0);

    /// Whether this is the reference net.
    pub fn is_ground(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_ground() {
            write!(f, "GND")
        } else {
            write!(f, "N{}", self.0)
        }
    }
}

/// Slot of an ideal source's current. Sources are numbered from 0 in the
/// order the caller reserves them in [`MnaSystem::new`](crate::solver::MnaSystem::new).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BranchId(pub usize);

impl fmt::Display for BranchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "I{}", self.0)
    }
}

/// One unknown of the MNA solution: a net voltage or a source current.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VarIndex {
    /// Voltage of a non-reference net
    Voltage(NodeId),
    /// Current drawn through an ideal source
    Current(BranchId),
}

impl VarIndex {
    /// Row of this unknown in a system with `num_nodes` non-reference nets.
    ///
    /// Net `k` sits at row `k - 1`; source `b` follows all nets at
    /// `num_nodes + b`. The reference net has no row.
    pub fn to_index(&self, num_nodes: usize) -> Option<usize> {
        match self {
            VarIndex::Voltage(node) if node.is_ground() => None,
            VarIndex::Voltage(NodeId(n)) => Some(n - 1),
            VarIndex::Current(BranchId(b)) => Some(num_nodes + b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_var_index_layout() {
        assert_eq!(VarIndex::Voltage(NodeId::GROUND).to_index(3), None);
        assert_eq!(VarIndex::Voltage(NodeId(1)).to_index(3), Some(0));
        assert_eq!(VarIndex::Voltage(NodeId(3)).to_index(3), Some(2));
        assert_eq!(VarIndex::Current(BranchId(0)).to_index(3), Some(3));
    }

    #[test]
    fn test_display() {
        assert_eq!(NodeId::GROUND.to_string(), "GND");
        assert_eq!(NodeId(2).to_string(), "N2");
        assert_eq!(BranchId(1).to_string(), "I1");
    }
}
