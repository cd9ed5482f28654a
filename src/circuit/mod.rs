//! Circuit addressing and the fixed amplifier topology.
//!
//! Node and branch identifiers index into the MNA system; [`CeTopology`]
//! maps the amplifier's nets onto them for verification.

mod topology;
mod types;

pub use topology::{CeTopology, Verification};
pub use types::*;
