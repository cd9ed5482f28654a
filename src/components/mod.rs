//! Component models for the common-emitter stage.
//!
//! - [`DeviceParameters`] - simplified large-signal BJT description
//! - [`BiasNetwork`] - the R1/R2/RC/RE resistor set around the transistor

mod bjt;
mod network;

pub use bjt::DeviceParameters;
pub use network::BiasNetwork;
