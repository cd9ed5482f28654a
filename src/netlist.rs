//! SPICE netlist export of an accepted design.
//!
//! The netlist places the transistor explicitly, so unlike the resistive
//! verification map it gives the emitter its own node:
//!
//! ```text
//! * Auto-generated CE Amplifier
//! VCC 1 0 DC 12
//! R1 1 2 10000
//! R2 2 0 1050
//! RC 1 3 11876.6659182655
//! RE 4 0 1125.6497883521965
//! Q1 3 2 4 NPN
//! .model NPN NPN(IS=1e-14 BF=100 VAF=100)
//! .dc VCC 12 12 1
//! .end
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::amplifier::DesignResult;
use crate::error::{DesignError, Result};

/// Default output file name.
pub const DEFAULT_NETLIST_FILE: &str = "ce_amp.cir";

/// Write the design as a SPICE netlist.
pub fn write_netlist<W: Write>(design: &DesignResult, out: &mut W) -> Result<()> {
    let net = &design.network;
    let vcc = design.supply_voltage;

    writeln!(out, "* Auto-generated CE Amplifier")?;
    writeln!(out, "VCC 1 0 DC {}", fmt_value(vcc))?;
    writeln!(out, "R1 1 2 {}", fmt_value(net.r1))?;
    writeln!(out, "R2 2 0 {}", fmt_value(net.r2))?;
    writeln!(out, "RC 1 3 {}", fmt_value(net.rc))?;
    writeln!(out, "RE 4 0 {}", fmt_value(net.re))?;
    writeln!(out, "Q1 3 2 4 NPN")?;
    writeln!(
        out,
        ".model NPN NPN(IS=1e-14 BF={} VAF=100)",
        fmt_value(design.device.beta_f)
    )?;
    writeln!(out, ".dc VCC {0} {0} 1", fmt_value(vcc))?;
    writeln!(out, ".end")?;
    Ok(())
}

/// Render the netlist into a string.
pub fn netlist_string(design: &DesignResult) -> Result<String> {
    let mut buf = Vec::new();
    write_netlist(design, &mut buf)?;
    // Only ASCII is ever written.
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Write the netlist to a file.
pub fn write_netlist_file(design: &DesignResult, path: &Path) -> Result<()> {
    let to_error = |source| DesignError::FileWriteError {
        path: path.display().to_string(),
        source,
    };
    let file = File::create(path).map_err(to_error)?;
    let mut out = BufWriter::new(file);
    write_netlist(design, &mut out)?;
    out.flush().map_err(to_error)?;
    tracing::debug!(path = %path.display(), "netlist written");
    Ok(())
}

/// Shortest text that parses back to exactly `value`, so a simulator sees
/// the same resistor the search accepted.
fn fmt_value(value: f64) -> String {
    format!("{value}")
}
