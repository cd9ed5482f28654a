//! ce-design - common-emitter amplifier designer
//!
//! Searches for bias resistors that give the requested gain, prints the
//! design and its Q-point, re-solves the network with MNA and writes a
//! SPICE netlist.
//!
//! # Usage
//!
//! ```bash
//! ce-design --vin 100m --vcc 12            # as much gain as 12 V allows
//! ce-design --vin 50m --vcc 9 --gain 20 --netlist stage1.cir
//! RUST_LOG=ce_designer=trace ce-design --vin 100mV   # log every failed check
//! ```

use std::path::PathBuf;

use clap::Parser;
use ce_designer::{
    amplifier::DesignConfig,
    circuit::CeTopology,
    components::DeviceParameters,
    error::Result,
    netlist::{write_netlist_file, DEFAULT_NETLIST_FILE},
    units::parse_arg,
    DesignResult, DesignSearch,
};

/// Common-emitter amplifier designer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input peak voltage (V)
    #[arg(long, value_parser = parse_arg)]
    vin: f64,

    /// Supply voltage (V)
    #[arg(long, default_value = "12", value_parser = parse_arg)]
    vcc: f64,

    /// Desired voltage gain, 0 for the maximum the supply allows
    #[arg(short, long, default_value = "0", value_parser = parse_arg)]
    gain: f64,

    /// Transistor forward current gain
    #[arg(long, default_value = "100", value_parser = parse_arg)]
    beta: f64,

    /// Base-emitter turn-on voltage (V)
    #[arg(long, default_value = "0.7", value_parser = parse_arg)]
    vbe: f64,

    /// Collector-emitter saturation voltage (V)
    #[arg(long, default_value = "0.2", value_parser = parse_arg)]
    vce_sat: f64,

    /// Search iteration budget
    #[arg(long, default_value_t = ce_designer::amplifier::config::DEFAULT_MAX_ITERATIONS)]
    max_iterations: usize,

    /// Netlist output path
    #[arg(long, value_name = "PATH", default_value = DEFAULT_NETLIST_FILE)]
    netlist: PathBuf,

    /// Skip writing the netlist
    #[arg(long)]
    no_netlist: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let device = DeviceParameters::new(args.beta, args.vbe, args.vce_sat)?;
    let config = DesignConfig::new()
        .with_device(device)
        .with_max_iterations(args.max_iterations);
    let target = (args.gain > 0.0).then_some(args.gain);

    let design = DesignSearch::with_config(config).run(args.vin, args.vcc, target)?;
    for warning in &design.warnings {
        eprintln!("Warning: {warning}");
    }
    print_design(&design);

    let check = CeTopology::default().verify(&design)?;
    println!("\n--- Node Voltages ---");
    for (name, v) in check.named_voltages() {
        println!("{name}: {v:.3} V");
    }
    println!("Supply current: {:.3} mA", check.supply_current() * 1e3);

    if !args.no_netlist {
        write_netlist_file(&design, &args.netlist)?;
        println!("\nNetlist written to {}", args.netlist.display());
    }

    Ok(())
}

fn print_design(design: &DesignResult) {
    let net = &design.network;
    let op = &design.operating_point;

    println!("--- Designed CE Amplifier ---");
    println!("R1: {:.2} ohm", net.r1);
    println!("R2: {:.2} ohm", net.r2);
    println!("RC: {:.2} ohm", net.rc);
    println!("RE: {:.2} ohm", net.re);
    println!("Av: {:.3} (target {:.3})", design.voltage_gain, design.target_gain);
    println!("Iterations: {}", design.iterations);

    println!("\n--- Q-point ---");
    println!("IB:  {:.3} uA", op.base_current * 1e6);
    println!("IC:  {:.3} mA", op.collector_current * 1e3);
    println!("IE:  {:.3} mA", op.emitter_current * 1e3);
    println!("VC:  {:.3} V", op.collector_voltage);
    println!("VE:  {:.3} V", op.emitter_voltage);
    println!("VCE: {:.3} V", op.collector_emitter_voltage);
}
