//! Design search followed by MNA verification, through the public API.

use approx::assert_relative_eq;
use ce_designer::amplifier::{operating_point, voltage_gain, Check, DesignConfig};
use ce_designer::circuit::{BranchId, CeTopology, NodeId};
use ce_designer::components::{BiasNetwork, DeviceParameters};
use ce_designer::netlist::netlist_string;
use ce_designer::solver::MnaSystem;
use ce_designer::{design_amplifier, DesignError, DesignSearch, DesignWarning};

#[test]
fn auto_gain_design_verifies() {
    let design = design_amplifier(0.1, 12.0, None).unwrap();

    assert!(design.iterations <= 1000);
    assert!((design.voltage_gain - 60.0).abs() <= 0.05);
    assert!(design.operating_point.collector_emitter_voltage > 0.3);

    // The accepted values reproduce the reported Q-point and gain.
    let op = operating_point(12.0, &design.network, &design.device);
    assert_eq!(op, design.operating_point);
    assert_eq!(
        voltage_gain(design.network.rc, design.network.re, op.collector_current),
        design.voltage_gain
    );

    let check = CeTopology::default().verify(&design).unwrap();
    assert_relative_eq!(check.supply_voltage(), 12.0, epsilon = 1e-9);
    assert_relative_eq!(check.base_voltage(), design.base_voltage(), epsilon = 1e-9);
    assert!(check.base_voltage() <= 6.0);
}

#[test]
fn clamped_target_reports_warning() {
    let design = design_amplifier(0.1, 12.0, Some(250.0)).unwrap();

    assert!(design
        .warnings
        .iter()
        .any(|w| matches!(w, DesignWarning::ClampedTarget { requested, .. } if *requested == 250.0)));
    assert!((design.voltage_gain - 60.0).abs() <= 0.05);
}

#[test]
fn explicit_target_at_limit_is_not_clamped() {
    let design = design_amplifier(0.1, 12.0, Some(60.0)).unwrap();
    assert!(!design.target_was_clamped());
}

#[test]
fn custom_device_still_active() {
    let device = DeviceParameters::new(200.0, 0.65, 0.2).unwrap();
    let search = DesignSearch::with_config(DesignConfig::new().with_device(device));
    let design = search.run(0.05, 12.0, Some(20.0)).unwrap();

    let op = &design.operating_point;
    assert!(op.collector_emitter_voltage > device.v_ce_sat + 0.1);
    assert!(op.collector_current > 0.0);
    assert_relative_eq!(op.base_current * 200.0, op.collector_current);
    assert!((design.voltage_gain - 20.0).abs() <= 0.05);
}

#[test]
fn infeasible_gain_fails_to_converge() {
    match design_amplifier(0.01, 12.0, None) {
        Err(DesignError::ConvergenceFailure { iterations, .. }) => assert_eq!(iterations, 1000),
        other => panic!("expected convergence failure, got {other:?}"),
    }
}

#[test]
fn reference_divider_node_voltages() {
    let v = CeTopology::default()
        .build_and_solve(10_000.0, 2_000.0, 4_700.0, 470.0, 12.0)
        .unwrap();
    assert_relative_eq!(v.node_voltages()[1], 12.0 * 2_000.0 / 12_000.0, epsilon = 1e-9);
    assert_eq!(v.as_slice().len(), 4);
}

#[test]
fn floating_node_is_singular() {
    let mut mna = MnaSystem::new(4, 1);
    mna.stamp_resistor(NodeId(1), NodeId(2), 10_000.0).unwrap();
    mna.stamp_resistor(NodeId(2), NodeId::GROUND, 2_000.0).unwrap();
    mna.stamp_resistor(NodeId(1), NodeId(3), 4_700.0).unwrap();
    mna.stamp_resistor(NodeId(3), NodeId::GROUND, 470.0).unwrap();
    mna.stamp_voltage_source(NodeId(1), NodeId::GROUND, 12.0, BranchId(0))
        .unwrap();

    assert!(matches!(mna.solve(), Err(DesignError::SingularMatrix)));
}

#[test]
fn isolated_pair_is_singular() {
    // Nodes 2 and 3 connect to each other but to nothing else.
    let mut mna = MnaSystem::new(3, 1);
    mna.stamp_resistor(NodeId(1), NodeId::GROUND, 1_000.0).unwrap();
    mna.stamp_resistor(NodeId(2), NodeId(3), 1_000.0).unwrap();
    mna.stamp_voltage_source(NodeId(1), NodeId::GROUND, 5.0, BranchId(0))
        .unwrap();

    assert!(matches!(mna.solve(), Err(DesignError::SingularMatrix)));
}

#[test]
fn netlist_matches_design() {
    let design = design_amplifier(0.5, 12.0, None).unwrap();
    let text = netlist_string(&design).unwrap();

    assert!(text.contains("VCC 1 0 DC 12\n"));
    assert!(text.contains(&format!("R2 2 0 {}", design.network.r2)));
    assert!(text.contains("Q1 3 2 4 NPN"));
    assert!(text.ends_with(".end\n"));
}

#[test]
fn convergence_error_names_last_check() {
    let search = DesignSearch::with_config(
        DesignConfig::new()
            .with_max_iterations(1)
            .with_initial(BiasNetwork::new(10_000.0, 1_000.0, 10_000.0, 1_000.0).unwrap()),
    );
    let err = search.run(0.1, 12.0, None).unwrap_err();
    assert!(matches!(
        err,
        DesignError::ConvergenceFailure {
            iterations: 1,
            last_check: Check::GainMatch,
        }
    ));
    assert!(err.to_string().contains("gain match"));
}

#[test]
fn auto_gain_records_step_refinement() {
    let design = design_amplifier(0.1, 12.0, None).unwrap();

    assert!(!design.target_was_clamped());
    assert!(design
        .warnings
        .iter()
        .any(|w| matches!(w, DesignWarning::StepRefined { scale, .. } if *scale < 1.0)));
}

#[test]
fn netlist_values_round_trip() {
    let design = design_amplifier(0.1, 12.0, None).unwrap();
    let text = netlist_string(&design).unwrap();

    let value_of = |card: &str| -> f64 {
        let line = text.lines().find(|l| l.starts_with(card)).unwrap();
        line.rsplit(' ').next().unwrap().parse().unwrap()
    };
    assert_eq!(value_of("RC 1 3 "), design.network.rc);
    assert_eq!(value_of("RE 4 0 "), design.network.re);
}

#[test]
fn gigaohm_network_verifies() {
    let v = CeTopology::default()
        .build_and_solve(1e18, 1e18, 1e18, 1e18, 12.0)
        .unwrap();
    assert_relative_eq!(v.node_voltages()[1], 6.0, max_relative = 1e-9);
}
