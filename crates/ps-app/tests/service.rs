//! Service layer against the simulated board.

use ps_app::{
    AppError, ServiceConfig, load_settings, run_fan_control, spawn_service,
    start_fan_control, start_fan_control_with, turn_off_fan,
};
use ps_config::Settings;
use ps_controls::{ControlError, FaultKind, LoopOptions, LoopState};
use ps_sim::SimulationEngine;
use std::path::PathBuf;

fn config_file(name: &str, contents: &str) -> PathBuf {
    let dir = std::env::temp_dir().join("ps_app_service_test");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn manual_configuration_drives_simulator() {
    let path = config_file(
        "manual.yaml",
        "mode:\n  autofan: 0\nfan_speeds:\n  25: 30\n  40: 100\n",
    );
    let mut engine = SimulationEngine::reference();
    let report =
        start_fan_control_with(&path, || Ok(&mut engine), LoopOptions::bounded(5)).unwrap();

    assert_eq!(report.state, LoopState::Stopped);
    assert_eq!(report.iterations, 5);
    assert_eq!(report.last_command.unwrap().value(), 0.3);
    assert_eq!(engine.state().fan_calls, 5);
}

#[test]
fn missing_configuration_runs_automatic() {
    let path = std::env::temp_dir().join("ps_app_service_missing.yaml");
    let _ = std::fs::remove_file(&path);
    assert_eq!(load_settings(&path), Settings::default());

    let mut engine = SimulationEngine::reference();
    let report =
        start_fan_control_with(&path, || Ok(&mut engine), LoopOptions::bounded(1)).unwrap();
    let expected = 20.0 / 70.0 + 0.1;
    assert!((report.last_command.unwrap().value() - expected).abs() < 1e-12);
}

#[test]
fn device_open_failure_is_propagated() {
    let path = std::env::temp_dir().join("ps_app_service_missing_2.yaml");
    let result = start_fan_control_with(
        &path,
        || Err::<SimulationEngine, _>(ControlError::actuator("no pwm chip")),
        LoopOptions::bounded(1),
    );
    match result {
        Err(AppError::Control(err)) => assert_eq!(err.kind(), FaultKind::Actuator),
        other => panic!("expected actuator error, got {other:?}"),
    }
}

#[test]
fn real_board_unavailable_in_tests() {
    let config = ServiceConfig {
        config_path: std::env::temp_dir().join("ps_app_no_config.yaml"),
        hardware: ps_app::HardwareConfig {
            thermal_path: "/nonexistent/temp".into(),
            pwm_chip: "/nonexistent/pwmchip0".into(),
            ..Default::default()
        },
        options: LoopOptions::bounded(1),
    };
    assert!(matches!(start_fan_control(&config), Err(AppError::Control(_))));
}

#[test]
fn background_worker_returns_report() {
    let handle = spawn_service(|| {
        let engine = SimulationEngine::reference();
        run_fan_control(engine, Settings::default(), LoopOptions::bounded(10))
    })
    .unwrap();
    assert_eq!(handle.thread_name(), Some("pistor-fan"));

    let report = handle.join().unwrap();
    assert_eq!(report.state, LoopState::Stopped);
    assert_eq!(report.iterations, 10);
}

#[test]
fn shutdown_parks_fan() {
    let mut engine = SimulationEngine::reference();
    engine.command_fan(0.7).unwrap();
    turn_off_fan(|| Ok(&mut engine)).unwrap();
    assert_eq!(engine.state().fan_speed, 0.0);

    let err = turn_off_fan(|| Err::<SimulationEngine, _>(ControlError::actuator("busy")));
    assert!(matches!(err, Err(AppError::Control(_))));
}

#[test]
fn shutdown_does_not_stop_a_running_loop() {
    // The loop keeps commanding after an independent "off" write.
    let mut engine = SimulationEngine::reference();
    turn_off_fan(|| Ok(&mut engine)).unwrap();
    let report =
        run_fan_control(&mut engine, Settings::default(), LoopOptions::bounded(1)).unwrap();
    assert!(report.last_command.unwrap().value() > 0.0);
    assert!(engine.state().fan_speed > 0.0);
}
