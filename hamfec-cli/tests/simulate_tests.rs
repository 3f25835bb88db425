use std::fs;
use tempfile::tempdir;

use hamfec_cli::commands::simulate;
use hamfec_core::simulation::SweepConfig;

fn small_config() -> SweepConfig {
    SweepConfig {
        sequence_len: 80,
        trials: 4,
        steps: 5,
    }
}

#[test]
fn simulate_writes_json_sweep() {
    let td = tempdir().unwrap();
    let out_path = td.path().join("sweep.json");

    simulate::execute(
        small_config(),
        Some(42),
        Some(out_path.to_str().unwrap()),
        /*progress*/ false,
    )
    .unwrap();

    let json = fs::read_to_string(&out_path).unwrap();
    let v: serde_json::Value = serde_json::from_str(&json).unwrap();
    let points = v["points"].as_array().unwrap();
    assert_eq!(points.len(), 5);
    assert_eq!(points[0]["p_loss"].as_f64().unwrap(), 0.0);
    assert_eq!(points[0]["recovery_percent"].as_f64().unwrap(), 100.0);
    assert_eq!(points[4]["p_loss"].as_f64().unwrap(), 1.0);
    assert_eq!(v["seed"].as_u64().unwrap(), 42);
    assert_eq!(v["config"]["sequence_len"].as_u64().unwrap(), 80);
}

#[test]
fn simulate_same_seed_same_points() {
    let a = simulate::run(&small_config(), Some(9), false).unwrap();
    let b = simulate::run(&small_config(), Some(9), true).unwrap();
    assert_eq!(a, b);
}

#[test]
fn simulate_rejects_partial_blocks() {
    let config = SweepConfig {
        sequence_len: 10,
        ..small_config()
    };
    assert!(simulate::run(&config, Some(1), false).is_err());
}
