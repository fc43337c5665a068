use std::env;
use std::fs;
use std::path::Path;

use ttc_fusion::config::demo as cfg;
use ttc_fusion::TtcEstimator;

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = cfg::load_config(Path::new(&config_path))?;
    let scene = cfg::load_scene(&config.scene)?;

    let estimator = TtcEstimator::new(config.params.clone(), &scene.calibration.to_calibration());
    let report = estimator.process(&scene.prev, &scene.curr, &scene.matches);

    println!(
        "matched {} of {} previous regions",
        report.matching.matched, report.matching.prev_regions
    );
    for estimate in &report.estimates {
        println!(
            "region {} -> {}: range TTC {:.3} s, camera TTC {:.3} s ({} correspondences, {}/{} range points)",
            estimate.prev_id,
            estimate.curr_id,
            estimate.range_ttc,
            estimate.camera_ttc,
            estimate.matches_used,
            estimate.prev_range_points,
            estimate.curr_range_points,
        );
    }

    let json = serde_json::to_string_pretty(&report)
        .map_err(|e| format!("Failed to serialise report: {e}"))?;
    fs::write(&config.output.result_json, json)
        .map_err(|e| format!("Failed to write {}: {e}", config.output.result_json.display()))?;
    println!("Wrote report JSON to {}", config.output.result_json.display());

    Ok(())
}

fn usage() -> String {
    "Usage: ttc_demo <config.json>".to_string()
}
