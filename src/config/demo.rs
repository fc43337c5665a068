use nalgebra::{Matrix3x4, Matrix4};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::estimator::FusionParams;
use crate::projection::CameraCalibration;
use crate::types::{Correspondence, Frame};

/// Top-level configuration for the `ttc_demo` binary.
#[derive(Debug, Deserialize)]
pub struct TtcDemoConfig {
    /// Path to the scene JSON (calibration, frames, correspondences).
    pub scene: PathBuf,
    /// Pipeline parameters; omitted fields fall back to the defaults.
    #[serde(default)]
    pub params: FusionParams,
    pub output: DemoOutputConfig,
}

#[derive(Debug, Deserialize)]
pub struct DemoOutputConfig {
    #[serde(rename = "result_json")]
    pub result_json: PathBuf,
}

/// One frame pair as captured by the upstream pipeline.
#[derive(Debug, Deserialize)]
pub struct SceneConfig {
    pub calibration: CalibrationConfig,
    pub prev: Frame,
    pub curr: Frame,
    pub matches: Vec<Correspondence>,
}

/// Calibration triple given as row-major arrays.
#[derive(Debug, Deserialize)]
pub struct CalibrationConfig {
    pub intrinsic: [[f64; 4]; 3],
    pub rectification: [[f64; 4]; 4],
    pub extrinsic: [[f64; 4]; 4],
}

impl CalibrationConfig {
    pub fn to_calibration(&self) -> CameraCalibration {
        CameraCalibration {
            intrinsic: Matrix3x4::from_fn(|r, c| self.intrinsic[r][c]),
            rectification: Matrix4::from_fn(|r, c| self.rectification[r][c]),
            extrinsic: Matrix4::from_fn(|r, c| self.extrinsic[r][c]),
        }
    }
}

pub fn load_config(path: &Path) -> Result<TtcDemoConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

pub fn load_scene(path: &Path) -> Result<SceneConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read scene {}: {e}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse scene {}: {e}", path.display()))
}
