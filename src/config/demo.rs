use crate::engine::HeatmapParams;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration of the `heatmap_demo` binary.
#[derive(Clone, Debug, Deserialize)]
pub struct DemoConfig {
    pub input: PathBuf,
    #[serde(default)]
    pub params: HeatmapParams,
    #[serde(default)]
    pub scorer: DemoScorerConfig,
    #[serde(default)]
    pub scale: DemoScaleConfig,
    pub output: DemoOutputConfig,
}

/// Luminance-drift scorer used by the demo.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct DemoScorerConfig {
    /// Score multiplier on the absolute change of mean luminance (0..1 units).
    pub gain: f32,
    /// Zoom into windows scoring strictly above this value.
    pub zoom_threshold: f32,
}

impl Default for DemoScorerConfig {
    fn default() -> Self {
        Self {
            gain: 20.0,
            zoom_threshold: 0.5,
        }
    }
}

/// Two-stop scale endpoints; the demo interpolates the 256-entry table.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct DemoScaleConfig {
    pub low: [u8; 4],
    pub high: [u8; 4],
}

impl Default for DemoScaleConfig {
    fn default() -> Self {
        Self {
            low: [0, 0, 255, 0],
            high: [255, 0, 0, 160],
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct DemoOutputConfig {
    pub report_json: PathBuf,
}

pub fn load_config(path: &Path) -> Result<DemoConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    let config: DemoConfig = serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))?;
    config
        .params
        .validate()
        .map_err(|e| format!("Invalid params in {}: {e}", path.display()))?;
    Ok(config)
}
