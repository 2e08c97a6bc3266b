use serde::{Deserialize, Serialize};

/// Caller-supplied layout geometry; every field falls back to the default
/// when absent from a deserialized config.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutConfig {
    pub node_width: f64,
    pub node_height: f64,
    pub horizontal_spacing: f64,
    pub vertical_spacing: f64,
    pub padding: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_width: 200.0,
            node_height: 80.0,
            horizontal_spacing: 100.0,
            vertical_spacing: 60.0,
            padding: 50.0,
        }
    }
}
