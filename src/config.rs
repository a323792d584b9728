//! `traceprof.toml` config loading.

use serde::{Deserialize, Serialize};

use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Default duration threshold (milliseconds) for `--task-tree` pruning.
    #[serde(default = "default_task_tree_threshold_ms")]
    pub task_tree_threshold_ms: u64,

    /// Default scale of the HTML time axis, in pixels per second.
    #[serde(default = "default_html_pixels_per_second")]
    pub html_pixels_per_second: u32,
}

fn default_task_tree_threshold_ms() -> u64 {
    50
}

fn default_html_pixels_per_second() -> u32 {
    50
}

impl Default for Config {
    fn default() -> Self {
        Self {
            task_tree_threshold_ms: default_task_tree_threshold_ms(),
            html_pixels_per_second: default_html_pixels_per_second(),
        }
    }
}

impl Config {
    pub fn load_optional(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(s) => match toml::from_str::<Config>(&s) {
                Ok(cfg) => cfg,
                Err(err) => {
                    tracing::warn!("failed to parse config {}: {err}", path.display());
                    Self::default()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(err) => {
                tracing::warn!("failed to read config {}: {err}", path.display());
                Self::default()
            }
        }
    }
}
