//! sigpad configuration file handling

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sigpad_raster::{CanvasSize, RenderConfig};
use std::fs;
use std::path::Path;

pub const CONFIG_FILE: &str = "sigpad.toml";

/// Top-level sigpad configuration (sigpad.toml)
#[derive(Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct SigpadConfig {
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Output sizing for stroke renders
#[derive(Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct OutputConfig {
    /// Target width; the canvas width when unset
    #[serde(default)]
    pub width: Option<u32>,
    /// Target height; the canvas height when unset
    #[serde(default)]
    pub height: Option<u32>,
}

impl OutputConfig {
    /// Requested output size, falling back to the canvas for unset sides
    pub fn target_size(&self, render: &RenderConfig) -> CanvasSize {
        CanvasSize::new(
            self.width.unwrap_or(render.canvas_width),
            self.height.unwrap_or(render.canvas_height),
        )
    }
}

impl SigpadConfig {
    /// Load configuration from a file or a directory containing sigpad.toml
    pub fn load(path: &Path) -> Result<Self> {
        let config_path = if path.is_dir() {
            path.join(CONFIG_FILE)
        } else {
            path.to_path_buf()
        };

        if !config_path.exists() {
            anyhow::bail!(
                "No {} found at {}. Run `sigpad init` to create one.",
                CONFIG_FILE,
                path.display()
            );
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))
    }

    /// Load `sigpad.toml` from the working directory if present, else defaults
    pub fn load_or_default(dir: &Path) -> Result<Self> {
        if dir.join(CONFIG_FILE).exists() {
            Self::load(dir)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: SigpadConfig = toml::from_str(content)?;
        config.render.validate()?;
        Ok(config)
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }
}
