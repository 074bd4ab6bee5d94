//! Rebound configuration file handling

use anyhow::{Context, Result};
use rebound_core::Rect;
use rebound_drag::{DragMode, SpringControls};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const CONFIG_FILE: &str = "rebound.toml";

/// Top-level configuration (rebound.toml)
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ReboundConfig {
    #[serde(default)]
    pub spring: SpringControls,
    #[serde(default)]
    pub drag: DragConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
}

/// How the element is dragged
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct DragConfig {
    #[serde(default)]
    pub mode: DragMode,
    /// Show the pointer marker and velocity readout
    #[serde(default)]
    pub debug: bool,
}

/// Headless simulation settings
#[derive(Debug, Deserialize, Serialize)]
pub struct SimulationConfig {
    #[serde(default = "default_fps")]
    pub fps: u32,
    /// Give up on a spring that hasn't settled after this long
    #[serde(default = "default_max_seconds")]
    pub max_seconds: f32,
    #[serde(default = "default_element")]
    pub element: ElementConfig,
}

fn default_fps() -> u32 {
    120
}

fn default_max_seconds() -> f32 {
    5.0
}

fn default_element() -> ElementConfig {
    ElementConfig {
        x: 100.0,
        y: 200.0,
        width: 120.0,
        height: 120.0,
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            fps: default_fps(),
            max_seconds: default_max_seconds(),
            element: default_element(),
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct ElementConfig {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl ElementConfig {
    pub fn frame(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

impl ReboundConfig {
    /// Load configuration from a file, or from rebound.toml inside a directory
    pub fn load(path: &Path) -> Result<Self> {
        let config_path = if path.is_dir() {
            path.join(CONFIG_FILE)
        } else {
            path.to_path_buf()
        };

        if !config_path.exists() {
            anyhow::bail!(
                "No {} found at {}. Run `rebound init` to create one.",
                CONFIG_FILE,
                config_path.display()
            );
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        let config: ReboundConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;

        config
            .validate()
            .with_context(|| format!("Invalid configuration in {}", config_path.display()))?;

        Ok(config)
    }

    /// Check values the simulation can't run with
    pub fn validate(&self) -> Result<()> {
        self.spring.validated()?;

        if self.simulation.fps == 0 {
            anyhow::bail!("simulation.fps must be greater than 0");
        }
        if !(self.simulation.max_seconds > 0.0) {
            anyhow::bail!(
                "simulation.max_seconds must be greater than 0, got {}",
                self.simulation.max_seconds
            );
        }
        let element = &self.simulation.element;
        if element.width <= 0.0 || element.height <= 0.0 {
            anyhow::bail!(
                "simulation.element must have a positive size, got {}x{}",
                element.width,
                element.height
            );
        }

        Ok(())
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }
}
