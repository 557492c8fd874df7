//! Configuration persistence for homes-canvas settings

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::domain::{CircleConvention, FitMode};

/// Serializable color representation for config storage
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapeColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Default for ShapeColor {
    fn default() -> Self {
        // Violet accent used by the canvas screens
        Self {
            r: 0.55,
            g: 0.36,
            b: 0.96,
        }
    }
}

impl ShapeColor {
    /// Convert to image crate RGBA format (0-255)
    pub fn to_rgba_u8(self) -> [u8; 4] {
        [
            (self.r.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.g.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.b.clamp(0.0, 1.0) * 255.0).round() as u8,
            255,
        ]
    }
}

/// What happens to the committed list when a new region is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SelectionPolicy {
    /// Only one region at a time; a new one replaces the list
    SingleRegion,
    /// Regions accumulate until reset
    #[default]
    MultiRegion,
}

/// Origin of the y-axis in the normalized wire coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AxisConvention {
    /// y grows downwards from the top edge (y / height)
    #[default]
    TopLeft,
    /// y grows upwards from the bottom edge (1 - y / height)
    BottomLeft,
}

/// Application configuration persisted between sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HomesCanvasConfig {
    /// Replace or append on each committed region
    pub selection_policy: SelectionPolicy,
    /// How a drag gesture maps to a circle
    pub circle_convention: CircleConvention,
    /// y-axis origin of normalized coordinates sent to the AI service
    pub axis: AxisConvention,
    /// How the photo is laid out inside its on-screen box
    pub fit_mode: FitMode,
    /// Drags shorter than this many display pixels are treated as taps
    pub min_drag_distance: f32,
    /// Stroke color for regions
    pub region_color: ShapeColor,
    /// Whether to draw a dark border under region strokes
    pub region_shadow: bool,
    /// Region stroke thickness in intrinsic image pixels
    pub stroke_thickness: f32,
    /// Whether the snapshot sent to the service has the circles drawn in
    pub composite_overlay: bool,
    /// AI rendering endpoint
    pub endpoint: String,
    /// Request timeout in seconds
    pub request_timeout_secs: u64,
}

impl Default for HomesCanvasConfig {
    fn default() -> Self {
        Self {
            selection_policy: SelectionPolicy::MultiRegion,
            circle_convention: CircleConvention::Diameter,
            axis: AxisConvention::TopLeft,
            fit_mode: FitMode::Stretch,
            min_drag_distance: 10.0,
            region_color: ShapeColor::default(),
            region_shadow: true,
            stroke_thickness: 4.0,
            composite_overlay: true,
            endpoint: "http://localhost:3001/api/ai-interior".to_string(),
            request_timeout_secs: 60,
        }
    }
}

impl HomesCanvasConfig {
    /// Directory name under the platform config dir
    pub const ID: &'static str = "homes-canvas";

    /// Default location of the config file
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(Self::ID).join("config.json"))
    }

    /// Load configuration from disk, or return defaults if unavailable
    pub fn load() -> Self {
        match Self::path() {
            Some(path) => Self::load_or_default(&path),
            None => {
                log::warn!("No config directory available, using defaults");
                Self::default()
            }
        }
    }

    /// Load from a specific file, falling back to defaults on any error
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::load_from(path) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("Error loading config, using defaults: {:?}", err);
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        Ok(config)
    }

    /// Save configuration to disk
    pub fn save(&self) {
        let Some(path) = Self::path() else {
            log::error!("No config directory available for saving");
            return;
        };
        if let Err(err) = self.save_to(&path) {
            log::error!("Failed to save config: {:?}", err);
        }
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let text = serde_json::to_string_pretty(self)?;
        std::fs::write(path, text)
            .with_context(|| format!("Failed to write config {}", path.display()))?;
        Ok(())
    }

    /// Request timeout as a Duration
    pub fn request_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.request_timeout_secs.max(1))
    }
}
