//! Configuration persistence for inkslot settings

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::domain::RasterSize;
use crate::render::geometry::{ink, resize, surface};

/// Serializable color representation for config storage
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InkColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Default for InkColor {
    fn default() -> Self {
        // Yellow (#facc15)
        Self {
            r: 0.98,
            g: 0.8,
            b: 0.082,
        }
    }
}

impl InkColor {
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

/// Deployment-level configuration; not exposed to the person drawing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PadConfig {
    /// Ink color for every surface
    #[serde(default)]
    pub ink_color: InkColor,
    /// Ink line width in pixels
    #[serde(default = "default_ink_width")]
    pub ink_width: f32,
    /// Size change (pixels, either axis) below which a resize is ignored
    #[serde(default = "default_resize_threshold")]
    pub resize_threshold: u32,
    /// Raster width used when a surface is mounted before layout is known
    #[serde(default = "default_surface_width")]
    pub surface_width: u32,
    /// Raster height used when a surface is mounted before layout is known
    #[serde(default = "default_surface_height")]
    pub surface_height: u32,
}

fn default_ink_width() -> f32 {
    ink::WIDTH
}

fn default_resize_threshold() -> u32 {
    resize::NOISE_THRESHOLD
}

fn default_surface_width() -> u32 {
    surface::DEFAULT_WIDTH
}

fn default_surface_height() -> u32 {
    surface::DEFAULT_HEIGHT
}

impl Default for PadConfig {
    fn default() -> Self {
        Self {
            ink_color: InkColor::default(),
            ink_width: default_ink_width(),
            resize_threshold: default_resize_threshold(),
            surface_width: default_surface_width(),
            surface_height: default_surface_height(),
        }
    }
}

impl PadConfig {
    /// Directory name under the platform config dir
    pub const ID: &'static str = "inkslot";

    /// Default location of the config file
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(Self::ID).join("config.json"))
    }

    /// Load configuration from disk, or return defaults if unavailable
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            log::warn!("No config directory available, using defaults");
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("Error loading config, using defaults: {:?}", err);
                Self::default()
            }
        }
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Save configuration to disk
    pub fn save(&self) {
        let Some(path) = Self::config_path() else {
            log::error!("No config directory available for saving");
            return;
        };
        if let Err(err) = self.save_to(&path) {
            log::error!("Failed to save config: {:?}", err);
        }
    }

    /// Save configuration to a specific file, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// Raster size for freshly mounted surfaces
    pub fn surface_size(&self) -> RasterSize {
        RasterSize::new(self.surface_width, self.surface_height).unwrap_or_else(|| {
            log::warn!(
                "Configured surface size {}x{} is empty, falling back to defaults",
                self.surface_width,
                self.surface_height
            );
            surface::default_size()
        })
    }
}
