use edgeconn_core::{ConnectConfig, GeometryConfig, DEFAULT_MAX_PASSES};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Contents of `edgeconn.toml`. Every field is optional in the file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EdgeConnConfig {
    /// Sweeps `add_edges` makes over a batch before giving up.
    pub max_passes: usize,

    pub geometry: GeometrySection,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeometrySection {
    /// Distance between neighbouring parallel edges at their midpoints.
    pub bundle_spacing: f64,

    /// Height of a loop's midpoint above its node.
    pub loop_height: f64,
}

impl Default for EdgeConnConfig {
    fn default() -> Self {
        Self {
            max_passes: DEFAULT_MAX_PASSES,
            geometry: GeometrySection::default(),
        }
    }
}

impl Default for GeometrySection {
    fn default() -> Self {
        let geometry = GeometryConfig::default();
        Self {
            bundle_spacing: geometry.bundle_spacing,
            loop_height: geometry.loop_height,
        }
    }
}

impl EdgeConnConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }

    /// Missing file means defaults; an unreadable one is reported and
    /// ignored.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Ignoring {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// All problems found, empty when valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if let Err(e) = self.connect_config().validate() {
            errors.push(e.to_string());
        }
        if !self.geometry.bundle_spacing.is_finite() || self.geometry.bundle_spacing < 0.0 {
            errors.push("geometry.bundle_spacing must be a finite number >= 0".into());
        }
        if !self.geometry.loop_height.is_finite() || self.geometry.loop_height < 0.0 {
            errors.push("geometry.loop_height must be a finite number >= 0".into());
        }
        errors
    }

    pub fn connect_config(&self) -> ConnectConfig {
        ConnectConfig::new().with_max_passes(self.max_passes)
    }

    pub fn geometry_config(&self) -> GeometryConfig {
        GeometryConfig {
            bundle_spacing: self.geometry.bundle_spacing,
            loop_height: self.geometry.loop_height,
        }
    }
}
