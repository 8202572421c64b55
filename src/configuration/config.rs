//! Configuration types for loading layout scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! layout scenario. A scenario consists of:
//!
//! - [`ParametersConfig`] – physical constants and frame limits (all optional)
//! - [`ViewportConfig`]   – viewport assumed before one is measured (optional)
//! - [`NodeConfig`]       – one record per node of the layout registry
//! - [`CompanionConfig`]  – decorative companions and their interests
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//!
//! ```yaml
//! core: n0                  # id of the central node
//! seed: 42                  # companion fallback selection
//!
//! parameters:               # every field optional, defaults shown
//!   k_anchor: 0.8
//!   min_dist: 350.0
//!   repulsion_gain: 8.0
//!   damping: 0.9
//!   padding: 100.0
//!   restitution: -0.5
//!   max_frame_ms: 50.0
//!
//! viewport:
//!   width: 1000.0
//!   height: 800.0
//!
//! nodes:
//!   - id: n0
//!     title: The Core Mind
//!     tags: [Curious, Builder]
//!     x: 50                 # percent of viewport width
//!     y: 50                 # percent of viewport height
//!     color: "#FAF9F6"
//!     type: philosophy      # project | philosophy | goal | experiment
//!
//! companions:
//!   - id: b1
//!     type: frontend        # frontend | backend | logic | debug | growth | collab
//!     label: The Interface Weaver
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::configuration::error::ConfigError;
use crate::simulation::companion::Interest;
use crate::simulation::registry::NodeKind;

/// Physical constants; anything omitted keeps its reference value
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ParametersConfig {
    pub k_anchor: f64,       // anchor spring stiffness
    pub min_dist: f64,       // repulsion cutoff (px)
    pub repulsion_gain: f64, // repulsion per px of overlap
    pub damping: f64,        // per-frame velocity multiplier, (0, 1]
    pub padding: f64,        // edge margin (px)
    pub restitution: f64,    // velocity factor on edge contact
    pub max_frame_ms: f64,   // frame delta cap
}

impl Default for ParametersConfig {
    fn default() -> Self {
        Self {
            k_anchor: 0.8,
            min_dist: 350.0,
            repulsion_gain: 8.0,
            damping: 0.9,
            padding: 100.0,
            restitution: -0.5,
            max_frame_ms: 50.0,
        }
    }
}

/// Viewport assumed until a real measurement is available
#[derive(Deserialize, Debug, Clone, Copy)]
pub struct ViewportConfig {
    pub width: f64,
    pub height: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 800.0,
        }
    }
}

/// One node of the layout
#[derive(Deserialize, Debug, Clone)]
pub struct NodeConfig {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub x: f64, // percent of viewport width
    pub y: f64, // percent of viewport height
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    #[serde(default)]
    pub project_link: Option<String>,
    #[serde(default)]
    pub github_link: Option<String>,
}

/// One decorative companion
#[derive(Deserialize, Debug, Clone)]
pub struct CompanionConfig {
    pub id: String,
    #[serde(rename = "type")]
    pub interest: Interest,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub personality: String,
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    pub core: String, // id of the central node
    #[serde(default = "default_seed")]
    pub seed: u64, // deterministic companion fallback
    #[serde(default)]
    pub parameters: ParametersConfig,
    #[serde(default)]
    pub viewport: ViewportConfig,
    pub nodes: Vec<NodeConfig>,
    #[serde(default)]
    pub companions: Vec<CompanionConfig>,
}

fn default_seed() -> u64 {
    42
}

fn default_color() -> String {
    "#FFFFFF".to_string()
}

impl ScenarioConfig {
    /// Parse and validate a scenario from YAML text
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        let cfg: ScenarioConfig = serde_yaml::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a scenario file
    pub fn from_yaml_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.nodes.is_empty() {
            return Err(ConfigError::Empty);
        }

        let mut seen = HashSet::new();
        for n in &self.nodes {
            if !seen.insert(n.id.as_str()) {
                return Err(ConfigError::DuplicateNode(n.id.clone()));
            }
            let in_range = |v: f64| (0.0..=100.0).contains(&v);
            if !in_range(n.x) || !in_range(n.y) {
                return Err(ConfigError::OutOfRange { id: n.id.clone(), x: n.x, y: n.y });
            }
        }

        if !seen.contains(self.core.as_str()) {
            return Err(ConfigError::MissingCore(self.core.clone()));
        }

        let p = &self.parameters;
        if !(p.damping > 0.0 && p.damping <= 1.0) {
            return Err(ConfigError::BadParameter { name: "damping", value: p.damping, reason: "must be in (0, 1]" });
        }
        if !(p.min_dist > 0.0) {
            return Err(ConfigError::BadParameter { name: "min_dist", value: p.min_dist, reason: "must be positive" });
        }
        if !(p.padding >= 0.0) {
            return Err(ConfigError::BadParameter { name: "padding", value: p.padding, reason: "must not be negative" });
        }
        if !(p.max_frame_ms > 0.0) {
            return Err(ConfigError::BadParameter { name: "max_frame_ms", value: p.max_frame_ms, reason: "must be positive" });
        }

        Ok(())
    }
}
