//! Errors raised while loading a scenario.
//!
//! The simulation itself has no failure modes; everything fallible happens
//! before it starts, while reading and checking configuration.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// Scenario file could not be read.
    #[error("failed to read scenario file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Scenario text is not valid YAML for `ScenarioConfig`.
    #[error("invalid scenario yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("scenario has no nodes")]
    Empty,

    #[error("duplicate node id `{0}`")]
    DuplicateNode(String),

    #[error("node `{id}` position ({x}, {y}) lies outside [0, 100]")]
    OutOfRange { id: String, x: f64, y: f64 },

    #[error("core node `{0}` is not among the scenario nodes")]
    MissingCore(String),

    #[error("parameter `{name}` = {value} {reason}")]
    BadParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },
}
