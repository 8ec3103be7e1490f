use std::path::Path;

use accessroute_core::prelude::*;
use hashbrown::HashMap;
use log::debug;
use serde::Deserialize;

pub(crate) const DEFAULT_ANALYSIS_MAX_RESULTS: usize = 3;
pub(crate) const DEFAULT_MAX_ALTERNATIVES: usize = 3;

/// Engine configuration, usually read from a TOML document:
///
/// ```toml
/// analysis_max_results = 5
///
/// [graph]
/// nodes_path = "data/nodes.csv"
/// edges_path = "data/edges.csv"
///
/// [profiles.wheelchair]
/// alpha = 6.0
/// beta = 30.0
/// gamma = 8.0
/// delta = 4.0
/// reduced_mobility = true
/// ```
///
/// With no `[profiles]` table the `standard` and `reduced_mobility`
/// presets are available.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    pub graph: GraphConfig,
    #[serde(default)]
    pub profiles: HashMap<String, CostProfile>,
    /// Ranking size used by `edges_to_fix` when the caller gives none
    #[serde(default = "default_analysis_max_results")]
    pub analysis_max_results: usize,
    /// Upper bound on the number of alternatives per request
    #[serde(default = "default_max_alternatives")]
    pub max_alternatives: usize,
}

fn default_analysis_max_results() -> usize {
    DEFAULT_ANALYSIS_MAX_RESULTS
}

fn default_max_alternatives() -> usize {
    DEFAULT_MAX_ALTERNATIVES
}

impl EngineConfig {
    pub fn new(graph: GraphConfig) -> Self {
        Self {
            graph,
            profiles: HashMap::new(),
            analysis_max_results: DEFAULT_ANALYSIS_MAX_RESULTS,
            max_alternatives: DEFAULT_MAX_ALTERNATIVES,
        }
    }

    /// Parse and validate a TOML document
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidData`] for syntax errors, missing fields
    /// or profiles with invalid weights
    pub fn from_toml_str(text: &str) -> Result<Self, Error> {
        let config: Self = toml::from_str(text)
            .map_err(|e| Error::InvalidData(format!("invalid engine config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Read a TOML file. Relative graph paths are resolved against the
    /// directory holding the file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IoError`] if the file cannot be read, otherwise
    /// as [`EngineConfig::from_toml_str`]
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml_str(&text)?;

        if let Some(base) = path.parent() {
            for input in [&mut config.graph.nodes_path, &mut config.graph.edges_path] {
                if input.is_relative() {
                    *input = base.join(&*input);
                }
            }
        }
        debug!(
            "Engine config from {}: nodes {}, edges {}, {} custom profiles",
            path.display(),
            config.graph.nodes_path.display(),
            config.graph.edges_path.display(),
            config.profiles.len()
        );
        Ok(config)
    }

    fn validate(&self) -> Result<(), Error> {
        for (name, profile) in &self.profiles {
            profile
                .validate()
                .map_err(|e| Error::InvalidData(format!("profile '{name}': {e}")))?;
        }
        if self.max_alternatives == 0 {
            return Err(Error::InvalidData(
                "max_alternatives must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Configured profiles, or the built-in presets when none are given
    pub(crate) fn resolved_profiles(&self) -> HashMap<String, CostProfile> {
        if self.profiles.is_empty() {
            preset_profiles()
        } else {
            self.profiles.clone()
        }
    }
}

pub(crate) fn preset_profiles() -> HashMap<String, CostProfile> {
    HashMap::from([
        (CostProfile::STANDARD.to_string(), CostProfile::standard()),
        (
            CostProfile::REDUCED_MOBILITY.to_string(),
            CostProfile::reduced_mobility(),
        ),
    ])
}
