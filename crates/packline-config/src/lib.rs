use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Simple configuration for packline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Name stamped into audit entries as `performed_by`.
    #[serde(default = "default_operator")]
    pub operator: String,

    /// Units per pallet, used for the pallets-ready rollup.
    #[serde(default = "default_units_per_pallet")]
    pub units_per_pallet: usize,

    #[serde(default)]
    pub simulation: SimulationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    #[serde(default = "default_fill_probability")]
    pub fill_probability: f64,

    /// Fixed RNG seed for reproducible demo runs.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            operator: default_operator(),
            units_per_pallet: default_units_per_pallet(),
            simulation: SimulationConfig::default(),
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
            fill_probability: default_fill_probability(),
            seed: None,
        }
    }
}

fn default_operator() -> String {
    "operator".to_string()
}

fn default_units_per_pallet() -> usize {
    48
}

fn default_tick_interval_ms() -> u64 {
    3000
}

fn default_fill_probability() -> f64 {
    0.3
}

impl Config {
    /// Load config from default location or create default if not found
    pub fn load() -> anyhow::Result<Self> {
        let path = Self::config_path();

        if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            // Create default config file
            let config = Config::default();
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let content = toml::to_string_pretty(&config)?;
            std::fs::write(&path, content)?;
            Ok(config)
        }
    }

    /// Get config file path
    pub fn config_path() -> PathBuf {
        if let Some(dirs) = directories::ProjectDirs::from("com", "packline", "packline") {
            dirs.config_dir().join("config.toml")
        } else {
            PathBuf::from("~/.packline/config.toml")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.operator, "operator");
        assert_eq!(config.units_per_pallet, 48);
        assert_eq!(config.simulation.tick_interval_ms, 3000);
        assert!(config.simulation.seed.is_none());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.units_per_pallet, config.units_per_pallet);
        assert_eq!(
            parsed.simulation.fill_probability,
            config.simulation.fill_probability
        );
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let parsed: Config = toml::from_str("operator = \"alice\"").unwrap();
        assert_eq!(parsed.operator, "alice");
        assert_eq!(parsed.units_per_pallet, 48);
        assert_eq!(parsed.simulation.fill_probability, 0.3);
    }
}
