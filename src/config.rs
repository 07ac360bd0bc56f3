//! Service configuration. JSON file first, then a handful of env overrides.

use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// HTTP listener
    pub server: ServerConfig,
    /// Model snapshot location (read at startup if present)
    pub model_path: PathBuf,
    /// Write a snapshot after training when none was loaded
    pub persist_model: bool,
    /// Synthetic training corpus
    pub dataset: DatasetConfig,
    /// Tree ensemble hyperparameters
    pub forest: ForestConfig,
    /// Logging
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// Total generated samples (70% normal, 30% anomalous)
    pub n_samples: usize,
    /// Share of shuffled samples held out for evaluation
    pub test_fraction: f64,
    pub seed: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForestConfig {
    pub n_trees: usize,
    pub max_depth: usize,
    /// A node with fewer samples than this becomes a leaf
    pub min_samples_split: usize,
    pub seed: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub json: bool,
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("dataset.n_samples must be at least 2, got {0}")]
    TooFewSamples(usize),
    #[error("dataset.test_fraction must be in (0, 1), got {0}")]
    TestFraction(f64),
    #[error("forest.n_trees must be at least 1")]
    NoTrees,
    #[error("forest.max_depth must be at least 1")]
    ZeroDepth,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            model_path: PathBuf::from("models/anomaly_model.json"),
            persist_model: true,
            dataset: DatasetConfig::default(),
            forest: ForestConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)),
            port: 8000,
        }
    }
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            n_samples: 1000,
            test_fraction: 0.2,
            seed: 42,
        }
    }
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_trees: 100,
            max_depth: 10,
            min_samples_split: 2,
            seed: 42,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: true,
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl ServiceConfig {
    /// Load from JSON file if present; otherwise return default. Env overrides apply either way.
    pub fn load(path: &Path) -> Self {
        let mut config = std::fs::read_to_string(path)
            .ok()
            .and_then(|data| serde_json::from_str::<ServiceConfig>(&data).ok())
            .unwrap_or_default();
        config.apply_env_overrides(|key| std::env::var(key).ok());
        config
    }

    /// `PORT`, `HOST` and `LIFEPATTERN_MODEL_PATH`; unparseable values are ignored.
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(port) = lookup("PORT").and_then(|v| v.trim().parse::<u16>().ok()) {
            self.server.port = port;
        }
        if let Some(host) = lookup("HOST").and_then(|v| v.trim().parse::<IpAddr>().ok()) {
            self.server.host = host;
        }
        if let Some(path) = lookup("LIFEPATTERN_MODEL_PATH").filter(|v| !v.trim().is_empty()) {
            self.model_path = PathBuf::from(path);
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dataset.n_samples < 2 {
            return Err(ConfigError::TooFewSamples(self.dataset.n_samples));
        }
        let tf = self.dataset.test_fraction;
        if !(tf > 0.0 && tf < 1.0) {
            return Err(ConfigError::TestFraction(tf));
        }
        if self.forest.n_trees == 0 {
            return Err(ConfigError::NoTrees);
        }
        if self.forest.max_depth == 0 {
            return Err(ConfigError::ZeroDepth);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn env_overrides_port_and_model_path() {
        let env: HashMap<&str, &str> = [("PORT", "9100"), ("LIFEPATTERN_MODEL_PATH", "/tmp/m.json")]
            .into_iter()
            .collect();
        let mut c = ServiceConfig::default();
        c.apply_env_overrides(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(c.server.port, 9100);
        assert_eq!(c.model_path, PathBuf::from("/tmp/m.json"));
    }

    #[test]
    fn bad_port_is_ignored() {
        let mut c = ServiceConfig::default();
        c.apply_env_overrides(|k| (k == "PORT").then(|| "not-a-port".to_string()));
        assert_eq!(c.server.port, 8000);
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let c: ServiceConfig = serde_json::from_str(r#"{"forest":{"n_trees":7}}"#).unwrap();
        assert_eq!(c.forest.n_trees, 7);
        assert_eq!(c.forest.max_depth, 10);
        assert_eq!(c.dataset.n_samples, 1000);
    }

    #[test]
    fn validate_rejects_degenerate_settings() {
        let mut c = ServiceConfig::default();
        assert!(c.validate().is_ok());
        c.dataset.test_fraction = 1.0;
        assert_eq!(c.validate(), Err(ConfigError::TestFraction(1.0)));
        c.dataset.test_fraction = 0.2;
        c.forest.n_trees = 0;
        assert_eq!(c.validate(), Err(ConfigError::NoTrees));
    }
}
