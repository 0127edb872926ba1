use std::path::Path;

use anyhow::Result;
use figment::{providers::{Env, Format, Toml}, Figment};
use serde::Deserialize;

use crate::balancer::OrderingStrategy;
use crate::domain::{CircuitSpec, Panel};

/// Config file used when `PHASE_BALANCER_CONFIG` is unset
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";
pub const CONFIG_PATH_ENV: &str = "PHASE_BALANCER_CONFIG";
pub const ENV_PREFIX: &str = "PHASE_BALANCER__";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub balancer: BalancerConfig,
    #[serde(default)]
    pub output: OutputConfig,
    pub panel: PanelConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub filter: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { filter: "info".to_string(), json: false }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct BalancerConfig {
    /// Strategies to evaluate, in tie-breaking order
    pub strategies: Vec<OrderingStrategy>,
    /// Seed for the randomized strategy; OS entropy when absent
    pub random_seed: Option<u64>,
}

impl Default for BalancerConfig {
    fn default() -> Self {
        Self {
            strategies: OrderingStrategy::ALL.to_vec(),
            random_seed: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PanelConfig {
    pub name: String,
    #[serde(default)]
    pub circuits: Vec<CircuitSpec>,
}

impl PanelConfig {
    pub fn build(&self) -> Result<Panel> {
        Ok(Panel::from_specs(self.name.clone(), &self.circuits)?)
    }
}

impl Config {
    /// Load from the file named by `PHASE_BALANCER_CONFIG` (or the default path),
    /// overridden by `PHASE_BALANCER__*` environment variables
    pub fn load() -> Result<Self> {
        let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from(path)
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let figment = Figment::new()
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));
        Ok(figment.extract()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_load_with_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "panel.toml",
                r#"
                [panel]
                name = "QD2"

                [[panel.circuits]]
                name = "Oven"
                load_w = 4000
                phases = 2
                "#,
            )?;

            let cfg = Config::load_from("panel.toml").map_err(|e| e.to_string())?;
            assert_eq!(cfg.panel.name, "QD2");
            assert_eq!(cfg.panel.circuits, vec![CircuitSpec::new("Oven", 4000, 2)]);
            assert_eq!(cfg.balancer.strategies, OrderingStrategy::ALL.to_vec());
            assert_eq!(cfg.balancer.random_seed, None);
            assert_eq!(cfg.output.format, OutputFormat::Table);
            assert_eq!(cfg.logging.filter, "info");
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "panel.toml",
                r#"
                [balancer]
                strategies = ["descending", "as_given"]

                [panel]
                name = "QD3"
                "#,
            )?;
            jail.set_env("PHASE_BALANCER__BALANCER__RANDOM_SEED", "7");
            jail.set_env("PHASE_BALANCER__OUTPUT__FORMAT", "json");

            let cfg = Config::load_from("panel.toml").map_err(|e| e.to_string())?;
            assert_eq!(
                cfg.balancer.strategies,
                vec![OrderingStrategy::Descending, OrderingStrategy::AsGiven]
            );
            assert_eq!(cfg.balancer.random_seed, Some(7));
            assert_eq!(cfg.output.format, OutputFormat::Json);
            assert!(cfg.panel.circuits.is_empty());
            Ok(())
        });
    }

    #[test]
    fn test_invalid_circuit_fails_build() {
        let panel = PanelConfig {
            name: "QD1".to_string(),
            circuits: vec![CircuitSpec::new("Heater", -100, 1)],
        };
        let err = panel.build().unwrap_err();
        assert!(err.to_string().contains("Heater"));
    }
}
