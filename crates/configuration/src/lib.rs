use crate::error::ConfigError;
use config::{Environment, File, FileFormat};
use rust_decimal::Decimal;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{Config, RunSettings};

/// The file looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Prefix for environment overrides, e.g. `STOCK_PICKER__RUN__BUDGET=750`.
pub const ENV_PREFIX: &str = "STOCK_PICKER";

/// Loads the application configuration.
///
/// Sources are layered in this order, later ones winning:
/// 1. Built-in defaults (`RunSettings::default`).
/// 2. The TOML file at `path`, or `config.toml` if `path` is `None`. A missing
///    default file is not an error; a missing explicit file is.
/// 3. Environment variables prefixed with `STOCK_PICKER__`.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let file = match path {
        Some(p) => File::from(p).required(true),
        None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
    };

    let builder = config::Config::builder()
        .add_source(file)
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    finish(builder)
}

/// Parses configuration from an in-memory TOML document, without consulting
/// the environment.
pub fn load_config_from_str(toml: &str) -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(File::from_str(toml, FileFormat::Toml))
        .build()?;

    finish(builder)
}

fn finish(builder: config::Config) -> Result<Config, ConfigError> {
    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;

    tracing::debug!(
        budget = %config.run.budget,
        strategy = %config.run.strategy,
        greedy_key = %config.run.greedy_key,
        parallel = config.run.parallel,
        "Configuration loaded."
    );

    Ok(config)
}

impl Config {
    /// Rejects settings that would make every run fail.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.run.budget < Decimal::ZERO {
            return Err(ConfigError::ValidationError(format!(
                "run.budget must not be negative, got {}",
                self.run.budget
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::{SelectionKey, StrategyId};
    use rust_decimal_macros::dec;

    #[test]
    fn empty_document_yields_defaults() {
        let config = load_config_from_str("").unwrap();
        assert_eq!(config.run.budget, dec!(500));
        assert_eq!(config.run.strategy, StrategyId::Exact);
        assert_eq!(config.run.greedy_key, SelectionKey::PercentageBenefit);
        assert!(!config.run.parallel);
        assert!(config.run.dataset.is_none());
    }

    #[test]
    fn run_table_overrides_defaults() {
        let config = load_config_from_str(
            r#"
            [run]
            budget = "750.50"
            dataset = "data/dataset2.csv"
            strategy = "greedy"
            greedy_key = "weighted"
            parallel = true
            "#,
        )
        .unwrap();

        assert_eq!(config.run.budget, dec!(750.50));
        assert_eq!(config.run.strategy, StrategyId::Greedy);
        assert_eq!(config.run.greedy_key, SelectionKey::Weighted);
        assert!(config.run.parallel);
        assert_eq!(
            config.run.dataset.as_deref(),
            Some(Path::new("data/dataset2.csv"))
        );
    }

    #[test]
    fn integer_budget_is_accepted() {
        let config = load_config_from_str("[run]\nbudget = 1000\n").unwrap();
        assert_eq!(config.run.budget, dec!(1000));
    }

    #[test]
    fn negative_budget_fails_validation() {
        let err = load_config_from_str("[run]\nbudget = \"-5\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn unknown_strategy_is_a_load_error() {
        let err = load_config_from_str("[run]\nstrategy = \"dynamic\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::LoadError(_)));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = load_config(Some(Path::new("does/not/exist.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::LoadError(_)));
    }
}
