use core_types::{SelectionKey, StrategyId};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub run: RunSettings,
}

/// Contains parameters for a single optimization run.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RunSettings {
    /// The total amount of money that may be invested.
    pub budget: Decimal,
    /// The CSV file holding the candidate stocks (one header row).
    pub dataset: Option<PathBuf>,
    /// Which search strategy to run.
    pub strategy: StrategyId,
    /// The key the greedy optimizer sorts by. Ignored by the exact optimizer.
    pub greedy_key: SelectionKey,
    /// Spread the exact search across threads, one cardinality per task.
    pub parallel: bool,
}

// --- Default Implementations ---
// This allows a user to omit the `[run]` section (or any of its keys) from
// their toml and still have it work with sensible defaults.

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            budget: dec!(500),
            dataset: None,
            strategy: StrategyId::default(),
            greedy_key: SelectionKey::default(),
            parallel: false,
        }
    }
}
