use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies which search strategy a run uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum StrategyId {
    /// Exhaustive enumeration of every non-empty subset.
    #[default]
    Exact,
    /// Sort-and-fill approximation.
    Greedy,
}

impl fmt::Display for StrategyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrategyId::Exact => write!(f, "exact"),
            StrategyId::Greedy => write!(f, "greedy"),
        }
    }
}

/// The per-stock scalar the greedy optimizer sorts by, highest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum SelectionKey {
    /// Money received at the end of the horizon (`price` plus return).
    Profit,
    /// Return rate in percent.
    #[default]
    PercentageBenefit,
    /// `price * percentage_benefit`, proportional to the absolute return.
    Weighted,
    /// `return_value * profit`.
    ReturnWeightedProfit,
}

impl fmt::Display for SelectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SelectionKey::Profit => "profit",
            SelectionKey::PercentageBenefit => "percentage_benefit",
            SelectionKey::Weighted => "weighted",
            SelectionKey::ReturnWeightedProfit => "return_weighted_profit",
        };
        f.write_str(name)
    }
}
