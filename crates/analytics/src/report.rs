use core_types::StrategyId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Number of decimal places currency figures are rounded to in a report.
pub const CURRENCY_DP: u32 = 2;

/// The figures handed to the presentation layer for one selection.
///
/// Every money amount is already rounded to `CURRENCY_DP` places; rates are
/// left as given. Totals are
/// rounded once from full-precision sums, never summed from rounded lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionReport {
    pub strategy: Option<StrategyId>,
    pub lines: Vec<ReportLine>,
    pub total_price: Decimal,
    pub total_profit: Decimal,
    /// `total_profit - total_price`: what the selection earns on top of its cost.
    pub total_return: Decimal,
}

/// One chosen stock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportLine {
    pub name: String,
    pub price: Decimal,
    /// A rate, not an amount, so it is not rounded.
    pub percentage_benefit: Decimal,
    pub profit: Decimal,
}

impl SelectionReport {
    /// Creates a new, zeroed-out report with no lines.
    pub fn new() -> Self {
        Self {
            strategy: None,
            lines: Vec::new(),
            total_price: Decimal::ZERO,
            total_profit: Decimal::ZERO,
            total_return: Decimal::ZERO,
        }
    }

    pub fn with_strategy(mut self, strategy: StrategyId) -> Self {
        self.strategy = Some(strategy);
        self
    }
}

impl Default for SelectionReport {
    fn default() -> Self {
        Self::new()
    }
}
