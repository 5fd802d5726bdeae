use crate::error::AnalyticsError;
use crate::report::{CURRENCY_DP, ReportLine, SelectionReport};
use core_types::Selection;
use rust_decimal::{Decimal, RoundingStrategy};

/// A stateless calculator that turns a `Selection` into reportable figures.
#[derive(Debug, Default)]
pub struct ReportEngine {}

impl ReportEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Derives totals and per-stock lines from a selection.
    ///
    /// The return is computed from the unrounded totals; rounding happens
    /// only as each figure is written into the report.
    pub fn calculate(&self, selection: &Selection<'_>) -> Result<SelectionReport, AnalyticsError> {
        let mut report = SelectionReport::new();

        if selection.is_empty() {
            return Ok(report);
        }

        report.lines = selection
            .members()
            .iter()
            .map(|stock| ReportLine {
                name: stock.name().to_string(),
                price: round_currency(stock.price()),
                percentage_benefit: stock.percentage_benefit(),
                profit: round_currency(stock.profit()),
            })
            .collect();

        let total_return = selection
            .total_profit()
            .checked_sub(selection.total_price())
            .ok_or_else(|| AnalyticsError::ArithmeticOverflow("total return".to_string()))?;

        report.total_price = round_currency(selection.total_price());
        report.total_profit = round_currency(selection.total_profit());
        report.total_return = round_currency(total_return);

        tracing::debug!(
            lines = report.lines.len(),
            total_return = %report.total_return,
            "Selection report calculated."
        );
        Ok(report)
    }
}

/// Shorthand for `ReportEngine::new().calculate(selection)`.
pub fn report(selection: &Selection<'_>) -> Result<SelectionReport, AnalyticsError> {
    ReportEngine::new().calculate(selection)
}

/// Rounds half away from zero, the usual convention for money.
pub fn round_currency(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(CURRENCY_DP, RoundingStrategy::MidpointAwayFromZero)
}
