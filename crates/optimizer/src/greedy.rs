use crate::SelectionStrategy;
use crate::error::{OptimizerError, overflow};
use catalog::Catalog;
use core_types::{Budget, Selection, SelectionKey, Stock, StrategyId};
use rust_decimal::Decimal;

/// Builds one admissible selection by walking the catalog from the highest
/// key to the lowest and admitting each stock that still fits.
///
/// This is an approximation. It never backtracks, so it can miss the optimum
/// that `ExactOptimizer` finds; it is never better than it.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyOptimizer {
    key: SelectionKey,
}

impl GreedyOptimizer {
    pub fn new(key: SelectionKey) -> Self {
        Self { key }
    }

    pub fn key(&self) -> SelectionKey {
        self.key
    }

    /// Catalog indices ordered by descending key. Equal keys keep catalog order.
    pub fn rank(&self, stocks: &[Stock]) -> Result<Vec<usize>, OptimizerError> {
        let mut keyed = stocks
            .iter()
            .enumerate()
            .map(|(index, stock)| Ok((index, score(self.key, stock)?)))
            .collect::<Result<Vec<(usize, Decimal)>, OptimizerError>>()?;

        // `sort_by` is stable, which is what breaks ties by catalog order.
        keyed.sort_by(|a, b| b.1.cmp(&a.1));
        Ok(keyed.into_iter().map(|(index, _)| index).collect())
    }
}

/// The greedy key of a single stock.
pub fn score(key: SelectionKey, stock: &Stock) -> Result<Decimal, OptimizerError> {
    match key {
        SelectionKey::Profit => Ok(stock.profit()),
        SelectionKey::PercentageBenefit => Ok(stock.percentage_benefit()),
        SelectionKey::Weighted => stock
            .price()
            .checked_mul(stock.percentage_benefit())
            .ok_or_else(|| overflow("weighted greedy key")),
        SelectionKey::ReturnWeightedProfit => stock
            .return_value()
            .checked_mul(stock.profit())
            .ok_or_else(|| overflow("return-weighted greedy key")),
    }
}

impl SelectionStrategy for GreedyOptimizer {
    fn id(&self) -> StrategyId {
        StrategyId::Greedy
    }

    #[tracing::instrument(
        name = "greedy_select",
        skip_all,
        fields(stocks = catalog.len(), budget = %budget.amount(), key = %self.key)
    )]
    fn select<'a>(
        &self,
        catalog: &'a Catalog,
        budget: Budget,
    ) -> Result<Selection<'a>, OptimizerError> {
        let stocks = catalog.stocks();
        let mut chosen = Vec::new();
        let mut total_price = Decimal::ZERO;

        for index in self.rank(stocks)? {
            let price = stocks[index].price();
            // Free stocks add nothing and are left out.
            if price <= Decimal::ZERO {
                continue;
            }
            let next_total = total_price
                .checked_add(price)
                .ok_or_else(|| overflow("greedy total price"))?;
            // Keep going after a miss: a cheaper stock further down may still fit.
            if budget.admits(next_total) {
                chosen.push(index);
                total_price = next_total;
            }
        }

        let selection = Selection::from_indices(stocks, &chosen, budget)?;
        tracing::info!(
            members = selection.len(),
            total_price = %selection.total_price(),
            total_profit = %selection.total_profit(),
            "Greedy fill complete."
        );
        Ok(selection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn catalog(rows: &[(&str, Decimal, Decimal)]) -> Catalog {
        Catalog::from_stocks(
            rows.iter()
                .map(|(name, price, benefit)| Stock::new(*name, *price, *benefit).unwrap())
                .collect(),
        )
    }

    fn budget(amount: Decimal) -> Budget {
        Budget::new(amount).unwrap()
    }

    fn scenario() -> Catalog {
        catalog(&[
            ("A", dec!(100), dec!(20)),
            ("B", dec!(300), dec!(10)),
            ("C", dec!(150), dec!(15)),
        ])
    }

    #[test]
    fn fills_by_percentage_benefit_by_default() {
        let catalog = scenario();
        let selection = GreedyOptimizer::default().select(&catalog, budget(dec!(500))).unwrap();

        // A (20%) then C (15%); B would bring the total to 550.
        assert_eq!(selection.indices(), &[0, 2]);
        assert_eq!(selection.total_price(), dec!(250));
        assert_eq!(selection.total_profit(), dec!(292.50));
    }

    #[test]
    fn profit_key_can_reach_a_different_selection() {
        let catalog = scenario();
        let selection = GreedyOptimizer::new(SelectionKey::Profit)
            .select(&catalog, budget(dec!(500)))
            .unwrap();

        // B (330) then C (172.50); A would bring the total to 550.
        assert_eq!(selection.indices(), &[1, 2]);
        assert_eq!(selection.total_profit(), dec!(502.50));
    }

    #[test]
    fn skips_a_stock_that_does_not_fit_and_keeps_going() {
        let catalog = catalog(&[
            ("Top", dec!(400), dec!(30)),
            ("Too-big", dec!(200), dec!(25)),
            ("Filler", dec!(100), dec!(5)),
        ]);
        let selection = GreedyOptimizer::default().select(&catalog, budget(dec!(500))).unwrap();
        assert_eq!(selection.indices(), &[0, 2]);
        assert_eq!(selection.total_price(), dec!(500));
    }

    #[test]
    fn ties_keep_catalog_order() {
        let catalog = catalog(&[
            ("First", dec!(300), dec!(10)),
            ("Second", dec!(300), dec!(10)),
        ]);
        let optimizer = GreedyOptimizer::default();
        assert_eq!(optimizer.rank(catalog.stocks()).unwrap(), vec![0, 1]);

        let selection = optimizer.select(&catalog, budget(dec!(500))).unwrap();
        assert_eq!(selection.members()[0].name(), "First");
        assert_eq!(selection.len(), 1);
    }

    #[test]
    fn free_stocks_are_never_admitted() {
        let catalog = catalog(&[("Free", dec!(0), dec!(90)), ("Paid", dec!(10), dec!(1))]);
        let selection = GreedyOptimizer::default().select(&catalog, budget(dec!(100))).unwrap();
        assert_eq!(selection.indices(), &[1]);

        let selection = GreedyOptimizer::default().select(&catalog, budget(Decimal::ZERO)).unwrap();
        assert!(selection.is_empty());
    }

    #[test]
    fn empty_catalog_and_unaffordable_stock_give_empty_selection() {
        let empty = Catalog::default();
        assert!(GreedyOptimizer::default().select(&empty, budget(dec!(500))).unwrap().is_empty());

        let pricey = catalog(&[("Pricey", dec!(501), dec!(50))]);
        assert!(GreedyOptimizer::default().select(&pricey, budget(dec!(500))).unwrap().is_empty());
    }

    #[test]
    fn scores_follow_the_key() {
        let stock = Stock::new("S", dec!(200), dec!(10)).unwrap();
        assert_eq!(score(SelectionKey::Profit, &stock).unwrap(), dec!(220));
        assert_eq!(score(SelectionKey::PercentageBenefit, &stock).unwrap(), dec!(10));
        assert_eq!(score(SelectionKey::Weighted, &stock).unwrap(), dec!(2000));
        assert_eq!(score(SelectionKey::ReturnWeightedProfit, &stock).unwrap(), dec!(4400));
    }

    #[test]
    fn weighted_key_prefers_large_absolute_returns() {
        let catalog = catalog(&[
            ("Small-high", dec!(10), dec!(50)),
            ("Large-low", dec!(400), dec!(10)),
        ]);
        let ranked = GreedyOptimizer::new(SelectionKey::Weighted)
            .rank(catalog.stocks())
            .unwrap();
        assert_eq!(ranked, vec![1, 0]);
    }
}
