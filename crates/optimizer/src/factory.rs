use crate::SelectionStrategy;
use crate::exact::ExactOptimizer;
use crate::greedy::GreedyOptimizer;
use configuration::RunSettings;
use core_types::StrategyId;

/// Creates the strategy named by the run settings.
pub fn create_strategy(settings: &RunSettings) -> Box<dyn SelectionStrategy> {
    // A full match: adding a `StrategyId` variant without handling it here is
    // a compile error.
    match settings.strategy {
        StrategyId::Exact => Box::new(ExactOptimizer::new().with_parallel(settings.parallel)),
        StrategyId::Greedy => Box::new(GreedyOptimizer::new(settings.greedy_key)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::Catalog;
    use core_types::{Budget, SelectionKey, Stock};
    use rust_decimal_macros::dec;

    #[test]
    fn builds_the_requested_strategy() {
        let mut settings = RunSettings::default();
        assert_eq!(create_strategy(&settings).id(), StrategyId::Exact);

        settings.strategy = StrategyId::Greedy;
        assert_eq!(create_strategy(&settings).id(), StrategyId::Greedy);
    }

    #[test]
    fn greedy_strategy_uses_the_configured_key() {
        let catalog = Catalog::from_stocks(vec![
            Stock::new("A", dec!(100), dec!(20)).unwrap(),
            Stock::new("B", dec!(300), dec!(10)).unwrap(),
            Stock::new("C", dec!(150), dec!(15)).unwrap(),
        ]);
        let settings = RunSettings {
            strategy: StrategyId::Greedy,
            greedy_key: SelectionKey::Profit,
            ..RunSettings::default()
        };

        let selection = create_strategy(&settings)
            .select(&catalog, Budget::new(dec!(500)).unwrap())
            .unwrap();
        assert_eq!(selection.indices(), &[1, 2]);
    }
}
