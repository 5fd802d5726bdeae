//! # Stock Selection Optimizer
//!
//! Chooses which stocks to buy under a budget so that the money received at
//! the end of the horizon is as large as possible (a 0/1 knapsack).
//!
//! ## Architectural Principles
//!
//! - **One interface, two strategies:** `ExactOptimizer` and `GreedyOptimizer`
//!   both implement `SelectionStrategy`, so callers pick one at runtime
//!   through `create_strategy` and treat the result uniformly.
//! - **Borrow, don't copy:** strategies read the `Catalog` and return a
//!   `Selection` that borrows from it. Nothing in the catalog is mutated, so
//!   one catalog can feed several strategies at once.
//! - **Admissible by construction:** every returned `Selection` went through
//!   `Selection::from_indices`, which refuses anything over budget.
//!
//! ## Public API
//!
//! - `run_exact` / `run_greedy`: one-call entry points taking a raw budget.
//! - `SelectionStrategy`: the trait both strategies implement.
//! - `create_strategy`: builds a strategy from `RunSettings`.

pub mod bounds;
pub mod error;
pub mod exact;
pub mod factory;
pub mod greedy;

pub use error::OptimizerError;
pub use exact::ExactOptimizer;
pub use factory::create_strategy;
pub use greedy::GreedyOptimizer;

use catalog::Catalog;
use core_types::{Budget, Selection, SelectionKey, StrategyId};
use rust_decimal::Decimal;

/// The capability shared by every search strategy: produce the best
/// admissible `Selection` it can for a catalog and budget.
///
/// The `Send + Sync` bounds let strategies run side by side on threads over
/// the same catalog.
pub trait SelectionStrategy: Send + Sync {
    /// Which strategy this is, for logging and reports.
    fn id(&self) -> StrategyId;

    /// Chooses stocks from `catalog` whose total price does not exceed `budget`.
    fn select<'a>(
        &self,
        catalog: &'a Catalog,
        budget: Budget,
    ) -> Result<Selection<'a>, OptimizerError>;
}

/// Runs the exact search. A negative budget is rejected before any work is done.
pub fn run_exact(catalog: &Catalog, budget: Decimal) -> Result<Selection<'_>, OptimizerError> {
    let budget = Budget::new(budget)?;
    ExactOptimizer::new().select(catalog, budget)
}

/// Runs the greedy fill with the given key. A negative budget is rejected
/// before any work is done.
pub fn run_greedy(
    catalog: &Catalog,
    budget: Decimal,
    key: SelectionKey,
) -> Result<Selection<'_>, OptimizerError> {
    let budget = Budget::new(budget)?;
    GreedyOptimizer::new(key).select(catalog, budget)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn negative_budget_is_rejected_up_front() {
        let catalog = Catalog::default();
        assert_eq!(
            run_exact(&catalog, dec!(-1)).unwrap_err(),
            OptimizerError::InvalidBudget(dec!(-1))
        );
        assert_eq!(
            run_greedy(&catalog, dec!(-0.01), SelectionKey::default()).unwrap_err(),
            OptimizerError::InvalidBudget(dec!(-0.01))
        );
    }
}
