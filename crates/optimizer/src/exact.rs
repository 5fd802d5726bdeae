use crate::SelectionStrategy;
use crate::bounds::SearchBounds;
use crate::error::{OptimizerError, overflow};
use catalog::Catalog;
use core_types::{Budget, Selection, Stock, StrategyId};
use rayon::prelude::*;
use rust_decimal::Decimal;

/// Finds the admissible subset with the highest total profit by enumerating
/// every non-empty subset.
///
/// Subsets are visited by ascending cardinality, then in lexicographic order
/// of catalog indices. A subset only replaces the current best when its profit
/// is strictly greater, so among equally profitable subsets the first one
/// visited wins. The empty selection (profit 0) is the starting point.
///
/// Three prunes keep catalogs of a few dozen stocks fast, and none of them
/// can change the winner:
/// - cardinalities whose cheapest possible subset is over budget are skipped;
/// - a prefix already over budget is not extended (prices are non-negative);
/// - a prefix is abandoned once neither its most profitable completions nor
///   the fractional knapsack over the budget it has left can beat the
///   current best.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactOptimizer {
    parallel: bool,
}

/// Best subset found so far, as catalog indices in ascending order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Incumbent {
    pub indices: Vec<usize>,
    pub profit: Decimal,
}

impl Incumbent {
    fn empty() -> Self {
        Self {
            indices: Vec::new(),
            profit: Decimal::ZERO,
        }
    }
}

impl ExactOptimizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spreads each cardinality over rayon tasks, one per first stock. The
    /// result is the same as the sequential search.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Runs the search and returns the winning indices without building a
    /// `Selection`.
    pub fn search(&self, stocks: &[Stock], budget: Budget) -> Result<Incumbent, OptimizerError> {
        let prices: Vec<Decimal> = stocks.iter().map(Stock::price).collect();
        let profits: Vec<Decimal> = stocks.iter().map(Stock::profit).collect();
        let bounds = SearchBounds::compute(&prices, &profits, budget.amount());

        tracing::debug!(
            stocks = stocks.len(),
            max_cardinality = bounds.max_cardinality,
            "Exact search bounds computed."
        );

        let space = SearchSpace {
            prices: &prices,
            profits: &profits,
            bounds: &bounds,
            budget: budget.amount(),
        };

        if self.parallel {
            search_parallel(space, bounds.max_cardinality)
        } else {
            search_sequential(space, bounds.max_cardinality)
        }
    }
}

impl SelectionStrategy for ExactOptimizer {
    fn id(&self) -> StrategyId {
        StrategyId::Exact
    }

    #[tracing::instrument(
        name = "exact_select",
        skip_all,
        fields(stocks = catalog.len(), budget = %budget.amount(), parallel = self.parallel)
    )]
    fn select<'a>(
        &self,
        catalog: &'a Catalog,
        budget: Budget,
    ) -> Result<Selection<'a>, OptimizerError> {
        let best = self.search(catalog.stocks(), budget)?;
        let selection = Selection::from_indices(catalog.stocks(), &best.indices, budget)?;

        tracing::info!(
            members = selection.len(),
            total_price = %selection.total_price(),
            total_profit = %selection.total_profit(),
            "Exact search complete."
        );
        Ok(selection)
    }
}

#[derive(Clone, Copy)]
struct SearchSpace<'s> {
    prices: &'s [Decimal],
    profits: &'s [Decimal],
    bounds: &'s SearchBounds,
    budget: Decimal,
}

fn search_sequential(space: SearchSpace<'_>, max_cardinality: usize) -> Result<Incumbent, OptimizerError> {
    // The best subset carries over from one cardinality to the next, which
    // both tightens the profit prune and keeps smaller subsets ahead on ties.
    let mut best = Incumbent::empty();
    for cardinality in 1..=max_cardinality {
        let (found, visited) = CardinalitySearch::new(space, cardinality, best).run()?;
        tracing::debug!(
            cardinality,
            visited,
            best_profit = %found.profit,
            "Cardinality searched."
        );
        best = found;
    }
    Ok(best)
}

fn search_parallel(space: SearchSpace<'_>, max_cardinality: usize) -> Result<Incumbent, OptimizerError> {
    // Cardinalities still run in order so each one starts from the best
    // subset so far; within one, every possible first stock is its own task.
    let mut best = Incumbent::empty();
    for cardinality in 1..=max_cardinality {
        let firsts = first_stocks(space, cardinality, &best);
        let per_first = firsts
            .into_par_iter()
            .map(|first| CardinalitySearch::new(space, cardinality, best.clone()).run_from(first))
            .collect::<Result<Vec<_>, _>>()?;

        // Reduce in ascending first index with the same strict comparison as
        // the sequential search, so ties resolve identically.
        let mut visited = 0;
        for (found, count) in per_first {
            visited += count;
            if found.profit > best.profit {
                best = found;
            }
        }
        tracing::debug!(
            cardinality,
            visited,
            best_profit = %best.profit,
            "Cardinality searched."
        );
    }
    Ok(best)
}

/// First stocks worth a task: the top level of `CardinalitySearch::descend`.
fn first_stocks(space: SearchSpace<'_>, cardinality: usize, best: &Incumbent) -> Vec<usize> {
    let last = space.prices.len() - cardinality;
    let mut firsts = Vec::new();
    for first in 0..=last {
        if space.prices[first] > space.budget {
            continue;
        }
        if space.bounds.cannot_exceed(
            space.prices,
            space.profits,
            first,
            space.budget,
            cardinality,
            best.profit,
        ) {
            break;
        }
        firsts.push(first);
    }
    firsts
}

/// Lexicographic depth-first enumeration of all subsets of one size.
struct CardinalitySearch<'s> {
    space: SearchSpace<'s>,
    cardinality: usize,
    chosen: Vec<usize>,
    best: Incumbent,
    visited: u64,
}

impl<'s> CardinalitySearch<'s> {
    fn new(space: SearchSpace<'s>, cardinality: usize, best: Incumbent) -> Self {
        Self {
            space,
            cardinality,
            chosen: Vec::with_capacity(cardinality),
            best,
            visited: 0,
        }
    }

    fn run(mut self) -> Result<(Incumbent, u64), OptimizerError> {
        self.descend(0, Decimal::ZERO, Decimal::ZERO)?;
        Ok((self.best, self.visited))
    }

    /// Only the subsets whose lowest index is `first`.
    fn run_from(mut self, first: usize) -> Result<(Incumbent, u64), OptimizerError> {
        self.chosen.push(first);
        let (price, profit) = (self.space.prices[first], self.space.profits[first]);
        self.descend(first + 1, price, profit)?;
        Ok((self.best, self.visited))
    }

    fn descend(&mut self, start: usize, price: Decimal, profit: Decimal) -> Result<(), OptimizerError> {
        let remaining = self.cardinality - self.chosen.len();
        if remaining == 0 {
            self.visited += 1;
            if profit > self.best.profit {
                self.best = Incumbent {
                    indices: self.chosen.clone(),
                    profit,
                };
            }
            return Ok(());
        }

        // Leave enough stocks after `i` to fill the remaining slots.
        let last = self.space.prices.len() - remaining;
        for i in start..=last {
            let next_price = price
                .checked_add(self.space.prices[i])
                .ok_or_else(|| overflow("subset total price"))?;
            if next_price > self.space.budget {
                continue;
            }

            // The bound from `i` only shrinks as `i` grows, so no later
            // branch can do better either.
            if let Some(needed) = self.best.profit.checked_sub(profit) {
                let capacity = self.space.budget - price;
                if self.space.bounds.cannot_exceed(
                    self.space.prices,
                    self.space.profits,
                    i,
                    capacity,
                    remaining,
                    needed,
                ) {
                    break;
                }
            }

            let next_profit = profit
                .checked_add(self.space.profits[i])
                .ok_or_else(|| overflow("subset total profit"))?;

            self.chosen.push(i);
            self.descend(i + 1, next_price, next_profit)?;
            self.chosen.pop();
        }
        Ok(())
    }
}
