use itertools::Itertools;
use rust_decimal::Decimal;
use std::cmp::Reverse;

/// Pre-computed limits that let the exact search skip work without changing
/// its answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBounds {
    /// The largest subset size that can still fit the budget: the sum of the
    /// `max_cardinality` cheapest prices is within budget, one more is not.
    pub max_cardinality: usize,
    /// Stocks with a positive profit, highest profit per unit of price first.
    /// Free stocks come before everything else.
    by_ratio: Vec<usize>,
    /// Stocks with a positive profit, most profitable first.
    by_profit: Vec<usize>,
}

impl SearchBounds {
    /// The cardinality bound saturates instead of failing: real overflow is
    /// caught on the candidate totals.
    pub fn compute(prices: &[Decimal], profits: &[Decimal], budget: Decimal) -> Self {
        let mut max_cardinality = 0;
        let mut cheapest = Decimal::ZERO;
        for price in prices.iter().copied().sorted() {
            cheapest = cheapest.saturating_add(price);
            if cheapest > budget {
                break;
            }
            max_cardinality += 1;
        }

        let gaining = (0..profits.len()).filter(|&i| profits[i] > Decimal::ZERO);
        let by_ratio = gaining
            .clone()
            .sorted_by_cached_key(|&i| {
                let ratio = if prices[i].is_zero() {
                    Decimal::MAX
                } else {
                    profits[i].checked_div(prices[i]).unwrap_or(Decimal::MAX)
                };
                Reverse(ratio)
            })
            .collect();
        let by_profit = gaining.sorted_by_key(|&i| Reverse(profits[i])).collect();

        Self {
            max_cardinality,
            by_ratio,
            by_profit,
        }
    }

    /// Whether no completion drawn from stocks `start..`, using at most
    /// `slots` stocks and at most `capacity` of budget, can earn more than
    /// `needed`.
    ///
    /// Two relaxations are tried: the `slots` most profitable stocks ignoring
    /// price, and the fractional knapsack over the remaining budget. Both only
    /// shrink as `start` grows. The fractional comparison is cross-multiplied
    /// so no division is involved. Any overflow answers `false`.
    pub fn cannot_exceed(
        &self,
        prices: &[Decimal],
        profits: &[Decimal],
        start: usize,
        capacity: Decimal,
        slots: usize,
        needed: Decimal,
    ) -> bool {
        if needed < Decimal::ZERO {
            return false;
        }

        let mut top = Decimal::ZERO;
        for &i in self.by_profit.iter().filter(|&&i| i >= start).take(slots) {
            match top.checked_add(profits[i]) {
                Some(sum) => top = sum,
                None => return false,
            }
        }
        if top <= needed {
            return true;
        }

        let mut gained = Decimal::ZERO;
        let mut left = capacity;
        for &i in self.by_ratio.iter().filter(|&&i| i >= start) {
            if prices[i] <= left {
                gained = match gained.checked_add(profits[i]) {
                    Some(sum) => sum,
                    None => return false,
                };
                left -= prices[i];
                if gained > needed {
                    return false;
                }
                continue;
            }
            // Only part of stock `i` fits: its share is left * profit / price.
            return match (left.checked_mul(profits[i]), (needed - gained).checked_mul(prices[i])) {
                (Some(share), Some(room)) => share <= room,
                _ => false,
            };
        }
        gained <= needed
    }
}
