use crate::error::CoreError;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashSet;

/// A single investable instrument.
///
/// `profit` and `return_value` are derived from `price` and
/// `percentage_benefit` when the stock is built. The fields are private so
/// the derived values can never drift from their inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stock {
    name: String,
    price: Decimal,
    percentage_benefit: Decimal,
    profit: Decimal,
    return_value: Decimal,
}

impl Stock {
    /// Builds a stock and computes its derived fields.
    ///
    /// # Errors
    ///
    /// * `CoreError::InvalidInput` - if the name is blank or the price is negative.
    /// * `CoreError::ArithmeticOverflow` - if the profit does not fit in a `Decimal`.
    pub fn new(
        name: impl Into<String>,
        price: Decimal,
        percentage_benefit: Decimal,
    ) -> Result<Self, CoreError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CoreError::InvalidInput(
                "name".to_string(),
                "stock name must not be empty".to_string(),
            ));
        }
        if price < Decimal::ZERO {
            return Err(CoreError::InvalidInput(
                "price".to_string(),
                format!("price of '{}' must not be negative, got {}", name, price),
            ));
        }

        let overflow = || CoreError::ArithmeticOverflow(format!("profit of '{}'", name));
        let return_value = percentage_benefit
            .checked_div(Decimal::ONE_HUNDRED)
            .and_then(|rate| price.checked_mul(rate))
            .ok_or_else(overflow)?;
        let profit = price.checked_add(return_value).ok_or_else(overflow)?;

        Ok(Self {
            name,
            price,
            percentage_benefit,
            profit,
            return_value,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn percentage_benefit(&self) -> Decimal {
        self.percentage_benefit
    }

    /// Money received at the end of the horizon: `price + price * percentage_benefit / 100`.
    pub fn profit(&self) -> Decimal {
        self.profit
    }

    /// The gain on top of the invested price: `profit - price`.
    pub fn return_value(&self) -> Decimal {
        self.return_value
    }
}

/// The amount of money available for one optimization run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Budget(Decimal);

impl Budget {
    /// Rejects negative amounts. Zero is a valid budget.
    pub fn new(amount: Decimal) -> Result<Self, CoreError> {
        if amount < Decimal::ZERO {
            return Err(CoreError::InvalidBudget(amount));
        }
        Ok(Self(amount))
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }

    /// Admission is inclusive: a total equal to the budget is allowed.
    pub fn admits(&self, total_price: Decimal) -> bool {
        total_price <= self.0
    }
}

/// A subset of a catalog's stocks whose total price fits the budget it was
/// built against.
///
/// Members borrow from the catalog. A `Selection` can only be built through
/// [`Selection::from_indices`], which rejects duplicates and over-budget
/// subsets, so every value of this type that exists is admissible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selection<'a> {
    #[serde(skip)]
    indices: Vec<usize>,
    members: Vec<&'a Stock>,
    total_price: Decimal,
    total_profit: Decimal,
}

impl<'a> Selection<'a> {
    /// The empty selection. Always admissible, with zero totals.
    pub fn empty() -> Self {
        Self {
            indices: Vec::new(),
            members: Vec::new(),
            total_price: Decimal::ZERO,
            total_profit: Decimal::ZERO,
        }
    }

    /// Builds a selection from catalog indices, keeping the given order.
    pub fn from_indices(
        stocks: &'a [Stock],
        indices: &[usize],
        budget: Budget,
    ) -> Result<Self, CoreError> {
        let mut seen = HashSet::with_capacity(indices.len());
        let mut members = Vec::with_capacity(indices.len());
        let mut total_price = Decimal::ZERO;
        let mut total_profit = Decimal::ZERO;

        for &index in indices {
            let stock = stocks.get(index).ok_or(CoreError::IndexOutOfRange {
                index,
                len: stocks.len(),
            })?;
            if !seen.insert(index) {
                return Err(CoreError::DuplicateMember(index));
            }
            total_price = total_price
                .checked_add(stock.price())
                .ok_or_else(|| CoreError::ArithmeticOverflow("selection total price".to_string()))?;
            total_profit = total_profit
                .checked_add(stock.profit())
                .ok_or_else(|| CoreError::ArithmeticOverflow("selection total profit".to_string()))?;
            members.push(stock);
        }

        if !budget.admits(total_price) {
            return Err(CoreError::BudgetExceeded {
                total_price,
                budget: budget.amount(),
            });
        }

        Ok(Self {
            indices: indices.to_vec(),
            members,
            total_price,
            total_profit,
        })
    }

    /// Catalog positions of the members, in selection order.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn members(&self) -> &[&'a Stock] {
        &self.members
    }

    pub fn total_price(&self) -> Decimal {
        self.total_price
    }

    pub fn total_profit(&self) -> Decimal {
        self.total_profit
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.indices.contains(&index)
    }
}

impl Default for Selection<'_> {
    fn default() -> Self {
        Self::empty()
    }
}
