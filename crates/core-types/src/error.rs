use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Invalid input for {0}: {1}")]
    InvalidInput(String, String),

    #[error("Budget must not be negative, got {0}")]
    InvalidBudget(Decimal),

    #[error("Arithmetic overflow while computing {0}")]
    ArithmeticOverflow(String),

    #[error("Selection costs {total_price}, which exceeds the budget of {budget}")]
    BudgetExceeded { total_price: Decimal, budget: Decimal },

    #[error("Stock index {0} appears more than once in a selection")]
    DuplicateMember(usize),

    #[error("Stock index {index} is out of range for a catalog of {len} stocks")]
    IndexOutOfRange { index: usize, len: usize },
}
