use core_types::CoreError;
use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum OptimizerError {
    #[error("Budget must not be negative, got {0}")]
    InvalidBudget(Decimal),

    #[error("Arithmetic overflow while computing {0}")]
    ArithmeticOverflow(String),

    #[error("Optimizer produced an invalid selection: {0}")]
    InvalidSelection(CoreError),
}

impl From<CoreError> for OptimizerError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::InvalidBudget(amount) => OptimizerError::InvalidBudget(amount),
            CoreError::ArithmeticOverflow(what) => OptimizerError::ArithmeticOverflow(what),
            other => OptimizerError::InvalidSelection(other),
        }
    }
}

pub(crate) fn overflow(what: &str) -> OptimizerError {
    OptimizerError::ArithmeticOverflow(what.to_string())
}
