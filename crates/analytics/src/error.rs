use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyticsError {
    #[error("Arithmetic overflow while computing {0}")]
    ArithmeticOverflow(String),
}
