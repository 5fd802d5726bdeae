//! # Core Types
//!
//! Layer 0 of the workspace. Every other crate speaks in terms of the types
//! defined here: the `Stock` being priced, the `Budget` a run is bound by, and
//! the `Selection` an optimizer hands back.
//!
//! This crate performs no I/O and holds no state.

pub mod enums;
pub mod error;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::{SelectionKey, StrategyId};
pub use error::CoreError;
pub use structs::{Budget, Selection, Stock};
