//! Derivation engine for splitting a restaurant-style bill.
//!
//! Given a bill amount, an optional tax figure (a pre-tax subtotal or
//! itemized tax lines) and a list of charges, the engine derives the
//! effective tax percentage and the total payable for the charges.

pub mod calculations;
pub mod engine;
pub mod format;
pub mod input;
pub mod models;
pub mod validation;

pub use calculations::recompute;
pub use engine::{BillSplitter, EngineError};
pub use models::*;
pub use validation::validate;
