//! Calculation modules for the bill splitter.
//!
//! This module provides the derivation of the effective tax percentage and
//! the payable total, plus the decimal helpers they share.

pub mod common;
pub mod derivation;

pub use derivation::recompute;
