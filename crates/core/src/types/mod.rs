//! Core types for Driftwood.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod availability;
pub mod id;
pub mod price;

pub use availability::Availability;
pub use id::*;
pub use price::{Money, MoneyError, MoneyRange, format_money, format_money_range};
