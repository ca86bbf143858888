//! Driftwood Core - Shared types library.
//!
//! This crate provides the domain types used by the Driftwood storefront:
//! - `storefront` - Public-facing product pages and add-to-cart action
//! - `integration-tests` - HTTP-level tests against a mocked commerce API
//!
//! # Architecture
//!
//! The core crate contains only types and formatting - no I/O, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for opaque IDs, money and availability

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
