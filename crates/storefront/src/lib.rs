//! Driftwood Storefront library.
//!
//! Server-rendered product pages backed by the Saleor GraphQL API. The
//! binary in `main.rs` wires this library to Sentry and a TCP listener;
//! integration tests drive [`routes::app`] directly.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod description;
pub mod error;
pub mod filters;
pub mod gallery;
pub mod metadata;
pub mod middleware;
pub mod product;
pub mod routes;
pub mod saleor;
pub mod state;
