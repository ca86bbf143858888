//! Saleor commerce API client.
//!
//! # Architecture
//!
//! - Hand-declared `graphql_client::GraphQLQuery` operations, sent with `reqwest`
//! - Saleor is the source of truth - NO local sync, direct API calls
//! - In-memory caching via `moka` for product reads (`SALEOR_REVALIDATE_SECS`)
//! - Checkout operations are never cached
//!
//! # Example
//!
//! ```rust,ignore
//! use driftwood_storefront::saleor::SaleorClient;
//!
//! let client = SaleorClient::new(&config.saleor);
//!
//! // Get a product in a channel
//! let product = client.product_details("apple-juice", "default-channel").await?;
//!
//! // Reuse or start a checkout, then add a variant
//! let checkout = client.find_or_create_checkout(None, "default-channel").await?;
//! let checkout = client.checkout_add_line(&checkout.id, &variant_id).await?;
//! ```

mod api;
pub mod types;

pub use api::SaleorClient;
pub use types::*;

use thiserror::Error;

/// Errors that can occur when interacting with the Saleor API.
#[derive(Debug, Error)]
pub enum SaleorError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// GraphQL query returned errors.
    #[error("GraphQL errors: {}", format_graphql_errors(.0))]
    GraphQL(Vec<GraphQLError>),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Rate limited by Saleor.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Validation error returned by a mutation (e.g., variant not in channel).
    #[error("User error: {0}")]
    UserError(String),

    /// A value in the response could not be mapped to a domain type.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl SaleorError {
    /// Build a single-message GraphQL error.
    pub(crate) fn message(message: impl Into<String>) -> Self {
        Self::GraphQL(vec![GraphQLError {
            message: message.into(),
            locations: vec![],
            path: vec![],
        }])
    }
}

/// A GraphQL error returned by the Saleor API.
#[derive(Debug, Clone)]
pub struct GraphQLError {
    /// Error message.
    pub message: String,
    /// Source locations in the query.
    pub locations: Vec<GraphQLErrorLocation>,
    /// Path to the error in the response.
    pub path: Vec<serde_json::Value>,
}

/// Location in a GraphQL query where an error occurred.
#[derive(Debug, Clone)]
pub struct GraphQLErrorLocation {
    /// Line number (1-indexed).
    pub line: i64,
    /// Column number (1-indexed).
    pub column: i64,
}

fn format_graphql_errors(errors: &[GraphQLError]) -> String {
    if errors.is_empty() {
        return "(no error details provided)".to_string();
    }

    errors
        .iter()
        .enumerate()
        .map(|(i, e)| {
            let mut parts = Vec::new();

            if !e.message.is_empty() {
                parts.push(e.message.clone());
            }

            if !e.path.is_empty() {
                let path_str = e
                    .path
                    .iter()
                    .map(|p| match p {
                        serde_json::Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect::<Vec<_>>()
                    .join(".");
                parts.push(format!("path: {path_str}"));
            }

            if let Some(loc) = e.locations.first() {
                parts.push(format!("at line {}:{}", loc.line, loc.column));
            }

            if parts.is_empty() {
                format!("[error {}]: (no details)", i + 1)
            } else {
                parts.join(" ")
            }
        })
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graphql_error_formatting() {
        let err = SaleorError::GraphQL(vec![
            GraphQLError {
                message: "Cannot query field \"sku\"".to_string(),
                locations: vec![],
                path: vec![],
            },
            GraphQLError {
                message: "Invalid ID".to_string(),
                locations: vec![],
                path: vec![],
            },
        ]);
        assert_eq!(
            err.to_string(),
            "GraphQL errors: Cannot query field \"sku\"; Invalid ID"
        );
    }

    #[test]
    fn test_graphql_error_path_and_location() {
        let err = SaleorError::GraphQL(vec![GraphQLError {
            message: String::new(),
            locations: vec![GraphQLErrorLocation { line: 3, column: 7 }],
            path: vec![
                serde_json::Value::String("product".to_string()),
                serde_json::Value::String("variants".to_string()),
                serde_json::Value::Number(0.into()),
            ],
        }]);
        assert_eq!(
            err.to_string(),
            "GraphQL errors: path: product.variants.0 at line 3:7"
        );
    }

    #[test]
    fn test_graphql_error_no_details() {
        let err = SaleorError::GraphQL(vec![GraphQLError {
            message: String::new(),
            locations: vec![],
            path: vec![],
        }]);
        assert_eq!(err.to_string(), "GraphQL errors: [error 1]: (no details)");
        assert_eq!(
            SaleorError::GraphQL(vec![]).to_string(),
            "GraphQL errors: (no error details provided)"
        );
    }

    #[test]
    fn test_single_message_error() {
        let err = SaleorError::message("No data in response");
        assert_eq!(err.to_string(), "GraphQL errors: No data in response");
    }

    #[test]
    fn test_rate_limited_error() {
        let err = SaleorError::RateLimited(30);
        assert_eq!(err.to_string(), "Rate limited, retry after 30 seconds");
    }
}
