//! Stock availability as presented to shoppers and search engines.

use serde::{Deserialize, Serialize};

/// Whether something can currently be purchased.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Availability {
    InStock,
    #[default]
    OutOfStock,
}

impl Availability {
    /// Derive availability from a reported quantity.
    ///
    /// Missing, zero or negative quantities are out of stock.
    #[must_use]
    pub const fn from_quantity(quantity: Option<i64>) -> Self {
        match quantity {
            Some(q) if q > 0 => Self::InStock,
            _ => Self::OutOfStock,
        }
    }

    /// Build from a boolean flag.
    #[must_use]
    pub const fn from_flag(available: bool) -> Self {
        if available {
            Self::InStock
        } else {
            Self::OutOfStock
        }
    }

    #[must_use]
    pub const fn is_in_stock(self) -> bool {
        matches!(self, Self::InStock)
    }

    /// The schema.org `ItemAvailability` URL.
    #[must_use]
    pub const fn schema_org_url(self) -> &'static str {
        match self {
            Self::InStock => "https://schema.org/InStock",
            Self::OutOfStock => "https://schema.org/OutOfStock",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_quantity() {
        assert_eq!(Availability::from_quantity(Some(3)), Availability::InStock);
        assert_eq!(Availability::from_quantity(Some(0)), Availability::OutOfStock);
        assert_eq!(Availability::from_quantity(Some(-2)), Availability::OutOfStock);
        assert_eq!(Availability::from_quantity(None), Availability::OutOfStock);
    }

    #[test]
    fn test_schema_org_url() {
        assert_eq!(
            Availability::InStock.schema_org_url(),
            "https://schema.org/InStock"
        );
        assert_eq!(
            Availability::from_flag(false).schema_org_url(),
            "https://schema.org/OutOfStock"
        );
    }
}
