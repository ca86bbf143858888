//! Newtype IDs for type-safe entity references.
//!
//! The commerce API identifies every node with an opaque, base64-ish string
//! ID. Use the `define_id!` macro to create wrappers that prevent accidentally
//! passing a product ID where a variant ID is expected.

/// Macro to define a type-safe opaque string ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`
/// - Accessors: `new()`, `as_str()`, `into_inner()`
/// - `From<String>`, `From<&str>` and `Display` implementations
///
/// # Example
///
/// ```rust
/// # use driftwood_core::define_id;
/// define_id!(WarehouseId);
/// define_id!(ShippingZoneId);
///
/// let warehouse = WarehouseId::new("V2FyZWhvdXNlOjE=");
/// assert_eq!(warehouse.as_str(), "V2FyZWhvdXNlOjE=");
///
/// // These are different types, so this won't compile:
/// // let _: ShippingZoneId = warehouse;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from anything string-like.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Borrow the underlying opaque value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the opaque value.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(ProductId);
define_id!(VariantId);
define_id!(CheckoutId);
define_id!(CheckoutLineId);
define_id!(MediaId);
define_id!(CategoryId);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_id_serializes_transparently() {
        let id = VariantId::new("UHJvZHVjdFZhcmlhbnQ6MzQ4");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"UHJvZHVjdFZhcmlhbnQ6MzQ4\"");

        let back: VariantId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_id_display_is_raw_value() {
        let id = CheckoutId::from("Q2hlY2tvdXQ6YWJj");
        assert_eq!(id.to_string(), "Q2hlY2tvdXQ6YWJj");
        assert_eq!(String::from(id), "Q2hlY2tvdXQ6YWJj");
    }
}
