//! GraphQL operation definitions for the Saleor API.
//!
//! Each operation implements `graphql_client::GraphQLQuery` by hand so the
//! crate does not need the full Saleor schema at build time. Response types
//! mirror the selection sets exactly; fields the schema declares nullable are
//! `Option`.

use graphql_client::{GraphQLQuery, QueryBody};
use serde::{Deserialize, Serialize};

// =============================================================================
// Shared fragments
// =============================================================================

/// `Money { amount currency }`
#[derive(Debug, Clone, Deserialize)]
pub struct MoneyFields {
    pub amount: f64,
    pub currency: String,
}

/// `TaxedMoney { gross { ...Money } }`
#[derive(Debug, Clone, Deserialize)]
pub struct TaxedMoneyFields {
    pub gross: MoneyFields,
}

/// `Image { url alt }`
#[derive(Debug, Clone, Deserialize)]
pub struct ImageFields {
    pub url: String,
    pub alt: Option<String>,
}

/// `ProductMediaType` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductMediaType {
    Image,
    Video,
    #[serde(other)]
    Other,
}

/// `fragment CheckoutDetails on Checkout`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutDetails {
    pub id: String,
    pub lines: Vec<CheckoutLineFields>,
    pub total_price: Option<TaxedMoneyFields>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutLineFields {
    pub id: String,
    pub quantity: i64,
    pub total_price: Option<TaxedMoneyFields>,
    pub variant: CheckoutLineVariant,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutLineVariant {
    pub id: String,
    pub name: String,
    pub product: CheckoutLineProduct,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutLineProduct {
    pub name: String,
}

/// `CheckoutError { field code message }`
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutErrorFields {
    pub field: Option<String>,
    pub code: String,
    pub message: Option<String>,
}

/// Expands to the `CheckoutDetails` fragment document for use in `concat!`.
macro_rules! checkout_details_fragment {
    () => {
        r"
fragment CheckoutDetails on Checkout {
  id
  lines {
    id
    quantity
    totalPrice { gross { amount currency } }
    variant {
      id
      name
      product { name }
    }
  }
  totalPrice { gross { amount currency } }
}"
    };
}

// =============================================================================
// ProductDetails
// =============================================================================

pub struct ProductDetails;

pub mod product_details {
    use super::{Deserialize, ImageFields, ProductMediaType, Serialize, TaxedMoneyFields};

    pub const OPERATION_NAME: &str = "ProductDetails";
    pub const QUERY: &str = r"
query ProductDetails($slug: String!, $channel: String!) {
  product(slug: $slug, channel: $channel) {
    id
    name
    slug
    description
    seoTitle
    seoDescription
    thumbnail(size: 1024, format: WEBP) { url alt }
    media { id url alt type }
    category { id name }
    variants {
      id
      name
      quantityAvailable
      pricing {
        price { gross { amount currency } }
        priceUndiscounted { gross { amount currency } }
      }
    }
    pricing {
      priceRange {
        start { gross { amount currency } }
        stop { gross { amount currency } }
      }
    }
  }
}";

    #[derive(Debug, Clone, Serialize)]
    pub struct Variables {
        pub slug: String,
        pub channel: String,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        pub product: Option<ProductDetailsProduct>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ProductDetailsProduct {
        pub id: String,
        pub name: String,
        pub slug: String,
        /// `JSONString` scalar: Editor.js document encoded as a string.
        pub description: Option<String>,
        pub seo_title: Option<String>,
        pub seo_description: Option<String>,
        pub thumbnail: Option<ImageFields>,
        pub media: Option<Vec<ProductDetailsMedia>>,
        pub category: Option<ProductDetailsCategory>,
        pub variants: Option<Vec<ProductDetailsVariant>>,
        pub pricing: Option<ProductDetailsPricing>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ProductDetailsMedia {
        pub id: String,
        pub url: String,
        pub alt: String,
        #[serde(rename = "type")]
        pub kind: ProductMediaType,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ProductDetailsCategory {
        pub id: String,
        pub name: String,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ProductDetailsVariant {
        pub id: String,
        pub name: String,
        pub quantity_available: Option<i64>,
        pub pricing: Option<ProductDetailsVariantPricing>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ProductDetailsVariantPricing {
        pub price: Option<TaxedMoneyFields>,
        pub price_undiscounted: Option<TaxedMoneyFields>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ProductDetailsPricing {
        pub price_range: Option<ProductDetailsPriceRange>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ProductDetailsPriceRange {
        pub start: Option<TaxedMoneyFields>,
        pub stop: Option<TaxedMoneyFields>,
    }
}

impl GraphQLQuery for ProductDetails {
    type Variables = product_details::Variables;
    type ResponseData = product_details::ResponseData;

    fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
        QueryBody {
            variables,
            query: product_details::QUERY,
            operation_name: product_details::OPERATION_NAME,
        }
    }
}

// =============================================================================
// ProductList
// =============================================================================

pub struct ProductList;

pub mod product_list {
    use super::{Deserialize, ImageFields, Serialize};

    pub const OPERATION_NAME: &str = "ProductList";
    pub const QUERY: &str = r"
query ProductList($first: Int = 9, $channel: String!) {
  products(first: $first, channel: $channel) {
    edges {
      node {
        id
        name
        slug
        thumbnail(size: 512, format: WEBP) { url alt }
      }
    }
  }
}";

    #[derive(Debug, Clone, Serialize)]
    pub struct Variables {
        pub first: i64,
        pub channel: String,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        pub products: Option<ProductListConnection>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ProductListConnection {
        pub edges: Vec<ProductListEdge>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ProductListEdge {
        pub node: ProductListNode,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ProductListNode {
        pub id: String,
        pub name: String,
        pub slug: String,
        pub thumbnail: Option<ImageFields>,
    }
}

impl GraphQLQuery for ProductList {
    type Variables = product_list::Variables;
    type ResponseData = product_list::ResponseData;

    fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
        QueryBody {
            variables,
            query: product_list::QUERY,
            operation_name: product_list::OPERATION_NAME,
        }
    }
}

// =============================================================================
// CheckoutFind
// =============================================================================

pub struct CheckoutFind;

pub mod checkout_find {
    use super::{CheckoutDetails, Deserialize, Serialize};

    pub const OPERATION_NAME: &str = "CheckoutFind";
    pub const QUERY: &str = concat!(
        r"
query CheckoutFind($id: ID!) {
  checkout(id: $id) {
    ...CheckoutDetails
  }
}",
        checkout_details_fragment!()
    );

    #[derive(Debug, Clone, Serialize)]
    pub struct Variables {
        pub id: String,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        pub checkout: Option<CheckoutDetails>,
    }
}

impl GraphQLQuery for CheckoutFind {
    type Variables = checkout_find::Variables;
    type ResponseData = checkout_find::ResponseData;

    fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
        QueryBody {
            variables,
            query: checkout_find::QUERY,
            operation_name: checkout_find::OPERATION_NAME,
        }
    }
}

// =============================================================================
// CheckoutCreate
// =============================================================================

pub struct CheckoutCreate;

pub mod checkout_create {
    use super::{CheckoutDetails, CheckoutErrorFields, Deserialize, Serialize};

    pub const OPERATION_NAME: &str = "CheckoutCreate";
    pub const QUERY: &str = concat!(
        r"
mutation CheckoutCreate($channel: String!) {
  checkoutCreate(input: { channel: $channel, lines: [] }) {
    checkout {
      ...CheckoutDetails
    }
    errors { field code message }
  }
}",
        checkout_details_fragment!()
    );

    #[derive(Debug, Clone, Serialize)]
    pub struct Variables {
        pub channel: String,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ResponseData {
        pub checkout_create: Option<CheckoutCreatePayload>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct CheckoutCreatePayload {
        pub checkout: Option<CheckoutDetails>,
        pub errors: Vec<CheckoutErrorFields>,
    }
}

impl GraphQLQuery for CheckoutCreate {
    type Variables = checkout_create::Variables;
    type ResponseData = checkout_create::ResponseData;

    fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
        QueryBody {
            variables,
            query: checkout_create::QUERY,
            operation_name: checkout_create::OPERATION_NAME,
        }
    }
}

// =============================================================================
// CheckoutAddLine
// =============================================================================

pub struct CheckoutAddLine;

pub mod checkout_add_line {
    use super::{CheckoutDetails, CheckoutErrorFields, Deserialize, Serialize};

    pub const OPERATION_NAME: &str = "CheckoutAddLine";
    pub const QUERY: &str = concat!(
        r"
mutation CheckoutAddLine($id: ID!, $productVariantId: ID!) {
  checkoutLinesAdd(id: $id, lines: [{ quantity: 1, variantId: $productVariantId }]) {
    checkout {
      ...CheckoutDetails
    }
    errors { field code message }
  }
}",
        checkout_details_fragment!()
    );

    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Variables {
        pub id: String,
        pub product_variant_id: String,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ResponseData {
        pub checkout_lines_add: Option<CheckoutLinesAddPayload>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct CheckoutLinesAddPayload {
        pub checkout: Option<CheckoutDetails>,
        pub errors: Vec<CheckoutErrorFields>,
    }
}

impl GraphQLQuery for CheckoutAddLine {
    type Variables = checkout_add_line::Variables;
    type ResponseData = checkout_add_line::ResponseData;

    fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
        QueryBody {
            variables,
            query: checkout_add_line::QUERY,
            operation_name: checkout_add_line::OPERATION_NAME,
        }
    }
}
