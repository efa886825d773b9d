//! Admin GraphQL response types.
//!
//! Only the fields the import workflow selects are modelled. Shopify returns
//! camelCase keys; every struct renames accordingly.

use serde::Deserialize;
use serde_json::Value;

use shopsync_core::RemoteProductRef;

/// Result of a GraphQL call that reached the server and got a 2xx answer.
///
/// `Errors` is the application-level channel: the request was transported
/// fine but the server rejected it (bad query, throttling, access denied).
#[derive(Debug)]
pub enum GraphqlResponse<T> {
    Data(T),
    Errors(Vec<GraphqlError>),
}

impl<T> GraphqlResponse<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> GraphqlResponse<U> {
        match self {
            GraphqlResponse::Data(data) => GraphqlResponse::Data(f(data)),
            GraphqlResponse::Errors(errors) => GraphqlResponse::Errors(errors),
        }
    }
}

/// Top-level `{ "data": ..., "errors": [...] }` body.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope {
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub errors: Vec<GraphqlError>,
}

/// One entry of the top-level `errors` array.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphqlError {
    pub message: String,
    /// Free-form; Shopify puts the throttle/access code under `extensions.code`.
    #[serde(default)]
    pub extensions: Option<Value>,
}

/// A field-level validation problem reported inside a mutation payload.
#[derive(Debug, Clone, Deserialize)]
pub struct UserError {
    /// Path to the offending input field, e.g. `["input", "title"]`.
    #[serde(default)]
    pub field: Option<Vec<String>>,
    pub message: String,
}

impl std::fmt::Display for UserError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.field {
            Some(path) if !path.is_empty() => write!(f, "{}: {}", path.join("."), self.message),
            _ => f.write_str(&self.message),
        }
    }
}

/// Mutation payloads expose their embedded user-error list.
pub trait MutationPayload {
    fn user_errors(&self) -> &[UserError];
}

// ---------------------------------------------------------------------------
// Shared shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct Connection<T> {
    #[serde(default = "Vec::new")]
    pub edges: Vec<Edge<T>>,
}

impl<T> Connection<T> {
    pub fn first(&self) -> Option<&T> {
        self.edges.first().map(|edge| &edge.node)
    }
}

#[derive(Debug, Deserialize)]
pub struct Edge<T> {
    pub node: T,
}

#[derive(Debug, Deserialize)]
pub struct IdNode {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct ProductNode {
    pub id: String,
    pub handle: String,
}

impl From<ProductNode> for RemoteProductRef {
    fn from(node: ProductNode) -> Self {
        RemoteProductRef {
            id: node.id,
            handle: node.handle,
        }
    }
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProductByHandleData {
    pub product_by_handle: Option<ProductNode>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProductVariantsData {
    pub product: Option<ProductVariants>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProductVariants {
    pub variants: Connection<IdNode>,
}

// ---------------------------------------------------------------------------
// productCreate
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProductCreateData {
    pub product_create: ProductCreatePayload,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCreatePayload {
    pub product: Option<CreatedProduct>,
    #[serde(default)]
    pub user_errors: Vec<UserError>,
}

impl MutationPayload for ProductCreatePayload {
    fn user_errors(&self) -> &[UserError] {
        &self.user_errors
    }
}

/// A freshly created product, with its auto-generated default variant.
#[derive(Debug, Deserialize)]
pub struct CreatedProduct {
    pub id: String,
    pub handle: String,
    pub variants: Connection<IdNode>,
}

impl CreatedProduct {
    #[must_use]
    pub fn primary_variant_id(&self) -> Option<&str> {
        self.variants.first().map(|v| v.id.as_str())
    }
}

// ---------------------------------------------------------------------------
// productUpdate
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProductUpdateData {
    pub product_update: ProductUpdatePayload,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdatePayload {
    pub product: Option<ProductNode>,
    #[serde(default)]
    pub user_errors: Vec<UserError>,
}

impl MutationPayload for ProductUpdatePayload {
    fn user_errors(&self) -> &[UserError] {
        &self.user_errors
    }
}

// ---------------------------------------------------------------------------
// productCreateMedia
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProductCreateMediaData {
    pub product_create_media: ProductCreateMediaPayload,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCreateMediaPayload {
    #[serde(default)]
    pub media: Vec<MediaNode>,
    #[serde(default)]
    pub media_user_errors: Vec<UserError>,
}

impl MutationPayload for ProductCreateMediaPayload {
    fn user_errors(&self) -> &[UserError] {
        &self.media_user_errors
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaNode {
    #[serde(default)]
    pub media_content_type: Option<String>,
    /// Processing state, e.g. `"UPLOADED"` or `"PROCESSING"`.
    #[serde(default)]
    pub status: Option<String>,
}

// ---------------------------------------------------------------------------
// productVariantsBulkUpdate
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VariantsBulkUpdateData {
    pub product_variants_bulk_update: VariantsBulkUpdatePayload,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantsBulkUpdatePayload {
    #[serde(default)]
    pub product_variants: Option<Vec<IdNode>>,
    #[serde(default)]
    pub user_errors: Vec<UserError>,
}

impl MutationPayload for VariantsBulkUpdatePayload {
    fn user_errors(&self) -> &[UserError] {
        &self.user_errors
    }
}
