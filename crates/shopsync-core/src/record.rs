//! Import-side domain types.
//!
//! An [`ImportRecord`] is built once per spreadsheet row by
//! [`crate::map_row`], consumed by the reconciliation workflow, and dropped.
//! Nothing here is persisted.

use serde::Serialize;

/// One product row, mapped and ready to be reconciled against the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportRecord {
    /// Never empty; rows without a title are dropped by the mapper.
    pub title: String,
    pub description_html: String,
    pub product_type: String,
    pub vendor: String,
    /// Split from a comma-separated cell, in input order.
    pub tags: Vec<String>,
    pub metafield: Option<Metafield>,
    /// Split from a semicolon-separated cell, in input order.
    pub media: Vec<MediaRef>,
    pub variant: VariantFields,
    pub identity: Identity,
}

/// A single typed, namespaced custom attribute for the product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Metafield {
    pub namespace: String,
    pub key: String,
    pub value: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MediaContentType {
    Image,
}

/// An externally hosted media file to attach to the product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaRef {
    #[serde(rename = "mediaContentType")]
    pub content_type: MediaContentType,
    #[serde(rename = "originalSource")]
    pub source_url: String,
}

impl MediaRef {
    #[must_use]
    pub fn image(source_url: impl Into<String>) -> Self {
        Self {
            content_type: MediaContentType::Image,
            source_url: source_url.into(),
        }
    }
}

/// Fields applied to the product's primary variant. `None` means "not
/// provided" and the field is left untouched remotely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VariantFields {
    /// Decimal string exactly as it appeared in the sheet, e.g. `"19.99"`.
    pub price: Option<String>,
    pub sku: Option<String>,
    pub barcode: Option<String>,
}

impl VariantFields {
    /// Returns `true` when at least one variant field was supplied.
    #[must_use]
    pub fn has_any(&self) -> bool {
        self.price.is_some() || self.sku.is_some() || self.barcode.is_some()
    }
}

/// Hints used to find an existing remote product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Identity {
    pub handle: Option<String>,
    /// Product GID, e.g. `"gid://shopify/Product/7012345678901"`. Takes
    /// precedence over `handle`.
    pub remote_id: Option<String>,
}

/// A product as identified by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteProductRef {
    pub id: String,
    pub handle: String,
}
