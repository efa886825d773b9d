//! GraphQL input objects built from an [`ImportRecord`].
//!
//! Optional fields are skipped during serialization so that "not provided"
//! never reaches the API as an explicit `null` that would clear a value.

use serde::Serialize;

use shopsync_core::{ImportRecord, Metafield, VariantFields};

/// `ProductInput` for `productCreate` / `productUpdate`.
///
/// Carries product-level fields only; variants and media go through their
/// own mutations.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<&'a str>,
    pub title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description_html: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_type: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<&'a [String]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handle: Option<&'a str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub metafields: Vec<&'a Metafield>,
}

impl<'a> ProductInput<'a> {
    /// Input for a new product. Every text field is sent, empty or not.
    /// The row's handle, if any, overrides the one Shopify would derive from
    /// the title.
    #[must_use]
    pub fn for_create(record: &'a ImportRecord) -> Self {
        Self {
            id: None,
            title: &record.title,
            description_html: Some(record.description_html.as_str()),
            product_type: Some(record.product_type.as_str()),
            vendor: Some(record.vendor.as_str()),
            tags: Some(record.tags.as_slice()),
            handle: record.identity.handle.as_deref(),
            metafields: record.metafield.iter().collect(),
        }
    }

    /// Input for an existing product. The handle is left alone, and empty
    /// text fields or tags are omitted so a sheet without those columns
    /// does not blank values already in the store.
    #[must_use]
    pub fn for_update(id: &'a str, record: &'a ImportRecord) -> Self {
        Self {
            id: Some(id),
            title: &record.title,
            description_html: non_empty(&record.description_html),
            product_type: non_empty(&record.product_type),
            vendor: non_empty(&record.vendor),
            tags: (!record.tags.is_empty()).then_some(record.tags.as_slice()),
            handle: None,
            metafields: record.metafield.iter().collect(),
        }
    }
}

fn non_empty(value: &str) -> Option<&str> {
    (!value.is_empty()).then_some(value)
}

/// One entry of `productVariantsBulkUpdate(variants:)`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantInput<'a> {
    pub id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barcode: Option<&'a str>,
    /// SKU lives on the inventory item, not the variant.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inventory_item: Option<InventoryItemInput<'a>>,
}

#[derive(Debug, Serialize)]
pub struct InventoryItemInput<'a> {
    pub sku: &'a str,
}

impl<'a> VariantInput<'a> {
    #[must_use]
    pub fn new(id: &'a str, fields: &'a VariantFields) -> Self {
        Self {
            id,
            price: fields.price.as_deref(),
            barcode: fields.barcode.as_deref(),
            inventory_item: fields.sku.as_deref().map(|sku| InventoryItemInput { sku }),
        }
    }
}
