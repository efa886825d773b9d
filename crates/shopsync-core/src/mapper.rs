//! Spreadsheet row → [`ImportRecord`] mapping.
//!
//! Pure and infallible: a row that cannot become a record (no title) maps to
//! `None` and the caller decides how to report it.

use crate::fields::Field;
use crate::record::{Identity, ImportRecord, MediaRef, Metafield, VariantFields};
use crate::row::RawRow;

const TAG_DELIMITER: char = ',';
const MEDIA_DELIMITER: char = ';';
const PRODUCT_GID_PREFIX: &str = "gid://shopify/Product/";

/// Maps one spreadsheet row into an [`ImportRecord`].
///
/// Returns `None` when the row has no non-blank title under any accepted
/// alias. This is a skip signal, not an error.
#[must_use]
pub fn map_row(row: &RawRow) -> Option<ImportRecord> {
    let title = row.field(Field::Title)?.to_string();

    let text = |field: Field| row.field(field).unwrap_or_default().to_string();
    let optional = |field: Field| row.field(field).map(str::to_string);

    Some(ImportRecord {
        title,
        description_html: text(Field::BodyHtml),
        product_type: text(Field::ProductType),
        vendor: text(Field::Vendor),
        tags: split_list(row.field(Field::Tags), TAG_DELIMITER),
        metafield: map_metafield(row),
        media: split_list(row.field(Field::Images), MEDIA_DELIMITER)
            .into_iter()
            .map(MediaRef::image)
            .collect(),
        variant: VariantFields {
            price: optional(Field::Price),
            sku: optional(Field::Sku),
            barcode: optional(Field::Barcode),
        },
        identity: Identity {
            handle: optional(Field::Handle),
            remote_id: row.field(Field::ShopifyId).map(normalize_product_id),
        },
    })
}

/// Splits a delimited cell, trimming entries and dropping empty ones.
fn split_list(raw: Option<&str>, delimiter: char) -> Vec<String> {
    raw.map(|s| {
        s.split(delimiter)
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

/// All four parts or nothing.
fn map_metafield(row: &RawRow) -> Option<Metafield> {
    Some(Metafield {
        namespace: row.field(Field::MetafieldNamespace)?.to_string(),
        key: row.field(Field::MetafieldKey)?.to_string(),
        value: row.field(Field::MetafieldValue)?.to_string(),
        kind: row.field(Field::MetafieldType)?.to_string(),
    })
}

/// Bare numeric ids (as exported from the Shopify admin) become product GIDs;
/// anything else is passed through unchanged.
fn normalize_product_id(raw: &str) -> String {
    if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
        format!("{PRODUCT_GID_PREFIX}{raw}")
    } else {
        raw.to_string()
    }
}

#[cfg(test)]
#[path = "mapper_test.rs"]
mod tests;
