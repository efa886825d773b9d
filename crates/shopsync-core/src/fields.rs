//! Spreadsheet column aliases.
//!
//! Each canonical field accepts several header spellings. Lookup is
//! case-sensitive and tries aliases in the listed order, taking the first
//! non-empty cell.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Handle,
    BodyHtml,
    ProductType,
    Vendor,
    Tags,
    Price,
    Sku,
    Barcode,
    MetafieldNamespace,
    MetafieldKey,
    MetafieldValue,
    MetafieldType,
    Images,
    ShopifyId,
}

impl Field {
    /// Accepted header names, highest priority first.
    #[must_use]
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Field::Title => &["Title", "title", "TITLE"],
            Field::Handle => &["Handle", "handle", "HANDLE"],
            Field::BodyHtml => &["BodyHtml", "bodyHtml", "Body HTML", "body_html", "Description"],
            Field::ProductType => &["ProductType", "productType", "Product Type", "product_type"],
            Field::Vendor => &["Vendor", "vendor", "VENDOR"],
            Field::Tags => &["Tags", "tags", "TAGS"],
            Field::Price => &["Price", "price", "PRICE", "Cost", "cost"],
            Field::Sku => &["SKU", "Sku", "sku"],
            Field::Barcode => &["Barcode", "barcode", "BARCODE"],
            Field::MetafieldNamespace => &["MetafieldNS", "MetafieldNamespace", "metafieldNS"],
            Field::MetafieldKey => &["MetafieldKey", "metafieldKey"],
            Field::MetafieldValue => &["MetafieldValue", "metafieldValue"],
            Field::MetafieldType => &["MetafieldType", "metafieldType"],
            Field::Images => &["ImageURLs", "ImageUrls", "Images", "images"],
            Field::ShopifyId => &["ShopifyID", "ShopifyId", "shopifyId", "shopify_id"],
        }
    }
}
