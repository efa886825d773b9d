//! Admin GraphQL documents used by the importer.

pub const PRODUCT_BY_HANDLE: &str = r"
query ProductByHandle($handle: String!) {
  productByHandle(handle: $handle) {
    id
    handle
  }
}";

pub const PRODUCT_PRIMARY_VARIANT: &str = r"
query ProductPrimaryVariant($id: ID!) {
  product(id: $id) {
    variants(first: 1) {
      edges { node { id } }
    }
  }
}";

pub const PRODUCT_CREATE: &str = r"
mutation ProductCreate($input: ProductInput!, $media: [CreateMediaInput!]) {
  productCreate(input: $input, media: $media) {
    product {
      id
      handle
      variants(first: 1) {
        edges { node { id } }
      }
    }
    userErrors { field message }
  }
}";

pub const PRODUCT_UPDATE: &str = r"
mutation ProductUpdate($input: ProductInput!) {
  productUpdate(input: $input) {
    product { id handle }
    userErrors { field message }
  }
}";

pub const PRODUCT_CREATE_MEDIA: &str = r"
mutation ProductCreateMedia($productId: ID!, $media: [CreateMediaInput!]!) {
  productCreateMedia(productId: $productId, media: $media) {
    media { mediaContentType status }
    mediaUserErrors { field message }
  }
}";

pub const PRODUCT_VARIANTS_BULK_UPDATE: &str = r"
mutation ProductVariantsBulkUpdate($productId: ID!, $variants: [ProductVariantsBulkInput!]!) {
  productVariantsBulkUpdate(productId: $productId, variants: $variants) {
    productVariants { id }
    userErrors { field message }
  }
}";
