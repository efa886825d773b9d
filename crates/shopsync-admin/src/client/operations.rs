//! Typed wrappers over [`AdminClient::execute`], one per Admin API operation
//! the importer uses.

use serde_json::json;

use shopsync_core::{MediaRef, RemoteProductRef};

use crate::error::AdminError;
use crate::input::{ProductInput, VariantInput};
use crate::queries;
use crate::types::{
    GraphqlResponse, ProductByHandleData, ProductCreateData, ProductCreateMediaData,
    ProductCreateMediaPayload, ProductCreatePayload, ProductUpdateData, ProductUpdatePayload,
    ProductVariantsData, VariantsBulkUpdateData, VariantsBulkUpdatePayload,
};

use super::AdminClient;

impl AdminClient {
    /// Looks up a product by its handle. `Data(None)` means no such product.
    ///
    /// # Errors
    ///
    /// Propagates transport failures from [`AdminClient::execute`].
    pub async fn product_by_handle(
        &self,
        handle: &str,
    ) -> Result<GraphqlResponse<Option<RemoteProductRef>>, AdminError> {
        let response: GraphqlResponse<ProductByHandleData> = self
            .execute(queries::PRODUCT_BY_HANDLE, json!({ "handle": handle }))
            .await?;
        Ok(response.map(|data| data.product_by_handle.map(RemoteProductRef::from)))
    }

    /// Returns the id of the product's first variant. `Data(None)` when the
    /// product does not exist or has no variants.
    ///
    /// # Errors
    ///
    /// Propagates transport failures from [`AdminClient::execute`].
    pub async fn primary_variant_id(
        &self,
        product_id: &str,
    ) -> Result<GraphqlResponse<Option<String>>, AdminError> {
        let response: GraphqlResponse<ProductVariantsData> = self
            .execute(queries::PRODUCT_PRIMARY_VARIANT, json!({ "id": product_id }))
            .await?;
        Ok(response.map(|data| {
            data.product
                .and_then(|p| p.variants.edges.into_iter().next())
                .map(|edge| edge.node.id)
        }))
    }

    /// Runs `productCreate` with the product fields and any media to attach.
    ///
    /// # Errors
    ///
    /// Propagates transport failures from [`AdminClient::execute`].
    pub async fn create_product(
        &self,
        input: &ProductInput<'_>,
        media: &[MediaRef],
    ) -> Result<GraphqlResponse<ProductCreatePayload>, AdminError> {
        let response: GraphqlResponse<ProductCreateData> = self
            .execute(
                queries::PRODUCT_CREATE,
                json!({ "input": input, "media": media }),
            )
            .await?;
        Ok(response.map(|data| data.product_create))
    }

    /// Runs `productUpdate`. `input.id` must be set.
    ///
    /// # Errors
    ///
    /// Propagates transport failures from [`AdminClient::execute`].
    pub async fn update_product(
        &self,
        input: &ProductInput<'_>,
    ) -> Result<GraphqlResponse<ProductUpdatePayload>, AdminError> {
        let response: GraphqlResponse<ProductUpdateData> = self
            .execute(queries::PRODUCT_UPDATE, json!({ "input": input }))
            .await?;
        Ok(response.map(|data| data.product_update))
    }

    /// Attaches externally hosted media to an existing product.
    ///
    /// # Errors
    ///
    /// Propagates transport failures from [`AdminClient::execute`].
    pub async fn create_product_media(
        &self,
        product_id: &str,
        media: &[MediaRef],
    ) -> Result<GraphqlResponse<ProductCreateMediaPayload>, AdminError> {
        let response: GraphqlResponse<ProductCreateMediaData> = self
            .execute(
                queries::PRODUCT_CREATE_MEDIA,
                json!({ "productId": product_id, "media": media }),
            )
            .await?;
        Ok(response.map(|data| data.product_create_media))
    }

    /// Updates a single variant through `productVariantsBulkUpdate`.
    ///
    /// # Errors
    ///
    /// Propagates transport failures from [`AdminClient::execute`].
    pub async fn update_primary_variant(
        &self,
        product_id: &str,
        variant: &VariantInput<'_>,
    ) -> Result<GraphqlResponse<VariantsBulkUpdatePayload>, AdminError> {
        let response: GraphqlResponse<VariantsBulkUpdateData> = self
            .execute(
                queries::PRODUCT_VARIANTS_BULK_UPDATE,
                json!({ "productId": product_id, "variants": [variant] }),
            )
            .await?;
        Ok(response.map(|data| data.product_variants_bulk_update))
    }
}
