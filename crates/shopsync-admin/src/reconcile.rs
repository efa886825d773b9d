//! Per-row reconciliation: resolve identity, then create or update the
//! product, attach media, and update the primary variant.
//!
//! Steps within a row run in a fixed order and are best-effort: a step that
//! comes back with user errors (or a top-level GraphQL `errors` array) is
//! logged and recorded on the [`RowOutcome`], and the next independent step
//! still runs. Only a transport failure (`Err(AdminError)`) stops the row,
//! and it is returned to the caller untouched.

use shopsync_core::{ImportRecord, VariantFields};

use crate::client::AdminClient;
use crate::error::AdminError;
use crate::input::{ProductInput, VariantInput};
use crate::types::{GraphqlError, GraphqlResponse, MutationPayload};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowStatus {
    Created,
    Updated,
    /// The row did not map to a record; no remote call was made.
    Skipped,
    Errored,
}

impl std::fmt::Display for RowStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RowStatus::Created => write!(f, "created"),
            RowStatus::Updated => write!(f, "updated"),
            RowStatus::Skipped => write!(f, "skipped"),
            RowStatus::Errored => write!(f, "errored"),
        }
    }
}

/// What happened to one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowOutcome {
    pub status: RowStatus,
    pub product_id: Option<String>,
    pub handle: Option<String>,
    /// Application-level problems reported along the way, as
    /// `"<operation>: <message>"`.
    pub problems: Vec<String>,
}

impl RowOutcome {
    #[must_use]
    pub fn skipped() -> Self {
        Self::without_product(RowStatus::Skipped, Vec::new())
    }

    /// Outcome for a row whose workflow was cut short by a transport failure.
    #[must_use]
    pub fn aborted(error: &AdminError) -> Self {
        Self::without_product(RowStatus::Errored, vec![error.to_string()])
    }

    fn without_product(status: RowStatus, problems: Vec<String>) -> Self {
        Self {
            status,
            product_id: None,
            handle: None,
            problems,
        }
    }

    /// `true` when the product was written but some step reported errors.
    #[must_use]
    pub fn is_partial(&self) -> bool {
        matches!(self.status, RowStatus::Created | RowStatus::Updated) && !self.problems.is_empty()
    }
}

/// Collects application-level problems for one row, logging each as it
/// arrives.
#[derive(Debug, Default)]
struct Problems(Vec<String>);

impl Problems {
    fn graphql(&mut self, operation: &str, errors: &[GraphqlError]) {
        for e in errors {
            tracing::warn!(operation, message = %e.message, "GraphQL error");
            self.0.push(format!("{operation}: {}", e.message));
        }
    }

    fn user_errors(&mut self, operation: &str, payload: &impl MutationPayload) {
        for e in payload.user_errors() {
            tracing::warn!(operation, error = %e, "user error");
            self.0.push(format!("{operation}: {e}"));
        }
    }
}

enum Resolution {
    Existing {
        id: String,
        handle: Option<String>,
    },
    New,
    /// The handle lookup itself was rejected; creating now could duplicate
    /// an existing product.
    Unresolved,
}

/// Reconciles one import record against the store.
///
/// # Errors
///
/// Returns the first transport failure from the client. Steps after the
/// failing call are not attempted.
pub async fn reconcile(
    client: &AdminClient,
    record: &ImportRecord,
) -> Result<RowOutcome, AdminError> {
    let mut problems = Problems::default();

    match resolve_identity(client, record, &mut problems).await? {
        Resolution::Existing { id, handle } => {
            update_existing(client, record, id, handle, problems).await
        }
        Resolution::New => create_new(client, record, problems).await,
        Resolution::Unresolved => Ok(RowOutcome::without_product(RowStatus::Errored, problems.0)),
    }
}

/// `remote_id` wins outright; `handle` costs exactly one lookup; neither
/// means create.
async fn resolve_identity(
    client: &AdminClient,
    record: &ImportRecord,
    problems: &mut Problems,
) -> Result<Resolution, AdminError> {
    if let Some(id) = &record.identity.remote_id {
        return Ok(Resolution::Existing {
            id: id.clone(),
            handle: record.identity.handle.clone(),
        });
    }

    let Some(handle) = &record.identity.handle else {
        return Ok(Resolution::New);
    };

    match client.product_by_handle(handle).await? {
        GraphqlResponse::Data(Some(product)) => {
            tracing::debug!(handle = %handle, product_id = %product.id, "matched existing product by handle");
            Ok(Resolution::Existing {
                id: product.id,
                handle: Some(product.handle),
            })
        }
        GraphqlResponse::Data(None) => Ok(Resolution::New),
        GraphqlResponse::Errors(errors) => {
            problems.graphql("productByHandle", &errors);
            Ok(Resolution::Unresolved)
        }
    }
}

async fn update_existing(
    client: &AdminClient,
    record: &ImportRecord,
    id: String,
    mut handle: Option<String>,
    mut problems: Problems,
) -> Result<RowOutcome, AdminError> {
    // The later steps still run when the update is rejected, but the row no
    // longer counts as updated.
    let updated = match client
        .update_product(&ProductInput::for_update(&id, record))
        .await?
    {
        GraphqlResponse::Data(payload) => {
            problems.user_errors("productUpdate", &payload);
            match payload.product {
                Some(product) => {
                    handle = Some(product.handle);
                    true
                }
                None => false,
            }
        }
        GraphqlResponse::Errors(errors) => {
            problems.graphql("productUpdate", &errors);
            false
        }
    };

    // A media failure does not undo the update above.
    if !record.media.is_empty() {
        match client.create_product_media(&id, &record.media).await? {
            GraphqlResponse::Data(payload) => problems.user_errors("productCreateMedia", &payload),
            GraphqlResponse::Errors(errors) => problems.graphql("productCreateMedia", &errors),
        }
    }

    if record.variant.has_any() {
        match client.primary_variant_id(&id).await? {
            GraphqlResponse::Data(Some(variant_id)) => {
                update_variant(client, &id, &variant_id, &record.variant, &mut problems).await?;
            }
            GraphqlResponse::Data(None) => {
                tracing::warn!(product_id = %id, "no primary variant found; variant fields not applied");
            }
            GraphqlResponse::Errors(errors) => problems.graphql("product.variants", &errors),
        }
    }

    Ok(RowOutcome {
        status: if updated {
            RowStatus::Updated
        } else {
            RowStatus::Errored
        },
        product_id: Some(id),
        handle,
        problems: problems.0,
    })
}

async fn create_new(
    client: &AdminClient,
    record: &ImportRecord,
    mut problems: Problems,
) -> Result<RowOutcome, AdminError> {
    let payload = match client
        .create_product(&ProductInput::for_create(record), &record.media)
        .await?
    {
        GraphqlResponse::Data(payload) => payload,
        GraphqlResponse::Errors(errors) => {
            problems.graphql("productCreate", &errors);
            return Ok(RowOutcome::without_product(RowStatus::Errored, problems.0));
        }
    };
    problems.user_errors("productCreate", &payload);

    // Without a created product there is nothing for the variant step to target.
    let Some(product) = payload.product else {
        return Ok(RowOutcome::without_product(RowStatus::Errored, problems.0));
    };

    if record.variant.has_any() {
        match product.primary_variant_id() {
            Some(variant_id) => {
                update_variant(client, &product.id, variant_id, &record.variant, &mut problems)
                    .await?;
            }
            None => {
                tracing::warn!(product_id = %product.id, "created product has no variant; variant fields not applied");
            }
        }
    }

    Ok(RowOutcome {
        status: RowStatus::Created,
        product_id: Some(product.id),
        handle: Some(product.handle),
        problems: problems.0,
    })
}

async fn update_variant(
    client: &AdminClient,
    product_id: &str,
    variant_id: &str,
    fields: &VariantFields,
    problems: &mut Problems,
) -> Result<(), AdminError> {
    match client
        .update_primary_variant(product_id, &VariantInput::new(variant_id, fields))
        .await?
    {
        GraphqlResponse::Data(payload) => problems.user_errors("productVariantsBulkUpdate", &payload),
        GraphqlResponse::Errors(errors) => problems.graphql("productVariantsBulkUpdate", &errors),
    }
    Ok(())
}
