//! Integration tests for the per-row reconciliation workflow.
//!
//! Each remote operation is routed by a distinctive fragment of its GraphQL
//! document, so tests can assert exactly which operations a row triggers and
//! what variables each one carried.

use serde_json::{json, Value};
use wiremock::matchers::{body_string_contains, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shopsync_admin::{reconcile, AdminClient, AdminError, RowStatus};
use shopsync_core::{map_row, ImportRecord, RawRow};

const BY_HANDLE: &str = "productByHandle(handle";
const VARIANT_LOOKUP: &str = "product(id";
const CREATE: &str = "productCreate(input";
const UPDATE: &str = "productUpdate(input";
const CREATE_MEDIA: &str = "productCreateMedia(productId";
const VARIANTS_UPDATE: &str = "productVariantsBulkUpdate(productId";

const PRODUCT_ID: &str = "gid://shopify/Product/1";
const VARIANT_ID: &str = "gid://shopify/ProductVariant/11";

fn test_client(server: &MockServer) -> AdminClient {
    AdminClient::with_endpoint(&format!("{}/graphql.json", server.uri()), "shpat_test")
        .expect("client construction should not fail")
}

fn record(pairs: &[(&str, &str)]) -> ImportRecord {
    map_row(&RawRow::from_pairs(pairs.iter().copied())).expect("row should map")
}

async fn mount(server: &MockServer, operation: &str, body: Value, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(body_string_contains(operation))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(expected_calls)
        .mount(server)
        .await;
}

async fn mount_never(server: &MockServer, operation: &str) {
    mount(server, operation, json!({"data": {}}), 0).await;
}

/// Variables of every recorded request whose document contains `operation`.
async fn variables_for(server: &MockServer, operation: &str) -> Vec<Value> {
    server
        .received_requests()
        .await
        .expect("request recording enabled")
        .iter()
        .filter_map(|req| serde_json::from_slice::<Value>(&req.body).ok())
        .filter(|body| {
            body["query"]
                .as_str()
                .is_some_and(|q| q.contains(operation))
        })
        .map(|body| body["variables"].clone())
        .collect()
}

fn created_product() -> Value {
    json!({"data": {"productCreate": {
        "product": {
            "id": PRODUCT_ID,
            "handle": "shirt",
            "variants": {"edges": [{"node": {"id": VARIANT_ID}}]}
        },
        "userErrors": []
    }}})
}

fn found_by_handle() -> Value {
    json!({"data": {"productByHandle": {"id": PRODUCT_ID, "handle": "shirt-1"}}})
}

fn updated_product() -> Value {
    json!({"data": {"productUpdate": {
        "product": {"id": PRODUCT_ID, "handle": "shirt-1"},
        "userErrors": []
    }}})
}

fn primary_variant() -> Value {
    json!({"data": {"product": {"variants": {"edges": [{"node": {"id": VARIANT_ID}}]}}}})
}

fn variants_updated() -> Value {
    json!({"data": {"productVariantsBulkUpdate": {
        "productVariants": [{"id": VARIANT_ID}],
        "userErrors": []
    }}})
}

// ---------------------------------------------------------------------------
// Create path
// ---------------------------------------------------------------------------

#[tokio::test]
async fn new_product_is_created_then_primary_variant_updated() {
    let server = MockServer::start().await;
    mount_never(&server, BY_HANDLE).await;
    mount_never(&server, CREATE_MEDIA).await;
    mount_never(&server, VARIANT_LOOKUP).await;
    mount(&server, CREATE, created_product(), 1).await;
    mount(&server, VARIANTS_UPDATE, variants_updated(), 1).await;

    let client = test_client(&server);
    let row = record(&[("Title", "Shirt"), ("Price", "19.99"), ("SKU", "SH1")]);
    let outcome = reconcile(&client, &row).await.expect("no transport failure");

    assert_eq!(outcome.status, RowStatus::Created);
    assert_eq!(outcome.product_id.as_deref(), Some(PRODUCT_ID));
    assert_eq!(outcome.handle.as_deref(), Some("shirt"));
    assert!(outcome.problems.is_empty());

    let create = variables_for(&server, CREATE).await;
    assert_eq!(create.len(), 1);
    assert_eq!(create[0]["input"]["title"], "Shirt");
    assert_eq!(create[0]["input"]["tags"], json!([]));
    assert!(create[0]["input"].get("handle").is_none());

    let variants = variables_for(&server, VARIANTS_UPDATE).await;
    assert_eq!(variants.len(), 1);
    assert_eq!(variants[0]["productId"], PRODUCT_ID);
    assert_eq!(
        variants[0]["variants"],
        json!([{"id": VARIANT_ID, "price": "19.99", "inventoryItem": {"sku": "SH1"}}])
    );
}

#[tokio::test]
async fn create_sends_media_and_handle_override_in_one_call() {
    let server = MockServer::start().await;
    mount(&server, BY_HANDLE, json!({"data": {"productByHandle": null}}), 1).await;
    mount(&server, CREATE, created_product(), 1).await;
    mount_never(&server, CREATE_MEDIA).await;
    mount_never(&server, VARIANTS_UPDATE).await;

    let client = test_client(&server);
    let row = record(&[
        ("Title", "Shirt"),
        ("Handle", "shirt-new"),
        ("ImageURLs", "http://x/1.png;http://x/2.png"),
    ]);
    let outcome = reconcile(&client, &row).await.unwrap();

    assert_eq!(outcome.status, RowStatus::Created);
    let create = variables_for(&server, CREATE).await;
    assert_eq!(create[0]["input"]["handle"], "shirt-new");
    assert_eq!(
        create[0]["media"],
        json!([
            {"mediaContentType": "IMAGE", "originalSource": "http://x/1.png"},
            {"mediaContentType": "IMAGE", "originalSource": "http://x/2.png"}
        ])
    );
}

#[tokio::test]
async fn create_user_errors_skip_variant_update() {
    let server = MockServer::start().await;
    mount(
        &server,
        CREATE,
        json!({"data": {"productCreate": {
            "product": null,
            "userErrors": [{"field": ["input", "title"], "message": "Title is too long"}]
        }}}),
        1,
    )
    .await;
    mount_never(&server, VARIANTS_UPDATE).await;
    mount_never(&server, VARIANT_LOOKUP).await;

    let client = test_client(&server);
    let row = record(&[("Title", "Shirt"), ("Price", "19.99")]);
    let outcome = reconcile(&client, &row).await.unwrap();

    assert_eq!(outcome.status, RowStatus::Errored);
    assert!(outcome.product_id.is_none());
    assert_eq!(
        outcome.problems,
        vec!["productCreate: input.title: Title is too long".to_string()]
    );
}

#[tokio::test]
async fn create_without_variant_fields_makes_a_single_call() {
    let server = MockServer::start().await;
    mount(&server, CREATE, created_product(), 1).await;
    mount_never(&server, VARIANTS_UPDATE).await;

    let client = test_client(&server);
    let outcome = reconcile(&client, &record(&[("Title", "Shirt")]))
        .await
        .unwrap();
    assert_eq!(outcome.status, RowStatus::Created);
}

// ---------------------------------------------------------------------------
// Identity resolution
// ---------------------------------------------------------------------------

#[tokio::test]
async fn remote_id_bypasses_handle_lookup() {
    let server = MockServer::start().await;
    mount_never(&server, BY_HANDLE).await;
    mount_never(&server, CREATE).await;
    mount(&server, UPDATE, updated_product(), 1).await;

    let client = test_client(&server);
    let row = record(&[
        ("Title", "Shirt"),
        ("Handle", "shirt-1"),
        ("ShopifyID", "1"),
    ]);
    let outcome = reconcile(&client, &row).await.unwrap();

    assert_eq!(outcome.status, RowStatus::Updated);
    let update = variables_for(&server, UPDATE).await;
    assert_eq!(update[0]["input"]["id"], PRODUCT_ID);
}

#[tokio::test]
async fn handle_miss_issues_one_lookup_then_creates() {
    let server = MockServer::start().await;
    mount(&server, BY_HANDLE, json!({"data": {"productByHandle": null}}), 1).await;
    mount(&server, CREATE, created_product(), 1).await;
    mount_never(&server, UPDATE).await;

    let client = test_client(&server);
    let row = record(&[("Title", "Shirt"), ("Handle", "shirt-1")]);
    let outcome = reconcile(&client, &row).await.unwrap();

    assert_eq!(outcome.status, RowStatus::Created);
    let lookups = variables_for(&server, BY_HANDLE).await;
    assert_eq!(lookups, vec![json!({"handle": "shirt-1"})]);
}

#[tokio::test]
async fn rejected_handle_lookup_errors_the_row_without_creating() {
    let server = MockServer::start().await;
    mount(
        &server,
        BY_HANDLE,
        json!({"errors": [{"message": "Throttled"}]}),
        1,
    )
    .await;
    mount_never(&server, CREATE).await;
    mount_never(&server, UPDATE).await;

    let client = test_client(&server);
    let row = record(&[("Title", "Shirt"), ("Handle", "shirt-1")]);
    let outcome = reconcile(&client, &row).await.unwrap();

    assert_eq!(outcome.status, RowStatus::Errored);
    assert_eq!(outcome.problems, vec!["productByHandle: Throttled".to_string()]);
}

// ---------------------------------------------------------------------------
// Update path
// ---------------------------------------------------------------------------

#[tokio::test]
async fn existing_handle_updates_product_then_only_supplied_variant_fields() {
    let server = MockServer::start().await;
    mount(&server, BY_HANDLE, found_by_handle(), 1).await;
    mount(&server, UPDATE, updated_product(), 1).await;
    mount_never(&server, CREATE_MEDIA).await;
    mount(&server, VARIANT_LOOKUP, primary_variant(), 1).await;
    mount(&server, VARIANTS_UPDATE, variants_updated(), 1).await;
    mount_never(&server, CREATE).await;

    let client = test_client(&server);
    let row = record(&[("Title", "Shirt"), ("Handle", "shirt-1"), ("Barcode", "123")]);
    let outcome = reconcile(&client, &row).await.unwrap();

    assert_eq!(outcome.status, RowStatus::Updated);
    assert_eq!(outcome.handle.as_deref(), Some("shirt-1"));
    assert!(!outcome.is_partial());

    let update = variables_for(&server, UPDATE).await;
    let input = update[0]["input"].as_object().expect("input object");
    assert_eq!(input["id"], PRODUCT_ID);
    assert_eq!(input["title"], "Shirt");
    for stripped in ["variants", "media", "handle", "descriptionHtml", "tags"] {
        assert!(!input.contains_key(stripped), "{stripped} must not be sent");
    }

    let lookup = variables_for(&server, VARIANT_LOOKUP).await;
    assert_eq!(lookup, vec![json!({"id": PRODUCT_ID})]);

    let variants = variables_for(&server, VARIANTS_UPDATE).await;
    assert_eq!(
        variants[0]["variants"],
        json!([{"id": VARIANT_ID, "barcode": "123"}])
    );
}

#[tokio::test]
async fn media_failure_does_not_stop_variant_update() {
    let server = MockServer::start().await;
    mount(&server, UPDATE, updated_product(), 1).await;
    mount(
        &server,
        CREATE_MEDIA,
        json!({"data": {"productCreateMedia": {
            "media": [],
            "mediaUserErrors": [{"field": ["media", "0", "originalSource"], "message": "Image URL is invalid"}]
        }}}),
        1,
    )
    .await;
    mount(&server, VARIANT_LOOKUP, primary_variant(), 1).await;
    mount(&server, VARIANTS_UPDATE, variants_updated(), 1).await;

    let client = test_client(&server);
    let row = record(&[
        ("Title", "Shirt"),
        ("ShopifyID", PRODUCT_ID),
        ("Images", "not-a-url"),
        ("Price", "5.00"),
    ]);
    let outcome = reconcile(&client, &row).await.unwrap();

    assert_eq!(outcome.status, RowStatus::Updated);
    assert!(outcome.is_partial());
    assert_eq!(outcome.problems.len(), 1);
    assert!(outcome.problems[0].starts_with("productCreateMedia:"));
}

#[tokio::test]
async fn update_user_errors_do_not_abort_later_steps() {
    let server = MockServer::start().await;
    mount(
        &server,
        UPDATE,
        json!({"data": {"productUpdate": {
            "product": null,
            "userErrors": [{"field": ["input", "productType"], "message": "is invalid"}]
        }}}),
        1,
    )
    .await;
    mount(&server, VARIANT_LOOKUP, primary_variant(), 1).await;
    mount(&server, VARIANTS_UPDATE, variants_updated(), 1).await;

    let client = test_client(&server);
    let row = record(&[("Title", "Shirt"), ("ShopifyID", "1"), ("SKU", "SH1")]);
    let outcome = reconcile(&client, &row).await.unwrap();

    assert_eq!(outcome.status, RowStatus::Errored);
    assert!(!outcome.is_partial());
    assert_eq!(outcome.product_id.as_deref(), Some("gid://shopify/Product/1"));
    assert_eq!(
        outcome.problems,
        vec!["productUpdate: input.productType: is invalid".to_string()]
    );
}

#[tokio::test]
async fn update_graphql_errors_still_run_media_and_variant_steps() {
    let server = MockServer::start().await;
    mount(
        &server,
        UPDATE,
        json!({"errors": [{"message": "Access denied for productUpdate field."}]}),
        1,
    )
    .await;
    mount(
        &server,
        CREATE_MEDIA,
        json!({"data": {"productCreateMedia": {"media": [], "mediaUserErrors": []}}}),
        1,
    )
    .await;
    mount(&server, VARIANT_LOOKUP, primary_variant(), 1).await;
    mount(&server, VARIANTS_UPDATE, variants_updated(), 1).await;

    let client = test_client(&server);
    let row = record(&[
        ("Title", "Shirt"),
        ("ShopifyID", "1"),
        ("Images", "http://x/1.png"),
        ("Price", "5.00"),
    ]);
    let outcome = reconcile(&client, &row).await.unwrap();

    assert_eq!(outcome.status, RowStatus::Errored);
    assert_eq!(
        outcome.problems,
        vec!["productUpdate: Access denied for productUpdate field.".to_string()]
    );
}

#[tokio::test]
async fn media_graphql_errors_do_not_stop_variant_update() {
    let server = MockServer::start().await;
    mount(&server, UPDATE, updated_product(), 1).await;
    mount(
        &server,
        CREATE_MEDIA,
        json!({"errors": [{"message": "Throttled", "extensions": {"code": "THROTTLED"}}]}),
        1,
    )
    .await;
    mount(&server, VARIANT_LOOKUP, primary_variant(), 1).await;
    mount(&server, VARIANTS_UPDATE, variants_updated(), 1).await;

    let client = test_client(&server);
    let row = record(&[
        ("Title", "Shirt"),
        ("ShopifyID", "1"),
        ("Images", "http://x/1.png"),
        ("Barcode", "0123"),
    ]);
    let outcome = reconcile(&client, &row).await.unwrap();

    assert_eq!(outcome.status, RowStatus::Updated);
    assert!(outcome.is_partial());
    assert_eq!(outcome.problems, vec!["productCreateMedia: Throttled".to_string()]);
}

#[tokio::test]
async fn variant_lookup_errors_skip_variant_update() {
    let server = MockServer::start().await;
    mount(&server, UPDATE, updated_product(), 1).await;
    mount(
        &server,
        VARIANT_LOOKUP,
        json!({"errors": [{"message": "Field 'variants' doesn't exist"}]}),
        1,
    )
    .await;
    mount_never(&server, VARIANTS_UPDATE).await;

    let client = test_client(&server);
    let row = record(&[("Title", "Shirt"), ("ShopifyID", "1"), ("Price", "1.00")]);
    let outcome = reconcile(&client, &row).await.unwrap();

    assert_eq!(outcome.status, RowStatus::Updated);
    assert_eq!(
        outcome.problems,
        vec!["product.variants: Field 'variants' doesn't exist".to_string()]
    );
}

#[tokio::test]
async fn variant_update_graphql_errors_are_recorded_on_the_row() {
    let server = MockServer::start().await;
    mount(&server, CREATE, created_product(), 1).await;
    mount(
        &server,
        VARIANTS_UPDATE,
        json!({"errors": [{"message": "Internal error"}]}),
        1,
    )
    .await;

    let client = test_client(&server);
    let row = record(&[("Title", "Shirt"), ("Price", "9.99")]);
    let outcome = reconcile(&client, &row).await.unwrap();

    assert_eq!(outcome.status, RowStatus::Created);
    assert!(outcome.is_partial());
    assert_eq!(
        outcome.problems,
        vec!["productVariantsBulkUpdate: Internal error".to_string()]
    );
}

#[tokio::test]
async fn create_graphql_errors_error_the_row_without_variant_step() {
    let server = MockServer::start().await;
    mount(
        &server,
        CREATE,
        json!({"errors": [{"message": "Access denied for productCreate field."}]}),
        1,
    )
    .await;
    mount_never(&server, VARIANTS_UPDATE).await;

    let client = test_client(&server);
    let row = record(&[("Title", "Shirt"), ("Price", "9.99")]);
    let outcome = reconcile(&client, &row).await.unwrap();

    assert_eq!(outcome.status, RowStatus::Errored);
    assert_eq!(outcome.product_id, None);
    assert_eq!(
        outcome.problems,
        vec!["productCreate: Access denied for productCreate field.".to_string()]
    );
}

#[tokio::test]
async fn missing_primary_variant_is_not_an_error() {
    let server = MockServer::start().await;
    mount(&server, UPDATE, updated_product(), 1).await;
    mount(
        &server,
        VARIANT_LOOKUP,
        json!({"data": {"product": {"variants": {"edges": []}}}}),
        1,
    )
    .await;
    mount_never(&server, VARIANTS_UPDATE).await;

    let client = test_client(&server);
    let row = record(&[("Title", "Shirt"), ("ShopifyID", "1"), ("Price", "1.00")]);
    let outcome = reconcile(&client, &row).await.unwrap();

    assert_eq!(outcome.status, RowStatus::Updated);
    assert!(outcome.problems.is_empty());
}

#[tokio::test]
async fn transport_failure_aborts_remaining_steps() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_string_contains(UPDATE))
        .respond_with(ResponseTemplate::new(502))
        .expect(1)
        .mount(&server)
        .await;
    mount_never(&server, CREATE_MEDIA).await;
    mount_never(&server, VARIANT_LOOKUP).await;
    mount_never(&server, VARIANTS_UPDATE).await;

    let client = test_client(&server);
    let row = record(&[
        ("Title", "Shirt"),
        ("ShopifyID", "1"),
        ("Images", "http://x/1.png"),
        ("Price", "1.00"),
    ]);
    let result = reconcile(&client, &row).await;

    assert!(
        matches!(result, Err(AdminError::UnexpectedStatus { status: 502, .. })),
        "expected UnexpectedStatus(502), got: {result:?}"
    );
}

#[tokio::test]
async fn metafield_is_sent_with_product_update() {
    let server = MockServer::start().await;
    mount(&server, UPDATE, updated_product(), 1).await;

    let client = test_client(&server);
    let row = record(&[
        ("Title", "Shirt"),
        ("ShopifyID", "1"),
        ("MetafieldNS", "custom"),
        ("MetafieldKey", "fabric"),
        ("MetafieldValue", "cotton"),
        ("MetafieldType", "single_line_text_field"),
    ]);
    reconcile(&client, &row).await.unwrap();

    let update = variables_for(&server, UPDATE).await;
    assert_eq!(update[0]["input"]["metafields"][0]["key"], "fabric");
    assert_eq!(
        update[0]["input"]["metafields"][0]["type"],
        "single_line_text_field"
    );
}
