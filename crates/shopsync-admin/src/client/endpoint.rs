/// Builds the Admin GraphQL URL for a store.
///
/// `store` may be the bare `myshopify.com` subdomain (`"acme"`) or a full
/// host (`"acme.myshopify.com"`, `"shop.acme.com"`), with or without scheme
/// and trailing slash.
#[must_use]
pub fn admin_graphql_endpoint(store: &str, api_version: &str) -> String {
    let host = store
        .trim()
        .trim_start_matches("https://")
        .trim_start_matches("http://")
        .trim_end_matches('/');

    let host = if host.contains('.') {
        host.to_owned()
    } else {
        format!("{host}.myshopify.com")
    };

    format!("https://{host}/admin/api/{}/graphql.json", api_version.trim())
}
