use thiserror::Error;

/// Failures that abort a remote call outright.
///
/// Application-level problems (a top-level GraphQL `errors` array, or a
/// mutation's `userErrors`) are not represented here; they come back as
/// values inside [`crate::GraphqlResponse`] and the mutation payloads.
#[derive(Debug, Error)]
pub enum AdminError {
    /// Network, TLS, or timeout failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {endpoint}")]
    UnexpectedStatus { status: u16, endpoint: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// HTTP 200 with neither `data` nor `errors` in the body.
    #[error("response from {endpoint} carried no data")]
    MissingData { endpoint: String },

    #[error("invalid Admin API endpoint \"{endpoint}\": {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },
}
