pub mod client;
pub mod error;
pub mod input;
pub mod queries;
pub mod reconcile;
pub mod types;

pub use client::{admin_graphql_endpoint, AdminClient};
pub use error::AdminError;
pub use reconcile::{reconcile, RowOutcome, RowStatus};
pub use types::{GraphqlError, GraphqlResponse, UserError};
