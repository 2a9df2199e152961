pub mod client;
pub mod error;
pub mod fetcher;
pub mod query;
pub mod types;

pub use client::{create_client, GraphQlTransport, HttpTransport, GITHUB_GRAPHQL_ENDPOINT};
pub use error::FetchError;
pub use fetcher::fetch_org_pull_requests;
pub use types::PullRequestRecord;
