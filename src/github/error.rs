use thiserror::Error;

/// Failure while walking one organization's pages.
///
/// Any of these stops the fetcher for that organization; nothing is retried.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to make request: {0}")]
    Transport(String),

    #[error("github returned {0}")]
    Status(u16),

    #[error("cannot read response body: {0}")]
    Body(String),

    #[error("failed to unmarshal response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("failed to make graphql request: {0}")]
    GraphQl(String),

    #[error("organization {0} not found in response")]
    MissingOrganization(String),

    #[error("record channel closed before {0} finished")]
    ChannelClosed(String),
}
