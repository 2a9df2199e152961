use chrono::Utc;
use tokio::sync::mpsc::Sender;

use crate::github::client::GraphQlTransport;
use crate::github::error::FetchError;
use crate::github::query::{GraphQlRequest, PAGE_SIZE};
use crate::github::types::{ErrorEnvelope, PullRequestRecord, QueryResponse};

/// Walk every repository page of `org_name` and send one record per open PR.
///
/// Pages are requested until one comes back with fewer than `PAGE_SIZE`
/// edges. Ages are measured against a single clock reading taken before the
/// first request. Returns the number of records sent.
pub async fn fetch_org_pull_requests(
    transport: &dyn GraphQlTransport,
    org_name: &str,
    records: &Sender<PullRequestRecord>,
) -> Result<usize, FetchError> {
    let now = Utc::now();
    let mut request = GraphQlRequest::first_page(org_name);
    let mut page_number = 1;
    let mut sent = 0;

    loop {
        tracing::debug!("Getting {} repositories, page #{}", org_name, page_number);
        let response = transport.post(&request).await?;

        if response.status != 200 {
            return Err(FetchError::Status(response.status));
        }

        // GraphQL errors arrive with a 200; only the first one is reported
        let envelope: ErrorEnvelope = serde_json::from_slice(&response.body)?;
        if let Some(first) = envelope.errors.and_then(|errors| errors.into_iter().next()) {
            return Err(FetchError::GraphQl(first.message));
        }

        let page: QueryResponse = serde_json::from_slice(&response.body)?;
        let organization = page
            .data
            .and_then(|data| data.organization)
            .ok_or_else(|| FetchError::MissingOrganization(org_name.to_string()))?;

        let repositories = organization.repositories;
        for repo in repositories.nodes {
            for node in repo.pull_requests.nodes {
                let record =
                    PullRequestRecord::from_node(&organization.login, &repo.name, node, now);
                records
                    .send(record)
                    .await
                    .map_err(|_| FetchError::ChannelClosed(org_name.to_string()))?;
                sent += 1;
            }
        }

        if repositories.edges.len() < PAGE_SIZE as usize {
            return Ok(sent);
        }

        // Edges come back in forward order, so the last one marks the page end
        if let Some(last) = repositories.edges.into_iter().last() {
            request.advance(last.cursor);
        }
        page_number += 1;
    }
}
