use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::github::{fetch_org_pull_requests, FetchError, GraphQlTransport, PullRequestRecord};

/// Capacity of the record channel. One slot keeps fetchers close to lock-step
/// with the collector, so a stalled collector stalls every fetcher.
const RECORD_CHANNEL_CAPACITY: usize = 1;

/// How one organization's fetch ended
#[derive(Debug)]
pub struct OrgOutcome {
    pub organization: String,
    pub result: Result<usize, FetchError>,
}

/// Everything gathered from one run across all organizations
#[derive(Debug)]
pub struct Collection {
    /// Records sorted by creation time, oldest first
    pub records: Vec<PullRequestRecord>,
    /// One entry per organization whose task ran to completion, in completion order
    pub outcomes: Vec<OrgOutcome>,
}

impl Collection {
    pub fn failed(&self) -> impl Iterator<Item = &OrgOutcome> {
        self.outcomes.iter().filter(|o| o.result.is_err())
    }
}

/// Fetch open PRs for every organization concurrently and merge them.
///
/// Each organization gets its own task. A failing organization is logged and
/// keeps whatever records it sent before failing; the others are unaffected.
/// Records are sorted by creation time once every task has finished.
pub async fn collect_pull_requests(
    transport: Arc<dyn GraphQlTransport>,
    organizations: &[String],
) -> Collection {
    let (tx, mut rx) = mpsc::channel(RECORD_CHANNEL_CAPACITY);
    let mut tasks = JoinSet::new();

    for org in organizations {
        let transport = Arc::clone(&transport);
        let tx = tx.clone();
        let org = org.clone();
        tasks.spawn(async move {
            let result = fetch_org_pull_requests(transport.as_ref(), &org, &tx).await;
            (org, result)
        });
    }
    // Only the workers hold senders from here on
    drop(tx);

    let mut records = Vec::new();
    let mut outcomes = Vec::new();
    let mut done = 0;

    while done < organizations.len() {
        tokio::select! {
            Some(record) = rx.recv() => records.push(record),
            Some(joined) = tasks.join_next() => {
                done += 1;
                match joined {
                    Ok((organization, result)) => {
                        match &result {
                            Ok(count) => tracing::info!(
                                "Finished with {} ({} open pull requests)",
                                organization,
                                count
                            ),
                            Err(e) => tracing::error!("error walking {}: {}", organization, e),
                        }
                        outcomes.push(OrgOutcome { organization, result });
                    }
                    Err(e) => tracing::error!("fetch task failed: {}", e),
                }
            }
            else => break,
        }
    }

    // Records a worker sent just before finishing can still be buffered
    while let Some(record) = rx.recv().await {
        records.push(record);
    }

    records.sort_by_key(|r| r.created_at);

    Collection { records, outcomes }
}
