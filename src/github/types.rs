use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;

/// Login shown for pull requests whose author account no longer exists
pub const GHOST_LOGIN: &str = "ghost";

/// One open pull request, denormalized for display.
///
/// `age` is measured against the fetcher's clock when the page was read, so
/// it stays stable for the whole run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestRecord {
    pub organization: String,
    pub repository: String,
    pub number: u64,
    pub title: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
    pub age: Duration,
}

impl PullRequestRecord {
    /// Build a record from a repository's pull request node
    pub fn from_node(
        organization: &str,
        repository: &str,
        node: PullRequestNode,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            organization: organization.to_string(),
            repository: repository.to_string(),
            number: node.number,
            title: node.title,
            author: node
                .author
                .map(|a| a.login)
                .unwrap_or_else(|| GHOST_LOGIN.to_string()),
            created_at: node.created_at,
            age: now - node.created_at,
        }
    }

    /// Web path of the pull request without scheme: "github.com/org/repo/pull/1"
    pub fn web_path(&self) -> String {
        format!(
            "github.com/{}/{}/pull/{}",
            self.organization, self.repository, self.number
        )
    }
}

// Response schema of the organization repositories query

/// Top-level error envelope, decoded before the data payload
#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    #[serde(default)]
    pub errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlError {
    pub message: String,
    #[serde(default)]
    pub path: Option<Vec<serde_json::Value>>,
    #[serde(default)]
    pub extensions: Option<ErrorExtensions>,
    #[serde(default)]
    pub locations: Option<Vec<ErrorLocation>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorExtensions {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub type_name: Option<String>,
    #[serde(default)]
    pub page_size: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorLocation {
    pub line: u32,
    pub column: u32,
}

#[derive(Debug, Deserialize)]
pub struct QueryResponse {
    pub data: Option<ResponseData>,
}

#[derive(Debug, Deserialize)]
pub struct ResponseData {
    pub organization: Option<Organization>,
}

#[derive(Debug, Deserialize)]
pub struct Organization {
    pub login: String,
    pub repositories: Repositories,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Repositories {
    pub total_count: u64,
    #[serde(default)]
    pub nodes: Vec<Repository>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Repository {
    pub name: String,
    pub pull_requests: PullRequestConnection,
}

#[derive(Debug, Deserialize)]
pub struct PullRequestConnection {
    #[serde(default)]
    pub nodes: Vec<PullRequestNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullRequestNode {
    pub number: u64,
    pub title: String,
    pub author: Option<Author>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct Author {
    pub login: String,
}

#[derive(Debug, Deserialize)]
pub struct Edge {
    pub cursor: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn node(author: Option<&str>) -> PullRequestNode {
        PullRequestNode {
            number: 42,
            title: "Bump deps".to_string(),
            author: author.map(|login| Author {
                login: login.to_string(),
            }),
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_record_age_relative_to_now() {
        let now = Utc.with_ymd_and_hms(2024, 1, 11, 0, 0, 0).unwrap();
        let record = PullRequestRecord::from_node("acme", "widgets", node(Some("octocat")), now);
        assert_eq!(record.age, Duration::days(10));
        assert_eq!(record.author, "octocat");
        assert_eq!(record.web_path(), "github.com/acme/widgets/pull/42");
    }

    #[test]
    fn test_record_missing_author_is_ghost() {
        let now = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
        let record = PullRequestRecord::from_node("acme", "widgets", node(None), now);
        assert_eq!(record.author, GHOST_LOGIN);
    }

    #[test]
    fn test_decode_page() {
        let body = r#"{
            "data": {
                "organization": {
                    "login": "acme",
                    "repositories": {
                        "totalCount": 2,
                        "nodes": [
                            {"name": "empty", "pullRequests": {"nodes": []}},
                            {"name": "widgets", "pullRequests": {"nodes": [
                                {"number": 7, "title": "Fix", "author": null, "createdAt": "2023-05-01T12:00:00Z"}
                            ]}}
                        ],
                        "edges": [{"cursor": "a"}, {"cursor": "b"}]
                    }
                }
            }
        }"#;
        let response: QueryResponse = serde_json::from_str(body).unwrap();
        let org = response.data.unwrap().organization.unwrap();
        assert_eq!(org.login, "acme");
        assert_eq!(org.repositories.total_count, 2);
        assert_eq!(org.repositories.edges.len(), 2);
        let pr = &org.repositories.nodes[1].pull_requests.nodes[0];
        assert_eq!(pr.number, 7);
        assert!(pr.author.is_none());
        assert_eq!(
            pr.created_at,
            Utc.with_ymd_and_hms(2023, 5, 1, 12, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_decode_error_envelope() {
        let body = r#"{
            "errors": [{
                "path": ["organization"],
                "extensions": {"code": "undefinedField", "typeName": "Query"},
                "locations": [{"line": 3, "column": 5}],
                "message": "Could not resolve to an Organization"
            }],
            "data": {"organization": null}
        }"#;
        let envelope: ErrorEnvelope = serde_json::from_str(body).unwrap();
        let errors = envelope.errors.unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "Could not resolve to an Organization");
        assert_eq!(errors[0].locations.as_ref().unwrap()[0].line, 3);
        assert_eq!(
            errors[0].extensions.as_ref().unwrap().code.as_deref(),
            Some("undefinedField")
        );
    }

    #[test]
    fn test_decode_success_has_no_errors() {
        let envelope: ErrorEnvelope = serde_json::from_str(r#"{"data": {}}"#).unwrap();
        assert!(envelope.errors.is_none());
    }
}
