use serde::Serialize;

/// Repositories requested per page
pub const PAGE_SIZE: u32 = 100;

/// Open pull requests requested per repository
pub const PULL_REQUESTS_PER_REPO: u32 = 10;

pub const ORG_PULL_REQUESTS_QUERY: &str = r#"
query getAllRepos($orgName: String!, $after: String, $pageSize: Int!) {
  organization(login: $orgName) {
    login
    repositories(first: $pageSize, orderBy: {field: NAME, direction: ASC}, after: $after) {
      totalCount
      nodes {
        name
        pullRequests(first: 10, states: OPEN) {
          nodes {
            number
            title
            author {
              login
            }
            createdAt
          }
        }
      }
      edges {
        cursor
      }
    }
  }
}
"#;

/// POST body for one page of the organization query
#[derive(Debug, Clone, Serialize)]
pub struct GraphQlRequest {
    pub query: &'static str,
    pub variables: QueryVariables,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryVariables {
    pub org_name: String,
    /// Serialized as `null` on the first page
    pub after: Option<String>,
    pub page_size: u32,
}

impl GraphQlRequest {
    /// Request for the first page of an organization's repositories
    pub fn first_page(org_name: &str) -> Self {
        Self {
            query: ORG_PULL_REQUESTS_QUERY,
            variables: QueryVariables {
                org_name: org_name.to_string(),
                after: None,
                page_size: PAGE_SIZE,
            },
        }
    }

    /// Move the request forward to the page after `cursor`
    pub fn advance(&mut self, cursor: String) {
        self.variables.after = Some(cursor);
    }
}
