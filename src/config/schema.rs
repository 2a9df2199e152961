use serde::{Deserialize, Serialize};

use crate::github::GITHUB_GRAPHQL_ENDPOINT;

/// Organizations scanned when the config file does not name any
pub const DEFAULT_ORGANIZATIONS: [&str; 5] =
    ["gdbu", "hatch1fy", "hatchify", "hatch-integrations", "vroomy"];

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default = "default_organizations")]
    pub organizations: Vec<String>,

    /// GraphQL endpoint, for GitHub Enterprise or a local stub
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            organizations: default_organizations(),
            endpoint: default_endpoint(),
        }
    }
}

fn default_organizations() -> Vec<String> {
    DEFAULT_ORGANIZATIONS.iter().map(|o| o.to_string()).collect()
}

fn default_endpoint() -> String {
    GITHUB_GRAPHQL_ENDPOINT.to_string()
}
