mod schema;

pub use schema::{Config, DEFAULT_ORGANIZATIONS};

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Get the config directory path (~/.config/find-org-pulls/)
pub fn get_config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".config").join("find-org-pulls"))
}

/// Get the default config file path (~/.config/find-org-pulls/config.yaml)
pub fn get_config_path() -> Option<PathBuf> {
    get_config_dir().map(|dir| dir.join("config.yaml"))
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional explicit path. If None, the default path is tried and
///   built-in defaults are used when it does not exist.
///
/// # Errors
///
/// Returns an error if:
/// - An explicit config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
/// - The resulting organization list is empty
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let config = match path {
        Some(explicit) => {
            if !explicit.exists() {
                anyhow::bail!("Config file not found at {}", explicit.display());
            }
            read_config(&explicit)?
        }
        None => match get_config_path() {
            Some(default_path) if default_path.exists() => read_config(&default_path)?,
            _ => Config::default(),
        },
    };

    validate(&config)?;
    Ok(config)
}

fn read_config(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file at {}", path.display()))?;
    parse_config(&content)
        .with_context(|| format!("Failed to parse config: invalid YAML in {}", path.display()))
}

fn parse_config(content: &str) -> Result<Config> {
    // An empty file means "all defaults"
    if content.trim().is_empty() {
        return Ok(Config::default());
    }
    let config: Config = serde_saphyr::from_str(content)?;
    Ok(config)
}

fn validate(config: &Config) -> Result<()> {
    if config.organizations.is_empty() {
        anyhow::bail!("No organizations configured");
    }
    if let Some(blank) = config.organizations.iter().find(|o| o.trim().is_empty()) {
        anyhow::bail!("Invalid organization name: {:?}", blank);
    }
    Ok(())
}

/// Replace configured organizations with ones given on the command line
pub fn apply_org_overrides(config: &mut Config, orgs: Vec<String>) -> Result<()> {
    if !orgs.is_empty() {
        config.organizations = orgs;
    }
    validate(config)
}
