use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

// Exit codes. Missing credentials and per-organization failures exit with
// EXIT_SUCCESS; only configuration and client setup abort with a code.
const EXIT_SUCCESS: i32 = 0;
const EXIT_NETWORK: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Parser, Debug)]
#[command(name = "find-org-pulls")]
#[command(about = "List open pull requests across GitHub organizations, bucketed by age", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging (per-page progress)
    #[arg(short, long)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/find-org-pulls/config.yaml)
    #[arg(short, long)]
    config: Option<String>,

    /// Organization to scan; repeat to scan several. Overrides the config file.
    #[arg(short, long = "org", value_name = "NAME")]
    orgs: Vec<String>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    find_org_pulls::logging::init(cli.verbose);

    let start_time = Instant::now();

    // Load config
    let config_path = cli.config.map(PathBuf::from);
    let mut config = match find_org_pulls::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };
    if let Err(e) = find_org_pulls::config::apply_org_overrides(&mut config, cli.orgs) {
        eprintln!("Config error: {:#}", e);
        std::process::exit(EXIT_CONFIG);
    }

    let Some(token) = find_org_pulls::credentials::get_token_from_env() else {
        eprintln!(
            "Failed to get github token: set {}",
            find_org_pulls::credentials::ENV_TOKEN_VAR
        );
        return;
    };

    let transport = match find_org_pulls::github::create_client(&token, &config.endpoint) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Failed to create GitHub client: {:#}", e);
            std::process::exit(EXIT_NETWORK);
        }
    };

    tracing::debug!(
        "Scanning {} organizations via {}",
        config.organizations.len(),
        transport.endpoint()
    );

    let collection =
        find_org_pulls::fetch::collect_pull_requests(Arc::new(transport), &config.organizations)
            .await;

    let failed = collection.failed().count();
    if failed > 0 {
        tracing::warn!(
            "{} of {} organizations failed; their pull requests are missing from the report",
            failed,
            config.organizations.len()
        );
    }

    let use_colors = find_org_pulls::output::should_use_colors();
    println!(
        "{}",
        find_org_pulls::output::format_report(&collection.records, use_colors)
    );

    tracing::debug!(
        "Total: {} PRs in {:?}",
        collection.records.len(),
        start_time.elapsed()
    );

    std::process::exit(EXIT_SUCCESS);
}
