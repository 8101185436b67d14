mod activity;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::activity::ActivityArgs;

#[derive(Debug, Parser)]
#[command(name = "pulse-cli")]
#[command(about = "Fetch, filter, sort, and export social-profile activity")]
struct Cli {
    /// API key for the activity API
    #[arg(long, env = "NIMBLE_API_KEY", hide_env_values = true, global = true)]
    api_key: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch recent posts for one or more profiles and show a filtered view
    Activity(ActivityArgs),
    /// Print raw company page data as JSON
    Company {
        /// Company page URLs
        #[arg(required = true)]
        urls: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = pulse_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    let plain = config.env.plain_logs();
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_ansi(!plain)
        .with_target(!plain)
        .init();
    tracing::debug!(env = %config.env, "configuration loaded");

    if let Some(key) = cli.api_key.filter(|k| !k.is_empty()) {
        config.api_key = Some(key);
    }

    match cli.command {
        Some(Commands::Activity(args)) => {
            let today = chrono::Utc::now().date_naive();
            activity::run_activity(&config, &args, today).await?;
        }
        Some(Commands::Company { urls }) => {
            let client = activity::build_client(&config)?;
            let data = client.get_company_data(&urls).await?;
            println!("{}", serde_json::to_string_pretty(&data)?);
        }
        None => println!("pulse-cli: run `pulse-cli --help` for available commands"),
    }

    Ok(())
}
