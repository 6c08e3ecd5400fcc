mod commands;
mod output;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};

use acsdash_lib::cache::ResponseCache;
use acsdash_lib::{CachedClient, CredentialResolver, FileKeyStore, Pipeline};

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "acsdash")]
#[command(about = "Query Census ACS demographic concentration data")]
struct Cli {
    /// Output format: table or json
    #[arg(long, default_value = "table", global = true)]
    output: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the full concentration dataset for one population group
    Load(commands::load::LoadArgs),
    /// Look up a single ZIP code tabulation area
    Zip(commands::lookup::ZipArgs),
    /// Look up a single place by state and place code
    Place(commands::lookup::PlaceArgs),
    /// Look up a place by city name
    City(commands::lookup::CityArgs),
    /// List every place within a state
    Places(commands::lookup::PlacesArgs),
    /// Manage the saved Census API key
    Key(commands::key::KeyArgs),
}

/// `~/.config/acsdash/api_key.json`, falling back to the working
/// directory when no home is set.
fn default_key_path() -> PathBuf {
    match std::env::var_os("HOME") {
        Some(home) => PathBuf::from(home).join(".config/acsdash/api_key.json"),
        None => PathBuf::from(".acsdash_key.json"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("acsdash_lib=info".parse().unwrap()),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let format = match cli.output.as_str() {
        "json" => OutputFormat::Json,
        _ => OutputFormat::Table,
    };

    let cache = ResponseCache::new(Duration::from_secs(300));
    let client = CachedClient::new(cache);
    let credentials = CredentialResolver::new(Box::new(FileKeyStore::new(default_key_path())));
    let pipeline = Pipeline::new(client, credentials);

    match cli.command {
        Commands::Load(args) => commands::load::run(args, pipeline, &format).await?,
        Commands::Zip(args) => commands::lookup::run_zip(&args, &pipeline, &format).await?,
        Commands::Place(args) => commands::lookup::run_place(&args, &pipeline, &format).await?,
        Commands::City(args) => commands::lookup::run_city(&args, &pipeline, &format).await?,
        Commands::Places(args) => commands::lookup::run_places(&args, &pipeline, &format).await?,
        Commands::Key(args) => commands::key::run(&args).await?,
    }

    Ok(())
}
