use anyhow::Result;
use clap::{Args, Subcommand};

use acsdash_lib::{CredentialResolver, FileKeyStore};

#[derive(Args)]
pub struct KeyArgs {
    #[command(subcommand)]
    pub command: KeyCommand,
}

#[derive(Subcommand)]
pub enum KeyCommand {
    /// Validate a key against the live API and save it on success
    Set {
        /// The Census API key to validate and save
        key: String,
    },
    /// Remove the saved key
    Clear,
    /// Show where the key currently resolves from
    Show,
}

pub async fn run(args: &KeyArgs) -> Result<()> {
    let resolver =
        CredentialResolver::new(Box::new(FileKeyStore::new(crate::default_key_path())));

    match &args.command {
        KeyCommand::Set { key } => {
            // Validation goes straight to the API, never through the cache.
            let client = acsdash_lib::acsdash_api::Client::new();
            resolver.validate_key(&client, key).await?;
            println!("Key validated and saved.");
        }
        KeyCommand::Clear => {
            resolver.clear()?;
            println!("Saved key removed.");
        }
        KeyCommand::Show => match resolver.api_key() {
            Some(key) => println!("Key configured ({}).", mask(&key)),
            None => println!("No key configured. Set CENSUS_API_KEY or run `acsdash key set`."),
        },
    }

    Ok(())
}

/// First four characters, rest elided.
fn mask(key: &str) -> String {
    if key.len() <= 4 {
        "****".to_string()
    } else {
        format!("{}****", &key[..4])
    }
}
