use anyhow::Result;
use clap::Parser;
use log::info;

use kol_insights::cli::{Cli, Command};
use kol_insights::config::Config;
use kol_insights::logging;
use kol_insights::services::{KolService, Outcome};
use kol_insights::validation::TokenIdentifier;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.log_file.as_deref(), cli.debug)?;

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| "config/config.toml".into());
    let mut config = Config::load_or_default(&config_path)?;
    config.apply_env();
    config.override_base_url(cli.base_url.clone());
    config.validate()?;
    info!("Configuration loaded successfully.");

    let service = KolService::from_config(&config)?;

    match &cli.command {
        Command::Analyze { token } => {
            let id = match TokenIdentifier::parse(token) {
                Ok(id) => id,
                Err(e) => {
                    println!("{}", e);
                    return Ok(());
                }
            };
            let outcome = service.analyze(&id).await;
            print_outcome(&outcome, cli.json)?;
        }
        Command::Context => {
            let context = service.market_context().await;
            println!("{}", context.summary);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&context)?);
            }
        }
        listing => {
            if let Some(view) = listing.view() {
                let outcome = service.list(view).await;
                print_outcome(&outcome, cli.json)?;
            }
        }
    }

    Ok(())
}

fn print_outcome(outcome: &Outcome, json: bool) -> Result<()> {
    println!("{}", outcome.text());
    if json {
        println!("{}", serde_json::to_string_pretty(outcome)?);
    }
    Ok(())
}
