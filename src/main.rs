mod cli;
mod config;
mod error;
mod shop;
mod ui;
mod workshop;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command};
use config::ShopConfig;
use shop::{Client, EventSink, Roster, TracingSink};
use ui::ConsoleSink;
use workshop::Workshop;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("repair_shop=debug")
        } else {
            EnvFilter::new("repair_shop=warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let mut config = ShopConfig::load()?;
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    let roster = Roster::from_config(&config)?;
    let mut console = ConsoleSink::new();
    let mut quiet = TracingSink;
    let sink: &mut dyn EventSink = if cli.json { &mut quiet } else { &mut console };

    match cli.command {
        Command::Demo => {
            let mut shop = Workshop::new(roster, config.seed);
            let outcomes = shop.run(sink)?;
            report(&outcomes, cli.json)
        }
        Command::Repair {
            vin,
            model,
            client,
            mechanic,
        } => {
            let mut shop = Workshop::new(roster, config.seed);
            let client = Client::new(client);
            let outcome = shop.repair_one(&client, &vin, &model, mechanic.as_deref(), sink)?;
            report(&[outcome], cli.json)
        }
        Command::Roster => {
            println!("Clients:   {}", config.clients.join(", "));
            println!("Mechanics: {}", config.mechanics.join(", "));
            println!("Vehicles:");
            for vehicle in &roster.vehicles {
                println!("  {vehicle}");
            }
            Ok(())
        }
    }
}

fn report(outcomes: &[workshop::RequestOutcome], json: bool) -> Result<()> {
    if json {
        ui::print_json(outcomes)
    } else {
        ui::print_summary(outcomes);
        Ok(())
    }
}
