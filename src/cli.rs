//! Command line interface built on clap.
//!
//! [`Cli`] carries the subcommands in [`Command`] (demo, repair, roster)
//! and the global flags (--seed, --json, --verbose).

use clap::{Parser, Subcommand};

/// Auto repair shop simulator.
#[derive(Debug, Parser)]
#[command(name = "repair-shop", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Seed for every random source; overrides the config file.
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Print request outcomes as JSON instead of narration.
    #[arg(long, global = true, default_value_t = false)]
    pub json: bool,

    /// Enable debug logging.
    #[arg(long, short, global = true, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Send every configured client to the shop once.
    Demo,

    /// File a single repair request.
    Repair {
        /// Vehicle identification number.
        vin: String,

        /// Vehicle model name.
        model: String,

        /// Name of the requesting client.
        #[arg(long, default_value = "walk-in")]
        client: String,

        /// Mechanic to assign; picked at random when omitted.
        #[arg(long)]
        mechanic: Option<String>,
    },

    /// Show the configured clients, mechanics and vehicles.
    Roster,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parses_repair_subcommand() {
        let cli = Cli::parse_from(["repair-shop", "repair", "VIN0001", "Toyota", "--client", "Anna"]);
        match cli.command {
            Command::Repair {
                vin,
                model,
                client,
                mechanic,
            } => {
                assert_eq!(vin, "VIN0001");
                assert_eq!(model, "Toyota");
                assert_eq!(client, "Anna");
                assert!(mechanic.is_none());
            }
            _ => panic!("expected Repair command"),
        }
    }

    #[test]
    fn repair_client_defaults_to_walk_in() {
        let cli = Cli::parse_from(["repair-shop", "repair", "VIN0002", "Ford", "--mechanic", "Ivan"]);
        match cli.command {
            Command::Repair {
                client, mechanic, ..
            } => {
                assert_eq!(client, "walk-in");
                assert_eq!(mechanic.as_deref(), Some("Ivan"));
            }
            _ => panic!("expected Repair command"),
        }
    }

    #[test]
    fn cli_parses_global_flags() {
        let cli = Cli::parse_from(["repair-shop", "--seed", "42", "--json", "--verbose", "demo"]);
        assert!(cli.verbose);
        assert!(cli.json);
        assert_eq!(cli.seed, Some(42));
        assert!(matches!(cli.command, Command::Demo));
    }

    #[test]
    fn cli_verify() {
        Cli::command().debug_assert();
    }
}
