//! Life Strategy Matrix command-line entry point.
//!
//! # Responsibility
//! - Resolve configuration from the environment and CLI flags.
//! - Route subcommands to the session-backed runners.

use clap::Parser;
use lifematrix_core::{init_logging_from_config, MatrixConfig};

mod cli;
mod commands;

use crate::cli::{Cli, Command};
use crate::commands::{run_chart, run_share, run_table};

fn main() {
    let cli = Cli::parse();
    let mut config = match MatrixConfig::from_env() {
        Ok(config) => config,
        Err(error) => {
            eprintln!("error: {error}");
            std::process::exit(2);
        }
    };
    if let Some(db_path) = cli.db_path {
        config.db_path = db_path;
    }
    if let Err(error) = init_logging_from_config(&config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }

    let result = match cli.command {
        Command::Ping => {
            println!("lifematrix_core ping={}", lifematrix_core::ping());
            println!("lifematrix_core version={}", lifematrix_core::core_version());
            Ok(0)
        }
        Command::Table(args) => run_table(&config, &args.session, &args.sort),
        Command::Chart(args) => run_chart(&config, &args),
        Command::Share(args) => run_share(&config, &args),
    };
    let exit_code = match result {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error}");
            1
        }
    };
    std::process::exit(exit_code);
}
