//! capconf CLI - capacity-scheduler queue configuration checker
//!
//! Usage: capconf <COMMAND>
//!
//! Commands:
//!   parse     Print the queue tree of a flat configuration
//!   validate  Run the validation rules over a flat configuration
//!   export    Write the normalized flat configuration

use clap::Parser;

mod cli;
mod commands;
mod ui;

use cli::{Cli, Commands};
use commands::{cmd_export, cmd_parse, cmd_validate, ValidateArgs};

fn main() {
    let cli = Cli::parse();
    capconf::logging::init(cli.verbose);
    tracing::debug!(command = cli.command.name(), "starting");

    let json = cli.json;
    let result = match cli.command {
        Commands::Parse { file } => cmd_parse(&file, json, cli.verbose, cli.color),
        Commands::Validate {
            file,
            context,
            legacy,
            flexible,
            strict_warnings,
        } => cmd_validate(
            ValidateArgs {
                file,
                context,
                legacy,
                flexible,
                strict_warnings,
            },
            json,
            cli.verbose,
            cli.color,
        ),
        Commands::Export { file, no_prefix } => {
            cmd_export(&file, no_prefix, json, cli.verbose, cli.color)
        }
    };

    if let Err(err) = result {
        ui::error::print_error(&err, json);
        std::process::exit(1);
    }
}
