mod cli;
mod commands;
mod demo;
mod errors;
mod files;
mod ui;

use clap::Parser;
use log::LevelFilter;

use crate::cli::{SiftCli, SiftCliCommand};

fn main() {
    let cli = SiftCli::parse();
    init_logging(cli.verbose);

    let params_path = cli.params.as_deref();
    let result = match cli.command {
        SiftCliCommand::Pills => commands::show_pills(params_path, cli.format),
        SiftCliCommand::Filters => commands::list_filters(params_path, cli.format),
        SiftCliCommand::Set { key, values } => {
            commands::set_filter(params_path, key, values, cli.format)
        }
        SiftCliCommand::Op { key, operation } => {
            commands::set_operation(params_path, key, operation, cli.format)
        }
        SiftCliCommand::Clear { key } => commands::clear_filters(params_path, key, cli.format),
        SiftCliCommand::Browse => commands::browse_filters(params_path, cli.format),
    };

    if let Err(error) = result {
        ui::error(&error.to_string());
        std::process::exit(error.exit_code());
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}
