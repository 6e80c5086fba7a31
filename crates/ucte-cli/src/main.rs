use std::process;

use clap::Parser;
use tracing::{debug, error};
use tracing_subscriber::FmtSubscriber;
use ucte_cli::{load_config, Cli, Commands};

mod commands;

fn main() {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            process::exit(2);
        }
    };
    let level = match cli.log_level {
        Some(level) => level,
        None => config.logging.level().unwrap_or(tracing::Level::INFO),
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("setting default subscriber failed: {}", err);
    }
    debug!("Configuration: {:?}", config);

    let result = match &cli.command {
        Commands::Decode { file, json, strict } => commands::decode::handle(file, *json, *strict),
        Commands::Encode {
            input,
            output,
            trim,
            no_trim,
            force,
        } => {
            let trim = match (*trim, *no_trim) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            };
            commands::encode::handle(input, output, trim, *force, &config.encode)
        }
        Commands::Meta { file, json } => commands::meta::handle(file, *json),
        Commands::Areas { file, json } => commands::areas::handle(file, *json),
    };

    if let Err(err) = result {
        error!("{:#}", err);
        process::exit(1);
    }
}
