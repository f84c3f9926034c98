//! Integer-alphabet automaton toolkit

use clap::Parser;
use cp_automaton::{Config, Result, VERSION, cli, codec, init_logging};

fn main() -> Result<()> {
    let args = cli::Cli::parse();

    let config = if let Some(config_path) = &args.config {
        Config::from_file(config_path)?
    } else {
        Config::load()?
    };

    let level = args.log_level.as_deref().unwrap_or(&config.logging.level);
    init_logging(level);

    tracing::info!("cp-automaton v{}", VERSION);
    tracing::debug!("Parsed arguments: {:?}", args);
    tracing::debug!("Loaded configuration: {:?}", config);

    codec::init();

    cli::execute(args, config)?;

    Ok(())
}
