use clap::Parser;
use colored::Colorize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use serenity::cli::args::{Cli, Commands};
use serenity::cli::commands;
use serenity::config::{Config, Paths};
use serenity::error::SerenityError;
use serenity::storage::Database;

/// Environment variable holding the log filter.
const LOG_ENV: &str = "SERENITY_LOG";

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Initialize tracing with output to stderr so stdout stays clean for results
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run() -> Result<(), SerenityError> {
    init_tracing();

    let cli = Cli::parse();
    let paths = Paths::new()?;
    let config = Config::load_from_path(&paths.config_file)?;
    config.general.color.apply();
    let format = cli.output.unwrap_or(config.general.default_output);

    let command = cli.command.unwrap_or(Commands::Home);
    if let Commands::Completions { shell, install } = command {
        println!("{}", commands::completions(shell, install)?);
        return Ok(());
    }

    let mut db = Database::open_with(&paths)?;
    let runtime = tokio::runtime::Runtime::new()?;

    let output = match command {
        Commands::Home => commands::home(&db, format)?,
        Commands::Mood(args) => commands::mood(&mut db, args.command, format)?,
        Commands::Journal(args) => runtime.block_on(commands::journal(
            &mut db,
            &config.companion,
            args.command,
            format,
        ))?,
        Commands::Chat(args) => runtime.block_on(commands::chat(&config.companion, args, format))?,
        Commands::Breathe(args) => {
            runtime.block_on(commands::breathe(&config.breathing, args, format))?
        }
        Commands::Completions { .. } => String::new(),
    };

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}
