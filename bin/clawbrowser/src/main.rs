mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "clawbrowser")]
#[command(about = "Inspect the resolved clawd browser configuration", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (default: ~/.clawdbot/clawdbot.json)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show control and CDP endpoints and launch flags
    Status,

    /// Inspect browser profiles
    Profiles {
        #[command(subcommand)]
        command: ProfilesCommands,
    },

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ProfilesCommands {
    /// List every profile with its CDP endpoint
    List,
    /// Show one resolved profile as JSON
    Show {
        /// Profile name
        name: String,
    },
    /// Suggest the CDP port and color for a new profile
    Next {
        /// Profile name
        name: String,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Print the fully resolved browser configuration as JSON
    Show,
    /// Print the browser section as written in the config file
    Raw,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup tracing
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config = cli.config.as_deref();

    match cli.command {
        Commands::Status => {
            commands::status::run(config)?;
        }
        Commands::Profiles { command } => match command {
            ProfilesCommands::List => {
                commands::profiles::list(config)?;
            }
            ProfilesCommands::Show { name } => {
                commands::profiles::show(config, &name)?;
            }
            ProfilesCommands::Next { name } => {
                commands::profiles::next(config, &name)?;
            }
        },
        Commands::Config { command } => match command {
            ConfigCommands::Show => {
                commands::config_cmd::show(config)?;
            }
            ConfigCommands::Raw => {
                commands::config_cmd::raw(config)?;
            }
        },
    }

    Ok(())
}
