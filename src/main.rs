mod cli;
mod client;
mod commands;
mod config;
mod error;
mod output;
#[cfg(test)]
mod test_support;
mod types;
mod view;

use std::error::Error;
use std::io;

use clap::{CommandFactory, Parser};
use clap_complete::generate;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, OutputFormat};
use client::DirectoryClient;
use config::Config;
use error::Result;
use view::Session;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {e}");

        // Show error chain if verbose flag was passed
        if std::env::args().any(|arg| arg == "--verbose" || arg == "-v") {
            let mut source = e.source();
            while let Some(cause) = source {
                eprintln!("Caused by: {cause}");
                source = cause.source();
            }
        }

        std::process::exit(1);
    }
}

/// Logs go to stderr; RUST_LOG wins over --verbose.
fn init_tracing(verbose: bool) {
    let default = if verbose { "userdir=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);
    output::set_json_output(cli.output_format() == OutputFormat::Json);
    output::set_quiet(cli.quiet);

    match cli.command {
        // Commands that don't require config/client
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "userdir", &mut io::stdout());
        }
        Commands::Init => {
            commands::init::run()?;
        }
        // Commands that require config and client
        command => {
            let config = Config::load()?;
            if let Commands::Endpoints = command {
                return commands::endpoints::list(&config);
            }

            let endpoint = config.initial_endpoint(cli.endpoint.as_deref(), cli.delete_style)?;
            tracing::debug!(endpoint = ?endpoint.as_ref().map(|e| &e.url), "starting session");
            let mut session = Session::new(DirectoryClient::new(), endpoint);

            match command {
                Commands::List => commands::users::list(&mut session).await?,
                Commands::Create { name } => commands::users::create(&mut session, &name).await?,
                Commands::Rename { id, name } => {
                    commands::users::rename(&mut session, &id, &name).await?;
                }
                Commands::Delete { id } => commands::users::delete(&mut session, &id).await?,
                Commands::Shell => {
                    commands::shell::run(&mut session, &config, cli.delete_style).await?;
                }
                Commands::Completions { .. } | Commands::Init | Commands::Endpoints => {
                    // Already handled above
                }
            }
        }
    }

    Ok(())
}
