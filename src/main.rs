use anyhow::{Context, Result};
use clap::Parser;

use graphql_crud::cli::handlers::{
    CommandContext, handle_init, handle_mutate, handle_query, handle_schema, handle_serve,
};
use graphql_crud::cli::{Cli, Commands};
use graphql_crud::config::AppConfig;
use graphql_crud::logging;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.log_file.as_deref());

    let result = run(cli);
    if let Err(e) = &result {
        tracing::error!(error = %format!("{:#}", e), "Command failed");
    }
    result
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Init { force } => {
            let cwd = std::env::current_dir()?;
            handle_init(&cwd, force)
        }
        Commands::Schema => handle_schema(),
        Commands::Serve {
            port,
            host,
            no_playground,
        } => {
            let ctx = load_context(cli.config, cli.database_url, cli.database_name)?;
            handle_serve(ctx, port, host, no_playground)
        }
        Commands::Query { query, variables } => {
            let ctx = load_context(cli.config, cli.database_url, cli.database_name)?;
            handle_query(ctx, query, variables)
        }
        Commands::Mutate {
            mutation,
            variables,
        } => {
            let ctx = load_context(cli.config, cli.database_url, cli.database_name)?;
            handle_mutate(ctx, mutation, variables)
        }
    }
}

fn load_context(
    config_path: Option<std::path::PathBuf>,
    database_url: Option<String>,
    database_name: Option<String>,
) -> Result<CommandContext> {
    let cwd = std::env::current_dir()?;
    let config = AppConfig::load(config_path.as_deref(), &cwd)
        .and_then(|c| c.with_overrides(database_url, database_name))
        .context("Failed to load configuration")?;
    Ok(CommandContext::new(config))
}
