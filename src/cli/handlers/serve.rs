use crate::graphql::{build_schema, run_server};
use anyhow::Result;
use colored::Colorize;

use super::CommandContext;

pub fn handle_serve(
    mut ctx: CommandContext,
    port: Option<u16>,
    host: Option<String>,
    no_playground: bool,
) -> Result<()> {
    if let Some(port) = port {
        ctx.config.server.port = port;
    }
    if let Some(host) = host {
        ctx.config.server.host = host;
    }
    if no_playground {
        ctx.config.server.playground = false;
    }
    let settings = ctx.config.server.clone();
    settings.validate()?;

    tokio::runtime::Runtime::new()?.block_on(async {
        let repo = ctx.repository().await?;
        let schema = build_schema(repo.clone());

        let base = format!("http://{}", settings.address());
        println!(
            "Starting GraphQL server on {}{}",
            base.cyan(),
            settings.path.cyan()
        );
        if settings.playground {
            println!("GraphQL Playground: {}/", base.cyan());
        }

        let served = run_server(schema, &settings).await;

        // Close the pool whether or not the server exited cleanly
        repo.into_connection().close().await?;
        served?;
        Ok::<(), anyhow::Error>(())
    })
}
