mod init;
mod mutate;
mod query;
mod schema;
mod serve;

pub use init::handle_init;
pub use mutate::handle_mutate;
pub use query::handle_query;
pub use schema::handle_schema;
pub use serve::handle_serve;

use crate::config::AppConfig;
use crate::storage::{TodoRepository, connect};
use anyhow::{Context, Result};

/// Common context passed to command handlers that touch the database
pub struct CommandContext {
    pub config: AppConfig,
}

impl CommandContext {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Connect to the configured database and ensure the schema exists.
    pub async fn repository(&self) -> Result<TodoRepository> {
        let db = connect(&self.config.database)
            .await
            .context("Failed to connect to database")?;
        Ok(TodoRepository::new(db))
    }
}

pub(crate) fn parse_variables(variables: Option<String>) -> Result<async_graphql::Variables> {
    match variables {
        Some(v) => serde_json::from_str(&v).context("Variables must be a JSON object"),
        None => Ok(async_graphql::Variables::default()),
    }
}

/// Execute one request against a fresh connection and print the JSON response.
pub(crate) fn execute_and_print(
    ctx: CommandContext,
    request: async_graphql::Request,
) -> Result<()> {
    tokio::runtime::Runtime::new()?.block_on(async {
        let repo = ctx.repository().await?;
        let schema = crate::graphql::build_schema(repo.clone());
        let response = schema.execute(request).await;

        println!("{}", serde_json::to_string_pretty(&response)?);

        repo.into_connection().close().await?;
        Ok::<(), anyhow::Error>(())
    })
}
