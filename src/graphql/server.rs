use async_graphql::http::{GraphQLPlaygroundConfig, playground_source};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    Router,
    extract::State,
    response::Html,
    routing::{get, post},
};

use crate::config::ServerSettings;
use crate::error::Result;

use super::TodoSchema;

async fn graphql_handler(
    State(schema): State<TodoSchema>,
    req: GraphQLRequest,
) -> GraphQLResponse {
    schema.execute(req.into_inner()).await.into()
}

/// Build the HTTP router: the GraphQL endpoint at `settings.path`, plus the
/// playground page at `/` when enabled.
pub fn router(schema: TodoSchema, settings: &ServerSettings) -> Router {
    let mut app = Router::new();

    if settings.playground {
        let page = Html(playground_source(GraphQLPlaygroundConfig::new(&settings.path)));
        let playground = get(move || std::future::ready(page.clone()));
        if settings.path == "/" {
            return app
                .route("/", playground.post(graphql_handler))
                .with_state(schema);
        }
        app = app.route("/", playground);
    }

    app.route(&settings.path, post(graphql_handler))
        .with_state(schema)
}

/// Serve until Ctrl-C is received.
pub async fn run_server(schema: TodoSchema, settings: &ServerSettings) -> Result<()> {
    settings.validate()?;
    let listener = tokio::net::TcpListener::bind(settings.address()).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        path = %settings.path,
        "GraphQL server listening"
    );

    axum::serve(listener, router(schema, settings))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("GraphQL server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}
