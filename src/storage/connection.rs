use std::time::Duration;

use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbBackend, EntityTrait, Schema,
    Statement,
};
use url::Url;

use crate::config::DatabaseSettings;
use crate::error::{AppError, Result};
use crate::model::{todo, user};

/// Idle timeout and lifetime for the single in-memory SQLite connection.
/// Recycling it would drop every table and row.
const IN_MEMORY_KEEPALIVE: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);

/// Open the database described by `settings` and make sure the schema exists.
///
/// For MySQL and PostgreSQL with a configured `name`, the database is created
/// on the server if absent and then selected. For SQLite the database file is
/// created on first use.
pub async fn connect(settings: &DatabaseSettings) -> Result<DatabaseConnection> {
    settings.validate()?;
    let backend = backend_for(&settings.url)?;

    let url = match backend {
        DbBackend::Sqlite => sqlite_url(&settings.url)?,
        _ => match &settings.name {
            Some(name) => {
                ensure_database(settings, backend, name).await?;
                url_with_database(&settings.url, name)?
            }
            None => settings.url.clone(),
        },
    };

    tracing::info!(backend = ?backend, "Connecting to database");
    let db = Database::connect(connect_options(&url, settings)).await?;
    ensure_schema(&db).await?;
    Ok(db)
}

/// Create the `user` and `todo` tables from their entity definitions when
/// they do not exist yet. Existing tables are left untouched.
pub async fn ensure_schema<C: ConnectionTrait>(db: &C) -> Result<()> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    // user first: todo carries the foreign key
    create_table_if_absent(db, &schema, user::Entity).await?;
    create_table_if_absent(db, &schema, todo::Entity).await?;
    Ok(())
}

async fn create_table_if_absent<C, E>(db: &C, schema: &Schema, entity: E) -> Result<()>
where
    C: ConnectionTrait,
    E: EntityTrait,
{
    let table = entity.table_name().to_string();
    let mut stmt = schema.create_table_from_entity(entity);
    stmt.if_not_exists();
    db.execute(db.get_database_backend().build(&stmt)).await?;
    tracing::debug!(table = %table, "Ensured table exists");
    Ok(())
}

pub fn backend_for(url: &str) -> Result<DbBackend> {
    let scheme = url.split(':').next().unwrap_or_default();
    match scheme {
        "sqlite" => Ok(DbBackend::Sqlite),
        "mysql" => Ok(DbBackend::MySql),
        "postgres" | "postgresql" => Ok(DbBackend::Postgres),
        _ => Err(AppError::Config(format!(
            "Unsupported database URL scheme: {:?}",
            scheme
        ))),
    }
}

fn connect_options(url: &str, settings: &DatabaseSettings) -> ConnectOptions {
    // Each in-memory SQLite connection is its own database
    let in_memory = is_in_memory(url);
    let max_connections = if in_memory {
        1
    } else {
        settings.max_connections
    };

    let mut opt = ConnectOptions::new(url.to_string());
    opt.max_connections(max_connections)
        .min_connections(settings.min_connections.min(max_connections))
        .connect_timeout(Duration::from_secs(settings.connect_timeout))
        .sqlx_logging(settings.logging);
    if in_memory {
        opt.idle_timeout(IN_MEMORY_KEEPALIVE)
            .max_lifetime(IN_MEMORY_KEEPALIVE);
    }
    opt
}

fn is_in_memory(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

/// Normalize a SQLite URL so the database file is created when missing.
///
/// Query parameters from the configured URL are kept; `mode=rwc` is only
/// added when no `mode` is given.
fn sqlite_url(url: &str) -> Result<String> {
    if is_in_memory(url) {
        return Ok(url.to_string());
    }

    let rest = url
        .trim_start_matches("sqlite://")
        .trim_start_matches("sqlite:");
    let (path, query) = rest.split_once('?').unwrap_or((rest, ""));
    if path.is_empty() {
        return Err(AppError::Config(format!(
            "SQLite URL has no file path: {:?}",
            url
        )));
    }

    let mut params: Vec<&str> = query.split('&').filter(|p| !p.is_empty()).collect();
    let mode = params.iter().find_map(|&p| p.strip_prefix("mode="));
    if mode.is_none() {
        params.push("mode=rwc");
    }

    if mode.unwrap_or("rwc") == "rwc" {
        if let Some(parent) = std::path::Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
    }

    Ok(format!("sqlite:{}?{}", path, params.join("&")))
}

/// Replace the path component of a server URL with the database name.
pub fn url_with_database(url: &str, name: &str) -> Result<String> {
    let mut parsed = Url::parse(url)?;
    parsed.set_path(&format!("/{}", name));
    Ok(parsed.to_string())
}

async fn ensure_database(
    settings: &DatabaseSettings,
    backend: DbBackend,
    name: &str,
) -> Result<()> {
    let server = Database::connect(connect_options(&settings.url, settings)).await?;

    match backend {
        DbBackend::MySql => {
            server
                .execute(Statement::from_string(
                    backend,
                    format!("CREATE DATABASE IF NOT EXISTS `{}`", name),
                ))
                .await?;
        }
        DbBackend::Postgres => {
            let existing = server
                .query_one(Statement::from_sql_and_values(
                    backend,
                    "SELECT 1 FROM pg_database WHERE datname = $1",
                    [name.into()],
                ))
                .await?;
            if existing.is_none() {
                server
                    .execute(Statement::from_string(
                        backend,
                        format!("CREATE DATABASE \"{}\"", name),
                    ))
                    .await?;
            }
        }
        _ => {}
    }

    tracing::info!(database = %name, "Ensured database exists");
    server.close().await?;
    Ok(())
}
