//! # graphql-crud - A GraphQL API over a relational database
//!
//! Todos and users stored in two related tables, exposed through a GraphQL
//! schema with three queries and four mutations. Storage goes through
//! sea-orm, so SQLite, MySQL and PostgreSQL all work; tables are created from
//! the entity definitions on startup.
//!
//! ## Quick Start
//!
//! ```bash
//! # Write a default config (SQLite file in the current directory)
//! graphql-crud init
//!
//! # Serve the API on http://127.0.0.1:8080/query
//! graphql-crud serve
//!
//! # Or talk to the database directly
//! graphql-crud mutate 'createUser(input: { name: "Jamie" }) { id name }'
//! graphql-crud query '{ users { id name todos { text } } }'
//! ```
//!
//! ## Modules
//!
//! - [`cli`]: Command-line interface definitions and handlers
//! - [`config`]: Configuration loading and overrides
//! - [`error`]: Error types and result aliases
//! - [`graphql`]: GraphQL schema, resolvers and HTTP server
//! - [`logging`]: Tracing subscriber setup (stderr and optional JSON file)
//! - [`model`]: Entity definitions (Todo, User)
//! - [`storage`]: Database connection and the todo repository

/// Command-line interface definitions using clap.
pub mod cli;

/// Configuration loading and management.
///
/// Handles `graphql-crud.toml` files and command-line/environment overrides.
pub mod config;

/// Error types and result aliases.
///
/// Defines the `AppError` enum and `Result<T>` type alias.
pub mod error;

/// GraphQL schema and resolvers.
///
/// Provides the async-graphql schema and the axum router serving it.
pub mod graphql;

/// Entity definitions for the `todo` and `user` tables.
pub mod model;

/// Relational storage layer.
///
/// Connects to the database, creates the schema, and implements every API
/// operation as a repository method.
pub mod storage;

/// Logging setup.
///
/// Installs the tracing subscriber: compact stderr output plus an optional
/// daily-rotated JSON file.
pub mod logging;
