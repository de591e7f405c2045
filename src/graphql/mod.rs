//! GraphQL schema, resolvers and HTTP transport.
//!
//! ## Usage
//!
//! ```bash
//! # Start the GraphQL server
//! graphql-crud serve --port 8080
//!
//! # Execute a query from the CLI
//! graphql-crud query '{ todos { id text done user { name } } }'
//!
//! # Execute a mutation from the CLI
//! graphql-crud mutate 'createUser(input: { name: "Jamie" }) { id }'
//! ```
//!
//! ## Schema
//!
//! - **Queries**: `todos`, `users`, `todo`
//! - **Mutations**: `createTodo`, `updateTodo`, `deleteTodo`, `createUser`
//!
//! Queries never write. Lookups by id on a missing row fail with an error
//! whose `code` extension is `NOT_FOUND`.

mod schema;
mod server;
mod types;

pub use schema::{MutationRoot, QueryRoot, TodoSchema, build_schema, export_sdl};
pub use server::{router, run_server};
pub use types::*;
