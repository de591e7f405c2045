//! Relational storage for todos and users.
//!
//! The database is reached through sea-orm, so SQLite, MySQL and PostgreSQL
//! URLs all work. Tables are created from the entity definitions on connect.
//!
//! ## Layout
//!
//! ```sql
//! user(id PK, name)
//! todo(id PK, text, done, user_id FK -> user.id)
//! ```
//!
//! ## Components
//!
//! - [`connect`]: open a connection and ensure the database and tables exist
//! - [`TodoRepository`]: create/read/update/delete operations behind the API

mod connection;
mod repository;

pub use connection::{backend_for, connect, ensure_schema, url_with_database};
pub use repository::TodoRepository;
