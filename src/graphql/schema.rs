use async_graphql::{
    Context, EmptySubscription, ErrorExtensions, Object, Schema, extensions::Tracing,
};

use crate::error::AppError;
use crate::storage::TodoRepository;

use super::types::*;

pub type TodoSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

pub fn build_schema(repo: TodoRepository) -> TodoSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(repo)
        .extension(Tracing)
        .finish()
}

/// The schema in SDL form. Needs no database.
pub fn export_sdl() -> String {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .finish()
        .sdl()
}

fn get_repo<'a>(ctx: &'a Context<'_>) -> async_graphql::Result<&'a TodoRepository> {
    ctx.data::<TodoRepository>()
}

fn graphql_error(e: AppError) -> async_graphql::Error {
    if !e.is_not_found() {
        tracing::error!(error = %e, "Request failed");
    }
    e.extend()
}

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// List all todos with their owners
    async fn todos(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<Todo>> {
        let repo = get_repo(ctx)?;
        let todos = repo.list_todos().await.map_err(graphql_error)?;
        Ok(todos.into_iter().map(Todo::from).collect())
    }

    /// List all users
    async fn users(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<User>> {
        let repo = get_repo(ctx)?;
        let users = repo.list_users().await.map_err(graphql_error)?;
        Ok(users.into_iter().map(User::from).collect())
    }

    /// Fetch a single todo by ID
    async fn todo(&self, ctx: &Context<'_>, input: FetchTodo) -> async_graphql::Result<Todo> {
        let repo = get_repo(ctx)?;
        let todo = repo.get_todo(input.id).await.map_err(graphql_error)?;
        Ok(todo.into())
    }
}

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Create a todo owned by an existing user
    async fn create_todo(&self, ctx: &Context<'_>, input: NewTodo) -> async_graphql::Result<Todo> {
        let repo = get_repo(ctx)?;
        let todo = repo
            .create_todo(input.text, input.user_id)
            .await
            .map_err(graphql_error)?;
        Ok(todo.into())
    }

    /// Replace the text of a todo
    async fn update_todo(&self, ctx: &Context<'_>, input: EditTodo) -> async_graphql::Result<Todo> {
        let repo = get_repo(ctx)?;
        let todo = repo
            .update_todo(input.id, input.text)
            .await
            .map_err(graphql_error)?;
        Ok(todo.into())
    }

    /// Delete a todo, returning it as it was before deletion
    async fn delete_todo(&self, ctx: &Context<'_>, input: i32) -> async_graphql::Result<Todo> {
        let repo = get_repo(ctx)?;
        let todo = repo.delete_todo(input).await.map_err(graphql_error)?;
        Ok(todo.into())
    }

    /// Create a user
    async fn create_user(&self, ctx: &Context<'_>, input: NewUser) -> async_graphql::Result<User> {
        let repo = get_repo(ctx)?;
        let user = repo.create_user(input.name).await.map_err(graphql_error)?;
        Ok(user.into())
    }
}
