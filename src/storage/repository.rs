use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbBackend, EntityTrait,
    ModelTrait, QueryFilter, QueryOrder, QuerySelect, Select, Set, TransactionTrait,
};

use crate::{
    error::{AppError, Result},
    model::{TodoWithOwner, todo, user},
};

/// Todo and user operations over an injected database connection.
///
/// Cloning is cheap: the underlying connection is a shared pool.
#[derive(Clone)]
pub struct TodoRepository {
    db: DatabaseConnection,
}

impl TodoRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn into_connection(self) -> DatabaseConnection {
        self.db
    }

    pub async fn create_todo(&self, text: String, user_id: i32) -> Result<TodoWithOwner> {
        tracing::info!(user_id, "Creating todo");

        let todo = todo::ActiveModel {
            text: Set(text),
            done: Set(false),
            user_id: Set(user_id),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        let owner = todo.find_related(user::Entity).one(&self.db).await?;
        Ok(TodoWithOwner::new(todo, owner))
    }

    /// Replace the text of a todo, keeping every other field.
    ///
    /// The read and the write run in one transaction.
    pub async fn update_todo(&self, id: i32, text: String) -> Result<TodoWithOwner> {
        tracing::info!(id, "Updating todo");

        let txn = self.db.begin().await?;
        let backend = txn.get_database_backend();

        let existing = lock_todo(id, backend)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::todo_not_found(id))?;

        let mut active: todo::ActiveModel = existing.into();
        active.text = Set(text);
        let updated = active.update(&txn).await?;
        let owner = updated.find_related(user::Entity).one(&txn).await?;

        txn.commit().await?;
        Ok(TodoWithOwner::new(updated, owner))
    }

    /// Delete a todo and return the row as it was before deletion.
    pub async fn delete_todo(&self, id: i32) -> Result<TodoWithOwner> {
        tracing::info!(id, "Deleting todo");

        let txn = self.db.begin().await?;
        let backend = txn.get_database_backend();

        let todo = lock_todo(id, backend)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::todo_not_found(id))?;
        let owner = todo.find_related(user::Entity).one(&txn).await?;

        todo::Entity::delete_by_id(todo.id).exec(&txn).await?;
        txn.commit().await?;

        Ok(TodoWithOwner::new(todo, owner))
    }

    pub async fn create_user(&self, name: String) -> Result<user::Model> {
        tracing::info!(name = %name, "Creating user");

        let user = user::ActiveModel {
            name: Set(name),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;
        Ok(user)
    }

    /// All todos in id order, each with its owner joined in.
    pub async fn list_todos(&self) -> Result<Vec<TodoWithOwner>> {
        let rows = todo::Entity::find()
            .find_also_related(user::Entity)
            .order_by_asc(todo::Column::Id)
            .all(&self.db)
            .await?;
        tracing::debug!(count = rows.len(), "Listed todos");
        Ok(rows.into_iter().map(TodoWithOwner::from).collect())
    }

    pub async fn list_users(&self) -> Result<Vec<user::Model>> {
        let users = user::Entity::find()
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await?;
        tracing::debug!(count = users.len(), "Listed users");
        Ok(users)
    }

    pub async fn get_todo(&self, id: i32) -> Result<TodoWithOwner> {
        todo::Entity::find_by_id(id)
            .find_also_related(user::Entity)
            .one(&self.db)
            .await?
            .map(TodoWithOwner::from)
            .ok_or_else(|| AppError::todo_not_found(id))
    }

    /// Todos owned by `user_id`, in id order. Unknown users own nothing.
    pub async fn todos_for_user(&self, user_id: i32) -> Result<Vec<todo::Model>> {
        let todos = todo::Entity::find()
            .filter(todo::Column::UserId.eq(user_id))
            .order_by_asc(todo::Column::Id)
            .all(&self.db)
            .await?;
        Ok(todos)
    }
}

/// Select one todo row, locked for the rest of the transaction.
///
/// Only the todo table is locked: PostgreSQL rejects `FOR UPDATE` on the
/// nullable side of an outer join, so owners are loaded separately.
fn lock_todo(id: i32, backend: DbBackend) -> Select<todo::Entity> {
    for_update(todo::Entity::find_by_id(id), backend)
}

/// Lock the selected rows until the transaction ends. SQLite has no row
/// locks; its write transaction already serializes writers.
fn for_update<S: QuerySelect>(select: S, backend: DbBackend) -> S {
    match backend {
        DbBackend::Sqlite => select,
        _ => select.lock_exclusive(),
    }
}
