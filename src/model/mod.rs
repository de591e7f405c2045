//! Entity definitions.
//!
//! - [`todo`]: the `todo` table, owned by a user through `user_id`
//! - [`user`]: the `user` table, with the derived `todos` back-reference
//! - [`TodoWithOwner`]: a todo joined with its owning user

pub mod todo;
pub mod user;

/// A todo row together with its eagerly resolved owner.
///
/// The owner is `None` only when the referenced user row is missing, which
/// the foreign key prevents on backends that enforce it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoWithOwner {
    pub todo: todo::Model,
    pub owner: Option<user::Model>,
}

impl TodoWithOwner {
    pub fn new(todo: todo::Model, owner: Option<user::Model>) -> Self {
        Self { todo, owner }
    }
}

impl From<(todo::Model, Option<user::Model>)> for TodoWithOwner {
    fn from((todo, owner): (todo::Model, Option<user::Model>)) -> Self {
        Self::new(todo, owner)
    }
}
