use crate::error::AppError;
use crate::model::{TodoWithOwner, todo, user};
use crate::storage::TodoRepository;
use async_graphql::{ComplexObject, Context, ErrorExtensions, InputObject, SimpleObject};

#[derive(SimpleObject, Clone, Debug, PartialEq, Eq)]
#[graphql(complex)]
pub struct User {
    pub id: i32,
    pub name: String,
}

#[ComplexObject]
impl User {
    /// Todos owned by this user
    async fn todos(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<Todo>> {
        let repo = ctx.data::<TodoRepository>()?;
        let todos = repo
            .todos_for_user(self.id)
            .await
            .map_err(|e: AppError| e.extend())?;
        Ok(todos
            .into_iter()
            .map(|t| Todo::from_parts(t, Some(self.clone())))
            .collect())
    }
}

impl From<user::Model> for User {
    fn from(u: user::Model) -> Self {
        Self {
            id: u.id,
            name: u.name,
        }
    }
}

#[derive(SimpleObject, Clone, Debug, PartialEq, Eq)]
pub struct Todo {
    pub id: i32,
    pub text: String,
    pub done: bool,
    #[graphql(name = "userID")]
    pub user_id: i32,
    pub user: Option<User>,
}

impl Todo {
    fn from_parts(t: todo::Model, user: Option<User>) -> Self {
        Self {
            id: t.id,
            text: t.text,
            done: t.done,
            user_id: t.user_id,
            user,
        }
    }
}

impl From<TodoWithOwner> for Todo {
    fn from(t: TodoWithOwner) -> Self {
        Self::from_parts(t.todo, t.owner.map(User::from))
    }
}

#[derive(InputObject)]
pub struct NewTodo {
    pub text: String,
    pub user_id: i32,
}

#[derive(InputObject)]
pub struct EditTodo {
    pub id: i32,
    pub text: String,
}

#[derive(InputObject)]
pub struct NewUser {
    pub name: String,
}

#[derive(InputObject)]
pub struct FetchTodo {
    pub id: i32,
}
