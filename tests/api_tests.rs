use graphql_crud::config::DatabaseSettings;
use graphql_crud::graphql::{TodoSchema, build_schema, export_sdl};
use graphql_crud::storage::{TodoRepository, connect};
use serde_json::{Value, json};

async fn setup_schema() -> TodoSchema {
    let db = connect(&DatabaseSettings::in_memory()).await.unwrap();
    build_schema(TodoRepository::new(db))
}

/// Execute a request that is expected to succeed and return its data.
async fn execute(schema: &TodoSchema, query: &str) -> Value {
    let response = schema.execute(query).await;
    assert!(
        response.errors.is_empty(),
        "unexpected errors: {:?}",
        response.errors
    );
    response.data.into_json().unwrap()
}

/// Execute a request that is expected to fail and return the whole response.
async fn execute_err(schema: &TodoSchema, query: &str) -> Value {
    let response = schema.execute(query).await;
    assert!(!response.errors.is_empty(), "expected an error");
    serde_json::to_value(&response).unwrap()
}

async fn create_user(schema: &TodoSchema, name: &str) -> i64 {
    let data = execute(
        schema,
        &format!(r#"mutation {{ createUser(input: {{ name: "{}" }}) {{ id name }} }}"#, name),
    )
    .await;
    data["createUser"]["id"].as_i64().unwrap()
}

async fn create_todo(schema: &TodoSchema, text: &str, user_id: i64) -> Value {
    let data = execute(
        schema,
        &format!(
            r#"mutation {{ createTodo(input: {{ text: "{}", userId: {} }}) {{ id text done userID user {{ id name }} }} }}"#,
            text, user_id
        ),
    )
    .await;
    data["createTodo"].clone()
}

// =============================================================================
// Mutations
// =============================================================================

#[tokio::test]
async fn test_create_user() {
    let schema = setup_schema().await;
    let data = execute(
        &schema,
        r#"mutation { createUser(input: { name: "Jamie" }) { id name } }"#,
    )
    .await;

    assert!(data["createUser"]["id"].as_i64().unwrap() > 0);
    assert_eq!(data["createUser"]["name"], "Jamie");
}

#[tokio::test]
async fn test_create_todo() {
    let schema = setup_schema().await;
    let user_id = create_user(&schema, "Jamie").await;

    let todo = create_todo(&schema, "a", user_id).await;
    assert!(todo["id"].as_i64().unwrap() > 0);
    assert_eq!(todo["text"], "a");
    assert_eq!(todo["done"], false);
    assert_eq!(todo["userID"], user_id);
    assert_eq!(todo["user"], json!({ "id": user_id, "name": "Jamie" }));
}

#[tokio::test]
async fn test_create_todo_for_unknown_user_fails() {
    let schema = setup_schema().await;
    let response = execute_err(
        &schema,
        r#"mutation { createTodo(input: { text: "orphan", userId: 99 }) { id } }"#,
    )
    .await;
    assert_eq!(response["errors"][0]["extensions"]["code"], "DATABASE_ERROR");
}

#[tokio::test]
async fn test_update_todo_changes_only_text() {
    let schema = setup_schema().await;
    let user_id = create_user(&schema, "Jamie").await;
    let created = create_todo(&schema, "a", user_id).await;
    let id = created["id"].as_i64().unwrap();

    let data = execute(
        &schema,
        &format!(
            r#"mutation {{ updateTodo(input: {{ id: {}, text: "b" }}) {{ id text done userID }} }}"#,
            id
        ),
    )
    .await;

    let updated = &data["updateTodo"];
    assert_eq!(updated["id"], id);
    assert_eq!(updated["text"], "b");
    assert_eq!(updated["done"], created["done"]);
    assert_eq!(updated["userID"], created["userID"]);
}

#[tokio::test]
async fn test_update_unknown_todo_is_not_found() {
    let schema = setup_schema().await;
    let response = execute_err(
        &schema,
        r#"mutation { updateTodo(input: { id: 12345, text: "b" }) { id } }"#,
    )
    .await;
    assert_eq!(response["errors"][0]["extensions"]["code"], "NOT_FOUND");
    assert_eq!(response["errors"][0]["message"], "Todo not found: 12345");
}

#[tokio::test]
async fn test_delete_todo_returns_snapshot() {
    let schema = setup_schema().await;
    let user_id = create_user(&schema, "Jamie").await;
    let created = create_todo(&schema, "a", user_id).await;
    let id = created["id"].as_i64().unwrap();

    let data = execute(
        &schema,
        &format!(
            "mutation {{ deleteTodo(input: {}) {{ id text done userID user {{ id name }} }} }}",
            id
        ),
    )
    .await;
    assert_eq!(data["deleteTodo"], created);

    let response = execute_err(
        &schema,
        &format!("{{ todo(input: {{ id: {} }}) {{ id }} }}", id),
    )
    .await;
    assert_eq!(response["errors"][0]["extensions"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_delete_unknown_todo_is_not_found() {
    let schema = setup_schema().await;
    let response = execute_err(&schema, "mutation { deleteTodo(input: 5) { id } }").await;
    assert_eq!(response["errors"][0]["extensions"]["code"], "NOT_FOUND");
}

// =============================================================================
// Queries
// =============================================================================

#[tokio::test]
async fn test_todos_resolve_users() {
    let schema = setup_schema().await;
    let user_id = create_user(&schema, "Jamie").await;
    create_todo(&schema, "first", user_id).await;
    create_todo(&schema, "second", user_id).await;

    let data = execute(&schema, "{ todos { id text userID user { id name } } }").await;
    let todos = data["todos"].as_array().unwrap();
    assert_eq!(todos.len(), 2);
    assert_eq!(todos[0]["text"], "first");
    assert_eq!(todos[1]["text"], "second");
    for todo in todos {
        assert_eq!(todo["user"]["id"], user_id);
        assert_eq!(todo["user"]["name"], "Jamie");
    }
}

#[tokio::test]
async fn test_todo_fetch_by_id() {
    let schema = setup_schema().await;
    let user_id = create_user(&schema, "Jamie").await;
    let created = create_todo(&schema, "a", user_id).await;
    let id = created["id"].as_i64().unwrap();

    let data = execute(
        &schema,
        &format!(
            "{{ todo(input: {{ id: {} }}) {{ id text done userID user {{ id name }} }} }}",
            id
        ),
    )
    .await;
    assert_eq!(data["todo"], created);
}

#[tokio::test]
async fn test_todo_unknown_id_is_not_found() {
    let schema = setup_schema().await;
    let response = execute_err(&schema, "{ todo(input: { id: 404 }) { id text } }").await;
    assert_eq!(response["errors"][0]["extensions"]["code"], "NOT_FOUND");
    assert_eq!(response["data"], Value::Null);
}

#[tokio::test]
async fn test_users_is_idempotent() {
    let schema = setup_schema().await;
    create_user(&schema, "Jamie").await;
    create_user(&schema, "Alex").await;

    let first = execute(&schema, "{ users { id name } }").await;
    let second = execute(&schema, "{ users { id name } }").await;
    assert_eq!(first, second);
    assert_eq!(first["users"].as_array().unwrap().len(), 2);
    assert_eq!(first["users"][0]["name"], "Jamie");
    assert_eq!(first["users"][1]["name"], "Alex");
}

#[tokio::test]
async fn test_user_todos_back_reference() {
    let schema = setup_schema().await;
    let jamie = create_user(&schema, "Jamie").await;
    let alex = create_user(&schema, "Alex").await;
    create_todo(&schema, "one", jamie).await;
    create_todo(&schema, "two", alex).await;
    create_todo(&schema, "three", jamie).await;

    let data = execute(&schema, "{ users { name todos { text user { name } } } }").await;
    assert_eq!(
        data["users"],
        json!([
            {
                "name": "Jamie",
                "todos": [
                    { "text": "one", "user": { "name": "Jamie" } },
                    { "text": "three", "user": { "name": "Jamie" } }
                ]
            },
            {
                "name": "Alex",
                "todos": [{ "text": "two", "user": { "name": "Alex" } }]
            }
        ])
    );
}

#[tokio::test]
async fn test_queries_do_not_write() {
    let schema = setup_schema().await;
    let user_id = create_user(&schema, "Jamie").await;
    create_todo(&schema, "a", user_id).await;

    let before = execute(&schema, "{ todos { id text done userID } users { id name } }").await;
    execute(&schema, "{ todos { id } users { id todos { id } } }").await;
    let after = execute(&schema, "{ todos { id text done userID } users { id name } }").await;
    assert_eq!(before, after);
}

#[tokio::test]
async fn test_variables_are_supported() {
    let schema = setup_schema().await;
    let request = async_graphql::Request::new(
        "mutation($input: NewUser!) { createUser(input: $input) { name } }",
    )
    .variables(async_graphql::Variables::from_json(
        json!({ "input": { "name": "Jamie" } }),
    ));
    let response = schema.execute(request).await;
    assert!(response.errors.is_empty());
    assert_eq!(
        response.data.into_json().unwrap()["createUser"]["name"],
        "Jamie"
    );
}

// =============================================================================
// Schema description
// =============================================================================

#[test]
fn test_sdl_partitions_queries_and_mutations() {
    let sdl = export_sdl();
    assert!(sdl.contains("type QueryRoot"));
    assert!(sdl.contains("type MutationRoot"));
    assert!(sdl.contains("todos: [Todo!]!"));
    assert!(sdl.contains("users: [User!]!"));
    assert!(sdl.contains("todo(input: FetchTodo!): Todo!"));
    assert!(sdl.contains("createTodo(input: NewTodo!): Todo!"));
    assert!(sdl.contains("updateTodo(input: EditTodo!): Todo!"));
    assert!(sdl.contains("deleteTodo(input: Int!): Todo!"));
    assert!(sdl.contains("createUser(input: NewUser!): User!"));
    assert!(sdl.contains("userID: Int!"));
    assert!(sdl.contains("input NewTodo"));
    assert!(sdl.contains("userId: Int!"));
}
