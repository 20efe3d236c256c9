//! Store example with a dynamic JSON state
//!
//! Run with `RUST_LOG=snapstore=trace cargo run --example store_example` to
//! see the store's log events.

use serde::Serialize;
use serde_json::json;
use snapstore::{JsonState, Store};
use tracing_subscriber::EnvFilter;

#[derive(Serialize)]
struct TodoItem {
    id: usize,
    text: String,
    completed: bool,
}

#[derive(Serialize)]
struct TodoPatch {
    todos: Vec<TodoItem>,
}

fn main() -> snapstore::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Store Example ===\n");

    // Create a store with initial state
    let store: Store<JsonState> = Store::builder().label("todos").build(JsonState::new());
    store.set_json(json!({"todos": [], "filter": "all"}))?;

    // Subscribe to state changes
    let sub = store.subscribe(|state| {
        let active = state["todos"]
            .as_array()
            .map(|todos| {
                todos
                    .iter()
                    .filter(|t| !t["completed"].as_bool().unwrap_or(false))
                    .count()
            })
            .unwrap_or(0);
        println!("State updated! Active todos: {active}");
    });

    // Add a todo; `todos` is replaced wholesale, `filter` is kept
    println!("Adding todo...");
    store.set_serialized(&TodoPatch {
        todos: vec![TodoItem {
            id: 1,
            text: "Learn snapstore".to_string(),
            completed: false,
        }],
    })?;

    let before = store.get_state();

    // Complete the todo
    println!("\nCompleting todo...");
    store.update(|state| {
        if let Some(todo) = state["todos"].get_mut(0) {
            todo["completed"] = json!(true);
        }
    });

    println!("\nSnapshot taken before completing: {:#}", json!(*before));

    sub.unsubscribe();
    store.set_json(json!({"filter": "completed"}))?;

    // Read final state
    println!("\nFinal state: {:#}", store.to_value());
    Ok(())
}
