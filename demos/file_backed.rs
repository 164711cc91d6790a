//! Todos persisted to a JSON file across runs
//!
//! Usage: cargo run --example file_backed -- [path] [todo text...]

use tickbox::{Environment, FileStorage, TodoList};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let path = args.next().unwrap_or_else(|| "tickbox.json".to_string());
    let text: Vec<String> = args.collect();

    let env = Environment::builder()
        .storage(FileStorage::open(&path)?)
        .build();
    let list = TodoList::new(&env);

    if !text.is_empty() {
        list.todos.add(text.join(" "));
    }

    let stats = list.stats.get();
    println!("{path}: {} todos ({} active)", stats.total, stats.active);
    for todo in list.todos.get() {
        println!("  {} {}  {}", todo.created_at.format("%Y-%m-%d"), todo.id, todo.text);
    }
    Ok(())
}
