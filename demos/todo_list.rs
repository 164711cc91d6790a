//! Todo list with filtered and stats views

use tickbox::{Environment, Filter, MemoryStorage, TodoList};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("=== Todo List Example ===\n");

    let storage = MemoryStorage::new();
    let env = Environment::builder().storage(storage.clone()).build();
    let list = TodoList::new(&env);

    // Subscribe to the derived stats
    println!("1. Setting up subscriber");
    let _stats = list.stats.subscribe(|stats| {
        println!(
            "   [Stats] Total: {}, Active: {}, Completed: {}",
            stats.total, stats.active, stats.completed
        );
    });

    println!("\n2. Adding todos");
    let milk = list.todos.add("Buy milk");
    let dog = list.todos.add("Walk the dog");
    list.todos.add("Write documentation");

    println!("\n3. Completing two todos");
    list.todos.toggle(&milk);
    list.todos.toggle(&dog);

    for filter in [Filter::All, Filter::Active, Filter::Completed] {
        list.set_filter(filter);
        println!("\n4. Showing {filter} todos:");
        for todo in list.filtered.get() {
            let status = if todo.completed { "x" } else { " " };
            println!("   [{}] {}", status, todo.text);
        }
    }

    println!("\n5. Marking everything done");
    list.todos.toggle_all();

    println!("\n6. Clearing completed");
    list.todos.clear_completed();

    println!("\nPersisted: {:?}", storage);
}
