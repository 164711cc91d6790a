//! Laws that hold for any sequence of todo mutations.

use proptest::prelude::*;
use tickbox::{Environment, Filter, MemoryStorage, Storage, TodoId, TodoList, TodoStore};

#[derive(Clone, Debug)]
enum Op {
    Add(String),
    Remove(usize),
    Toggle(usize),
    Edit(usize, String),
    ClearCompleted,
    ToggleAll,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        "[a-z ]{0,12}".prop_map(Op::Add),
        (0usize..8).prop_map(Op::Remove),
        (0usize..8).prop_map(Op::Toggle),
        ((0usize..8), "[a-z]{0,8}").prop_map(|(i, s)| Op::Edit(i, s)),
        Just(Op::ClearCompleted),
        Just(Op::ToggleAll),
    ]
}

/// Ids by position, with an unknown id past the end.
fn pick(store: &TodoStore, index: usize) -> TodoId {
    store
        .get()
        .get(index)
        .map(|t| t.id.clone())
        .unwrap_or_else(|| TodoId::from("unknown"))
}

fn apply(store: &TodoStore, op: &Op) {
    match op {
        Op::Add(text) => {
            store.add(text.clone());
        }
        Op::Remove(i) => store.remove(&pick(store, *i)),
        Op::Toggle(i) => store.toggle(&pick(store, *i)),
        Op::Edit(i, text) => store.edit(&pick(store, *i), text.clone()),
        Op::ClearCompleted => store.clear_completed(),
        Op::ToggleAll => store.toggle_all(),
    }
}

proptest! {
    #[test]
    fn persisted_collection_reloads_exactly(ops in prop::collection::vec(op(), 0..24)) {
        let env = Environment::builder().storage(MemoryStorage::new()).build();
        let store = TodoStore::new(&env);

        for op in &ops {
            apply(&store, op);
            prop_assert_eq!(TodoStore::new(&env).get(), store.get());
        }
    }

    #[test]
    fn views_match_fresh_recomputation(
        ops in prop::collection::vec(op(), 0..24),
        filter in prop_oneof![Just(Filter::All), Just(Filter::Active), Just(Filter::Completed)],
    ) {
        let list = TodoList::new(&Environment::headless());
        list.set_filter(filter);

        for op in &ops {
            apply(&list.todos, op);
            let todos = list.todos.get();
            let stats = list.stats.get();

            prop_assert_eq!(stats.total, stats.active + stats.completed);
            prop_assert_eq!(stats.total, todos.len());

            let expected: Vec<_> = todos.iter().filter(|t| filter.matches(t)).cloned().collect();
            prop_assert_eq!(list.filtered.get(), expected);
        }
    }

    #[test]
    fn toggle_all_from_mixed_state_marks_everything_done(flags in prop::collection::vec(any::<bool>(), 1..10)) {
        let store = TodoStore::new(&Environment::headless());
        for (i, done) in flags.iter().enumerate() {
            let id = store.add(format!("t{i}"));
            if *done {
                store.toggle(&id);
            }
        }
        let all_done = flags.iter().all(|d| *d);

        store.toggle_all();
        prop_assert!(store.get().iter().all(|t| t.completed != all_done));

        store.toggle_all();
        prop_assert!(store.get().iter().all(|t| t.completed == all_done));
    }

    // Nothing this short can encode a non-empty collection.
    #[test]
    fn garbage_in_storage_always_loads_empty(raw in "\\PC{0,40}") {
        let storage = MemoryStorage::new();
        storage.set_item("todos", &raw).unwrap();
        let env = Environment::builder().storage(storage).build();

        prop_assert!(TodoStore::new(&env).is_empty());
    }
}
