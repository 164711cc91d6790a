use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

use tickbox::{Environment, Filter, MemoryStorage, Store, TodoList, TodoStore};

fn seeded(env: &Environment, count: usize) -> TodoStore {
    let store = TodoStore::new(env);
    for i in 0..count {
        let id = store.add(format!("task {i}"));
        if i % 3 == 0 {
            store.toggle(&id);
        }
    }
    store
}

fn store_update_benchmark(c: &mut Criterion) {
    let store = Store::new(0usize);

    c.bench_function("store_update", |b| {
        let mut i = 0;
        b.iter(|| {
            store.update(|value| *value = black_box(i));
            i += 1;
        });
    });
}

fn store_subscribe_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("store_subscribe");

    for subscriber_count in [1, 10, 100].iter() {
        let store = Store::new(0usize);
        let _subs: Vec<_> = (0..*subscriber_count)
            .map(|_| store.subscribe(|_| {}))
            .collect();

        group.bench_with_input(
            BenchmarkId::from_parameter(subscriber_count),
            subscriber_count,
            |b, _| {
                let mut i = 0;
                b.iter(|| {
                    store.set(black_box(i));
                    i += 1;
                });
            },
        );
    }
    group.finish();
}

fn todo_toggle_persisted_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("todo_toggle_persisted");

    for count in [10, 100, 1000].iter() {
        let env = Environment::builder().storage(MemoryStorage::new()).build();
        let store = seeded(&env, *count);
        let id = store.get()[count / 2].id.clone();

        group.bench_with_input(BenchmarkId::from_parameter(count), count, |b, _| {
            b.iter(|| store.toggle(black_box(&id)));
        });
    }
    group.finish();
}

fn derived_views_benchmark(c: &mut Criterion) {
    let env = Environment::headless();
    let list = TodoList::from_store(seeded(&env, 500));
    list.set_filter(Filter::Active);
    let id = list.todos.get()[250].id.clone();

    c.bench_function("derived_views_recompute", |b| {
        b.iter(|| {
            list.todos.toggle(&id);
            black_box(list.stats.get());
        });
    });
}

fn load_benchmark(c: &mut Criterion) {
    let env = Environment::builder().storage(MemoryStorage::new()).build();
    seeded(&env, 1000);

    c.bench_function("todo_store_load_1000", |b| {
        b.iter(|| black_box(TodoStore::new(&env).len()));
    });
}

criterion_group!(
    benches,
    store_update_benchmark,
    store_subscribe_benchmark,
    todo_toggle_persisted_benchmark,
    derived_views_benchmark,
    load_benchmark,
);
criterion_main!(benches);
