use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use serde_json::json;
use spendlog::validation::validate_expense;
use spendlog_core::{CreateExpenseCommand, ExpenseStore};
use spendlog_memory::InMemoryExpenseStore;

fn command(i: usize) -> CreateExpenseCommand {
    CreateExpenseCommand {
        amount: (i % 100 + 1) as f64,
        description: Arc::from(format!("Expense {}", i)),
        category: Arc::from("Bench"),
        date: Arc::from("2024-01-01"),
    }
}

fn seeded_store(n: usize) -> InMemoryExpenseStore {
    let store = InMemoryExpenseStore::new();
    for i in 0..n {
        store.create_expense(&command(i)).unwrap();
    }
    store
}

fn bench_create(c: &mut Criterion) {
    let store = InMemoryExpenseStore::new();
    let cmd = command(0);
    c.bench_function("create_expense", |b| {
        b.iter(|| store.create_expense(black_box(&cmd)).unwrap())
    });
}

fn bench_list(c: &mut Criterion) {
    let store = seeded_store(1_000);
    c.bench_function("list_expenses_1000", |b| {
        b.iter(|| black_box(store.list_expenses().unwrap()))
    });
}

fn bench_validate(c: &mut Criterion) {
    let body = json!({"amount": 42.5, "description": "Lunch", "category": "Food", "date": "2024-01-01"});
    c.bench_function("validate_expense", |b| {
        b.iter(|| validate_expense(black_box(&body)).unwrap())
    });
}

criterion_group!(benches, bench_create, bench_list, bench_validate);
criterion_main!(benches);
