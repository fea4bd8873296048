//! Criterion benchmarks for the overview pipeline

use chrono::{DateTime, NaiveDate, Utc};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use lifedash::services::{Aggregator, DashboardData, Presenter};
use lifedash::types::{Category, ExpenseRecord};
use rust_decimal::Decimal;
use std::hint::black_box;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 28).unwrap()
}

/// One month of expenses, ascending by date, cycling through categories
fn make_expenses(count: usize) -> Vec<ExpenseRecord> {
    let categories = [
        Category::Food,
        Category::Transport,
        Category::Shopping,
        Category::Bills,
        Category::Entertainment,
        Category::Other,
        Category::from("Pets"),
    ];

    (0..count)
        .map(|i| {
            let day = 1 + (i * 28 / count.max(1)) as u32;
            ExpenseRecord {
                id: format!("e{}", i),
                owner: "bench".into(),
                amount: Decimal::new((i as i64 % 10_000) + 1, 2),
                description: String::new(),
                category: categories[i % categories.len()].clone(),
                date: NaiveDate::from_ymd_opt(2025, 1, day).unwrap(),
                created_at: DateTime::<Utc>::default(),
            }
        })
        .collect()
}

fn bench_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregator");

    for count in [100usize, 1_000, 10_000] {
        let expenses = make_expenses(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(
            BenchmarkId::new("aggregate", count),
            &expenses,
            |b, expenses| {
                b.iter(|| Aggregator::aggregate(black_box(expenses), today()));
            },
        );
    }

    group.finish();
}

fn bench_overview(c: &mut Criterion) {
    let data = DashboardData {
        monthly_expenses: make_expenses(1_000),
        ..DashboardData::default()
    };

    let mut group = c.benchmark_group("presenter");
    group.throughput(Throughput::Elements(data.monthly_expenses.len() as u64));

    group.bench_function("aggregate_and_present", |b| {
        b.iter(|| {
            let aggregate = Aggregator::aggregate(black_box(&data.monthly_expenses), today());
            Presenter::overview(black_box(&data), &aggregate)
        });
    });

    group.finish();
}

criterion_group!(benches, bench_aggregate, bench_overview);
criterion_main!(benches);
