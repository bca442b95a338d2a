//! Benchmarks for client-side list filtering
//!
//! Run with: cargo bench

use contexq::filter::{facet_options, transactions_for_customer, CustomerFacet, CustomerFilter};
use contexq::models::{Customer, Transaction};
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

const REGIONS: [&str; 4] = ["West", "East", "North", "South"];
const INDUSTRIES: [&str; 3] = ["Retail", "Energy", "Software"];

fn create_test_customers(count: usize) -> Vec<Customer> {
    (0..count)
        .map(|i| Customer {
            customer_id: i as i64,
            customer_name: format!("Customer {} Holdings", i),
            industry: INDUSTRIES[i % INDUSTRIES.len()].to_string(),
            region: REGIONS[i % REGIONS.len()].to_string(),
            join_date: "2023-01-01".to_string(),
        })
        .collect()
}

fn create_test_sales(count: usize) -> Vec<Transaction> {
    (0..count)
        .map(|i| Transaction {
            transaction_id: i as i64,
            customer_id: (i % 50) as i64,
            product_id: (i % 20) as i64,
            quantity: 1,
            sale_amount: 19.99,
            transaction_date: "2024-01-01".to_string(),
        })
        .collect()
}

fn bench_list_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("list_filter");

    let filter = CustomerFilter::new()
        .search("holdings")
        .with(CustomerFacet::Region, "West")
        .with(CustomerFacet::Industry, "Retail");

    for size in [100, 1000, 10000] {
        let customers = create_test_customers(size);

        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("apply_{}", size), |b| {
            b.iter(|| filter.apply(black_box(&customers)).len())
        });

        group.bench_function(format!("facet_options_{}", size), |b| {
            b.iter(|| facet_options(black_box(&customers), CustomerFacet::Region))
        });
    }

    group.finish();
}

fn bench_transactions(c: &mut Criterion) {
    let mut group = c.benchmark_group("transactions_for_customer");

    for size in [1000, 100000] {
        let sales = create_test_sales(size);

        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("first_10_of_{}", size), |b| {
            b.iter(|| transactions_for_customer(black_box(&sales), "49", 10))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_list_filter, bench_transactions);
criterion_main!(benches);
