use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use ri_http_cookies::SimpleCookie;
use ri_http_cookies::codec::unquote;

const SIZES: [usize; 4] = [1_000, 10_000, 100_000, 1_000_000];

fn backslash_heavy(n: usize) -> String {
    format!("\"b={};\"", "\\\\".repeat(n))
}

fn octal_heavy(n: usize) -> String {
    format!("\"b={};\"", "\\134".repeat(n))
}

fn benchmark_unquote(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("unquote");

    for n in SIZES {
        for (name, value) in [("backslash", backslash_heavy(n)), ("octal", octal_heavy(n))] {
            group.throughput(Throughput::Bytes(value.len() as u64));
            group.bench_with_input(BenchmarkId::new(name, n), &value, |b, value| {
                b.iter(|| black_box(unquote(value)));
            });
        }
    }

    group.finish();
}

fn benchmark_load(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("load");

    for n in SIZES {
        let header = format!("a={}; Path=/; Secure", backslash_heavy(n));
        group.throughput(Throughput::Bytes(header.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &header, |b, header| {
            b.iter(|| {
                let cookies = SimpleCookie::parse(header).expect("header should load");
                black_box(cookies);
            });
        });
    }

    group.finish();
}

criterion_group!(cookies, benchmark_unquote, benchmark_load);
criterion_main!(cookies);
