// ============================================================================
// Numeral Engine Benchmarks
// ============================================================================
//
// Benchmark Categories:
// 1. Parsing - Each grammar in isolation and scaling with literal length
// 2. Scanning - Messy input with prologs, tails and retry recovery
// 3. Comparison - Field-wise ordering of finite numbers
// 4. Arithmetic - Exact magnitude operations with one rounding step
// 5. Rendering - General, scientific and fixed text output
// ============================================================================

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use numeral_engine::prelude::*;

// ============================================================================
// Parsing Benchmarks
// ============================================================================

fn benchmark_parse_by_grammar(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_by_grammar");

    for (name, text) in [
        ("real", "123.456e7"),
        ("radix_prefix", "0x1FFFFF"),
        ("radix_suffix", "1FFFFF:H"),
        ("special", "-Infinity"),
    ] {
        group.bench_with_input(BenchmarkId::from_parameter(name), text, |b, text| {
            b.iter(|| black_box(Number::parse(black_box(text)).unwrap()));
        });
    }

    group.finish();
}

fn benchmark_parse_by_length(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_by_length");

    for num_digits in [8, 64, 256].iter() {
        // Nontrivial digits so halving never short-circuits
        let text: String = (0..*num_digits)
            .map(|i| char::from(b'1' + (i % 9) as u8))
            .collect();

        group.bench_with_input(
            BenchmarkId::from_parameter(num_digits),
            &text,
            |b, text| {
                b.iter(|| black_box(Number::parse(black_box(text)).unwrap()));
            },
        );
    }

    group.finish();
}

// ============================================================================
// Scanning Benchmarks
// Prolog stripping, tail attribution and the one-level retry
// ============================================================================

fn benchmark_scan_recovery(c: &mut Criterion) {
    let mut group = c.benchmark_group("scan_recovery");

    for (name, text) in [
        ("clean", "123.456e7"),
        ("prolog", "  007.5e2"),
        ("tail_retry", "123abc"),
        ("unrecognized", ":H"),
    ] {
        group.bench_with_input(BenchmarkId::from_parameter(name), text, |b, text| {
            b.iter(|| black_box(Number::scan(black_box(text))));
        });
    }

    group.finish();
}

// ============================================================================
// Comparison Benchmarks
// ============================================================================

fn benchmark_compare(c: &mut Criterion) {
    c.bench_function("compare_close_values", |b| {
        let left = Number::parse("123456.789").unwrap();
        let right = Number::parse("123456.788").unwrap();

        b.iter(|| black_box(left.compare(&right).unwrap()));
    });
}

// ============================================================================
// Arithmetic Benchmarks
// ============================================================================

fn benchmark_arithmetic(c: &mut Criterion) {
    let mut group = c.benchmark_group("arithmetic");

    let left = Number::parse("123.456").unwrap();
    let right = Number::parse("78.9").unwrap();

    group.bench_function("add", |b| {
        b.iter(|| black_box(black_box(&left) + black_box(&right)));
    });
    group.bench_function("mul", |b| {
        b.iter(|| black_box(black_box(&left) * black_box(&right)));
    });
    group.bench_function("div", |b| {
        b.iter(|| black_box(black_box(&left) / black_box(&right)));
    });
    group.bench_function("rem", |b| {
        b.iter(|| black_box(black_box(&left) % black_box(&right)));
    });

    group.finish();
}

// ============================================================================
// Rendering Benchmarks
// ============================================================================

fn benchmark_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");

    let value = Number::parse("123.456e7").unwrap();
    let suffixed = Number::parse("1FFFFF:H").unwrap();

    for (name, format) in [("general", ""), ("scientific", "e6"), ("fixed", "F4")] {
        group.bench_with_input(BenchmarkId::from_parameter(name), format, |b, format| {
            b.iter(|| black_box(value.format(black_box(format)).unwrap()));
        });
    }
    group.bench_function("suffixed", |b| {
        b.iter(|| black_box(suffixed.to_string()));
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_parse_by_grammar,
    benchmark_parse_by_length,
    benchmark_scan_recovery,
    benchmark_compare,
    benchmark_arithmetic,
    benchmark_render,
);
criterion_main!(benches);
