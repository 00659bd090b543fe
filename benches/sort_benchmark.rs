use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use kvsort::{Record, Value, make_comparator, record, sort};
use std::hint::black_box;

const COLORS: [&str; 5] = ["red", "Blue", "green", "  yellow", "Purple"];

fn generate_records(n: usize) -> Vec<Record> {
    // Deterministic LCG so runs are comparable.
    let mut state: u64 = 0x2545_f491_4f6c_dd1d;
    (0..n)
        .map(|i| {
            state = state
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            let weight = (state >> 33) as f64 / 1000.0;
            let color = COLORS[(state >> 20) as usize % COLORS.len()];
            let name = if i % 17 == 0 {
                Value::Null
            } else {
                Value::from(format!("item-{}", state % 10_000))
            };
            record! {
                "color" => color,
                "weight" => weight,
                "label" => format!("{:.3}", weight),
                "name" => name,
            }
        })
        .collect()
}

fn bench_single_key(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort_single_key");
    for n in [1_000, 10_000, 100_000] {
        let data = generate_records(n);
        group.bench_with_input(BenchmarkId::new("natural_string", n), &data, |b, data| {
            b.iter(|| {
                let mut v = data.clone();
                sort(&mut v, black_box("color"));
                v
            })
        });
        group.bench_with_input(BenchmarkId::new("natural_number_desc", n), &data, |b, data| {
            b.iter(|| {
                let mut v = data.clone();
                sort(&mut v, black_box("\\weight"));
                v
            })
        });
    }
    group.finish();
}

fn bench_typed_key(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort_typed_key");
    let data = generate_records(10_000);
    for kind in ["float", "int"] {
        let param = format!("label<{}>", kind);
        group.bench_with_input(BenchmarkId::new("coerce", kind), &data, |b, data| {
            b.iter(|| {
                let mut v = data.clone();
                sort(&mut v, black_box(param.as_str()));
                v
            })
        });
    }
    group.finish();
}

fn bench_multi_key(c: &mut Criterion) {
    let data = generate_records(10_000);
    c.bench_function("sort_multi_key", |b| {
        b.iter(|| {
            let mut v = data.clone();
            sort(&mut v, black_box(["color", "\\weight<float>", "name"]));
            v
        })
    });
}

fn bench_comparator(c: &mut Criterion) {
    let data = generate_records(2);
    let cmp = make_comparator::<Record>("color");
    c.bench_function("comparator_call", |b| {
        b.iter(|| cmp(black_box(&data[0]), black_box(&data[1])))
    });
}

criterion_group!(
    benches,
    bench_single_key,
    bench_typed_key,
    bench_multi_key,
    bench_comparator
);
criterion_main!(benches);
