use criterion::{Criterion, black_box, criterion_group, criterion_main};
use mtlog::{Level, Logger, MemorySink, Value};

fn bench_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("Logger::dispatch");

    let sink = MemorySink::shared();
    let log = Logger::builder()
        .minimum_level(Level::Information)
        .sink_shared(sink.clone())
        .build();

    group.bench_function("level_gated_out", |b| {
        b.iter(|| log.debug(black_box("below minimum {X}"), &[Value::from(1)]));
    });

    group.bench_function("fast_path_literal", |b| {
        b.iter(|| {
            log.information(black_box("plain literal message"), &[]);
            sink.clear();
        });
    });

    group.bench_function("bound_properties", |b| {
        b.iter(|| {
            log.information(
                black_box("User {UserId} did {Action}"),
                &[Value::from(42), Value::from("checkout")],
            );
            sink.clear();
        });
    });

    group.finish();
}

fn bench_derivation(c: &mut Criterion) {
    let mut group = c.benchmark_group("Logger::derive");

    let log = Logger::builder().build();

    group.bench_function("for_context", |b| {
        b.iter(|| log.for_context(black_box("Component"), black_box("billing")));
    });

    group.bench_function("sample_every", |b| {
        b.iter(|| log.sample(black_box(10)));
    });

    group.finish();
}

fn bench_sampled_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("Logger::sampled");

    let sink = MemorySink::shared();
    let log = Logger::builder()
        .minimum_level(Level::Information)
        .sink_shared(sink.clone())
        .build()
        .sample(100);

    group.bench_function("every_100", |b| {
        b.iter(|| {
            log.information(black_box("sampled {N}"), &[Value::from(7)]);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_dispatch, bench_derivation, bench_sampled_dispatch);
criterion_main!(benches);
