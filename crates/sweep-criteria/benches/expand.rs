use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sweep_criteria::{CriteriaCatalog, SweepSpecParser};

fn bench_expand(c: &mut Criterion) {
    let catalog = CriteriaCatalog::with_defaults();
    let parser = SweepSpecParser::new();

    c.bench_function("fuel_expand_1000", |b| {
        b.iter(|| {
            let criteria = catalog
                .factory(black_box("fuel.1.1000.C1000"), &parser)
                .expect("valid spec");
            black_box(criteria.variants())
        });
    });
}

criterion_group!(benches, bench_expand);
criterion_main!(benches);
