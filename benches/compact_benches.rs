use criterion::{black_box, criterion_group, criterion_main, Criterion};
use scale_writer::ser::{write_compact, write_compact_integer, Integer};
use scale_writer::{encode, encode_value, Compact, Shape, Value};

fn bench_compact(c: &mut Criterion) {
    let mut group = c.benchmark_group("compact");
    for (label, value) in [
        ("single_byte", 42u128),
        ("two_byte", 16_000),
        ("four_byte", 1 << 29),
        ("big_integer", u64::MAX as u128),
    ] {
        group.bench_function(label, |b| {
            let mut out = Vec::with_capacity(17);
            b.iter(|| {
                out.clear();
                write_compact(&mut out, black_box(value)).expect("compact write");
                black_box(&out);
            });
        });
    }

    let wide = Integer::from_le_magnitude(&[0xa5; 67]);
    group.bench_function("ceiling_magnitude", |b| {
        let mut out = Vec::with_capacity(68);
        b.iter(|| {
            out.clear();
            write_compact_integer(&mut out, black_box(&wide)).expect("compact write");
            black_box(&out);
        });
    });
    group.finish();
}

fn bench_composites(c: &mut Criterion) {
    let mut group = c.benchmark_group("composites");
    let native: Vec<(Compact<u64>, Option<u32>, bool)> = (0..1024u64)
        .map(|i| (Compact(i * 97), (i % 3 == 0).then_some(i as u32), i % 2 == 0))
        .collect();
    group.bench_function("native_1k", |b| {
        b.iter(|| black_box(encode(black_box(&native)).expect("encode")));
    });

    let shape = Shape::sequence(Shape::Tuple(vec![
        Shape::Compact,
        Shape::option(Shape::U32),
        Shape::Bool,
    ]));
    let value = Value::Sequence(
        native
            .iter()
            .map(|(compact, maybe, flag)| {
                Value::Tuple(vec![
                    Value::from(compact.0),
                    Value::from(*maybe),
                    Value::from(*flag),
                ])
            })
            .collect(),
    );
    group.bench_function("shape_1k", |b| {
        b.iter(|| black_box(encode_value(&shape, black_box(&value)).expect("encode")));
    });
    group.finish();
}

criterion_group!(benches, bench_compact, bench_composites);
criterion_main!(benches);
