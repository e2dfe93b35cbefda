use std::hint::black_box;
use std::time::Instant;

use clinote_engine::{AnnotationEngine, Document, EditOp, EngineConfig};
use criterion::{Criterion, criterion_group, criterion_main};
mod common;

fn bench_engine_creation(c: &mut Criterion) {
    let mut group = c.benchmark_group("annotate");
    group.sample_size(20);

    let config = EngineConfig::builtin().unwrap();
    let doc = Document::from_paragraphs(common::generate_note(50));
    group.bench_function("create", |b| {
        b.iter(|| {
            let engine = AnnotationEngine::new(&config, black_box(doc.clone()));
            black_box(engine.tasks().len());
        });
    });

    group.finish();
}

fn bench_typing(c: &mut Criterion) {
    let mut group = c.benchmark_group("typing");
    group.sample_size(20);

    let config = EngineConfig::builtin().unwrap();
    let doc = Document::from_paragraphs(common::generate_note(50));
    group.bench_function("insert_and_read_overlay", |b| {
        b.iter_batched(
            || AnnotationEngine::new(&config, doc.clone()),
            |mut engine| {
                let now = Instant::now();
                for (i, ch) in "fever".chars().enumerate() {
                    engine
                        .apply_edit(EditOp::insert(10 + i, ch.to_string()), now)
                        .unwrap();
                    black_box(engine.decorations().len());
                }
                engine.flush_tasks();
                black_box(engine.tasks().len());
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(benches, bench_engine_creation, bench_typing);
criterion_main!(benches);
