//! Performance benchmarks for chord decoding

use chord_listener::features::chords::{compute_emissions, decode, ChordTemplates, TransitionMatrix};
use chord_listener::{estimate_chords, ChordConfig, ChromaMatrix};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// 30 seconds of chroma at ~43 frames/s cycling through a four-chord loop
fn synthetic_chroma() -> ChromaMatrix {
    let templates = ChordTemplates::new();
    let progression = [0, 14, 19, 10]; // C, G, Am, F
    let frames = (0..1292)
        .map(|t| {
            let mut frame = *templates.vector(progression[(t / 80) % progression.len()]);
            for (pc, x) in frame.iter_mut().enumerate() {
                *x += ((t * 7 + pc * 13) % 10) as f32 * 0.02;
            }
            frame
        })
        .collect();
    ChromaMatrix::new(frames).expect("synthetic chroma is valid")
}

fn bench_estimate_chords(c: &mut Criterion) {
    let chroma = synthetic_chroma();
    let config = ChordConfig::default();

    c.bench_function("estimate_chords_30s", |b| {
        b.iter(|| {
            let _ = estimate_chords(black_box(&chroma), black_box(config.clone()));
        });
    });
}

fn bench_viterbi_only(c: &mut Criterion) {
    let chroma = synthetic_chroma();
    let templates = ChordTemplates::new();
    let transitions = TransitionMatrix::uniform(0.95, templates.len()).expect("valid transitions");
    let emissions = compute_emissions(chroma.frames(), &templates, 1e-6);

    c.bench_function("viterbi_decode_30s", |b| {
        b.iter(|| {
            let _ = decode(black_box(&emissions), black_box(&transitions));
        });
    });
}

criterion_group!(benches, bench_estimate_chords, bench_viterbi_only);
criterion_main!(benches);
