//! Example: Estimate chords from a synthetic chroma matrix
//!
//! Prints the result on one line with the `AI_CHORDS:` marker, the way a
//! calling application reads it, followed by the segment timeline.
//!
//! Usage:
//!   RUST_LOG=debug cargo run --example estimate_synthetic

use chord_listener::features::chords::ChordTemplates;
use chord_listener::{format_result, marker_line, Chord, ChordConfig, ChordEstimator, ChromaMatrix};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logger
    env_logger::init();

    // Two seconds each of C, G, Am, F at ~43 frames/s
    let templates = ChordTemplates::new();
    let progression = ["C", "G", "Am", "F"];
    let mut frames = Vec::new();
    for name in progression {
        let chord = Chord::from_name(name).ok_or("unknown chord name")?;
        for t in 0..86 {
            let mut frame = *templates.vector(chord.index());
            // Light wash of energy on every bin
            for (pc, x) in frame.iter_mut().enumerate() {
                *x += ((t * 7 + pc * 13) % 10) as f32 * 0.02;
            }
            frames.push(frame);
        }
    }
    let chroma = ChromaMatrix::new(frames)?;

    let estimator = ChordEstimator::new(ChordConfig::default())?;
    let result = estimator.estimate(&chroma);

    println!("{}", marker_line(&format_result(&result)));

    if let Ok(estimate) = result {
        for segment in &estimate.segments {
            println!(
                "  {:>6.2}s  {:<4} ({:.2}s)",
                segment.start_seconds,
                segment.chord.name(),
                segment.duration_seconds
            );
        }
        println!(
            "  {} frames, {} changes ({} greedy), stay {:.2}, {:.2} ms",
            estimate.metadata.frames_decoded,
            estimate.metadata.decoded_changes,
            estimate.metadata.greedy_changes,
            estimator.config().stay_probability,
            estimate.metadata.processing_time_ms
        );
    }

    Ok(())
}
