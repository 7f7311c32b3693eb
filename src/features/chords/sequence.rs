//! Chord sequence compression
//!
//! Collapses a per-frame state path into chord changes. Every run counts as a
//! change regardless of its length.

use super::templates::ChordTemplates;
use crate::analysis::result::{Chord, ChordSegment};

/// Collapse consecutive repeated states and keep the first `max_changes` chords
///
/// # Arguments
///
/// * `path` - Decoded state index per frame
/// * `templates` - Template bank used to label states
/// * `max_changes` - Maximum number of chords returned
///
/// # Returns
///
/// Chord sequence with no two consecutive equal entries
///
/// # Panics
///
/// Panics if `path` holds a state index `>= templates.len()`. Paths produced by
/// [`decode`](super::viterbi::decode) over the template bank never do.
pub fn compress(path: &[usize], templates: &ChordTemplates, max_changes: usize) -> Vec<Chord> {
    let mut chords = Vec::new();
    let mut last: Option<usize> = None;

    for &state in path {
        if last == Some(state) {
            continue;
        }
        if chords.len() == max_changes {
            break;
        }
        chords.push(templates.chord(state));
        last = Some(state);
    }

    chords
}

/// Number of label changes along a path
pub fn count_changes(path: &[usize]) -> usize {
    path.windows(2).filter(|w| w[0] != w[1]).count()
}

/// Split a path into runs of identical states, with timing
///
/// # Arguments
///
/// * `path` - Decoded state index per frame
/// * `templates` - Template bank used to label states
/// * `frames_per_second` - Chroma frame rate
///
/// # Returns
///
/// Every run of the path in time order (uncapped)
///
/// # Panics
///
/// Panics under the same condition as [`compress`].
pub fn segments(
    path: &[usize],
    templates: &ChordTemplates,
    frames_per_second: f32,
) -> Vec<ChordSegment> {
    let mut out: Vec<ChordSegment> = Vec::new();
    let mut start = 0;

    for end in 1..=path.len() {
        if end == path.len() || path[end] != path[start] {
            let frame_count = end - start;
            out.push(ChordSegment {
                chord: templates.chord(path[start]),
                start_frame: start,
                frame_count,
                start_seconds: start as f32 / frames_per_second,
                duration_seconds: frame_count as f32 / frames_per_second,
            });
            start = end;
        }
    }

    out
}
