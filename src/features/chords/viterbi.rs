//! Viterbi chord decoder
//!
//! Finds the single most likely state path given emission and transition
//! scores. Works in log space so long clips do not underflow.
//!
//! Ties (equal candidate scores) always resolve to the lowest state index, both
//! for backpointers and for the final state, so output is deterministic.
//!
//! Cost is O(N * S^2); for S = 24 and a 30 s clip (~1300 frames) this is well
//! under a million additions.

use super::emission::EmissionMatrix;
use super::transition::TransitionMatrix;
use crate::error::ChordError;

/// Decode the maximum-likelihood state path
///
/// # Arguments
///
/// * `emissions` - Per-frame state scores, all positive
/// * `transitions` - Row-stochastic transition matrix with the same state count
///
/// # Returns
///
/// One state index per frame, in time order
///
/// # Errors
///
/// - `ChordError::InvalidInput` if there are no frames
/// - `ChordError::DecodeError` if the state counts differ, the transition matrix
///   is not row-stochastic, or the best score is not finite
pub fn decode(
    emissions: &EmissionMatrix,
    transitions: &TransitionMatrix,
) -> Result<Vec<usize>, ChordError> {
    let n_frames = emissions.n_frames();
    let n_states = emissions.n_states();

    log::debug!("Viterbi decoding: {} frames x {} states", n_frames, n_states);

    if n_frames == 0 {
        return Err(ChordError::InvalidInput(
            "Cannot decode an empty frame sequence".to_string(),
        ));
    }

    if transitions.n_states() != n_states {
        return Err(ChordError::DecodeError(format!(
            "Transition matrix has {} states, emission matrix has {}",
            transitions.n_states(),
            n_states
        )));
    }
    transitions.validate()?;

    let log_trans = transitions.log_probs();

    let mut scores: Vec<f32> = emissions.frame(0).iter().map(|e| e.ln()).collect();
    let mut next_scores = vec![0.0f32; n_states];
    // Row t holds the best predecessor of each state at frame t; row 0 is unused.
    let mut backpointers = vec![0usize; n_frames * n_states];

    for t in 1..n_frames {
        let emit = emissions.frame(t);
        let back = &mut backpointers[t * n_states..(t + 1) * n_states];

        for (state, (next, bp)) in next_scores.iter_mut().zip(back.iter_mut()).enumerate() {
            let mut best_prev = 0;
            let mut best_score = scores[0] + log_trans[state];
            for (prev, &prev_score) in scores.iter().enumerate().skip(1) {
                let candidate = prev_score + log_trans[prev * n_states + state];
                if candidate > best_score {
                    best_score = candidate;
                    best_prev = prev;
                }
            }
            *next = best_score + emit[state].ln();
            *bp = best_prev;
        }

        std::mem::swap(&mut scores, &mut next_scores);
    }

    let last_state = argmax(&scores);
    if !scores[last_state].is_finite() {
        return Err(ChordError::DecodeError(format!(
            "Best path score is not finite ({})",
            scores[last_state]
        )));
    }

    let mut path = Vec::with_capacity(n_frames);
    let mut state = last_state;
    path.push(state);
    for t in (1..n_frames).rev() {
        state = backpointers[t * n_states + state];
        path.push(state);
    }
    path.reverse();

    log::debug!(
        "Viterbi best final state {} (log score {:.3})",
        last_state,
        scores[last_state]
    );

    Ok(path)
}

/// Index of the largest value, lowest index on ties
fn argmax(values: &[f32]) -> usize {
    let mut best = 0;
    for (i, &v) in values.iter().enumerate().skip(1) {
        if v > values[best] {
            best = i;
        }
    }
    best
}
