//! Emission model
//!
//! Scores every frame against every template with cosine similarity of
//! unit-normalized vectors, then floors each score by adding `epsilon` so the
//! decoder can take logarithms.

use super::templates::ChordTemplates;
use crate::error::ChordError;
use crate::features::chroma::{unit_normalize, N_PITCH_CLASSES};

/// Per-frame, per-state similarity scores
///
/// Stored frame-major: the `n_states` scores of frame `t` are contiguous.
#[derive(Debug, Clone, PartialEq)]
pub struct EmissionMatrix {
    n_states: usize,
    n_frames: usize,
    values: Vec<f32>,
}

impl EmissionMatrix {
    /// Wrap precomputed scores (frame-major, `n_states` per frame)
    ///
    /// # Errors
    ///
    /// Returns `ChordError::InvalidInput` if the shape is inconsistent or any
    /// score is not a positive finite number.
    pub fn from_values(
        n_states: usize,
        n_frames: usize,
        values: Vec<f32>,
    ) -> Result<Self, ChordError> {
        if n_states == 0 || values.len() != n_states * n_frames {
            return Err(ChordError::InvalidInput(format!(
                "Emission matrix shape mismatch: {} states x {} frames, {} values",
                n_states,
                n_frames,
                values.len()
            )));
        }
        if let Some(bad) = values.iter().find(|v| !(v.is_finite() && **v > 0.0)) {
            return Err(ChordError::InvalidInput(format!(
                "Emission scores must be positive and finite, got {}",
                bad
            )));
        }
        Ok(Self {
            n_states,
            n_frames,
            values,
        })
    }

    /// Number of states (rows)
    pub fn n_states(&self) -> usize {
        self.n_states
    }

    /// Number of frames (columns)
    pub fn n_frames(&self) -> usize {
        self.n_frames
    }

    /// Score of `state` at `frame`
    pub fn get(&self, state: usize, frame: usize) -> f32 {
        self.values[frame * self.n_states + state]
    }

    /// All state scores of one frame
    pub fn frame(&self, frame: usize) -> &[f32] {
        let start = frame * self.n_states;
        &self.values[start..start + self.n_states]
    }

    /// Greedy per-frame best state (lowest index wins ties)
    pub fn frame_argmax(&self) -> Vec<usize> {
        (0..self.n_frames)
            .map(|t| {
                let scores = self.frame(t);
                let mut best = 0;
                for (state, &score) in scores.iter().enumerate().skip(1) {
                    if score > scores[best] {
                        best = state;
                    }
                }
                best
            })
            .collect()
    }
}

/// Compute emission scores for a run of chroma frames
///
/// # Arguments
///
/// * `frames` - 12-element chroma vectors (one per frame)
/// * `templates` - Chord template bank
/// * `epsilon` - Norm and log floor (e.g., 1e-6)
///
/// # Returns
///
/// `templates.len()` x `frames.len()` matrix with every entry in (0, 1 + epsilon]
pub fn compute_emissions(
    frames: &[[f32; N_PITCH_CLASSES]],
    templates: &ChordTemplates,
    epsilon: f32,
) -> EmissionMatrix {
    log::debug!(
        "Computing emissions: {} frames x {} templates",
        frames.len(),
        templates.len()
    );

    let unit_templates: Vec<[f32; N_PITCH_CLASSES]> = templates
        .iter()
        .map(|(_, v)| unit_normalize(v, epsilon))
        .collect();

    let n_states = unit_templates.len();
    let mut values = Vec::with_capacity(n_states * frames.len());

    for frame in frames {
        let unit_frame = unit_normalize(frame, epsilon);
        for template in &unit_templates {
            // Non-negative inputs keep the cosine in [0, 1]; clamp guards rounding.
            let cosine = dot_product(template, &unit_frame).max(0.0);
            values.push(cosine + epsilon);
        }
    }

    EmissionMatrix {
        n_states,
        n_frames: frames.len(),
        values,
    }
}

/// Compute dot product between two vectors.
fn dot_product(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::result::Chord;

    #[test]
    fn test_exact_template_scores_highest() {
        let templates = ChordTemplates::new();
        let c_major = *templates.vector(Chord::Major(0).index());
        let emissions = compute_emissions(&[c_major], &templates, 1e-6);

        assert_eq!(emissions.n_states(), 24);
        assert_eq!(emissions.n_frames(), 1);
        assert!((emissions.get(0, 0) - 1.0).abs() < 1e-4);

        // C major and A minor share two notes
        let am = emissions.get(Chord::Minor(9).index(), 0);
        assert!((am - 2.0 / 3.0).abs() < 1e-4);

        // F# major shares none
        let fs = emissions.get(Chord::Major(6).index(), 0);
        assert!(fs > 0.0 && fs < 1e-5);

        assert_eq!(emissions.frame_argmax(), vec![0]);
    }

    #[test]
    fn test_scores_are_bounded() {
        let templates = ChordTemplates::new();
        let frames = vec![
            [0.3, 0.1, 0.0, 0.9, 0.2, 0.0, 0.5, 0.7, 0.0, 0.0, 0.4, 0.8],
            [1.0; 12],
            [0.0; 12],
        ];
        let emissions = compute_emissions(&frames, &templates, 1e-6);
        for t in 0..emissions.n_frames() {
            for &score in emissions.frame(t) {
                assert!(score > 0.0 && score <= 1.0 + 1e-5, "score {} out of range", score);
            }
        }
    }

    #[test]
    fn test_silent_frame_is_flat() {
        let templates = ChordTemplates::new();
        let emissions = compute_emissions(&[[0.0; 12]], &templates, 1e-6);
        let first = emissions.get(0, 0);
        assert!(emissions.frame(0).iter().all(|&s| s == first));
        // Flat frame resolves to the lowest index
        assert_eq!(emissions.frame_argmax(), vec![0]);
    }

    #[test]
    fn test_from_values_validation() {
        assert!(EmissionMatrix::from_values(2, 2, vec![0.5; 4]).is_ok());
        assert!(EmissionMatrix::from_values(2, 2, vec![0.5; 3]).is_err());
        assert!(EmissionMatrix::from_values(0, 0, vec![]).is_err());
        assert!(EmissionMatrix::from_values(2, 1, vec![0.5, 0.0]).is_err());
        assert!(EmissionMatrix::from_values(2, 1, vec![0.5, f32::NAN]).is_err());
    }

    #[test]
    fn test_dot_product() {
        let a = vec![1.0, 2.0, 3.0];
        let b = vec![4.0, 5.0, 6.0];
        assert_eq!(dot_product(&a, &b), 32.0);
    }
}
