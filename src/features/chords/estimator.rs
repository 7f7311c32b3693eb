//! Chord estimator
//!
//! Holds the immutable template bank and transition matrix and runs the full
//! chroma -> emissions -> Viterbi path -> chord sequence pipeline. One
//! estimator can serve any number of clips, including concurrently.

use rayon::prelude::*;
use std::time::Instant;

use super::{
    compress, compute_emissions, count_changes, decode, segments, ChordTemplates,
    TransitionMatrix,
};
use crate::analysis::result::{ChordEstimate, EstimateMetadata};
use crate::config::ChordConfig;
use crate::error::ChordError;
use crate::features::chroma::ChromaMatrix;

/// Reusable chord decoder
#[derive(Debug, Clone)]
pub struct ChordEstimator {
    config: ChordConfig,
    templates: ChordTemplates,
    transitions: TransitionMatrix,
}

impl ChordEstimator {
    /// Build the template bank and transition matrix for a configuration
    ///
    /// # Errors
    ///
    /// Returns `ChordError::InvalidInput` if the configuration is invalid.
    pub fn new(config: ChordConfig) -> Result<Self, ChordError> {
        config.validate()?;
        let templates = ChordTemplates::new();
        let transitions = TransitionMatrix::uniform(config.stay_probability, templates.len())?;
        Ok(Self {
            config,
            templates,
            transitions,
        })
    }

    /// Configuration in use
    pub fn config(&self) -> &ChordConfig {
        &self.config
    }

    /// Template bank in use
    pub fn templates(&self) -> &ChordTemplates {
        &self.templates
    }

    /// Transition matrix in use
    pub fn transitions(&self) -> &TransitionMatrix {
        &self.transitions
    }

    /// Estimate the chord sequence of one clip
    ///
    /// Frames past `max_duration_seconds` are ignored.
    ///
    /// # Errors
    ///
    /// Returns `ChordError::DecodeError` if decoding hits an invariant violation.
    pub fn estimate(&self, chroma: &ChromaMatrix) -> Result<ChordEstimate, ChordError> {
        let start_time = Instant::now();

        let frames = match self.config.max_frames() {
            Some(max) => chroma.leading(max),
            None => chroma.frames(),
        };
        let frames_dropped = chroma.n_frames() - frames.len();
        if frames_dropped > 0 {
            log::warn!(
                "Ignoring {} chroma frames past {:?}s",
                frames_dropped,
                self.config.max_duration_seconds
            );
        }

        log::debug!("Estimating chords over {} frames", frames.len());

        let emissions = compute_emissions(frames, &self.templates, self.config.epsilon);
        let path = decode(&emissions, &self.transitions)?;

        let frames_per_second = self.config.frames_per_second();
        let chords = compress(&path, &self.templates, self.config.max_changes);
        let chord_segments = segments(&path, &self.templates, frames_per_second);

        let greedy_changes = count_changes(&emissions.frame_argmax());
        let decoded_changes = count_changes(&path);

        log::debug!(
            "Decoded {} chord changes ({} with greedy argmax), reporting {}",
            decoded_changes,
            greedy_changes,
            chords.len()
        );

        let processing_time_ms = start_time.elapsed().as_secs_f32() * 1000.0;

        Ok(ChordEstimate {
            chords,
            segments: chord_segments,
            metadata: EstimateMetadata {
                frames_decoded: path.len(),
                frames_dropped,
                frames_per_second,
                greedy_changes,
                decoded_changes,
                processing_time_ms,
                algorithm_version: env!("CARGO_PKG_VERSION").to_string(),
            },
            path,
        })
    }

    /// Estimate many clips in parallel
    ///
    /// Results are returned in input order; one failing clip does not affect the others.
    pub fn estimate_batch(
        &self,
        clips: &[ChromaMatrix],
    ) -> Vec<Result<ChordEstimate, ChordError>> {
        log::debug!("Estimating chords for {} clips", clips.len());
        clips.par_iter().map(|chroma| self.estimate(chroma)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::result::Chord;

    fn clip(chords: &[(Chord, usize)]) -> ChromaMatrix {
        let templates = ChordTemplates::new();
        let frames = chords
            .iter()
            .flat_map(|&(chord, n)| std::iter::repeat(*templates.vector(chord.index())).take(n))
            .collect();
        ChromaMatrix::new(frames).unwrap()
    }

    #[test]
    fn test_new_rejects_bad_config() {
        let config = ChordConfig {
            stay_probability: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            ChordEstimator::new(config),
            Err(ChordError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_accessors_reflect_config() {
        let config = ChordConfig {
            stay_probability: 0.9,
            max_changes: 8,
            ..Default::default()
        };
        let estimator = ChordEstimator::new(config).unwrap();

        assert_eq!(estimator.config().max_changes, 8);
        assert_eq!(estimator.templates().len(), 24);
        assert_eq!(estimator.transitions().n_states(), 24);
        assert!((estimator.transitions().get(3, 3) - 0.9).abs() < 1e-6);
        assert!((estimator.transitions().get(3, 4) - 0.1 / 23.0).abs() < 1e-6);
    }

    #[test]
    fn test_estimate_two_chords() {
        let estimator = ChordEstimator::new(ChordConfig::default()).unwrap();
        let chroma = clip(&[(Chord::Major(0), 20), (Chord::Major(6), 20)]);
        let estimate = estimator.estimate(&chroma).unwrap();

        assert_eq!(estimate.chords, vec![Chord::Major(0), Chord::Major(6)]);
        assert_eq!(estimate.path.len(), 40);
        assert_eq!(estimate.segments.len(), 2);
        assert_eq!(estimate.segments[1].start_frame, 20);
        assert_eq!(estimate.metadata.frames_decoded, 40);
        assert_eq!(estimate.metadata.frames_dropped, 0);
        assert_eq!(estimate.metadata.decoded_changes, 1);
    }

    #[test]
    fn test_duration_cap_drops_frames() {
        let config = ChordConfig {
            sample_rate: 100,
            hop_size: 10,
            max_duration_seconds: Some(1.0),
            ..Default::default()
        };
        let estimator = ChordEstimator::new(config).unwrap();
        let chroma = clip(&[(Chord::Minor(9), 10), (Chord::Major(3), 10)]);
        let estimate = estimator.estimate(&chroma).unwrap();

        assert_eq!(estimate.metadata.frames_decoded, 10);
        assert_eq!(estimate.metadata.frames_dropped, 10);
        assert_eq!(estimate.chords, vec![Chord::Minor(9)]);
    }

    #[test]
    fn test_batch_preserves_order() {
        let estimator = ChordEstimator::new(ChordConfig::default()).unwrap();
        let clips = vec![
            clip(&[(Chord::Major(7), 5)]),
            clip(&[(Chord::Minor(4), 5)]),
            clip(&[(Chord::Major(2), 5)]),
        ];
        let results = estimator.estimate_batch(&clips);
        let firsts: Vec<Chord> = results
            .into_iter()
            .map(|r| r.unwrap().chords[0])
            .collect();
        assert_eq!(firsts, vec![Chord::Major(7), Chord::Minor(4), Chord::Major(2)]);
    }
}
