//! Configuration parameters for chord estimation

use crate::error::ChordError;

/// Chord estimation configuration parameters
#[derive(Debug, Clone)]
pub struct ChordConfig {
    // Transition model
    /// Probability of staying on the same chord between adjacent frames (default: 0.95)
    /// The remaining mass is spread uniformly over the other 23 chords
    pub stay_probability: f32,

    // Output
    /// Maximum number of chord changes reported in the compressed sequence (default: 16)
    pub max_changes: usize,

    // Numerics
    /// Epsilon added to vector norms and to emission scores before taking logs (default: 1e-6)
    pub epsilon: f32,

    // Frame timing
    /// Sample rate the chroma matrix was computed at, in Hz (default: 22050)
    pub sample_rate: u32,

    /// Hop size of the chroma matrix in samples (default: 512, ~43 frames per second)
    pub hop_size: usize,

    /// Only the first `max_duration_seconds` of frames are decoded (default: 30.0)
    /// `None` decodes every frame
    pub max_duration_seconds: Option<f32>,
}

impl ChordConfig {
    /// Chroma frames per second implied by `sample_rate` and `hop_size`
    pub fn frames_per_second(&self) -> f32 {
        self.sample_rate as f32 / self.hop_size as f32
    }

    /// Maximum number of frames to decode, if a duration cap is configured
    pub fn max_frames(&self) -> Option<usize> {
        self.max_duration_seconds
            .map(|secs| (secs * self.frames_per_second()).ceil() as usize)
    }

    /// Check every parameter is usable
    ///
    /// # Errors
    ///
    /// Returns `ChordError::InvalidInput` naming the first offending parameter.
    pub fn validate(&self) -> Result<(), ChordError> {
        if !(self.stay_probability > 0.0 && self.stay_probability < 1.0) {
            return Err(ChordError::InvalidInput(format!(
                "stay_probability must be in (0, 1), got {}",
                self.stay_probability
            )));
        }

        if self.max_changes == 0 {
            return Err(ChordError::InvalidInput(
                "max_changes must be at least 1".to_string(),
            ));
        }

        if !self.epsilon.is_finite() || self.epsilon <= 0.0 {
            return Err(ChordError::InvalidInput(format!(
                "epsilon must be positive and finite, got {}",
                self.epsilon
            )));
        }

        if self.sample_rate == 0 || self.hop_size == 0 {
            return Err(ChordError::InvalidInput(format!(
                "Invalid frame timing: sample_rate={}, hop_size={}",
                self.sample_rate, self.hop_size
            )));
        }

        if let Some(secs) = self.max_duration_seconds {
            if !secs.is_finite() || secs <= 0.0 {
                return Err(ChordError::InvalidInput(format!(
                    "max_duration_seconds must be positive, got {}",
                    secs
                )));
            }
        }

        Ok(())
    }
}

impl Default for ChordConfig {
    fn default() -> Self {
        Self {
            stay_probability: 0.95,
            max_changes: 16,
            epsilon: 1e-6,
            sample_rate: 22050,
            hop_size: 512,
            max_duration_seconds: Some(30.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = ChordConfig::default();
        assert!(config.validate().is_ok());
        assert!((config.frames_per_second() - 43.066).abs() < 0.01);
        assert_eq!(config.max_frames(), Some(1292));
    }

    #[test]
    fn test_rejects_bad_stay_probability() {
        for p in [0.0, 1.0, -0.5, f32::NAN] {
            let config = ChordConfig {
                stay_probability: p,
                ..Default::default()
            };
            assert!(matches!(config.validate(), Err(ChordError::InvalidInput(_))));
        }
    }

    #[test]
    fn test_rejects_zero_cap_and_epsilon() {
        let config = ChordConfig {
            max_changes: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = ChordConfig {
            epsilon: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_no_duration_cap() {
        let config = ChordConfig {
            max_duration_seconds: None,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
        assert_eq!(config.max_frames(), None);
    }
}
