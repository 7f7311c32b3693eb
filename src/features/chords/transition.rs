//! Transition model
//!
//! Uniform, label-agnostic smoothing prior: stay on the current chord with
//! probability `stay_probability`, move to any other chord with equal share of
//! the remainder.

use crate::error::ChordError;

/// Tolerance for row sums when checking the matrix is row-stochastic
pub const ROW_SUM_TOLERANCE: f32 = 1e-4;

/// Square matrix of state-to-state transition probabilities
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionMatrix {
    n_states: usize,
    /// Row-major: `probs[from * n_states + to]`
    probs: Vec<f32>,
}

impl TransitionMatrix {
    /// Build the uniform stay/switch matrix
    ///
    /// # Arguments
    ///
    /// * `stay_probability` - Diagonal value, in (0, 1)
    /// * `n_states` - Number of states (24 for the triad bank), at least 2
    ///
    /// # Errors
    ///
    /// Returns `ChordError::InvalidInput` if `stay_probability` is outside (0, 1)
    /// or there are fewer than two states.
    pub fn uniform(stay_probability: f32, n_states: usize) -> Result<Self, ChordError> {
        if !(stay_probability > 0.0 && stay_probability < 1.0) {
            return Err(ChordError::InvalidInput(format!(
                "stay_probability must be in (0, 1), got {}",
                stay_probability
            )));
        }
        if n_states < 2 {
            return Err(ChordError::InvalidInput(format!(
                "Transition model needs at least 2 states, got {}",
                n_states
            )));
        }

        let switch = (1.0 - stay_probability) / (n_states - 1) as f32;
        let mut probs = vec![switch; n_states * n_states];
        for s in 0..n_states {
            probs[s * n_states + s] = stay_probability;
        }

        log::debug!(
            "Built {}x{} transition matrix: stay={:.4}, switch={:.6}",
            n_states,
            n_states,
            stay_probability,
            switch
        );

        Ok(Self { n_states, probs })
    }

    /// Wrap arbitrary rows without checking they are stochastic
    ///
    /// Row sums are checked by [`TransitionMatrix::validate`], which the decoder
    /// calls before every run.
    ///
    /// # Errors
    ///
    /// Returns `ChordError::InvalidInput` if the rows do not form a non-empty square matrix.
    pub fn from_rows(rows: &[Vec<f32>]) -> Result<Self, ChordError> {
        let n_states = rows.len();
        if n_states == 0 {
            return Err(ChordError::InvalidInput(
                "Empty transition matrix".to_string(),
            ));
        }
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != n_states) {
            return Err(ChordError::InvalidInput(format!(
                "Transition row {} has {} entries, expected {}",
                i,
                row.len(),
                n_states
            )));
        }
        Ok(Self {
            n_states,
            probs: rows.iter().flatten().copied().collect(),
        })
    }

    /// Number of states
    pub fn n_states(&self) -> usize {
        self.n_states
    }

    /// Probability of moving from `from` to `to`
    pub fn get(&self, from: usize, to: usize) -> f32 {
        self.probs[from * self.n_states + to]
    }

    /// Outgoing probabilities of one state
    pub fn row(&self, from: usize) -> &[f32] {
        let start = from * self.n_states;
        &self.probs[start..start + self.n_states]
    }

    /// Check every entry is in (0, 1] and every row sums to 1
    ///
    /// # Errors
    ///
    /// Returns `ChordError::DecodeError` naming the first offending row.
    pub fn validate(&self) -> Result<(), ChordError> {
        for from in 0..self.n_states {
            let row = self.row(from);
            if let Some(p) = row.iter().find(|p| !(p.is_finite() && **p > 0.0 && **p <= 1.0)) {
                return Err(ChordError::DecodeError(format!(
                    "Transition row {} has probability {} outside (0, 1]",
                    from, p
                )));
            }
            let sum: f32 = row.iter().sum();
            if (sum - 1.0).abs() > ROW_SUM_TOLERANCE {
                return Err(ChordError::DecodeError(format!(
                    "Transition row {} sums to {}, expected 1",
                    from, sum
                )));
            }
        }
        Ok(())
    }

    /// Natural log of every entry, row-major
    pub(crate) fn log_probs(&self) -> Vec<f32> {
        self.probs.iter().map(|p| p.ln()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_rows_sum_to_one() {
        let trans = TransitionMatrix::uniform(0.95, 24).unwrap();
        assert_eq!(trans.n_states(), 24);
        for s in 0..24 {
            let sum: f32 = trans.row(s).iter().sum();
            assert!((sum - 1.0).abs() < 1e-5, "row {} sums to {}", s, sum);
            assert_eq!(trans.get(s, s), 0.95);
        }
        assert!((trans.get(0, 1) - 0.05 / 23.0).abs() < 1e-7);
        assert!(trans.validate().is_ok());
    }

    #[test]
    fn test_uniform_rejects_bad_parameters() {
        assert!(TransitionMatrix::uniform(1.0, 24).is_err());
        assert!(TransitionMatrix::uniform(0.0, 24).is_err());
        assert!(TransitionMatrix::uniform(0.5, 1).is_err());
    }

    #[test]
    fn test_validate_catches_bad_rows() {
        let rows = vec![vec![0.5, 0.5], vec![0.5, 0.4]];
        let trans = TransitionMatrix::from_rows(&rows).unwrap();
        assert!(matches!(trans.validate(), Err(ChordError::DecodeError(_))));

        let rows = vec![vec![1.0, 0.0], vec![0.5, 0.5]];
        let trans = TransitionMatrix::from_rows(&rows).unwrap();
        assert!(matches!(trans.validate(), Err(ChordError::DecodeError(_))));
    }

    #[test]
    fn test_from_rows_shape() {
        assert!(TransitionMatrix::from_rows(&[]).is_err());
        assert!(TransitionMatrix::from_rows(&[vec![0.5, 0.5]]).is_err());
    }

    #[test]
    fn test_log_probs_are_finite() {
        let trans = TransitionMatrix::uniform(0.95, 24).unwrap();
        assert!(trans.log_probs().iter().all(|p| p.is_finite()));
    }
}
