//! Validated chroma feature matrix
//!
//! The matrix is produced externally (e.g., CENS or CQT chroma with a fixed
//! hop size). This type only checks shape and values.

use crate::error::ChordError;

/// Number of pitch classes per frame
pub const N_PITCH_CLASSES: usize = 12;

/// Ordered sequence of 12-element pitch-class vectors, one per frame
///
/// Always holds at least one frame; every value is finite and non-negative.
#[derive(Debug, Clone, PartialEq)]
pub struct ChromaMatrix {
    frames: Vec<[f32; N_PITCH_CLASSES]>,
}

impl ChromaMatrix {
    /// Build a matrix from frame vectors
    ///
    /// # Errors
    ///
    /// Returns `ChordError::InvalidInput` if there are no frames or any value
    /// is non-finite or negative.
    pub fn new(frames: Vec<[f32; N_PITCH_CLASSES]>) -> Result<Self, ChordError> {
        if frames.is_empty() {
            return Err(ChordError::InvalidInput(
                "Empty chroma matrix".to_string(),
            ));
        }

        for (t, frame) in frames.iter().enumerate() {
            for (pc, &value) in frame.iter().enumerate() {
                if !value.is_finite() {
                    return Err(ChordError::InvalidInput(format!(
                        "Non-finite chroma value {} at frame {}, pitch class {}",
                        value, t, pc
                    )));
                }
                if value < 0.0 {
                    return Err(ChordError::InvalidInput(format!(
                        "Negative chroma value {} at frame {}, pitch class {}",
                        value, t, pc
                    )));
                }
            }
        }

        Ok(Self { frames })
    }

    /// Build a matrix from per-frame vectors (N x 12 orientation)
    ///
    /// # Errors
    ///
    /// Returns `ChordError::InvalidInput` if any frame does not have 12 elements,
    /// or for the conditions listed on [`ChromaMatrix::new`].
    pub fn from_frames(chroma_vectors: &[Vec<f32>]) -> Result<Self, ChordError> {
        let mut frames = Vec::with_capacity(chroma_vectors.len());
        for (i, chroma) in chroma_vectors.iter().enumerate() {
            let frame: [f32; N_PITCH_CLASSES] = chroma.as_slice().try_into().map_err(|_| {
                ChordError::InvalidInput(format!(
                    "Chroma vector at index {} has {} elements, expected {}",
                    i,
                    chroma.len(),
                    N_PITCH_CLASSES
                ))
            })?;
            frames.push(frame);
        }
        Self::new(frames)
    }

    /// Build a matrix from pitch-class rows (12 x N orientation)
    ///
    /// # Errors
    ///
    /// Returns `ChordError::InvalidInput` if there are not exactly 12 rows, the
    /// rows differ in length, or for the conditions listed on [`ChromaMatrix::new`].
    pub fn from_rows(rows: &[Vec<f32>]) -> Result<Self, ChordError> {
        if rows.len() != N_PITCH_CLASSES {
            return Err(ChordError::InvalidInput(format!(
                "Chroma matrix must have {} rows, got {}",
                N_PITCH_CLASSES,
                rows.len()
            )));
        }

        let n_frames = rows[0].len();
        if let Some((pc, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != n_frames) {
            return Err(ChordError::InvalidInput(format!(
                "Chroma row {} has {} frames, expected {}",
                pc,
                row.len(),
                n_frames
            )));
        }

        let frames = (0..n_frames)
            .map(|t| {
                let mut frame = [0.0f32; N_PITCH_CLASSES];
                for (pc, row) in rows.iter().enumerate() {
                    frame[pc] = row[t];
                }
                frame
            })
            .collect();
        Self::new(frames)
    }

    /// Number of frames (always >= 1)
    pub fn n_frames(&self) -> usize {
        self.frames.len()
    }

    /// All frames in time order
    pub fn frames(&self) -> &[[f32; N_PITCH_CLASSES]] {
        &self.frames
    }

    /// Leading frames, at most `max_frames` of them (at least one is always kept)
    pub fn leading(&self, max_frames: usize) -> &[[f32; N_PITCH_CLASSES]] {
        let n = max_frames.max(1).min(self.frames.len());
        &self.frames[..n]
    }
}
