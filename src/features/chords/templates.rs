//! Binary triad templates
//!
//! Defines pitch-class profiles for 24 chords (12 major + 12 minor).
//! Templates are ordered root ascending, major before minor, so state `2 * root`
//! is the major triad and `2 * root + 1` the minor triad on that root.

use crate::analysis::result::{Chord, NUM_CHORDS};
use crate::features::chroma::N_PITCH_CLASSES;

/// Semitone offsets of a major triad (root, major third, perfect fifth)
const MAJOR_INTERVALS: [usize; 3] = [0, 4, 7];

/// Semitone offsets of a minor triad (root, minor third, perfect fifth)
const MINOR_INTERVALS: [usize; 3] = [0, 3, 7];

/// Chord templates for all 24 triads
#[derive(Debug, Clone)]
pub struct ChordTemplates {
    chords: [Chord; NUM_CHORDS],
    vectors: [[f32; N_PITCH_CLASSES]; NUM_CHORDS],
}

impl ChordTemplates {
    /// Create the 24 binary triad templates
    pub fn new() -> Self {
        let mut chords = [Chord::Major(0); NUM_CHORDS];
        let mut vectors = [[0.0f32; N_PITCH_CLASSES]; NUM_CHORDS];

        for root in 0..N_PITCH_CLASSES {
            let major = root * 2;
            let minor = major + 1;

            chords[major] = Chord::Major(root as u32);
            vectors[major] = triad(root, &MAJOR_INTERVALS);

            chords[minor] = Chord::Minor(root as u32);
            vectors[minor] = triad(root, &MINOR_INTERVALS);
        }

        Self { chords, vectors }
    }

    /// Number of templates (always 24)
    pub fn len(&self) -> usize {
        NUM_CHORDS
    }

    /// Always false; present for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Chord for a state index
    ///
    /// # Panics
    ///
    /// Panics if `index >= 24`.
    pub fn chord(&self, index: usize) -> Chord {
        self.chords[index]
    }

    /// Label for a state index (e.g., "C#m")
    ///
    /// # Panics
    ///
    /// Panics if `index >= 24`.
    pub fn label(&self, index: usize) -> String {
        self.chords[index].name()
    }

    /// Template vector for a state index
    ///
    /// # Panics
    ///
    /// Panics if `index >= 24`.
    pub fn vector(&self, index: usize) -> &[f32; N_PITCH_CLASSES] {
        &self.vectors[index]
    }

    /// Iterate over (chord, vector) pairs in state order
    pub fn iter(&self) -> impl Iterator<Item = (Chord, &[f32; N_PITCH_CLASSES])> + '_ {
        self.chords.iter().copied().zip(self.vectors.iter())
    }
}

impl Default for ChordTemplates {
    fn default() -> Self {
        Self::new()
    }
}

fn triad(root: usize, intervals: &[usize; 3]) -> [f32; N_PITCH_CLASSES] {
    let mut v = [0.0f32; N_PITCH_CLASSES];
    for &interval in intervals {
        v[(root + interval) % N_PITCH_CLASSES] = 1.0;
    }
    v
}
