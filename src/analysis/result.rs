//! Chord estimation result types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Note names indexed by pitch class (0 = C)
pub(crate) const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Number of chord states (12 roots x major/minor)
pub const NUM_CHORDS: usize = 24;

/// Major or minor triad
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Chord {
    /// Major triad (0 = C, 1 = C#, ..., 11 = B)
    Major(u32),
    /// Minor triad (0 = C, 1 = C#, ..., 11 = B)
    Minor(u32),
}

impl Chord {
    /// Get chord name in lead-sheet notation (e.g., "C", "Am", "F#", "D#m")
    ///
    /// # Example
    ///
    /// ```
    /// use chord_listener::Chord;
    ///
    /// assert_eq!(Chord::Major(0).name(), "C");
    /// assert_eq!(Chord::Major(6).name(), "F#");
    /// assert_eq!(Chord::Minor(9).name(), "Am");
    /// assert_eq!(Chord::Minor(1).name(), "C#m");
    /// ```
    pub fn name(&self) -> String {
        let root = NOTE_NAMES[self.root() as usize];
        match self {
            Chord::Major(_) => root.to_string(),
            Chord::Minor(_) => format!("{}m", root),
        }
    }

    /// Parse a chord name produced by [`Chord::name`]
    ///
    /// Only sharps are recognized, matching the template bank spelling.
    ///
    /// # Example
    ///
    /// ```
    /// use chord_listener::Chord;
    ///
    /// assert_eq!(Chord::from_name("G#m"), Some(Chord::Minor(8)));
    /// assert_eq!(Chord::from_name("B"), Some(Chord::Major(11)));
    /// assert_eq!(Chord::from_name("Bb"), None);
    /// ```
    pub fn from_name(name: &str) -> Option<Self> {
        let (root, minor) = match name.strip_suffix('m') {
            Some(root) => (root, true),
            None => (name, false),
        };
        let pc = NOTE_NAMES.iter().position(|&n| n == root)? as u32;
        Some(if minor { Chord::Minor(pc) } else { Chord::Major(pc) })
    }

    /// Root pitch class (0-11)
    pub fn root(&self) -> u32 {
        match self {
            Chord::Major(i) | Chord::Minor(i) => *i % 12,
        }
    }

    /// State index in template order: root ascending, major before minor
    pub fn index(&self) -> usize {
        let major = self.root() as usize * 2;
        match self {
            Chord::Major(_) => major,
            Chord::Minor(_) => major + 1,
        }
    }

    /// Inverse of [`Chord::index`]
    pub fn from_index(index: usize) -> Option<Self> {
        if index >= NUM_CHORDS {
            return None;
        }
        let root = (index / 2) as u32;
        Some(if index % 2 == 0 {
            Chord::Major(root)
        } else {
            Chord::Minor(root)
        })
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

/// One run of identical labels in the decoded path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChordSegment {
    /// Chord held during the run
    pub chord: Chord,

    /// First frame of the run
    pub start_frame: usize,

    /// Number of frames in the run (always >= 1)
    pub frame_count: usize,

    /// Start time in seconds
    pub start_seconds: f32,

    /// Duration in seconds
    pub duration_seconds: f32,
}

/// Complete chord estimation result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChordEstimate {
    /// Compressed chord-change sequence, capped at `max_changes`
    pub chords: Vec<Chord>,

    /// Uncapped run-length segments of the decoded path
    pub segments: Vec<ChordSegment>,

    /// Decoded state index per frame
    pub path: Vec<usize>,

    /// Estimation metadata
    pub metadata: EstimateMetadata,
}

impl ChordEstimate {
    /// Chord labels joined with `" -> "`
    pub fn to_text(&self) -> String {
        self.chords
            .iter()
            .map(Chord::name)
            .collect::<Vec<_>>()
            .join(CHORD_SEPARATOR)
    }
}

/// Separator between chord labels in the text form
pub const CHORD_SEPARATOR: &str = " -> ";

/// Estimation metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimateMetadata {
    /// Number of frames decoded
    pub frames_decoded: usize,

    /// Frames ignored because of the duration cap
    pub frames_dropped: usize,

    /// Chroma frame rate used for timestamps
    pub frames_per_second: f32,

    /// Label changes a greedy per-frame argmax would have produced
    pub greedy_changes: usize,

    /// Label changes in the decoded path
    pub decoded_changes: usize,

    /// Processing time in milliseconds
    pub processing_time_ms: f32,

    /// Algorithm version
    pub algorithm_version: String,
}
