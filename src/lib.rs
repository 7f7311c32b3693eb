//! # Chord Listener
//!
//! Chord sequence estimation from chroma features: turns a 12 x N pitch-class
//! energy matrix into a short, readable list of chord changes.
//!
//! ## Features
//!
//! - **Template Matching**: 24 binary major/minor triad templates scored with cosine similarity
//! - **Temporal Smoothing**: Viterbi decoding under a uniform stay/switch transition prior
//! - **Compact Output**: Run-length compression to a capped chord-change sequence
//! - **Text Boundary**: Always-a-string results for single-channel callers
//!
//! ## Quick Start
//!
//! ```no_run
//! use chord_listener::{estimate_chords, ChordConfig, ChromaMatrix};
//!
//! // 12 rows (C, C#, ..., B) x N frames, computed by an external extractor
//! let rows: Vec<Vec<f32>> = vec![vec![0.0; 100]; 12];
//! let chroma = ChromaMatrix::from_rows(&rows)?;
//!
//! let estimate = estimate_chords(&chroma, ChordConfig::default())?;
//! println!("Chords: {}", estimate.to_text());
//! # Ok::<(), chord_listener::ChordError>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! Chroma Matrix → Emissions → Viterbi Path → Chord Sequence → Text
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

use std::fmt;

pub mod analysis;
pub mod config;
pub mod error;
pub mod features;

// Re-export main types
pub use analysis::result::{Chord, ChordEstimate, ChordSegment, EstimateMetadata, CHORD_SEPARATOR};
pub use config::ChordConfig;
pub use error::ChordError;
pub use features::chords::ChordEstimator;
pub use features::chroma::ChromaMatrix;

/// Prefix of every failure string returned by the text boundary
pub const ERROR_PREFIX: &str = "Chord Error: ";

/// Marker that distinguishes a chord guess from other output on a shared text channel
pub const CHORD_MARKER: &str = "AI_CHORDS:";

/// Main estimation function
///
/// Decodes the chord sequence of one clip.
///
/// # Arguments
///
/// * `chroma` - Validated chroma matrix (at least one frame)
/// * `config` - Estimation configuration parameters
///
/// # Returns
///
/// `ChordEstimate` with the capped chord sequence, full segments, and the decoded path
///
/// # Errors
///
/// Returns `ChordError` if the configuration is invalid or decoding fails
///
/// # Example
///
/// ```no_run
/// use chord_listener::{estimate_chords, ChordConfig, ChromaMatrix};
///
/// let chroma = ChromaMatrix::new(vec![[0.0f32; 12]; 43])?;
/// let estimate = estimate_chords(&chroma, ChordConfig::default())?;
/// # Ok::<(), chord_listener::ChordError>(())
/// ```
pub fn estimate_chords(
    chroma: &ChromaMatrix,
    config: ChordConfig,
) -> Result<ChordEstimate, ChordError> {
    ChordEstimator::new(config)?.estimate(chroma)
}

/// Render an estimation outcome as a single line of text
///
/// Success gives the chords joined with `" -> "`; failure gives
/// `"Chord Error: <message>"`.
pub fn format_result(result: &Result<ChordEstimate, ChordError>) -> String {
    match result {
        Ok(estimate) => estimate.to_text(),
        Err(err) => {
            log::warn!("Chord estimation failed: {}", err);
            format!("{}{}", ERROR_PREFIX, err)
        }
    }
}

/// Estimate chords from a 12 x N row matrix and always return text
///
/// Never fails: malformed input comes back as a `"Chord Error: "` string.
///
/// # Example
///
/// ```
/// use chord_listener::{describe_chords, ChordConfig};
///
/// let text = describe_chords(&[], ChordConfig::default());
/// assert!(text.starts_with("Chord Error: "));
/// ```
pub fn describe_chords(rows: &[Vec<f32>], config: ChordConfig) -> String {
    let result = ChromaMatrix::from_rows(rows).and_then(|chroma| estimate_chords(&chroma, config));
    format_result(&result)
}

/// Acquire chroma rows from an external source, estimate, and always return text
///
/// A source failure (audio load, feature extraction) is reported as
/// `ChordError::UpstreamError` in the same `"Chord Error: "` form.
///
/// # Example
///
/// ```
/// use chord_listener::{describe_chords_with, ChordConfig};
///
/// let text = describe_chords_with(
///     || Err::<Vec<Vec<f32>>, _>("could not open clip.wav"),
///     ChordConfig::default(),
/// );
/// assert_eq!(text, "Chord Error: Upstream error: could not open clip.wav");
/// ```
pub fn describe_chords_with<F, E>(source: F, config: ChordConfig) -> String
where
    F: FnOnce() -> Result<Vec<Vec<f32>>, E>,
    E: fmt::Display,
{
    let result = source()
        .map_err(|e| ChordError::UpstreamError(e.to_string()))
        .and_then(|rows| ChromaMatrix::from_rows(&rows))
        .and_then(|chroma| estimate_chords(&chroma, config));
    format_result(&result)
}

/// Prefix a result string with the [`CHORD_MARKER`]
///
/// # Example
///
/// ```
/// use chord_listener::marker_line;
///
/// assert_eq!(marker_line("C -> G"), "AI_CHORDS:C -> G");
/// ```
pub fn marker_line(text: &str) -> String {
    format!("{}{}", CHORD_MARKER, text)
}
