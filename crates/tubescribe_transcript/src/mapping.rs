//! Provider segment mapping.

use tubescribe_core::{RawSegment, TranscriptEntry};

/// Converts provider segments into transcript entries, keeping their order.
///
/// Segments without text become the `"N/A"` placeholder.
///
/// # Example
///
/// ```
/// use tubescribe_core::{RawSegment, TranscriptEntry};
/// use tubescribe_transcript::map_segments;
///
/// let entries = map_segments(&[RawSegment::new("hi", 0), RawSegment::untitled(65_000)]);
/// assert_eq!(
///     entries,
///     vec![TranscriptEntry::new("hi", "0:00"), TranscriptEntry::new("N/A", "1:05")]
/// );
/// ```
pub fn map_segments(segments: &[RawSegment]) -> Vec<TranscriptEntry> {
    segments.iter().map(TranscriptEntry::from).collect()
}
