//! Pure line-range mapping between panels
//!
//! Translates a range of lines seen in one panel into the range a peer
//! panel should reveal. Two behaviors exist:
//!
//! - With an offset: shift both bounds by the offset, clamping into the
//!   target document when its length is known. A range shifted wholly
//!   past the end collapses to the last line.
//! - Without an offset: the source range is returned verbatim. Peers
//!   showing the same document track the same line numbers, so no
//!   clamping is applied here.
//!
//! Selection mapping always goes through the offset path but never
//! clamps to a document length; highlight ranges past the end of a
//! shorter peer are simply invisible there.

use crate::panel::LineRange;

// ─────────────────────────────────────────────────────────────────────────────
// Range mapping
// ─────────────────────────────────────────────────────────────────────────────

/// Map a visible range from one panel onto a target panel.
///
/// `offset` is the target's stored scroll offset relative to the source;
/// `None` means the panels track identical line numbers. When
/// `target_last_line` is given, the result is clamped into
/// `0..=target_last_line`.
///
/// # Example
///
/// ```ignore
/// let source = LineRange::new(100, 120);
/// let mapped = map_range(source, Some(-20), Some(500));
/// assert_eq!(mapped, LineRange::new(80, 100));
/// ```
pub fn map_range(source: LineRange, offset: Option<i64>, target_last_line: Option<usize>) -> LineRange {
    let Some(delta) = offset else {
        return source;
    };

    let mut start = translate(source.start, delta);
    let mut end = translate(source.end, delta);

    if let Some(last) = target_last_line {
        // Collapses to a single line at the end when the whole range
        // falls past the target document.
        start = start.min(last);
        end = end.min(last);
    }

    LineRange { start, end }
}

/// Map selection ranges onto a target panel.
///
/// Unlike [`map_range`] this never clamps to a document length: ranges
/// landing past the target's end produce no visible highlight, which is
/// the desired outcome.
pub fn map_selections(selections: &[LineRange], offset: Option<i64>) -> Vec<LineRange> {
    selections
        .iter()
        .map(|&range| map_range(range, offset, None))
        .collect()
}

/// Shift a line by a signed delta, clamping below at line zero.
fn translate(line: usize, delta: i64) -> usize {
    (line as i64).saturating_add(delta).max(0) as usize
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
