//! Panel snapshots and the panel registry
//!
//! The coordinator keeps a mirror of every panel the host editor reports
//! as visible: its layout slot, document length, visible range, and
//! current selections. [`PanelRegistry`] is that mirror. It is updated
//! from host events before any sync decision is made, so the stored
//! positions stay truthful even while synchronization is switched off.

use std::collections::HashMap;
use std::fmt;

// ─────────────────────────────────────────────────────────────────────────────
// PanelId
// ─────────────────────────────────────────────────────────────────────────────

/// Stable identifier for a panel, assigned by the host editor.
///
/// Identity is the host's concern; the engine only compares and hashes
/// these values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PanelId(pub u64);

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// LineRange
// ─────────────────────────────────────────────────────────────────────────────

/// An inclusive range of document lines, zero-based.
///
/// Ranges are kept normalized: `start <= end` always holds. A cursor
/// without an extent is a range whose start and end coincide.
///
/// # Example
///
/// ```ignore
/// let range = LineRange::new(10, 24);
/// assert_eq!(range.start, 10);
/// assert_eq!(range.end, 24);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRange {
    /// First line of the range
    pub start: usize,
    /// Last line of the range (inclusive)
    pub end: usize,
}

impl LineRange {
    /// Create a range covering `start..=end`, swapping the bounds if
    /// they arrive reversed.
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start: start.min(end),
            end: start.max(end),
        }
    }

    /// A range containing exactly one line.
    pub fn single(line: usize) -> Self {
        Self {
            start: line,
            end: line,
        }
    }

    /// The range a freshly opened panel shows: the first line.
    pub fn top() -> Self {
        Self::single(0)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Panel
// ─────────────────────────────────────────────────────────────────────────────

/// Snapshot of one visible panel as reported by the host.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    /// Host-assigned identity
    pub id: PanelId,
    /// Layout slot within the split view, if the host has settled on one.
    /// Panels in transient states (previews being dragged, peek widgets)
    /// have no slot and never participate in synchronization.
    pub slot: Option<u32>,
    /// Index of the last line in the panel's document
    pub last_line: usize,
    /// The range of lines currently scrolled into view
    pub visible: LineRange,
    /// Current selections, normalized
    pub selections: Vec<LineRange>,
}

impl Panel {
    /// Create a panel snapshot scrolled to the top with no selections.
    pub fn new(id: PanelId, slot: Option<u32>, last_line: usize) -> Self {
        Self {
            id,
            slot,
            last_line,
            visible: LineRange::top(),
            selections: Vec::new(),
        }
    }

    /// Builder-style override of the visible range.
    pub fn with_visible(mut self, visible: LineRange) -> Self {
        self.visible = visible;
        self
    }

    /// Builder-style override of the selections.
    pub fn with_selections(mut self, selections: Vec<LineRange>) -> Self {
        self.selections = selections;
        self
    }

    /// Whether the host has assigned this panel a layout slot.
    pub fn has_slot(&self) -> bool {
        self.slot.is_some()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// PanelRegistry
// ─────────────────────────────────────────────────────────────────────────────

/// The engine's mirror of the host's visible panel set.
///
/// `refresh` replaces the whole set when the layout changes;
/// `record_visible` and `record_selections` keep individual snapshots
/// current as scroll and selection events arrive.
#[derive(Debug, Default)]
pub struct PanelRegistry {
    panels: HashMap<PanelId, Panel>,
}

impl PanelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the registry contents with a fresh set of snapshots.
    pub fn refresh(&mut self, panels: Vec<Panel>) {
        self.panels = panels.into_iter().map(|p| (p.id, p)).collect();
    }

    pub fn get(&self, id: PanelId) -> Option<&Panel> {
        self.panels.get(&id)
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    /// Whether the layout qualifies as a split view (two or more panels).
    pub fn is_split_view(&self) -> bool {
        self.panels.len() >= 2
    }

    pub fn iter(&self) -> impl Iterator<Item = &Panel> {
        self.panels.values()
    }

    /// Store a panel's new visible range and return the top line it
    /// showed before this update.
    ///
    /// Returns `None` when the panel is not in the registry, in which
    /// case nothing is stored.
    pub fn record_visible(&mut self, id: PanelId, visible: LineRange) -> Option<usize> {
        let panel = self.panels.get_mut(&id)?;
        let previous_top = panel.visible.start;
        panel.visible = visible;
        Some(previous_top)
    }

    /// Store a panel's new selections. Returns `false` when the panel is
    /// not in the registry.
    pub fn record_selections(&mut self, id: PanelId, selections: &[LineRange]) -> bool {
        match self.panels.get_mut(&id) {
            Some(panel) => {
                panel.selections = selections.to_vec();
                true
            }
            None => false,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_range_normalizes_reversed_bounds() {
        let range = LineRange::new(24, 10);
        assert_eq!(range.start, 10);
        assert_eq!(range.end, 24);
    }

    #[test]
    fn test_line_range_single() {
        let range = LineRange::single(7);
        assert_eq!(range.start, 7);
        assert_eq!(range.end, 7);
    }

    #[test]
    fn test_line_range_top() {
        assert_eq!(LineRange::top(), LineRange::new(0, 0));
    }

    #[test]
    fn test_panel_id_display() {
        assert_eq!(PanelId(3).to_string(), "#3");
    }

    #[test]
    fn test_panel_new_starts_at_top() {
        let panel = Panel::new(PanelId(1), Some(0), 99);
        assert_eq!(panel.visible, LineRange::top());
        assert!(panel.selections.is_empty());
        assert!(panel.has_slot());
    }

    #[test]
    fn test_panel_without_slot() {
        let panel = Panel::new(PanelId(1), None, 99);
        assert!(!panel.has_slot());
    }

    #[test]
    fn test_registry_refresh_replaces_contents() {
        let mut registry = PanelRegistry::new();
        registry.refresh(vec![
            Panel::new(PanelId(1), Some(0), 50),
            Panel::new(PanelId(2), Some(1), 50),
        ]);
        assert_eq!(registry.len(), 2);

        registry.refresh(vec![Panel::new(PanelId(3), Some(0), 10)]);
        assert_eq!(registry.len(), 1);
        assert!(registry.get(PanelId(1)).is_none());
        assert!(registry.get(PanelId(3)).is_some());
    }

    #[test]
    fn test_refresh_keeps_host_reported_selections() {
        let mut registry = PanelRegistry::new();
        registry.refresh(vec![Panel::new(PanelId(1), Some(0), 50)
            .with_visible(LineRange::new(10, 40))
            .with_selections(vec![LineRange::new(12, 14)])]);

        let panel = registry.get(PanelId(1)).unwrap();
        assert_eq!(panel.visible, LineRange::new(10, 40));
        assert_eq!(panel.selections, vec![LineRange::new(12, 14)]);
    }

    #[test]
    fn test_registry_split_view_needs_two_panels() {
        let mut registry = PanelRegistry::new();
        assert!(!registry.is_split_view());

        registry.refresh(vec![Panel::new(PanelId(1), Some(0), 50)]);
        assert!(!registry.is_split_view());

        registry.refresh(vec![
            Panel::new(PanelId(1), Some(0), 50),
            Panel::new(PanelId(2), Some(1), 50),
        ]);
        assert!(registry.is_split_view());
    }

    #[test]
    fn test_record_visible_returns_previous_top() {
        let mut registry = PanelRegistry::new();
        registry.refresh(vec![
            Panel::new(PanelId(1), Some(0), 200).with_visible(LineRange::new(100, 130))
        ]);

        let previous = registry.record_visible(PanelId(1), LineRange::new(110, 140));
        assert_eq!(previous, Some(100));
        assert_eq!(
            registry.get(PanelId(1)).unwrap().visible,
            LineRange::new(110, 140)
        );
    }

    #[test]
    fn test_record_visible_unknown_panel() {
        let mut registry = PanelRegistry::new();
        assert_eq!(registry.record_visible(PanelId(9), LineRange::top()), None);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_record_selections_updates_snapshot() {
        let mut registry = PanelRegistry::new();
        registry.refresh(vec![Panel::new(PanelId(1), Some(0), 50)]);

        let selections = vec![LineRange::new(3, 5), LineRange::single(10)];
        assert!(registry.record_selections(PanelId(1), &selections));
        assert_eq!(registry.get(PanelId(1)).unwrap().selections, selections);
    }

    #[test]
    fn test_record_selections_unknown_panel() {
        let mut registry = PanelRegistry::new();
        assert!(!registry.record_selections(PanelId(9), &[LineRange::single(0)]));
    }

    #[test]
    fn test_registry_iter_visits_all_panels() {
        let mut registry = PanelRegistry::new();
        registry.refresh(vec![
            Panel::new(PanelId(1), Some(0), 50),
            Panel::new(PanelId(2), Some(1), 50),
            Panel::new(PanelId(3), None, 50),
        ]);

        let mut ids: Vec<u64> = registry.iter().map(|p| p.id.0).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![1, 2, 3]);
    }
}
