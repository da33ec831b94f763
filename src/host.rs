//! The seam between the engine and the embedding editor
//!
//! The engine never talks to a concrete editor. The host implements
//! [`EditorHost`] and feeds events into the coordinator; the coordinator
//! calls back through the same trait to reveal ranges and paint
//! highlights. Everything behind the trait is assumed cheap and
//! synchronous.

use crate::panel::{LineRange, PanelId};

/// Theme color used for mirrored selection highlights, named after the
/// host's "inactive selection" background so mirrored text reads as
/// selected-but-unfocused.
pub const INACTIVE_SELECTION_COLOR: &str = "editor.inactiveSelectionBackground";

/// Handle to a highlight style registered with the host.
///
/// A fresh style is created for each selection event and the previous
/// one disposed; the host owns the styling, the engine only the
/// lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DecorationId(pub u64);

/// Operations the embedding editor must provide.
pub trait EditorHost {
    /// The panels currently on screen. Consulted at delivery time so
    /// reveals never target a panel that closed mid-gesture.
    fn list_visible_panels(&self) -> Vec<PanelId>;

    /// Scroll `panel` so that `range.start` becomes its top visible
    /// line.
    fn reveal_range_at_top(&mut self, panel: PanelId, range: LineRange);

    /// Register a highlight style keyed by a theme color name and
    /// return its handle.
    fn create_highlight_style(&mut self, theme_color: &str) -> DecorationId;

    /// Paint `ranges` in `panel` using a previously created style.
    /// An empty slice clears the style's highlights in that panel.
    fn apply_highlight(&mut self, panel: PanelId, decoration: DecorationId, ranges: &[LineRange]);

    /// Remove a style and all highlights painted with it, in every
    /// panel.
    fn dispose_decoration(&mut self, decoration: DecorationId);
}
