//! The synchronization coordinator
//!
//! This module ties the engine together. It consumes host events,
//! tracks which panel is currently driving, and fans the driver's
//! position out to every peer panel. It provides:
//!
//! - Gesture tracking with per-gesture scroll offsets
//! - Coalescing of scroll bursts into one reveal per event-loop turn
//! - Feedback loop prevention via echo suppression
//! - Selection highlight mirroring across panels
//!
//! # Architecture
//!
//! Scroll events do not cause reveals directly. A scroll from the
//! driver is folded into a single pending reveal, and [`SyncCoordinator::poll`],
//! called once per event-loop turn, delivers it to every other visible
//! panel. Each delivered reveal deposits an echo credit, so the
//! synthetic scroll event it triggers is absorbed instead of starting a
//! gesture of its own.
//!
//! # Usage
//!
//! ```ignore
//! let mut coordinator = SyncCoordinator::new(load_config());
//!
//! // Forward host events as they arrive:
//! coordinator.handle_visible_panels_changed(&mut host, panels);
//! coordinator.handle_visible_range_changed(PanelId(1), &ranges);
//!
//! // Once per event-loop turn:
//! coordinator.poll(&mut host);
//! ```

use log::{debug, info};
use std::collections::HashMap;

use crate::config::SyncSettings;
use crate::echo::{EchoPolicy, EchoSuppressor};
use crate::host::{DecorationId, EditorHost, INACTIVE_SELECTION_COLOR};
use crate::mapper::{map_range, map_selections};
use crate::panel::{LineRange, Panel, PanelId, PanelRegistry};

// ─────────────────────────────────────────────────────────────────────────────
// Drive State
// ─────────────────────────────────────────────────────────────────────────────

/// Who, if anyone, is currently driving the other panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriveState {
    /// No gesture in progress
    Idle,
    /// The given panel's scroll position is being mirrored
    Driving(PanelId),
}

impl DriveState {
    pub fn is_idle(&self) -> bool {
        matches!(self, DriveState::Idle)
    }

    /// The driving panel, if a gesture is in progress.
    pub fn driver(&self) -> Option<PanelId> {
        match self {
            DriveState::Idle => None,
            DriveState::Driving(id) => Some(*id),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Pending Reveal
// ─────────────────────────────────────────────────────────────────────────────

/// The latest driver position awaiting fan-out. Scroll bursts overwrite
/// this in place, so peers only ever chase the newest position.
#[derive(Debug, Clone, Copy)]
struct PendingReveal {
    driver: PanelId,
    visible: LineRange,
}

// ─────────────────────────────────────────────────────────────────────────────
// Sync Coordinator
// ─────────────────────────────────────────────────────────────────────────────

/// State machine coordinating scroll and selection across panels.
#[derive(Debug)]
pub struct SyncCoordinator {
    /// Active user settings
    settings: SyncSettings,
    /// Mirror of the host's visible panel set
    registry: PanelRegistry,
    /// Current gesture state
    drive: DriveState,
    /// Per-panel scroll offsets, captured when the current gesture
    /// started. Empty in proportional mode.
    offsets: HashMap<PanelId, i64>,
    /// Echo credits for programmatic reveals
    echoes: EchoSuppressor,
    /// Reveal waiting for the next `poll`
    pending: Option<PendingReveal>,
    /// Highlight style for the most recent selection mirroring
    highlight: Option<DecorationId>,
}

impl Default for SyncCoordinator {
    fn default() -> Self {
        Self::new(SyncSettings::default())
    }
}

impl SyncCoordinator {
    /// Create a coordinator with the given settings and default echo
    /// policy.
    pub fn new(settings: SyncSettings) -> Self {
        Self {
            settings,
            registry: PanelRegistry::new(),
            drive: DriveState::Idle,
            offsets: HashMap::new(),
            echoes: EchoSuppressor::new(),
            pending: None,
            highlight: None,
        }
    }

    /// Create a coordinator with a custom echo policy, for hosts whose
    /// reveal-to-event behavior differs from the default.
    pub fn with_echo_policy(settings: SyncSettings, policy: EchoPolicy) -> Self {
        Self {
            echoes: EchoSuppressor::with_policy(policy),
            ..Self::new(settings)
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Event Handlers
    // ─────────────────────────────────────────────────────────────────────────

    /// The host's set of visible panels changed: a panel opened, closed,
    /// or moved. Replaces the registry and abandons any gesture in
    /// progress.
    pub fn handle_visible_panels_changed(&mut self, host: &mut dyn EditorHost, panels: Vec<Panel>) {
        debug!("Visible panel set changed: {} panel(s)", panels.len());
        self.registry.refresh(panels);
        self.reset(host);
    }

    /// The user changed the master switch or the mapping mode. Adopts
    /// the new settings and abandons any gesture in progress.
    pub fn handle_settings_changed(&mut self, host: &mut dyn EditorHost, settings: SyncSettings) {
        info!("{}", settings.status_label());
        self.settings = settings;
        self.reset(host);
    }

    /// A panel's visible range changed, by user gesture or by one of
    /// our own reveals.
    ///
    /// The registry snapshot is updated unconditionally, so positions
    /// stay truthful even while synchronization is off. When the event
    /// qualifies as (part of) a gesture, the reveal is queued for the
    /// next [`poll`](Self::poll).
    pub fn handle_visible_range_changed(&mut self, id: PanelId, ranges: &[LineRange]) {
        let Some(&visible) = ranges.first() else {
            return;
        };

        // Mirror first: the stored position must be current before any
        // guard can bail out.
        let Some(previous_top) = self.registry.record_visible(id, visible) else {
            debug!("Scroll from unknown panel {}", id);
            return;
        };

        if !self.registry.is_split_view() || !self.settings.enabled {
            return;
        }

        // Panels without a layout slot never drive.
        if !self.registry.get(id).map_or(false, |p| p.has_slot()) {
            return;
        }

        if self.drive.driver() != Some(id) {
            if self.echoes.absorb(id) {
                debug!("Absorbed echoed scroll from panel {}", id);
                return;
            }
            self.begin_gesture(id, previous_top);
        }

        self.pending = Some(PendingReveal { driver: id, visible });
    }

    /// A panel's selections changed. Mirrors them as highlights onto
    /// every other visible panel, mapped through the offsets of the
    /// most recent gesture.
    ///
    /// Selection mirroring is immediate; unlike scrolling it does not
    /// wait for [`poll`](Self::poll), and highlights cause no echoes.
    pub fn handle_selection_changed(
        &mut self,
        host: &mut dyn EditorHost,
        id: PanelId,
        selections: &[LineRange],
    ) {
        if !self.registry.record_selections(id, selections) {
            debug!("Selection change from unknown panel {}", id);
            return;
        }

        if !self.registry.is_split_view() || !self.settings.enabled {
            return;
        }
        if !self.registry.get(id).map_or(false, |p| p.has_slot()) {
            return;
        }

        // One style per selection event; the previous one is torn down
        // so stale highlights never linger.
        if let Some(old) = self.highlight.take() {
            host.dispose_decoration(old);
        }
        let decoration = host.create_highlight_style(INACTIVE_SELECTION_COLOR);
        self.highlight = Some(decoration);

        for target in host.list_visible_panels() {
            if target == id {
                continue;
            }
            let mapped = map_selections(selections, self.offsets.get(&target).copied());
            host.apply_highlight(target, decoration, &mapped);
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Delivery
    // ─────────────────────────────────────────────────────────────────────────

    /// Deliver the pending reveal, if any. Call once per event-loop
    /// turn.
    ///
    /// Every panel the host still reports as visible, other than the
    /// driver, is scrolled to the mapped position and charged an echo
    /// credit. The gesture then returns to idle; its offsets are kept
    /// for selection mirroring until the next gesture or reset.
    pub fn poll(&mut self, host: &mut dyn EditorHost) {
        let Some(reveal) = self.pending.take() else {
            return;
        };

        for id in host.list_visible_panels() {
            if id == reveal.driver {
                continue;
            }
            // Visibility is re-checked against the registry; a panel
            // that vanished mid-gesture is skipped.
            let Some(target) = self.registry.get(id) else {
                continue;
            };
            let mapped = map_range(
                reveal.visible,
                self.offsets.get(&id).copied(),
                Some(target.last_line),
            );
            self.echoes.mark(id);
            host.reveal_range_at_top(id, mapped);
            debug!("Revealed lines {}..={} in panel {}", mapped.start, mapped.end, id);
        }

        self.drive = DriveState::Idle;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Gesture Lifecycle
    // ─────────────────────────────────────────────────────────────────────────

    /// Start a new gesture driven by `driver`, whose top line before
    /// the triggering event was `driver_top`.
    ///
    /// In offset mode each peer's offset is captured as the distance
    /// between its current top line and the driver's pre-event top, so
    /// peers keep their relative positions for the whole gesture.
    fn begin_gesture(&mut self, driver: PanelId, driver_top: usize) {
        self.offsets.clear();
        if self.settings.mode.is_offset() {
            for peer in self.registry.iter() {
                if peer.id == driver {
                    continue;
                }
                self.offsets
                    .insert(peer.id, peer.visible.start as i64 - driver_top as i64);
            }
        }
        self.drive = DriveState::Driving(driver);
        debug!(
            "Panel {} started driving ({} mode)",
            driver,
            self.settings.mode.label()
        );
    }

    /// Drop all transient state: gesture, offsets, echo credits, the
    /// pending reveal, and any highlight still on screen.
    fn reset(&mut self, host: &mut dyn EditorHost) {
        self.offsets.clear();
        self.echoes.clear();
        self.pending = None;
        self.drive = DriveState::Idle;
        if let Some(decoration) = self.highlight.take() {
            host.dispose_decoration(decoration);
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn settings(&self) -> SyncSettings {
        self.settings
    }

    pub fn drive_state(&self) -> DriveState {
        self.drive
    }

    /// The panel registry, as last refreshed and updated by events.
    pub fn panels(&self) -> &PanelRegistry {
        &self.registry
    }

    pub fn is_split_view(&self) -> bool {
        self.registry.is_split_view()
    }

    /// The stored offset for `id` from the most recent offset-mode
    /// gesture, if any.
    pub fn offset_for(&self, id: PanelId) -> Option<i64> {
        self.offsets.get(&id).copied()
    }

    /// Whether a reveal is queued for the next `poll`.
    pub fn has_pending_reveal(&self) -> bool {
        self.pending.is_some()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
