//! Tandem - scroll and selection synchronization for split editor panes
//!
//! Tandem keeps side-by-side panels aligned: when one panel scrolls,
//! its peers follow, and when text is selected in one panel, the same
//! region lights up in the others. The crate is editor-agnostic; the
//! embedding editor implements [`EditorHost`] and forwards its events
//! into a [`SyncCoordinator`].
//!
//! The pieces:
//!
//! - [`coordinator`]: the state machine consuming host events
//! - [`mapper`]: pure mapping of line ranges between panels
//! - [`panel`]: panel snapshots and the registry mirroring the host
//! - [`echo`]: suppression of feedback from programmatic reveals
//! - [`config`]: user settings and their JSON persistence
//!
//! # Usage
//!
//! ```ignore
//! use tandem::{load_config, PanelId, SyncCoordinator};
//!
//! let mut coordinator = SyncCoordinator::new(load_config());
//! coordinator.handle_visible_panels_changed(&mut host, panels);
//!
//! // On every scroll event from the host:
//! coordinator.handle_visible_range_changed(PanelId(1), &ranges);
//!
//! // Once per event-loop turn:
//! coordinator.poll(&mut host);
//! ```

pub mod config;
pub mod coordinator;
pub mod echo;
pub mod error;
pub mod host;
pub mod mapper;
pub mod panel;

// Only re-export what hosts actually wire up
pub use config::{load_config, save_config, save_config_silent, SyncMode, SyncSettings};
pub use coordinator::{DriveState, SyncCoordinator};
pub use echo::EchoPolicy;
pub use error::{Error, Result};
pub use host::{DecorationId, EditorHost, INACTIVE_SELECTION_COLOR};
pub use mapper::{map_range, map_selections};
pub use panel::{LineRange, Panel, PanelId, PanelRegistry};
