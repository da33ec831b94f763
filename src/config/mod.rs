//! Configuration for the synchronization engine
//!
//! This module handles the user-facing settings and their JSON
//! persistence to platform-specific directories.

mod persistence;
mod settings;

pub use persistence::*;
pub use settings::*;
