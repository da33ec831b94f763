//! Suppression of echoed scroll events
//!
//! Revealing a range in a panel programmatically makes the host emit the
//! same scroll event a user gesture would. Without bookkeeping, each
//! reveal would be mistaken for a new gesture and the panels would drive
//! each other in a loop. Before every programmatic reveal the
//! coordinator marks the target panel here; the next scroll event from
//! that panel is then absorbed instead of starting a gesture.

use std::collections::HashMap;

use crate::panel::PanelId;

// ─────────────────────────────────────────────────────────────────────────────
// EchoPolicy
// ─────────────────────────────────────────────────────────────────────────────

/// Tuning for echo suppression.
///
/// The default absorbs exactly one event per marked panel regardless of
/// how many reveals were issued, which matches hosts that coalesce
/// consecutive reveals into a single scroll notification. Hosts that
/// report every reveal individually can raise `credits_per_reveal` or
/// set `accumulate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EchoPolicy {
    /// Credits granted by each `mark` call. Zero disables suppression
    /// entirely.
    pub credits_per_reveal: u32,
    /// Whether repeated marks add credits instead of resetting them.
    pub accumulate: bool,
}

impl Default for EchoPolicy {
    fn default() -> Self {
        Self {
            credits_per_reveal: 1,
            accumulate: false,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// EchoSuppressor
// ─────────────────────────────────────────────────────────────────────────────

/// Tracks which panels owe the coordinator an echoed scroll event.
#[derive(Debug, Default)]
pub struct EchoSuppressor {
    credits: HashMap<PanelId, u32>,
    policy: EchoPolicy,
}

impl EchoSuppressor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: EchoPolicy) -> Self {
        Self {
            credits: HashMap::new(),
            policy,
        }
    }

    /// Record that a programmatic reveal is about to be issued to `id`.
    pub fn mark(&mut self, id: PanelId) {
        if self.policy.credits_per_reveal == 0 {
            return;
        }
        if self.policy.accumulate {
            *self.credits.entry(id).or_insert(0) += self.policy.credits_per_reveal;
        } else {
            self.credits.insert(id, self.policy.credits_per_reveal);
        }
    }

    /// Consume one credit for `id`. Returns `true` when the event was an
    /// echo and must not start a gesture.
    pub fn absorb(&mut self, id: PanelId) -> bool {
        match self.credits.get_mut(&id) {
            Some(credits) => {
                *credits -= 1;
                if *credits == 0 {
                    self.credits.remove(&id);
                }
                true
            }
            None => false,
        }
    }

    /// Outstanding credits for `id`, zero when none.
    pub fn credits(&self, id: PanelId) -> u32 {
        self.credits.get(&id).copied().unwrap_or(0)
    }

    pub fn clear(&mut self) {
        self.credits.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.credits.is_empty()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
