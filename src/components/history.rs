//! Rolling, time-windowed buffer of [`Snapshot`]s.
//!
//! The [`HistoryBuffer`] component keeps every snapshot recorded during the
//! trailing history window, oldest first. The recall system appends one entry
//! per tick and trims the front every tick, including while a rewind is
//! playing, so a later rewind always sees fresh data.
//!
//! # Lookup
//!
//! [`HistoryBuffer::nearest`] returns the entry whose timestamp is closest to
//! a target time. On an exact tie the oldest entry wins.

use std::collections::VecDeque;

use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

use super::snapshot::Snapshot;

/// Upper bound on the entries reserved up front by
/// [`HistoryBuffer::with_capacity_for`].
pub const MAX_PREALLOC: usize = 1024;

/// Time-ordered snapshots of one entity, bounded by a trailing window.
#[derive(Component, Clone, Debug, Default, Serialize, Deserialize)]
pub struct HistoryBuffer {
    entries: VecDeque<Snapshot>,
}

impl HistoryBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty buffer sized for `window` seconds sampled every `tick`.
    ///
    /// The reservation is capped at [`MAX_PREALLOC`] entries; longer windows
    /// grow on demand.
    pub fn with_capacity_for(window: f32, tick: f32) -> Self {
        let capacity = if window > 0.0 && tick > 0.0 {
            ((window / tick).ceil().min(MAX_PREALLOC as f32) as usize).saturating_add(1)
        } else {
            0
        };
        HistoryBuffer {
            entries: VecDeque::with_capacity(capacity),
        }
    }

    /// Append a snapshot taken now.
    ///
    /// Snapshots must arrive in chronological order; equal timestamps are
    /// allowed (a paused clock records the same time twice).
    pub fn record(&mut self, snapshot: Snapshot) {
        debug_assert!(
            self.entries
                .back()
                .is_none_or(|last| last.timestamp() <= snapshot.timestamp()),
            "history snapshots must be recorded in chronological order"
        );
        self.entries.push_back(snapshot);
    }

    /// Drop entries older than `now - window` from the front.
    ///
    /// Returns the number of evicted snapshots.
    pub fn trim(&mut self, now: f32, window: f32) -> usize {
        let cutoff = now - window;
        let mut evicted = 0;
        while self
            .entries
            .front()
            .is_some_and(|front| front.timestamp() < cutoff)
        {
            self.entries.pop_front();
            evicted += 1;
        }
        evicted
    }

    /// Find the snapshot whose timestamp is closest to `target_time`.
    ///
    /// Only a strictly smaller distance replaces the current best, so ties
    /// resolve to the earliest recorded entry. Returns `None` when empty.
    pub fn nearest(&self, target_time: f32) -> Option<Snapshot> {
        let mut iter = self.entries.iter();
        let mut best = iter.next()?;
        let mut best_diff = (best.timestamp() - target_time).abs();
        for entry in iter {
            let diff = (entry.timestamp() - target_time).abs();
            if diff < best_diff {
                best_diff = diff;
                best = entry;
            }
        }
        Some(*best)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Oldest snapshot still inside the window.
    pub fn oldest(&self) -> Option<&Snapshot> {
        self.entries.front()
    }

    /// Most recently recorded snapshot.
    pub fn newest(&self) -> Option<&Snapshot> {
        self.entries.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Snapshot> {
        self.entries.iter()
    }
}
