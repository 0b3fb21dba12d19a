// Copyright (c) 2025, SheetMark Contributors
// SPDX-License-Identifier: BSD-3-Clause

//! Linear undo/redo history.
//!
//! Full-snapshot stack with a cursor. Snapshot 0 is always the initial
//! state, so undo never leaves the editor without a valid region list.
//! Full snapshots instead of diffs: region counts are tens, not
//! thousands.

use crate::models::region::Region;

/// Linear snapshot history for one editor session.
#[derive(Debug, Clone)]
pub struct History {
    snapshots: Vec<Vec<Region>>,
    cursor: usize,
    /// Maximum retained snapshots; the oldest non-baseline snapshot is
    /// evicted beyond this.
    max_size: usize,
}

impl History {
    pub fn new(initial: Vec<Region>) -> Self {
        Self {
            snapshots: vec![initial],
            cursor: 0,
            max_size: 50,
        }
    }

    /// Append a snapshot after a committed mutation. Forward history (from
    /// earlier undos) is truncated first: linear undo, no branching.
    pub fn record(&mut self, snapshot: Vec<Region>) {
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push(snapshot);
        self.cursor += 1;

        if self.snapshots.len() > self.max_size {
            // Evict the oldest snapshot after the baseline; snapshot 0
            // stays so undo always bottoms out at a defined state.
            self.snapshots.remove(1);
            self.cursor -= 1;
        }
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    /// Step back one snapshot. No-op at the start of history.
    pub fn undo(&mut self) -> Option<&[Region]> {
        while self.cursor > 0 {
            self.cursor -= 1;
            let snapshot = &self.snapshots[self.cursor];
            if snapshot_valid(snapshot) {
                return Some(&self.snapshots[self.cursor]);
            }
            // A corrupted snapshot is a programming error; skip past it
            // to the last known-good state instead of crashing.
            debug_assert!(false, "corrupted history snapshot at {}", self.cursor);
            log::error!("Skipping corrupted history snapshot at {}", self.cursor);
        }
        None
    }

    /// Step forward one snapshot. No-op at the end of history.
    pub fn redo(&mut self) -> Option<&[Region]> {
        while self.cursor + 1 < self.snapshots.len() {
            self.cursor += 1;
            let snapshot = &self.snapshots[self.cursor];
            if snapshot_valid(snapshot) {
                return Some(&self.snapshots[self.cursor]);
            }
            debug_assert!(false, "corrupted history snapshot at {}", self.cursor);
            log::error!("Skipping corrupted history snapshot at {}", self.cursor);
        }
        None
    }

    /// Drop everything and restart from a new baseline (sheet load).
    pub fn reset(&mut self, initial: Vec<Region>) {
        self.snapshots = vec![initial];
        self.cursor = 0;
    }

    #[cfg(test)]
    fn cursor(&self) -> usize {
        self.cursor
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.snapshots.len()
    }
}

/// A restorable snapshot holds only normalized geometry.
fn snapshot_valid(snapshot: &[Region]) -> bool {
    snapshot.iter().all(|r| r.width > 0.0 && r.height > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::region::{RegionId, RegionOrigin};

    fn region(id: u64) -> Region {
        Region {
            id: RegionId(id),
            kind: "barcode".to_string(),
            x: 0.0,
            y: 0.0,
            width: 50.0,
            height: 30.0,
            label: format!("r{}", id),
            sequence: None,
            confidence: None,
            origin: RegionOrigin::Manual,
            attributes: serde_json::Map::new(),
        }
    }

    fn state(n: u64) -> Vec<Region> {
        (1..=n).map(region).collect()
    }

    #[test]
    fn test_undo_at_start_and_redo_at_end_are_noops() {
        let mut history = History::new(Vec::new());
        assert!(history.undo().is_none());
        assert!(history.redo().is_none());
        assert_eq!(history.cursor(), 0);

        history.record(state(1));
        assert!(history.redo().is_none());
        assert_eq!(history.cursor(), 1);
    }

    #[test]
    fn test_cursor_stays_in_bounds() {
        let mut history = History::new(Vec::new());
        for n in 1..=5 {
            history.record(state(n));
            assert!(history.cursor() < history.len());
        }
        for _ in 0..10 {
            history.undo();
            assert!(history.cursor() < history.len());
        }
        for _ in 0..10 {
            history.redo();
            assert!(history.cursor() < history.len());
        }
    }

    #[test]
    fn test_record_truncates_forward_history() {
        let mut history = History::new(Vec::new());
        history.record(state(1));
        history.record(state(2));
        history.record(state(3));

        history.undo();
        history.undo();
        assert_eq!(history.cursor(), 1);

        // Recording from the middle drops states 2 and 3.
        history.record(state(9));
        assert_eq!(history.len(), 3);
        assert!(!history.can_redo());
        assert_eq!(history.undo().unwrap(), &state(1)[..]);
    }

    #[test]
    fn test_undo_redo_roundtrip() {
        let mut history = History::new(Vec::new());
        let states: Vec<Vec<Region>> = (1..=5).map(state).collect();
        for s in &states {
            history.record(s.clone());
        }

        for expected in states.iter().rev().skip(1) {
            assert_eq!(history.undo().unwrap(), &expected[..]);
        }
        assert_eq!(history.undo().unwrap(), &[] as &[Region]);
        assert!(history.undo().is_none());

        for expected in &states {
            assert_eq!(history.redo().unwrap(), &expected[..]);
        }
        assert!(history.redo().is_none());
    }

    #[test]
    fn test_eviction_keeps_baseline() {
        let mut history = History::new(Vec::new());
        for n in 1..=60 {
            history.record(state(n));
        }
        assert_eq!(history.len(), 50);

        // Undo all the way down still reaches the baseline.
        while history.can_undo() {
            history.undo();
        }
        assert_eq!(history.cursor(), 0);
    }

    #[cfg(not(debug_assertions))]
    #[test]
    fn test_corrupted_snapshot_skipped_in_release() {
        let mut bad = state(1);
        bad[0].width = -5.0;

        let mut history = History::new(Vec::new());
        history.record(state(1));
        history.record(bad);
        history.record(state(3));

        // Undo from state 3 skips the corrupted snapshot and lands on the
        // last known-good one.
        assert_eq!(history.undo().unwrap(), &state(1)[..]);
    }
}
