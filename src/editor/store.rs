// Copyright (c) 2025, SheetMark Contributors
// SPDX-License-Identifier: BSD-3-Clause

//! Authoritative ordered region collection.
//!
//! The store owns the region list (Vec order is z-order) and validates
//! every mutation: draws below the minimum size and operations on unknown
//! ids are silent no-ops. History snapshots are the session's job, not
//! the store's.

use crate::editor::suggest::Candidate;
use crate::editor::taxonomy::TypeSpec;
use crate::models::region::{Region, RegionId, RegionOrigin, RegionPatch};
use crate::util::geometry::RectF;

/// Store-level validation limits, set by the host at initialization.
#[derive(Debug, Clone, Copy)]
pub struct StoreConfig {
    /// Minimum committed region extents in image pixels. Draw gestures
    /// below this are accidental click artifacts and are rejected.
    pub min_width: f64,
    pub min_height: f64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            min_width: 20.0,
            min_height: 20.0,
        }
    }
}

/// The ordered region collection for one editor session.
#[derive(Debug, Clone)]
pub struct RegionStore {
    regions: Vec<Region>,
    next_id: u64,
    config: StoreConfig,
}

impl RegionStore {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            regions: Vec::new(),
            next_id: 1,
            config,
        }
    }

    pub fn config(&self) -> StoreConfig {
        self.config
    }

    /// Read-only ordered view; index order is z-order.
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn get(&self, id: RegionId) -> Option<&Region> {
        self.regions.iter().find(|r| r.id == id)
    }

    pub fn get_mut(&mut self, id: RegionId) -> Option<&mut Region> {
        self.regions.iter_mut().find(|r| r.id == id)
    }

    fn fresh_id(&mut self) -> RegionId {
        let id = RegionId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Next question-style ordinal: one past the highest in the store.
    fn next_sequence(&self) -> u32 {
        self.regions
            .iter()
            .filter_map(|r| r.sequence)
            .max()
            .map_or(1, |n| n + 1)
    }

    fn meets_min_size(&self, rect: &RectF) -> bool {
        rect.width >= self.config.min_width && rect.height >= self.config.min_height
    }

    /// Add a manually drawn region. Returns `None` (store unchanged) when
    /// the normalized draft is below the minimum size.
    pub fn add(&mut self, draft: RectF, spec: &TypeSpec, ordered: bool) -> Option<RegionId> {
        let rect = draft.normalized();
        if !self.meets_min_size(&rect) {
            log::debug!(
                "Rejected draw below minimum size: {:.1}x{:.1}",
                rect.width,
                rect.height
            );
            return None;
        }

        let id = self.fresh_id();
        let sequence = ordered.then(|| self.next_sequence());
        let label = match sequence {
            Some(n) => format!("{} {}", spec.label, n),
            None => spec.label.clone(),
        };
        self.regions.push(Region {
            id,
            kind: spec.kind.clone(),
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            label,
            sequence,
            confidence: None,
            origin: RegionOrigin::Manual,
            attributes: spec.default_attributes.clone(),
        });
        Some(id)
    }

    /// Add one recognition candidate as a suggested region. Candidates
    /// below the minimum size are dropped like manual drafts.
    pub fn add_candidate(
        &mut self,
        candidate: &Candidate,
        spec: &TypeSpec,
        ordered: bool,
    ) -> Option<RegionId> {
        let rect =
            RectF::new(candidate.x, candidate.y, candidate.width, candidate.height).normalized();
        if !self.meets_min_size(&rect) {
            return None;
        }

        let id = self.fresh_id();
        let sequence = ordered.then(|| self.next_sequence());
        let label = match sequence {
            Some(n) => format!("{} {}", spec.label, n),
            None => spec.label.clone(),
        };
        self.regions.push(Region {
            id,
            kind: spec.kind.clone(),
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            label,
            sequence,
            confidence: Some(candidate.confidence.clamp(0.0, 1.0)),
            origin: RegionOrigin::Suggested,
            attributes: spec.default_attributes.clone(),
        });
        Some(id)
    }

    /// Merge a partial update into a region. Unknown ids are a no-op;
    /// geometry fields are re-normalized on commit.
    pub fn update(&mut self, id: RegionId, patch: RegionPatch) -> bool {
        let Some(region) = self.regions.iter_mut().find(|r| r.id == id) else {
            return false;
        };

        if patch.has_geometry() {
            let rect = RectF::new(
                patch.x.unwrap_or(region.x),
                patch.y.unwrap_or(region.y),
                patch.width.unwrap_or(region.width),
                patch.height.unwrap_or(region.height),
            );
            region.set_rect(rect);
        }
        if let Some(kind) = patch.kind {
            region.kind = kind;
        }
        if let Some(label) = patch.label {
            region.label = label;
        }
        if let Some(sequence) = patch.sequence {
            region.sequence = sequence;
        }
        if let Some(attributes) = patch.attributes {
            region.attributes = attributes;
        }
        true
    }

    /// Translate a region by an image-space delta. Unknown ids are a no-op.
    pub fn translate(&mut self, id: RegionId, dx: f64, dy: f64) -> bool {
        match self.regions.iter_mut().find(|r| r.id == id) {
            Some(region) => {
                region.x += dx;
                region.y += dy;
                true
            }
            None => false,
        }
    }

    /// Remove a region. Unknown ids are a no-op.
    pub fn delete(&mut self, id: RegionId) -> bool {
        let before = self.regions.len();
        self.regions.retain(|r| r.id != id);
        self.regions.len() != before
    }

    /// Replace the whole list, used for suggestion-batch merge and for
    /// undo/redo restoration. Keeps the id counter ahead of every region
    /// so restored snapshots never collide with fresh ids.
    pub fn replace_all(&mut self, regions: Vec<Region>) {
        if let Some(max_id) = regions.iter().map(|r| r.id.0).max() {
            self.next_id = self.next_id.max(max_id + 1);
        }
        self.regions = regions;
    }

    /// Snapshot of the current list for history recording.
    pub fn snapshot(&self) -> Vec<Region> {
        self.regions.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::taxonomy::Taxonomy;

    fn store() -> (RegionStore, Taxonomy) {
        (
            RegionStore::new(StoreConfig::default()),
            Taxonomy::question_blocks(),
        )
    }

    #[test]
    fn test_add_assigns_id_and_defaults() {
        let (mut store, taxonomy) = store();
        let spec = taxonomy.get("choice").unwrap();
        let id = store
            .add(RectF::new(10.0, 10.0, 100.0, 50.0), spec, taxonomy.ordered)
            .unwrap();

        let region = store.get(id).unwrap();
        assert_eq!(region.kind, "choice");
        assert_eq!(region.label, "Choice 1");
        assert_eq!(region.sequence, Some(1));
        assert_eq!(region.origin, RegionOrigin::Manual);
        assert_eq!(region.confidence, None);
    }

    #[test]
    fn test_add_rejects_below_minimum_size() {
        let (mut store, taxonomy) = store();
        let spec = taxonomy.get("choice").unwrap();

        // 5x5 draft with the default 20x20 minimum
        let result = store.add(RectF::new(10.0, 10.0, 5.0, 5.0), spec, false);
        assert!(result.is_none());
        assert!(store.is_empty());

        // One dimension below minimum is also rejected
        let result = store.add(RectF::new(10.0, 10.0, 100.0, 5.0), spec, false);
        assert!(result.is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_add_normalizes_negative_draft() {
        let (mut store, taxonomy) = store();
        let spec = taxonomy.get("essay").unwrap();
        let id = store
            .add(RectF::new(100.0, 100.0, -60.0, -40.0), spec, false)
            .unwrap();

        let region = store.get(id).unwrap();
        assert_eq!(
            (region.x, region.y, region.width, region.height),
            (40.0, 60.0, 60.0, 40.0)
        );
    }

    #[test]
    fn test_sequence_numbers_increment() {
        let (mut store, taxonomy) = store();
        let spec = taxonomy.get("choice").unwrap();
        for _ in 0..3 {
            store.add(RectF::new(0.0, 0.0, 50.0, 50.0), spec, true);
        }
        let sequences: Vec<Option<u32>> = store.regions().iter().map(|r| r.sequence).collect();
        assert_eq!(sequences, vec![Some(1), Some(2), Some(3)]);
    }

    #[test]
    fn test_update_renormalizes_geometry() {
        let (mut store, taxonomy) = store();
        let spec = taxonomy.get("choice").unwrap();
        let id = store
            .add(RectF::new(10.0, 10.0, 100.0, 50.0), spec, false)
            .unwrap();

        store.update(id, RegionPatch::geometry(RectF::new(50.0, 50.0, -30.0, 20.0)));
        let region = store.get(id).unwrap();
        assert_eq!(
            (region.x, region.y, region.width, region.height),
            (20.0, 50.0, 30.0, 20.0)
        );
    }

    #[test]
    fn test_unknown_id_is_noop() {
        let (mut store, taxonomy) = store();
        let spec = taxonomy.get("choice").unwrap();
        store.add(RectF::new(0.0, 0.0, 50.0, 50.0), spec, false);
        let before = store.snapshot();

        assert!(!store.update(RegionId(999), RegionPatch::label("ghost")));
        assert!(!store.delete(RegionId(999)));
        assert!(!store.translate(RegionId(999), 5.0, 5.0));
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn test_replace_all_keeps_ids_fresh() {
        let (mut store, taxonomy) = store();
        let spec = taxonomy.get("choice").unwrap();
        let id = store
            .add(RectF::new(0.0, 0.0, 50.0, 50.0), spec, false)
            .unwrap();
        let snapshot = store.snapshot();

        store.replace_all(Vec::new());
        assert!(store.is_empty());

        store.replace_all(snapshot);
        let new_id = store
            .add(RectF::new(0.0, 0.0, 50.0, 50.0), spec, false)
            .unwrap();
        assert_ne!(new_id, id);
    }
}
