// Copyright (c) 2025, SheetMark Contributors
// SPDX-License-Identifier: BSD-3-Clause

//! Editor session.
//!
//! One session owns the region store, the history stack, the gesture
//! state machine, the view transform, and the selection for a single
//! sheet. All mutations flow through here: pointer events become store
//! operations, every committed mutation records exactly one history
//! snapshot, and every commit advances the suggestion generation so
//! stale recognition results are discarded.

use crate::editor::history::History;
use crate::editor::interaction::{apply_handle_delta, Gesture};
use crate::editor::store::{RegionStore, StoreConfig};
use crate::editor::suggest::{
    MergeMode, RecognitionHints, RecognitionRequest, RecognitionResponse, SuggestionOutcome,
};
use crate::editor::taxonomy::Taxonomy;
use crate::models::region::{Region, RegionId, RegionPatch};
use crate::util::geometry::{
    hit_test, hit_test_handle, normalize_rect, Point, RectF, ViewTransform, HANDLE_TOLERANCE,
};

/// Interactive region-annotation session over one sheet image.
pub struct EditorSession {
    store: RegionStore,
    history: History,
    gesture: Gesture,
    taxonomy: Taxonomy,
    transform: ViewTransform,
    selected: Option<RegionId>,
    /// Region type drawn by the next draw gesture.
    active_kind: String,
    /// Suggestion generation token; bumped by new requests and by every
    /// committed mutation.
    generation: u64,
}

impl EditorSession {
    pub fn new(taxonomy: Taxonomy, config: StoreConfig) -> Self {
        let active_kind = taxonomy.first_kind().to_string();
        Self {
            store: RegionStore::new(config),
            history: History::new(Vec::new()),
            gesture: Gesture::Idle,
            taxonomy,
            transform: ViewTransform::default(),
            selected: None,
            active_kind,
            generation: 0,
        }
    }

    /// Seed the session with a previously saved region list and restart
    /// history from that baseline.
    pub fn load(&mut self, regions: Vec<Region>) {
        self.store.replace_all(regions);
        self.history.reset(self.store.snapshot());
        self.selected = None;
        self.gesture = Gesture::Idle;
    }

    // Commit a finished mutation: one history entry, and manual edits
    // supersede any in-flight recognition request.
    fn commit(&mut self) {
        self.history.record(self.store.snapshot());
        self.generation += 1;
    }

    // --- accessors -------------------------------------------------------

    pub fn regions(&self) -> &[Region] {
        self.store.regions()
    }

    pub fn region(&self, id: RegionId) -> Option<&Region> {
        self.store.get(id)
    }

    pub fn region_count(&self) -> usize {
        self.store.len()
    }

    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    pub fn transform(&self) -> &ViewTransform {
        &self.transform
    }

    pub fn transform_mut(&mut self) -> &mut ViewTransform {
        &mut self.transform
    }

    pub fn selected(&self) -> Option<RegionId> {
        self.selected
    }

    pub fn select(&mut self, id: RegionId) {
        if self.store.get(id).is_some() {
            self.selected = Some(id);
        }
    }

    pub fn deselect(&mut self) {
        self.selected = None;
    }

    pub fn active_kind(&self) -> &str {
        &self.active_kind
    }

    pub fn set_active_kind(&mut self, kind: &str) {
        if self.taxonomy.get(kind).is_some() {
            self.active_kind = kind.to_string();
        }
    }

    pub fn gesture_active(&self) -> bool {
        !self.gesture.is_idle()
    }

    /// The rubber-band rectangle of an in-progress draw gesture.
    pub fn preview_rect(&self) -> Option<RectF> {
        self.gesture.preview()
    }

    // --- pointer state machine ------------------------------------------

    /// Pointer pressed at a screen-space position (relative to the image
    /// origin). Resolution order: selected region's handle, region body,
    /// empty canvas.
    pub fn pointer_down(&mut self, screen: Point) {
        if !self.gesture.is_idle() {
            // Single active gesture; a second press is ignored.
            return;
        }
        let image = self.transform.to_image(screen);

        if let Some(id) = self.selected {
            if let Some(region) = self.store.get(id) {
                if let Some(handle) =
                    hit_test_handle(screen, region, &self.transform, HANDLE_TOLERANCE)
                {
                    let rect = region.rect();
                    self.gesture = Gesture::Resizing {
                        id,
                        handle,
                        raw: rect,
                        last: image,
                        origin: rect,
                        resized: false,
                    };
                    return;
                }
            }
        }

        if let Some(region) = hit_test(image, self.store.regions()).and_then(|id| self.store.get(id))
        {
            let (id, origin) = (region.id, region.rect());
            self.selected = Some(id);
            self.gesture = Gesture::Dragging {
                id,
                last: image,
                origin,
                moved: false,
            };
        } else {
            self.selected = None;
            self.gesture = Gesture::Drawing {
                start: image,
                current: image,
            };
        }
    }

    /// Pointer moved while pressed. Drag and resize update the store
    /// incrementally for live feedback; history waits for pointer-up.
    pub fn pointer_move(&mut self, screen: Point) {
        let image = self.transform.to_image(screen);
        match &mut self.gesture {
            Gesture::Idle => {}
            Gesture::Drawing { current, .. } => {
                *current = image;
            }
            Gesture::Dragging {
                id, last, moved, ..
            } => {
                let dx = image.x - last.x;
                let dy = image.y - last.y;
                if dx != 0.0 || dy != 0.0 {
                    let id = *id;
                    *last = image;
                    *moved = true;
                    self.store.translate(id, dx, dy);
                }
            }
            Gesture::Resizing {
                id,
                handle,
                raw,
                last,
                resized,
                ..
            } => {
                let dx = image.x - last.x;
                let dy = image.y - last.y;
                if dx != 0.0 || dy != 0.0 {
                    *raw = apply_handle_delta(*raw, *handle, dx, dy);
                    *last = image;
                    *resized = true;
                    let (id, rect) = (*id, raw.normalized());
                    if let Some(region) = self.store.get_mut(id) {
                        region.set_rect(rect);
                    }
                }
            }
        }
    }

    /// Pointer released: resolve the gesture. Draw commits through the
    /// store's minimum-size gate; drag/resize commit a single history
    /// entry for the whole gesture.
    pub fn pointer_up(&mut self, screen: Point) {
        self.pointer_move(screen);
        match std::mem::replace(&mut self.gesture, Gesture::Idle) {
            Gesture::Idle => {}
            Gesture::Drawing { start, current } => {
                let draft = normalize_rect(start.x, start.y, current.x, current.y);
                if let Some(spec) = self.taxonomy.get(&self.active_kind) {
                    let ordered = self.taxonomy.ordered;
                    if let Some(id) = self.store.add(draft, spec, ordered) {
                        self.selected = Some(id);
                        self.commit();
                        log::info!("Added region, total: {}", self.store.len());
                    }
                }
            }
            Gesture::Dragging { moved, .. } => {
                if moved {
                    self.commit();
                }
            }
            Gesture::Resizing {
                id, raw, resized, ..
            } => {
                if resized {
                    // Collapsing a region below the minimum by resizing
                    // would leave an invalid sliver; clamp at commit.
                    let config = self.store.config();
                    let mut rect = raw.normalized();
                    rect.width = rect.width.max(config.min_width);
                    rect.height = rect.height.max(config.min_height);
                    if let Some(region) = self.store.get_mut(id) {
                        region.set_rect(rect);
                    }
                    self.commit();
                }
            }
        }
    }

    /// Abort the gesture (pointer left the surface, Escape). The draw
    /// preview is discarded; a half-dragged region snaps back to its
    /// gesture-start geometry. No history entry.
    pub fn cancel_gesture(&mut self) {
        match std::mem::replace(&mut self.gesture, Gesture::Idle) {
            Gesture::Idle | Gesture::Drawing { .. } => {}
            Gesture::Dragging { id, origin, .. } | Gesture::Resizing { id, origin, .. } => {
                if let Some(region) = self.store.get_mut(id) {
                    region.set_rect(origin);
                }
            }
        }
    }

    // --- direct operations ----------------------------------------------

    /// Property edit from the host UI; one history entry on success.
    pub fn edit_region(&mut self, id: RegionId, patch: RegionPatch) {
        if self.store.update(id, patch) {
            self.commit();
        }
    }

    /// Delete a region; clears the selection when it was selected.
    pub fn delete_region(&mut self, id: RegionId) {
        if self.store.delete(id) {
            if self.selected == Some(id) {
                self.selected = None;
            }
            self.commit();
            log::info!("Deleted region, total: {}", self.store.len());
        }
    }

    pub fn delete_selected(&mut self) {
        if let Some(id) = self.selected {
            self.delete_region(id);
        }
    }

    // --- undo/redo -------------------------------------------------------

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn undo(&mut self) {
        if let Some(snapshot) = self.history.undo() {
            let snapshot = snapshot.to_vec();
            self.store.replace_all(snapshot);
            self.selected = None;
            self.generation += 1;
            log::info!("Undo");
        }
    }

    pub fn redo(&mut self) {
        if let Some(snapshot) = self.history.redo() {
            let snapshot = snapshot.to_vec();
            self.store.replace_all(snapshot);
            self.selected = None;
            self.generation += 1;
            log::info!("Redo");
        }
    }

    // --- suggestion integration -----------------------------------------

    /// Start a recognition request; advances the generation so any
    /// earlier in-flight response becomes stale.
    pub fn begin_recognition(
        &mut self,
        image_file: &str,
        image_width: u32,
        image_height: u32,
        sensitivity: f32,
    ) -> RecognitionRequest {
        self.generation += 1;
        RecognitionRequest {
            generation: self.generation,
            image_file: image_file.to_string(),
            image_width,
            image_height,
            hints: RecognitionHints {
                sensitivity,
                kinds: self
                    .taxonomy
                    .types()
                    .iter()
                    .map(|t| t.kind.clone())
                    .collect(),
            },
        }
    }

    /// Merge a recognition response. Stale generations are discarded; the
    /// default merge replaces only when the store is empty and appends
    /// otherwise, so manual regions survive. A host-confirmed overwrite
    /// passes `Some(MergeMode::Replace)`.
    pub fn apply_recognition(
        &mut self,
        response: &RecognitionResponse,
        mode: Option<MergeMode>,
    ) -> SuggestionOutcome {
        if response.generation != self.generation {
            log::info!(
                "Discarding stale recognition result (generation {} != {})",
                response.generation,
                self.generation
            );
            return SuggestionOutcome::Stale;
        }

        let mode = mode.unwrap_or(if self.store.is_empty() {
            MergeMode::Replace
        } else {
            MergeMode::Append
        });
        if mode == MergeMode::Replace {
            self.store.replace_all(Vec::new());
            self.selected = None;
        }

        let ordered = self.taxonomy.ordered;
        let mut added = 0;
        for candidate in &response.candidates {
            let Some(spec) = self.taxonomy.get(&candidate.kind) else {
                log::warn!("Recognizer returned unknown region type {:?}", candidate.kind);
                continue;
            };
            if self.store.add_candidate(candidate, spec, ordered).is_some() {
                added += 1;
            }
        }

        if added > 0 || mode == MergeMode::Replace {
            self.commit();
        }
        log::info!("Applied {} suggested regions", added);
        SuggestionOutcome::Applied { added }
    }

    // --- host validation -------------------------------------------------

    /// Whether the host may save: at least one region, and every
    /// taxonomy-mandatory type present.
    pub fn can_save(&self) -> bool {
        if self.store.is_empty() {
            return false;
        }
        self.taxonomy
            .required_kinds()
            .all(|kind| self.store.regions().iter().any(|r| r.kind == kind))
    }

    /// Human-readable reason `can_save` is false, for the host warning.
    pub fn save_blocker(&self) -> Option<String> {
        if self.store.is_empty() {
            return Some("No regions have been marked yet".to_string());
        }
        for kind in self.taxonomy.required_kinds() {
            if !self.store.regions().iter().any(|r| r.kind == kind) {
                let label = self
                    .taxonomy
                    .get(kind)
                    .map_or_else(|| kind.to_string(), |s| s.label.clone());
                return Some(format!("At least one {} region is required", label));
            }
        }
        None
    }

    /// Warning when an ordered taxonomy's sequence numbers are not
    /// contiguous from 1. Advisory only; saving is not blocked.
    pub fn sequence_warning(&self) -> Option<String> {
        if !self.taxonomy.ordered || self.store.is_empty() {
            return None;
        }
        let mut sequences: Vec<u32> = self
            .store
            .regions()
            .iter()
            .filter_map(|r| r.sequence)
            .collect();
        sequences.sort_unstable();
        sequences.dedup();
        let contiguous = sequences
            .iter()
            .enumerate()
            .all(|(i, &n)| n == i as u32 + 1);
        if contiguous && sequences.len() == self.store.len() {
            None
        } else {
            Some("Question numbers are not contiguous".to_string())
        }
    }
}
