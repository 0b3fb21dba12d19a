// Copyright (c) 2025, SheetMark Contributors
// SPDX-License-Identifier: BSD-3-Clause

//! Region data structures.
//!
//! This module defines the core data structure for a classified
//! rectangular region of interest over the answer-sheet image.

use crate::util::geometry::{Point, RectF};
use serde::{Deserialize, Serialize};

/// Opaque, stable identifier for a region. Assigned at creation by the
/// store and never reused within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionId(pub u64);

/// Provenance of a region: drawn by the operator or produced by the
/// recognition collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionOrigin {
    Manual,
    Suggested,
}

/// A classified rectangle over the sheet image, in image-space pixels.
///
/// Geometry is always normalized: `width > 0 && height > 0` for every
/// region held by the store. Vec order is z-order; later entries paint
/// on top and win hit-tests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub id: RegionId,
    /// Taxonomy type id, e.g. "student_info" or "single_choice".
    pub kind: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Display text, derived from the type label by default, editable.
    pub label: String,
    /// Ordinal (question number) for ordered taxonomies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequence: Option<u32>,
    /// Present only on suggested regions, in [0, 1].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
    pub origin: RegionOrigin,
    /// Taxonomy-defined extra attributes (e.g. option_count), opaque to
    /// the core beyond storage and display.
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub attributes: serde_json::Map<String, serde_json::Value>,
}

impl Region {
    pub fn rect(&self) -> RectF {
        RectF::new(self.x, self.y, self.width, self.height)
    }

    /// Replace the geometry, normalizing so width/height stay positive.
    pub fn set_rect(&mut self, rect: RectF) {
        let rect = rect.normalized();
        self.x = rect.x;
        self.y = rect.y;
        self.width = rect.width;
        self.height = rect.height;
    }

    /// Whether an image-space point falls inside the region bounds.
    pub fn contains(&self, point: Point) -> bool {
        self.rect().contains(point)
    }
}

/// Partial update applied to a region by [`crate::editor::store::RegionStore::update`].
/// Absent fields are left untouched; geometry updates are re-normalized.
#[derive(Debug, Clone, Default)]
pub struct RegionPatch {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub kind: Option<String>,
    pub label: Option<String>,
    pub sequence: Option<Option<u32>>,
    pub attributes: Option<serde_json::Map<String, serde_json::Value>>,
}

impl RegionPatch {
    pub fn geometry(rect: RectF) -> Self {
        Self {
            x: Some(rect.x),
            y: Some(rect.y),
            width: Some(rect.width),
            height: Some(rect.height),
            ..Self::default()
        }
    }

    pub fn label(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..Self::default()
        }
    }

    pub fn has_geometry(&self) -> bool {
        self.x.is_some() || self.y.is_some() || self.width.is_some() || self.height.is_some()
    }
}
