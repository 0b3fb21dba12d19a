// Copyright (c) 2025, SheetMark Contributors
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility functions.
//!
//! This module provides the coordinate types, the view transform between
//! screen space and image space, rectangle normalization, and the
//! hit-testing used by the interaction state machine.

use crate::models::region::{Region, RegionId};
use serde::{Deserialize, Serialize};

/// Corner-handle hit tolerance, in screen pixels (independent of zoom).
pub const HANDLE_TOLERANCE: f64 = 6.0;

/// A 2D point in either image or screen space, depending on context.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle in image space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RectF {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl RectF {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Flip negative extents so width and height come out positive.
    pub fn normalized(self) -> Self {
        let (x, width) = if self.width < 0.0 {
            (self.x + self.width, -self.width)
        } else {
            (self.x, self.width)
        };
        let (y, height) = if self.height < 0.0 {
            (self.y + self.height, -self.height)
        } else {
            (self.y, self.height)
        };
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.x + self.width && p.y >= self.y && p.y <= self.y + self.height
    }

    /// Corner positions in handle order: TL, TR, BL, BR.
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.x, self.y),
            Point::new(self.x + self.width, self.y),
            Point::new(self.x, self.y + self.height),
            Point::new(self.x + self.width, self.y + self.height),
        ]
    }
}

/// Build a normalized rectangle from two opposite corners of a drag.
pub fn normalize_rect(x0: f64, y0: f64, x1: f64, y1: f64) -> RectF {
    RectF {
        x: x0.min(x1),
        y: y0.min(y1),
        width: (x1 - x0).abs(),
        height: (y1 - y0).abs(),
    }
}

/// One of the four corner resize handles of a selected region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handle {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Uniform zoom between image space and screen space. No rotation, no
/// pan offset; panning is native scroll in the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    scale: f64,
    min_scale: f64,
    max_scale: f64,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::new(0.1, 3.0)
    }
}

impl ViewTransform {
    pub fn new(min_scale: f64, max_scale: f64) -> Self {
        Self {
            scale: 1.0,
            min_scale,
            max_scale,
        }
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Set the zoom level, clamped to the configured range.
    pub fn set_scale(&mut self, scale: f64) {
        self.scale = scale.clamp(self.min_scale, self.max_scale);
    }

    pub fn zoom_in(&mut self) {
        self.set_scale(self.scale * 1.25);
    }

    pub fn zoom_out(&mut self) {
        self.set_scale(self.scale / 1.25);
    }

    pub fn reset(&mut self) {
        self.scale = 1.0;
    }

    /// Map a screen-space pointer position to image space.
    pub fn to_image(&self, p: Point) -> Point {
        Point::new(p.x / self.scale, p.y / self.scale)
    }

    /// Map an image-space position to screen space.
    pub fn to_screen(&self, p: Point) -> Point {
        Point::new(p.x * self.scale, p.y * self.scale)
    }
}

/// Find the topmost region containing an image-space point.
///
/// Iterates in reverse z-order so that on overlap the later (topmost)
/// region wins.
pub fn hit_test(point: Point, regions: &[Region]) -> Option<RegionId> {
    regions
        .iter()
        .rev()
        .find(|r| r.contains(point))
        .map(|r| r.id)
}

/// Check whether a screen-space point is on one of the corner handles of
/// the given region. Tolerance is applied in screen space so handles stay
/// the same grab size at any zoom level.
pub fn hit_test_handle(
    screen_point: Point,
    region: &Region,
    transform: &ViewTransform,
    tolerance: f64,
) -> Option<Handle> {
    const HANDLES: [Handle; 4] = [
        Handle::TopLeft,
        Handle::TopRight,
        Handle::BottomLeft,
        Handle::BottomRight,
    ];

    let corners = region.rect().corners();
    for (corner, handle) in corners.into_iter().zip(HANDLES) {
        let screen_corner = transform.to_screen(corner);
        let dx = screen_point.x - screen_corner.x;
        let dy = screen_point.y - screen_corner.y;
        if dx.abs() <= tolerance && dy.abs() <= tolerance {
            return Some(handle);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::region::{Region, RegionOrigin};

    fn region(id: u64, x: f64, y: f64, w: f64, h: f64) -> Region {
        Region {
            id: RegionId(id),
            kind: "student_info".to_string(),
            x,
            y,
            width: w,
            height: h,
            label: "test".to_string(),
            sequence: None,
            confidence: None,
            origin: RegionOrigin::Manual,
            attributes: serde_json::Map::new(),
        }
    }

    #[test]
    fn test_roundtrip_across_scales() {
        // Deterministic xorshift so the 100 sample points are stable.
        let mut state = 0x2545f491u64;
        let mut next = move || {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            (state % 10_000) as f64 / 4.0
        };

        for scale in [0.1, 0.5, 1.0, 2.0, 3.0] {
            let mut transform = ViewTransform::default();
            transform.set_scale(scale);
            for _ in 0..100 {
                let p = Point::new(next(), next());
                let back = transform.to_screen(transform.to_image(p));
                assert!((back.x - p.x).abs() < 1e-6, "x drift at scale {}", scale);
                assert!((back.y - p.y).abs() < 1e-6, "y drift at scale {}", scale);
            }
        }
    }

    #[test]
    fn test_scale_clamped_to_range() {
        let mut transform = ViewTransform::new(0.1, 3.0);
        transform.set_scale(10.0);
        assert_eq!(transform.scale(), 3.0);
        transform.set_scale(0.01);
        assert_eq!(transform.scale(), 0.1);
    }

    #[test]
    fn test_normalize_rect_negative_drag() {
        // Dragging up-left from (450, 200) to (50, 50)
        let rect = normalize_rect(450.0, 200.0, 50.0, 50.0);
        assert_eq!(rect, RectF::new(50.0, 50.0, 400.0, 150.0));
    }

    #[test]
    fn test_hit_test_topmost_wins() {
        // B was added after A, so B is on top and wins the shared point.
        let a = region(1, 0.0, 0.0, 100.0, 100.0);
        let b = region(2, 50.0, 50.0, 100.0, 100.0);
        let regions = vec![a, b];

        assert_eq!(
            hit_test(Point::new(75.0, 75.0), &regions),
            Some(RegionId(2))
        );
        assert_eq!(
            hit_test(Point::new(10.0, 10.0), &regions),
            Some(RegionId(1))
        );
        assert_eq!(hit_test(Point::new(500.0, 500.0), &regions), None);
    }

    #[test]
    fn test_handle_hit_tolerance_in_screen_space() {
        let r = region(1, 100.0, 100.0, 50.0, 50.0);
        let mut transform = ViewTransform::default();
        transform.set_scale(2.0);

        // Bottom-right corner is at image (150, 150) -> screen (300, 300).
        let hit = hit_test_handle(Point::new(304.0, 297.0), &r, &transform, HANDLE_TOLERANCE);
        assert_eq!(hit, Some(Handle::BottomRight));

        // 10px away in screen space is outside the 6px tolerance even
        // though it is only 5px away in image space.
        let miss = hit_test_handle(Point::new(310.0, 300.0), &r, &transform, HANDLE_TOLERANCE);
        assert_eq!(miss, None);

        let tl = hit_test_handle(Point::new(199.0, 201.0), &r, &transform, HANDLE_TOLERANCE);
        assert_eq!(tl, Some(Handle::TopLeft));
    }
}
