// Copyright (c) 2025, SheetMark Contributors
// SPDX-License-Identifier: BSD-3-Clause

//! Pointer gesture state.
//!
//! One tagged union replaces the scattered drawing/dragging/resizing
//! flags of earlier editors: whether a gesture is active and which one is
//! consistent by construction. The session drives transitions; this
//! module holds the state and the resize edge math.

use crate::models::region::RegionId;
use crate::util::geometry::{Handle, Point, RectF};

/// The active pointer gesture. Exactly one gesture at a time; a
/// pointer-down while non-idle is ignored until pointer-up resolves it.
#[derive(Debug, Clone, PartialEq)]
pub enum Gesture {
    Idle,
    /// Rubber-band draw from `start`; nothing committed until pointer-up.
    Drawing { start: Point, current: Point },
    /// Moving a region body. `origin` is the gesture-start geometry so
    /// cancellation can restore it.
    Dragging {
        id: RegionId,
        last: Point,
        origin: RectF,
        moved: bool,
    },
    /// Dragging a corner handle. `raw` may run negative mid-gesture; the
    /// store only ever receives its normalized form.
    Resizing {
        id: RegionId,
        handle: Handle,
        raw: RectF,
        last: Point,
        origin: RectF,
        resized: bool,
    },
}

impl Gesture {
    pub fn is_idle(&self) -> bool {
        matches!(self, Gesture::Idle)
    }

    /// The rubber-band rectangle of an in-progress draw, if any.
    pub fn preview(&self) -> Option<RectF> {
        match self {
            Gesture::Drawing { start, current } => Some(
                crate::util::geometry::normalize_rect(start.x, start.y, current.x, current.y),
            ),
            _ => None,
        }
    }
}

/// Apply a pointer delta to the edges implied by the active handle.
/// The result may have negative extents while the gesture is in flight.
pub fn apply_handle_delta(raw: RectF, handle: Handle, dx: f64, dy: f64) -> RectF {
    let mut r = raw;
    match handle {
        Handle::TopLeft => {
            r.x += dx;
            r.y += dy;
            r.width -= dx;
            r.height -= dy;
        }
        Handle::TopRight => {
            r.y += dy;
            r.width += dx;
            r.height -= dy;
        }
        Handle::BottomLeft => {
            r.x += dx;
            r.width -= dx;
            r.height += dy;
        }
        Handle::BottomRight => {
            r.width += dx;
            r.height += dy;
        }
    }
    r
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECT: RectF = RectF {
        x: 50.0,
        y: 50.0,
        width: 400.0,
        height: 150.0,
    };

    #[test]
    fn test_bottom_right_grows_extent() {
        let r = apply_handle_delta(RECT, Handle::BottomRight, 50.0, 50.0);
        assert_eq!(r, RectF::new(50.0, 50.0, 450.0, 200.0));
    }

    #[test]
    fn test_top_left_moves_origin_and_shrinks() {
        let r = apply_handle_delta(RECT, Handle::TopLeft, 10.0, 20.0);
        assert_eq!(r, RectF::new(60.0, 70.0, 390.0, 130.0));
    }

    #[test]
    fn test_top_right_and_bottom_left() {
        let r = apply_handle_delta(RECT, Handle::TopRight, 30.0, -10.0);
        assert_eq!(r, RectF::new(50.0, 40.0, 430.0, 160.0));

        let r = apply_handle_delta(RECT, Handle::BottomLeft, -20.0, 25.0);
        assert_eq!(r, RectF::new(30.0, 50.0, 420.0, 175.0));
    }

    #[test]
    fn test_crossing_over_goes_negative_until_normalized() {
        // Dragging the bottom-right handle past the top-left corner.
        let r = apply_handle_delta(RECT, Handle::BottomRight, -450.0, -200.0);
        assert!(r.width < 0.0 && r.height < 0.0);
        let n = r.normalized();
        assert!(n.width > 0.0 && n.height > 0.0);
    }
}
