// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pure coordinate helpers shared by the camera, router, and fitting code.
//!
//! Screen space is the pixel space of the rendering surface; world space is
//! the unbounded plane nodes are authored in. A [`CameraState`] maps between
//! the two with a uniform scale followed by a screen-space offset:
//!
//! ```text
//! screen = world * scale + offset
//! world  = (screen - offset) / scale
//! ```
//!
//! None of these functions validate the camera. A non-positive scale is an
//! invariant violation that [`Camera`](crate::Camera) prevents upstream.

use kurbo::{Point, Rect};

use crate::camera::CameraState;
use crate::store::Node;

/// Converts a screen-space point into world space.
#[must_use]
pub fn screen_to_world(pt: Point, camera: &CameraState) -> Point {
    Point::new(
        (pt.x - camera.offset_x) / camera.scale,
        (pt.y - camera.offset_y) / camera.scale,
    )
}

/// Converts a world-space point into screen space.
///
/// Inverse of [`screen_to_world`] up to floating-point rounding.
#[must_use]
pub fn world_to_screen(pt: Point, camera: &CameraState) -> Point {
    Point::new(
        pt.x * camera.scale + camera.offset_x,
        pt.y * camera.scale + camera.offset_y,
    )
}

/// Converts a world-space rectangle into screen space.
///
/// The transform is axis-aligned with a positive uniform scale, so mapping the
/// two corners is enough.
#[must_use]
pub fn world_rect_to_screen(rect: Rect, camera: &CameraState) -> Rect {
    let p0 = world_to_screen(Point::new(rect.x0, rect.y0), camera);
    let p1 = world_to_screen(Point::new(rect.x1, rect.y1), camera);
    Rect::from_points(p0, p1)
}

/// Clamps a scale into `[min, max]`.
///
/// Unlike [`f64::clamp`] this never panics; a NaN input resolves to `min`.
#[must_use]
pub fn clamp_scale(scale: f64, min: f64, max: f64) -> f64 {
    scale.max(min).min(max)
}

/// Returns the union of the rectangles of `nodes`, or `None` when empty.
#[must_use]
pub fn bounding_box_of<'a>(nodes: impl IntoIterator<Item = &'a Node>) -> Option<Rect> {
    nodes
        .into_iter()
        .map(Node::rect)
        .reduce(|acc, rect| acc.union(rect))
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use kurbo::{Point, Rect};

    use super::{bounding_box_of, clamp_scale, screen_to_world, world_rect_to_screen, world_to_screen};
    use crate::camera::CameraState;
    use crate::store::Node;

    fn cam(offset_x: f64, offset_y: f64, scale: f64) -> CameraState {
        CameraState {
            offset_x,
            offset_y,
            scale,
        }
    }

    #[test]
    fn screen_to_world_applies_offset_then_scale() {
        let c = cam(100.0, 50.0, 2.0);
        let w = screen_to_world(Point::new(300.0, 250.0), &c);
        assert_eq!(w, Point::new(100.0, 100.0));
    }

    #[test]
    fn world_screen_roundtrip() {
        let c = cam(-37.5, 12.25, 0.37);
        let p = Point::new(413.0, -92.5);
        let back = world_to_screen(screen_to_world(p, &c), &c);
        assert!((back.x - p.x).abs() < 1e-9);
        assert!((back.y - p.y).abs() < 1e-9);
    }

    #[test]
    fn world_rect_to_screen_scales_size() {
        let c = cam(10.0, 20.0, 0.5);
        let r = world_rect_to_screen(Rect::new(0.0, 0.0, 100.0, 40.0), &c);
        assert_eq!(r, Rect::new(10.0, 20.0, 60.0, 40.0));
    }

    #[test]
    fn clamp_scale_bounds() {
        assert_eq!(clamp_scale(0.01, 0.25, 2.5), 0.25);
        assert_eq!(clamp_scale(9.0, 0.25, 2.5), 2.5);
        assert_eq!(clamp_scale(1.5, 0.25, 2.5), 1.5);
        assert_eq!(clamp_scale(f64::NAN, 0.25, 2.5), 0.25);
    }

    #[test]
    fn bounding_box_empty_is_none() {
        let nodes: Vec<Node> = Vec::new();
        assert_eq!(bounding_box_of(&nodes), None);
    }

    #[test]
    fn bounding_box_unions_node_rects() {
        let nodes = [
            Node::new("a", 0.0, 0.0).with_size(100.0, 50.0),
            Node::new("b", -20.0, 200.0).with_size(10.0, 10.0),
            // Unmeasured nodes still contribute their position.
            Node::new("c", 400.0, -30.0),
        ];
        assert_eq!(
            bounding_box_of(&nodes),
            Some(Rect::new(-20.0, -30.0, 400.0, 210.0))
        );
    }
}
