// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Edge routing: anchor points and quadratic curves between node rectangles.
//!
//! Routing is stateless. Curves are recomputed from the [`NodeStore`] after
//! every position, size, or viewport change and are never patched in place.
//!
//! ## Example
//!
//! ```
//! use kurbo::{Point, Rect};
//! use understory_canvas::edges::{Side, compute_curve};
//!
//! let a = Rect::new(0.0, 0.0, 100.0, 100.0);
//! let b = Rect::new(300.0, 0.0, 400.0, 100.0);
//! let curve = compute_curve(a, b, Side::Right, Side::Left);
//! assert_eq!(curve.p0, Point::new(100.0, 50.0));
//! assert_eq!(curve.p1, Point::new(200.0, 50.0));
//! assert_eq!(curve.p2, Point::new(300.0, 50.0));
//! ```

use alloc::vec::Vec;

use kurbo::{Affine, ParamCurve, Point, QuadBez, Rect};

use crate::data::EdgeRecord;
use crate::store::NodeStore;

/// Which part of a node rectangle an edge attaches to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Side {
    /// Midpoint of the left edge.
    Left,
    /// Midpoint of the right edge.
    Right,
    /// Midpoint of the top edge.
    Top,
    /// Midpoint of the bottom edge.
    Bottom,
    /// Centroid.
    #[default]
    Center,
    /// Currently identical to [`Side::Center`]; no position-aware side
    /// selection is performed.
    Auto,
}

/// Returns the anchor point on `rect` for `side`.
#[must_use]
pub fn anchor_point(rect: Rect, side: Side) -> Point {
    let c = rect.center();
    match side {
        Side::Left => Point::new(rect.x0, c.y),
        Side::Right => Point::new(rect.x1, c.y),
        Side::Top => Point::new(c.x, rect.y0),
        Side::Bottom => Point::new(c.x, rect.y1),
        Side::Center | Side::Auto => c,
    }
}

/// Computes the curve from `from` to `to`.
///
/// The single control point sits at the midpoint of the anchors, so the curve
/// degenerates to the straight segment between them.
#[must_use]
pub fn compute_curve(from: Rect, to: Rect, from_side: Side, to_side: Side) -> QuadBez {
    let start = anchor_point(from, from_side);
    let end = anchor_point(to, to_side);
    QuadBez::new(start, start.midpoint(end), end)
}

/// A routed edge in world space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoutedEdge {
    /// Index of the edge in the snapshot it was routed from.
    pub edge_index: usize,
    /// World-space curve.
    pub curve: QuadBez,
}

impl RoutedEdge {
    /// Point at the middle of the curve, for placing a label.
    #[must_use]
    pub fn label_anchor(&self) -> Point {
        self.curve.eval(0.5)
    }

    /// The curve mapped through `transform`, typically world → screen.
    #[must_use]
    pub fn transformed(&self, transform: Affine) -> QuadBez {
        transform * self.curve
    }
}

/// Routes every edge whose endpoints both exist in `store`.
///
/// Edges with a missing endpoint are skipped silently. The output preserves
/// edge order and is a pure function of its inputs.
#[must_use]
pub fn recompute_all<E>(edges: &[EdgeRecord<E>], store: &NodeStore) -> Vec<RoutedEdge> {
    edges
        .iter()
        .enumerate()
        .filter_map(|(edge_index, edge)| {
            let from = store.get(&edge.from_id)?;
            let to = store.get(&edge.to_id)?;
            let curve = compute_curve(
                from.rect(),
                to.rect(),
                edge.from_side.unwrap_or_default(),
                edge.to_side.unwrap_or_default(),
            );
            Some(RoutedEdge { edge_index, curve })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use kurbo::{Affine, Point, Rect};

    use super::{Side, anchor_point, compute_curve, recompute_all};
    use crate::data::EdgeRecord;
    use crate::store::{Node, NodeStore};

    fn two_nodes() -> NodeStore {
        let mut store = NodeStore::new();
        store.replace_all(vec![
            Node::new("a", 0.0, 0.0).with_size(100.0, 100.0),
            Node::new("b", 300.0, 0.0).with_size(100.0, 100.0),
        ]);
        store
    }

    #[test]
    fn anchors_are_edge_midpoints() {
        let r = Rect::new(10.0, 20.0, 110.0, 80.0);
        assert_eq!(anchor_point(r, Side::Left), Point::new(10.0, 50.0));
        assert_eq!(anchor_point(r, Side::Right), Point::new(110.0, 50.0));
        assert_eq!(anchor_point(r, Side::Top), Point::new(60.0, 20.0));
        assert_eq!(anchor_point(r, Side::Bottom), Point::new(60.0, 80.0));
        assert_eq!(anchor_point(r, Side::Center), Point::new(60.0, 50.0));
    }

    #[test]
    fn auto_resolves_to_center() {
        let r = Rect::new(0.0, 0.0, 40.0, 40.0);
        assert_eq!(anchor_point(r, Side::Auto), anchor_point(r, Side::Center));
    }

    #[test]
    fn zero_sized_node_anchors_at_its_position() {
        let r = Rect::new(5.0, 5.0, 5.0, 5.0);
        for side in [Side::Left, Side::Right, Side::Top, Side::Bottom, Side::Center] {
            assert_eq!(anchor_point(r, side), Point::new(5.0, 5.0));
        }
    }

    #[test]
    fn control_point_is_midpoint() {
        let c = compute_curve(
            Rect::new(0.0, 0.0, 10.0, 10.0),
            Rect::new(100.0, 100.0, 110.0, 110.0),
            Side::Bottom,
            Side::Top,
        );
        assert_eq!(c.p0, Point::new(5.0, 10.0));
        assert_eq!(c.p2, Point::new(105.0, 100.0));
        assert_eq!(c.p1, Point::new(55.0, 55.0));
    }

    #[test]
    fn right_to_left_between_aligned_nodes_is_straight() {
        let store = two_nodes();
        let edges = vec![EdgeRecord::<()>::new("a", "b").with_sides(Side::Right, Side::Left)];
        let routed = recompute_all(&edges, &store);
        assert_eq!(routed.len(), 1);
        let c = routed[0].curve;
        assert_eq!(c.p0, Point::new(100.0, 50.0));
        assert_eq!(c.p1, Point::new(200.0, 50.0));
        assert_eq!(c.p2, Point::new(300.0, 50.0));
        assert_eq!(routed[0].label_anchor(), Point::new(200.0, 50.0));
    }

    #[test]
    fn dangling_edges_are_skipped() {
        let store = two_nodes();
        let edges = vec![
            EdgeRecord::<()>::new("a", "ghost"),
            EdgeRecord::new("ghost", "b"),
            EdgeRecord::new("b", "a"),
        ];
        let routed = recompute_all(&edges, &store);
        assert_eq!(routed.len(), 1);
        assert_eq!(routed[0].edge_index, 2);
    }

    #[test]
    fn recompute_is_idempotent() {
        let store = two_nodes();
        let edges = vec![
            EdgeRecord::<()>::new("a", "b").with_sides(Side::Top, Side::Bottom),
            EdgeRecord::new("b", "a"),
        ];
        assert_eq!(recompute_all(&edges, &store), recompute_all(&edges, &store));
    }

    #[test]
    fn transformed_maps_all_control_points() {
        let store = two_nodes();
        let edges = vec![EdgeRecord::<()>::new("a", "b").with_sides(Side::Right, Side::Left)];
        let routed = recompute_all(&edges, &store);
        let screen = routed[0].transformed(Affine::translate((10.0, 0.0)) * Affine::scale(2.0));
        assert_eq!(screen.p0, Point::new(210.0, 100.0));
        assert_eq!(screen.p2, Point::new(610.0, 100.0));
    }
}
