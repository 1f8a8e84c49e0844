// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Node store: id → position and size, the source of truth for layout.
//!
//! Nodes live in a dense arena in insertion order, with a side index from id
//! to slot. Rendering iterates the arena, so output order is deterministic;
//! it carries no z-order meaning.

use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashMap;
use kurbo::{Point, Rect, Size};

use crate::geometry::bounding_box_of;

/// A positioned, sized node in world space.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    /// Identifier, unique within a store.
    pub id: String,
    /// Left edge in world units.
    pub x: f64,
    /// Top edge in world units.
    pub y: f64,
    /// Measured width in world units; `0` until first layout.
    pub width: f64,
    /// Measured height in world units; `0` until first layout.
    pub height: f64,
}

impl Node {
    /// Creates an unmeasured node at `(x, y)`.
    #[must_use]
    pub fn new(id: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            id: id.into(),
            x,
            y,
            width: 0.0,
            height: 0.0,
        }
    }

    /// Returns this node with the given size.
    #[must_use]
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Top-left corner.
    #[must_use]
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Measured size.
    #[must_use]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// World-space rectangle `[x, x + width] × [y, y + height]`.
    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }
}

/// Id-indexed arena of [`Node`]s.
#[derive(Clone, Debug, Default)]
pub struct NodeStore {
    nodes: Vec<Node>,
    index: HashMap<String, usize>,
}

impl NodeStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically swaps the entire node set.
    ///
    /// Non-finite coordinates are stored as `0` and sizes are sanitized as in
    /// [`NodeStore::set_measured_size`]. If an id repeats, the later node
    /// replaces the earlier one but keeps the earlier slot.
    pub fn replace_all(&mut self, nodes: impl IntoIterator<Item = Node>) {
        self.nodes.clear();
        self.index.clear();
        for mut node in nodes {
            node.x = finite_or_zero(node.x);
            node.y = finite_or_zero(node.y);
            node.width = sanitize_extent(node.width);
            node.height = sanitize_extent(node.height);
            if let Some(&slot) = self.index.get(&node.id) {
                self.nodes[slot] = node;
            } else {
                self.index.insert(node.id.clone(), self.nodes.len());
                self.nodes.push(node);
            }
        }
    }

    /// Returns the node with the given id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Node> {
        self.index.get(id).map(|&slot| &self.nodes[slot])
    }

    /// Returns `true` if a node with the given id exists.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Moves a node's top-left corner to `pos`.
    ///
    /// Returns `false` (and changes nothing) if the id is absent or `pos` is
    /// not finite.
    pub fn set_position(&mut self, id: &str, pos: Point) -> bool {
        if !pos.is_finite() {
            return false;
        }
        let Some(node) = self.get_mut(id) else {
            return false;
        };
        node.x = pos.x;
        node.y = pos.y;
        true
    }

    /// Records a node's measured size without moving it.
    ///
    /// Negative and non-finite extents are stored as `0`. Returns `false` if
    /// the id is absent.
    pub fn set_measured_size(&mut self, id: &str, size: Size) -> bool {
        let Some(node) = self.get_mut(id) else {
            return false;
        };
        node.width = sanitize_extent(size.width);
        node.height = sanitize_extent(size.height);
        true
    }

    /// Iterates nodes in insertion order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Node> + '_ {
        self.nodes.iter()
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the store holds no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Union of all node rectangles, or `None` when empty.
    #[must_use]
    pub fn bounding_box(&self) -> Option<Rect> {
        bounding_box_of(&self.nodes)
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut Node> {
        let slot = *self.index.get(id)?;
        self.nodes.get_mut(slot)
    }
}

fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() { v } else { 0.0 }
}

pub(crate) fn sanitize_extent(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 { v } else { 0.0 }
}
