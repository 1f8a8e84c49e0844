// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Graph snapshots exchanged with collaborators.
//!
//! A [`GraphData`] is what a host loads with
//! [`Canvas::set_data`](crate::Canvas::set_data) and reads back with
//! [`Canvas::get_data`](crate::Canvas::get_data). Each record carries an
//! `extra` payload the engine stores but never interprets; with the `serde`
//! feature it is flattened, so a host can use
//! `serde_json::Map<String, serde_json::Value>` to round-trip unknown fields
//! such as a markdown body or link target.

use alloc::string::String;
use alloc::vec::Vec;

use crate::edges::Side;
use crate::store::Node;

/// A node as supplied by, and returned to, a collaborator.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeRecord<N = ()> {
    /// Node identifier.
    pub id: String,
    /// Left edge in world units.
    #[cfg_attr(feature = "serde", serde(default))]
    pub x: f64,
    /// Top edge in world units.
    #[cfg_attr(feature = "serde", serde(default))]
    pub y: f64,
    /// Width in world units, if already known.
    #[cfg_attr(feature = "serde", serde(default))]
    pub width: f64,
    /// Height in world units, if already known.
    #[cfg_attr(feature = "serde", serde(default))]
    pub height: f64,
    /// Opaque pass-through data.
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub extra: N,
}

impl<N: Default> NodeRecord<N> {
    /// Creates a record with no size and default extra data.
    #[must_use]
    pub fn new(id: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            id: id.into(),
            x,
            y,
            width: 0.0,
            height: 0.0,
            extra: N::default(),
        }
    }

    /// Returns this record with the given size.
    #[must_use]
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}

impl<N> NodeRecord<N> {
    pub(crate) fn to_node(&self) -> Node {
        Node::new(self.id.clone(), self.x, self.y).with_size(self.width, self.height)
    }
}

/// A directed edge between two nodes.
///
/// An edge naming a node that does not exist is inert: it is kept in the
/// snapshot but never routed or rendered.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct EdgeRecord<E = ()> {
    /// Source node id.
    pub from_id: String,
    /// Target node id.
    pub to_id: String,
    /// Anchor side on the source node; `None` means center.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub from_side: Option<Side>,
    /// Anchor side on the target node; `None` means center.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub to_side: Option<Side>,
    /// Optional label.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub label: Option<String>,
    /// Opaque pass-through data.
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub extra: E,
}

impl<E: Default> EdgeRecord<E> {
    /// Creates an edge anchored at both node centers.
    #[must_use]
    pub fn new(from_id: impl Into<String>, to_id: impl Into<String>) -> Self {
        Self {
            from_id: from_id.into(),
            to_id: to_id.into(),
            from_side: None,
            to_side: None,
            label: None,
            extra: E::default(),
        }
    }
}

impl<E> EdgeRecord<E> {
    /// Returns this edge with explicit anchor sides.
    #[must_use]
    pub fn with_sides(mut self, from_side: Side, to_side: Side) -> Self {
        self.from_side = Some(from_side);
        self.to_side = Some(to_side);
        self
    }

    /// Returns this edge with a label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// A full graph snapshot.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(bound(
        serialize = "N: serde::Serialize, E: serde::Serialize",
        deserialize = "N: serde::Deserialize<'de>, E: serde::Deserialize<'de>"
    ))
)]
pub struct GraphData<N = (), E = ()> {
    /// Nodes in insertion order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub nodes: Vec<NodeRecord<N>>,
    /// Edges in declaration order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub edges: Vec<EdgeRecord<E>>,
}

impl<N, E> GraphData<N, E> {
    /// Creates a snapshot from nodes and edges.
    #[must_use]
    pub fn new(nodes: Vec<NodeRecord<N>>, edges: Vec<EdgeRecord<E>>) -> Self {
        Self { nodes, edges }
    }
}

impl<N, E> Default for GraphData<N, E> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }
}
