// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Canvas: a headless engine for pannable, zoomable node graphs.
//!
//! This crate models a "canvas" of positioned, sized nodes joined by directed
//! edges inside a 2D viewport. It focuses on:
//! - Camera state (pan + uniform zoom) and screen ↔ world conversion.
//! - Zooming about the cursor without the point under it drifting.
//! - Dragging nodes by world-space deltas, exact at any zoom level.
//! - Routing edges between node anchors as quadratic curves.
//! - Fitting all nodes into the viewport with a margin and a placement bias.
//!
//! It does **not** draw anything, lay out text, fetch data, or persist
//! positions. Callers are expected to:
//! - Hit test presses (or use [`Canvas::hit_test`]) and feed pointer and wheel
//!   input to [`Canvas::handle`] in arrival order.
//! - Report measured node sizes with [`Canvas::set_measured_size`] and the
//!   viewport size with [`Canvas::set_viewport_size`].
//! - Draw the screen-space [`Frame`] returned by [`Canvas::frame`].
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use understory_canvas::interaction::{InputEvent, PointerButton, PointerTarget};
//! use understory_canvas::{Canvas, CanvasConfig, EdgeRecord, GraphData, NodeRecord, Side};
//!
//! let mut canvas: Canvas = Canvas::new(CanvasConfig::default()).unwrap();
//! canvas.set_viewport_size(Size::new(1000.0, 800.0));
//! canvas.set_data(GraphData::new(
//!     vec![
//!         NodeRecord::new("a", 0.0, 0.0).with_size(100.0, 100.0),
//!         NodeRecord::new("b", 300.0, 0.0).with_size(100.0, 100.0),
//!     ],
//!     vec![EdgeRecord::new("a", "b").with_sides(Side::Right, Side::Left)],
//! ));
//!
//! // Drag node `b` down by 40 pixels at 100% zoom.
//! canvas.handle(InputEvent::PointerDown {
//!     position: Point::new(350.0, 50.0),
//!     button: PointerButton::Primary,
//!     target: PointerTarget::Node("b".into()),
//! });
//! canvas.handle(InputEvent::PointerMove { position: Point::new(350.0, 90.0) });
//! canvas.handle(InputEvent::PointerUp);
//!
//! let frame = canvas.frame();
//! assert_eq!(frame.edges[0].curve.p2, Point::new(300.0, 90.0));
//! assert_eq!(frame.zoom_percent, 100);
//! ```
//!
//! ## Design notes
//!
//! - [`Canvas`] is the only component that originates state changes. The
//!   [`Camera`] and [`NodeStore`] are passive stores, and the
//!   [`InteractionController`](interaction::InteractionController) borrows
//!   both for the span of one event.
//! - Edges that reference a missing node are kept in the snapshot but never
//!   routed; this is not an error.
//! - [`Side::Auto`] resolves to the node center. There is no position-aware
//!   side selection.
//! - "Reset view" is two operations, [`Canvas::reset_to_default_view`] and
//!   [`Canvas::fit_all`]; [`Canvas::reset_view`] picks one according to
//!   [`ResetPolicy`].
//!
//! ## Features
//!
//! - `serde`: derive `Serialize`/`Deserialize` for graph snapshots and
//!   configuration.
//! - `tracing`: emit `tracing` events for graph replacement, session changes,
//!   and view fitting.
//!
//! This crate is `no_std` (with `alloc`).

#![no_std]

extern crate alloc;

mod camera;
mod canvas;
mod config;
mod data;
mod error;
mod store;

pub mod edges;
pub mod fit;
pub mod geometry;
pub mod interaction;

pub use camera::{Camera, CameraState, ViewUpdate};
pub use canvas::{Canvas, EdgeFrame, Frame, NodeFrame};
pub use config::{CanvasConfig, ResetPolicy};
pub use data::{EdgeRecord, GraphData, NodeRecord};
pub use edges::{RoutedEdge, Side};
pub use error::ConfigError;
pub use fit::{FitBias, FitOptions, HorizontalBias, VerticalBias};
pub use store::{Node, NodeStore};
