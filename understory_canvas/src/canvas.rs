// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use kurbo::{Point, QuadBez, Rect, Size};

use crate::camera::{Camera, CameraState};
use crate::config::{CanvasConfig, ResetPolicy};
use crate::data::GraphData;
use crate::edges::{RoutedEdge, recompute_all};
use crate::error::ConfigError;
use crate::fit::fit_all;
use crate::geometry::world_rect_to_screen;
use crate::interaction::{Changes, InputEvent, InteractionController, Session};
use crate::store::{NodeStore, sanitize_extent};

/// A headless graph canvas.
///
/// `Canvas` owns the camera, the node store, the active interaction session,
/// and the current graph snapshot. It is the only thing that mutates them:
/// hosts feed it input events and read back a [`Frame`] to draw.
///
/// Edge curves are rerouted after every change to node geometry or the
/// viewport; [`Canvas::revision`] increments on every visible change so a
/// renderer can skip frames that would be identical.
///
/// `N` and `E` are opaque per-node and per-edge payloads carried through
/// [`Canvas::set_data`] and [`Canvas::get_data`] untouched.
#[derive(Clone, Debug)]
pub struct Canvas<N = (), E = ()> {
    config: CanvasConfig,
    camera: Camera,
    store: NodeStore,
    graph: GraphData<N, E>,
    controller: InteractionController,
    routes: Vec<RoutedEdge>,
    viewport: Size,
    revision: u64,
}

impl<N, E> Canvas<N, E> {
    /// Creates an empty canvas.
    ///
    /// The camera starts at `config.default_view`.
    pub fn new(config: CanvasConfig) -> Result<Self, ConfigError> {
        if let Err(err) = config.validate() {
            #[cfg(feature = "tracing")]
            tracing::warn!(%err, "rejected canvas configuration");
            return Err(err);
        }
        Ok(Self::with_valid_config(config))
    }

    fn with_valid_config(config: CanvasConfig) -> Self {
        let mut camera = Camera::new(config.min_scale, config.max_scale);
        camera.reset_to(config.default_view);
        Self {
            config,
            camera,
            store: NodeStore::new(),
            graph: GraphData::default(),
            controller: InteractionController::new(config.zoom_wheel_factor),
            routes: Vec::new(),
            viewport: Size::ZERO,
            revision: 0,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    /// Returns the camera.
    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Returns the node store.
    #[must_use]
    pub fn store(&self) -> &NodeStore {
        &self.store
    }

    /// Returns the active interaction session.
    #[must_use]
    pub fn session(&self) -> &Session {
        self.controller.session()
    }

    /// Returns the current viewport size.
    #[must_use]
    pub fn viewport_size(&self) -> Size {
        self.viewport
    }

    /// Monotonic counter bumped on every visible change.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Routed edges in world space, in snapshot order.
    #[must_use]
    pub fn routes(&self) -> &[RoutedEdge] {
        &self.routes
    }

    /// Replaces the whole graph.
    ///
    /// A drag whose node is not in the new snapshot is cancelled.
    pub fn set_data(&mut self, data: GraphData<N, E>) {
        self.store.replace_all(data.nodes.iter().map(|record| record.to_node()));
        self.graph = data;
        self.controller.retain_valid(&self.store);
        #[cfg(feature = "tracing")]
        tracing::debug!(
            nodes = self.store.len(),
            edges = self.graph.edges.len(),
            "graph replaced"
        );
        self.reroute();
    }

    /// Returns the current graph with node geometry taken from the live store.
    #[must_use]
    pub fn get_data(&self) -> GraphData<N, E>
    where
        N: Clone,
        E: Clone,
    {
        let mut data = self.graph.clone();
        for record in &mut data.nodes {
            if let Some(node) = self.store.get(&record.id) {
                record.x = node.x;
                record.y = node.y;
                record.width = node.width;
                record.height = node.height;
            }
        }
        data
    }

    /// Live positions keyed by node id, in insertion order.
    pub fn positions(&self) -> impl Iterator<Item = (&str, Point)> + '_ {
        self.store.iter().map(|node| (node.id.as_str(), node.position()))
    }

    /// Overlays saved positions onto the live nodes.
    ///
    /// Unknown ids and non-finite positions are skipped. Returns the number of
    /// nodes moved.
    pub fn apply_positions<I, S>(&mut self, positions: I) -> usize
    where
        I: IntoIterator<Item = (S, Point)>,
        S: AsRef<str>,
    {
        let mut moved = 0;
        for (id, pos) in positions {
            if self.store.set_position(id.as_ref(), pos) {
                moved += 1;
            }
        }
        if moved > 0 {
            self.reroute();
        }
        moved
    }

    /// Records a node's rendered size.
    pub fn set_measured_size(&mut self, id: &str, size: Size) {
        let before = self.store.get(id).map(|n| n.size());
        if self.store.set_measured_size(id, size) && before != self.store.get(id).map(|n| n.size()) {
            self.reroute();
        }
    }

    /// Records the viewport size used by fitting.
    ///
    /// Negative or non-finite extents are stored as `0`.
    pub fn set_viewport_size(&mut self, size: Size) {
        let size = Size::new(sanitize_extent(size.width), sanitize_extent(size.height));
        if self.viewport == size {
            return;
        }
        self.viewport = size;
        self.reroute();
    }

    /// Processes one input event.
    pub fn handle(&mut self, event: InputEvent) -> Changes {
        let changes = self
            .controller
            .handle(event, &mut self.camera, &mut self.store);
        if changes.contains(Changes::NODES) {
            self.reroute();
        } else if changes.intersects(Changes::CAMERA | Changes::SESSION) {
            self.bump();
        }
        changes
    }

    /// Ends any active gesture, e.g. when the host window loses focus.
    pub fn cancel_interaction(&mut self) -> Changes {
        self.handle(InputEvent::CaptureLost)
    }

    /// Frames every node using the configured fit options.
    ///
    /// Returns `false` and leaves the camera alone when there are no nodes or
    /// the viewport has no area.
    pub fn fit_all(&mut self) -> bool {
        let before = self.camera.state();
        let fitted = fit_all(&mut self.camera, &self.store, self.viewport, &self.config.fit);
        if self.camera.state() != before {
            self.bump();
        }
        fitted
    }

    /// Returns the camera to the configured default view.
    pub fn reset_to_default_view(&mut self) {
        let before = self.camera.state();
        self.camera.reset_to(self.config.default_view);
        if self.camera.state() != before {
            self.bump();
        }
    }

    /// Resets the view according to the configured [`ResetPolicy`].
    pub fn reset_view(&mut self) {
        match self.config.reset_policy {
            ResetPolicy::DefaultView => self.reset_to_default_view(),
            ResetPolicy::FitAll => {
                self.fit_all();
            }
        }
    }

    /// Returns the topmost node whose screen rectangle contains `pt`.
    ///
    /// Later nodes are considered on top of earlier ones. Edges count as
    /// inside, so a node that has not been measured yet is hit only at its
    /// exact position.
    #[must_use]
    pub fn hit_test(&self, pt: Point) -> Option<&str> {
        let world = self.camera.screen_to_world(pt);
        self.store
            .iter()
            .rev()
            .find(|node| {
                let r = node.rect();
                (r.x0..=r.x1).contains(&world.x) && (r.y0..=r.y1).contains(&world.y)
            })
            .map(|node| node.id.as_str())
    }

    /// Projects the current state into screen space for drawing.
    #[must_use]
    pub fn frame(&self) -> Frame<'_> {
        let state = self.camera.state();
        let transform = state.world_to_screen_transform();
        let nodes = self
            .store
            .iter()
            .map(|node| NodeFrame {
                id: &node.id,
                rect: world_rect_to_screen(node.rect(), &state),
            })
            .collect();
        let edges = self
            .routes
            .iter()
            .map(|route| {
                let edge = &self.graph.edges[route.edge_index];
                EdgeFrame {
                    from_id: &edge.from_id,
                    to_id: &edge.to_id,
                    curve: route.transformed(transform),
                    label: edge.label.as_deref(),
                    label_anchor: transform * route.label_anchor(),
                }
            })
            .collect();
        Frame {
            nodes,
            edges,
            camera: state,
            zoom_percent: self.camera.zoom_percent(),
            revision: self.revision,
        }
    }

    fn reroute(&mut self) {
        self.routes = recompute_all(&self.graph.edges, &self.store);
        self.bump();
    }

    fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

impl<N, E> Default for Canvas<N, E> {
    fn default() -> Self {
        Self::with_valid_config(CanvasConfig::default())
    }
}

/// Screen-space snapshot handed to a renderer.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame<'a> {
    /// Nodes in insertion order.
    pub nodes: Vec<NodeFrame<'a>>,
    /// Routable edges in snapshot order; dangling edges are absent.
    pub edges: Vec<EdgeFrame<'a>>,
    /// Camera used for the projection.
    pub camera: CameraState,
    /// `round(scale * 100)`.
    pub zoom_percent: u32,
    /// [`Canvas::revision`] at the time of the snapshot.
    pub revision: u64,
}

/// A node's screen rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeFrame<'a> {
    /// Node id.
    pub id: &'a str,
    /// Screen-space rectangle.
    pub rect: Rect,
}

/// An edge's screen-space curve.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeFrame<'a> {
    /// Source node id.
    pub from_id: &'a str,
    /// Target node id.
    pub to_id: &'a str,
    /// Screen-space curve.
    pub curve: QuadBez,
    /// Label text, if any.
    pub label: Option<&'a str>,
    /// Screen-space point for the label.
    pub label_anchor: Point,
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use kurbo::{Point, Rect, Size};

    use super::Canvas;
    use crate::config::{CanvasConfig, ResetPolicy};
    use crate::data::{EdgeRecord, GraphData, NodeRecord};
    use crate::edges::{Side, recompute_all};
    use crate::interaction::{Changes, InputEvent, PointerButton, PointerTarget};

    fn graph() -> GraphData {
        GraphData::new(
            vec![
                NodeRecord::new("a", 0.0, 0.0).with_size(100.0, 100.0),
                NodeRecord::new("b", 300.0, 0.0).with_size(100.0, 100.0),
            ],
            vec![
                EdgeRecord::new("a", "b")
                    .with_sides(Side::Right, Side::Left)
                    .with_label("next"),
                EdgeRecord::new("a", "missing"),
            ],
        )
    }

    fn canvas() -> Canvas {
        let mut canvas = Canvas::new(CanvasConfig::default()).unwrap();
        canvas.set_data(graph());
        canvas
    }

    #[test]
    fn new_rejects_invalid_config() {
        let config = CanvasConfig {
            zoom_wheel_factor: 0.9,
            ..CanvasConfig::default()
        };
        assert!(Canvas::<(), ()>::new(config).is_err());
    }

    #[test]
    fn set_data_routes_live_edges_only() {
        let canvas = canvas();
        assert_eq!(canvas.routes().len(), 1);
        let frame = canvas.frame();
        assert_eq!(frame.nodes.len(), 2);
        assert_eq!(frame.edges.len(), 1);
        assert_eq!(frame.edges[0].label, Some("next"));
        assert_eq!(frame.edges[0].curve.p0, Point::new(100.0, 50.0));
        assert_eq!(frame.zoom_percent, 100);
    }

    #[test]
    fn drag_reroutes_edges() {
        let mut canvas = canvas();
        canvas.handle(InputEvent::PointerDown {
            position: Point::new(310.0, 10.0),
            button: PointerButton::Primary,
            target: PointerTarget::Node("b".into()),
        });
        let changes = canvas.handle(InputEvent::PointerMove {
            position: Point::new(310.0, 110.0),
        });
        assert_eq!(changes, Changes::NODES);
        assert_eq!(canvas.routes()[0].curve.p2, Point::new(300.0, 150.0));
    }

    #[test]
    fn get_data_reports_live_positions() {
        let mut canvas = canvas();
        canvas.apply_positions([("a", Point::new(-50.0, 25.0)), ("zzz", Point::new(1.0, 1.0))]);
        let data = canvas.get_data();
        assert_eq!((data.nodes[0].x, data.nodes[0].y), (-50.0, 25.0));
        assert_eq!(data.edges.len(), 2);
    }

    #[test]
    fn replacing_data_cancels_orphaned_drag() {
        let mut canvas = canvas();
        canvas.handle(InputEvent::PointerDown {
            position: Point::new(10.0, 10.0),
            button: PointerButton::Primary,
            target: PointerTarget::Node("a".into()),
        });
        canvas.set_data(GraphData::new(vec![NodeRecord::new("b", 0.0, 0.0)], vec![]));
        assert!(canvas.session().is_idle());
    }

    #[test]
    fn hit_test_prefers_later_nodes() {
        let mut canvas = Canvas::<(), ()>::default();
        canvas.set_data(GraphData::new(
            vec![
                NodeRecord::new("under", 0.0, 0.0).with_size(100.0, 100.0),
                NodeRecord::new("over", 50.0, 50.0).with_size(100.0, 100.0),
            ],
            vec![],
        ));
        assert_eq!(canvas.hit_test(Point::new(75.0, 75.0)), Some("over"));
        assert_eq!(canvas.hit_test(Point::new(10.0, 10.0)), Some("under"));
        assert_eq!(canvas.hit_test(Point::new(500.0, 500.0)), None);
    }

    #[test]
    fn reset_policy_selects_behavior() {
        let mut canvas = canvas();
        canvas.set_viewport_size(Size::new(1000.0, 800.0));
        assert!(canvas.fit_all());
        assert_ne!(canvas.camera().scale(), 1.0);
        canvas.reset_view();
        assert_eq!(canvas.camera().scale(), 1.0);

        let mut fitting = Canvas::<(), ()>::new(CanvasConfig {
            reset_policy: ResetPolicy::FitAll,
            ..CanvasConfig::default()
        })
        .unwrap();
        fitting.set_data(graph());
        fitting.set_viewport_size(Size::new(1000.0, 800.0));
        fitting.reset_view();
        let fitted = fitting.camera().state();
        fitting.reset_to_default_view();
        assert_eq!(fitting.camera().scale(), 1.0);
        fitting.reset_view();
        assert_eq!(fitting.camera().state(), fitted);
    }

    #[test]
    fn revision_tracks_changes() {
        let mut canvas = canvas();
        let r0 = canvas.revision();
        canvas.handle(InputEvent::PointerMove {
            position: Point::new(1.0, 1.0),
        });
        assert_eq!(canvas.revision(), r0);
        canvas.handle(InputEvent::Wheel {
            position: Point::ZERO,
            delta_y: -1.0,
        });
        assert!(canvas.revision() > r0);
    }

    #[test]
    fn measured_size_reroutes() {
        let mut canvas = canvas();
        canvas.set_measured_size("a", Size::new(200.0, 40.0));
        assert_eq!(canvas.routes()[0].curve.p0, Point::new(200.0, 20.0));
        assert_eq!(canvas.frame().nodes[0].rect, Rect::new(0.0, 0.0, 200.0, 40.0));
    }

    #[test]
    fn viewport_resize_reroutes_once() {
        let mut canvas = canvas();
        let r0 = canvas.revision();
        canvas.set_viewport_size(Size::new(640.0, 480.0));
        let r1 = canvas.revision();
        assert!(r1 > r0);
        assert_eq!(canvas.routes(), recompute_all(&graph().edges, canvas.store()).as_slice());
        canvas.set_viewport_size(Size::new(640.0, 480.0));
        assert_eq!(canvas.revision(), r1);
    }

    #[test]
    fn viewport_size_is_sanitized() {
        let mut canvas = canvas();
        canvas.set_viewport_size(Size::new(f64::NAN, -5.0));
        assert_eq!(canvas.viewport_size(), Size::ZERO);
        let r = canvas.revision();
        canvas.set_viewport_size(Size::new(f64::NAN, -5.0));
        assert_eq!(canvas.revision(), r);
        assert!(!canvas.fit_all());
    }

    #[test]
    fn hit_test_includes_edges() {
        let mut canvas = canvas();
        assert_eq!(canvas.hit_test(Point::new(100.0, 100.0)), Some("a"));
        assert_eq!(canvas.hit_test(Point::new(400.0, 50.0)), Some("b"));
        assert_eq!(canvas.hit_test(Point::new(200.0, 50.0)), None);

        canvas.set_data(GraphData::new(vec![NodeRecord::new("c", 10.0, 20.0)], vec![]));
        assert_eq!(canvas.hit_test(Point::new(10.0, 20.0)), Some("c"));
        assert_eq!(canvas.hit_test(Point::new(11.0, 20.0)), None);
    }
}
