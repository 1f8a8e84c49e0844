// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interaction controller: turns pointer and wheel input into camera pans,
//! cursor-anchored zooms, and node drags.
//!
//! ## Sessions
//!
//! At most one [`Session`] is active:
//!
//! - A primary-button press on a node's drag affordance starts
//!   [`Session::DraggingNode`].
//! - A primary-button press on the background starts [`Session::Panning`].
//! - Any pointer release, or [`InputEvent::CaptureLost`], returns to
//!   [`Session::Idle`].
//!
//! Presses while a session is active are ignored, as are moves while idle.
//! Wheel input zooms only while idle.
//!
//! Drags are tracked in world space: the node follows
//! `start_node_pos + (screen_to_world(pointer) - start_pointer_world)`, so a
//! screen delta `d` at scale `s` moves the node by `d / s` regardless of zoom.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use understory_canvas::interaction::{
//!     InputEvent, InteractionController, PointerButton, PointerTarget,
//! };
//! use understory_canvas::{Camera, Node, NodeStore};
//!
//! let mut camera = Camera::new(0.25, 2.5);
//! let mut store = NodeStore::new();
//! store.replace_all([Node::new("a", 0.0, 0.0).with_size(100.0, 50.0)]);
//! let mut controller = InteractionController::new(1.07);
//!
//! controller.handle(
//!     InputEvent::PointerDown {
//!         position: Point::new(10.0, 10.0),
//!         button: PointerButton::Primary,
//!         target: PointerTarget::Node("a".into()),
//!     },
//!     &mut camera,
//!     &mut store,
//! );
//! controller.handle(
//!     InputEvent::PointerMove { position: Point::new(30.0, 15.0) },
//!     &mut camera,
//!     &mut store,
//! );
//! controller.handle(InputEvent::PointerUp, &mut camera, &mut store);
//!
//! assert_eq!(store.get("a").unwrap().position(), Point::new(20.0, 5.0));
//! assert!(controller.session().is_idle());
//! ```

use alloc::string::String;

use kurbo::{Point, Vec2};

use crate::camera::{Camera, ViewUpdate};
use crate::store::NodeStore;

/// Pointer button that produced a press.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Usually the left mouse button, or a touch/pen contact.
    #[default]
    Primary,
    /// Usually the right mouse button.
    Secondary,
    /// Usually the middle mouse button.
    Auxiliary,
}

/// What a press landed on, as determined by the host's hit testing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PointerTarget {
    /// Empty canvas.
    Background,
    /// The drag affordance of the node with this id.
    Node(String),
}

/// Raw input, in screen coordinates.
#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    /// A button was pressed.
    PointerDown {
        /// Pointer position.
        position: Point,
        /// Pressed button.
        button: PointerButton,
        /// Hit-test result for the press.
        target: PointerTarget,
    },
    /// The pointer moved.
    PointerMove {
        /// Pointer position.
        position: Point,
    },
    /// Any button was released.
    PointerUp,
    /// A wheel notch; only the sign of `delta_y` is used.
    Wheel {
        /// Pointer position; the zoom anchor.
        position: Point,
        /// Positive scrolls down (zoom out), negative scrolls up (zoom in).
        delta_y: f64,
    },
    /// The host lost pointer capture (window blur and the like).
    CaptureLost,
}

/// The in-progress gesture.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Session {
    /// No gesture.
    #[default]
    Idle,
    /// Background pan.
    Panning {
        /// Screen position of the press.
        start_pointer: Point,
        /// Camera offset at the press.
        start_offset: Vec2,
    },
    /// Node drag.
    DraggingNode {
        /// Node being dragged.
        node_id: String,
        /// World position of the press.
        start_pointer_world: Point,
        /// Node position at the press.
        start_node_pos: Point,
    },
}

impl Session {
    /// Returns `true` when no gesture is active.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Id of the node being dragged, if any.
    #[must_use]
    pub fn dragged_node(&self) -> Option<&str> {
        match self {
            Self::DraggingNode { node_id, .. } => Some(node_id),
            _ => None,
        }
    }
}

bitflags::bitflags! {
    /// What an input event changed.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Changes: u8 {
        /// Camera offset or scale.
        const CAMERA  = 0b0000_0001;
        /// Node positions or sizes.
        const NODES   = 0b0000_0010;
        /// The active session started, ended, or was cancelled.
        const SESSION = 0b0000_0100;
    }
}

/// Input state machine for a canvas.
///
/// The controller owns only the session. Camera and node store are borrowed
/// for the duration of each event, which keeps the mutate sequence for a
/// single event exclusive.
#[derive(Clone, Debug)]
pub struct InteractionController {
    session: Session,
    zoom_wheel_factor: f64,
}

impl InteractionController {
    /// Creates an idle controller.
    ///
    /// `zoom_wheel_factor` is the per-notch zoom multiplier and should be
    /// greater than `1`.
    #[must_use]
    pub fn new(zoom_wheel_factor: f64) -> Self {
        Self {
            session: Session::Idle,
            zoom_wheel_factor,
        }
    }

    /// Returns the active session.
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Returns the per-notch zoom multiplier.
    #[must_use]
    pub fn zoom_wheel_factor(&self) -> f64 {
        self.zoom_wheel_factor
    }

    /// Zoom factor for a wheel delta, or `None` when `delta_y` carries no
    /// direction.
    #[must_use]
    pub fn wheel_zoom_factor(&self, delta_y: f64) -> Option<f64> {
        if delta_y > 0.0 {
            Some(1.0 / self.zoom_wheel_factor)
        } else if delta_y < 0.0 {
            Some(self.zoom_wheel_factor)
        } else {
            None
        }
    }

    /// Processes one event against `camera` and `store`.
    pub fn handle(&mut self, event: InputEvent, camera: &mut Camera, store: &mut NodeStore) -> Changes {
        match event {
            InputEvent::PointerDown {
                position,
                button,
                target,
            } => self.pointer_down(position, button, target, camera, store),
            InputEvent::PointerMove { position } => self.pointer_move(position, camera, store),
            InputEvent::PointerUp | InputEvent::CaptureLost => self.end_session(),
            InputEvent::Wheel { position, delta_y } => self.wheel(position, delta_y, camera),
        }
    }

    /// Ends any active session.
    pub fn end_session(&mut self) -> Changes {
        if self.session.is_idle() {
            return Changes::empty();
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(session = ?self.session, "interaction session ended");
        self.session = Session::Idle;
        Changes::SESSION
    }

    /// Cancels a drag whose node is no longer in `store`.
    ///
    /// Called after the node set is replaced.
    pub fn retain_valid(&mut self, store: &NodeStore) -> Changes {
        match self.session.dragged_node() {
            Some(id) if !store.contains(id) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(node = id, "drag cancelled: node removed");
                self.session = Session::Idle;
                Changes::SESSION
            }
            _ => Changes::empty(),
        }
    }

    fn pointer_down(
        &mut self,
        position: Point,
        button: PointerButton,
        target: PointerTarget,
        camera: &Camera,
        store: &NodeStore,
    ) -> Changes {
        if !self.session.is_idle() || button != PointerButton::Primary || !position.is_finite() {
            return Changes::empty();
        }
        self.session = match target {
            PointerTarget::Background => Session::Panning {
                start_pointer: position,
                start_offset: camera.offset(),
            },
            PointerTarget::Node(node_id) => {
                let Some(node) = store.get(&node_id) else {
                    return Changes::empty();
                };
                Session::DraggingNode {
                    start_pointer_world: camera.screen_to_world(position),
                    start_node_pos: node.position(),
                    node_id,
                }
            }
        };
        #[cfg(feature = "tracing")]
        tracing::debug!(session = ?self.session, "interaction session started");
        Changes::SESSION
    }

    fn pointer_move(&mut self, position: Point, camera: &mut Camera, store: &mut NodeStore) -> Changes {
        if !position.is_finite() {
            return Changes::empty();
        }
        match &self.session {
            Session::Idle => Changes::empty(),
            Session::Panning {
                start_pointer,
                start_offset,
            } => {
                let offset = *start_offset + (position - *start_pointer);
                let before = camera.state();
                camera.set_view(ViewUpdate {
                    offset_x: Some(offset.x),
                    offset_y: Some(offset.y),
                    scale: None,
                });
                if camera.state() == before {
                    Changes::empty()
                } else {
                    Changes::CAMERA
                }
            }
            Session::DraggingNode {
                node_id,
                start_pointer_world,
                start_node_pos,
            } => {
                let delta = camera.screen_to_world(position) - *start_pointer_world;
                let target = *start_node_pos + delta;
                #[cfg(feature = "tracing")]
                tracing::trace!(node = %node_id, x = target.x, y = target.y, "drag move");
                if store.set_position(node_id, target) {
                    Changes::NODES
                } else if store.contains(node_id) {
                    Changes::empty()
                } else {
                    self.session = Session::Idle;
                    Changes::SESSION
                }
            }
        }
    }

    fn wheel(&mut self, position: Point, delta_y: f64, camera: &mut Camera) -> Changes {
        if !self.session.is_idle() {
            return Changes::empty();
        }
        let Some(factor) = self.wheel_zoom_factor(delta_y) else {
            return Changes::empty();
        };
        let before = camera.state();
        camera.zoom_at(position, factor);
        if camera.state() == before {
            Changes::empty()
        } else {
            Changes::CAMERA
        }
    }
}
