// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Vec2};

use crate::geometry::{clamp_scale, screen_to_world, world_to_screen};

/// The pan/zoom triple mapping world space into screen space.
///
/// `offset_*` is in screen pixels; `scale` is screen pixels per world unit.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct CameraState {
    /// Horizontal screen-space offset of the world origin.
    pub offset_x: f64,
    /// Vertical screen-space offset of the world origin.
    pub offset_y: f64,
    /// Uniform zoom factor.
    pub scale: f64,
}

impl CameraState {
    /// Identity view: world origin at the screen origin, 100% zoom.
    pub const IDENTITY: Self = Self {
        offset_x: 0.0,
        offset_y: 0.0,
        scale: 1.0,
    };

    /// Returns the offset as a vector.
    #[must_use]
    pub fn offset(&self) -> Vec2 {
        Vec2::new(self.offset_x, self.offset_y)
    }

    /// Returns the world → screen transform.
    #[must_use]
    pub fn world_to_screen_transform(&self) -> Affine {
        Affine::translate(self.offset()) * Affine::scale(self.scale)
    }

    fn is_valid(&self) -> bool {
        self.offset_x.is_finite()
            && self.offset_y.is_finite()
            && self.scale.is_finite()
            && self.scale > 0.0
    }
}

impl Default for CameraState {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Partial camera update for [`Camera::set_view`].
///
/// Unset fields keep their current value.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ViewUpdate {
    /// New horizontal offset.
    pub offset_x: Option<f64>,
    /// New vertical offset.
    pub offset_y: Option<f64>,
    /// New scale, clamped into the camera's scale limits.
    pub scale: Option<f64>,
}

impl From<CameraState> for ViewUpdate {
    fn from(state: CameraState) -> Self {
        Self {
            offset_x: Some(state.offset_x),
            offset_y: Some(state.offset_y),
            scale: Some(state.scale),
        }
    }
}

/// Pan/zoom camera with enforced scale limits.
///
/// The camera is a passive store: it never moves on its own. All inputs are
/// screened at this boundary, so non-finite deltas and non-positive factors
/// leave the camera untouched and `min_scale <= scale <= max_scale` always
/// holds.
#[derive(Clone, Debug)]
pub struct Camera {
    state: CameraState,
    min_scale: f64,
    max_scale: f64,
}

impl Camera {
    /// Creates an identity camera with the given scale limits.
    ///
    /// The limits are normalized so that `min_scale <= max_scale`.
    #[must_use]
    pub fn new(min_scale: f64, max_scale: f64) -> Self {
        let mut camera = Self {
            state: CameraState::IDENTITY,
            min_scale: 1.0,
            max_scale: 1.0,
        };
        camera.set_scale_limits(min_scale, max_scale);
        camera
    }

    /// Returns the current pan/zoom triple.
    #[must_use]
    pub fn state(&self) -> CameraState {
        self.state
    }

    /// Returns the current screen-space offset.
    #[must_use]
    pub fn offset(&self) -> Vec2 {
        self.state.offset()
    }

    /// Returns the current scale.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.state.scale
    }

    /// Returns the minimum scale.
    #[must_use]
    pub fn min_scale(&self) -> f64 {
        self.min_scale
    }

    /// Returns the maximum scale.
    #[must_use]
    pub fn max_scale(&self) -> f64 {
        self.max_scale
    }

    /// Returns the current zoom as a rounded percentage, for display.
    #[must_use]
    pub fn zoom_percent(&self) -> u32 {
        #[cfg(not(feature = "std"))]
        use kurbo::common::FloatFuncs as _;
        #[expect(
            clippy::cast_possible_truncation,
            reason = "scale is clamped to finite, positive limits"
        )]
        let percent = (self.state.scale * 100.0).round() as u32;
        percent
    }

    /// Sets the scale limits, normalizing their order and re-clamping the
    /// current scale.
    ///
    /// Non-finite or non-positive limits are ignored.
    pub fn set_scale_limits(&mut self, min_scale: f64, max_scale: f64) {
        let valid = |s: f64| s.is_finite() && s > 0.0;
        if !valid(min_scale) || !valid(max_scale) {
            return;
        }
        let (min_scale, max_scale) = if min_scale <= max_scale {
            (min_scale, max_scale)
        } else {
            (max_scale, min_scale)
        };
        self.min_scale = min_scale;
        self.max_scale = max_scale;
        self.state.scale = clamp_scale(self.state.scale, min_scale, max_scale);
    }

    /// Converts a screen-space point into world space.
    #[must_use]
    pub fn screen_to_world(&self, pt: Point) -> Point {
        screen_to_world(pt, &self.state)
    }

    /// Converts a world-space point into screen space.
    #[must_use]
    pub fn world_to_screen(&self, pt: Point) -> Point {
        world_to_screen(pt, &self.state)
    }

    /// Translates the view by a screen-space delta. Scale is unaffected.
    pub fn pan(&mut self, delta: Vec2) {
        if !delta.is_finite() {
            return;
        }
        self.state.offset_x += delta.x;
        self.state.offset_y += delta.y;
    }

    /// Multiplies the scale by `factor` while keeping the world point under
    /// `anchor` (screen space) fixed on screen.
    ///
    /// The resulting scale is clamped. The offset correction uses the scale
    /// that was actually applied, so the anchor stays put even when the
    /// clamp absorbs part of the requested factor.
    pub fn zoom_at(&mut self, anchor: Point, factor: f64) {
        if !factor.is_finite() || factor <= 0.0 || !anchor.is_finite() {
            return;
        }
        let before = self.screen_to_world(anchor);
        self.state.scale = clamp_scale(self.state.scale * factor, self.min_scale, self.max_scale);
        let after = self.screen_to_world(anchor);
        self.state.offset_x += (after.x - before.x) * self.state.scale;
        self.state.offset_y += (after.y - before.y) * self.state.scale;
    }

    /// Sets any subset of offset and scale directly.
    ///
    /// Scale is clamped; non-finite or non-positive values are ignored per
    /// field.
    pub fn set_view(&mut self, update: ViewUpdate) {
        if let Some(x) = update.offset_x.filter(|x| x.is_finite()) {
            self.state.offset_x = x;
        }
        if let Some(y) = update.offset_y.filter(|y| y.is_finite()) {
            self.state.offset_y = y;
        }
        if let Some(s) = update.scale.filter(|s| s.is_finite() && *s > 0.0) {
            self.state.scale = clamp_scale(s, self.min_scale, self.max_scale);
        }
    }

    /// Returns to the given default view (scale clamped).
    ///
    /// An invalid default falls back to [`CameraState::IDENTITY`].
    pub fn reset_to(&mut self, default_view: CameraState) {
        let target = if default_view.is_valid() {
            default_view
        } else {
            CameraState::IDENTITY
        };
        self.set_view(target.into());
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(0.25, 2.5)
    }
}
