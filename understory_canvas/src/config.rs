// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::camera::CameraState;
use crate::error::ConfigError;
use crate::fit::FitOptions;

/// What [`Canvas::reset_view`](crate::Canvas::reset_view) does.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum ResetPolicy {
    /// Return to [`CanvasConfig::default_view`].
    #[default]
    DefaultView,
    /// Re-run fit-to-view with [`CanvasConfig::fit`].
    FitAll,
}

/// Canvas options. Each one affects only the operation it names.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct CanvasConfig {
    /// Lower scale bound.
    pub min_scale: f64,
    /// Upper scale bound.
    pub max_scale: f64,
    /// Per-notch wheel zoom multiplier.
    pub zoom_wheel_factor: f64,
    /// Fit-to-view parameters.
    pub fit: FitOptions,
    /// View restored by [`Canvas::reset_to_default_view`](crate::Canvas::reset_to_default_view).
    pub default_view: CameraState,
    /// Meaning of [`Canvas::reset_view`](crate::Canvas::reset_view).
    pub reset_policy: ResetPolicy,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            min_scale: 0.25,
            max_scale: 2.5,
            zoom_wheel_factor: 1.07,
            fit: FitOptions::default(),
            default_view: CameraState::IDENTITY,
            reset_policy: ResetPolicy::DefaultView,
        }
    }
}

impl CanvasConfig {
    /// Checks every option, returning the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        if !positive(self.min_scale) || !positive(self.max_scale) || self.min_scale > self.max_scale {
            return Err(ConfigError::ScaleBounds {
                min_scale: self.min_scale,
                max_scale: self.max_scale,
            });
        }
        if !(self.zoom_wheel_factor.is_finite() && self.zoom_wheel_factor > 1.0) {
            return Err(ConfigError::WheelFactor(self.zoom_wheel_factor));
        }
        if !(self.fit.margin.is_finite() && self.fit.margin >= 0.0) {
            return Err(ConfigError::FitMargin(self.fit.margin));
        }
        if !positive(self.fit.zoom_out) {
            return Err(ConfigError::FitZoomOut(self.fit.zoom_out));
        }
        if !self.fit.extra_shift_x.is_finite() {
            return Err(ConfigError::FitShift(self.fit.extra_shift_x));
        }
        let view = &self.default_view;
        if !(view.offset_x.is_finite() && view.offset_y.is_finite() && positive(view.scale)) {
            return Err(ConfigError::DefaultView);
        }
        Ok(())
    }
}
