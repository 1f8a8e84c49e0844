// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

/// Error returned when a [`CanvasConfig`](crate::CanvasConfig) is rejected.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConfigError {
    /// Scale bounds are non-finite, non-positive, or out of order.
    ScaleBounds {
        /// Configured minimum scale.
        min_scale: f64,
        /// Configured maximum scale.
        max_scale: f64,
    },
    /// The wheel zoom factor is not a finite value above `1`.
    WheelFactor(f64),
    /// The fit margin is negative or non-finite.
    FitMargin(f64),
    /// The fit zoom-out multiplier is not a finite positive value.
    FitZoomOut(f64),
    /// The fit horizontal shift is non-finite.
    FitShift(f64),
    /// The default view has a non-finite offset or a non-positive scale.
    DefaultView,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ScaleBounds {
                min_scale,
                max_scale,
            } => write!(
                f,
                "invalid scale bounds: min {min_scale} max {max_scale} (need 0 < min <= max)"
            ),
            Self::WheelFactor(v) => write!(f, "zoom wheel factor {v} must be finite and > 1"),
            Self::FitMargin(v) => write!(f, "fit margin {v} must be finite and >= 0"),
            Self::FitZoomOut(v) => write!(f, "fit zoom-out {v} must be finite and > 0"),
            Self::FitShift(v) => write!(f, "fit horizontal shift {v} must be finite"),
            Self::DefaultView => f.write_str("default view must have a finite offset and positive scale"),
        }
    }
}

impl core::error::Error for ConfigError {}
