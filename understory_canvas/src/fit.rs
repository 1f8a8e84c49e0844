// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fit-to-view: one-shot camera placement that frames every node.

use kurbo::{Rect, Size};

use crate::camera::{Camera, CameraState};
use crate::geometry::clamp_scale;
use crate::store::NodeStore;

/// Horizontal placement of fitted content.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum HorizontalBias {
    /// Content's left margin edge at the viewport's left edge.
    Left,
    /// Centered.
    #[default]
    Center,
    /// Content's right margin edge at the viewport's right edge.
    Right,
}

/// Vertical placement of fitted content.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum VerticalBias {
    /// Content's top margin edge at the viewport's top edge.
    Top,
    /// Centered.
    #[default]
    Center,
    /// Content's bottom margin edge at the viewport's bottom edge.
    Bottom,
}

/// Independent horizontal and vertical placement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FitBias {
    /// Horizontal placement.
    pub horizontal: HorizontalBias,
    /// Vertical placement.
    pub vertical: VerticalBias,
}

/// Parameters for [`fit_all`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct FitOptions {
    /// World-space padding around the node bounding box.
    pub margin: f64,
    /// Divides the tight-fit scale; values above `1` leave extra room.
    pub zoom_out: f64,
    /// Placement of the content within the viewport.
    pub bias: FitBias,
    /// Screen-space horizontal shift applied after placement.
    pub extra_shift_x: f64,
}

impl Default for FitOptions {
    /// Left-biased, vertically centered, slightly zoomed out.
    fn default() -> Self {
        Self {
            margin: 160.0,
            zoom_out: 1.25,
            bias: FitBias {
                horizontal: HorizontalBias::Left,
                vertical: VerticalBias::Center,
            },
            extra_shift_x: 0.0,
        }
    }
}

/// Computes the camera that frames `bounds` in a `viewport`.
///
/// Returns `None` when the viewport has no area or `options.zoom_out` is not
/// positive. Content extents are at least `1` world unit so a degenerate
/// bounding box never divides by zero.
#[must_use]
pub fn fit_view(
    bounds: Rect,
    viewport: Size,
    options: &FitOptions,
    min_scale: f64,
    max_scale: f64,
) -> Option<CameraState> {
    if !(viewport.width > 0.0 && viewport.height > 0.0) {
        return None;
    }
    if !(options.zoom_out.is_finite() && options.zoom_out > 0.0) {
        return None;
    }
    let margin = options.margin;
    let content_w = (bounds.width() + 2.0 * margin).max(1.0);
    let content_h = (bounds.height() + 2.0 * margin).max(1.0);

    let tight = (viewport.width / content_w).min(viewport.height / content_h);
    let scale = clamp_scale(tight / options.zoom_out, min_scale, max_scale);

    // Screen position of the padded content's top-left corner.
    let left = bounds.x0 - margin;
    let top = bounds.y0 - margin;
    let slack_x = viewport.width - content_w * scale;
    let slack_y = viewport.height - content_h * scale;

    let screen_x = match options.bias.horizontal {
        HorizontalBias::Left => 0.0,
        HorizontalBias::Center => slack_x / 2.0,
        HorizontalBias::Right => slack_x,
    };
    let screen_y = match options.bias.vertical {
        VerticalBias::Top => 0.0,
        VerticalBias::Center => slack_y / 2.0,
        VerticalBias::Bottom => slack_y,
    };

    Some(CameraState {
        offset_x: screen_x - left * scale + options.extra_shift_x,
        offset_y: screen_y - top * scale,
        scale,
    })
}

/// Frames every node in `store` and applies the result to `camera`.
///
/// Leaves the camera unchanged and returns `false` when the store is empty or
/// [`fit_view`] declines.
pub fn fit_all(camera: &mut Camera, store: &NodeStore, viewport: Size, options: &FitOptions) -> bool {
    let Some(bounds) = store.bounding_box() else {
        return false;
    };
    let Some(view) = fit_view(
        bounds,
        viewport,
        options,
        camera.min_scale(),
        camera.max_scale(),
    ) else {
        return false;
    };
    camera.set_view(view.into());
    #[cfg(feature = "tracing")]
    tracing::debug!(
        offset_x = camera.state().offset_x,
        offset_y = camera.state().offset_y,
        scale = camera.scale(),
        "fit all nodes"
    );
    true
}
