// Copyright 2026 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pure framing math: ratio selection with scrollbar reservation.

use kurbo::{Point, Rect, Size, Vec2};

bitflags::bitflags! {
    /// Which emulated scrollbars a framing solution requires.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct ScrollAxes: u8 {
        /// Content overflows horizontally; a horizontal scrollbar is
        /// reserved along the bottom edge.
        const HORIZONTAL = 0b01;
        /// Content overflows vertically; a vertical scrollbar is reserved
        /// along the side edge.
        const VERTICAL = 0b10;
    }
}

/// Ratio-selection policy when framing a rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FitMode {
    /// Largest uniform scale that shows the whole rectangle (minimum of the
    /// axis ratios).
    #[default]
    Fit,
    /// Smallest uniform scale that covers the viewport (maximum of the axis
    /// ratios); the other axis overflows into an emulated scrollbar.
    Fill,
}

/// Optional bounds on the framing ratio.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct RatioLimits {
    /// Lower bound, if any.
    pub min: Option<f64>,
    /// Upper bound, if any.
    pub max: Option<f64>,
}

impl RatioLimits {
    /// Clamps `ratio` into the configured bounds.
    #[must_use]
    pub fn clamp(self, ratio: f64) -> f64 {
        let ratio = match self.min {
            Some(min) if ratio < min => min,
            _ => ratio,
        };
        match self.max {
            Some(max) if ratio > max => max,
            _ => ratio,
        }
    }
}

/// Result of [`solve`]: the transform the camera should adopt plus the
/// overlay-mask geometry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FocusSolution {
    /// Uniform scale to apply.
    pub ratio: f64,
    /// Logical position for the camera (the focus origin, shifted to center
    /// underfilled axes).
    pub offset: Point,
    /// Axes that need an emulated scrollbar. Empty means a direct transform
    /// suffices.
    pub axes: ScrollAxes,
    /// Focus rectangle size scaled by `ratio`, in surface units.
    pub scaled: Size,
    /// Overlay-mask shift compensating for reserved scrollbar thickness.
    pub mask_shift: Vec2,
}

/// Centering offset for one axis, in logical units.
///
/// When the scaled extent is smaller than the viewport extent, the camera
/// backs up by half the slack so the content sits centered.
fn center_offset(pixel: f64, viewport: f64, ratio: f64) -> f64 {
    if pixel < viewport {
        -((viewport / 2.0 - pixel / 2.0) / ratio)
    } else {
        0.0
    }
}

/// Computes the ratio and offset that frame `focus` inside `viewport`.
///
/// Reserving a scrollbar shrinks the viewport on the *other* axis, which
/// changes the very ratio used to decide whether a scrollbar is needed, so
/// the loop re-evaluates after each reservation. Each axis is flagged at
/// most once, bounding the loop at one extra pass per axis. Scaled extents
/// are rounded to whole surface units before the overflow comparison;
/// fractional math would otherwise reserve scrollbars for sub-pixel
/// overhangs.
///
/// `limits` are applied after the loop settles: a clamped ratio does not
/// re-trigger scrollbar reservation.
#[must_use]
pub fn solve(
    focus: Rect,
    viewport: Size,
    mode: FitMode,
    scrollbar_thickness: f64,
    limits: RatioLimits,
) -> FocusSolution {
    let width = focus.width();
    let height = focus.height();

    let mut viewport_width = viewport.width;
    let mut viewport_height = viewport.height;
    let mut axes = ScrollAxes::empty();

    let ratio = loop {
        let width_ratio = viewport_width / width;
        let height_ratio = viewport_height / height;
        let ratio = match mode {
            FitMode::Fit => width_ratio.min(height_ratio),
            FitMode::Fill => width_ratio.max(height_ratio),
        };

        if !axes.contains(ScrollAxes::HORIZONTAL) && (width * ratio).round() > viewport_width {
            viewport_height -= scrollbar_thickness;
            axes |= ScrollAxes::HORIZONTAL;
            if scrollbar_thickness > 0.0 {
                continue;
            }
        }
        if !axes.contains(ScrollAxes::VERTICAL) && (height * ratio).round() > viewport_height {
            viewport_width -= scrollbar_thickness;
            axes |= ScrollAxes::VERTICAL;
            if scrollbar_thickness > 0.0 {
                continue;
            }
        }

        break ratio;
    };

    let ratio = limits.clamp(ratio);
    let scaled = Size::new(width * ratio, height * ratio);

    let offset = Point::new(
        focus.x0 + center_offset(scaled.width, viewport_width, ratio),
        focus.y0 + center_offset(scaled.height, viewport_height, ratio),
    );

    let mask_shift = Vec2::new(
        if axes.contains(ScrollAxes::VERTICAL) {
            -scrollbar_thickness / 2.0
        } else {
            0.0
        },
        if axes.contains(ScrollAxes::HORIZONTAL) {
            -scrollbar_thickness / 2.0
        } else {
            0.0
        },
    );

    FocusSolution {
        ratio,
        offset,
        axes,
        scaled,
        mask_shift,
    }
}
