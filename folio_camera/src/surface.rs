// Copyright 2026 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The rendering-surface capability consumed by [`Camera`](crate::Camera).

use core::time::Duration;

use kurbo::{Point, Size, Vec2};

/// How a camera move is presented.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    /// Apply the move immediately.
    Instant,
    /// Animate the move over [`Transition::ANIMATED_DURATION`].
    Animated,
}

impl Transition {
    /// Duration of an animated move.
    pub const ANIMATED_DURATION: Duration = Duration::from_millis(500);

    /// Presentation duration of this transition.
    #[must_use]
    pub const fn duration(self) -> Duration {
        match self {
            Self::Instant => Duration::ZERO,
            Self::Animated => Self::ANIMATED_DURATION,
        }
    }
}

/// Viewport surface the camera draws through.
///
/// The surface owns the on-screen area: it reports its size, applies a
/// uniform scale-plus-translate transform, and exposes an alternate
/// native-scroll sub-area used for scroll emulation. The camera never
/// constructs rendering primitives itself; everything visual goes through
/// this trait.
///
/// Scroll notifications flow the other way: the embedder forwards the
/// surface's "offset changed" events to [`Camera::on_scroll_changed`] and
/// its "animated scroll finished" events to [`Camera::on_scroll_settled`].
///
/// [`Camera::on_scroll_changed`]: crate::Camera::on_scroll_changed
/// [`Camera::on_scroll_settled`]: crate::Camera::on_scroll_settled
pub trait Surface {
    /// Current viewport size in surface units.
    fn viewport_size(&self) -> Size;

    /// Applies the camera transform: content is scaled by `zoom` and the
    /// logical point `position` is placed at the viewport origin.
    fn apply_transform(&mut self, position: Point, zoom: f64, transition: Transition);

    /// Sets the scrollable extent of the native-scroll sub-area.
    fn set_scroll_content_size(&mut self, size: Size);

    /// Makes the native-scroll sub-area visible and active.
    fn show_scroll_area(&mut self);

    /// Hides the native-scroll sub-area.
    fn hide_scroll_area(&mut self);

    /// Visible (client) size of the native-scroll sub-area.
    fn scroll_viewport_size(&self) -> Size;

    /// Current scroll offset of the native-scroll sub-area.
    fn scroll_offset(&self) -> Vec2;

    /// Moves the native-scroll sub-area to `offset`, instantly or as an
    /// animated scroll that later reports completion.
    fn request_scroll(&mut self, offset: Vec2, transition: Transition);
}
