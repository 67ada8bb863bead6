// Copyright 2026 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Size, Vec2};

use crate::surface::{Surface, Transition};

/// Logical bounds of the camera while scroll emulation is active.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollRegion {
    /// Minimum logical corner of the region.
    pub min: Point,
    /// Maximum logical corner of the region.
    pub max: Point,
}

impl ScrollRegion {
    /// Creates a region spanning `min..max`.
    #[must_use]
    pub const fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    /// Logical extent of the region.
    #[must_use]
    pub fn size(&self) -> Size {
        Size::new(self.max.x - self.min.x, self.max.y - self.min.y)
    }
}

/// Camera over a [`Surface`]: logical position + zoom, with an optional
/// native-scroll emulation sub-mode.
///
/// Without a scroll region, [`Camera::set_position`] applies a raw transform.
/// With a region enabled, a requested position is translated into a scroll
/// offset inside the region and the surface's native scroll mechanism is
/// driven instead; the logical position is then re-derived from the *actual
/// clamped* offset, so [`Camera::position`] always reflects what is really
/// displayed even when the request was out of range.
///
/// The camera suppresses reacting to surface scroll notifications while one
/// of its own animated scrolls is in flight, to avoid a feedback loop
/// between camera-driven scrolling and the surface's scroll events.
#[derive(Debug)]
pub struct Camera<S: Surface> {
    surface: S,
    position: Point,
    zoom: f64,
    region: Option<ScrollRegion>,
    echo_suppressed: bool,
}

/// Scroll offsets are compared after rounding: fractional-pixel math would
/// otherwise keep requesting moves the surface cannot distinguish.
fn offsets_coincide(a: Vec2, b: Vec2) -> bool {
    a.x.round() == b.x.round() && a.y.round() == b.y.round()
}

impl<S: Surface> Camera<S> {
    /// Creates a camera at the origin with zoom `1.0` and no scroll region.
    #[must_use]
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            position: Point::ORIGIN,
            zoom: 1.0,
            region: None,
            echo_suppressed: false,
        }
    }

    /// Returns a shared reference to the surface.
    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Returns a mutable reference to the surface.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Current logical position (the point at the viewport origin).
    #[must_use]
    pub fn position(&self) -> Point {
        self.position
    }

    /// Current uniform zoom factor.
    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Current scroll region, if scroll emulation is active.
    #[must_use]
    pub fn scroll_region(&self) -> Option<ScrollRegion> {
        self.region
    }

    /// Returns `true` while scroll notifications are being ignored because a
    /// camera-driven animated scroll is in flight.
    #[must_use]
    pub fn is_echo_suppressed(&self) -> bool {
        self.echo_suppressed
    }

    /// Moves the camera to `target` at `zoom`.
    ///
    /// With no scroll region this is a raw transform. With a region active,
    /// the request is translated to a clamped scroll offset and the native
    /// scroll is driven; a zoom change re-establishes the region first since
    /// the pixel-to-logical mapping depends on it.
    pub fn set_position(&mut self, target: Point, zoom: f64, transition: Transition) {
        let Some(region) = self.region else {
            self.apply(target, zoom, transition);
            return;
        };

        // The scroll mapping is only valid for the zoom the region was
        // established with.
        if (zoom - self.zoom).abs() > f64::EPSILON {
            self.enable_scroll_region(region, target, zoom);
            return;
        }

        let desired = (target - region.min) * self.zoom;
        let clamped = self.clamp_scroll(region, desired);

        if offsets_coincide(clamped, self.surface.scroll_offset()) {
            // Already in place; just refresh the transform from the actual
            // offset so logical state matches what is displayed.
            let actual = self.surface.scroll_offset();
            self.apply(region.min + actual / self.zoom, self.zoom, transition);
            return;
        }

        self.apply(region.min + clamped / self.zoom, self.zoom, transition);
        if transition == Transition::Animated {
            self.echo_suppressed = true;
        }
        self.surface.request_scroll(clamped, transition);
    }

    /// Enters scroll emulation over `region`, positioned at `initial`.
    ///
    /// The scroll area's content extent becomes the region size scaled by
    /// `zoom`; the camera then scrolls to `initial` (animated).
    pub fn enable_scroll_region(&mut self, region: ScrollRegion, initial: Point, zoom: f64) {
        self.zoom = zoom;
        self.surface.set_scroll_content_size(region.size() * zoom);
        self.surface.show_scroll_area();
        self.region = Some(region);
        log::debug!(
            "scroll region enabled: ({}, {})..({}, {}) at zoom {zoom}",
            region.min.x,
            region.min.y,
            region.max.x,
            region.max.y,
        );
        self.set_position(initial, zoom, Transition::Animated);
    }

    /// Leaves scroll emulation. No-op when already disabled.
    pub fn disable_scroll_region(&mut self) {
        if self.region.take().is_some() {
            self.surface.hide_scroll_area();
            log::debug!("scroll region disabled");
        }
    }

    /// Surface scroll-offset notification.
    ///
    /// Ignored while a camera-driven animated scroll is in flight; otherwise
    /// the logical position is re-derived from the actual offset and the
    /// transform refreshed instantly.
    pub fn on_scroll_changed(&mut self) {
        if self.echo_suppressed {
            return;
        }
        let Some(region) = self.region else {
            return;
        };
        let offset = self.surface.scroll_offset();
        self.apply(region.min + offset / self.zoom, self.zoom, Transition::Instant);
    }

    /// Completion signal for an animated camera-driven scroll; resumes
    /// listening to surface scroll notifications.
    pub fn on_scroll_settled(&mut self) {
        self.echo_suppressed = false;
    }

    fn clamp_scroll(&self, region: ScrollRegion, desired: Vec2) -> Vec2 {
        let content = region.size() * self.zoom;
        let client = self.surface.scroll_viewport_size();
        let max_x = (content.width - client.width).max(0.0);
        let max_y = (content.height - client.height).max(0.0);
        Vec2::new(desired.x.clamp(0.0, max_x), desired.y.clamp(0.0, max_y))
    }

    fn apply(&mut self, position: Point, zoom: f64, transition: Transition) {
        self.surface.apply_transform(position, zoom, transition);
        self.position = position;
        self.zoom = zoom;
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Size, Vec2};

    use super::{Camera, ScrollRegion};
    use crate::surface::{Surface, Transition};

    /// In-memory surface that records every call and applies scroll
    /// requests immediately.
    struct TestSurface {
        viewport: Size,
        scroll_client: Size,
        content: Size,
        offset: Vec2,
        scroll_area_shown: bool,
        transforms: Vec<(Point, f64, Transition)>,
        scroll_requests: Vec<(Vec2, Transition)>,
    }

    impl TestSurface {
        fn new() -> Self {
            Self {
                viewport: Size::new(800.0, 600.0),
                scroll_client: Size::new(800.0, 600.0),
                content: Size::ZERO,
                offset: Vec2::ZERO,
                scroll_area_shown: false,
                transforms: Vec::new(),
                scroll_requests: Vec::new(),
            }
        }
    }

    impl Surface for TestSurface {
        fn viewport_size(&self) -> Size {
            self.viewport
        }

        fn apply_transform(&mut self, position: Point, zoom: f64, transition: Transition) {
            self.transforms.push((position, zoom, transition));
        }

        fn set_scroll_content_size(&mut self, size: Size) {
            self.content = size;
        }

        fn show_scroll_area(&mut self) {
            self.scroll_area_shown = true;
        }

        fn hide_scroll_area(&mut self) {
            self.scroll_area_shown = false;
        }

        fn scroll_viewport_size(&self) -> Size {
            self.scroll_client
        }

        fn scroll_offset(&self) -> Vec2 {
            self.offset
        }

        fn request_scroll(&mut self, offset: Vec2, transition: Transition) {
            self.offset = offset;
            self.scroll_requests.push((offset, transition));
        }
    }

    #[test]
    fn raw_move_applies_transform_directly() {
        let mut camera = Camera::new(TestSurface::new());
        camera.set_position(Point::new(10.0, 20.0), 2.0, Transition::Instant);

        assert_eq!(camera.position(), Point::new(10.0, 20.0));
        assert_eq!(camera.zoom(), 2.0);
        let surface = camera.surface();
        assert_eq!(
            surface.transforms.as_slice(),
            &[(Point::new(10.0, 20.0), 2.0, Transition::Instant)]
        );
        assert!(surface.scroll_requests.is_empty());
    }

    #[test]
    fn enable_region_scales_content_and_scrolls_to_initial() {
        let mut camera = Camera::new(TestSurface::new());
        let region = ScrollRegion::new(Point::new(0.0, 0.0), Point::new(1000.0, 1000.0));
        camera.enable_scroll_region(region, Point::new(100.0, 50.0), 2.0);

        let surface = camera.surface();
        assert!(surface.scroll_area_shown);
        assert_eq!(surface.content, Size::new(2000.0, 2000.0));
        // (100, 50) × zoom 2 from the region origin.
        assert_eq!(surface.offset, Vec2::new(200.0, 100.0));
        assert_eq!(camera.position(), Point::new(100.0, 50.0));
    }

    #[test]
    fn out_of_range_target_clamps_and_reports_displayed_position() {
        let mut camera = Camera::new(TestSurface::new());
        let region = ScrollRegion::new(Point::ORIGIN, Point::new(1000.0, 1000.0));
        camera.enable_scroll_region(region, Point::ORIGIN, 1.0);
        camera.on_scroll_settled();

        // Content 1000×1000, client 800×600 → max offsets (200, 400).
        camera.set_position(Point::new(5000.0, 5000.0), 1.0, Transition::Instant);
        assert_eq!(camera.surface().offset, Vec2::new(200.0, 400.0));
        assert_eq!(camera.position(), Point::new(200.0, 400.0));
    }

    #[test]
    fn fractional_offset_difference_is_a_noop_move() {
        let mut camera = Camera::new(TestSurface::new());
        let region = ScrollRegion::new(Point::ORIGIN, Point::new(1000.0, 1000.0));
        camera.enable_scroll_region(region, Point::new(100.0, 100.0), 1.0);
        camera.on_scroll_settled();

        let requests_before = camera.surface().scroll_requests.len();
        // Within rounding tolerance of the current (100, 100) offset.
        camera.set_position(Point::new(100.3, 99.8), 1.0, Transition::Animated);
        assert_eq!(
            camera.surface().scroll_requests.len(),
            requests_before,
            "a sub-pixel move must not issue a scroll request"
        );
        // The no-op path still refreshes from the actual offset.
        assert_eq!(camera.position(), Point::new(100.0, 100.0));
        assert!(!camera.is_echo_suppressed());
    }

    #[test]
    fn zoom_change_reestablishes_the_region() {
        let mut camera = Camera::new(TestSurface::new());
        let region = ScrollRegion::new(Point::ORIGIN, Point::new(1000.0, 1000.0));
        camera.enable_scroll_region(region, Point::ORIGIN, 1.0);
        camera.on_scroll_settled();

        camera.set_position(Point::new(50.0, 50.0), 3.0, Transition::Instant);
        assert_eq!(camera.surface().content, Size::new(3000.0, 3000.0));
        assert_eq!(camera.zoom(), 3.0);
        assert_eq!(camera.surface().offset, Vec2::new(150.0, 150.0));
    }

    #[test]
    fn scroll_echo_is_suppressed_during_animated_moves() {
        let mut camera = Camera::new(TestSurface::new());
        let region = ScrollRegion::new(Point::ORIGIN, Point::new(1000.0, 1000.0));
        camera.enable_scroll_region(region, Point::ORIGIN, 1.0);
        assert!(camera.is_echo_suppressed(), "animated enable suppresses echo");

        let transforms_before = camera.surface().transforms.len();
        camera.surface_mut().offset = Vec2::new(10.0, 10.0);
        camera.on_scroll_changed();
        assert_eq!(
            camera.surface().transforms.len(),
            transforms_before,
            "echo must be ignored while suppressed"
        );

        camera.on_scroll_settled();
        camera.on_scroll_changed();
        assert_eq!(camera.position(), Point::new(10.0, 10.0));
        assert_eq!(
            camera.surface().transforms.last().map(|t| t.2),
            Some(Transition::Instant)
        );
    }

    #[test]
    fn instant_moves_do_not_suppress_echo() {
        let mut camera = Camera::new(TestSurface::new());
        let region = ScrollRegion::new(Point::ORIGIN, Point::new(1000.0, 1000.0));
        camera.enable_scroll_region(region, Point::ORIGIN, 1.0);
        camera.on_scroll_settled();

        camera.set_position(Point::new(100.0, 100.0), 1.0, Transition::Instant);
        assert!(!camera.is_echo_suppressed());
    }

    #[test]
    fn disable_region_hides_scroll_area_and_restores_raw_moves() {
        let mut camera = Camera::new(TestSurface::new());
        let region = ScrollRegion::new(Point::ORIGIN, Point::new(1000.0, 1000.0));
        camera.enable_scroll_region(region, Point::ORIGIN, 1.0);
        camera.disable_scroll_region();

        assert!(camera.scroll_region().is_none());
        assert!(!camera.surface().scroll_area_shown);

        let requests_before = camera.surface().scroll_requests.len();
        camera.set_position(Point::new(42.0, 0.0), 1.0, Transition::Instant);
        assert_eq!(camera.surface().scroll_requests.len(), requests_before);
        assert_eq!(camera.position(), Point::new(42.0, 0.0));
    }
}
