// Copyright 2026 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt::Debug;
use core::time::Duration;

use kurbo::{Point, Rect, Size, Vec2};

use folio_camera::{Camera, ScrollRegion, Surface, Transition};

use crate::solve::{FitMode, RatioLimits, solve};

/// Overlay renderer capability: a mask that shades everything outside the
/// framed rectangle.
pub trait Overlay {
    /// Shows the mask cut-out with the given size, position offset, and
    /// opacity.
    fn set_mask(&mut self, size: Size, offset: Vec2, opacity: f64);

    /// Hides the mask.
    fn clear(&mut self);
}

/// Cancellable one-shot timer capability used for the resize debounce.
///
/// Implementations fire by calling [`FocusPlanner::debounce_fired`] with the
/// handle after the delay has elapsed, unless the task was canceled first.
/// Firing a canceled or superseded handle is harmless; the planner discards
/// it.
pub trait Scheduler {
    /// Identifies a scheduled task.
    type Handle: Copy + PartialEq + Debug;

    /// Schedules a one-shot task after `delay`.
    fn schedule(&mut self, delay: Duration) -> Self::Handle;

    /// Cancels a previously scheduled task.
    fn cancel(&mut self, handle: Self::Handle);
}

/// The rectangle being framed, plus the optional anchor that biases scroll
/// position when entering scroll emulation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FocusTarget {
    /// Logical-space rectangle to frame.
    pub rect: Rect,
    /// Preferred initial camera position inside the scroll region, typically
    /// the page's leading edge.
    pub anchor: Option<Point>,
}

/// Delay between the last viewport resize and the focus recomputation.
pub const RESIZE_DEBOUNCE: Duration = Duration::from_millis(500);

/// Extra surface units the overlay mask extends past the framed rectangle.
const MASK_MARGIN: f64 = 10.0;

/// Opacity of the overlay mask while a focus is active.
const MASK_OPACITY: f64 = 0.8;

/// Plans and applies focus changes: picks the ratio/offset for a target
/// rectangle, decides whether scroll emulation is needed, and keeps the
/// overlay mask in sync.
///
/// The planner owns the [`Camera`]. Viewport resize signals are debounced:
/// each new signal cancels the pending recomputation and reschedules it
/// [`RESIZE_DEBOUNCE`] later, so only the final size of a resize burst is
/// acted on. There is never more than one pending task.
#[derive(Debug)]
pub struct FocusPlanner<S: Surface, O: Overlay, T: Scheduler> {
    camera: Camera<S>,
    overlay: O,
    scheduler: T,
    mode: FitMode,
    limits: RatioLimits,
    scrollbar_thickness: f64,
    focus: Option<FocusTarget>,
    pending: Option<T::Handle>,
}

impl<S: Surface, O: Overlay, T: Scheduler> FocusPlanner<S, O, T> {
    /// Creates a planner around a camera, overlay, and scheduler.
    ///
    /// `scrollbar_thickness` is the surface's native scrollbar reservation
    /// in surface units (zero for overlay scrollbars).
    #[must_use]
    pub fn new(camera: Camera<S>, overlay: O, scheduler: T, scrollbar_thickness: f64) -> Self {
        Self {
            camera,
            overlay,
            scheduler,
            mode: FitMode::default(),
            limits: RatioLimits::default(),
            scrollbar_thickness,
            focus: None,
            pending: None,
        }
    }

    /// Returns a shared reference to the camera.
    #[must_use]
    pub fn camera(&self) -> &Camera<S> {
        &self.camera
    }

    /// Returns a mutable reference to the camera.
    pub fn camera_mut(&mut self) -> &mut Camera<S> {
        &mut self.camera
    }

    /// Current fit/fill policy.
    #[must_use]
    pub fn fit_mode(&self) -> FitMode {
        self.mode
    }

    /// Sets the fit/fill policy and re-frames the current focus, if any.
    pub fn set_fit_mode(&mut self, mode: FitMode) {
        if self.mode == mode {
            return;
        }
        self.mode = mode;
        self.apply_focus();
    }

    /// Sets the ratio bounds applied to every solution.
    pub fn set_ratio_limits(&mut self, limits: RatioLimits) {
        self.limits = limits;
    }

    /// Returns `true` while a focus target is active.
    #[must_use]
    pub fn is_focusing(&self) -> bool {
        self.focus.is_some()
    }

    /// Frames `rect`, optionally biasing scroll-emulation entry toward
    /// `anchor`.
    pub fn set_focus(&mut self, rect: Rect, anchor: Option<Point>) {
        self.focus = Some(FocusTarget { rect, anchor });
        self.apply_focus();
    }

    /// Stops focus tracking: cancels any pending resize recomputation and
    /// hides the overlay mask.
    pub fn clear_focus(&mut self) {
        self.focus = None;
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel(handle);
        }
        self.overlay.clear();
    }

    /// Viewport resize signal. Recomputation is deferred and coalesced;
    /// only the last signal in a burst leads to a re-frame.
    pub fn viewport_resized(&mut self) {
        if self.focus.is_none() {
            return;
        }
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel(handle);
        }
        self.pending = Some(self.scheduler.schedule(RESIZE_DEBOUNCE));
    }

    /// Debounce-timer completion. Stale handles (canceled or superseded)
    /// are discarded.
    pub fn debounce_fired(&mut self, handle: T::Handle) {
        if self.pending != Some(handle) {
            log::trace!("ignoring stale debounce task {handle:?}");
            return;
        }
        self.pending = None;
        self.apply_focus();
    }

    fn apply_focus(&mut self) {
        let Some(target) = self.focus else {
            return;
        };

        let viewport = self.camera.surface().viewport_size();
        let sol = solve(
            target.rect,
            viewport,
            self.mode,
            self.scrollbar_thickness,
            self.limits,
        );

        if sol.axes.is_empty() {
            self.camera.disable_scroll_region();
            self.camera
                .set_position(sol.offset, sol.ratio, Transition::Animated);
        } else {
            // The region spans the offset rectangle extended by the focus
            // rectangle's own size, so the whole overflow is reachable.
            let region = ScrollRegion::new(sol.offset, sol.offset + target.rect.size().to_vec2());
            let initial = target.anchor.unwrap_or_else(|| self.camera.position());
            self.camera.enable_scroll_region(region, initial, sol.ratio);
        }

        self.overlay.set_mask(
            Size::new(sol.scaled.width + MASK_MARGIN, sol.scaled.height + MASK_MARGIN),
            sol.mask_shift - Vec2::new(MASK_MARGIN, MASK_MARGIN),
            MASK_OPACITY,
        );
    }
}

#[cfg(test)]
mod tests {
    use core::time::Duration;

    use kurbo::{Point, Rect, Size, Vec2};

    use folio_camera::{Camera, Surface, Transition};

    use super::{FocusPlanner, Overlay, RESIZE_DEBOUNCE, Scheduler};
    use crate::solve::FitMode;

    struct TestSurface {
        viewport: Size,
        offset: Vec2,
        content: Size,
        transforms: usize,
        scroll_area_shown: bool,
    }

    impl TestSurface {
        fn new(viewport: Size) -> Self {
            Self {
                viewport,
                offset: Vec2::ZERO,
                content: Size::ZERO,
                transforms: 0,
                scroll_area_shown: false,
            }
        }
    }

    impl Surface for TestSurface {
        fn viewport_size(&self) -> Size {
            self.viewport
        }

        fn apply_transform(&mut self, _position: Point, _zoom: f64, _transition: Transition) {
            self.transforms += 1;
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
            self.viewport
        }

        fn scroll_offset(&self) -> Vec2 {
            self.offset
        }

        fn request_scroll(&mut self, offset: Vec2, _transition: Transition) {
            self.offset = offset;
        }
    }

    #[derive(Default)]
    struct TestOverlay {
        mask: Option<(Size, Vec2, f64)>,
        clears: usize,
    }

    impl Overlay for TestOverlay {
        fn set_mask(&mut self, size: Size, offset: Vec2, opacity: f64) {
            self.mask = Some((size, offset, opacity));
        }

        fn clear(&mut self) {
            self.mask = None;
            self.clears += 1;
        }
    }

    #[derive(Default)]
    struct TestScheduler {
        next: u32,
        live: Vec<u32>,
        canceled: Vec<u32>,
    }

    impl Scheduler for TestScheduler {
        type Handle = u32;

        fn schedule(&mut self, delay: Duration) -> u32 {
            assert_eq!(delay, RESIZE_DEBOUNCE, "planner uses the fixed debounce");
            self.next += 1;
            self.live.push(self.next);
            self.next
        }

        fn cancel(&mut self, handle: u32) {
            self.live.retain(|&h| h != handle);
            self.canceled.push(handle);
        }
    }

    fn planner(viewport: Size) -> FocusPlanner<TestSurface, TestOverlay, TestScheduler> {
        FocusPlanner::new(
            Camera::new(TestSurface::new(viewport)),
            TestOverlay::default(),
            TestScheduler::default(),
            16.0,
        )
    }

    #[test]
    fn fitting_a_small_rect_moves_the_camera_directly() {
        let mut p = planner(Size::new(800.0, 600.0));
        p.set_focus(Rect::new(0.0, 0.0, 400.0, 300.0), None);

        assert_eq!(p.camera().zoom(), 2.0);
        assert_eq!(p.camera().position(), Point::ORIGIN);
        assert!(p.camera().scroll_region().is_none());

        let (size, offset, opacity) = p.overlay.mask.expect("mask shown while focusing");
        assert_eq!(size, Size::new(810.0, 610.0));
        assert_eq!(offset, Vec2::new(-10.0, -10.0));
        assert_eq!(opacity, 0.8);
    }

    #[test]
    fn fill_mode_enters_scroll_emulation() {
        let mut p = planner(Size::new(800.0, 600.0));
        p.set_fit_mode(FitMode::Fill);
        p.set_focus(Rect::new(0.0, 0.0, 400.0, 150.0), None);

        let region = p.camera().scroll_region().expect("overflow needs a region");
        assert_eq!(region.size(), Size::new(400.0, 150.0));
        assert!(p.camera().surface().scroll_area_shown);
        // Mask is shifted for the reserved horizontal scrollbar.
        let (_, offset, _) = p.overlay.mask.expect("mask shown");
        assert_eq!(offset.y, -8.0 - 10.0);
    }

    #[test]
    fn anchor_biases_scroll_entry_position() {
        let mut p = planner(Size::new(800.0, 600.0));
        p.set_fit_mode(FitMode::Fill);
        p.set_focus(
            Rect::new(0.0, 0.0, 400.0, 150.0),
            Some(Point::new(0.0, 0.0)),
        );
        // Anchored at the region origin, the scroll offset stays zero.
        assert_eq!(p.camera().surface().offset, Vec2::ZERO);
    }

    #[test]
    fn resize_signals_coalesce_into_one_pending_task() {
        let mut p = planner(Size::new(800.0, 600.0));
        p.set_focus(Rect::new(0.0, 0.0, 400.0, 300.0), None);

        p.viewport_resized();
        p.viewport_resized();
        p.viewport_resized();

        assert_eq!(p.scheduler.live.as_slice(), &[3], "one pending task");
        assert_eq!(p.scheduler.canceled.as_slice(), &[1, 2]);
    }

    #[test]
    fn stale_debounce_handles_are_ignored() {
        let mut p = planner(Size::new(800.0, 600.0));
        p.set_focus(Rect::new(0.0, 0.0, 400.0, 300.0), None);
        p.viewport_resized();
        p.viewport_resized();

        let transforms = p.camera().surface().transforms;
        p.debounce_fired(1);
        assert_eq!(
            p.camera().surface().transforms,
            transforms,
            "superseded handle must not re-frame"
        );

        p.camera_mut().surface_mut().viewport = Size::new(400.0, 300.0);
        p.debounce_fired(2);
        assert_eq!(p.camera().zoom(), 1.0, "re-framed against the new size");
    }

    #[test]
    fn resize_without_focus_schedules_nothing() {
        let mut p = planner(Size::new(800.0, 600.0));
        p.viewport_resized();
        assert!(p.scheduler.live.is_empty());
    }

    #[test]
    fn clear_focus_cancels_pending_and_hides_mask() {
        let mut p = planner(Size::new(800.0, 600.0));
        p.set_focus(Rect::new(0.0, 0.0, 400.0, 300.0), None);
        p.viewport_resized();

        p.clear_focus();
        assert!(p.scheduler.live.is_empty());
        assert!(p.overlay.mask.is_none());
        assert!(!p.is_focusing());

        // A late fire of the canceled handle does nothing.
        let transforms = p.camera().surface().transforms;
        p.debounce_fired(1);
        assert_eq!(p.camera().surface().transforms, transforms);
    }
}
