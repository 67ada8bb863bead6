// Copyright 2026 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Folio Camera: logical pan/zoom over an abstract rendering surface.
//!
//! This crate provides the [`Camera`]: the single owner of the logical
//! position and zoom a paged-document viewer displays. It is headless; all
//! rendering goes through the [`Surface`] capability, which the embedder
//! implements on top of whatever windowing or DOM layer it uses.
//!
//! The camera has two modes:
//!
//! - **Raw transform**: [`Camera::set_position`] hands the surface a uniform
//!   scale-plus-translate transform, instant or animated.
//! - **Scroll emulation**: after [`Camera::enable_scroll_region`], a
//!   requested position is translated into an offset inside a native
//!   scrollable sub-area instead, so the platform's own scrollbars represent
//!   the pan range. The logical position is always re-derived from the
//!   *clamped* offset actually displayed.
//!
//! Scroll notifications from the surface are fed back through
//! [`Camera::on_scroll_changed`] / [`Camera::on_scroll_settled`]; the camera
//! suppresses the echo of its own animated scrolls.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size, Vec2};
//! use folio_camera::{Camera, ScrollRegion, Surface, Transition};
//!
//! /// Toy surface: stores the last transform and applies scrolls at once.
//! #[derive(Default)]
//! struct Toy {
//!     transform: Option<(Point, f64)>,
//!     offset: Vec2,
//! }
//!
//! impl Surface for Toy {
//!     fn viewport_size(&self) -> Size { Size::new(800.0, 600.0) }
//!     fn apply_transform(&mut self, position: Point, zoom: f64, _: Transition) {
//!         self.transform = Some((position, zoom));
//!     }
//!     fn set_scroll_content_size(&mut self, _: Size) {}
//!     fn show_scroll_area(&mut self) {}
//!     fn hide_scroll_area(&mut self) {}
//!     fn scroll_viewport_size(&self) -> Size { Size::new(800.0, 600.0) }
//!     fn scroll_offset(&self) -> Vec2 { self.offset }
//!     fn request_scroll(&mut self, offset: Vec2, _: Transition) { self.offset = offset; }
//! }
//!
//! let mut camera = Camera::new(Toy::default());
//! camera.set_position(Point::new(40.0, 0.0), 2.0, Transition::Instant);
//! assert_eq!(camera.zoom(), 2.0);
//!
//! // Emulate scrollbars over a 1000×1000 logical region.
//! let region = ScrollRegion::new(Point::ORIGIN, Point::new(1000.0, 1000.0));
//! camera.enable_scroll_region(region, Point::new(100.0, 0.0), 1.0);
//! assert_eq!(camera.surface().offset, Vec2::new(100.0, 0.0));
//! ```

mod camera;
mod surface;

pub use camera::{Camera, ScrollRegion};
pub use surface::{Surface, Transition};
