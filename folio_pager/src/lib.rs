// Copyright 2026 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Folio Pager: windowed residency and navigation over a paged document.
//!
//! A [`Pager`] keeps a bounded window of pages resident around the current
//! one, lays them out as a strip via `folio_layout`, and frames the current
//! page (or a viewpoint within it) through a
//! [`folio_focus::FocusPlanner`]. Residency beyond the cap is reclaimed
//! oldest-first, never touching the current page's protected neighborhood.
//! Page content arrives asynchronously: the host receives a stamped
//! [`LoadTicket`] per load and reports back through
//! [`Pager::complete_load`], which recognizes and drops stale completions.
//!
//! Document structure comes from [`DocumentMeta`], which deserializes from
//! JSON with sensible defaults for missing fields; `null` page sizes mark
//! pages whose extent only becomes known once their content loads.
//!
//! ## Minimal example
//!
//! ```rust
//! use core::time::Duration;
//! use kurbo::{Point, Rect, Size, Vec2};
//!
//! use folio_camera::{Camera, Surface, Transition};
//! use folio_focus::{FocusPlanner, Overlay, Scheduler};
//! use folio_pager::{DocumentMeta, LoadTicket, PageHost, Pager, PagerConfig, StepDirection};
//!
//! // One embedder type can provide all four capabilities.
//! struct Null;
//!
//! impl Surface for Null {
//!     fn viewport_size(&self) -> Size {
//!         Size::new(800.0, 600.0)
//!     }
//!     fn apply_transform(&mut self, _: Point, _: f64, _: Transition) {}
//!     fn set_scroll_content_size(&mut self, _: Size) {}
//!     fn show_scroll_area(&mut self) {}
//!     fn hide_scroll_area(&mut self) {}
//!     fn scroll_viewport_size(&self) -> Size {
//!         self.viewport_size()
//!     }
//!     fn scroll_offset(&self) -> Vec2 {
//!         Vec2::ZERO
//!     }
//!     fn request_scroll(&mut self, _: Vec2, _: Transition) {}
//! }
//!
//! impl Overlay for Null {
//!     fn set_mask(&mut self, _: Size, _: Vec2, _: f64) {}
//!     fn clear(&mut self) {}
//! }
//!
//! impl Scheduler for Null {
//!     type Handle = u32;
//!     fn schedule(&mut self, _: Duration) -> u32 {
//!         0
//!     }
//!     fn cancel(&mut self, _: u32) {}
//! }
//!
//! impl PageHost for Null {
//!     type Handle = usize;
//!     fn begin_load(&mut self, page: usize, _: Option<Rect>, _: LoadTicket) -> usize {
//!         page
//!     }
//!     fn reposition(&mut self, _: &mut usize, _: Rect) {}
//!     fn set_visible(&mut self, _: &mut usize, _: bool) {}
//!     fn release(&mut self, _: usize, _: usize) {}
//! }
//!
//! let meta: DocumentMeta =
//!     serde_json::from_str(r#"{"pages": [[600.0, 900.0], [600.0, 900.0], [600.0, 900.0]]}"#)?;
//! let planner = FocusPlanner::new(Camera::new(Null), Null, Null, 16.0);
//! let mut pager = Pager::new(&meta, planner, Null, PagerConfig::default());
//!
//! pager.set_page(0, None)?;
//! pager.step(StepDirection::Forward)?;
//! assert_eq!(pager.current_page(), Some(1));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod host;
mod meta;
mod pager;

pub use host::{LoadError, LoadStatus, LoadTicket, PageHost};
pub use meta::{DocumentMeta, Viewpoint};
pub use pager::{Pager, PagerConfig, PagerError, StepDirection};
