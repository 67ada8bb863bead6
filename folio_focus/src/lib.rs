// Copyright 2026 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Folio Focus: frame a logical rectangle inside a bounded viewport.
//!
//! Given a focus rectangle and a fit/fill policy, this crate computes the
//! uniform scale and offset the camera should adopt, accounting for the
//! awkward numeric feedback at the heart of scroll emulation: reserving a
//! scrollbar shrinks the viewport, which changes the ratio that decided a
//! scrollbar was needed in the first place. [`solve`] runs that fixed-point
//! loop (bounded at one extra pass per axis) as a pure function;
//! [`FocusPlanner`] drives a [`folio_camera::Camera`], an [`Overlay`] mask,
//! and a debounced resize recomputation around it.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Rect, Size};
//! use folio_focus::{FitMode, RatioLimits, solve};
//!
//! // A rect half the viewport size fits at exactly 2×, no scrollbars.
//! let sol = solve(
//!     Rect::new(0.0, 0.0, 400.0, 300.0),
//!     Size::new(800.0, 600.0),
//!     FitMode::Fit,
//!     16.0,
//!     RatioLimits::default(),
//! );
//! assert_eq!(sol.ratio, 2.0);
//! assert!(sol.axes.is_empty());
//! ```
//!
//! The planner half needs [`Overlay`] and [`Scheduler`] capability
//! implementations from the embedder; see those traits for the contract.

mod planner;
mod solve;

pub use planner::{FocusPlanner, FocusTarget, Overlay, RESIZE_DEBOUNCE, Scheduler};
pub use solve::{FitMode, FocusSolution, RatioLimits, ScrollAxes, solve};
