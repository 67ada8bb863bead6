// Copyright 2026 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Folio Layout: page-strip placement for paged-document viewers.
//!
//! This crate lays out a long, directional sequence of pages (a comic, a
//! scanned book, a slide deck) on an unbounded logical plane. It is headless
//! and renderer-agnostic: it knows page sizes and produces page rectangles,
//! nothing else.
//!
//! The core concepts are:
//!
//! - [`FlowDirection`]: the axis along which pages are concatenated. The
//!   perpendicular axis is always centered, so a row of mixed-height pages
//!   lines up on its cross-axis centerline.
//! - [`compute_offsets`]: a pure function from page sizes, direction, and
//!   padding to absolute page rectangles.
//! - [`PageFlow`]: an incremental wrapper that tolerates *streaming* size
//!   gaps (pages whose sizes become known only after their resource loads)
//!   and relayouts only from the first changed page onward.
//! - [`SizeConstraint`]: optional display-size forcing with aspect-ratio
//!   preservation.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Size;
//! use folio_layout::{FlowDirection, compute_offsets};
//!
//! let sizes = [Size::new(100.0, 100.0); 3];
//! let rects = compute_offsets(&sizes, FlowDirection::Right, 0.0);
//!
//! assert_eq!(rects[0].x0, 0.0);
//! assert_eq!(rects[1].x0, 100.0);
//! assert_eq!(rects[2].x0, 200.0);
//! // Cross-axis centers are colinear.
//! assert_eq!(rects[0].center().y, rects[2].center().y);
//! ```
//!
//! For streaming documents, use [`PageFlow`]: rectangles are defined exactly
//! for the longest prefix of pages whose sizes are all known, and
//! [`PageFlow::set_size`] recomputes only from the changed index onward.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod direction;
mod flow;

pub use direction::FlowDirection;
pub use flow::{PageFlow, SizeConstraint, compute_offsets, constrain_size};
