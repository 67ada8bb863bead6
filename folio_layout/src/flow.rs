// Copyright 2026 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Page placement: pure offset computation and the incremental [`PageFlow`].

use alloc::vec::Vec;

use kurbo::{Point, Rect, Size};

use crate::direction::FlowDirection;

/// Optional forcing of page display sizes.
///
/// Forcing a single axis preserves the natural aspect ratio; forcing both
/// axes distorts freely.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum SizeConstraint {
    /// Use the natural page size.
    #[default]
    None,
    /// Force the width; height follows the natural aspect ratio.
    Width(f64),
    /// Force the height; width follows the natural aspect ratio.
    Height(f64),
    /// Force both axes.
    Exact(Size),
}

/// Applies a [`SizeConstraint`] to a natural page size.
///
/// Degenerate natural sizes (zero extent on the scaled axis) keep their
/// unscaled cross extent rather than producing non-finite values.
#[must_use]
pub fn constrain_size(natural: Size, constraint: SizeConstraint) -> Size {
    match constraint {
        SizeConstraint::None => natural,
        SizeConstraint::Exact(size) => size,
        SizeConstraint::Width(width) => {
            if natural.width <= 0.0 {
                Size::new(width, natural.height)
            } else {
                Size::new(width, natural.height * (width / natural.width))
            }
        }
        SizeConstraint::Height(height) => {
            if natural.height <= 0.0 {
                Size::new(natural.width, height)
            } else {
                Size::new(natural.width * (height / natural.height), height)
            }
        }
    }
}

/// Anchor coordinate on one axis, derived from the previous rectangle.
///
/// A zero direction component centers on the previous rectangle; otherwise
/// the anchor is the extreme edge in the direction of travel, pushed out by
/// the padding.
fn axis_anchor(d: f64, min: f64, max: f64, padding: f64) -> f64 {
    if d == 0.0 {
        (min + max) / 2.0
    } else if d < 0.0 {
        min - padding
    } else {
        max + padding
    }
}

/// Places a page of `size` after `prev` along `direction`.
///
/// The rectangle's own leading/trailing edge sits at the anchor: the
/// per-axis shift is `((d − 1) / 2) × size`, so `d = +1` starts the
/// rectangle at the anchor, `d = −1` ends it there, and `d = 0` centers it.
fn place_after(prev: Rect, size: Size, direction: FlowDirection, padding: f64) -> Rect {
    let anchor_x = axis_anchor(direction.dx(), prev.x0, prev.x1, padding);
    let anchor_y = axis_anchor(direction.dy(), prev.y0, prev.y1, padding);
    let x = anchor_x + (direction.dx() - 1.0) / 2.0 * size.width;
    let y = anchor_y + (direction.dy() - 1.0) / 2.0 * size.height;
    Rect::new(x, y, x + size.width, y + size.height)
}

/// Computes absolute page rectangles for a fully known size list.
///
/// Page 0 is placed at the origin with its own size; every later page hangs
/// off its predecessor per [`place_after`]'s anchor rule.
#[must_use]
pub fn compute_offsets(sizes: &[Size], direction: FlowDirection, padding: f64) -> Vec<Rect> {
    let mut rects = Vec::with_capacity(sizes.len());
    for (i, &size) in sizes.iter().enumerate() {
        let rect = if i == 0 {
            Rect::from_origin_size(Point::ORIGIN, size)
        } else {
            place_after(rects[i - 1], size, direction, padding)
        };
        rects.push(rect);
    }
    rects
}

/// Incremental page-strip layout with streaming size gaps.
///
/// `PageFlow` owns per-page sizes (possibly unknown) and the derived page
/// rectangles. Rectangles are defined exactly for the longest prefix of
/// pages whose sizes are all known; a gap leaves every later rectangle
/// undefined until the missing size arrives.
///
/// Setting a size recomputes rectangles from that index onward only.
/// Rectangles before the changed index never move.
#[derive(Clone, Debug)]
pub struct PageFlow {
    direction: FlowDirection,
    padding: f64,
    sizes: Vec<Option<Size>>,
    rects: Vec<Option<Rect>>,
}

impl PageFlow {
    /// Creates an empty flow.
    #[must_use]
    pub fn new(direction: FlowDirection, padding: f64) -> Self {
        Self {
            direction,
            padding,
            sizes: Vec::new(),
            rects: Vec::new(),
        }
    }

    /// Creates a flow from an initial size list, with `None` marking
    /// streaming gaps.
    #[must_use]
    pub fn from_sizes(sizes: Vec<Option<Size>>, direction: FlowDirection, padding: f64) -> Self {
        let mut flow = Self {
            direction,
            padding,
            rects: alloc::vec![None; sizes.len()],
            sizes,
        };
        flow.relayout_from(0);
        flow
    }

    /// Returns the flow direction.
    #[must_use]
    pub fn direction(&self) -> FlowDirection {
        self.direction
    }

    /// Returns the inter-page padding.
    #[must_use]
    pub fn padding(&self) -> f64 {
        self.padding
    }

    /// Returns the number of pages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    /// Returns `true` when the flow holds no pages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    /// Resizes the page list; new pages start with unknown sizes.
    pub fn set_len(&mut self, len: usize) {
        self.sizes.resize(len, None);
        self.rects.resize(len, None);
    }

    /// Returns page `index`'s size, if known.
    #[must_use]
    pub fn size(&self, index: usize) -> Option<Size> {
        self.sizes.get(index).copied().flatten()
    }

    /// Records page `index`'s size and relayouts from that page onward.
    ///
    /// The list grows automatically if `index` is past the end. Returns
    /// `true` if the size actually changed (and rectangles may have moved).
    pub fn set_size(&mut self, index: usize, size: Size) -> bool {
        if index >= self.sizes.len() {
            self.set_len(index + 1);
        }
        if self.sizes[index] == Some(size) {
            return false;
        }
        self.sizes[index] = Some(size);
        self.relayout_from(index);
        true
    }

    /// Returns page `index`'s rectangle, if already defined.
    ///
    /// `None` means the page's own size, or some earlier page's size, is
    /// still unknown.
    #[must_use]
    pub fn try_rect(&self, index: usize) -> Option<Rect> {
        self.rects.get(index).copied().flatten()
    }

    /// Returns page `index`'s rectangle.
    ///
    /// # Panics
    ///
    /// Panics when the rectangle is still undefined. Querying geometry ahead
    /// of the known-size prefix is a programming error; use
    /// [`PageFlow::try_rect`] when a gap is a legitimate possibility.
    #[must_use]
    pub fn rect(&self, index: usize) -> Rect {
        match self.try_rect(index) {
            Some(rect) => rect,
            None => panic!("page {index} has no computed rectangle yet"),
        }
    }

    /// Number of leading pages whose rectangles are defined.
    #[must_use]
    pub fn defined_len(&self) -> usize {
        self.rects.iter().take_while(|r| r.is_some()).count()
    }

    fn relayout_from(&mut self, start: usize) {
        let len = self.sizes.len();
        let mut i = start;
        if i == 0 && len > 0 {
            self.rects[0] = self.sizes[0].map(|s| Rect::from_origin_size(Point::ORIGIN, s));
            i = 1;
        }
        for j in i..len {
            self.rects[j] = match (self.rects[j - 1], self.sizes[j]) {
                (Some(prev), Some(size)) => {
                    Some(place_after(prev, size, self.direction, self.padding))
                }
                _ => None,
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use kurbo::{Rect, Size};

    use super::{PageFlow, SizeConstraint, compute_offsets, constrain_size};
    use crate::direction::FlowDirection;

    #[test]
    fn five_equal_pages_rightward_tile_along_x() {
        let sizes = [Size::new(100.0, 100.0); 5];
        let rects = compute_offsets(&sizes, FlowDirection::Right, 0.0);
        for (i, rect) in rects.iter().enumerate() {
            let x = 100.0 * i as f64;
            assert_eq!(*rect, Rect::new(x, 0.0, x + 100.0, 100.0));
        }
    }

    #[test]
    fn leftward_pages_grow_toward_negative_x() {
        let sizes = [Size::new(100.0, 100.0); 3];
        let rects = compute_offsets(&sizes, FlowDirection::Left, 0.0);
        assert_eq!(rects[0], Rect::new(0.0, 0.0, 100.0, 100.0));
        assert_eq!(rects[1], Rect::new(-100.0, 0.0, 0.0, 100.0));
        assert_eq!(rects[2], Rect::new(-200.0, 0.0, -100.0, 100.0));
    }

    #[test]
    fn downward_and_upward_stack_along_y() {
        let sizes = [Size::new(100.0, 50.0); 2];
        let down = compute_offsets(&sizes, FlowDirection::Down, 0.0);
        assert_eq!(down[1], Rect::new(0.0, 50.0, 100.0, 100.0));
        let up = compute_offsets(&sizes, FlowDirection::Up, 0.0);
        assert_eq!(up[1], Rect::new(0.0, -50.0, 100.0, 0.0));
    }

    #[test]
    fn cross_axis_centers_are_colinear_for_mixed_heights() {
        let sizes = [
            Size::new(100.0, 100.0),
            Size::new(80.0, 40.0),
            Size::new(120.0, 260.0),
        ];
        let rects = compute_offsets(&sizes, FlowDirection::Right, 0.0);
        let center_y = rects[0].center().y;
        for rect in &rects {
            assert!(
                (rect.center().y - center_y).abs() < 1e-9,
                "cross-axis centers must be colinear"
            );
        }
        // And the same on the X axis when flowing vertically.
        let rects = compute_offsets(&sizes, FlowDirection::Down, 0.0);
        let center_x = rects[0].center().x;
        for rect in &rects {
            assert!(
                (rect.center().x - center_x).abs() < 1e-9,
                "cross-axis centers must be colinear"
            );
        }
    }

    #[test]
    fn padding_separates_consecutive_pages() {
        let sizes = [Size::new(100.0, 100.0); 2];
        let rects = compute_offsets(&sizes, FlowDirection::Right, 8.0);
        assert_eq!(rects[1].x0 - rects[0].x1, 8.0);
    }

    #[test]
    fn incremental_flow_matches_pure_computation() {
        let sizes = [
            Size::new(90.0, 120.0),
            Size::new(100.0, 100.0),
            Size::new(60.0, 200.0),
            Size::new(150.0, 80.0),
        ];
        let expected = compute_offsets(&sizes, FlowDirection::Left, 4.0);

        let mut flow = PageFlow::new(FlowDirection::Left, 4.0);
        for (i, &size) in sizes.iter().enumerate() {
            flow.set_size(i, size);
        }
        let got: Vec<_> = (0..sizes.len()).map(|i| flow.rect(i)).collect();
        assert_eq!(got, expected);
    }

    #[test]
    fn earlier_size_change_shifts_later_pages_only() {
        let mut flow = PageFlow::from_sizes(
            vec![
                Some(Size::new(100.0, 100.0)),
                Some(Size::new(100.0, 100.0)),
                Some(Size::new(100.0, 100.0)),
            ],
            FlowDirection::Right,
            0.0,
        );
        let first = flow.rect(0);
        flow.set_size(1, Size::new(300.0, 100.0));
        assert_eq!(flow.rect(0), first, "pages before the change never move");
        assert_eq!(flow.rect(2).x0, 400.0);
    }

    #[test]
    fn streaming_gap_leaves_later_rects_undefined() {
        let mut flow = PageFlow::from_sizes(
            vec![
                Some(Size::new(100.0, 100.0)),
                None,
                Some(Size::new(100.0, 100.0)),
            ],
            FlowDirection::Right,
            0.0,
        );
        assert_eq!(flow.defined_len(), 1);
        assert!(flow.try_rect(1).is_none());
        assert!(flow.try_rect(2).is_none());

        flow.set_size(1, Size::new(100.0, 100.0));
        assert_eq!(flow.defined_len(), 3);
        assert_eq!(flow.rect(2).x0, 200.0);
    }

    #[test]
    #[should_panic(expected = "no computed rectangle")]
    fn querying_an_undefined_rect_panics() {
        let flow = PageFlow::from_sizes(vec![None], FlowDirection::Right, 0.0);
        let _ = flow.rect(0);
    }

    #[test]
    fn constrain_size_keeps_aspect_ratio_on_single_axis() {
        let natural = Size::new(200.0, 100.0);
        assert_eq!(
            constrain_size(natural, SizeConstraint::Width(100.0)),
            Size::new(100.0, 50.0)
        );
        assert_eq!(
            constrain_size(natural, SizeConstraint::Height(200.0)),
            Size::new(400.0, 200.0)
        );
        assert_eq!(constrain_size(natural, SizeConstraint::None), natural);
        assert_eq!(
            constrain_size(natural, SizeConstraint::Exact(Size::new(10.0, 10.0))),
            Size::new(10.0, 10.0)
        );
    }
}
