// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overlay positioning.

use kurbo::{Point, Rect, Size};

use crate::placement::{Align, Placement, Side};

/// The resolved position of an overlay.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct OverlayPosition {
    /// The named placement actually used, after automatic selection and flipping.
    pub placement: Placement,
    /// Top-left corner of the overlay, in the same space as the trigger rectangle.
    pub origin: Point,
    /// Offset of the trigger's center along the overlay's cross axis, measured from the
    /// overlay's leading edge and clamped to the overlay's extent.
    ///
    /// Hosts that draw an arrow pointing at the trigger place it here.
    pub arrow_offset: f64,
}

impl OverlayPosition {
    /// The rectangle the overlay occupies.
    pub fn rect(&self, size: Size) -> Rect {
        Rect::from_origin_size(self.origin, size)
    }
}

/// Compute where an overlay of `size` goes relative to `trigger`.
///
/// Automatic placements pick the side with the most room inside `container`; ties prefer
/// bottom, then top, then right, then left.
///
/// With `prevent_overflow`, a named side that cannot fit the overlay flips to the opposite
/// side when that side has more room, and the cross axis is clamped to keep the overlay
/// inside `container`. Without it the requested side and alignment are used verbatim.
pub fn compute_position(
    trigger: Rect,
    size: Size,
    container: Rect,
    placement: Placement,
    prevent_overflow: bool,
) -> OverlayPosition {
    let align = placement.align();
    let mut side = match placement.side() {
        Some(side) => side,
        None => pick_auto_side(placement, trigger, container),
    };

    if prevent_overflow {
        let needed = main_extent(side, size);
        let room = space(side, trigger, container);
        let flipped_room = space(side.opposite(), trigger, container);
        if room < needed && flipped_room > room {
            log::trace!("overlay flipped from {side:?} for lack of room");
            side = side.opposite();
        }
    }

    let mut origin = place(side, align, trigger, size);

    if prevent_overflow {
        if side.is_vertical() {
            origin.x = clamp_span(origin.x, size.width, container.x0, container.x1);
        } else {
            origin.y = clamp_span(origin.y, size.height, container.y0, container.y1);
        }
    }

    let center = trigger.center();
    let arrow_offset = if side.is_vertical() {
        (center.x - origin.x).clamp(0.0, size.width.max(0.0))
    } else {
        (center.y - origin.y).clamp(0.0, size.height.max(0.0))
    };

    OverlayPosition {
        placement: Placement::from_parts(side, align),
        origin,
        arrow_offset,
    }
}

fn pick_auto_side(placement: Placement, trigger: Rect, container: Rect) -> Side {
    let candidates: &[Side] = match placement {
        Placement::AutoVertical | Placement::AutoVerticalStart | Placement::AutoVerticalEnd => {
            &[Side::Bottom, Side::Top]
        }
        Placement::AutoHorizontal
        | Placement::AutoHorizontalStart
        | Placement::AutoHorizontalEnd => &[Side::Right, Side::Left],
        _ => &[Side::Bottom, Side::Top, Side::Right, Side::Left],
    };
    let mut best = candidates[0];
    let mut best_room = space(best, trigger, container);
    for &side in &candidates[1..] {
        let room = space(side, trigger, container);
        if room > best_room {
            best = side;
            best_room = room;
        }
    }
    best
}

fn space(side: Side, trigger: Rect, container: Rect) -> f64 {
    match side {
        Side::Top => trigger.y0 - container.y0,
        Side::Bottom => container.y1 - trigger.y1,
        Side::Left => trigger.x0 - container.x0,
        Side::Right => container.x1 - trigger.x1,
    }
}

fn main_extent(side: Side, size: Size) -> f64 {
    if side.is_vertical() { size.height } else { size.width }
}

fn place(side: Side, align: Align, trigger: Rect, size: Size) -> Point {
    let center = trigger.center();
    match side {
        Side::Top | Side::Bottom => {
            let y = if side == Side::Top {
                trigger.y0 - size.height
            } else {
                trigger.y1
            };
            let x = match align {
                Align::Start => trigger.x0,
                Align::End => trigger.x1 - size.width,
                Align::Center => center.x - size.width / 2.0,
            };
            Point::new(x, y)
        }
        Side::Left | Side::Right => {
            let x = if side == Side::Left {
                trigger.x0 - size.width
            } else {
                trigger.x1
            };
            let y = match align {
                Align::Start => trigger.y0,
                Align::End => trigger.y1 - size.height,
                Align::Center => center.y - size.height / 2.0,
            };
            Point::new(x, y)
        }
    }
}

/// Clamp a span `[start, start + len]` into `[lo, hi]`, preferring `lo` when it cannot fit.
fn clamp_span(start: f64, len: f64, lo: f64, hi: f64) -> f64 {
    let start = if start + len > hi { hi - len } else { start };
    start.max(lo)
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEW: Rect = Rect::new(0.0, 0.0, 800.0, 600.0);

    #[test]
    fn named_sides_and_alignments() {
        let t = Rect::new(100.0, 100.0, 200.0, 130.0);
        let s = Size::new(60.0, 40.0);

        let p = compute_position(t, s, VIEW, Placement::BottomEnd, false);
        assert_eq!(p.origin, Point::new(140.0, 130.0));

        let p = compute_position(t, s, VIEW, Placement::Top, false);
        assert_eq!(p.origin, Point::new(120.0, 60.0));
        assert_eq!(p.arrow_offset, 30.0);

        let p = compute_position(t, s, VIEW, Placement::LeftStart, false);
        assert_eq!(p.origin, Point::new(40.0, 100.0));

        let p = compute_position(t, s, VIEW, Placement::RightEnd, false);
        assert_eq!(p.origin, Point::new(200.0, 90.0));
    }

    #[test]
    fn auto_picks_roomiest_side() {
        // Trigger near the bottom of the view: more room above.
        let t = Rect::new(100.0, 550.0, 200.0, 580.0);
        let p = compute_position(
            t,
            Size::new(60.0, 40.0),
            VIEW,
            Placement::AutoVerticalStart,
            false,
        );
        assert_eq!(p.placement, Placement::TopStart);
        assert_eq!(p.origin, Point::new(100.0, 510.0));

        // Trigger hugging the right edge: more room on the left.
        let t = Rect::new(700.0, 100.0, 780.0, 130.0);
        let p = compute_position(
            t,
            Size::new(60.0, 40.0),
            VIEW,
            Placement::AutoHorizontal,
            false,
        );
        assert_eq!(p.placement, Placement::Left);
    }

    #[test]
    fn overflow_flips_and_clamps() {
        let t = Rect::new(760.0, 570.0, 790.0, 590.0);
        let s = Size::new(100.0, 50.0);

        let p = compute_position(t, s, VIEW, Placement::BottomStart, true);
        assert_eq!(p.placement, Placement::TopStart);
        assert_eq!(p.origin, Point::new(700.0, 520.0));
        assert_eq!(p.arrow_offset, 75.0);

        let raw = compute_position(t, s, VIEW, Placement::BottomStart, false);
        assert_eq!(raw.placement, Placement::BottomStart);
        assert_eq!(raw.origin, Point::new(760.0, 590.0));
    }

    #[test]
    fn no_flip_when_opposite_side_is_tighter() {
        let view = Rect::new(0.0, 0.0, 200.0, 100.0);
        let t = Rect::new(50.0, 30.0, 100.0, 50.0);
        let p = compute_position(t, Size::new(40.0, 60.0), view, Placement::Bottom, true);
        assert_eq!(p.placement, Placement::Bottom);
    }
}
