//! Minimal UI layout primitives.
//!
//! A `Rect` type plus the few helpers the screens need: insets, anchored placement, weighted
//! vertical splits and a wrapping grid.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    pub fn from_size(w: u32, h: u32) -> Self {
        Self { x: 0, y: 0, w, h }
    }

    pub fn size(&self) -> Size {
        Size {
            w: self.w,
            h: self.h,
        }
    }

    pub fn contains(&self, px: u32, py: u32) -> bool {
        px >= self.x
            && px < self.x.saturating_add(self.w)
            && py >= self.y
            && py < self.y.saturating_add(self.h)
    }

    /// Returns the rectangle inset by `insets`. Oversized insets saturate to an empty rect.
    pub fn inset(&self, insets: Insets) -> Self {
        let w = self
            .w
            .saturating_sub(insets.left.saturating_add(insets.right));
        let h = self
            .h
            .saturating_sub(insets.top.saturating_add(insets.bottom));
        Self {
            x: self.x.saturating_add(insets.left),
            y: self.y.saturating_add(insets.top),
            w,
            h,
        }
    }

    /// Places a child of `size` inside this rect using `anchor`, clamping it to fit.
    pub fn place(&self, size: Size, anchor: Anchor) -> Self {
        let w = size.w.min(self.w);
        let h = size.h.min(self.h);

        let x = match anchor {
            Anchor::TopLeft | Anchor::CenterLeft | Anchor::BottomLeft => self.x,
            Anchor::TopCenter | Anchor::Center | Anchor::BottomCenter => {
                self.x.saturating_add(self.w.saturating_sub(w) / 2)
            }
            Anchor::TopRight | Anchor::CenterRight | Anchor::BottomRight => {
                self.x.saturating_add(self.w.saturating_sub(w))
            }
        };

        let y = match anchor {
            Anchor::TopLeft | Anchor::TopCenter | Anchor::TopRight => self.y,
            Anchor::CenterLeft | Anchor::Center | Anchor::CenterRight => {
                self.y.saturating_add(self.h.saturating_sub(h) / 2)
            }
            Anchor::BottomLeft | Anchor::BottomCenter | Anchor::BottomRight => {
                self.y.saturating_add(self.h.saturating_sub(h))
            }
        };

        Self { x, y, w, h }
    }

    /// Splits the rect into a top and bottom part proportional to the two weights
    /// (flex-style). The bottom part absorbs rounding.
    pub fn split_vertical(&self, top_weight: u32, bottom_weight: u32) -> (Rect, Rect) {
        let total = top_weight.saturating_add(bottom_weight).max(1);
        let top_h = ((self.h as u64 * top_weight as u64) / total as u64) as u32;
        let top = Rect::new(self.x, self.y, self.w, top_h);
        let bottom = Rect::new(
            self.x,
            self.y.saturating_add(top_h),
            self.w,
            self.h.saturating_sub(top_h),
        );
        (top, bottom)
    }
}

/// Lays out `count` cells of `cell` size in rows of `columns`, top to bottom.
///
/// Each row is centered horizontally inside `area`, so a short last row sits in the middle.
/// Cells are not clipped against `area`.
pub fn wrap_grid(area: Rect, cell: Size, count: usize, columns: u32) -> Vec<Rect> {
    let columns = columns.max(1) as usize;
    let mut cells = Vec::with_capacity(count);
    for index in 0..count {
        let row = index / columns;
        let col = index % columns;
        let in_row = (count - row * columns).min(columns) as u32;
        let row_w = cell.w.saturating_mul(in_row);
        let x0 = area.x.saturating_add(area.w.saturating_sub(row_w) / 2);
        cells.push(Rect::new(
            x0.saturating_add(cell.w.saturating_mul(col as u32)),
            area.y.saturating_add(cell.h.saturating_mul(row as u32)),
            cell.w,
            cell.h,
        ));
    }
    cells
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub w: u32,
    pub h: u32,
}

impl Size {
    pub fn new(w: u32, h: u32) -> Self {
        Self { w, h }
    }

    pub fn grow(self, insets: Insets) -> Self {
        Self {
            w: self
                .w
                .saturating_add(insets.left.saturating_add(insets.right)),
            h: self
                .h
                .saturating_add(insets.top.saturating_add(insets.bottom)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Insets {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl Insets {
    pub fn all(v: u32) -> Self {
        Self {
            left: v,
            top: v,
            right: v,
            bottom: v,
        }
    }

    pub fn symmetric(horizontal: u32, vertical: u32) -> Self {
        Self {
            left: horizontal,
            top: vertical,
            right: horizontal,
            bottom: vertical,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    TopLeft,
    TopCenter,
    TopRight,
    CenterLeft,
    Center,
    CenterRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}
