// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Delve-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Delve and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// An integer tile coordinate. `y` grows downwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridPoint {
    x: i32,
    y: i32,
}

impl GridPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// True when `other` is exactly one horizontal or vertical step away.
    pub fn is_cardinal_neighbor(self, other: GridPoint) -> bool {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y) == 1
    }
}

/// An axis-aligned room footprint: top-left corner plus size, in tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Center cell with integer truncation.
    pub fn center(&self) -> GridPoint {
        GridPoint::new(self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Exact center, used when comparing room separations.
    pub fn center_f64(&self) -> (f64, f64) {
        (
            f64::from(self.x) + f64::from(self.width) / 2.0,
            f64::from(self.y) + f64::from(self.height) / 2.0,
        )
    }

    pub fn contains(&self, p: GridPoint) -> bool {
        p.x() >= self.x && p.x() < self.right() && p.y() >= self.y && p.y() < self.bottom()
    }

    /// Horizontal clearance to `other`; negative when the x-extents overlap.
    pub fn gap_x(&self, other: &Rect) -> i32 {
        (other.x - self.right()).max(self.x - other.right())
    }

    /// Vertical clearance to `other`; negative when the y-extents overlap.
    pub fn gap_y(&self, other: &Rect) -> i32 {
        (other.y - self.bottom()).max(self.y - other.bottom())
    }

    /// One clear axis is enough; both axes do not need to be clear.
    pub fn is_separated_from(&self, other: &Rect, min_gap: i32) -> bool {
        self.gap_x(other) >= min_gap || self.gap_y(other) >= min_gap
    }

    pub fn is_perimeter(&self, p: GridPoint) -> bool {
        self.contains(p)
            && (p.x() == self.x
                || p.x() == self.right() - 1
                || p.y() == self.y
                || p.y() == self.bottom() - 1)
    }

    pub fn cells(&self) -> impl Iterator<Item = GridPoint> + '_ {
        (self.y..self.bottom())
            .flat_map(move |y| (self.x..self.right()).map(move |x| GridPoint::new(x, y)))
    }
}
