// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Delve-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Delve and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::GridPoint;

/// Cardinal-only line from `start` to `end`, both inclusive.
///
/// Each step advances whichever axis lags further behind the ideal line. The
/// error term compares `(2·ix + 1)·dy` against `(2·iy + 1)·dx`; on a tie the axis
/// with the larger total delta moves first. The result has `dx + dy + 1` cells
/// and never steps backwards on either axis.
pub fn cardinal_line(start: GridPoint, end: GridPoint) -> Vec<GridPoint> {
    let dx = i64::from(start.x().abs_diff(end.x()));
    let dy = i64::from(start.y().abs_diff(end.y()));
    let sx = if end.x() >= start.x() { 1 } else { -1 };
    let sy = if end.y() >= start.y() { 1 } else { -1 };

    let mut cells = Vec::with_capacity((dx + dy + 1) as usize);
    let mut at = start;
    cells.push(at);

    let (mut ix, mut iy) = (0i64, 0i64);
    while ix < dx || iy < dy {
        let x_error = (2 * ix + 1) * dy;
        let y_error = (2 * iy + 1) * dx;
        let step_x = match x_error.cmp(&y_error) {
            std::cmp::Ordering::Less => true,
            std::cmp::Ordering::Greater => false,
            std::cmp::Ordering::Equal => dx >= dy,
        };

        if step_x {
            at = at.offset(sx, 0);
            ix += 1;
        } else {
            at = at.offset(0, sy);
            iy += 1;
        }
        cells.push(at);
    }

    debug_assert_eq!(at, end);
    cells
}

/// Horizontal run to the middle column, vertical run to the target row, then
/// horizontal run to the target column. Consecutive duplicates are dropped.
pub fn l_shaped(start: GridPoint, end: GridPoint) -> Vec<GridPoint> {
    let mid_x = (start.x() + end.x()).div_euclid(2);
    let bend_a = GridPoint::new(mid_x, start.y());
    let bend_b = GridPoint::new(mid_x, end.y());

    let mut cells = vec![start];
    for (from, to) in [(start, bend_a), (bend_a, bend_b), (bend_b, end)] {
        // Each leg is axis-aligned, so the cardinal line is the plain run.
        for cell in cardinal_line(from, to).into_iter().skip(1) {
            if cells.last() != Some(&cell) {
                cells.push(cell);
            }
        }
    }
    cells
}
