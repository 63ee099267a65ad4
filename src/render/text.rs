// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Delve-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Delve and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::{Tile, TileGrid};

/// Grid text with trailing blanks removed from each row and trailing empty rows dropped.
pub fn to_trimmed_string(grid: &TileGrid) -> String {
    let mut lines = Vec::<String>::with_capacity(grid.height());
    for y in 0..grid.height() {
        let line = grid
            .row(y)
            .unwrap_or_default()
            .iter()
            .map(|tile| tile.as_char())
            .collect::<String>();
        lines.push(line.trim_end_matches(' ').to_owned());
    }

    while matches!(lines.last(), Some(line) if line.is_empty()) {
        lines.pop();
    }

    lines.join("\n")
}

/// One-line legend for every non-empty tile, e.g. `. = room floor, , = corridor, ...`.
pub fn legend() -> String {
    Tile::ALL
        .into_iter()
        .filter(|tile| *tile != Tile::Empty)
        .map(|tile| format!("{} = {}", tile.as_char(), tile.label()))
        .collect::<Vec<_>>()
        .join(", ")
}
