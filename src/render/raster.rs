// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Delve-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Delve and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;

use super::{GridError, RenderMode, RenderOptions, Tile, TileGrid};
use crate::model::{CorridorPath, GridPoint, PlacedRoom, RoomId};

/// Grid size for a set of rooms: furthest room edge plus `padding`, per axis.
pub fn grid_extent(rooms: &BTreeMap<RoomId, PlacedRoom>, padding: usize) -> (usize, usize) {
    let max_right = rooms.values().map(|r| r.rect().right()).max().unwrap_or(0);
    let max_bottom = rooms.values().map(|r| r.rect().bottom()).max().unwrap_or(0);
    (
        usize::try_from(max_right).unwrap_or(0) + padding,
        usize::try_from(max_bottom).unwrap_or(0) + padding,
    )
}

fn to_cell(point: GridPoint) -> Option<(usize, usize)> {
    let x = usize::try_from(point.x()).ok()?;
    let y = usize::try_from(point.y()).ok()?;
    Some((x, y))
}

/// Paints rooms, role markers, and corridors, in that order.
///
/// Corridors only claim empty tiles; a corridor crossing a wall turns it into a
/// door. Floor and markers are never overwritten. Corridor cells off the grid
/// are skipped.
pub fn rasterize(
    rooms: &BTreeMap<RoomId, PlacedRoom>,
    corridors: &[CorridorPath],
    options: &RenderOptions,
) -> Result<TileGrid, GridError> {
    let (width, height) = grid_extent(rooms, options.padding);
    let mut grid = TileGrid::new(width, height)?;

    for room in rooms.values() {
        let rect = room.rect();
        for cell in rect.cells() {
            let Some((x, y)) = to_cell(cell) else {
                continue;
            };
            let tile = match options.mode {
                RenderMode::Walled if rect.is_perimeter(cell) => Tile::Wall,
                RenderMode::Walled | RenderMode::Open => Tile::Floor,
            };
            grid.set(x, y, tile)?;
        }

        let marker = if room.room().is_spawn() {
            Some(Tile::Spawn)
        } else if room.room().is_stairs() {
            Some(Tile::Stairs)
        } else {
            None
        };
        if let (Some(marker), Some((x, y))) = (marker, to_cell(room.center())) {
            grid.set(x, y, marker)?;
        }
    }

    for corridor in corridors {
        for cell in corridor.cells() {
            let Some((x, y)) = to_cell(*cell) else {
                continue;
            };
            match grid.get(x, y) {
                Ok(Tile::Empty) => grid.set(x, y, Tile::Corridor)?,
                Ok(Tile::Wall) => grid.set(x, y, Tile::Door)?,
                Ok(_) | Err(GridError::OutOfBounds { .. }) => {}
                Err(err) => return Err(err),
            }
        }
    }

    Ok(grid)
}
