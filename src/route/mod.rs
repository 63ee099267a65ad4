// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Delve-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Delve and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Corridor routing between connected rooms.
//!
//! Every corridor runs between the two rooms' integer centers. The cardinal
//! straight line is tried first; when it crosses a third room, the configured
//! [`FallbackSearch`] takes over.

use std::collections::BTreeMap;

use crate::model::{CorridorPath, GridPoint, PlacedRoom, RoomId, RouteKind};

pub mod line;
pub mod search;

pub use line::{cardinal_line, l_shaped};
pub use search::{astar, Occupancy, RoutingGrid, SearchScratch};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FallbackSearch {
    /// Shortest detour over the walkable grid.
    #[default]
    AStar,
    /// Fixed L-shaped path through the middle column.
    LShaped,
}

/// True when every cell is on the grid and no interior cell sits on a third room's tile.
///
/// The first and last cells are the room centers and always count as walkable.
pub fn is_clear(cells: &[GridPoint], occupancy: &Occupancy, endpoints: (RoomId, RoomId)) -> bool {
    let last = cells.len().saturating_sub(1);
    cells.iter().enumerate().all(|(idx, cell)| {
        if idx == 0 || idx == last {
            occupancy.grid().contains(*cell)
        } else {
            occupancy.is_walkable(*cell, endpoints)
        }
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CorridorRouter {
    fallback: FallbackSearch,
}

impl CorridorRouter {
    pub fn new(fallback: FallbackSearch) -> Self {
        Self { fallback }
    }

    pub fn fallback(&self) -> FallbackSearch {
        self.fallback
    }

    /// Routes one path per connection, in connection order.
    pub fn route_all(
        &self,
        rooms: &BTreeMap<RoomId, PlacedRoom>,
        connections: &[(RoomId, RoomId)],
        occupancy: &Occupancy,
    ) -> Vec<CorridorPath> {
        let mut scratch = SearchScratch::default();
        connections
            .iter()
            .filter_map(|&(a, b)| {
                let (Some(from), Some(to)) = (rooms.get(&a), rooms.get(&b)) else {
                    tracing::debug!(from = %a, to = %b, "skipping connection to unplaced room");
                    return None;
                };
                Some(self.route(from, to, occupancy, &mut scratch))
            })
            .collect()
    }

    pub fn route(
        &self,
        from: &PlacedRoom,
        to: &PlacedRoom,
        occupancy: &Occupancy,
        scratch: &mut SearchScratch,
    ) -> CorridorPath {
        let endpoints = (from.id(), to.id());
        let (start, goal) = (from.center(), to.center());

        let straight = cardinal_line(start, goal);
        if is_clear(&straight, occupancy, endpoints) {
            tracing::debug!(
                from = %from.id(),
                to = %to.id(),
                cells = straight.len(),
                "straight corridor"
            );
            return CorridorPath::new(from.id(), to.id(), straight, RouteKind::Straight);
        }

        match self.fallback {
            FallbackSearch::AStar => {
                match astar(start, goal, occupancy, endpoints, scratch) {
                    Some(path) => {
                        tracing::debug!(
                            from = %from.id(),
                            to = %to.id(),
                            cells = path.len(),
                            "searched corridor"
                        );
                        CorridorPath::new(from.id(), to.id(), path.to_vec(), RouteKind::Searched)
                    }
                    None => {
                        tracing::warn!(
                            from = %from.id(),
                            to = %to.id(),
                            "corridor search exhausted; keeping the blocked straight line"
                        );
                        CorridorPath::new(from.id(), to.id(), straight, RouteKind::StraightFallback)
                    }
                }
            }
            FallbackSearch::LShaped => {
                let cells = l_shaped(start, goal);
                tracing::debug!(
                    from = %from.id(),
                    to = %to.id(),
                    cells = cells.len(),
                    "l-shaped corridor"
                );
                CorridorPath::new(from.id(), to.id(), cells, RouteKind::LShaped)
            }
        }
    }
}

#[cfg(test)]
mod tests;
