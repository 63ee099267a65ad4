// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Delve-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Delve and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;

use super::geometry::{GridPoint, Rect};
use super::ids::RoomId;
use super::topology::{ContentCatalog, Room, Topology};
use crate::render::TileGrid;

/// Top-left tile position per room. This is the only state the layout stages mutate,
/// and every stage produces a fresh mapping instead of editing one in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Placement {
    positions: BTreeMap<RoomId, GridPoint>,
}

impl Placement {
    pub fn new(positions: BTreeMap<RoomId, GridPoint>) -> Self {
        Self { positions }
    }

    pub fn positions(&self) -> &BTreeMap<RoomId, GridPoint> {
        &self.positions
    }

    pub fn position(&self, id: RoomId) -> Option<GridPoint> {
        self.positions.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Room rectangles in room-id order. Rooms without a position sit at the origin.
    pub fn rects(&self, topology: &Topology) -> Vec<(RoomId, Rect)> {
        topology
            .rooms()
            .values()
            .map(|room| {
                let at = self.position(room.id()).unwrap_or(GridPoint::new(0, 0));
                (room.id(), Rect::new(at.x(), at.y(), room.width(), room.height()))
            })
            .collect()
    }

    /// Translates so the minimum x and the minimum y are both 0.
    pub fn normalized(&self) -> Self {
        let Some(min_x) = self.positions.values().map(GridPoint::x).min() else {
            return self.clone();
        };
        let min_y = self.positions.values().map(GridPoint::y).min().unwrap_or(0);

        let positions = self
            .positions
            .iter()
            .map(|(id, p)| (*id, p.offset(-min_x, -min_y)))
            .collect();
        Self { positions }
    }
}

impl FromIterator<(RoomId, GridPoint)> for Placement {
    fn from_iter<I: IntoIterator<Item = (RoomId, GridPoint)>>(iter: I) -> Self {
        Self {
            positions: iter.into_iter().collect(),
        }
    }
}

/// A room frozen at its final position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedRoom {
    room: Room,
    at: GridPoint,
}

impl PlacedRoom {
    pub fn new(room: Room, at: GridPoint) -> Self {
        Self { room, at }
    }

    pub fn room(&self) -> &Room {
        &self.room
    }

    pub fn id(&self) -> RoomId {
        self.room.id()
    }

    pub fn x(&self) -> i32 {
        self.at.x()
    }

    pub fn y(&self) -> i32 {
        self.at.y()
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.at.x(), self.at.y(), self.room.width(), self.room.height())
    }

    pub fn center(&self) -> GridPoint {
        self.rect().center()
    }
}

/// How a corridor path was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteKind {
    /// The cardinal straight line was clear.
    Straight,
    /// Grid search found a detour.
    Searched,
    /// The L-shaped alternative replaced a blocked straight line.
    LShaped,
    /// Search exhausted; the blocked straight line is used as-is.
    StraightFallback,
}

impl RouteKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Straight => "straight",
            Self::Searched => "searched",
            Self::LShaped => "l-shaped",
            Self::StraightFallback => "straight-fallback",
        }
    }
}

/// Ordered walkable cells from one room center to another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorridorPath {
    from: RoomId,
    to: RoomId,
    cells: Vec<GridPoint>,
    kind: RouteKind,
}

impl CorridorPath {
    pub fn new(from: RoomId, to: RoomId, cells: Vec<GridPoint>, kind: RouteKind) -> Self {
        Self {
            from,
            to,
            cells,
            kind,
        }
    }

    pub fn from(&self) -> RoomId {
        self.from
    }

    pub fn to(&self) -> RoomId {
        self.to
    }

    pub fn cells(&self) -> &[GridPoint] {
        &self.cells
    }

    pub fn kind(&self) -> RouteKind {
        self.kind
    }

    /// True when every step is a single cardinal move.
    pub fn is_contiguous(&self) -> bool {
        self.cells.windows(2).all(|w| w[0].is_cardinal_neighbor(w[1]))
    }
}

/// The finished pipeline output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedDungeon {
    rooms: BTreeMap<RoomId, PlacedRoom>,
    connections: Vec<(RoomId, RoomId)>,
    corridors: Vec<CorridorPath>,
    content: ContentCatalog,
    grid: Option<TileGrid>,
}

impl PlacedDungeon {
    pub(crate) fn new(
        rooms: BTreeMap<RoomId, PlacedRoom>,
        connections: Vec<(RoomId, RoomId)>,
        corridors: Vec<CorridorPath>,
        content: ContentCatalog,
    ) -> Self {
        Self {
            rooms,
            connections,
            corridors,
            content,
            grid: None,
        }
    }

    pub(crate) fn with_grid(mut self, grid: TileGrid) -> Self {
        self.grid = Some(grid);
        self
    }

    pub fn rooms(&self) -> &BTreeMap<RoomId, PlacedRoom> {
        &self.rooms
    }

    pub fn room(&self, id: RoomId) -> Option<&PlacedRoom> {
        self.rooms.get(&id)
    }

    pub fn connections(&self) -> &[(RoomId, RoomId)] {
        &self.connections
    }

    /// One path per connection, in connection order.
    pub fn corridors(&self) -> &[CorridorPath] {
        &self.corridors
    }

    pub fn content(&self) -> &ContentCatalog {
        &self.content
    }

    pub fn grid(&self) -> Option<&TileGrid> {
        self.grid.as_ref()
    }

    /// Bounding width: furthest room edge plus one.
    pub fn width(&self) -> i32 {
        self.rooms.values().map(|r| r.rect().right()).max().unwrap_or(0) + 1
    }

    /// Bounding height: furthest room edge plus one.
    pub fn height(&self) -> i32 {
        self.rooms.values().map(|r| r.rect().bottom()).max().unwrap_or(0) + 1
    }

    /// Room pairs that violate `gap_x >= min_gap || gap_y >= min_gap`.
    pub fn gap_violations(&self, min_gap: i32) -> Vec<(RoomId, RoomId)> {
        let rooms = self.rooms.values().collect::<Vec<_>>();
        let mut out = Vec::new();
        for (idx, a) in rooms.iter().enumerate() {
            for b in &rooms[idx + 1..] {
                if !a.rect().is_separated_from(&b.rect(), min_gap) {
                    out.push((a.id(), b.id()));
                }
            }
        }
        out
    }
}
