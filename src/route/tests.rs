// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Delve-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Delve and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;

use rstest::rstest;

use super::{is_clear, CorridorRouter, FallbackSearch, Occupancy, RoutingGrid, SearchScratch};
use crate::model::{GridPoint, PlacedRoom, Room, RoomId, RouteKind};

fn rid(value: u32) -> RoomId {
    RoomId::new(value)
}

fn placed(id: u32, x: i32, y: i32, width: i32, height: i32) -> (RoomId, PlacedRoom) {
    (rid(id), PlacedRoom::new(Room::new(rid(id), width, height), GridPoint::new(x, y)))
}

fn occupancy(rooms: &BTreeMap<RoomId, PlacedRoom>, width: usize, height: usize) -> Occupancy {
    Occupancy::new(
        RoutingGrid::new(width, height),
        rooms.values().map(|room| (room.id(), room.rect())),
    )
}

/// Rooms 0 and 1 on one row with room 2 squarely between them.
fn blocked_row() -> BTreeMap<RoomId, PlacedRoom> {
    BTreeMap::from([
        placed(0, 0, 0, 4, 4),
        placed(1, 14, 0, 4, 4),
        placed(2, 7, 0, 4, 4),
    ])
}

#[test]
fn clear_line_is_used_as_is() {
    let rooms = BTreeMap::from([placed(0, 0, 0, 4, 4), placed(1, 6, 0, 4, 4)]);
    let occ = occupancy(&rooms, 12, 6);
    let path = CorridorRouter::default().route(
        &rooms[&rid(0)],
        &rooms[&rid(1)],
        &occ,
        &mut SearchScratch::default(),
    );

    assert_eq!(path.kind(), RouteKind::Straight);
    assert_eq!(path.cells().first(), Some(&GridPoint::new(2, 2)));
    assert_eq!(path.cells().last(), Some(&GridPoint::new(8, 2)));
    assert_eq!(path.cells().len(), 7);
    assert!(path.is_contiguous());
}

#[test]
fn accepted_line_revalidates() {
    let rooms = BTreeMap::from([placed(0, 0, 0, 4, 4), placed(1, 9, 7, 4, 4)]);
    let occ = occupancy(&rooms, 15, 13);
    let path = CorridorRouter::default().route(
        &rooms[&rid(0)],
        &rooms[&rid(1)],
        &occ,
        &mut SearchScratch::default(),
    );

    assert_eq!(path.kind(), RouteKind::Straight);
    for _ in 0..3 {
        assert!(is_clear(path.cells(), &occ, (rid(0), rid(1))));
    }
}

#[test]
fn third_room_on_an_endpoint_center_does_not_block_the_line() {
    // Room 2 overlaps room 0's center; only interior cells are checked.
    let rooms = BTreeMap::from([
        placed(0, 0, 0, 5, 5),
        placed(1, 10, 0, 5, 5),
        placed(2, 2, 2, 1, 1),
    ]);
    let occ = occupancy(&rooms, 15, 5);
    assert_eq!(occ.owner(GridPoint::new(2, 2)), Some(rid(2)));

    let path = CorridorRouter::default().route(
        &rooms[&rid(0)],
        &rooms[&rid(1)],
        &occ,
        &mut SearchScratch::default(),
    );

    assert_eq!(path.kind(), RouteKind::Straight);
    assert_eq!(
        path.cells(),
        super::cardinal_line(GridPoint::new(2, 2), GridPoint::new(12, 2))
    );
}

#[test]
fn line_leaving_the_grid_is_not_clear() {
    let rooms = BTreeMap::from([placed(0, 0, 0, 4, 4), placed(1, 6, 0, 4, 4)]);
    let occ = occupancy(&rooms, 8, 6);
    let cells = super::cardinal_line(GridPoint::new(2, 2), GridPoint::new(8, 2));
    assert!(!is_clear(&cells, &occ, (rid(0), rid(1))));
}

#[test]
fn blocked_line_falls_back_to_search() {
    let rooms = blocked_row();
    let occ = occupancy(&rooms, 20, 8);
    let path = CorridorRouter::new(FallbackSearch::AStar).route(
        &rooms[&rid(0)],
        &rooms[&rid(1)],
        &occ,
        &mut SearchScratch::default(),
    );

    assert_eq!(path.kind(), RouteKind::Searched);
    assert_eq!(path.cells().first(), Some(&GridPoint::new(2, 2)));
    assert_eq!(path.cells().last(), Some(&GridPoint::new(16, 2)));
    assert!(path.is_contiguous());
    assert!(path
        .cells()
        .iter()
        .all(|cell| occ.owner(*cell) != Some(rid(2))));
}

#[test]
fn blocked_line_can_use_the_l_shape_instead() {
    let rooms = blocked_row();
    let occ = occupancy(&rooms, 20, 8);
    let path = CorridorRouter::new(FallbackSearch::LShaped).route(
        &rooms[&rid(0)],
        &rooms[&rid(1)],
        &occ,
        &mut SearchScratch::default(),
    );

    assert_eq!(path.kind(), RouteKind::LShaped);
    assert_eq!(path.cells().first(), Some(&GridPoint::new(2, 2)));
    assert_eq!(path.cells().last(), Some(&GridPoint::new(16, 2)));
    assert!(path.is_contiguous());
}

#[test]
fn exhausted_search_keeps_the_straight_line() {
    // Room 1 is boxed in by room 2 on the left, room 3 below, and the grid edge.
    let rooms = BTreeMap::from([
        placed(0, 0, 0, 3, 3),
        placed(1, 10, 0, 3, 3),
        placed(2, 9, 0, 1, 4),
        placed(3, 10, 3, 3, 1),
    ]);
    let occ = occupancy(&rooms, 13, 5);
    let path = CorridorRouter::default().route(
        &rooms[&rid(0)],
        &rooms[&rid(1)],
        &occ,
        &mut SearchScratch::default(),
    );

    assert_eq!(path.kind(), RouteKind::StraightFallback);
    assert_eq!(
        path.cells(),
        super::cardinal_line(GridPoint::new(1, 1), GridPoint::new(11, 1))
    );
}

#[rstest]
#[case(FallbackSearch::AStar)]
#[case(FallbackSearch::LShaped)]
fn routes_one_path_per_connection(#[case] fallback: FallbackSearch) {
    let mut rooms = blocked_row();
    rooms.extend([placed(3, 3, 10, 3, 3)]);
    let occ = occupancy(&rooms, 20, 15);
    let connections = [(rid(0), rid(1)), (rid(1), rid(2)), (rid(0), rid(2))];

    let paths = CorridorRouter::new(fallback).route_all(&rooms, &connections, &occ);

    assert_eq!(paths.len(), connections.len());
    for (path, (a, b)) in paths.iter().zip(connections) {
        assert_eq!((path.from(), path.to()), (a, b));
        assert_eq!(path.cells().first(), Some(&rooms[&a].center()));
        assert_eq!(path.cells().last(), Some(&rooms[&b].center()));
        assert!(path.is_contiguous());
    }
    // Room 3 has no connections, so no path touches it as an endpoint.
    assert!(paths.iter().all(|p| p.from() != rid(3) && p.to() != rid(3)));
}

#[test]
fn self_connection_is_a_single_cell() {
    let rooms = BTreeMap::from([placed(0, 1, 1, 5, 5)]);
    let occ = occupancy(&rooms, 8, 8);
    let paths = CorridorRouter::default().route_all(&rooms, &[(rid(0), rid(0))], &occ);
    assert_eq!(paths[0].cells(), &[GridPoint::new(3, 3)]);
}
