// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Delve-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Delve and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Small hand-written topologies for demos, tests, and benchmarks.

use super::ids::{ContentId, RoomId};
use super::topology::{ContentCatalog, ContentKind, Room, Topology};

fn rid(value: u32) -> RoomId {
    RoomId::new(value)
}

fn cids(values: &[u32]) -> Vec<ContentId> {
    values.iter().copied().map(ContentId::new).collect()
}

/// Two 4x4 rooms joined by one connection.
pub fn two_rooms() -> Topology {
    Topology::new(
        [Room::new(rid(0), 4, 4), Room::new(rid(1), 4, 4)],
        vec![(rid(0), rid(1))],
        ContentCatalog::default(),
    )
    .expect("fixture topology is valid")
}

/// A connected pair plus room 2 with no connections at all.
pub fn with_isolated_room() -> Topology {
    Topology::new(
        [
            Room::new(rid(0), 4, 4).with_spawn(true),
            Room::new(rid(1), 5, 4).with_stairs(true),
            Room::new(rid(2), 3, 3),
        ],
        vec![(rid(0), rid(1))],
        ContentCatalog::default(),
    )
    .expect("fixture topology is valid")
}

/// Five rooms in a ring with a spawn, stairs, and some content.
pub fn five_room_loop() -> Topology {
    let mut content = ContentCatalog::default();
    content.insert(ContentKind::Item, ContentId::new(0), "apple");
    content.insert(ContentKind::Item, ContentId::new(1), "oran_berry");
    content.insert(ContentKind::Enemy, ContentId::new(0), "rattata");
    content.insert(ContentKind::Trap, ContentId::new(0), "sticky");

    Topology::new(
        [
            Room::new(rid(0), 5, 5).with_spawn(true),
            Room::new(rid(1), 6, 4).with_content(ContentKind::Item, cids(&[0, 1])),
            Room::new(rid(2), 4, 6).with_content(ContentKind::Enemy, cids(&[0])),
            Room::new(rid(3), 7, 5).with_content(ContentKind::Trap, cids(&[0])),
            Room::new(rid(4), 5, 6).with_stairs(true),
        ],
        vec![
            (rid(0), rid(1)),
            (rid(1), rid(2)),
            (rid(2), rid(3)),
            (rid(3), rid(4)),
            (rid(4), rid(0)),
        ],
        content,
    )
    .expect("fixture topology is valid")
}

/// The seven-room floor the CLI renders with `--demo`.
pub fn demo_floor() -> Topology {
    let mut content = ContentCatalog::default();
    content.insert(ContentKind::Item, ContentId::new(0), "apple");
    content.insert(ContentKind::Item, ContentId::new(1), "reviver_seed");
    content.insert(ContentKind::Item, ContentId::new(2), "poke");
    content.insert(ContentKind::Enemy, ContentId::new(0), "zubat");
    content.insert(ContentKind::Enemy, ContentId::new(1), "geodude");
    content.insert(ContentKind::Trap, ContentId::new(0), "warp");

    Topology::new(
        [
            Room::new(rid(0), 6, 5).with_spawn(true),
            Room::new(rid(1), 5, 5).with_content(ContentKind::Item, cids(&[0])),
            Room::new(rid(2), 8, 6).with_content(ContentKind::Enemy, cids(&[0, 1])),
            Room::new(rid(3), 4, 4),
            Room::new(rid(4), 6, 7).with_content(ContentKind::Trap, cids(&[0])),
            Room::new(rid(5), 5, 6).with_content(ContentKind::Item, cids(&[1, 2])),
            Room::new(rid(6), 7, 5).with_stairs(true),
        ],
        vec![
            (rid(0), rid(1)),
            (rid(0), rid(2)),
            (rid(1), rid(3)),
            (rid(2), rid(4)),
            (rid(3), rid(5)),
            (rid(4), rid(5)),
            (rid(5), rid(6)),
        ],
        content,
    )
    .expect("fixture topology is valid")
}
