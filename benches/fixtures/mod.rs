// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Delve-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Delve and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Shared deterministic benchmark fixtures (no RNG).

use std::collections::BTreeMap;

use delve::model::{ContentCatalog, GridPoint, PlacedRoom, Room, RoomId, Topology};

pub mod floor {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct FloorParams {
        pub rooms: u32,
        pub extra_links: u32,
        pub min_size: i32,
        pub max_size: i32,
    }

    impl FloorParams {
        pub const fn new(rooms: u32, extra_links: u32, min_size: i32, max_size: i32) -> Self {
            Self {
                rooms,
                extra_links,
                min_size,
                max_size,
            }
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Case {
        Small,
        Medium,
        LargeLoopy,
    }

    impl Case {
        pub const fn id(self) -> &'static str {
            match self {
                Self::Small => "small",
                Self::Medium => "medium",
                Self::LargeLoopy => "large_loopy",
            }
        }

        pub const fn params(self) -> FloorParams {
            match self {
                Self::Small => FloorParams::new(6, 1, 4, 7),
                Self::Medium => FloorParams::new(16, 4, 4, 9),
                Self::LargeLoopy => FloorParams::new(40, 20, 3, 10),
            }
        }
    }

    fn size(params: FloorParams, idx: u32, salt: u32) -> i32 {
        let span = (params.max_size - params.min_size + 1).max(1) as u32;
        params.min_size + ((idx.wrapping_mul(7).wrapping_add(salt)) % span) as i32
    }

    /// Deterministic floor generator.
    ///
    /// - Rooms form a chain `0 - 1 - ... - n-1`, so the floor is connected.
    /// - Extra links jump forward by a stride and close loops.
    /// - Room 0 is the spawn, the last room holds the stairs.
    pub fn chain(params: FloorParams) -> Topology {
        assert!(params.rooms >= 2, "rooms must be >= 2");

        let last = params.rooms - 1;
        let rooms = (0..params.rooms).map(|idx| {
            Room::new(RoomId::new(idx), size(params, idx, 0), size(params, idx, 3))
                .with_spawn(idx == 0)
                .with_stairs(idx == last)
        });

        let mut connections = (1..params.rooms)
            .map(|idx| (RoomId::new(idx - 1), RoomId::new(idx)))
            .collect::<Vec<_>>();
        for k in 0..params.extra_links {
            let from = (k * 5) % params.rooms;
            let to = (from + 2 + k % 3) % params.rooms;
            if from != to {
                connections.push((RoomId::new(from), RoomId::new(to)));
            }
        }

        Topology::new(rooms, connections, ContentCatalog::default()).expect("valid floor")
    }

    pub fn fixture(case: Case) -> Topology {
        chain(case.params())
    }
}

pub mod grid {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Case {
        OpenField,
        WalledCorridor,
    }

    impl Case {
        pub const fn id(self) -> &'static str {
            match self {
                Self::OpenField => "open_field",
                Self::WalledCorridor => "walled_corridor",
            }
        }
    }

    /// Two endpoint rooms at opposite ends of a row, with blocker rooms in
    /// between. `WalledCorridor` leaves only a narrow gap at the bottom.
    pub fn rooms(case: Case) -> BTreeMap<RoomId, PlacedRoom> {
        let mut rooms = BTreeMap::new();
        let mut push = |id: u32, x: i32, y: i32, w: i32, h: i32| {
            let room = Room::new(RoomId::new(id), w, h);
            rooms.insert(RoomId::new(id), PlacedRoom::new(room, GridPoint::new(x, y)));
        };

        push(0, 0, 20, 6, 6);
        push(1, 114, 20, 6, 6);
        match case {
            Case::OpenField => {
                for k in 0..6u32 {
                    push(2 + k, 14 + k as i32 * 16, 4 + (k as i32 % 3) * 12, 8, 8);
                }
            }
            Case::WalledCorridor => {
                for k in 0..6u32 {
                    push(2 + k, 12 + k as i32 * 16, 0, 10, 44);
                }
            }
        }
        rooms
    }

    pub const WIDTH: usize = 122;
    pub const HEIGHT: usize = 48;
}
