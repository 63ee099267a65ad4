// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Delve-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Delve and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;
use std::fmt;

use smol_str::SmolStr;

use super::ids::{ContentId, RoomId};

/// Largest accepted room width or height, in tiles.
pub const MAX_ROOM_DIMENSION: i32 = 512;

/// A room as delivered by the topology provider. Immutable once received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    id: RoomId,
    width: i32,
    height: i32,
    is_spawn: bool,
    is_stairs: bool,
    items: Vec<ContentId>,
    enemies: Vec<ContentId>,
    traps: Vec<ContentId>,
}

impl Room {
    pub fn new(id: RoomId, width: i32, height: i32) -> Self {
        Self {
            id,
            width,
            height,
            is_spawn: false,
            is_stairs: false,
            items: Vec::new(),
            enemies: Vec::new(),
            traps: Vec::new(),
        }
    }

    pub fn with_spawn(mut self, is_spawn: bool) -> Self {
        self.is_spawn = is_spawn;
        self
    }

    pub fn with_stairs(mut self, is_stairs: bool) -> Self {
        self.is_stairs = is_stairs;
        self
    }

    pub fn with_content(mut self, kind: ContentKind, ids: Vec<ContentId>) -> Self {
        match kind {
            ContentKind::Item => self.items = ids,
            ContentKind::Enemy => self.enemies = ids,
            ContentKind::Trap => self.traps = ids,
        }
        self
    }

    pub fn id(&self) -> RoomId {
        self.id
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn is_spawn(&self) -> bool {
        self.is_spawn
    }

    pub fn is_stairs(&self) -> bool {
        self.is_stairs
    }

    pub fn content(&self, kind: ContentKind) -> &[ContentId] {
        match kind {
            ContentKind::Item => &self.items,
            ContentKind::Enemy => &self.enemies,
            ContentKind::Trap => &self.traps,
        }
    }

    /// Mean of width and height, used to scale the force layout into tile space.
    pub(crate) fn mean_dimension(&self) -> f64 {
        f64::from(self.width + self.height) / 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ContentKind {
    Item,
    Enemy,
    Trap,
}

impl ContentKind {
    pub const ALL: [ContentKind; 3] = [Self::Item, Self::Enemy, Self::Trap];

    pub fn label(self) -> &'static str {
        match self {
            Self::Item => "Item",
            Self::Enemy => "Enemy",
            Self::Trap => "Trap",
        }
    }
}

/// Content id to type-name mappings. Opaque to the spatial pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentCatalog {
    items: BTreeMap<ContentId, SmolStr>,
    enemies: BTreeMap<ContentId, SmolStr>,
    traps: BTreeMap<ContentId, SmolStr>,
}

impl ContentCatalog {
    pub fn insert(&mut self, kind: ContentKind, id: ContentId, type_name: impl Into<SmolStr>) {
        self.map_mut(kind).insert(id, type_name.into());
    }

    pub fn type_name(&self, kind: ContentKind, id: ContentId) -> Option<&str> {
        self.map(kind).get(&id).map(SmolStr::as_str)
    }

    pub fn map(&self, kind: ContentKind) -> &BTreeMap<ContentId, SmolStr> {
        match kind {
            ContentKind::Item => &self.items,
            ContentKind::Enemy => &self.enemies,
            ContentKind::Trap => &self.traps,
        }
    }

    fn map_mut(&mut self, kind: ContentKind) -> &mut BTreeMap<ContentId, SmolStr> {
        match kind {
            ContentKind::Item => &mut self.items,
            ContentKind::Enemy => &mut self.enemies,
            ContentKind::Trap => &mut self.traps,
        }
    }
}

/// The abstract room-adjacency graph: rooms, undirected connections, content names.
///
/// Construction validates the graph, so every `Topology` value has at least one
/// room and only references known room ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topology {
    rooms: BTreeMap<RoomId, Room>,
    connections: Vec<(RoomId, RoomId)>,
    content: ContentCatalog,
}

impl Topology {
    pub fn new(
        rooms: impl IntoIterator<Item = Room>,
        connections: Vec<(RoomId, RoomId)>,
        content: ContentCatalog,
    ) -> Result<Self, ValidationError> {
        let mut by_id = BTreeMap::<RoomId, Room>::new();
        for room in rooms {
            if room.width < 1 || room.height < 1 {
                return Err(ValidationError::DegenerateRoom {
                    room: room.id,
                    width: room.width,
                    height: room.height,
                });
            }
            if room.width > MAX_ROOM_DIMENSION || room.height > MAX_ROOM_DIMENSION {
                return Err(ValidationError::OversizedRoom {
                    room: room.id,
                    width: room.width,
                    height: room.height,
                });
            }
            let id = room.id;
            if by_id.insert(id, room).is_some() {
                return Err(ValidationError::DuplicateRoom { room: id });
            }
        }

        if by_id.is_empty() {
            return Err(ValidationError::EmptyTopology);
        }

        for &(a, b) in &connections {
            for room in [a, b] {
                if !by_id.contains_key(&room) {
                    return Err(ValidationError::UnknownRoom {
                        connection: (a, b),
                        room,
                    });
                }
            }
        }

        Ok(Self {
            rooms: by_id,
            connections,
            content,
        })
    }

    pub fn rooms(&self) -> &BTreeMap<RoomId, Room> {
        &self.rooms
    }

    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(&id)
    }

    pub fn connections(&self) -> &[(RoomId, RoomId)] {
        &self.connections
    }

    pub fn content(&self) -> &ContentCatalog {
        &self.content
    }

    /// Mean of `(width + height) / 2` over all rooms.
    pub fn average_room_dimension(&self) -> f64 {
        let total = self.rooms.values().map(Room::mean_dimension).sum::<f64>();
        total / self.rooms.len() as f64
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    EmptyTopology,
    UnknownRoom {
        connection: (RoomId, RoomId),
        room: RoomId,
    },
    DuplicateRoom {
        room: RoomId,
    },
    DegenerateRoom {
        room: RoomId,
        width: i32,
        height: i32,
    },
    OversizedRoom {
        room: RoomId,
        width: i32,
        height: i32,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTopology => f.write_str("topology contains no rooms"),
            Self::UnknownRoom {
                connection: (a, b),
                room,
            } => write!(f, "connection ({a},{b}) references unknown room {room}"),
            Self::DuplicateRoom { room } => write!(f, "room {room} is defined more than once"),
            Self::DegenerateRoom {
                room,
                width,
                height,
            } => write!(f, "room {room} has degenerate size {width}x{height}"),
            Self::OversizedRoom {
                room,
                width,
                height,
            } => write!(f, "room {room} size {width}x{height} exceeds {MAX_ROOM_DIMENSION} tiles"),
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::{ContentCatalog, ContentKind, Room, Topology, ValidationError};
    use crate::model::ids::{ContentId, RoomId};

    fn rid(value: u32) -> RoomId {
        RoomId::new(value)
    }

    #[test]
    fn rejects_empty_topology() {
        let result = Topology::new(Vec::new(), Vec::new(), ContentCatalog::default());
        assert_eq!(result, Err(ValidationError::EmptyTopology));
    }

    #[test]
    fn rejects_connection_to_unknown_room() {
        let result = Topology::new(
            [Room::new(rid(0), 4, 4)],
            vec![(rid(0), rid(9))],
            ContentCatalog::default(),
        );
        assert_eq!(
            result,
            Err(ValidationError::UnknownRoom {
                connection: (rid(0), rid(9)),
                room: rid(9),
            })
        );
    }

    #[test]
    fn rejects_duplicate_and_degenerate_rooms() {
        let duplicate = Topology::new(
            [Room::new(rid(1), 4, 4), Room::new(rid(1), 5, 5)],
            Vec::new(),
            ContentCatalog::default(),
        );
        assert_eq!(duplicate, Err(ValidationError::DuplicateRoom { room: rid(1) }));

        let degenerate =
            Topology::new([Room::new(rid(2), 0, 3)], Vec::new(), ContentCatalog::default());
        assert_eq!(
            degenerate,
            Err(ValidationError::DegenerateRoom {
                room: rid(2),
                width: 0,
                height: 3,
            })
        );
    }

    #[test]
    fn rejects_rooms_larger_than_the_tile_limit() {
        let result = Topology::new(
            [Room::new(rid(0), i32::MAX, i32::MAX), Room::new(rid(1), 4, 4)],
            vec![(rid(0), rid(1))],
            ContentCatalog::default(),
        );
        assert_eq!(
            result,
            Err(ValidationError::OversizedRoom {
                room: rid(0),
                width: i32::MAX,
                height: i32::MAX,
            })
        );

        let tall = Topology::new(
            [Room::new(rid(3), 4, super::MAX_ROOM_DIMENSION + 1)],
            Vec::new(),
            ContentCatalog::default(),
        );
        assert!(matches!(tall, Err(ValidationError::OversizedRoom { .. })));

        let limit = Topology::new(
            [Room::new(rid(4), super::MAX_ROOM_DIMENSION, super::MAX_ROOM_DIMENSION)],
            Vec::new(),
            ContentCatalog::default(),
        );
        assert!(limit.is_ok());
    }

    #[test]
    fn average_room_dimension_uses_mean_of_width_and_height() {
        let topology = Topology::new(
            [Room::new(rid(0), 4, 6), Room::new(rid(1), 8, 8)],
            Vec::new(),
            ContentCatalog::default(),
        )
        .expect("topology");
        assert_eq!(topology.average_room_dimension(), 6.5);
    }

    #[test]
    fn catalog_resolves_type_names_per_kind() {
        let mut catalog = ContentCatalog::default();
        catalog.insert(ContentKind::Item, ContentId::new(1), "potion");
        catalog.insert(ContentKind::Enemy, ContentId::new(1), "slime");

        assert_eq!(catalog.type_name(ContentKind::Item, ContentId::new(1)), Some("potion"));
        assert_eq!(catalog.type_name(ContentKind::Enemy, ContentId::new(1)), Some("slime"));
        assert_eq!(catalog.type_name(ContentKind::Trap, ContentId::new(1)), None);
    }
}
