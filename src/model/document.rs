// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Delve-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Delve and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! JSON documents at the crate boundary.
//!
//! These are plain serde structs; conversion into [`Topology`] runs the same
//! validation as building one in code.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::dungeon::PlacedDungeon;
use super::ids::{ContentId, RoomId};
use super::topology::{ContentCatalog, ContentKind, Room, Topology, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TopologyDocument {
    pub rooms: Vec<RoomDocument>,
    #[serde(default)]
    pub connections: Vec<[u32; 2]>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub item_types: BTreeMap<u32, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub enemy_types: BTreeMap<u32, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub trap_types: BTreeMap<u32, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RoomDocument {
    pub id: u32,
    pub width: i32,
    pub height: i32,
    #[serde(default)]
    pub is_spawn: bool,
    #[serde(default)]
    pub is_stairs: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub enemies: Vec<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub traps: Vec<u32>,
}

fn content_ids(raw: &[u32]) -> Vec<ContentId> {
    raw.iter().copied().map(ContentId::new).collect()
}

fn raw_ids(ids: &[ContentId]) -> Vec<u32> {
    ids.iter().map(|id| id.get()).collect()
}

impl TryFrom<TopologyDocument> for Topology {
    type Error = ValidationError;

    fn try_from(doc: TopologyDocument) -> Result<Self, Self::Error> {
        let rooms = doc.rooms.iter().map(|room| {
            Room::new(RoomId::new(room.id), room.width, room.height)
                .with_spawn(room.is_spawn)
                .with_stairs(room.is_stairs)
                .with_content(ContentKind::Item, content_ids(&room.items))
                .with_content(ContentKind::Enemy, content_ids(&room.enemies))
                .with_content(ContentKind::Trap, content_ids(&room.traps))
        });

        let connections = doc
            .connections
            .iter()
            .map(|[a, b]| (RoomId::new(*a), RoomId::new(*b)))
            .collect();

        let mut content = ContentCatalog::default();
        for (kind, names) in [
            (ContentKind::Item, &doc.item_types),
            (ContentKind::Enemy, &doc.enemy_types),
            (ContentKind::Trap, &doc.trap_types),
        ] {
            for (id, name) in names {
                content.insert(kind, ContentId::new(*id), name.as_str());
            }
        }

        Topology::new(rooms, connections, content)
    }
}

impl From<&Topology> for TopologyDocument {
    fn from(topology: &Topology) -> Self {
        let names = |kind: ContentKind| {
            topology
                .content()
                .map(kind)
                .iter()
                .map(|(id, name)| (id.get(), name.to_string()))
                .collect::<BTreeMap<_, _>>()
        };

        Self {
            rooms: topology
                .rooms()
                .values()
                .map(|room| RoomDocument {
                    id: room.id().get(),
                    width: room.width(),
                    height: room.height(),
                    is_spawn: room.is_spawn(),
                    is_stairs: room.is_stairs(),
                    items: raw_ids(room.content(ContentKind::Item)),
                    enemies: raw_ids(room.content(ContentKind::Enemy)),
                    traps: raw_ids(room.content(ContentKind::Trap)),
                })
                .collect(),
            connections: topology
                .connections()
                .iter()
                .map(|(a, b)| [a.get(), b.get()])
                .collect(),
            item_types: names(ContentKind::Item),
            enemy_types: names(ContentKind::Enemy),
            trap_types: names(ContentKind::Trap),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DungeonDocument {
    pub width: i32,
    pub height: i32,
    pub rooms: Vec<PlacedRoomDocument>,
    pub corridors: Vec<CorridorDocument>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlacedRoomDocument {
    pub id: u32,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub is_spawn: bool,
    pub is_stairs: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CorridorDocument {
    pub from: u32,
    pub to: u32,
    pub kind: &'static str,
    pub cells: Vec<[i32; 2]>,
}

impl From<&PlacedDungeon> for DungeonDocument {
    fn from(dungeon: &PlacedDungeon) -> Self {
        Self {
            width: dungeon.width(),
            height: dungeon.height(),
            rooms: dungeon
                .rooms()
                .values()
                .map(|placed| PlacedRoomDocument {
                    id: placed.id().get(),
                    x: placed.x(),
                    y: placed.y(),
                    width: placed.room().width(),
                    height: placed.room().height(),
                    is_spawn: placed.room().is_spawn(),
                    is_stairs: placed.room().is_stairs(),
                })
                .collect(),
            corridors: dungeon
                .corridors()
                .iter()
                .map(|path| CorridorDocument {
                    from: path.from().get(),
                    to: path.to().get(),
                    kind: path.kind().as_str(),
                    cells: path.cells().iter().map(|p| [p.x(), p.y()]).collect(),
                })
                .collect(),
            grid: dungeon
                .grid()
                .map(|grid| grid.to_string().split('\n').map(str::to_owned).collect()),
        }
    }
}
