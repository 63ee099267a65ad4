// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Delve-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Delve and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! A [`Topology`] comes in from the topology provider, [`Placement`] carries
//! positions between layout stages, and [`PlacedDungeon`] is the frozen result.

pub mod document;
pub mod dungeon;
pub mod fixtures;
pub mod geometry;
pub mod ids;
pub mod topology;

pub use document::{DungeonDocument, RoomDocument, TopologyDocument};
pub use dungeon::{CorridorPath, PlacedDungeon, PlacedRoom, Placement, RouteKind};
pub use geometry::{GridPoint, Rect};
pub use ids::{ContentId, Id, IdError, RoomId};
pub use topology::{
    ContentCatalog, ContentKind, Room, Topology, ValidationError, MAX_ROOM_DIMENSION,
};
