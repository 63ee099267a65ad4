// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Delve-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Delve and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Room placement.
//!
//! [`force`] embeds the room graph, [`overlap`] enforces the minimum gap, and
//! [`placement`] picks between force-directed and constraint-solved positions.

pub mod force;
pub mod overlap;
pub mod placement;

pub use force::{embed_topology, project_to_tiles, tile_scale, GraphLayoutEngine, LayoutOptions};
pub use overlap::{push_apart, resolve_pass, OverlapResolver, PassOutcome, PushAxis, Resolution};
pub use placement::{
    place_rooms, PlacementMode, PlacementOptions, PlacementOutcome, DEFAULT_MIN_GAP,
};
