// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Delve-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Delve and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Delve: spatial realization of abstract dungeon floors.
//!
//! A [`model::Topology`] (rooms, sizes, roles, connections) goes through force-directed
//! placement, overlap resolution, corridor routing, and rasterization, and comes
//! out as a [`model::PlacedDungeon`] with an optional [`render::TileGrid`].

pub mod layout;
pub mod model;
pub mod pipeline;
pub mod render;
pub mod route;
pub mod solver;

pub use pipeline::{Pipeline, PipelineConfig, PipelineError};
