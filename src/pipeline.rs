// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Delve-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Delve and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Stage sequencing: topology, placement, overlap resolution, routing, rasterization.
//!
//! Every stage consumes the previous stage's output and never revisits it. A
//! pipeline run owns all of its data, so independent runs can execute on
//! different threads.

use std::collections::BTreeMap;
use std::fmt;

use rayon::prelude::*;

use crate::layout::overlap::DEFAULT_OVERLAP_PASSES;
use crate::layout::{place_rooms, LayoutOptions, PlacementMode, PlacementOptions, DEFAULT_MIN_GAP};
use crate::model::{
    GridPoint, PlacedDungeon, PlacedRoom, RoomId, Topology, TopologyDocument, ValidationError,
};
use crate::render::{grid_extent, rasterize, GridError, RenderOptions, DEFAULT_GRID_PADDING};
use crate::route::{CorridorRouter, FallbackSearch, Occupancy, RoutingGrid};
use crate::solver::{PositionSource, SolveError, TopologySource};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipelineConfig {
    pub min_gap: i32,
    pub layout: LayoutOptions,
    pub overlap_passes: usize,
    pub placement: PlacementMode,
    pub fallback: FallbackSearch,
    /// `None` skips rasterization.
    pub render: Option<RenderOptions>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            min_gap: DEFAULT_MIN_GAP,
            layout: LayoutOptions::default(),
            overlap_passes: DEFAULT_OVERLAP_PASSES,
            placement: PlacementMode::default(),
            fallback: FallbackSearch::default(),
            render: Some(RenderOptions::default()),
        }
    }
}

impl PipelineConfig {
    pub fn with_min_gap(mut self, min_gap: i32) -> Self {
        self.min_gap = min_gap;
        self
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.layout = self.layout.with_seed(seed);
        self
    }

    pub fn with_layout(mut self, layout: LayoutOptions) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_overlap_passes(mut self, overlap_passes: usize) -> Self {
        self.overlap_passes = overlap_passes;
        self
    }

    pub fn with_placement(mut self, placement: PlacementMode) -> Self {
        self.placement = placement;
        self
    }

    pub fn with_fallback(mut self, fallback: FallbackSearch) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn with_render(mut self, render: Option<RenderOptions>) -> Self {
        self.render = render;
        self
    }

    pub fn placement_options(&self) -> PlacementOptions {
        PlacementOptions {
            mode: self.placement,
            min_gap: self.min_gap,
            layout: self.layout,
            overlap_passes: self.overlap_passes,
        }
    }
}

#[derive(Debug)]
pub enum PipelineError {
    Validation(ValidationError),
    Solve(SolveError),
    Grid(GridError),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "invalid topology: {err}"),
            Self::Solve(err) => write!(f, "{err}"),
            Self::Grid(err) => write!(f, "rasterization failed: {err}"),
        }
    }
}

impl std::error::Error for PipelineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Solve(err) => Some(err),
            Self::Grid(err) => Some(err),
        }
    }
}

impl From<ValidationError> for PipelineError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err)
    }
}

impl From<SolveError> for PipelineError {
    fn from(err: SolveError) -> Self {
        Self::Solve(err)
    }
}

impl From<GridError> for PipelineError {
    fn from(err: GridError) -> Self {
        Self::Grid(err)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Validates a JSON topology document, then runs the pipeline on it.
    pub fn run_document(&self, document: TopologyDocument) -> Result<PlacedDungeon, PipelineError> {
        let topology = Topology::try_from(document)?;
        self.run(&topology)
    }

    /// Pulls a topology from `source` and runs the pipeline on it.
    ///
    /// A source without a model surfaces as `PipelineError::Solve(SolveError::NoModel)`.
    pub fn generate(
        &self,
        source: &mut dyn TopologySource,
        positions: Option<&mut dyn PositionSource>,
    ) -> Result<PlacedDungeon, PipelineError> {
        let topology = source.topology()?;
        self.run_with(&topology, positions)
    }

    pub fn run(&self, topology: &Topology) -> Result<PlacedDungeon, PipelineError> {
        self.run_with(topology, None)
    }

    pub fn run_with(
        &self,
        topology: &Topology,
        positions: Option<&mut dyn PositionSource>,
    ) -> Result<PlacedDungeon, PipelineError> {
        let config = &self.config;
        tracing::info!(
            rooms = topology.rooms().len(),
            connections = topology.connections().len(),
            mode = config.placement.as_str(),
            "placing rooms"
        );

        let outcome = place_rooms(topology, &config.placement_options(), positions);
        tracing::debug!(
            mode = outcome.mode.as_str(),
            passes = outcome.passes,
            converged = outcome.converged,
            "rooms placed"
        );

        let rooms = topology
            .rooms()
            .values()
            .map(|room| {
                let at = outcome
                    .placement
                    .position(room.id())
                    .unwrap_or(GridPoint::new(0, 0));
                (room.id(), PlacedRoom::new(room.clone(), at))
            })
            .collect::<BTreeMap<RoomId, PlacedRoom>>();

        let padding = config.render.map_or(DEFAULT_GRID_PADDING, |render| render.padding);
        let (width, height) = grid_extent(&rooms, padding);
        let occupancy = Occupancy::new(
            RoutingGrid::new(width, height),
            rooms.values().map(|room| (room.id(), room.rect())),
        );
        let router = CorridorRouter::new(config.fallback);
        let corridors = router.route_all(&rooms, topology.connections(), &occupancy);

        let mut dungeon = PlacedDungeon::new(
            rooms,
            topology.connections().to_vec(),
            corridors,
            topology.content().clone(),
        );

        let violations = dungeon.gap_violations(config.min_gap);
        if !violations.is_empty() {
            tracing::warn!(
                pairs = violations.len(),
                min_gap = config.min_gap,
                "placement keeps residual gap violations"
            );
        }

        if let Some(render) = config.render {
            let grid = rasterize(dungeon.rooms(), dungeon.corridors(), &render)?;
            dungeon = dungeon.with_grid(grid);
        }

        tracing::info!(
            width = dungeon.width(),
            height = dungeon.height(),
            corridors = dungeon.corridors().len(),
            "dungeon ready"
        );
        Ok(dungeon)
    }

    /// Generates `count` dungeons in parallel.
    ///
    /// Each item clones `source` and owns everything it produces. With a fixed
    /// seed, item `i` uses `seed + i`.
    pub fn generate_batch<S>(
        &self,
        source: &S,
        count: usize,
    ) -> Vec<Result<PlacedDungeon, PipelineError>>
    where
        S: TopologySource + Clone + Send + Sync,
    {
        (0..count)
            .into_par_iter()
            .map(|index| {
                let seed = self
                    .config
                    .layout
                    .seed
                    .map(|seed| seed.wrapping_add(index as u64));
                let pipeline = Pipeline::new(self.config.with_seed(seed));
                let mut source = source.clone();
                pipeline.generate(&mut source, None)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{Pipeline, PipelineConfig, PipelineError};
    use crate::model::{fixtures, RoomDocument, TopologyDocument, ValidationError};
    use crate::render::{RenderMode, RenderOptions, Tile};
    use crate::route::FallbackSearch;
    use crate::solver::{CapturedOutput, FixedTopology, SolveError};

    fn seeded(seed: u64) -> Pipeline {
        Pipeline::new(PipelineConfig::default().with_seed(Some(seed)))
    }

    #[test]
    fn produces_one_corridor_per_connection() {
        let topology = fixtures::five_room_loop();
        let dungeon = seeded(3).run(&topology).expect("dungeon");

        assert_eq!(dungeon.rooms().len(), 5);
        assert_eq!(dungeon.corridors().len(), topology.connections().len());
        assert!(dungeon.gap_violations(2).is_empty());
        for path in dungeon.corridors() {
            assert!(path.is_contiguous());
            let from = dungeon.room(path.from()).expect("from room").center();
            let to = dungeon.room(path.to()).expect("to room").center();
            assert_eq!(path.cells().first(), Some(&from));
            assert_eq!(path.cells().last(), Some(&to));
        }
    }

    #[test]
    fn placement_is_normalized_to_origin() {
        let dungeon = seeded(9).run(&fixtures::demo_floor()).expect("dungeon");
        assert_eq!(dungeon.rooms().values().map(|r| r.x()).min(), Some(0));
        assert_eq!(dungeon.rooms().values().map(|r| r.y()).min(), Some(0));
    }

    #[test]
    fn fixed_seed_is_reproducible() {
        let topology = fixtures::demo_floor();
        let a = seeded(21).run(&topology).expect("dungeon");
        let b = seeded(21).run(&topology).expect("dungeon");
        assert_eq!(a, b);
    }

    #[test]
    fn render_can_be_skipped_or_walled() {
        let topology = fixtures::two_rooms();

        let bare = Pipeline::new(PipelineConfig::default().with_seed(Some(1)).with_render(None))
            .run(&topology)
            .expect("dungeon");
        assert!(bare.grid().is_none());

        let walled = Pipeline::new(
            PipelineConfig::default()
                .with_seed(Some(1))
                .with_render(Some(RenderOptions::default().with_mode(RenderMode::Walled))),
        )
        .run(&topology)
        .expect("dungeon");
        let grid = walled.grid().expect("grid");
        assert!(grid.count(Tile::Wall) > 0);
        assert!(grid.count(Tile::Door) >= 2);
    }

    #[test]
    fn l_shaped_fallback_still_connects_every_pair() {
        let config = PipelineConfig::default()
            .with_seed(Some(4))
            .with_fallback(FallbackSearch::LShaped);
        let dungeon = Pipeline::new(config).run(&fixtures::demo_floor()).expect("dungeon");
        assert_eq!(dungeon.corridors().len(), 7);
        assert!(dungeon.corridors().iter().all(|path| path.is_contiguous()));
    }

    #[test]
    fn invalid_document_is_rejected_without_output() {
        let document = TopologyDocument {
            rooms: vec![RoomDocument {
                id: 0,
                width: 4,
                height: 4,
                is_spawn: false,
                is_stairs: false,
                items: Vec::new(),
                enemies: Vec::new(),
                traps: Vec::new(),
            }],
            connections: vec![[0, 3]],
            item_types: Default::default(),
            enemy_types: Default::default(),
            trap_types: Default::default(),
        };
        let err = Pipeline::default().run_document(document).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Validation(ValidationError::UnknownRoom { .. })
        ));
    }

    #[test]
    fn no_model_is_a_distinct_error() {
        let mut source = CapturedOutput("UNSATISFIABLE".to_owned());
        let err = Pipeline::default().generate(&mut source, None).unwrap_err();
        assert!(matches!(err, PipelineError::Solve(SolveError::NoModel)));
    }

    #[test]
    fn batch_runs_are_independent_and_seeded_per_item() {
        let source = FixedTopology(fixtures::five_room_loop());
        let pipeline = seeded(100);

        let batch = pipeline.generate_batch(&source, 4);
        assert_eq!(batch.len(), 4);

        let topology = fixtures::five_room_loop();
        for (index, result) in batch.into_iter().enumerate() {
            let dungeon = result.expect("dungeon");
            let alone = seeded(100 + index as u64).run(&topology).expect("dungeon");
            assert_eq!(dungeon, alone);
        }
    }
}
