// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Delve-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Delve and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::force::{embed_topology, LayoutOptions};
use super::overlap::{OverlapResolver, DEFAULT_OVERLAP_PASSES};
use crate::model::{Placement, Topology};
use crate::solver::{PositionSource, SolveError};

pub const DEFAULT_MIN_GAP: i32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlacementMode {
    /// Spring embedding followed by overlap resolution.
    #[default]
    ForceDirected,
    /// Exact positions from an external solver, with force-directed fallback.
    ConstraintSolved,
}

impl PlacementMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ForceDirected => "force-directed",
            Self::ConstraintSolved => "constraint-solved",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementOptions {
    pub mode: PlacementMode,
    pub min_gap: i32,
    pub layout: LayoutOptions,
    pub overlap_passes: usize,
}

impl Default for PlacementOptions {
    fn default() -> Self {
        Self {
            mode: PlacementMode::default(),
            min_gap: DEFAULT_MIN_GAP,
            layout: LayoutOptions::default(),
            overlap_passes: DEFAULT_OVERLAP_PASSES,
        }
    }
}

#[derive(Debug)]
pub struct PlacementOutcome {
    pub placement: Placement,
    /// The mode that actually produced `placement`.
    pub mode: PlacementMode,
    pub passes: usize,
    pub converged: bool,
    /// Why constraint-solved placement was abandoned, if it was.
    pub fallback: Option<SolveError>,
}

/// Positions every room of `topology` according to `options.mode`.
///
/// Constraint-solved placement needs `solver`. Without one, or when the solver
/// fails in any way, placement falls back to force-directed layout.
pub fn place_rooms(
    topology: &Topology,
    options: &PlacementOptions,
    solver: Option<&mut dyn PositionSource>,
) -> PlacementOutcome {
    let resolver = OverlapResolver::new(options.min_gap).with_max_passes(options.overlap_passes);

    if options.mode == PlacementMode::ConstraintSolved {
        let solved = match solver {
            Some(solver) => solver.positions(topology, options.min_gap),
            None => Err(SolveError::NoModel),
        };
        match solved {
            Ok(positions) => {
                // Omitted rooms start at the origin; the resolver moves them out of the way.
                let resolution = resolver.resolve(topology, &positions.normalized());
                return PlacementOutcome {
                    placement: resolution.placement,
                    mode: PlacementMode::ConstraintSolved,
                    passes: resolution.passes,
                    converged: resolution.converged,
                    fallback: None,
                };
            }
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    "constraint placement failed; using force-directed layout"
                );
                let mut outcome = force_directed(topology, options, &resolver);
                outcome.fallback = Some(err);
                return outcome;
            }
        }
    }

    force_directed(topology, options, &resolver)
}

fn force_directed(
    topology: &Topology,
    options: &PlacementOptions,
    resolver: &OverlapResolver,
) -> PlacementOutcome {
    let initial = embed_topology(topology, options.min_gap, options.layout);
    let resolution = resolver.resolve(topology, &initial);
    PlacementOutcome {
        placement: resolution.placement,
        mode: PlacementMode::ForceDirected,
        passes: resolution.passes,
        converged: resolution.converged,
        fallback: None,
    }
}
