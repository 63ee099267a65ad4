// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Delve-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Delve and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::model::{GridPoint, Placement, RoomId, Topology};

pub const DEFAULT_LAYOUT_ITERATIONS: usize = 100;
pub const DEFAULT_SPRING_K: f64 = 2.0;

/// Multiplier applied to `(average room dimension + min gap)` when projecting to tiles.
pub const TILE_SCALE_FACTOR: f64 = 2.5;

const MIN_DISTANCE: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutOptions {
    pub iterations: usize,
    /// Optimal edge length of the spring model, in unit-square space.
    pub spring_k: f64,
    /// Fixed seed for reproducible layouts. `None` draws a fresh seed per call.
    pub seed: Option<u64>,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_LAYOUT_ITERATIONS,
            spring_k: DEFAULT_SPRING_K,
            seed: None,
        }
    }
}

impl LayoutOptions {
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_spring_k(mut self, spring_k: f64) -> Self {
        self.spring_k = spring_k;
        self
    }
}

/// Fruchterman-Reingold style spring embedding.
///
/// Every node pair repels with `k² / d`, every edge attracts with `d² / k`, and the
/// step size cools linearly to zero over the iteration budget. The result is
/// centered and rescaled so the largest coordinate magnitude is 1.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GraphLayoutEngine {
    options: LayoutOptions,
}

impl GraphLayoutEngine {
    pub fn new(options: LayoutOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> LayoutOptions {
        self.options
    }

    /// Embeds `nodes` in continuous 2D space. Edges naming unknown nodes are ignored.
    pub fn embed(
        &self,
        nodes: &[RoomId],
        edges: &[(RoomId, RoomId)],
    ) -> BTreeMap<RoomId, (f64, f64)> {
        match nodes.len() {
            0 => return BTreeMap::new(),
            1 => return BTreeMap::from([(nodes[0], (0.0, 0.0))]),
            _ => {}
        }

        let index = nodes
            .iter()
            .enumerate()
            .map(|(idx, id)| (*id, idx))
            .collect::<BTreeMap<_, _>>();
        let n = nodes.len();

        let mut adjacency = vec![false; n * n];
        for (a, b) in edges {
            let (Some(&i), Some(&j)) = (index.get(a), index.get(b)) else {
                continue;
            };
            if i != j {
                adjacency[i * n + j] = true;
                adjacency[j * n + i] = true;
            }
        }

        let mut rng = match self.options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let mut pos = (0..n)
            .map(|_| (rng.random::<f64>(), rng.random::<f64>()))
            .collect::<Vec<_>>();

        let k = self.options.spring_k;
        let mut temperature = initial_temperature(&pos);
        let cooling = temperature / (self.options.iterations as f64 + 1.0);
        let mut displacement = vec![(0.0f64, 0.0f64); n];

        for _ in 0..self.options.iterations {
            for (i, disp) in displacement.iter_mut().enumerate() {
                let (mut fx, mut fy) = (0.0, 0.0);
                for j in 0..n {
                    if i == j {
                        continue;
                    }
                    let dx = pos[i].0 - pos[j].0;
                    let dy = pos[i].1 - pos[j].1;
                    let distance = (dx * dx + dy * dy).sqrt().max(MIN_DISTANCE);
                    let attraction = if adjacency[i * n + j] { distance / k } else { 0.0 };
                    let magnitude = k * k / (distance * distance) - attraction;
                    fx += dx * magnitude;
                    fy += dy * magnitude;
                }
                *disp = (fx, fy);
            }

            for (p, (fx, fy)) in pos.iter_mut().zip(&displacement) {
                let length = (fx * fx + fy * fy).sqrt().max(MIN_DISTANCE);
                p.0 += fx * temperature / length;
                p.1 += fy * temperature / length;
            }

            temperature -= cooling;
        }

        rescale_unit(&mut pos);

        nodes.iter().copied().zip(pos).collect()
    }
}

fn span(values: impl Iterator<Item = f64>) -> f64 {
    let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    hi - lo
}

// One tenth of the initial spread, cooled linearly to zero.
fn initial_temperature(pos: &[(f64, f64)]) -> f64 {
    let span_x = span(pos.iter().map(|p| p.0));
    let span_y = span(pos.iter().map(|p| p.1));
    span_x.max(span_y) * 0.1
}

fn rescale_unit(pos: &mut [(f64, f64)]) {
    let n = pos.len() as f64;
    let mean_x = pos.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = pos.iter().map(|p| p.1).sum::<f64>() / n;
    for p in pos.iter_mut() {
        p.0 -= mean_x;
        p.1 -= mean_y;
    }

    let limit = pos
        .iter()
        .map(|p| p.0.abs().max(p.1.abs()))
        .fold(0.0f64, f64::max);
    if limit > 0.0 {
        for p in pos.iter_mut() {
            p.0 /= limit;
            p.1 /= limit;
        }
    }
}

/// Tile-space scale: `(average room dimension + min_gap) * 2.5`.
pub fn tile_scale(topology: &Topology, min_gap: i32) -> f64 {
    (topology.average_room_dimension() + f64::from(min_gap)) * TILE_SCALE_FACTOR
}

/// Translates coordinates so their minimum sits at the origin, then scales and
/// truncates them to integer tile positions.
pub fn project_to_tiles(coords: &BTreeMap<RoomId, (f64, f64)>, scale: f64) -> Placement {
    let min_x = coords.values().map(|c| c.0).fold(f64::INFINITY, f64::min);
    let min_y = coords.values().map(|c| c.1).fold(f64::INFINITY, f64::min);

    coords
        .iter()
        .map(|(id, (x, y))| {
            let tx = ((x - min_x) * scale) as i32;
            let ty = ((y - min_y) * scale) as i32;
            (*id, GridPoint::new(tx, ty))
        })
        .collect()
}

/// Embeds the topology graph and projects it into tile space.
///
/// Rooms may still overlap afterwards; isolated rooms in particular get no
/// special treatment here.
pub fn embed_topology(topology: &Topology, min_gap: i32, options: LayoutOptions) -> Placement {
    let nodes = topology.rooms().keys().copied().collect::<Vec<_>>();
    let coords = GraphLayoutEngine::new(options).embed(&nodes, topology.connections());
    let scale = tile_scale(topology, min_gap);
    tracing::debug!(
        rooms = nodes.len(),
        connections = topology.connections().len(),
        iterations = options.iterations,
        scale,
        "force layout embedded"
    );
    project_to_tiles(&coords, scale)
}
