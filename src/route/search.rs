// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Delve-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Delve and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use smallvec::SmallVec;

use crate::model::{GridPoint, Rect, RoomId};

/// Fixed-point factor for the Euclidean heuristic so heap keys stay integral.
const HEURISTIC_SCALE: u64 = 1024;

const NO_PARENT: i32 = -1;

/// Rectangular routing area anchored at the origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoutingGrid {
    width: usize,
    height: usize,
}

impl RoutingGrid {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn len(&self) -> usize {
        self.width.saturating_mul(self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, point: GridPoint) -> bool {
        self.idx_of(point).is_some()
    }

    pub fn idx_of(&self, point: GridPoint) -> Option<usize> {
        if point.x() < 0 || point.y() < 0 {
            return None;
        }
        let (x, y) = (point.x() as usize, point.y() as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y * self.width + x)
    }

    pub fn point_of(&self, idx: usize) -> GridPoint {
        let x = (idx % self.width) as i32;
        let y = (idx / self.width) as i32;
        GridPoint::new(x, y)
    }

    fn neighbors(&self, point: GridPoint) -> SmallVec<[(GridPoint, usize); 4]> {
        [(0, 1), (0, -1), (1, 0), (-1, 0)]
            .into_iter()
            .filter_map(|(dx, dy)| {
                let next = point.offset(dx, dy);
                self.idx_of(next).map(|idx| (next, idx))
            })
            .collect()
    }
}

/// Which room owns each tile of the routing grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occupancy {
    grid: RoutingGrid,
    owners: Vec<Option<RoomId>>,
}

impl Occupancy {
    /// Marks every footprint tile. Where rooms still overlap, the later room wins.
    pub fn new(grid: RoutingGrid, rooms: impl IntoIterator<Item = (RoomId, Rect)>) -> Self {
        let mut owners = vec![None; grid.len()];
        for (id, rect) in rooms {
            for cell in rect.cells() {
                if let Some(idx) = grid.idx_of(cell) {
                    owners[idx] = Some(id);
                }
            }
        }
        Self { grid, owners }
    }

    pub fn grid(&self) -> RoutingGrid {
        self.grid
    }

    pub fn owner(&self, point: GridPoint) -> Option<RoomId> {
        self.grid.idx_of(point).and_then(|idx| self.owners[idx])
    }

    /// In bounds, and either background or one of the two endpoint rooms.
    pub fn is_walkable(&self, point: GridPoint, endpoints: (RoomId, RoomId)) -> bool {
        match self.grid.idx_of(point) {
            Some(idx) => match self.owners[idx] {
                None => true,
                Some(owner) => owner == endpoints.0 || owner == endpoints.1,
            },
            None => false,
        }
    }
}

/// Reusable buffers for repeated searches over the same grid.
///
/// Entries are stamped with a generation counter, so starting a new search does
/// not clear the arrays.
#[derive(Debug, Default)]
pub struct SearchScratch {
    grid: Option<RoutingGrid>,
    gen: u32,
    dist_gen: Vec<u32>,
    dist_cost: Vec<u32>,
    closed_gen: Vec<u32>,
    came_from: Vec<i32>,
    heap: BinaryHeap<Reverse<(u64, u64, u32)>>,
    path: Vec<GridPoint>,
}

impl SearchScratch {
    fn configure(&mut self, grid: RoutingGrid) {
        if self.grid == Some(grid) {
            return;
        }
        let len = grid.len();
        self.grid = Some(grid);
        self.gen = 0;
        self.dist_gen = vec![0; len];
        self.dist_cost = vec![0; len];
        self.closed_gen = vec![0; len];
        self.came_from = vec![NO_PARENT; len];
        self.heap.reserve(len.min(4096).saturating_sub(self.heap.len()));
    }

    fn begin(&mut self) -> u32 {
        self.gen = self.gen.wrapping_add(1);
        if self.gen == 0 {
            self.dist_gen.fill(0);
            self.closed_gen.fill(0);
            self.gen = 1;
        }
        self.heap.clear();
        self.gen
    }

    fn dist(&self, idx: usize, gen: u32) -> u32 {
        if self.dist_gen[idx] == gen {
            self.dist_cost[idx]
        } else {
            u32::MAX
        }
    }

    fn set_dist(&mut self, idx: usize, gen: u32, cost: u32, came_from: i32) {
        self.dist_gen[idx] = gen;
        self.dist_cost[idx] = cost;
        self.came_from[idx] = came_from;
    }

    /// Closes `idx`; returns false if it was already closed in this generation.
    fn close(&mut self, idx: usize, gen: u32) -> bool {
        if self.closed_gen[idx] == gen {
            return false;
        }
        self.closed_gen[idx] = gen;
        true
    }
}

fn heuristic(from: GridPoint, goal: GridPoint) -> u64 {
    let dx = f64::from(from.x() - goal.x());
    let dy = f64::from(from.y() - goal.y());
    ((dx * dx + dy * dy).sqrt() * HEURISTIC_SCALE as f64) as u64
}

/// 4-connected A* with unit step cost and a Euclidean heuristic.
///
/// Only tiles walkable for `endpoints` are entered; `start` and `goal` are
/// always treated as walkable. Equal heap keys pop in insertion order. Returns
/// `None` when the goal is unreachable or either point is off the grid.
pub fn astar<'a>(
    start: GridPoint,
    goal: GridPoint,
    occupancy: &Occupancy,
    endpoints: (RoomId, RoomId),
    scratch: &'a mut SearchScratch,
) -> Option<&'a [GridPoint]> {
    let grid = occupancy.grid();
    let start_idx = grid.idx_of(start)?;
    let goal_idx = grid.idx_of(goal)?;
    scratch.configure(grid);

    if start == goal {
        scratch.path.clear();
        scratch.path.push(start);
        return Some(&scratch.path);
    }

    let gen = scratch.begin();
    let mut seq = 0u64;
    scratch.set_dist(start_idx, gen, 0, NO_PARENT);
    scratch
        .heap
        .push(Reverse((heuristic(start, goal), seq, start_idx as u32)));

    while let Some(Reverse((_, _, idx))) = scratch.heap.pop() {
        let idx = idx as usize;
        if !scratch.close(idx, gen) {
            continue;
        }
        if idx == goal_idx {
            return reconstruct(grid, start_idx, goal_idx, scratch);
        }

        let current = grid.point_of(idx);
        let cost = scratch.dist(idx, gen).saturating_add(1);
        for (next, next_idx) in grid.neighbors(current) {
            let forced = next == start || next == goal;
            if !forced && !occupancy.is_walkable(next, endpoints) {
                continue;
            }
            if cost < scratch.dist(next_idx, gen) {
                scratch.set_dist(next_idx, gen, cost, idx as i32);
                seq += 1;
                let f = u64::from(cost) * HEURISTIC_SCALE + heuristic(next, goal);
                scratch.heap.push(Reverse((f, seq, next_idx as u32)));
            }
        }
    }

    None
}

fn reconstruct(
    grid: RoutingGrid,
    start_idx: usize,
    goal_idx: usize,
    scratch: &mut SearchScratch,
) -> Option<&[GridPoint]> {
    scratch.path.clear();
    scratch.path.push(grid.point_of(goal_idx));

    let mut cursor = goal_idx;
    while cursor != start_idx {
        let prev = scratch.came_from[cursor];
        if prev < 0 {
            return None;
        }
        cursor = prev as usize;
        scratch.path.push(grid.point_of(cursor));
    }

    scratch.path.reverse();
    Some(&scratch.path)
}
