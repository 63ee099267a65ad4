// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Delve-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Delve and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

use memchr::memmem;
use regex::Regex;
use smol_str::SmolStr;

use super::SolveError;
use crate::model::{
    ContentCatalog, ContentId, ContentKind, GridPoint, Placement, Room, RoomId, Topology,
    ValidationError,
};

/// Room size used when the model carries no `room_width` / `room_height` fact.
pub const DEFAULT_ROOM_SIZE: i32 = 6;

const ANSWER_MARKER: &[u8] = b"Answer:";
const UNSATISFIABLE_MARKER: &[u8] = b"UNSATISFIABLE";
const BLOCK_TERMINATORS: [&[u8]; 2] = [b"\nOptimization:", b"SATISFIABLE"];

fn atom_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^([a-z_][A-Za-z0-9_]*)\(([^()]*)\)$").expect("atom pattern is valid")
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FactParseError {
    MalformedAtom { atom: String },
}

impl fmt::Display for FactParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedAtom { atom } => write!(f, "malformed fact atom `{atom}`"),
        }
    }
}

impl std::error::Error for FactParseError {}

/// Per-room facts gathered from the answer set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct RoomFacts {
    is_spawn: bool,
    is_stairs: bool,
    items: Vec<ContentId>,
    enemies: Vec<ContentId>,
    traps: Vec<ContentId>,
}

/// Structured view of one solver model.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FactModel {
    rooms: BTreeMap<RoomId, RoomFacts>,
    corridors: Vec<(RoomId, RoomId)>,
    widths: BTreeMap<RoomId, i32>,
    heights: BTreeMap<RoomId, i32>,
    xs: BTreeMap<RoomId, i32>,
    ys: BTreeMap<RoomId, i32>,
    content: ContentCatalog,
}

impl FactModel {
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn corridors(&self) -> &[(RoomId, RoomId)] {
        &self.corridors
    }

    /// Builds a validated topology. Rooms without size facts get the default size.
    pub fn to_topology(&self) -> Result<Topology, ValidationError> {
        let rooms = self.rooms.iter().map(|(id, facts)| {
            let width = self.widths.get(id).copied().unwrap_or(DEFAULT_ROOM_SIZE);
            let height = self.heights.get(id).copied().unwrap_or(DEFAULT_ROOM_SIZE);
            Room::new(*id, width, height)
                .with_spawn(facts.is_spawn)
                .with_stairs(facts.is_stairs)
                .with_content(ContentKind::Item, facts.items.clone())
                .with_content(ContentKind::Enemy, facts.enemies.clone())
                .with_content(ContentKind::Trap, facts.traps.clone())
        });
        Topology::new(rooms, self.corridors.clone(), self.content.clone())
    }

    /// Positions from `room_x` / `room_y`; a room with only one coordinate gets 0 for the other.
    pub fn placement(&self) -> Placement {
        self.xs
            .keys()
            .chain(self.ys.keys())
            .map(|id| {
                let x = self.xs.get(id).copied().unwrap_or(0);
                let y = self.ys.get(id).copied().unwrap_or(0);
                (*id, GridPoint::new(x, y))
            })
            .collect()
    }

    fn room_mut(&mut self, id: RoomId) -> &mut RoomFacts {
        self.rooms.entry(id).or_default()
    }

    fn apply(&mut self, atom: &str) -> Result<(), FactParseError> {
        let Some(caps) = atom_pattern().captures(atom) else {
            return Ok(());
        };
        let name = caps.get(1).map_or("", |m| m.as_str());
        let args = caps
            .get(2)
            .map_or("", |m| m.as_str())
            .split(',')
            .map(str::trim)
            .collect::<Vec<_>>();
        let malformed = || FactParseError::MalformedAtom {
            atom: atom.to_owned(),
        };

        match (name, args.as_slice()) {
            ("room", [r]) => {
                self.room_mut(room_id(r).ok_or_else(malformed)?);
            }
            ("corridor", [a, b]) => {
                let a = room_id(a).ok_or_else(malformed)?;
                let b = room_id(b).ok_or_else(malformed)?;
                self.corridors.push((a, b));
            }
            ("is_spawn", [r]) => self.room_mut(room_id(r).ok_or_else(malformed)?).is_spawn = true,
            ("has_stairs", [r]) => {
                self.room_mut(room_id(r).ok_or_else(malformed)?).is_stairs = true
            }
            ("room_width", [r, v]) => {
                let (Some(r), Some(v)) = (room_id(r), int(v)) else {
                    return Err(malformed());
                };
                self.widths.insert(r, v);
            }
            ("room_height", [r, v]) => {
                let (Some(r), Some(v)) = (room_id(r), int(v)) else {
                    return Err(malformed());
                };
                self.heights.insert(r, v);
            }
            ("room_x", [r, v]) => {
                let (Some(r), Some(v)) = (room_id(r), int(v)) else {
                    return Err(malformed());
                };
                self.xs.insert(r, v);
            }
            ("room_y", [r, v]) => {
                let (Some(r), Some(v)) = (room_id(r), int(v)) else {
                    return Err(malformed());
                };
                self.ys.insert(r, v);
            }
            ("item_in" | "enemy_in" | "trap_in", [c, r]) => {
                let (Some(c), Some(r)) = (content_id(c), room_id(r)) else {
                    return Err(malformed());
                };
                let facts = self.room_mut(r);
                match name {
                    "item_in" => facts.items.push(c),
                    "enemy_in" => facts.enemies.push(c),
                    _ => facts.traps.push(c),
                }
            }
            ("item_is" | "enemy_is" | "trap_is", [c, type_name]) => {
                let c = content_id(c).ok_or_else(malformed)?;
                if type_name.is_empty() {
                    return Err(malformed());
                }
                let kind = match name {
                    "item_is" => ContentKind::Item,
                    "enemy_is" => ContentKind::Enemy,
                    _ => ContentKind::Trap,
                };
                self.content.insert(kind, c, SmolStr::new(type_name));
            }
            (
                "room" | "corridor" | "is_spawn" | "has_stairs" | "room_width" | "room_height"
                | "room_x" | "room_y" | "item_in" | "enemy_in" | "trap_in" | "item_is"
                | "enemy_is" | "trap_is",
                _,
            ) => return Err(malformed()),
            _ => {}
        }
        Ok(())
    }
}

fn room_id(raw: &str) -> Option<RoomId> {
    raw.parse().ok()
}

fn content_id(raw: &str) -> Option<ContentId> {
    raw.parse().ok()
}

fn int(raw: &str) -> Option<i32> {
    raw.parse().ok()
}

/// Returns the text of the last model in `output`, or `None` when there is no model.
pub fn answer_block(output: &str) -> Option<&str> {
    let bytes = output.as_bytes();
    if memmem::find(bytes, UNSATISFIABLE_MARKER).is_some() {
        return None;
    }

    let marker = memmem::rfind(bytes, ANSWER_MARKER)?;
    // The atoms start on the line after `Answer: N`.
    let start = match memchr::memchr(b'\n', &bytes[marker..]) {
        Some(offset) => marker + offset + 1,
        None => bytes.len(),
    };

    let rest = &bytes[start..];
    let end = BLOCK_TERMINATORS
        .iter()
        .filter_map(|needle| memmem::find(rest, needle))
        .min()
        .unwrap_or(rest.len());

    Some(&output[start..start + end])
}

/// Parses solver text into a [`FactModel`]. Unknown atoms are ignored.
pub fn parse_solver_output(output: &str) -> Result<FactModel, SolveError> {
    let block = answer_block(output).ok_or(SolveError::NoModel)?;
    let mut model = FactModel::default();
    for atom in block.split_whitespace() {
        model.apply(atom)?;
    }
    Ok(model)
}

fn push_fact(out: &mut String, name: &str, args: &[i64]) {
    let mut buf = itoa::Buffer::new();
    out.push_str(name);
    out.push('(');
    for (idx, arg) in args.iter().enumerate() {
        if idx > 0 {
            out.push(',');
        }
        out.push_str(buf.format(*arg));
    }
    out.push_str(").\n");
}

fn push_const(out: &mut String, name: &str, value: i64) {
    let mut buf = itoa::Buffer::new();
    out.push_str("#const ");
    out.push_str(name);
    out.push_str(" = ");
    out.push_str(buf.format(value));
    out.push_str(".\n");
}

/// Upper coordinate bound handed to the placement program: `Σ(max(w, h) + min_gap)`.
pub fn placement_bound(topology: &Topology, min_gap: i32) -> i64 {
    topology
        .rooms()
        .values()
        .map(|room| i64::from(room.width().max(room.height()) + min_gap))
        .sum()
}

/// Input facts for constraint-solved placement.
pub fn placement_facts(topology: &Topology, min_gap: i32) -> String {
    let bound = placement_bound(topology, min_gap);
    let mut out = String::new();
    push_const(&mut out, "bound_x", bound);
    push_const(&mut out, "bound_y", bound);
    push_const(&mut out, "min_gap", i64::from(min_gap));

    for room in topology.rooms().values() {
        let id = i64::from(room.id().get());
        push_fact(&mut out, "room", &[id]);
        push_fact(&mut out, "room_w", &[id, i64::from(room.width())]);
        push_fact(&mut out, "room_h", &[id, i64::from(room.height())]);
    }
    for (a, b) in topology.connections() {
        push_fact(&mut out, "connection", &[i64::from(a.get()), i64::from(b.get())]);
    }
    out
}
