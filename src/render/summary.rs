// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Delve-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Delve and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::{ContentKind, PlacedDungeon, PlacedRoom};

fn room_line(room: &PlacedRoom) -> String {
    format!(
        "Room {} @ ({},{}) {}x{}",
        room.id(),
        room.x(),
        room.y(),
        room.room().width(),
        room.room().height()
    )
}

/// Human-readable floor report: counts, spawn and stairs, then every room with
/// its content type names. Unknown content ids print as `?`.
pub fn floor_summary(dungeon: &PlacedDungeon) -> String {
    let rooms = dungeon.rooms();
    let mut lines = vec![
        "FLOOR SUMMARY".to_owned(),
        format!("Size: {}x{}", dungeon.width(), dungeon.height()),
        format!("Rooms: {}", rooms.len()),
        format!("Corridors: {}", dungeon.corridors().len()),
    ];

    if let Some(spawn) = rooms.values().find(|r| r.room().is_spawn()) {
        lines.push(format!("Spawn: {}", room_line(spawn)));
    }
    if let Some(stairs) = rooms.values().find(|r| r.room().is_stairs()) {
        lines.push(format!("Stairs: {}", room_line(stairs)));
    }

    lines.push(String::new());
    lines.push("Room positions:".to_owned());
    for placed in rooms.values() {
        let mut line = format!("  {}", room_line(placed));
        if placed.room().is_spawn() {
            line.push_str(" SPAWN");
        }
        if placed.room().is_stairs() {
            line.push_str(" STAIRS");
        }
        lines.push(line);

        for kind in ContentKind::ALL {
            for id in placed.room().content(kind) {
                let name = dungeon.content().type_name(kind, *id).unwrap_or("?");
                lines.push(format!("    - {}: {name}", kind.label()));
            }
        }
    }

    if !dungeon.corridors().is_empty() {
        lines.push(String::new());
        lines.push("Connections:".to_owned());
        for path in dungeon.corridors() {
            lines.push(format!(
                "  Room {} <-> Room {} ({}, {} cells)",
                path.from(),
                path.to(),
                path.kind().as_str(),
                path.cells().len()
            ));
        }
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
