// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Delve-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Delve and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Adapter for the external constraint solver.
//!
//! The spatial pipeline only ever sees a structured [`Topology`] or [`Placement`].
//! Everything about the solver's text output (answer blocks, fact atoms) stays in
//! this module. "No model" is reported as [`SolveError::NoModel`], distinct from
//! timeouts, process failures, and malformed output.

use std::fmt;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crate::model::{Placement, Topology, ValidationError};

pub mod facts;
pub mod process;

pub use facts::{parse_solver_output, placement_facts, FactModel, FactParseError};
pub use process::{ProcessSolver, DEFAULT_SOLVER_TIMEOUT};

/// Produces the abstract room graph for one pipeline invocation.
pub trait TopologySource {
    fn topology(&mut self) -> Result<Topology, SolveError>;
}

/// Produces exact room positions for a topology (constraint-solved placement).
pub trait PositionSource {
    fn positions(&mut self, topology: &Topology, min_gap: i32) -> Result<Placement, SolveError>;
}

/// A topology that is already known, e.g. loaded from a JSON document.
#[derive(Debug, Clone)]
pub struct FixedTopology(pub Topology);

impl TopologySource for FixedTopology {
    fn topology(&mut self) -> Result<Topology, SolveError> {
        Ok(self.0.clone())
    }
}

/// Solver output captured earlier (for example `clingo ... > answer.txt`).
#[derive(Debug, Clone)]
pub struct CapturedOutput(pub String);

impl TopologySource for CapturedOutput {
    fn topology(&mut self) -> Result<Topology, SolveError> {
        let model = parse_solver_output(&self.0)?;
        model.to_topology().map_err(SolveError::Invalid)
    }
}

impl PositionSource for CapturedOutput {
    fn positions(&mut self, _topology: &Topology, _min_gap: i32) -> Result<Placement, SolveError> {
        let model = parse_solver_output(&self.0)?;
        let placement = model.placement();
        if placement.is_empty() {
            return Err(SolveError::NoPositions);
        }
        Ok(placement)
    }
}

#[derive(Debug)]
pub enum SolveError {
    /// The solver finished without a model ("no solution").
    NoModel,
    /// A model was found but it carries no `room_x` / `room_y` facts.
    NoPositions,
    Timeout {
        limit: Duration,
    },
    Spawn {
        program: PathBuf,
        source: io::Error,
    },
    Io(io::Error),
    Parse(FactParseError),
    Invalid(ValidationError),
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoModel => f.write_str("solver found no model"),
            Self::NoPositions => f.write_str("solver model has no room positions"),
            Self::Timeout { limit } => {
                write!(f, "solver did not finish within {}ms", limit.as_millis())
            }
            Self::Spawn { program, source } => {
                write!(f, "cannot start solver {program:?}: {source}")
            }
            Self::Io(source) => write!(f, "solver io error: {source}"),
            Self::Parse(source) => write!(f, "cannot parse solver output: {source}"),
            Self::Invalid(source) => write!(f, "solver produced an invalid topology: {source}"),
        }
    }
}

impl std::error::Error for SolveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Spawn { source, .. } => Some(source),
            Self::Io(source) => Some(source),
            Self::Parse(source) => Some(source),
            Self::Invalid(source) => Some(source),
            Self::NoModel | Self::NoPositions | Self::Timeout { .. } => None,
        }
    }
}

impl From<FactParseError> for SolveError {
    fn from(source: FactParseError) -> Self {
        Self::Parse(source)
    }
}

#[cfg(test)]
mod tests {
    use super::{CapturedOutput, PositionSource, SolveError, TopologySource};
    use crate::model::{fixtures, GridPoint, RoomId};

    #[test]
    fn captured_output_yields_topology() {
        let mut source = CapturedOutput(
            "Answer: 1\nroom(0) room(1) corridor(0,1) is_spawn(0)\nSATISFIABLE\n".to_owned(),
        );
        let topology = source.topology().expect("topology");
        assert_eq!(topology.rooms().len(), 2);
        assert!(topology.room(RoomId::new(0)).expect("room 0").is_spawn());
    }

    #[test]
    fn unsatisfiable_output_is_the_distinct_no_model_signal() {
        let mut source = CapturedOutput("UNSATISFIABLE\n".to_owned());
        assert!(matches!(source.topology(), Err(SolveError::NoModel)));
    }

    #[test]
    fn captured_positions_require_position_facts() {
        let topology = fixtures::two_rooms();

        let mut without = CapturedOutput("Answer: 1\nroom(0) room(1)\nSATISFIABLE".to_owned());
        assert!(matches!(without.positions(&topology, 2), Err(SolveError::NoPositions)));

        let mut with = CapturedOutput(
            "Answer: 1\nroom_x(0,0) room_y(0,0) room_x(1,8) room_y(1,3)\nSATISFIABLE".to_owned(),
        );
        let placement = with.positions(&topology, 2).expect("positions");
        assert_eq!(placement.position(RoomId::new(1)), Some(GridPoint::new(8, 3)));
    }
}
