// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Delve-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Delve and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::io;
use std::path::PathBuf;
use std::process::{Output, Stdio};
use std::time::Duration;

use tokio::io::AsyncWriteExt;
use tokio::process::{Child, ChildStdin, Command};

use super::facts::{parse_solver_output, placement_facts};
use super::{PositionSource, SolveError, TopologySource};
use crate::model::{Placement, Topology};

pub const DEFAULT_SOLVER_TIMEOUT: Duration = Duration::from_secs(10);

/// Runs an external solver as a child process with a hard wall-clock limit.
///
/// Stdout and stderr are captured and concatenated. The exit status is not
/// inspected: answer-set solvers report satisfiability through their exit code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessSolver {
    program: PathBuf,
    args: Vec<String>,
    timeout: Duration,
}

impl ProcessSolver {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            timeout: DEFAULT_SOLVER_TIMEOUT,
        }
    }

    /// Splits a command line on whitespace: the first word is the program.
    pub fn from_command_line(command: &str) -> Option<Self> {
        let mut words = command.split_whitespace();
        let program = words.next()?;
        Some(Self::new(program).with_args(words))
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn program(&self) -> &PathBuf {
        &self.program
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Runs the solver, feeding `input` on stdin when given.
    ///
    /// The child is killed when the limit elapses.
    pub async fn run_async(&self, input: Option<&str>) -> Result<String, SolveError> {
        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .stdin(if input.is_some() { Stdio::piped() } else { Stdio::null() })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut child = command.spawn().map_err(|source| SolveError::Spawn {
            program: self.program.clone(),
            source,
        })?;

        let stdin = child.stdin.take();
        let interaction = feed_and_wait(child, stdin, input);

        let output = match tokio::time::timeout(self.timeout, interaction).await {
            Ok(result) => result.map_err(SolveError::Io)?,
            Err(_) => {
                tracing::warn!(
                    program = %self.program.display(),
                    limit_ms = self.timeout.as_millis() as u64,
                    "solver timed out"
                );
                return Err(SolveError::Timeout {
                    limit: self.timeout,
                });
            }
        };

        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&output.stderr));
        tracing::debug!(
            program = %self.program.display(),
            status = ?output.status.code(),
            bytes = text.len(),
            "solver finished"
        );
        Ok(text)
    }

    /// Blocking wrapper over [`ProcessSolver::run_async`] on a private current-thread runtime.
    pub fn run(&self, input: Option<&str>) -> Result<String, SolveError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(SolveError::Io)?;
        runtime.block_on(self.run_async(input))
    }
}

async fn feed_and_wait(
    child: Child,
    stdin: Option<ChildStdin>,
    input: Option<&str>,
) -> io::Result<Output> {
    if let (Some(mut stdin), Some(input)) = (stdin, input) {
        stdin.write_all(input.as_bytes()).await?;
        // Dropping stdin closes the pipe so the solver sees EOF.
    }
    child.wait_with_output().await
}

impl TopologySource for ProcessSolver {
    fn topology(&mut self) -> Result<Topology, SolveError> {
        let output = self.run(None)?;
        let model = parse_solver_output(&output)?;
        model.to_topology().map_err(SolveError::Invalid)
    }
}

impl PositionSource for ProcessSolver {
    fn positions(&mut self, topology: &Topology, min_gap: i32) -> Result<Placement, SolveError> {
        let facts = placement_facts(topology, min_gap);
        let output = self.run(Some(&facts))?;
        let placement = parse_solver_output(&output)?.placement();
        if placement.is_empty() {
            return Err(SolveError::NoPositions);
        }
        Ok(placement)
    }
}
