// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Delve-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Delve and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Delve CLI entrypoint.
//!
//! Reads a topology (JSON document, captured solver output, a live solver
//! process, or the built-in demo floor), runs the pipeline, and prints the tile
//! grid, a floor summary, or a JSON document.

use std::error::Error;
use std::time::Duration;

use delve::layout::PlacementMode;
use delve::model::{fixtures, DungeonDocument, PlacedDungeon, Topology, TopologyDocument};
use delve::render::{floor_summary, legend, to_trimmed_string, RenderMode, RenderOptions};
use delve::route::FallbackSearch;
use delve::solver::{
    CapturedOutput, FixedTopology, PositionSource, ProcessSolver, SolveError, TopologySource,
};
use delve::{Pipeline, PipelineConfig, PipelineError};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} <topology.json> [options]\n  {program} --demo [options]\n  {program} --facts <answer.txt> [options]\n  {program} --solver <command line> [options]\n  {program} --schema\n\nOptions:\n  --seed <u64>               fixed layout seed (batch item i uses seed + i)\n  --min-gap <n>              minimum empty tiles between rooms (default 2)\n  --walled                   draw a wall ring around each room\n  --l-corridors              use L-shaped corridors instead of A* when the straight line is blocked\n  --place-with <command>     constraint-solved placement through a solver reading facts on stdin\n  --solver-timeout-ms <ms>   wall-clock limit for each solver run (default 10000)\n  --batch <n>                generate n dungeons in parallel\n  --json                     print the placed dungeon as JSON\n  --summary                  print a floor summary below the grid\n\nExactly one topology source is required. --schema prints the JSON schema of the\ntopology document. Log output goes to stderr and honors RUST_LOG."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    input: Option<String>,
    demo: bool,
    facts: Option<String>,
    solver: Option<String>,
    place_with: Option<String>,
    solver_timeout_ms: Option<u64>,
    seed: Option<u64>,
    min_gap: Option<i32>,
    walled: bool,
    l_corridors: bool,
    json: bool,
    summary: bool,
    schema: bool,
    batch: Option<usize>,
}

fn set_once<T>(slot: &mut Option<T>, value: T) -> Result<(), ()> {
    if slot.is_some() {
        return Err(());
    }
    *slot = Some(value);
    Ok(())
}

fn set_flag(slot: &mut bool) -> Result<(), ()> {
    if *slot {
        return Err(());
    }
    *slot = true;
    Ok(())
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--demo" => set_flag(&mut options.demo)?,
            "--walled" => set_flag(&mut options.walled)?,
            "--l-corridors" => set_flag(&mut options.l_corridors)?,
            "--json" => set_flag(&mut options.json)?,
            "--summary" => set_flag(&mut options.summary)?,
            "--schema" => set_flag(&mut options.schema)?,
            "--facts" => set_once(&mut options.facts, args.next().ok_or(())?)?,
            "--solver" => set_once(&mut options.solver, args.next().ok_or(())?)?,
            "--place-with" => set_once(&mut options.place_with, args.next().ok_or(())?)?,
            "--solver-timeout-ms" => {
                let raw = args.next().ok_or(())?;
                let ms: u64 = raw.parse().map_err(|_| ())?;
                set_once(&mut options.solver_timeout_ms, ms)?;
            }
            "--seed" => {
                let raw = args.next().ok_or(())?;
                let seed: u64 = raw.parse().map_err(|_| ())?;
                set_once(&mut options.seed, seed)?;
            }
            "--min-gap" => {
                let raw = args.next().ok_or(())?;
                let gap: i32 = raw.parse().map_err(|_| ())?;
                if gap < 0 {
                    return Err(());
                }
                set_once(&mut options.min_gap, gap)?;
            }
            "--batch" => {
                let raw = args.next().ok_or(())?;
                let count: usize = raw.parse().map_err(|_| ())?;
                if count == 0 {
                    return Err(());
                }
                set_once(&mut options.batch, count)?;
            }
            _ if arg.starts_with('-') => return Err(()),
            _ => set_once(&mut options.input, arg)?,
        }
    }

    let sources = [
        options.input.is_some(),
        options.demo,
        options.facts.is_some(),
        options.solver.is_some(),
    ]
    .into_iter()
    .filter(|set| *set)
    .count();

    if options.schema {
        return if sources == 0 { Ok(options) } else { Err(()) };
    }

    if sources != 1 {
        return Err(());
    }

    if options.batch.is_some() && options.place_with.is_some() {
        return Err(());
    }

    Ok(options)
}

/// Where each pipeline run gets its topology.
#[derive(Debug, Clone)]
enum InputSource {
    Fixed(FixedTopology),
    Captured(CapturedOutput),
    Process(ProcessSolver),
}

impl TopologySource for InputSource {
    fn topology(&mut self) -> Result<Topology, SolveError> {
        match self {
            Self::Fixed(source) => source.topology(),
            Self::Captured(source) => source.topology(),
            Self::Process(source) => source.topology(),
        }
    }
}

fn solver_from(command: &str, timeout: Duration) -> Result<ProcessSolver, Box<dyn Error>> {
    let solver = ProcessSolver::from_command_line(command)
        .ok_or_else(|| format!("empty solver command line: {command:?}"))?;
    Ok(solver.with_timeout(timeout))
}

fn input_source(options: &CliOptions, timeout: Duration) -> Result<InputSource, Box<dyn Error>> {
    if let Some(path) = &options.input {
        let raw = std::fs::read_to_string(path)?;
        let document: TopologyDocument = serde_json::from_str(&raw)?;
        let topology = Topology::try_from(document)?;
        return Ok(InputSource::Fixed(FixedTopology(topology)));
    }
    if let Some(path) = &options.facts {
        let raw = std::fs::read_to_string(path)?;
        return Ok(InputSource::Captured(CapturedOutput(raw)));
    }
    if let Some(command) = &options.solver {
        return Ok(InputSource::Process(solver_from(command, timeout)?));
    }
    Ok(InputSource::Fixed(FixedTopology(fixtures::demo_floor())))
}

fn pipeline_config(options: &CliOptions) -> PipelineConfig {
    let mode = if options.walled {
        RenderMode::Walled
    } else {
        RenderMode::Open
    };
    let fallback = if options.l_corridors {
        FallbackSearch::LShaped
    } else {
        FallbackSearch::AStar
    };
    let placement = if options.place_with.is_some() {
        PlacementMode::ConstraintSolved
    } else {
        PlacementMode::ForceDirected
    };

    let mut config = PipelineConfig::default()
        .with_seed(options.seed)
        .with_fallback(fallback)
        .with_placement(placement)
        .with_render(Some(RenderOptions::default().with_mode(mode)));
    if let Some(min_gap) = options.min_gap {
        config = config.with_min_gap(min_gap);
    }
    config
}

fn print_text(dungeon: &PlacedDungeon, summary: bool) {
    if let Some(grid) = dungeon.grid() {
        println!("{}", to_trimmed_string(grid));
        println!();
        println!("Legend: {}", legend());
    }
    if summary {
        println!();
        print!("{}", floor_summary(dungeon));
    }
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "delve".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "warn,delve=info".into()),
            )
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();

        if options.schema {
            let schema = schemars::schema_for!(TopologyDocument);
            println!("{}", serde_json::to_string_pretty(&schema)?);
            return Ok(());
        }

        let timeout = options
            .solver_timeout_ms
            .map_or(delve::solver::DEFAULT_SOLVER_TIMEOUT, Duration::from_millis);
        let mut source = input_source(&options, timeout)?;
        let pipeline = Pipeline::new(pipeline_config(&options));

        if let Some(count) = options.batch {
            let results = pipeline.generate_batch(&source, count);
            let mut documents = Vec::with_capacity(count);
            let mut failed = 0usize;
            for (index, result) in results.iter().enumerate() {
                match result {
                    Ok(dungeon) if options.json => documents.push(DungeonDocument::from(dungeon)),
                    Ok(dungeon) => {
                        println!("=== Dungeon {index} ===");
                        print_text(dungeon, options.summary);
                        println!();
                    }
                    Err(err) => {
                        failed += 1;
                        eprintln!("delve: dungeon {index}: {err}");
                    }
                }
            }
            if options.json {
                println!("{}", serde_json::to_string_pretty(&documents)?);
            }
            if failed > 0 {
                return Err(format!("{failed} of {count} dungeons failed").into());
            }
            return Ok(());
        }

        let mut place_with = options
            .place_with
            .as_deref()
            .map(|command| solver_from(command, timeout))
            .transpose()?;
        let positions = place_with
            .as_mut()
            .map(|solver| solver as &mut dyn PositionSource);

        let dungeon = match pipeline.generate(&mut source, positions) {
            Ok(dungeon) => dungeon,
            Err(PipelineError::Solve(SolveError::NoModel)) => {
                return Err("no dungeon: the topology solver found no model".into());
            }
            Err(err) => return Err(err.into()),
        };

        if options.json {
            println!("{}", serde_json::to_string_pretty(&DungeonDocument::from(&dungeon))?);
        } else {
            print_text(&dungeon, options.summary);
        }

        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("delve: {err}");
        std::process::exit(1);
    }
}
