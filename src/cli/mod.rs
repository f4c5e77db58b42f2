/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Command Line Interface (CLI) module
//!
//! Reads a unit cell and an expansion configuration as JSON, runs the
//! requested number of expansion passes in one context and writes the last
//! supercell with its displacement statistics as JSON.

use crate::atoms::{UnitCell, UnitCellDescription};
use crate::supercell::{
    ExpansionContext, SpeciesCount, SpeciesDisplacement, Supercell, SupercellBuilder,
    SupercellConfig,
};
use anyhow::{bail, Context};
use clap::Parser;
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Build a thermally displaced supercell from a unit cell
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Unit cell JSON file (`basis` rows and fractional `atoms`)
    pub cell: PathBuf,

    /// Expansion configuration JSON file; defaults apply when omitted
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output file; standard output when omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Number of expansion passes; the last supercell is written
    #[arg(short, long, default_value_t = 1)]
    pub passes: u32,

    /// Seed for the random stream, overriding the configuration
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Increase logging (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Log filter implied by `--verbose`
    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            _ => log::LevelFilter::Debug,
        }
    }
}

/// Everything written at the end of a run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub passes: u32,
    pub species: Vec<SpeciesCount>,
    pub displacements: Vec<SpeciesDisplacement>,
    pub supercell: Supercell,
}

/// Read the unit cell description and validate it
pub fn read_unit_cell(path: &Path) -> anyhow::Result<UnitCell> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("cannot read unit cell {}", path.display()))?;
    let description: UnitCellDescription = serde_json::from_str(&text)
        .with_context(|| format!("cannot parse unit cell {}", path.display()))?;
    Ok(UnitCell::from_description(description)?)
}

/// Run the passes described by `args` and return the report
pub fn execute(args: &Args) -> anyhow::Result<RunReport> {
    if args.passes == 0 {
        bail!("at least one pass is required");
    }

    let cell = read_unit_cell(&args.cell)?;
    let mut config = match &args.config {
        Some(path) => SupercellConfig::from_json_file(path)
            .with_context(|| format!("cannot load configuration {}", path.display()))?,
        None => SupercellConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    let mut context = ExpansionContext::new(config.seed);
    let builder = SupercellBuilder::new(config)?;

    let mut supercell = builder.build(&cell, &mut context)?;
    for _ in 1..args.passes {
        supercell = builder.build(&cell, &mut context)?;
    }
    info!("Completed {} passes", context.passes_completed());

    Ok(RunReport {
        passes: context.passes_completed(),
        species: supercell.species_counts(),
        displacements: context.displacement_report(),
        supercell,
    })
}

/// Run and write the report
pub fn run(args: &Args) -> anyhow::Result<()> {
    let report = execute(args)?;
    let json = serde_json::to_string_pretty(&report)?;

    match &args.output {
        Some(path) => fs::write(path, json)
            .with_context(|| format!("cannot write {}", path.display()))?,
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(json.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }
    Ok(())
}
