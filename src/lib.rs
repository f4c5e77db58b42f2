/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! # supercell-rs
//!
//! Atomistic supercell construction with thermal displacements, producing the
//! specimen model consumed by electron-scattering image simulations.
//!
//! A unit cell given in fractional coordinates is expanded either by periodic
//! replication or by filling a rectangular box with the tilted crystal.
//! Partially occupied sites are resolved by random sampling, and every atom is
//! displaced according to an Einstein or a phonon-dispersion model whose
//! mean-square statistics are tracked per species across passes.
//!
//! ```no_run
//! use supercell_rs::atoms::UnitCell;
//! use supercell_rs::supercell::{ExpansionContext, SupercellBuilder, SupercellConfig};
//!
//! # fn example(cell: UnitCell) -> Result<(), Box<dyn std::error::Error>> {
//! let builder = SupercellBuilder::new(SupercellConfig {
//!     replicas: [4, 4, 2],
//!     ..Default::default()
//! })?;
//! let mut context = ExpansionContext::seeded(7);
//! let supercell = builder.build(&cell, &mut context)?;
//! println!("{} atoms", supercell.len());
//! # Ok(())
//! # }
//! ```

pub mod atoms;
pub mod cli;
pub mod lattice;
pub mod phonon;
pub mod supercell;
pub mod utils;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
