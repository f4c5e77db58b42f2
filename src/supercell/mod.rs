/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Supercell construction
//!
//! A [`SupercellBuilder`] expands a [`UnitCell`](crate::atoms::UnitCell) either
//! by periodic replication or by filling a rectangular box with the tilted
//! crystal. Partial occupancies are resolved by random sampling and every
//! emitted atom receives a thermal displacement from the configured model.
//! The random stream and the displacement statistics live in an
//! [`ExpansionContext`] owned by the caller.

mod builder;
mod config;
mod context;
mod errors;
mod occupancy;
mod output;
mod replicate;
mod tilt_box;

pub use builder::SupercellBuilder;
pub use config::{ExpansionMode, OccupancySampling, SupercellConfig, VibrationModel};
pub use context::{ExpansionContext, SpeciesDisplacement};
pub use errors::{ErrorKind, Result, SupercellError};
pub use occupancy::{find_groups, OccupancyGroup, SiteDraw};
pub use output::{SpeciesCount, Supercell};
