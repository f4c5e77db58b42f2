/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Atomic data for supercell expansion
//!
//! This module provides the atom records in both coordinate frames, the
//! validated unit cell, the species index table and the atom orderings used to
//! discover coincident sites.

mod atom;
mod errors;
mod species;
mod unit_cell;
mod vector;

pub mod sort;

pub use atom::{AbsoluteAtom, FractionalAtom};
pub use errors::{AtomError, Result};
pub use sort::AtomLike;
pub use species::SpeciesTable;
pub use unit_cell::{UnitCell, UnitCellDescription};
pub use vector::Vector3D;
