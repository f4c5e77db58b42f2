/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Utility functions for supercell expansion
//!
//! Physical constants and the 3x3 linear algebra shared by the lattice,
//! phonon and supercell modules.

pub mod constants;
pub mod errors;
pub mod matrix;

pub use errors::{Result, UtilsError};
pub use matrix::{determinant_3x3, from_rows, inverse_3x3, matrix_times_column, row_times_matrix};
