/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Error types for the lattice module

use thiserror::Error;

/// Errors raised while building or inverting a lattice basis
#[derive(Error, Debug)]
pub enum LatticeError {
    /// Basis has a NaN or infinite entry
    #[error("Basis entry ({row}, {col}) is not finite: {value}")]
    NonFinite { row: usize, col: usize, value: f64 },

    /// Basis is singular or has the wrong shape
    #[error("Degenerate basis: {0}")]
    Degenerate(#[from] crate::utils::UtilsError),

    /// Lengths and angles that cannot close a cell
    #[error("Invalid cell parameters: {0}")]
    InvalidParameters(String),
}

/// Result type for lattice operations
pub type Result<T> = std::result::Result<T, LatticeError>;
