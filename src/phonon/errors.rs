/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Error types for the phonon module

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading a phonon spectrum or generating displacements
#[derive(Error, Debug)]
pub enum PhononError {
    /// The spectrum file could not be opened or read
    #[error("Cannot read phonon spectrum {}: {source}", path.display())]
    Unavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file length disagrees with the layout implied by its header
    #[error(
        "Phonon spectrum {} holds {actual} bytes but its header implies {expected}",
        path.display()
    )]
    SizeMismatch {
        path: PathBuf,
        expected: usize,
        actual: usize,
    },

    /// Header counts that cannot describe a spectrum
    #[error("Phonon spectrum {} has an invalid header: {reason}", path.display())]
    InvalidHeader { path: PathBuf, reason: String },

    /// In-memory spectrum arrays with inconsistent dimensions
    #[error("Inconsistent phonon spectrum: {0}")]
    InvalidShape(String),

    /// A unit-cell site has no eigenvector components in the spectrum
    #[error("Site {site} is outside the {basis_atoms}-atom primitive basis of the phonon spectrum")]
    SiteOutOfBasis { site: usize, basis_atoms: usize },

    /// The cell basis needed to convert displacements is unusable
    #[error("Lattice error: {0}")]
    Lattice(#[from] crate::lattice::LatticeError),
}

impl PhononError {
    /// True for failures that a caller may recover from by switching to the
    /// Einstein model
    pub fn is_recoverable(&self) -> bool {
        matches!(self, PhononError::Unavailable { .. })
    }
}

/// Result type for phonon operations
pub type Result<T> = std::result::Result<T, PhononError>;
