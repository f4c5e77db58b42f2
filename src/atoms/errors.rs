/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Error types for the atoms module

/// Error types for the atoms module
#[derive(Debug, thiserror::Error)]
pub enum AtomError {
    #[error("Invalid atomic number {atomic_number} for site {site} at {position}")]
    InvalidAtomicNumber {
        atomic_number: u32,
        site: usize,
        position: super::Vector3D,
    },

    #[error("Unit cell contains no atom sites")]
    EmptyUnitCell,

    #[error("Invalid lattice basis: {0}")]
    InvalidBasis(#[from] crate::lattice::LatticeError),
}

/// Result type for atom operations
pub type Result<T> = std::result::Result<T, AtomError>;
