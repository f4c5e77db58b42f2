/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Error types for supercell construction

use crate::atoms::AtomError;
use crate::lattice::LatticeError;
use crate::phonon::PhononError;
use std::fmt;
use thiserror::Error;

/// Broad category of a failure, for callers deciding what to change before retrying
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed unit cell or lattice
    InputData,
    /// An external resource could not be read
    Resource,
    /// A resource was read but its contents are malformed
    Format,
    /// Options that cannot be used together or are out of range
    Configuration,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::InputData => "input data",
            ErrorKind::Resource => "resource",
            ErrorKind::Format => "format",
            ErrorKind::Configuration => "configuration",
        };
        f.write_str(name)
    }
}

/// Errors that can occur while building a supercell
#[derive(Error, Debug)]
pub enum SupercellError {
    #[error("Atom error: {0}")]
    AtomError(#[from] AtomError),

    #[error("Lattice error: {0}")]
    LatticeError(#[from] LatticeError),

    #[error("Phonon error: {0}")]
    PhononError(#[from] PhononError),

    /// Two options that cannot be combined
    #[error("Conflicting configuration: {0}")]
    ConfigConflict(String),

    /// A single option with an unusable value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl SupercellError {
    /// Category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            SupercellError::AtomError(_) | SupercellError::LatticeError(_) => ErrorKind::InputData,
            SupercellError::PhononError(err) => match err {
                PhononError::Unavailable { .. } => ErrorKind::Resource,
                PhononError::SizeMismatch { .. }
                | PhononError::InvalidHeader { .. }
                | PhononError::InvalidShape(_) => ErrorKind::Format,
                PhononError::SiteOutOfBasis { .. } | PhononError::Lattice(_) => {
                    ErrorKind::InputData
                }
            },
            SupercellError::ConfigConflict(_) | SupercellError::InvalidConfig(_) => {
                ErrorKind::Configuration
            }
        }
    }
}

/// Result type for supercell operations
pub type Result<T> = std::result::Result<T, SupercellError>;
