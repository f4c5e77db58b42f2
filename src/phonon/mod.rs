/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Thermal vibrations
//!
//! This module loads phonon dispersion spectra, generates per-atom thermal
//! displacements in the Einstein or dispersion picture and keeps the
//! mean-square displacement statistics of every species.

mod displacement;
mod errors;
mod spectrum;
mod statistics;

pub use displacement::{DisplacementGenerator, DisplacementModel, DisplacementTarget};
pub use errors::{PhononError, Result};
pub use spectrum::PhononSpectrum;
pub use statistics::{DisplacementAccumulator, DisplacementStatistics};
