/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Lattice geometry: basis metric, coordinate conversions and crystal tilt

mod errors;
mod metric;
mod rotation;

pub use errors::{LatticeError, Result};
pub use metric::{LatticeMetric, LatticeParameters};
pub use rotation::TiltRotation;
