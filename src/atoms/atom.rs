/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Atom records in the two coordinate frames of the expansion pipeline
//!
//! A [`FractionalAtom`] is a unit-cell site as delivered by a structure reader:
//! position in fractions of the cell edges, possibly partially occupied. An
//! [`AbsoluteAtom`] is a resolved atom of the finished supercell: position in Å
//! and no occupancy, since resolution has already decided it exists.

use super::errors::{AtomError, Result};
use super::vector::Vector3D;
use crate::lattice::LatticeMetric;
use crate::utils::constants::MAX_ATOMIC_NUMBER;
use serde::{Deserialize, Serialize};
use std::fmt;

fn default_occupancy() -> f64 {
    1.0
}

/// A unit-cell site in fractional coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FractionalAtom {
    /// Atomic number (Z); 0 is reserved for vacancies and rejected on input
    pub atomic_number: u32,
    /// Position in fractions of the cell edge vectors
    pub position: Vector3D,
    /// Site occupancy in (0, 1]
    #[serde(default = "default_occupancy")]
    pub occupancy: f64,
    /// Debye-Waller value B (Å²)
    #[serde(default)]
    pub debye_waller: f64,
    /// Net partial charge
    #[serde(default)]
    pub charge: f64,
}

impl FractionalAtom {
    /// Create a fully occupied site with no thermal motion and no charge
    pub fn new(atomic_number: u32, position: Vector3D) -> Self {
        Self {
            atomic_number,
            position,
            occupancy: 1.0,
            debye_waller: 0.0,
            charge: 0.0,
        }
    }

    /// Builder-style setter for the occupancy
    pub fn with_occupancy(mut self, occupancy: f64) -> Self {
        self.occupancy = occupancy;
        self
    }

    /// Builder-style setter for the Debye-Waller value
    pub fn with_debye_waller(mut self, debye_waller: f64) -> Self {
        self.debye_waller = debye_waller;
        self
    }

    /// Builder-style setter for the charge
    pub fn with_charge(mut self, charge: f64) -> Self {
        self.charge = charge;
        self
    }

    /// Check the atomic number against the supported range
    pub fn validate(&self, site: usize) -> Result<()> {
        if self.atomic_number == 0 || self.atomic_number > MAX_ATOMIC_NUMBER {
            return Err(AtomError::InvalidAtomicNumber {
                atomic_number: self.atomic_number,
                site,
                position: self.position,
            });
        }
        Ok(())
    }

    /// Place this site at another fractional position (a replica, possibly
    /// displaced) and convert it to Cartesian coordinates with `metric`
    pub fn to_absolute_at(&self, fractional: &Vector3D, metric: &LatticeMetric) -> AbsoluteAtom {
        AbsoluteAtom {
            atomic_number: self.atomic_number,
            position: metric.to_cartesian(fractional),
            debye_waller: self.debye_waller,
            charge: self.charge,
        }
    }

    /// Convert this site to Cartesian coordinates with `metric`
    pub fn to_absolute(&self, metric: &LatticeMetric) -> AbsoluteAtom {
        self.to_absolute_at(&self.position, metric)
    }
}

impl fmt::Display for FractionalAtom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Z={} at {} (occ {:.4}, B {:.4})",
            self.atomic_number, self.position, self.occupancy, self.debye_waller
        )
    }
}

/// A resolved supercell atom in Cartesian coordinates (Å)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbsoluteAtom {
    /// Atomic number (Z), never 0
    pub atomic_number: u32,
    /// Cartesian position in Å
    pub position: Vector3D,
    /// Debye-Waller value B (Å²) carried over from the site
    pub debye_waller: f64,
    /// Net partial charge carried over from the site
    pub charge: f64,
}

impl AbsoluteAtom {
    /// Shift the atom by `delta` (Å)
    pub fn translate(&mut self, delta: &Vector3D) {
        self.position += *delta;
    }
}

impl fmt::Display for AbsoluteAtom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Z={} at {}", self.atomic_number, self.position)
    }
}
