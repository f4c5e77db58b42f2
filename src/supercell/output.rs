/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! The expanded supercell

use crate::atoms::sort::sort_by_atomic_number;
use crate::atoms::{AbsoluteAtom, Vector3D};
use serde::{Deserialize, Serialize};

/// Number of atoms of one element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesCount {
    pub atomic_number: u32,
    pub count: usize,
}

/// Resolved atoms in Cartesian coordinates with the final cell extents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supercell {
    /// Atoms in emission order
    pub atoms: Vec<AbsoluteAtom>,
    /// Cell dimensions along x, y, z (Å)
    pub extents: Vector3D,
    /// Candidates dropped as vacancies or as losers of an occupancy draw
    pub removed_sites: usize,
}

impl Supercell {
    /// Number of atoms
    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    /// True when every candidate was removed
    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Atom counts per element, heaviest first
    pub fn species_counts(&self) -> Vec<SpeciesCount> {
        let mut atoms = self.atoms.clone();
        sort_by_atomic_number(&mut atoms);

        let mut counts: Vec<SpeciesCount> = Vec::new();
        for atom in &atoms {
            match counts.last_mut() {
                Some(last) if last.atomic_number == atom.atomic_number => last.count += 1,
                _ => counts.push(SpeciesCount {
                    atomic_number: atom.atomic_number,
                    count: 1,
                }),
            }
        }
        counts
    }
}
