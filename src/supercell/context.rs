/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! State shared by successive expansion passes

use crate::atoms::SpeciesTable;
use crate::phonon::DisplacementStatistics;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// Displacement summary of one species
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesDisplacement {
    pub atomic_number: u32,
    /// sqrt(<u²>) of the last pass (Å)
    pub pass_rms: Option<f64>,
    /// Running estimate over all passes (Å)
    pub running_rms: Option<f64>,
}

/// Random stream, species table and displacement statistics
///
/// One context is owned by the caller and handed to every build. The random
/// stream and the statistics carry over from pass to pass; species indices,
/// once issued, never change.
#[derive(Debug, Clone)]
pub struct ExpansionContext {
    pub(crate) rng: StdRng,
    pub(crate) species: SpeciesTable,
    pub(crate) statistics: DisplacementStatistics,
}

impl ExpansionContext {
    /// Create a context; `None` seeds the stream from system entropy
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            rng,
            species: SpeciesTable::new(),
            statistics: DisplacementStatistics::new(),
        }
    }

    /// Context with a fixed seed
    pub fn seeded(seed: u64) -> Self {
        Self::new(Some(seed))
    }

    /// Species seen so far
    pub fn species(&self) -> &SpeciesTable {
        &self.species
    }

    /// Displacement statistics of all passes
    pub fn statistics(&self) -> &DisplacementStatistics {
        &self.statistics
    }

    /// Number of completed expansion passes
    pub fn passes_completed(&self) -> u32 {
        self.statistics.passes_completed()
    }

    /// Per-species RMS displacements, in species-index order
    pub fn displacement_report(&self) -> Vec<SpeciesDisplacement> {
        self.species
            .atomic_numbers()
            .iter()
            .enumerate()
            .map(|(index, &atomic_number)| SpeciesDisplacement {
                atomic_number,
                pass_rms: self.statistics.pass_rms(index),
                running_rms: self.statistics.running_rms(index),
            })
            .collect()
    }
}

impl Default for ExpansionContext {
    fn default() -> Self {
        Self::new(None)
    }
}
