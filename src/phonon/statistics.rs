/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Per-species mean-square displacement bookkeeping
//!
//! Within a pass every displacement adds its squared Cartesian length to the
//! accumulator of its species. At the end of the pass each accumulator is
//! reduced and folded into a running estimate
//!
//! ```text
//! avg_new = sqrt(((n - 1) · avg_old² + mean_this_pass) / n)
//! ```
//!
//! where `n` counts passes starting at 1. The per-pass sums are cleared, the
//! running estimate and the pass counter are kept.

use log::debug;

/// Running sum of squared displacements for one species within one pass
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DisplacementAccumulator {
    sum_squared: f64,
    samples: u64,
}

impl DisplacementAccumulator {
    /// Add one squared displacement length (Å²)
    pub fn record(&mut self, length_squared: f64) {
        self.sum_squared += length_squared;
        self.samples += 1;
    }

    /// Sum of the recorded squared lengths
    pub fn sum_squared(&self) -> f64 {
        self.sum_squared
    }

    /// Number of recorded samples
    pub fn samples(&self) -> u64 {
        self.samples
    }

    /// Mean squared length, `None` without samples
    pub fn mean_square(&self) -> Option<f64> {
        (self.samples > 0).then(|| self.sum_squared / self.samples as f64)
    }

    /// Clear sum and count
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Accumulators and running RMS values for every species index
#[derive(Debug, Clone)]
pub struct DisplacementStatistics {
    accumulators: Vec<DisplacementAccumulator>,
    pass_rms: Vec<Option<f64>>,
    running_rms: Vec<Option<f64>>,
    pass_counter: u32,
}

impl Default for DisplacementStatistics {
    fn default() -> Self {
        Self {
            accumulators: Vec::new(),
            pass_rms: Vec::new(),
            running_rms: Vec::new(),
            pass_counter: 1,
        }
    }
}

impl DisplacementStatistics {
    /// Create empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    fn ensure_species(&mut self, species: usize) {
        if species >= self.accumulators.len() {
            self.accumulators
                .resize(species + 1, DisplacementAccumulator::default());
            self.pass_rms.resize(species + 1, None);
            self.running_rms.resize(species + 1, None);
        }
    }

    /// Record one displacement of squared length `length_squared` for `species`
    pub fn record(&mut self, species: usize, length_squared: f64) {
        self.ensure_species(species);
        self.accumulators[species].record(length_squared);
    }

    /// Close the current pass
    ///
    /// Species without samples in this pass keep their running value and get
    /// no pass RMS.
    pub fn finish_pass(&mut self) {
        let n = self.pass_counter as f64;
        for species in 0..self.accumulators.len() {
            let accumulator = &mut self.accumulators[species];
            match accumulator.mean_square() {
                Some(mean) => {
                    let old = self.running_rms[species].unwrap_or(0.0);
                    let running = (((n - 1.0) * old * old + mean) / n).sqrt();
                    self.running_rms[species] = Some(running);
                    self.pass_rms[species] = Some(mean.sqrt());
                    debug!(
                        "species {}: {} samples, sqrt(<u^2>) = {:.6} (running {:.6} over {} passes)",
                        species,
                        accumulator.samples(),
                        mean.sqrt(),
                        running,
                        self.pass_counter
                    );
                }
                None => self.pass_rms[species] = None,
            }
            accumulator.reset();
        }
        self.pass_counter += 1;
    }

    /// Clear the samples of a pass that was never closed
    ///
    /// Running values and the pass counter are untouched.
    pub fn discard_pass(&mut self) {
        for accumulator in &mut self.accumulators {
            accumulator.reset();
        }
    }

    /// Number of passes closed so far
    pub fn passes_completed(&self) -> u32 {
        self.pass_counter - 1
    }

    /// Accumulator of the pass in progress
    pub fn accumulator(&self, species: usize) -> Option<&DisplacementAccumulator> {
        self.accumulators.get(species)
    }

    /// RMS displacement of the last closed pass
    pub fn pass_rms(&self, species: usize) -> Option<f64> {
        self.pass_rms.get(species).copied().flatten()
    }

    /// Cross-pass running RMS estimate
    pub fn running_rms(&self, species: usize) -> Option<f64> {
        self.running_rms.get(species).copied().flatten()
    }

    /// Number of species indices with storage
    pub fn species_count(&self) -> usize {
        self.accumulators.len()
    }
}
