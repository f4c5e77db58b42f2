/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Validated unit-cell input for supercell expansion

use super::atom::FractionalAtom;
use super::errors::{AtomError, Result};
use super::sort::sort_by_position;
use crate::lattice::LatticeMetric;
use serde::{Deserialize, Serialize};

/// Serialized form of a unit cell: basis rows plus fractional sites
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitCellDescription {
    /// Rows are the cell edge vectors a, b, c in Å
    pub basis: [[f64; 3]; 3],
    /// Sites in fractional coordinates
    pub atoms: Vec<FractionalAtom>,
}

/// A unit cell whose sites and basis have been checked
///
/// Construction fails on an empty site list, an atomic number outside
/// 1..=118, or a singular basis. No partially valid cell is ever returned.
#[derive(Debug, Clone)]
pub struct UnitCell {
    sites: Vec<FractionalAtom>,
    metric: LatticeMetric,
}

impl UnitCell {
    /// Validate `sites` against `metric`
    pub fn new(metric: LatticeMetric, sites: Vec<FractionalAtom>) -> Result<Self> {
        if sites.is_empty() {
            return Err(AtomError::EmptyUnitCell);
        }
        for (index, site) in sites.iter().enumerate() {
            site.validate(index)?;
        }
        metric.inverse()?;

        Ok(Self { sites, metric })
    }

    /// Validate a deserialized description
    pub fn from_description(description: UnitCellDescription) -> Result<Self> {
        let metric = LatticeMetric::from_rows(description.basis)?;
        Self::new(metric, description.atoms)
    }

    /// Sites in input order
    pub fn sites(&self) -> &[FractionalAtom] {
        &self.sites
    }

    /// Number of sites
    pub fn site_count(&self) -> usize {
        self.sites.len()
    }

    /// Lattice metric of the cell
    pub fn metric(&self) -> &LatticeMetric {
        &self.metric
    }

    /// Distinct atomic numbers in first-seen order
    pub fn species(&self) -> Vec<u32> {
        let mut species = Vec::new();
        for site in &self.sites {
            if !species.contains(&site.atomic_number) {
                species.push(site.atomic_number);
            }
        }
        species
    }

    /// Sites in the order expansion consumes them: sorted by (z, y, x) when
    /// vacancies are handled so that coincident sites are adjacent, input order
    /// otherwise
    pub fn ordered_sites(&self, handle_vacancies: bool) -> Vec<FractionalAtom> {
        let mut sites = self.sites.clone();
        if handle_vacancies {
            sort_by_position(&mut sites);
        }
        sites
    }
}
