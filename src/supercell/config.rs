/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Configuration for supercell expansion

use super::errors::{Result, SupercellError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Thermal vibration model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VibrationModel {
    /// Thermal displacements off
    #[default]
    Static,
    /// Independent isotropic oscillators
    Einstein,
    /// Correlated displacements from a phonon spectrum
    Dispersion,
}

/// How often partially occupied sites are sampled in replication mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OccupancySampling {
    /// One draw per coincident-site group, shared by every replica
    #[default]
    PerSite,
    /// A fresh draw for every replica of every group
    PerReplica,
}

/// Expansion geometry selected by the configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExpansionMode {
    /// Nx × Ny × Nz copies of the unit cell
    Replicate { replicas: [u32; 3] },
    /// Fill a rectangular box with the tilted crystal
    TiltBox { box_size: [f64; 3] },
}

/// Supercell expansion configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SupercellConfig {
    /// Replica counts Nx, Ny, Nz
    pub replicas: [u32; 3],
    /// Target box (Å); all three positive selects tilt-and-box mode
    pub box_size: [f64; 3],
    /// Tilt angles (rad) about x, y and z
    pub tilt: [f64; 3],
    /// Offsets (Å) added to x and y
    pub offset: [f64; 2],
    /// Thermal vibration model
    pub vibration: VibrationModel,
    /// Effective temperature (K)
    pub temperature: f64,
    /// Merge coincident sites and sample partial occupancies
    pub handle_vacancies: bool,
    /// Occupancy sampling in replication mode
    pub occupancy_sampling: OccupancySampling,
    /// Phonon spectrum file for the dispersion model
    pub phonon_file: Option<PathBuf>,
    /// Seed of the shared random stream; entropy when absent
    pub seed: Option<u64>,
}

impl Default for SupercellConfig {
    fn default() -> Self {
        Self {
            replicas: [1, 1, 1],
            box_size: [0.0; 3],
            tilt: [0.0; 3],
            offset: [0.0; 2],
            vibration: VibrationModel::Static,
            temperature: 300.0,
            handle_vacancies: true,
            occupancy_sampling: OccupancySampling::PerSite,
            phonon_file: None,
            seed: None,
        }
    }
}

impl SupercellConfig {
    /// Read a JSON configuration file; missing fields take their defaults
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Expansion geometry implied by `box_size`
    ///
    /// An all-zero box selects replication. Validation rejects partially set
    /// boxes, so this is only meaningful on a validated configuration.
    pub fn mode(&self) -> ExpansionMode {
        if self.box_size.iter().all(|&extent| extent > 0.0) {
            ExpansionMode::TiltBox {
                box_size: self.box_size,
            }
        } else {
            ExpansionMode::Replicate {
                replicas: self.replicas,
            }
        }
    }

    /// Check the options individually and against each other
    pub fn validate(&self) -> Result<()> {
        let invalid = |message: String| Err(SupercellError::InvalidConfig(message));

        if !self.temperature.is_finite() || self.temperature < 0.0 {
            return invalid(format!("temperature must be >= 0 K, got {}", self.temperature));
        }
        if self.tilt.iter().chain(&self.offset).any(|v| !v.is_finite()) {
            return invalid("tilt angles and offsets must be finite".to_string());
        }

        let box_set = self.box_size.iter().filter(|&&extent| extent != 0.0).count();
        if self.box_size.iter().any(|&extent| !extent.is_finite() || extent < 0.0)
            || (box_set != 0 && box_set != 3)
        {
            return invalid(format!(
                "box size {:?} must be all zero (replication) or all positive (tilt-and-box)",
                self.box_size
            ));
        }

        match self.mode() {
            ExpansionMode::Replicate { replicas } => {
                if replicas.contains(&0) {
                    return invalid(format!("replica counts must be positive, got {:?}", replicas));
                }
            }
            ExpansionMode::TiltBox { .. } => {
                if self.vibration == VibrationModel::Dispersion {
                    return Err(SupercellError::ConfigConflict(
                        "the dispersion model cannot be used with a tilt-and-box supercell"
                            .to_string(),
                    ));
                }
            }
        }

        if self.vibration == VibrationModel::Dispersion && self.phonon_file.is_none() {
            return invalid("the dispersion model needs a phonon_file".to_string());
        }

        Ok(())
    }
}
