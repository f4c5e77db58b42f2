/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Thermal displacement models
//!
//! A [`DisplacementGenerator`] turns one atom instance into a displacement in
//! fractional coordinates. Three models are available:
//!
//! - **Static**: no displacement, no random draws.
//! - **Einstein**: every atom is an independent isotropic oscillator whose
//!   mean-square amplitude follows its Debye-Waller value.
//! - **Dispersion**: correlated displacements built from a phonon spectrum as a
//!   superposition of plane-wave normal modes.
//!
//! Every non-static displacement records its squared Cartesian length in the
//! [`DisplacementStatistics`] of the pass.

use super::errors::{PhononError, Result};
use super::spectrum::PhononSpectrum;
use super::statistics::DisplacementStatistics;
use crate::atoms::Vector3D;
use crate::lattice::LatticeMetric;
use crate::utils::constants::{LARGE_SPECTRUM_KPOINTS, REFERENCE_TEMPERATURE, WOBBLE_CONSTANT};
use crate::utils::matrix::row_times_matrix;
use log::info;
use ndarray::Array2;
use rand::Rng;
use rand_distr::StandardNormal;
use std::f64::consts::PI;
use std::sync::Arc;

/// Selected thermal displacement model
#[derive(Debug, Clone)]
pub enum DisplacementModel {
    /// Thermal displacements disabled
    Static,
    /// Independent oscillators scaled by the Debye-Waller value
    Einstein { temperature: f64 },
    /// Normal-mode superposition from a loaded spectrum
    Dispersion {
        spectrum: Arc<PhononSpectrum>,
        temperature: f64,
    },
}

impl DisplacementModel {
    /// Short name used in log messages
    pub fn name(&self) -> &'static str {
        match self {
            DisplacementModel::Static => "static",
            DisplacementModel::Einstein { .. } => "einstein",
            DisplacementModel::Dispersion { .. } => "dispersion",
        }
    }
}

/// One atom instance to be displaced
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplacementTarget {
    /// Index of the unit-cell site (the primitive basis atom in dispersion mode)
    pub site: usize,
    /// Integer replica offset of this instance
    pub replica: [i32; 3],
    /// Debye-Waller value of the site (Å²)
    pub debye_waller: f64,
    /// Species index used for statistics
    pub species: usize,
}

#[derive(Debug, Clone)]
enum Engine {
    Static,
    Einstein {
        /// sqrt(T / 300)
        temperature_scale: f64,
    },
    Dispersion {
        spectrum: Arc<PhononSpectrum>,
        /// `[Nk, 3·Ns]`
        amplitudes: Array2<f64>,
        /// `[3·Ns, Nk]`, redrawn at pass start
        q1: Array2<f64>,
        q2: Array2<f64>,
    },
}

/// Per-atom displacement engine bound to one lattice metric
#[derive(Debug, Clone)]
pub struct DisplacementGenerator {
    engine: Engine,
    inverse_basis: Array2<f64>,
    cell_lengths: Vector3D,
}

impl DisplacementGenerator {
    /// Prepare a generator for `model` on the cell described by `metric`
    ///
    /// In dispersion mode the mode amplitudes are evaluated here, once.
    pub fn new(model: &DisplacementModel, metric: &LatticeMetric) -> Result<Self> {
        let inverse_basis = metric.inverse()?;
        let cell_lengths = Vector3D::from_array(metric.lengths());

        let engine = match model {
            DisplacementModel::Static => Engine::Static,
            DisplacementModel::Einstein { temperature } => Engine::Einstein {
                temperature_scale: (temperature / REFERENCE_TEMPERATURE).sqrt(),
            },
            DisplacementModel::Dispersion {
                spectrum,
                temperature,
            } => {
                let amplitudes = spectrum.mode_amplitudes(*temperature);
                let shape = (spectrum.branch_count(), spectrum.kpoint_count());
                Engine::Dispersion {
                    spectrum: Arc::clone(spectrum),
                    amplitudes,
                    q1: Array2::zeros(shape),
                    q2: Array2::zeros(shape),
                }
            }
        };

        Ok(Self {
            engine,
            inverse_basis,
            cell_lengths,
        })
    }

    /// True when displacements are always zero
    pub fn is_static(&self) -> bool {
        matches!(self.engine, Engine::Static)
    }

    /// Fail unless every one of `site_count` sites has eigenvector components
    ///
    /// # Errors
    ///
    /// [`PhononError::SiteOutOfBasis`] for the first site beyond the primitive
    /// basis of the spectrum.
    pub fn check_sites(&self, site_count: usize) -> Result<()> {
        if let Engine::Dispersion { spectrum, .. } = &self.engine {
            let basis_atoms = spectrum.basis_atom_count();
            if site_count > basis_atoms {
                return Err(PhononError::SiteOutOfBasis {
                    site: basis_atoms,
                    basis_atoms,
                });
            }
        }
        Ok(())
    }

    /// Start a pass: drop samples left by an unfinished pass and redraw the
    /// normal-mode coordinates in dispersion mode
    ///
    /// Coordinates are drawn branch by branch, k-point by k-point, `q1` before
    /// `q2`, so the stream consumption is fixed for a given spectrum.
    pub fn begin_pass<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        statistics: &mut DisplacementStatistics,
    ) {
        statistics.discard_pass();
        if let Engine::Dispersion {
            spectrum,
            amplitudes,
            q1,
            q2,
        } = &mut self.engine
        {
            let nk = spectrum.kpoint_count();
            if nk > LARGE_SPECTRUM_KPOINTS {
                info!("Creating phonon displacements for {} k-vectors", nk);
            }
            for branch in 0..spectrum.branch_count() {
                for ik in 0..nk {
                    let amplitude = amplitudes[[ik, branch]];
                    let g1: f64 = rng.sample(StandardNormal);
                    let g2: f64 = rng.sample(StandardNormal);
                    q1[[branch, ik]] = amplitude * g1;
                    q2[[branch, ik]] = amplitude * g2;
                }
            }
        }
    }

    /// Displacement of one atom instance in fractional coordinates
    ///
    /// # Errors
    ///
    /// [`PhononError::SiteOutOfBasis`] in dispersion mode when the site has no
    /// eigenvector components in the spectrum.
    pub fn displace<R: Rng + ?Sized>(
        &self,
        target: &DisplacementTarget,
        rng: &mut R,
        statistics: &mut DisplacementStatistics,
    ) -> Result<Vector3D> {
        match &self.engine {
            Engine::Static => Ok(Vector3D::zero()),
            Engine::Einstein { temperature_scale } => {
                let wobble = temperature_scale * (target.debye_waller * WOBBLE_CONSTANT).sqrt();
                let sigma = wobble / 3.0_f64.sqrt();
                let mut draw = || -> f64 { sigma * rng.sample::<f64, _>(StandardNormal) };
                let u = Vector3D::new(draw(), draw(), draw());

                statistics.record(target.species, u.length_squared());
                Ok(row_times_matrix(&u, &self.inverse_basis))
            }
            Engine::Dispersion {
                spectrum, q1, q2, ..
            } => {
                let basis_atoms = spectrum.basis_atom_count();
                if target.site >= basis_atoms {
                    return Err(PhononError::SiteOutOfBasis {
                        site: target.site,
                        basis_atoms,
                    });
                }

                let n = Vector3D::from_indices(target.replica);
                let mut u = [0.0_f64; 3];
                for branch in 0..spectrum.branch_count() {
                    for ik in 0..spectrum.kpoint_count() {
                        let k = Vector3D::from_array(spectrum.kpoint(ik));
                        let phase = 2.0 * PI * n.dot(&k);
                        let (sin, cos) = phase.sin_cos();
                        let (a, b) = (q1[[branch, ik]], q2[[branch, ik]]);
                        for (axis, value) in u.iter_mut().enumerate() {
                            let e = spectrum.eigenvector(ik, branch, axis + 3 * target.site);
                            *value += a * (e.re * cos - e.im * sin) - b * (e.re * sin + e.im * cos);
                        }
                    }
                }

                let u = Vector3D::from_array(u);
                statistics.record(target.species, u.length_squared());
                Ok(u.component_div(&self.cell_lengths))
            }
        }
    }

    /// Close the pass: fold the accumulated samples into the running RMS
    pub fn end_pass(&self, statistics: &mut DisplacementStatistics) {
        statistics.finish_pass();
    }
}
