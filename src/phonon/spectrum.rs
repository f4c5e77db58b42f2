/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Phonon dispersion spectra
//!
//! The binary layout is fixed and little-endian, with no version field:
//!
//! ```text
//! i32 Nk                      number of k-points
//! i32 Ns                      atoms in the primitive basis
//! f32 × Ns                    atomic masses (amu)
//! Nk × {
//!     f32 × 3                 k-vector (reciprocal lattice units)
//!     3·Ns × {
//!         f32                 angular frequency (rad/ps)
//!         (f32, f32) × 3·Ns   complex eigenvector, component 3·s + axis
//!     }
//! }
//! ```
//!
//! A file whose length disagrees with its header is rejected outright.

use super::errors::{PhononError, Result};
use crate::utils::constants::{FREQUENCY_NOISE_FLOOR, THZ_AMU_HBAR, THZ_HBAR_KB};
use log::info;
use ndarray::{Array2, Array3};
use num_complex::Complex64;
use std::f64::consts::PI;
use std::fs;
use std::path::Path;

const WORD: usize = 4;

/// An immutable phonon spectrum: k-points, branch frequencies and eigenvectors
#[derive(Debug, Clone)]
pub struct PhononSpectrum {
    /// `[Nk, 3]`
    kpoints: Array2<f64>,
    /// `[Ns]`
    masses: Vec<f64>,
    /// `[Nk, 3·Ns]`
    frequencies: Array2<f64>,
    /// `[Nk, branch, component]`, both of length 3·Ns
    eigenvectors: Array3<Complex64>,
}

impl PhononSpectrum {
    /// Assemble a spectrum from arrays, checking their dimensions
    pub fn new(
        kpoints: Array2<f64>,
        masses: Vec<f64>,
        frequencies: Array2<f64>,
        eigenvectors: Array3<Complex64>,
    ) -> Result<Self> {
        let nk = kpoints.nrows();
        let modes = 3 * masses.len();

        if masses.is_empty() {
            return Err(PhononError::InvalidShape(
                "primitive basis has no atoms".to_string(),
            ));
        }
        if kpoints.ncols() != 3 {
            return Err(PhononError::InvalidShape(format!(
                "k-points have {} components",
                kpoints.ncols()
            )));
        }
        if frequencies.dim() != (nk, modes) {
            return Err(PhononError::InvalidShape(format!(
                "frequencies are {:?}, expected {:?}",
                frequencies.dim(),
                (nk, modes)
            )));
        }
        if eigenvectors.dim() != (nk, modes, modes) {
            return Err(PhononError::InvalidShape(format!(
                "eigenvectors are {:?}, expected {:?}",
                eigenvectors.dim(),
                (nk, modes, modes)
            )));
        }

        Ok(Self {
            kpoints,
            masses,
            frequencies,
            eigenvectors,
        })
    }

    /// Read a spectrum file
    ///
    /// # Errors
    ///
    /// [`PhononError::Unavailable`] when the file cannot be read (recoverable),
    /// [`PhononError::SizeMismatch`] or [`PhononError::InvalidHeader`] when its
    /// contents do not follow the layout (fatal).
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| PhononError::Unavailable {
            path: path.to_path_buf(),
            source,
        })?;
        let spectrum = Self::from_bytes(&bytes, path)?;

        info!(
            "Loaded phonon spectrum {}: {} k-points, {} basis atoms",
            path.display(),
            spectrum.kpoint_count(),
            spectrum.basis_atom_count()
        );
        Ok(spectrum)
    }

    /// Decode a spectrum from its binary form; `path` only labels errors
    pub fn from_bytes(bytes: &[u8], path: &Path) -> Result<Self> {
        let invalid = |reason: String| PhononError::InvalidHeader {
            path: path.to_path_buf(),
            reason,
        };

        let mut offset = 0;
        let nk = take_i32(bytes, &mut offset).ok_or_else(|| invalid("missing k-point count".into()))?;
        let ns = take_i32(bytes, &mut offset).ok_or_else(|| invalid("missing basis size".into()))?;
        if nk <= 0 || ns <= 0 {
            return Err(invalid(format!("k-points = {}, basis atoms = {}", nk, ns)));
        }
        let (nk, ns) = (nk as usize, ns as usize);
        let modes = 3 * ns;

        let expected = expected_size(nk, ns)
            .ok_or_else(|| invalid(format!("{} k-points × {} atoms overflows", nk, ns)))?;
        if bytes.len() != expected {
            return Err(PhononError::SizeMismatch {
                path: path.to_path_buf(),
                expected,
                actual: bytes.len(),
            });
        }

        // lengths are verified above, so every read below succeeds
        let mut next = || take_f32(bytes, &mut offset).unwrap_or(f64::NAN);

        let masses: Vec<f64> = (0..ns).map(|_| next()).collect();
        let mut kpoints = Array2::<f64>::zeros((nk, 3));
        let mut frequencies = Array2::<f64>::zeros((nk, modes));
        let mut eigenvectors = Array3::<Complex64>::zeros((nk, modes, modes));

        for ik in 0..nk {
            for axis in 0..3 {
                kpoints[[ik, axis]] = next();
            }
            for branch in 0..modes {
                frequencies[[ik, branch]] = next();
                for component in 0..modes {
                    let re = next();
                    let im = next();
                    eigenvectors[[ik, branch, component]] = Complex64::new(re, im);
                }
            }
        }

        Self::new(kpoints, masses, frequencies, eigenvectors)
    }

    /// Encode in the binary layout read by [`PhononSpectrum::load`]
    pub fn to_bytes(&self) -> Vec<u8> {
        let (nk, ns) = (self.kpoint_count(), self.basis_atom_count());
        let mut bytes = Vec::with_capacity(expected_size(nk, ns).unwrap_or(0));
        bytes.extend_from_slice(&(nk as i32).to_le_bytes());
        bytes.extend_from_slice(&(ns as i32).to_le_bytes());

        let mut put = |value: f64| bytes.extend_from_slice(&(value as f32).to_le_bytes());
        for &mass in &self.masses {
            put(mass);
        }
        for ik in 0..nk {
            for axis in 0..3 {
                put(self.kpoints[[ik, axis]]);
            }
            for branch in 0..3 * ns {
                put(self.frequencies[[ik, branch]]);
                for component in 0..3 * ns {
                    let c = self.eigenvectors[[ik, branch, component]];
                    put(c.re);
                    put(c.im);
                }
            }
        }
        bytes
    }

    /// Number of k-points
    pub fn kpoint_count(&self) -> usize {
        self.kpoints.nrows()
    }

    /// Number of atoms in the primitive basis
    pub fn basis_atom_count(&self) -> usize {
        self.masses.len()
    }

    /// Number of branches per k-point (3·Ns)
    pub fn branch_count(&self) -> usize {
        3 * self.masses.len()
    }

    /// k-vector `ik` as `[kx, ky, kz]`
    pub fn kpoint(&self, ik: usize) -> [f64; 3] {
        [
            self.kpoints[[ik, 0]],
            self.kpoints[[ik, 1]],
            self.kpoints[[ik, 2]],
        ]
    }

    /// Masses of the primitive basis atoms (amu)
    pub fn masses(&self) -> &[f64] {
        &self.masses
    }

    /// Branch frequencies, `[Nk, 3·Ns]`
    pub fn frequencies(&self) -> &Array2<f64> {
        &self.frequencies
    }

    /// Eigenvector component `component` of `branch` at k-point `ik`
    pub fn eigenvector(&self, ik: usize, branch: usize, component: usize) -> Complex64 {
        self.eigenvectors[[ik, branch, component]]
    }

    /// Thermal amplitude of every (k-point, branch) mode at `temperature`
    ///
    /// `amp = sqrt((n_BE + 1/2) / (2π · Nk · 2 · m · ω · THZ_AMU_HBAR))`, where the
    /// mass is that of basis atom `branch / 3` and `n_BE` is the Bose-Einstein
    /// occupation (zero at T = 0). Modes below the noise floor get no amplitude.
    pub fn mode_amplitudes(&self, temperature: f64) -> Array2<f64> {
        let nk = self.kpoint_count();
        Array2::from_shape_fn((nk, self.branch_count()), |(ik, branch)| {
            let omega = self.frequencies[[ik, branch]];
            if omega <= FREQUENCY_NOISE_FLOOR {
                return 0.0;
            }
            let occupation = if temperature > 0.0 {
                1.0 / ((THZ_HBAR_KB * omega / temperature).exp() - 1.0)
            } else {
                0.0
            };
            let mass = self.masses[branch / 3];
            ((occupation + 0.5) / (2.0 * PI * nk as f64 * 2.0 * mass * omega * THZ_AMU_HBAR)).sqrt()
        })
    }
}

/// Total file length implied by the header counts
fn expected_size(nk: usize, ns: usize) -> Option<usize> {
    let modes = ns.checked_mul(3)?;
    let branch = modes.checked_mul(2)?.checked_add(1)?.checked_mul(WORD)?;
    let kpoint = modes.checked_mul(branch)?.checked_add(3 * WORD)?;
    nk.checked_mul(kpoint)?
        .checked_add(ns.checked_mul(WORD)?)?
        .checked_add(2 * WORD)
}

fn take_i32(bytes: &[u8], offset: &mut usize) -> Option<i32> {
    let end = offset.checked_add(WORD)?;
    let slice = bytes.get(*offset..end)?;
    let value = i32::from_le_bytes(slice.try_into().ok()?);
    *offset = end;
    Some(value)
}

fn take_f32(bytes: &[u8], offset: &mut usize) -> Option<f64> {
    let end = offset.checked_add(WORD)?;
    let slice = bytes.get(*offset..end)?;
    let value = f32::from_le_bytes(slice.try_into().ok()?);
    *offset = end;
    Some(value as f64)
}
