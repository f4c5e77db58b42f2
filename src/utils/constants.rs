/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Physical and numerical constants used during supercell expansion

use std::f64::consts::PI;

/// Largest atomic number accepted from a unit-cell description
pub const MAX_ATOMIC_NUMBER: u32 = 118;

/// Two positions closer than this on every axis belong to the same site
/// (same units as the position, fractional before expansion)
pub const POSITION_TOLERANCE: f64 = 1e-6;

/// Temperature (K) at which a Debye-Waller value is taken at face value
pub const REFERENCE_TEMPERATURE: f64 = 300.0;

/// Converts a Debye-Waller value B (Å²) into a mean-square displacement <u²> = B/(8π²)
pub const WOBBLE_CONSTANT: f64 = 1.0 / (8.0 * PI * PI);

/// ħ·(1 THz)/k_B in Kelvin, for angular frequencies given in rad/ps
pub const THZ_HBAR_KB: f64 = 7.638_232_577;

/// amu·Å²·THz/ħ, converts m·ω into units of ħ/Å²
pub const THZ_AMU_HBAR: f64 = 0.157_457_029_641_89;

/// Branch frequencies below this are treated as numerical noise (acoustic modes at Γ)
pub const FREQUENCY_NOISE_FLOOR: f64 = 1e-4;

/// Spectra with more k-points than this get a progress notice when redrawn
pub const LARGE_SPECTRUM_KPOINTS: usize = 800;
