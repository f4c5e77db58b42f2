/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Lattice metric derived from a 3x3 basis matrix
//!
//! The basis matrix is the only stored state. Edge lengths and inter-axial
//! angles are recomputed from it on every call.

use super::errors::{LatticeError, Result};
use super::rotation::TiltRotation;
use crate::atoms::Vector3D;
use crate::utils::matrix::{check_3x3, from_rows, inverse_3x3, row_times_matrix};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// Cell edge lengths (Å) and angles (degrees)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatticeParameters {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    /// Angle between b and c
    pub alpha: f64,
    /// Angle between a and c
    pub beta: f64,
    /// Angle between a and b
    pub gamma: f64,
}

/// Lattice basis with rows a, b, c
///
/// Fractional coordinates `f` map to Cartesian positions with the row-vector
/// product `x = f · B`: row `i` of the basis is the edge vector of axis `i`.
#[derive(Debug, Clone, PartialEq)]
pub struct LatticeMetric {
    basis: Array2<f64>,
}

impl LatticeMetric {
    /// Build from rows `[a, b, c]`
    pub fn from_rows(rows: [[f64; 3]; 3]) -> Result<Self> {
        Self::from_array(from_rows(rows))
    }

    /// Build from a 3x3 array whose rows are the edge vectors
    pub fn from_array(basis: Array2<f64>) -> Result<Self> {
        check_3x3(&basis)?;
        for ((row, col), &value) in basis.indexed_iter() {
            if !value.is_finite() {
                return Err(LatticeError::NonFinite { row, col, value });
            }
        }
        Ok(Self { basis })
    }

    /// Standard setting: a along x, b in the xy plane
    pub fn from_parameters(p: &LatticeParameters) -> Result<Self> {
        let (alpha, beta, gamma) = (
            p.alpha.to_radians(),
            p.beta.to_radians(),
            p.gamma.to_radians(),
        );
        let sin_gamma = gamma.sin();
        if sin_gamma.abs() < 1e-12 {
            return Err(LatticeError::InvalidParameters(format!(
                "gamma = {} degrees collapses a onto b",
                p.gamma
            )));
        }

        let cx = beta.cos();
        let cy = (alpha.cos() - beta.cos() * gamma.cos()) / sin_gamma;
        let cz_sq = 1.0 - cx * cx - cy * cy;
        if cz_sq <= 0.0 {
            return Err(LatticeError::InvalidParameters(format!(
                "angles ({}, {}, {}) do not close a cell",
                p.alpha, p.beta, p.gamma
            )));
        }

        Self::from_rows([
            [p.a, 0.0, 0.0],
            [p.b * gamma.cos(), p.b * sin_gamma, 0.0],
            [p.c * cx, p.c * cy, p.c * cz_sq.sqrt()],
        ])
    }

    /// Metric tensor G = B · Bᵀ
    pub fn metric_tensor(&self) -> Array2<f64> {
        self.basis.dot(&self.basis.t())
    }

    /// Edge lengths `[a, b, c]`
    pub fn lengths(&self) -> [f64; 3] {
        let g = self.metric_tensor();
        [g[[0, 0]].sqrt(), g[[1, 1]].sqrt(), g[[2, 2]].sqrt()]
    }

    /// Angles `[alpha, beta, gamma]` in degrees
    ///
    /// A zero-length edge yields NaN for the angles it takes part in.
    pub fn angles(&self) -> [f64; 3] {
        let g = self.metric_tensor();
        let angle = |i: usize, j: usize| {
            let cos = g[[i, j]] / (g[[i, i]] * g[[j, j]]).sqrt();
            cos.clamp(-1.0, 1.0).acos().to_degrees()
        };
        [angle(1, 2), angle(0, 2), angle(0, 1)]
    }

    /// Lengths and angles together
    pub fn parameters(&self) -> LatticeParameters {
        let [a, b, c] = self.lengths();
        let [alpha, beta, gamma] = self.angles();
        LatticeParameters {
            a,
            b,
            c,
            alpha,
            beta,
            gamma,
        }
    }

    /// Inverse basis, mapping Cartesian row vectors back to fractions
    pub fn inverse(&self) -> Result<Array2<f64>> {
        Ok(inverse_3x3(&self.basis)?)
    }

    /// Fractional to Cartesian: `f · B`
    pub fn to_cartesian(&self, fractional: &Vector3D) -> Vector3D {
        row_times_matrix(fractional, &self.basis)
    }

    /// Cartesian to fractional: `x · B⁻¹`
    pub fn to_fractional(&self, cartesian: &Vector3D) -> Result<Vector3D> {
        Ok(row_times_matrix(cartesian, &self.inverse()?))
    }

    /// Basis with every edge vector rotated by `rotation` (`B' = B · Rᵀ`)
    pub fn tilted(&self, rotation: &TiltRotation) -> Self {
        Self {
            basis: self.basis.dot(&rotation.matrix().t()),
        }
    }
}
