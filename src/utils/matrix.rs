/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Small dense 3x3 matrix operations on `ndarray` arrays
//!
//! Lattice bases, their inverses and tilt rotations are all 3x3. These helpers
//! keep the row-vector convention used throughout the crate explicit: a
//! fractional coordinate `f` maps to Cartesian `x = f · B` where the rows of `B`
//! are the cell edge vectors.

#![allow(clippy::needless_range_loop)]

use super::errors::{Result, UtilsError};
use crate::atoms::Vector3D;
use ndarray::Array2;

/// Relative determinant threshold below which a matrix is treated as singular
const SINGULAR_THRESHOLD: f64 = 1e-12;

/// Ensure a matrix is 3x3
pub fn check_3x3(matrix: &Array2<f64>) -> Result<()> {
    let shape = matrix.dim();
    if shape != (3, 3) {
        return Err(UtilsError::Shape {
            expected: (3, 3),
            found: shape,
        });
    }
    Ok(())
}

/// Build a 3x3 array from nested rows
pub fn from_rows(rows: [[f64; 3]; 3]) -> Array2<f64> {
    Array2::from_shape_fn((3, 3), |(i, j)| rows[i][j])
}

/// Determinant of a 3x3 matrix by cofactor expansion along the first row
pub fn determinant_3x3(m: &Array2<f64>) -> f64 {
    m[[0, 0]] * (m[[1, 1]] * m[[2, 2]] - m[[1, 2]] * m[[2, 1]])
        - m[[0, 1]] * (m[[1, 0]] * m[[2, 2]] - m[[1, 2]] * m[[2, 0]])
        + m[[0, 2]] * (m[[1, 0]] * m[[2, 1]] - m[[1, 1]] * m[[2, 0]])
}

/// Inverse of a 3x3 matrix via the adjugate
///
/// # Errors
///
/// Returns [`UtilsError::Math`] when the determinant is zero, not finite, or
/// negligible compared to the product of the row lengths.
pub fn inverse_3x3(m: &Array2<f64>) -> Result<Array2<f64>> {
    check_3x3(m)?;

    let det = determinant_3x3(m);
    let scale: f64 = m
        .rows()
        .into_iter()
        .map(|row| row.dot(&row).sqrt())
        .product();

    if !det.is_finite() || det.abs() <= SINGULAR_THRESHOLD * scale || scale == 0.0 {
        return Err(UtilsError::Math(format!(
            "matrix is singular (determinant {:e})",
            det
        )));
    }

    let mut inv = Array2::<f64>::zeros((3, 3));
    for i in 0..3 {
        for j in 0..3 {
            // cofactor of (j, i) gives the adjugate entry (i, j)
            let r0 = (j + 1) % 3;
            let r1 = (j + 2) % 3;
            let c0 = (i + 1) % 3;
            let c1 = (i + 2) % 3;
            inv[[i, j]] = (m[[r0, c0]] * m[[r1, c1]] - m[[r0, c1]] * m[[r1, c0]]) / det;
        }
    }

    Ok(inv)
}

/// Row vector times matrix: `out_j = sum_i v_i * m[i][j]`
pub fn row_times_matrix(v: &Vector3D, m: &Array2<f64>) -> Vector3D {
    let c = v.to_array();
    let mut out = [0.0; 3];
    for j in 0..3 {
        out[j] = c[0] * m[[0, j]] + c[1] * m[[1, j]] + c[2] * m[[2, j]];
    }
    Vector3D::from_array(out)
}

/// Matrix times column vector: `out_i = sum_j m[i][j] * v_j`
pub fn matrix_times_column(m: &Array2<f64>, v: &Vector3D) -> Vector3D {
    let c = v.to_array();
    let mut out = [0.0; 3];
    for i in 0..3 {
        out[i] = m[[i, 0]] * c[0] + m[[i, 1]] * c[1] + m[[i, 2]] * c[2];
    }
    Vector3D::from_array(out)
}
