/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Rigid crystal tilt

use crate::atoms::Vector3D;
use crate::utils::matrix::{from_rows, matrix_times_column};
use ndarray::Array2;

/// Rotation built from tilt angles (radians) about the x, y and z axes
///
/// The three axis rotations compose to:
///
/// ```text
/// | cy·cz             cy·sz             -sy   |
/// | sx·sy·cz - cx·sz  sx·sy·sz + cx·cz  sx·cy |
/// | cx·sy·cz + sx·sz  cx·sy·sz - sx·cz  cx·cy |
/// ```
///
/// and acts on column vectors, `v' = R · v`.
#[derive(Debug, Clone)]
pub struct TiltRotation {
    angles: [f64; 3],
    matrix: Array2<f64>,
}

impl TiltRotation {
    /// Build the rotation for tilt angles `[tilt_x, tilt_y, tilt_z]`
    pub fn new(angles: [f64; 3]) -> Self {
        let (sx, cx) = angles[0].sin_cos();
        let (sy, cy) = angles[1].sin_cos();
        let (sz, cz) = angles[2].sin_cos();

        let matrix = from_rows([
            [cy * cz, cy * sz, -sy],
            [sx * sy * cz - cx * sz, sx * sy * sz + cx * cz, sx * cy],
            [cx * sy * cz + sx * sz, cx * sy * sz - sx * cz, cx * cy],
        ]);

        Self { angles, matrix }
    }

    /// Tilt angles this rotation was built from
    pub fn angles(&self) -> [f64; 3] {
        self.angles
    }

    /// True when every tilt angle is exactly zero
    pub fn is_identity(&self) -> bool {
        self.angles.iter().all(|&a| a == 0.0)
    }

    /// The 3x3 rotation matrix
    pub fn matrix(&self) -> &Array2<f64> {
        &self.matrix
    }

    /// Rotate a vector
    pub fn rotate(&self, v: &Vector3D) -> Vector3D {
        matrix_times_column(&self.matrix, v)
    }

    /// Rotate `v` about `center`
    pub fn rotate_about(&self, v: &Vector3D, center: &Vector3D) -> Vector3D {
        self.rotate(&(*v - *center)) + *center
    }
}
