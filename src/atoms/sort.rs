/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Total orders over atoms
//!
//! Sorting by position brings coincident sites next to each other so that
//! occupancy groups can be found with a single linear scan. Both sort helpers
//! use the standard library's stable sort, so atoms with equal keys keep their
//! input order.

use super::atom::{AbsoluteAtom, FractionalAtom};
use super::vector::Vector3D;
use std::cmp::Ordering;

/// Anything with an atomic number and a position
pub trait AtomLike {
    fn atomic_number(&self) -> u32;
    fn position(&self) -> &Vector3D;
}

impl AtomLike for FractionalAtom {
    fn atomic_number(&self) -> u32 {
        self.atomic_number
    }

    fn position(&self) -> &Vector3D {
        &self.position
    }
}

impl AtomLike for AbsoluteAtom {
    fn atomic_number(&self) -> u32 {
        self.atomic_number
    }

    fn position(&self) -> &Vector3D {
        &self.position
    }
}

/// Heavier elements first
pub fn compare_atomic_number<A: AtomLike>(a: &A, b: &A) -> Ordering {
    b.atomic_number().cmp(&a.atomic_number())
}

/// Lexicographic on (z, y, x), ascending
///
/// Signed zeros compare equal.
pub fn compare_zyx<A: AtomLike>(a: &A, b: &A) -> Ordering {
    let key = |v: &Vector3D| [v.z + 0.0, v.y + 0.0, v.x + 0.0];
    let (ka, kb) = (key(a.position()), key(b.position()));
    ka[0]
        .total_cmp(&kb[0])
        .then_with(|| ka[1].total_cmp(&kb[1]))
        .then_with(|| ka[2].total_cmp(&kb[2]))
}

/// Stable sort by descending atomic number
pub fn sort_by_atomic_number<A: AtomLike>(atoms: &mut [A]) {
    atoms.sort_by(compare_atomic_number);
}

/// Stable sort by (z, y, x)
pub fn sort_by_position<A: AtomLike>(atoms: &mut [A]) {
    atoms.sort_by(compare_zyx);
}
