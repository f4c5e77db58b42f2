/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Tilt-and-box mode: fill a rectangular box with the tilted crystal

use super::builder::PassInput;
use super::context::ExpansionContext;
use super::errors::Result;
use super::output::Supercell;
use super::replicate::corners;
use crate::atoms::Vector3D;
use crate::lattice::TiltRotation;
use crate::utils::matrix::row_times_matrix;
use log::debug;

/// Expand the cell until it covers `box_size` after tilting by `rotation`
///
/// Every occupancy group is resolved afresh for each replica. A candidate is
/// kept when its undisplaced position, plus the offset, lies in
/// `[0, box_size]` on all three axes; only kept atoms are displaced, and only
/// draws inside the box count towards `removed_sites`. A vacancy is tested at
/// the position of the group's first member.
pub(crate) fn fill_box(
    input: &PassInput<'_>,
    box_size: [f64; 3],
    rotation: &TiltRotation,
    offset: [f64; 2],
    context: &mut ExpansionContext,
) -> Result<Supercell> {
    let tilted = input.metric.tilted(rotation);
    let inverse = tilted.inverse()?;
    let shift = Vector3D::new(offset[0], offset[1], 0.0);
    let extents = Vector3D::from_array(box_size);

    let mut lower = [i32::MAX; 3];
    let mut upper = [i32::MIN; 3];
    for corner in corners(extents) {
        let fractional = row_times_matrix(&(corner - shift), &inverse);
        for (axis, value) in fractional.to_array().into_iter().enumerate() {
            lower[axis] = lower[axis].min(value.floor() as i32);
            upper[axis] = upper[axis].max(value.ceil() as i32);
        }
    }
    debug!("Replica range {:?}..={:?}", lower, upper);

    let inside = |p: &Vector3D| {
        (0.0..=extents.x).contains(&p.x)
            && (0.0..=extents.y).contains(&p.y)
            && (0.0..=extents.z).contains(&p.z)
    };

    let mut atoms = Vec::new();
    let mut removed_sites = 0;
    for group in input.groups {
        for ix in lower[0]..=upper[0] {
            for iy in lower[1]..=upper[1] {
                for iz in lower[2]..=upper[2] {
                    let replica = [ix, iy, iz];
                    let draw = group.resolve(input.sites, &mut context.rng);
                    let site = draw.winner.unwrap_or(group.members().start);
                    let atom = &input.sites[site];
                    let fractional = atom.position + Vector3D::from_indices(replica);
                    // out-of-box candidates are neither atoms nor vacancies
                    if !inside(&(tilted.to_cartesian(&fractional) + shift)) {
                        continue;
                    }
                    removed_sites += draw.removed;
                    if draw.winner.is_none() {
                        continue;
                    }

                    let u = input.generator.displace(
                        &input.target(site, replica),
                        &mut context.rng,
                        &mut context.statistics,
                    )?;
                    let mut placed = atom.to_absolute_at(&(fractional + u), &tilted);
                    placed.translate(&shift);
                    atoms.push(placed);
                }
            }
        }
    }

    Ok(Supercell {
        atoms,
        extents,
        removed_sites,
    })
}
