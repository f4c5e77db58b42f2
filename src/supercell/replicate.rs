/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Replication mode: Nx × Ny × Nz copies of the unit cell
//!
//! Replicas are visited with `ix` outermost and `iz` innermost, each in
//! ascending order; within a replica the coincident-site groups follow the
//! (z, y, x) site order. After conversion to Cartesian coordinates the whole
//! block is tilted rigidly about its center and shifted so that the bounding
//! box of its eight corners starts at the origin.

use super::builder::PassInput;
use super::config::OccupancySampling;
use super::context::ExpansionContext;
use super::errors::Result;
use super::occupancy::SiteDraw;
use super::output::Supercell;
use crate::atoms::Vector3D;
use crate::lattice::TiltRotation;

/// Expand the cell `replicas` times along a, b and c
pub(crate) fn replicate(
    input: &PassInput<'_>,
    replicas: [u32; 3],
    sampling: OccupancySampling,
    rotation: &TiltRotation,
    offset: [f64; 2],
    context: &mut ExpansionContext,
) -> Result<Supercell> {
    let per_site: Option<Vec<SiteDraw>> = match sampling {
        OccupancySampling::PerSite => Some(
            input
                .groups
                .iter()
                .map(|group| group.resolve(input.sites, &mut context.rng))
                .collect(),
        ),
        OccupancySampling::PerReplica => None,
    };

    let replica_count = replicas.iter().map(|&n| n as usize).product::<usize>();
    let mut atoms = Vec::with_capacity(replica_count * input.sites.len());
    let mut removed_sites = 0;

    for ix in 0..replicas[0] as i32 {
        for iy in 0..replicas[1] as i32 {
            for iz in 0..replicas[2] as i32 {
                let replica = [ix, iy, iz];
                for (index, group) in input.groups.iter().enumerate() {
                    let draw = match &per_site {
                        Some(draws) => draws[index],
                        None => group.resolve(input.sites, &mut context.rng),
                    };
                    removed_sites += draw.removed;
                    let Some(site) = draw.winner else {
                        continue;
                    };

                    let u = input.generator.displace(
                        &input.target(site, replica),
                        &mut context.rng,
                        &mut context.statistics,
                    )?;
                    let atom = &input.sites[site];
                    let fractional = atom.position + Vector3D::from_indices(replica) + u;
                    atoms.push(atom.to_absolute_at(&fractional, input.metric));
                }
            }
        }
    }

    let size = Vector3D::new(
        replicas[0] as f64,
        replicas[1] as f64,
        replicas[2] as f64,
    );
    let center = input.metric.to_cartesian(&(size * 0.5));
    let tilted = !rotation.is_identity();
    if tilted {
        for atom in &mut atoms {
            atom.position = rotation.rotate_about(&atom.position, &center);
        }
    }

    let mut lower = Vector3D::new(f64::INFINITY, f64::INFINITY, f64::INFINITY);
    let mut upper = -lower;
    for corner in corners(size) {
        let mut point = input.metric.to_cartesian(&corner);
        if tilted {
            point = rotation.rotate_about(&point, &center);
        }
        lower = lower.min(&point);
        upper = upper.max(&point);
    }

    let shift = Vector3D::new(offset[0], offset[1], 0.0) - lower;
    for atom in &mut atoms {
        atom.translate(&shift);
    }

    Ok(Supercell {
        atoms,
        extents: upper - lower,
        removed_sites,
    })
}

/// The eight corners of the box spanned by `size`, in fractional units
pub(crate) fn corners(size: Vector3D) -> impl Iterator<Item = Vector3D> {
    (0..8).map(move |bits| {
        Vector3D::new(
            if bits & 4 != 0 { size.x } else { 0.0 },
            if bits & 2 != 0 { size.y } else { 0.0 },
            if bits & 1 != 0 { size.z } else { 0.0 },
        )
    })
}
