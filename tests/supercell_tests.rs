/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

use approx::assert_relative_eq;
use std::f64::consts::FRAC_PI_2;
use supercell_rs::atoms::{sort, AbsoluteAtom, FractionalAtom, UnitCell, Vector3D};
use supercell_rs::lattice::LatticeMetric;
use supercell_rs::supercell::{
    ErrorKind, ExpansionContext, OccupancySampling, SupercellBuilder, SupercellConfig,
    SupercellError, VibrationModel,
};

fn cubic_cell(a: f64, sites: Vec<FractionalAtom>) -> UnitCell {
    let metric = LatticeMetric::from_rows([[a, 0.0, 0.0], [0.0, a, 0.0], [0.0, 0.0, a]]).unwrap();
    UnitCell::new(metric, sites).unwrap()
}

fn build(config: SupercellConfig, cell: &UnitCell, seed: u64) -> supercell_rs::supercell::Supercell {
    let builder = SupercellBuilder::new(config).unwrap();
    let mut context = ExpansionContext::seeded(seed);
    builder.build(cell, &mut context).unwrap()
}

fn sorted_positions(atoms: &[AbsoluteAtom]) -> Vec<Vector3D> {
    let mut atoms = atoms.to_vec();
    sort::sort_by_position(&mut atoms);
    atoms.iter().map(|atom| atom.position).collect()
}

#[test]
fn test_replicating_a_simple_cubic_cell() {
    let a = 3.0;
    let cell = cubic_cell(a, vec![FractionalAtom::new(29, Vector3D::zero())]);
    let supercell = build(
        SupercellConfig {
            replicas: [2, 2, 2],
            ..Default::default()
        },
        &cell,
        1,
    );

    assert_eq!(supercell.len(), 8);
    assert_eq!(supercell.extents, Vector3D::new(2.0 * a, 2.0 * a, 2.0 * a));
    assert_eq!(supercell.removed_sites, 0);

    let mut expected = Vec::new();
    for iz in 0..2 {
        for iy in 0..2 {
            for ix in 0..2 {
                expected.push(Vector3D::new(ix as f64 * a, iy as f64 * a, iz as f64 * a));
            }
        }
    }
    assert_eq!(sorted_positions(&supercell.atoms), expected);
    for atom in &supercell.atoms {
        assert!(atom.position.x >= 0.0 && atom.position.y >= 0.0 && atom.position.z >= 0.0);
    }
}

#[test]
fn test_replication_order_is_replica_major() {
    let cell = cubic_cell(
        2.0,
        vec![
            FractionalAtom::new(8, Vector3D::new(0.5, 0.5, 0.5)),
            FractionalAtom::new(12, Vector3D::zero()),
        ],
    );
    let supercell = build(
        SupercellConfig {
            replicas: [1, 1, 2],
            ..Default::default()
        },
        &cell,
        1,
    );

    let order: Vec<u32> = supercell.atoms.iter().map(|a| a.atomic_number).collect();
    assert_eq!(order, vec![12, 8, 12, 8]);
    assert_eq!(supercell.atoms[2].position, Vector3D::new(0.0, 0.0, 2.0));
}

#[test]
fn test_tilt_about_z_swaps_extents() {
    let cell = cubic_cell(2.0, vec![FractionalAtom::new(14, Vector3D::new(0.25, 0.25, 0.25))]);
    let supercell = build(
        SupercellConfig {
            replicas: [3, 1, 1],
            tilt: [0.0, 0.0, FRAC_PI_2],
            ..Default::default()
        },
        &cell,
        1,
    );

    assert_relative_eq!(supercell.extents.x, 2.0, epsilon = 1e-12);
    assert_relative_eq!(supercell.extents.y, 6.0, epsilon = 1e-12);
    assert_relative_eq!(supercell.extents.z, 2.0, epsilon = 1e-12);
    for atom in &supercell.atoms {
        let p = atom.position;
        assert!(p.x > 0.0 && p.x < 2.0, "{}", p);
        assert!(p.y > 0.0 && p.y < 6.0, "{}", p);
        assert_relative_eq!(p.z, 0.5, epsilon = 1e-12);
    }
}

#[test]
fn test_offsets_shift_x_and_y() {
    let cell = cubic_cell(3.0, vec![FractionalAtom::new(29, Vector3D::zero())]);
    let supercell = build(
        SupercellConfig {
            offset: [1.5, -0.5],
            ..Default::default()
        },
        &cell,
        1,
    );

    assert_eq!(supercell.atoms[0].position, Vector3D::new(1.5, -0.5, 0.0));
    assert_eq!(supercell.extents, Vector3D::new(3.0, 3.0, 3.0));
}

#[test]
fn test_tilt_box_without_tilt_matches_replication() {
    let a = 4.0;
    let cell = cubic_cell(
        a,
        vec![
            FractionalAtom::new(29, Vector3D::new(0.25, 0.25, 0.25)),
            FractionalAtom::new(8, Vector3D::new(0.5, 0.5, 0.75)),
        ],
    );
    let replicated = build(
        SupercellConfig {
            replicas: [2, 3, 1],
            ..Default::default()
        },
        &cell,
        3,
    );
    let boxed = build(
        SupercellConfig {
            box_size: [2.0 * a, 3.0 * a, a],
            ..Default::default()
        },
        &cell,
        3,
    );

    assert_eq!(boxed.len(), replicated.len());
    assert_eq!(boxed.extents, replicated.extents);
    let expected = sorted_positions(&replicated.atoms);
    let actual = sorted_positions(&boxed.atoms);
    for (e, b) in expected.iter().zip(&actual) {
        assert_relative_eq!(e.x, b.x, epsilon = 1e-12);
        assert_relative_eq!(e.y, b.y, epsilon = 1e-12);
        assert_relative_eq!(e.z, b.z, epsilon = 1e-12);
    }
}

#[test]
fn test_tilt_box_bounds_are_inclusive() {
    let cell = cubic_cell(4.0, vec![FractionalAtom::new(26, Vector3D::zero())]);

    // every lattice point sits on a face of the box
    let on_faces = build(
        SupercellConfig {
            box_size: [4.0, 4.0, 4.0],
            ..Default::default()
        },
        &cell,
        1,
    );
    assert_eq!(on_faces.len(), 8);

    // the z = 4 layer is now strictly outside
    let trimmed = build(
        SupercellConfig {
            box_size: [4.0, 4.0, 3.9],
            ..Default::default()
        },
        &cell,
        1,
    );
    assert_eq!(trimmed.len(), 4);
    assert_eq!(trimmed.extents, Vector3D::new(4.0, 4.0, 3.9));
    assert!(trimmed.atoms.iter().all(|atom| atom.position.z == 0.0));
    assert_eq!(trimmed.removed_sites, 0);
}

#[test]
fn test_tilt_box_counts_removals_inside_the_box_only() {
    // replicas 0..=2 are scanned per axis but only 0..=1 land in the box
    let shared = cubic_cell(
        4.0,
        vec![
            FractionalAtom::new(26, Vector3D::new(0.5, 0.5, 0.5)).with_occupancy(0.5),
            FractionalAtom::new(27, Vector3D::new(0.5, 0.5, 0.5)).with_occupancy(0.5),
        ],
    );
    let config = SupercellConfig {
        box_size: [8.0, 8.0, 8.0],
        ..Default::default()
    };
    let supercell = build(config.clone(), &shared, 4);
    assert_eq!(supercell.len(), 8);
    assert_eq!(supercell.removed_sites, 8);

    let half = cubic_cell(
        4.0,
        vec![FractionalAtom::new(3, Vector3D::new(0.5, 0.5, 0.5)).with_occupancy(0.5)],
    );
    for seed in 0..10 {
        let supercell = build(config.clone(), &half, seed);
        assert_eq!(supercell.len() + supercell.removed_sites, 8);
    }
}

#[test]
fn test_tilted_box_stays_inside() {
    let cell = cubic_cell(4.0, vec![FractionalAtom::new(79, Vector3D::new(0.5, 0.5, 0.5))]);
    let supercell = build(
        SupercellConfig {
            box_size: [20.0, 20.0, 8.0],
            tilt: [0.0, 0.0, 0.3],
            offset: [0.7, 0.2],
            ..Default::default()
        },
        &cell,
        1,
    );

    assert!((35..=65).contains(&supercell.len()), "{}", supercell.len());
    for atom in &supercell.atoms {
        let p = atom.position;
        assert!((0.0..=20.0).contains(&p.x) && (0.0..=20.0).contains(&p.y));
        assert!((0.0..=8.0).contains(&p.z));
    }
}

#[test]
fn test_per_site_sampling_shares_the_draw() {
    let cell = cubic_cell(3.0, vec![FractionalAtom::new(3, Vector3D::zero()).with_occupancy(0.5)]);

    for seed in 0..20 {
        let supercell = build(
            SupercellConfig {
                replicas: [3, 3, 3],
                ..Default::default()
            },
            &cell,
            seed,
        );
        assert!(supercell.len() == 0 || supercell.len() == 27);
        assert_eq!(supercell.len() + supercell.removed_sites, 27);
    }
}

#[test]
fn test_per_replica_sampling_draws_every_replica() {
    let cell = cubic_cell(3.0, vec![FractionalAtom::new(3, Vector3D::zero()).with_occupancy(0.3)]);
    let supercell = build(
        SupercellConfig {
            replicas: [10, 10, 10],
            occupancy_sampling: OccupancySampling::PerReplica,
            ..Default::default()
        },
        &cell,
        77,
    );

    // binomial(1000, 0.3): mean 300, sd ~14.5
    assert!((240..=360).contains(&supercell.len()), "{}", supercell.len());
    assert_eq!(supercell.len() + supercell.removed_sites, 1000);
}

#[test]
fn test_mixed_site_emits_one_atom_per_replica() {
    let cell = cubic_cell(
        2.9,
        vec![
            FractionalAtom::new(26, Vector3D::zero()).with_occupancy(0.5),
            FractionalAtom::new(27, Vector3D::zero()).with_occupancy(0.5),
        ],
    );
    let supercell = build(
        SupercellConfig {
            replicas: [4, 4, 4],
            occupancy_sampling: OccupancySampling::PerReplica,
            ..Default::default()
        },
        &cell,
        8,
    );

    assert_eq!(supercell.len(), 64);
    assert_eq!(supercell.removed_sites, 64);
    let counts = supercell.species_counts();
    assert_eq!(counts.len(), 2);
    assert_eq!(counts[0].atomic_number, 27);
    assert_eq!(counts[0].count + counts[1].count, 64);
}

#[test]
fn test_vacancy_handling_off_keeps_every_site() {
    let cell = cubic_cell(
        2.9,
        vec![
            FractionalAtom::new(26, Vector3D::zero()).with_occupancy(0.1),
            FractionalAtom::new(27, Vector3D::zero()).with_occupancy(0.1),
        ],
    );
    let supercell = build(
        SupercellConfig {
            replicas: [2, 2, 2],
            handle_vacancies: false,
            ..Default::default()
        },
        &cell,
        8,
    );
    assert_eq!(supercell.len(), 16);
    assert_eq!(supercell.removed_sites, 0);
}

#[test]
fn test_einstein_with_zero_debye_waller_does_not_move_atoms() {
    let cell = cubic_cell(
        3.5,
        vec![
            FractionalAtom::new(6, Vector3D::zero()),
            FractionalAtom::new(6, Vector3D::new(0.25, 0.25, 0.25)),
        ],
    );
    let config = SupercellConfig {
        replicas: [2, 2, 2],
        ..Default::default()
    };
    let still = build(config.clone(), &cell, 4);
    let einstein = build(
        SupercellConfig {
            vibration: VibrationModel::Einstein,
            ..config
        },
        &cell,
        4,
    );

    assert_eq!(still.atoms, einstein.atoms);
}

#[test]
fn test_einstein_displacements_are_reported() {
    let cell = cubic_cell(
        3.5,
        vec![FractionalAtom::new(6, Vector3D::zero()).with_debye_waller(0.4)],
    );
    let builder = SupercellBuilder::new(SupercellConfig {
        replicas: [4, 4, 4],
        vibration: VibrationModel::Einstein,
        ..Default::default()
    })
    .unwrap();
    let mut context = ExpansionContext::seeded(10);
    let supercell = builder.build(&cell, &mut context).unwrap();

    let moved = supercell
        .atoms
        .iter()
        .filter(|atom| {
            let p = atom.position * (1.0 / 3.5);
            (p.x - p.x.round()).abs() > 1e-9
        })
        .count();
    assert!(moved > 60);

    let report = context.displacement_report();
    assert_eq!(report.len(), 1);
    assert_eq!(report[0].atomic_number, 6);
    assert_eq!(report[0].pass_rms, report[0].running_rms);
}

#[test]
fn test_invalid_atomic_number_is_input_data() {
    let metric = LatticeMetric::from_rows([[3.0, 0.0, 0.0], [0.0, 3.0, 0.0], [0.0, 0.0, 3.0]]).unwrap();
    let err: SupercellError = UnitCell::new(metric, vec![FractionalAtom::new(0, Vector3D::zero())])
        .unwrap_err()
        .into();
    assert_eq!(err.kind(), ErrorKind::InputData);
}

#[test]
fn test_dispersion_with_box_fails_fast() {
    let err = SupercellBuilder::new(SupercellConfig {
        box_size: [10.0, 10.0, 10.0],
        vibration: VibrationModel::Dispersion,
        phonon_file: Some("/nonexistent/phonons.bin".into()),
        ..Default::default()
    })
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);
}
