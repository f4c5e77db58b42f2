/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

use rand::rngs::StdRng;
use rand::SeedableRng;
use rstest::rstest;
use supercell_rs::atoms::{FractionalAtom, Vector3D};
use supercell_rs::supercell::find_groups;

fn shared_site(occupancies: &[f64]) -> Vec<FractionalAtom> {
    occupancies
        .iter()
        .enumerate()
        .map(|(i, &occ)| {
            FractionalAtom::new(20 + i as u32, Vector3D::new(0.25, 0.5, 0.75)).with_occupancy(occ)
        })
        .collect()
}

#[rstest]
#[case(0)]
#[case(17)]
#[case(123_456_789)]
fn test_single_full_site_is_always_emitted(#[case] seed: u64) {
    let sites = shared_site(&[1.0]);
    let groups = find_groups(&sites, true);
    let mut rng = StdRng::seed_from_u64(seed);

    assert_eq!(groups.len(), 1);
    for _ in 0..1000 {
        let draw = groups[0].resolve(&sites, &mut rng);
        assert_eq!(draw.winner, Some(0));
        assert_eq!(draw.removed, 0);
    }
}

#[rstest]
#[case(&[0.5, 0.5])]
#[case(&[0.7, 0.6])]
#[case(&[1.0, 1.0, 1.0])]
#[case(&[2.5])]
fn test_full_or_over_occupied_groups_never_vacate(#[case] occupancies: &[f64]) {
    let sites = shared_site(occupancies);
    let groups = find_groups(&sites, true);
    let mut rng = StdRng::seed_from_u64(99);
    let mut hits = vec![0usize; occupancies.len()];

    assert_eq!(groups.len(), 1);
    for _ in 0..2000 {
        let draw = groups[0].resolve(&sites, &mut rng);
        let winner = draw.winner.expect("a fully occupied site never becomes a vacancy");
        hits[winner] += 1;
        assert_eq!(draw.removed, occupancies.len() - 1);
    }

    // relative weights decide the winner
    let total: f64 = occupancies.iter().sum();
    for (i, &occ) in occupancies.iter().enumerate() {
        let rate = hits[i] as f64 / 2000.0;
        assert!((rate - occ / total).abs() < 0.05, "member {}: {}", i, rate);
    }
}

#[rstest]
#[case(&[0.3])]
#[case(&[0.2, 0.4])]
#[case(&[0.05, 0.05, 0.1])]
fn test_vacancy_rate_matches_missing_occupancy(#[case] occupancies: &[f64]) {
    let sites = shared_site(occupancies);
    let groups = find_groups(&sites, true);
    let mut rng = StdRng::seed_from_u64(2718);
    let trials = 20_000;

    let vacancies = (0..trials)
        .filter(|_| groups[0].resolve(&sites, &mut rng).winner.is_none())
        .count();

    let total: f64 = occupancies.iter().sum();
    let expected = 1.0 - total;
    let sigma = (expected * (1.0 - expected) / trials as f64).sqrt();
    let rate = vacancies as f64 / trials as f64;
    assert!(
        (rate - expected).abs() < 5.0 * sigma,
        "vacancy rate {} expected {}",
        rate,
        expected
    );
}

#[test]
fn test_groups_after_position_sort() {
    let mut sites = vec![
        FractionalAtom::new(8, Vector3D::new(0.5, 0.5, 0.5)),
        FractionalAtom::new(26, Vector3D::new(0.0, 0.0, 0.0)).with_occupancy(0.6),
        FractionalAtom::new(8, Vector3D::new(0.5, 0.0, 0.0)),
        FractionalAtom::new(27, Vector3D::new(0.0, 0.0, 0.0)).with_occupancy(0.4),
    ];
    supercell_rs::atoms::sort::sort_by_position(&mut sites);
    let groups = find_groups(&sites, true);

    assert_eq!(groups.len(), 3);
    assert_eq!(groups[0].len(), 2);
    assert!((groups[0].total_occupancy() - 1.0).abs() < 1e-15);
    // stable sort keeps Fe ahead of Co
    assert_eq!(sites[0].atomic_number, 26);
    assert_eq!(sites[1].atomic_number, 27);
}
