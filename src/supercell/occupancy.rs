/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Coincident-site groups and partial-occupancy sampling
//!
//! After the (z, y, x) sort, sites sharing a position are adjacent. Each run
//! of such sites forms one [`OccupancyGroup`], of which at most one member is
//! materialised per draw. Over-occupied groups (total above 1) are sampled
//! with relative weights and never produce a vacancy.

use crate::atoms::FractionalAtom;
use crate::utils::constants::POSITION_TOLERANCE;
use rand::Rng;
use std::ops::Range;

/// A run of sites at one position
#[derive(Debug, Clone, PartialEq)]
pub struct OccupancyGroup {
    members: Range<usize>,
    total_occupancy: f64,
}

/// Outcome of resolving one group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SiteDraw {
    /// Index of the emitted site, `None` for a vacancy
    pub winner: Option<usize>,
    /// Candidates not emitted
    pub removed: usize,
}

impl OccupancyGroup {
    /// Site indices belonging to the group
    pub fn members(&self) -> Range<usize> {
        self.members.clone()
    }

    /// Number of candidate sites
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Always false; groups hold at least one site
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Sum of member occupancies (1 when vacancies are not handled)
    pub fn total_occupancy(&self) -> f64 {
        self.total_occupancy
    }

    /// True when resolving this group consumes a random draw
    pub fn needs_sampling(&self) -> bool {
        self.total_occupancy < 1.0 || self.members.len() > 1
    }

    /// Pick at most one member of the group
    ///
    /// A single candidate with total occupancy of at least 1 is emitted without
    /// a draw. Otherwise `r` is uniform in [0, 1) and the threshold is `r` when
    /// the group is under-occupied, `T · r` when it is not; the member whose
    /// cumulative occupancy interval contains the threshold wins.
    pub fn resolve<R: Rng + ?Sized>(&self, sites: &[FractionalAtom], rng: &mut R) -> SiteDraw {
        if !self.needs_sampling() {
            return SiteDraw {
                winner: Some(self.members.start),
                removed: 0,
            };
        }

        let r: f64 = rng.gen();
        let choice = if self.total_occupancy < 1.0 {
            r
        } else {
            self.total_occupancy * r
        };

        let mut winner = None;
        let mut last = 0.0;
        for index in self.members() {
            let occupancy = sites[index].occupancy;
            if winner.is_none() && choice >= last && choice < last + occupancy {
                winner = Some(index);
            }
            last += occupancy;
        }
        // T · r can round up to T itself
        if winner.is_none() && self.total_occupancy >= 1.0 {
            winner = Some(self.members.end - 1);
        }

        SiteDraw {
            winner,
            removed: self.len() - usize::from(winner.is_some()),
        }
    }
}

/// Split position-sorted sites into coincident-site groups
///
/// A group grows while the next site lies within the position tolerance of the
/// group's first site on every axis. With `handle_vacancies` off every site is
/// its own group and is always emitted.
pub fn find_groups(sites: &[FractionalAtom], handle_vacancies: bool) -> Vec<OccupancyGroup> {
    let mut groups = Vec::new();
    let mut start = 0;
    while start < sites.len() {
        if !handle_vacancies {
            groups.push(OccupancyGroup {
                members: start..start + 1,
                total_occupancy: 1.0,
            });
            start += 1;
            continue;
        }

        let anchor = &sites[start].position;
        let mut end = start + 1;
        let mut total = sites[start].occupancy;
        while end < sites.len() && sites[end].position.coincides_with(anchor, POSITION_TOLERANCE) {
            total += sites[end].occupancy;
            end += 1;
        }
        groups.push(OccupancyGroup {
            members: start..end,
            total_occupancy: total,
        });
        start = end;
    }
    groups
}
