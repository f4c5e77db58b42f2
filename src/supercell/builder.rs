/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Supercell builder
//!
//! The builder owns the validated configuration and the prepared displacement
//! model. Each call to [`SupercellBuilder::build`] is one expansion pass: the
//! displacement generator is started, the cell is expanded in the configured
//! mode and the pass statistics are flushed exactly once.

use super::config::{ExpansionMode, SupercellConfig, VibrationModel};
use super::context::ExpansionContext;
use super::errors::{Result, SupercellError};
use super::occupancy::{find_groups, OccupancyGroup};
use super::output::Supercell;
use super::replicate::replicate;
use super::tilt_box::fill_box;
use crate::atoms::{FractionalAtom, UnitCell};
use crate::lattice::{LatticeMetric, TiltRotation};
use crate::phonon::{DisplacementGenerator, DisplacementModel, DisplacementTarget, PhononSpectrum};
use log::{debug, info, warn};
use std::sync::Arc;

/// Everything one expansion needs to know about the unit cell
pub(crate) struct PassInput<'a> {
    /// Sites in expansion order
    pub sites: &'a [FractionalAtom],
    /// Species index of every site
    pub species: &'a [usize],
    pub groups: &'a [OccupancyGroup],
    pub metric: &'a LatticeMetric,
    pub generator: &'a DisplacementGenerator,
}

impl PassInput<'_> {
    /// Displacement request for `site` in replica `replica`
    pub fn target(&self, site: usize, replica: [i32; 3]) -> DisplacementTarget {
        DisplacementTarget {
            site,
            replica,
            debye_waller: self.sites[site].debye_waller,
            species: self.species[site],
        }
    }
}

/// Builds supercells from unit cells under one configuration
#[derive(Debug, Clone)]
pub struct SupercellBuilder {
    config: SupercellConfig,
    model: DisplacementModel,
    rotation: TiltRotation,
}

impl SupercellBuilder {
    /// Validate `config` and prepare the displacement model
    ///
    /// In dispersion mode the phonon spectrum is loaded here. An unreadable
    /// file falls back to the Einstein model with a warning; a malformed one
    /// is an error.
    pub fn new(config: SupercellConfig) -> Result<Self> {
        config.validate()?;

        let temperature = config.temperature;
        let model = match config.vibration {
            VibrationModel::Static => DisplacementModel::Static,
            VibrationModel::Einstein => DisplacementModel::Einstein { temperature },
            VibrationModel::Dispersion => {
                let path = config.phonon_file.as_deref().ok_or_else(|| {
                    SupercellError::InvalidConfig("the dispersion model needs a phonon_file".into())
                })?;
                match PhononSpectrum::load(path) {
                    Ok(spectrum) => DisplacementModel::Dispersion {
                        spectrum: Arc::new(spectrum),
                        temperature,
                    },
                    Err(err) if err.is_recoverable() => {
                        warn!("{}; using the Einstein model instead", err);
                        DisplacementModel::Einstein { temperature }
                    }
                    Err(err) => return Err(err.into()),
                }
            }
        };

        let rotation = TiltRotation::new(config.tilt);
        Ok(Self {
            config,
            model,
            rotation,
        })
    }

    /// The validated configuration
    pub fn config(&self) -> &SupercellConfig {
        &self.config
    }

    /// The displacement model in effect after any fallback
    pub fn displacement_model(&self) -> &DisplacementModel {
        &self.model
    }

    /// Run one expansion pass over `cell`
    pub fn build(&self, cell: &UnitCell, context: &mut ExpansionContext) -> Result<Supercell> {
        let metric = cell.metric();
        let p = metric.parameters();
        info!(
            "Lattice parameters: a={:.4}, b={:.4}, c={:.4} Å, alpha={:.3}, beta={:.3}, gamma={:.3}",
            p.a, p.b, p.c, p.alpha, p.beta, p.gamma
        );

        let sites = cell.ordered_sites(self.config.handle_vacancies);
        let species: Vec<usize> = sites
            .iter()
            .map(|site| context.species.intern(site.atomic_number))
            .collect();
        let groups = find_groups(&sites, self.config.handle_vacancies);

        let mut generator = DisplacementGenerator::new(&self.model, metric)?;
        generator.check_sites(sites.len())?;
        generator.begin_pass(&mut context.rng, &mut context.statistics);

        let input = PassInput {
            sites: &sites,
            species: &species,
            groups: &groups,
            metric,
            generator: &generator,
        };

        let supercell = match self.config.mode() {
            ExpansionMode::Replicate { replicas } => {
                info!(
                    "Replicating {} sites {}x{}x{} ({} model)",
                    sites.len(),
                    replicas[0],
                    replicas[1],
                    replicas[2],
                    self.model.name()
                );
                replicate(
                    &input,
                    replicas,
                    self.config.occupancy_sampling,
                    &self.rotation,
                    self.config.offset,
                    context,
                )?
            }
            ExpansionMode::TiltBox { box_size } => {
                info!(
                    "Filling a {:.3} x {:.3} x {:.3} Å box with {} sites ({} model)",
                    box_size[0],
                    box_size[1],
                    box_size[2],
                    sites.len(),
                    self.model.name()
                );
                fill_box(&input, box_size, &self.rotation, self.config.offset, context)?
            }
        };

        generator.end_pass(&mut context.statistics);

        if supercell.removed_sites > 0 {
            debug!(
                "Removed {} atoms because of occupancies < 1 or multiple atoms in the same place",
                supercell.removed_sites
            );
        }
        info!(
            "Supercell with {} atoms, extents {}",
            supercell.len(),
            supercell.extents
        );
        Ok(supercell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atoms::Vector3D;
    use crate::supercell::ErrorKind;

    fn rock_salt() -> UnitCell {
        let metric =
            LatticeMetric::from_rows([[5.64, 0.0, 0.0], [0.0, 5.64, 0.0], [0.0, 0.0, 5.64]]).unwrap();
        let sites = vec![
            FractionalAtom::new(11, Vector3D::new(0.0, 0.0, 0.0)).with_debye_waller(1.6),
            FractionalAtom::new(17, Vector3D::new(0.5, 0.5, 0.5)).with_debye_waller(1.2),
        ];
        UnitCell::new(metric, sites).unwrap()
    }

    #[test]
    fn test_missing_spectrum_falls_back_to_einstein() {
        let config = SupercellConfig {
            vibration: VibrationModel::Dispersion,
            phonon_file: Some("/nonexistent/phonons.bin".into()),
            temperature: 150.0,
            ..Default::default()
        };
        let builder = SupercellBuilder::new(config).unwrap();
        assert!(matches!(
            builder.displacement_model(),
            DisplacementModel::Einstein { temperature } if *temperature == 150.0
        ));
    }

    #[test]
    fn test_each_build_is_one_pass() {
        let builder = SupercellBuilder::new(SupercellConfig {
            replicas: [2, 2, 2],
            vibration: VibrationModel::Einstein,
            ..Default::default()
        })
        .unwrap();
        let cell = rock_salt();
        let mut context = ExpansionContext::seeded(42);

        for pass in 1..=3 {
            let supercell = builder.build(&cell, &mut context).unwrap();
            assert_eq!(supercell.len(), 16);
            assert_eq!(context.passes_completed(), pass);
        }

        let report = context.displacement_report();
        assert_eq!(report.len(), 2);
        assert!(report.iter().all(|s| s.running_rms.unwrap() > 0.0));
    }

    #[test]
    fn test_static_build_records_no_statistics() {
        let builder = SupercellBuilder::new(SupercellConfig::default()).unwrap();
        let mut context = ExpansionContext::seeded(1);
        builder.build(&rock_salt(), &mut context).unwrap();

        let report = context.displacement_report();
        assert_eq!(report.len(), 2);
        assert!(report.iter().all(|s| s.running_rms.is_none()));
        assert_eq!(context.passes_completed(), 1);
    }

    #[test]
    fn test_invalid_config_is_reported_before_building() {
        let err = SupercellBuilder::new(SupercellConfig {
            replicas: [0, 1, 1],
            ..Default::default()
        })
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }
}
