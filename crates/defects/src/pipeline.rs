// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::borrow::Cow;

use common::CellGeometry;
use glam::DVec3;

use crate::acna::{refine_with_acna, AcnaInput};
use crate::cluster::find_defect_clusters;
use crate::error::Result;
use crate::filter::{filter_defects, tally_species, SpeciesExclusions};
use crate::lattice::Lattice;
use crate::occupancy::{classify_sites, validate_vacancy_radius};
use crate::result::{DefectCounts, DefectLists, DefectResult};
use crate::settings::DefectSettings;
use crate::split::{resolve_split_interstitials, SplitInput};
use crate::timer::StageTimer;

/// Finds the point defects of `input` relative to `reference`.
///
/// `drift` is added to a private copy of the reference positions when
/// `settings.drift_compensation` is set. `structure_types` holds one structure type per input
/// atom; when it is absent or empty the ACNA refinement is skipped.
///
/// Nothing is returned unless every pass succeeds.
pub fn find_defects(
    input: &Lattice,
    reference: &Lattice,
    geometry: &CellGeometry,
    settings: &DefectSettings,
    drift: Option<DVec3>,
    structure_types: Option<&[i32]>,
) -> Result<DefectResult> {
    let _timer = StageTimer::new("defect search");
    settings.validate()?;

    let reference: Cow<Lattice> = match drift {
        Some(offset) if settings.drift_compensation => {
            log::debug!("compensating drift of {}", offset);
            Cow::Owned(reference.translated(offset)?)
        }
        _ => Cow::Borrowed(reference),
    };
    let reference = reference.as_ref();

    if settings.check_vacancy_radius {
        validate_vacancy_radius(
            reference,
            geometry,
            settings.vacancy_radius,
            settings.min_cell_width,
        )?;
    }

    let occupancy = {
        let _timer = StageTimer::new("site classification");
        classify_sites(
            input,
            reference,
            geometry,
            settings.vacancy_radius,
            settings.min_cell_width,
        )?
    };
    let mut vacancies = occupancy.vacancies;
    let mut interstitials = occupancy.interstitials;
    let antisites = occupancy.antisites;

    if let Some(types) = structure_types.filter(|t| !t.is_empty()) {
        let _timer = StageTimer::new("ACNA refinement");
        let refined = refine_with_acna(
            settings.acna_algorithm,
            &AcnaInput {
                input,
                reference,
                geometry,
                structure_types: types,
                ideal_type: settings.acna_structure_type,
                vacancy_radius: settings.vacancy_radius,
                min_cell_width: settings.min_cell_width,
            },
            &vacancies,
            &interstitials,
        )?;
        vacancies = refined.vacancies;
        interstitials = refined.interstitials;
    }

    let mut split_interstitials = Vec::new();
    if settings.identify_split_interstitials && !vacancies.is_empty() && interstitials.len() > 1 {
        let _timer = StageTimer::new("split interstitial detection");
        let resolved = resolve_split_interstitials(
            settings.split_algorithm,
            &SplitInput {
                input,
                reference,
                geometry,
                vacancy_radius: settings.vacancy_radius,
                min_cell_width: settings.min_cell_width,
            },
            &vacancies,
            &interstitials,
        )?;
        vacancies = resolved.vacancies;
        interstitials = resolved.interstitials;
        split_interstitials = resolved.split_interstitials;
    }

    let exclusions = settings.visible_species.as_ref().map(|visible| {
        SpeciesExclusions::from_visible(visible, input.species_list(), reference.species_list())
    });
    let mut defects = filter_defects(
        DefectLists {
            vacancies,
            interstitials,
            antisites,
            split_interstitials,
        },
        &settings.defect_types(),
        exclusions.as_ref(),
        input,
        reference,
    );

    let clusters = if settings.find_clusters {
        let _timer = StageTimer::new("defect clustering");
        let (kept, clusters) = find_defect_clusters(
            &defects,
            input,
            reference,
            geometry,
            settings.cluster_radius,
            settings.cluster_size_range(),
            settings.min_cell_width,
        )?;
        defects = kept;
        Some(clusters)
    } else {
        None
    };

    let counts = DefectCounts {
        total: defects.len(),
        vacancies: defects.vacancies.len(),
        interstitials: defects.interstitials.len(),
        antisites: defects.antisites.len(),
        split_interstitials: defects.split_interstitials.len(),
        clusters: clusters.as_ref().map_or(0, |c| c.count()),
    };
    let tallies = tally_species(&defects, input, reference)?;

    log::debug!(
        "found {} defects: {} vacancies; {} interstitials; {} antisites; {} split interstitials; \
         {} clusters",
        counts.total,
        counts.vacancies,
        counts.interstitials,
        counts.antisites,
        counts.split_interstitials,
        counts.clusters
    );

    Ok(DefectResult {
        defects,
        clusters,
        counts,
        tallies,
    })
}

// End of File
