// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::error::{try_filled, try_vec, Result};
use crate::lattice::{Lattice, SpeciesList};
use crate::result::{DefectLists, SpeciesTallies};

/// Which defect categories to report.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefectTypes {
    pub vacancies: bool,
    /// Also governs split-interstitials.
    pub interstitials: bool,
    pub antisites: bool,
}

impl Default for DefectTypes {
    fn default() -> Self {
        Self {
            vacancies: true,
            interstitials: true,
            antisites: true,
        }
    }
}

/// Species hidden from the results, as indices into each lattice's own species list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpeciesExclusions {
    input: FxHashSet<usize>,
    reference: FxHashSet<usize>,
}

impl SpeciesExclusions {
    pub fn new(
        input: impl IntoIterator<Item = usize>,
        reference: impl IntoIterator<Item = usize>,
    ) -> Self {
        Self {
            input: input.into_iter().collect(),
            reference: reference.into_iter().collect(),
        }
    }

    /// Excludes every species of either lattice whose symbol is not in `visible`.
    pub fn from_visible<S: AsRef<str>>(
        visible: &[S],
        input: &SpeciesList,
        reference: &SpeciesList,
    ) -> Self {
        let hidden = |list: &SpeciesList| -> Vec<usize> {
            list.iter()
                .enumerate()
                .filter(|(_, sym)| !visible.iter().any(|v| v.as_ref() == *sym))
                .map(|(i, _)| i)
                .collect()
        };
        Self::new(hidden(input), hidden(reference))
    }

    pub fn is_empty(&self) -> bool {
        self.input.is_empty() && self.reference.is_empty()
    }

    pub fn excludes_input(&self, species: usize) -> bool {
        self.input.contains(&species)
    }

    pub fn excludes_reference(&self, species: usize) -> bool {
        self.reference.contains(&species)
    }
}

/// Drops disabled categories and defects of excluded species, preserving relative order.
///
/// Interstitials, split-interstitial atoms and antisite occupants are judged by input species;
/// vacancies and antisite sites by reference species.
pub fn filter_defects(
    defects: DefectLists,
    types: &DefectTypes,
    exclusions: Option<&SpeciesExclusions>,
    input: &Lattice,
    reference: &Lattice,
) -> DefectLists {
    let DefectLists {
        mut vacancies,
        mut interstitials,
        mut antisites,
        mut split_interstitials,
    } = defects;

    if !types.vacancies {
        vacancies.clear();
    }
    if !types.interstitials {
        interstitials.clear();
        split_interstitials.clear();
    }
    if !types.antisites {
        antisites.clear();
    }

    if let Some(ex) = exclusions.filter(|ex| !ex.is_empty()) {
        vacancies.retain(|&site| !ex.excludes_reference(reference.species_of(site)));
        interstitials.retain(|&atom| !ex.excludes_input(input.species_of(atom)));
        antisites.retain(|a| {
            !ex.excludes_input(input.species_of(a.occupant))
                && !ex.excludes_reference(reference.species_of(a.site))
        });
        split_interstitials.retain(|s| {
            s.atoms
                .iter()
                .all(|&atom| !ex.excludes_input(input.species_of(atom)))
        });
    }

    let filtered = DefectLists {
        vacancies,
        interstitials,
        antisites,
        split_interstitials,
    };
    log::debug!(
        "after type/species filter: {} vacancies; {} interstitials; {} split interstitials; \
         {} antisites",
        filtered.vacancies.len(),
        filtered.interstitials.len(),
        filtered.split_interstitials.len(),
        filtered.antisites.len()
    );
    filtered
}

/// A `rows` by `cols` histogram of zeros.
fn zeroed_histogram(rows: usize, cols: usize, what: &'static str) -> Result<Vec<Vec<usize>>> {
    let mut histogram = try_vec(rows, what)?;
    for _ in 0..rows {
        histogram.push(try_filled(cols, 0, what)?);
    }
    Ok(histogram)
}

/// Per-species counts of every defect category.
pub fn tally_species(
    defects: &DefectLists,
    input: &Lattice,
    reference: &Lattice,
) -> Result<SpeciesTallies> {
    let n_in = input.species_list().len();
    let n_ref = reference.species_list().len();

    let mut tallies = SpeciesTallies {
        vacancies: try_filled(n_ref, 0, "vacancy tally")?,
        interstitials: try_filled(n_in, 0, "interstitial tally")?,
        antisites: try_filled(n_ref, 0, "antisite tally")?,
        antisite_occupants: zeroed_histogram(n_ref, n_in, "antisite occupant tally")?,
        split_interstitials: zeroed_histogram(n_in, n_in, "split interstitial tally")?,
    };

    for &site in &defects.vacancies {
        tallies.vacancies[reference.species_of(site)] += 1;
    }
    for &atom in &defects.interstitials {
        tallies.interstitials[input.species_of(atom)] += 1;
    }
    for a in &defects.antisites {
        let site_species = reference.species_of(a.site);
        tallies.antisites[site_species] += 1;
        tallies.antisite_occupants[site_species][input.species_of(a.occupant)] += 1;
    }
    for s in &defects.split_interstitials {
        let [a, b] = s.atoms;
        tallies.split_interstitials[input.species_of(a)][input.species_of(b)] += 1;
    }

    Ok(tallies)
}

// End of File
