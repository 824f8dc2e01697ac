// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! First pass: decide for every reference site whether it is occupied, and by what.
//!
//! Sites are visited in index order. Each site claims the nearest input atom within the vacancy
//! radius that no earlier site has claimed. An unclaimed site is a vacancy, a site claimed by an
//! atom of another species is an antisite, and atoms claimed by no site are interstitials.
//!
//! The result depends on site order only if the vacancy radius is so large that one atom can be
//! the nearest candidate of two sites. Choosing the radius is the caller's job; see
//! [`validate_vacancy_radius`] for an opt-in check.

use common::CellGeometry;

use crate::error::{try_filled, try_vec, DefectError, Result};
use crate::lattice::Lattice;
use crate::result::Antisite;
use crate::spatial_index::{cell_width_for, SpatialIndex};

/// Outcome of the site occupancy pass. Every reference site is either a vacancy, an antisite, or
/// normally occupied (in no list); every input atom is either an interstitial or the occupant of
/// exactly one site.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Occupancy {
    pub vacancies: Vec<usize>,
    pub interstitials: Vec<usize>,
    pub antisites: Vec<Antisite>,
}

pub fn classify_sites(
    input: &Lattice,
    reference: &Lattice,
    geometry: &CellGeometry,
    vacancy_radius: f64,
    min_cell_width: f64,
) -> Result<Occupancy> {
    let index = SpatialIndex::build(
        input.positions(),
        geometry,
        cell_width_for(vacancy_radius, min_cell_width),
    )?;

    // occupant[site] is the input atom claiming that site.
    let mut occupant: Vec<Option<usize>> =
        try_filled(reference.len(), None, "site occupant array")?;
    let mut claimed = try_filled(input.len(), false, "claimed atom mask")?;

    for site in 0..reference.len() {
        let site_pos = reference.position(site);
        let mut nearest: Option<(usize, f64)> = None;
        index.for_each_within(input.positions(), site_pos, vacancy_radius, |atom, sep2| {
            if claimed[atom] {
                return;
            }
            let closer = match nearest {
                None => true,
                Some((best, best_sep2)) => sep2 < best_sep2 || (sep2 == best_sep2 && atom < best),
            };
            if closer {
                nearest = Some((atom, sep2));
            }
        })?;

        if let Some((atom, sep2)) = nearest {
            log::trace!("site {} claimed by atom {} (sep {:.4})", site, atom, sep2.sqrt());
            claimed[atom] = true;
            occupant[site] = Some(atom);
        }
    }

    let mut vacancies = try_vec(reference.len(), "vacancy list")?;
    let mut antisites = try_vec(reference.len(), "antisite list")?;
    for (site, occ) in occupant.iter().enumerate() {
        match *occ {
            None => vacancies.push(site),
            Some(atom) if input.symbol_of(atom) != reference.symbol_of(site) => {
                antisites.push(Antisite {
                    site,
                    occupant: atom,
                });
            }
            Some(_) => {}
        }
    }

    let mut interstitials = try_vec(input.len(), "interstitial list")?;
    interstitials.extend(
        claimed
            .iter()
            .enumerate()
            .filter(|(_, &c)| !c)
            .map(|(atom, _)| atom),
    );

    log::debug!(
        "site occupancy: {} vacancies; {} interstitials; {} antisites",
        vacancies.len(),
        interstitials.len(),
        antisites.len()
    );

    Ok(Occupancy {
        vacancies,
        interstitials,
        antisites,
    })
}

/// Checks that no two reference sites lie closer than `2 * vacancy_radius`, the condition under
/// which an input atom could be the nearest candidate of two sites.
pub fn validate_vacancy_radius(
    reference: &Lattice,
    geometry: &CellGeometry,
    vacancy_radius: f64,
    min_cell_width: f64,
) -> Result<()> {
    let cutoff = 2.0 * vacancy_radius;
    let index = SpatialIndex::build(
        reference.positions(),
        geometry,
        cell_width_for(cutoff, min_cell_width),
    )?;
    for site in 0..reference.len() {
        let mut clash = None;
        index.for_each_within(reference.positions(), reference.position(site), cutoff, |other, sep2| {
            if other != site && clash.is_none() {
                clash = Some((other, sep2));
            }
        })?;
        if let Some((other, sep2)) = clash {
            return Err(DefectError::InvalidInput(format!(
                "vacancy radius {} too large: reference sites {} and {} are {:.4} apart",
                vacancy_radius,
                site,
                other,
                sep2.sqrt()
            )));
        }
    }
    Ok(())
}

// End of File
