// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Merges one vacancy and two interstitials into a split-interstitial (dumbbell) defect.

use common::{CellGeometry, Positions};
use smallvec::SmallVec;

use crate::cluster::label_clusters;
use crate::compact::without_removed;
use crate::error::{out_of_memory, try_filled, try_vec, DefectError, Result};
use crate::lattice::Lattice;
use crate::neighbor_list::NeighborList;
use crate::result::SplitInterstitial;
use crate::settings::SplitAlgorithm;

/// Vacancy and interstitial lists with the members of every split-interstitial removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitResolution {
    pub vacancies: Vec<usize>,
    pub interstitials: Vec<usize>,
    pub split_interstitials: Vec<SplitInterstitial>,
}

/// Inputs shared by both resolution algorithms.
pub struct SplitInput<'a> {
    pub input: &'a Lattice,
    pub reference: &'a Lattice,
    pub geometry: &'a CellGeometry,
    pub vacancy_radius: f64,
    pub min_cell_width: f64,
}

pub fn resolve_split_interstitials(
    algorithm: SplitAlgorithm,
    ctx: &SplitInput,
    vacancies: &[usize],
    interstitials: &[usize],
) -> Result<SplitResolution> {
    let mut removed_vacs = try_filled(vacancies.len(), false, "vacancy removal mask")?;
    let mut removed_ints = try_filled(interstitials.len(), false, "interstitial removal mask")?;

    let split_interstitials = match algorithm {
        SplitAlgorithm::MutualNearest => mutual_nearest(
            ctx,
            vacancies,
            interstitials,
            &mut removed_vacs,
            &mut removed_ints,
        )?,
        SplitAlgorithm::ClusterTriplet => cluster_triplet(
            ctx,
            vacancies,
            interstitials,
            &mut removed_vacs,
            &mut removed_ints,
        )?,
    };

    let resolution = SplitResolution {
        vacancies: without_removed(vacancies, &removed_vacs, "remaining vacancy list")?,
        interstitials: without_removed(interstitials, &removed_ints, "remaining interstitial list")?,
        split_interstitials,
    };

    let found = resolution.split_interstitials.len();
    if interstitials.len() != resolution.interstitials.len() + 2 * found
        || vacancies.len() != resolution.vacancies.len() + found
    {
        return Err(DefectError::InvariantViolation(format!(
            "defects lost or gained during split detection: {} + {} * 2 != {} interstitials, \
             {} + {} != {} vacancies",
            resolution.interstitials.len(),
            found,
            interstitials.len(),
            resolution.vacancies.len(),
            found,
            vacancies.len()
        )));
    }

    log::debug!(
        "split interstitials ({:?}): {} found; {} vacancies; {} interstitials",
        algorithm,
        found,
        resolution.vacancies.len(),
        resolution.interstitials.len()
    );
    Ok(resolution)
}

/// A vacancy becomes a split-interstitial when two of its neighbouring interstitials (within
/// `2 * vacancy_radius`) have it as their nearest vacancy. Candidates are taken nearest first.
fn mutual_nearest(
    ctx: &SplitInput,
    vacancies: &[usize],
    interstitials: &[usize],
    removed_vacs: &mut [bool],
    removed_ints: &mut [bool],
) -> Result<Vec<SplitInterstitial>> {
    let vac_pos = ctx
        .reference
        .positions()
        .gather(vacancies)
        .map_err(out_of_memory("vacancy positions"))?;
    let int_pos = ctx
        .input
        .positions()
        .gather(interstitials)
        .map_err(out_of_memory("interstitial positions"))?;

    let max_sep = 2.0 * ctx.vacancy_radius;
    let vac_nebs = NeighborList::build(&vac_pos, &int_pos, ctx.geometry, max_sep, ctx.min_cell_width)?;
    let int_nebs = NeighborList::build(&int_pos, &vac_pos, ctx.geometry, max_sep, ctx.min_cell_width)?;

    let mut splits = try_vec(vacancies.len(), "split interstitial list")?;
    for v in 0..vacancies.len() {
        let nebs = vac_nebs.get(v);
        if nebs.len() < 2 {
            continue;
        }

        let mut picked: SmallVec<[usize; 2]> = SmallVec::new();
        for neb in nebs {
            if picked.len() == 2 {
                break;
            }
            if int_nebs.nearest(neb.index).map(|n| n.index) == Some(v) {
                picked.push(neb.index);
            }
        }

        if let &[a, b] = picked.as_slice() {
            log::trace!(
                "vacancy {} splits into interstitials {} and {}",
                vacancies[v],
                interstitials[a],
                interstitials[b]
            );
            splits.push(SplitInterstitial {
                vacancy: vacancies[v],
                atoms: [interstitials[a], interstitials[b]],
            });
            removed_vacs[v] = true;
            removed_ints[a] = true;
            removed_ints[b] = true;
        }
    }
    Ok(splits)
}

/// Clusters vacancies and interstitials together at `2 * vacancy_radius`; every cluster of
/// exactly one vacancy and two interstitials is a split-interstitial.
fn cluster_triplet(
    ctx: &SplitInput,
    vacancies: &[usize],
    interstitials: &[usize],
    removed_vacs: &mut [bool],
    removed_ints: &mut [bool],
) -> Result<Vec<SplitInterstitial>> {
    let num_vacs = vacancies.len();
    let mut points = Positions::try_with_capacity(num_vacs + interstitials.len())
        .map_err(out_of_memory("defect positions"))?;
    points.extend(vacancies.iter().map(|&site| ctx.reference.position(site)));
    points.extend(interstitials.iter().map(|&atom| ctx.input.position(atom)));

    let labels = label_clusters(
        &points,
        ctx.geometry,
        2.0 * ctx.vacancy_radius,
        ctx.min_cell_width,
        &[],
    )?;

    // Members of every cluster, in slot order.
    let mut members: Vec<SmallVec<[usize; 3]>> = try_vec(labels.sizes.len(), "cluster members")?;
    members.resize_with(labels.sizes.len(), SmallVec::new);
    for (slot, &id) in labels.ids.iter().enumerate() {
        if labels.sizes[id] == 3 {
            members[id].push(slot);
        }
    }

    let mut splits = try_vec(num_vacs, "split interstitial list")?;
    for group in members.iter().filter(|m| m.len() == 3) {
        let vacs: SmallVec<[usize; 3]> = group.iter().copied().filter(|&s| s < num_vacs).collect();
        if vacs.len() != 1 {
            continue;
        }
        let ints: SmallVec<[usize; 2]> = group
            .iter()
            .copied()
            .filter(|&s| s >= num_vacs)
            .map(|s| s - num_vacs)
            .collect();

        let v = vacs[0];
        splits.push(SplitInterstitial {
            vacancy: vacancies[v],
            atoms: [interstitials[ints[0]], interstitials[ints[1]]],
        });
        removed_vacs[v] = true;
        removed_ints[ints[0]] = true;
        removed_ints[ints[1]] = true;
    }
    Ok(splits)
}

// End of File
