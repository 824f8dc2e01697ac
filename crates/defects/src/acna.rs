// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Cancels spurious Frenkel pairs using a precomputed per-atom structure type.
//!
//! An interstitial whose local environment is bulk-like (its structure type equals the ideal
//! type) sitting close to a vacancy is usually a lattice atom that strayed just outside the
//! vacancy radius. Such vacancy/interstitial pairs are removed from both lists.

use common::CellGeometry;

use crate::compact::without_removed;
use crate::error::{out_of_memory, try_filled, try_vec, DefectError, Result};
use crate::lattice::Lattice;
use crate::neighbor_list::NeighborList;
use crate::settings::AcnaAlgorithm;
use crate::spatial_index::{cell_width_for, SpatialIndex};

/// Vacancy and interstitial lists after refinement.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AcnaRefinement {
    pub vacancies: Vec<usize>,
    pub interstitials: Vec<usize>,
    /// Number of vacancy/interstitial pairs cancelled.
    pub cancelled: usize,
}

/// Inputs shared by both refinement algorithms.
pub struct AcnaInput<'a> {
    pub input: &'a Lattice,
    pub reference: &'a Lattice,
    pub geometry: &'a CellGeometry,
    /// Structure type of every input atom.
    pub structure_types: &'a [i32],
    /// The structure type of an atom in perfect bulk.
    pub ideal_type: i32,
    pub vacancy_radius: f64,
    pub min_cell_width: f64,
}

pub fn refine_with_acna(
    algorithm: AcnaAlgorithm,
    ctx: &AcnaInput,
    vacancies: &[usize],
    interstitials: &[usize],
) -> Result<AcnaRefinement> {
    if ctx.structure_types.len() != ctx.input.len() {
        return Err(DefectError::InvalidInput(format!(
            "{} structure types for {} input atoms",
            ctx.structure_types.len(),
            ctx.input.len()
        )));
    }

    let (removed_vacs, removed_ints) = match algorithm {
        AcnaAlgorithm::MutualMatch => mutual_match(ctx, vacancies, interstitials)?,
        AcnaAlgorithm::BoxScan => box_scan(ctx, vacancies, interstitials)?,
    };

    let refined = AcnaRefinement {
        vacancies: without_removed(vacancies, &removed_vacs, "refined vacancy list")?,
        interstitials: without_removed(interstitials, &removed_ints, "refined interstitial list")?,
        cancelled: removed_vacs.iter().filter(|&&r| r).count(),
    };

    let vacs_lost = vacancies.len() - refined.vacancies.len();
    let ints_lost = interstitials.len() - refined.interstitials.len();
    if vacs_lost != ints_lost {
        return Err(DefectError::InvariantViolation(format!(
            "ACNA refinement removed {} vacancies but {} interstitials",
            vacs_lost, ints_lost
        )));
    }

    log::debug!(
        "ACNA refinement ({:?}): cancelled {} pairs; {} vacancies; {} interstitials",
        algorithm,
        refined.cancelled,
        refined.vacancies.len(),
        refined.interstitials.len()
    );
    Ok(refined)
}

/// One vacancy being resolved: `neb` walks the vacancy's interstitial neighbours and `rank` walks
/// the current interstitial's own vacancy neighbours.
struct Frame {
    vac: usize,
    neb: usize,
    rank: usize,
}

/// Pairs each vacancy with the nearest ideal-type interstitial that has no closer unresolved
/// vacancy. When a candidate interstitial is nearer to another vacancy, that vacancy is resolved
/// first and the candidate re-examined. Traversal uses an explicit stack so long chains of
/// competing vacancies cannot exhaust the call stack.
fn mutual_match(
    ctx: &AcnaInput,
    vacancies: &[usize],
    interstitials: &[usize],
) -> Result<(Vec<bool>, Vec<bool>)> {
    let mut removed_vacs = try_filled(vacancies.len(), false, "vacancy removal mask")?;
    let mut removed_ints = try_filled(interstitials.len(), false, "interstitial removal mask")?;

    // Slots (into `interstitials`) of interstitials with the ideal structure type.
    let mut ideal: Vec<usize> = try_vec(interstitials.len(), "ideal interstitial slots")?;
    ideal.extend(
        interstitials
            .iter()
            .enumerate()
            .filter(|(_, &atom)| ctx.structure_types[atom] == ctx.ideal_type)
            .map(|(slot, _)| slot),
    );

    log::debug!("{} interstitials have the ideal structure type", ideal.len());
    if ideal.is_empty() || vacancies.is_empty() {
        return Ok((removed_vacs, removed_ints));
    }

    let mut ideal_atoms: Vec<usize> = try_vec(ideal.len(), "ideal interstitial atoms")?;
    ideal_atoms.extend(ideal.iter().map(|&slot| interstitials[slot]));
    let vac_pos = ctx
        .reference
        .positions()
        .gather(vacancies)
        .map_err(out_of_memory("vacancy positions"))?;
    let int_pos = ctx
        .input
        .positions()
        .gather(&ideal_atoms)
        .map_err(out_of_memory("interstitial positions"))?;

    let max_sep = 2.0 * ctx.vacancy_radius;
    let vac_nebs = NeighborList::build(&vac_pos, &int_pos, ctx.geometry, max_sep, ctx.min_cell_width)?;
    let int_nebs = NeighborList::build(&int_pos, &vac_pos, ctx.geometry, max_sep, ctx.min_cell_width)?;

    let mut vac_seen = try_filled(vacancies.len(), false, "vacancy visited mask")?;
    let mut int_taken = try_filled(ideal.len(), false, "interstitial visited mask")?;
    // Every vacancy is pushed at most once.
    let mut stack: Vec<Frame> = try_vec(vacancies.len(), "vacancy resolution stack")?;

    for root in 0..vacancies.len() {
        if vac_seen[root] {
            continue;
        }
        vac_seen[root] = true;
        stack.push(Frame {
            vac: root,
            neb: 0,
            rank: 0,
        });

        while let Some(frame) = stack.last_mut() {
            let v = frame.vac;
            let Some(candidate) = vac_nebs.get(v).get(frame.neb) else {
                // Ran out of candidates; this vacancy stays.
                stack.pop();
                continue;
            };
            let i = candidate.index;
            let rivals = int_nebs.get(i);

            if int_taken[i] || frame.rank >= rivals.len() {
                frame.neb += 1;
                frame.rank = 0;
                continue;
            }

            let rival = rivals[frame.rank].index;
            frame.rank += 1;

            if rival == v {
                log::trace!(
                    "vacancy {} cancels with interstitial {}",
                    vacancies[v],
                    interstitials[ideal[i]]
                );
                removed_vacs[v] = true;
                removed_ints[ideal[i]] = true;
                int_taken[i] = true;
                stack.pop();
            } else if !vac_seen[rival] {
                vac_seen[rival] = true;
                stack.push(Frame {
                    vac: rival,
                    neb: 0,
                    rank: 0,
                });
            }
        }
    }

    Ok((removed_vacs, removed_ints))
}

/// Cancels a vacancy with the only interstitial within `2 * vacancy_radius` of it, provided that
/// interstitial has the ideal structure type.
fn box_scan(
    ctx: &AcnaInput,
    vacancies: &[usize],
    interstitials: &[usize],
) -> Result<(Vec<bool>, Vec<bool>)> {
    let mut removed_vacs = try_filled(vacancies.len(), false, "vacancy removal mask")?;
    let mut removed_ints = try_filled(interstitials.len(), false, "interstitial removal mask")?;
    if vacancies.is_empty() || interstitials.is_empty() {
        return Ok((removed_vacs, removed_ints));
    }

    let max_sep = 2.0 * ctx.vacancy_radius;
    let int_pos = ctx
        .input
        .positions()
        .gather(interstitials)
        .map_err(out_of_memory("interstitial positions"))?;
    let index = SpatialIndex::build(
        &int_pos,
        ctx.geometry,
        cell_width_for(max_sep, ctx.min_cell_width),
    )?;

    for (v, &site) in vacancies.iter().enumerate() {
        let mut count = 0usize;
        let mut found = None;
        index.for_each_within(&int_pos, ctx.reference.position(site), max_sep, |slot, _| {
            if !removed_ints[slot] {
                count += 1;
                found = Some(slot);
            }
        })?;

        if let (1, Some(slot)) = (count, found) {
            if ctx.structure_types[interstitials[slot]] == ctx.ideal_type {
                log::trace!(
                    "vacancy {} cancels with lone interstitial {}",
                    site,
                    interstitials[slot]
                );
                removed_vacs[v] = true;
                removed_ints[slot] = true;
            }
        }
    }

    Ok((removed_vacs, removed_ints))
}

// End of File
