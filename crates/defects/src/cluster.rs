// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Groups defects into connected clusters.
//!
//! Two defects belong to the same cluster when a chain of defects links them with every step
//! shorter than the cluster radius. Labels are found by flood fill from each unlabelled point in
//! index order, driven by an explicit stack so large chain-like clusters cannot overflow the call
//! stack.

use common::{CellGeometry, Positions};
use serde::{Deserialize, Serialize};

use crate::error::{try_filled, try_vec, Result};
use crate::lattice::Lattice;
use crate::result::{Defect, DefectLists};
use crate::spatial_index::{cell_width_for, SpatialIndex};

/// Cluster id of every point plus the number of points in every cluster.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClusterLabels {
    pub ids: Vec<usize>,
    pub sizes: Vec<usize>,
}

/// Labels connected components of `points` under `radius`.
///
/// Each entry of `ties` names three points that always share a cluster regardless of their
/// separation; a split-interstitial's three coordinates are tied this way.
pub fn label_clusters(
    points: &Positions,
    geometry: &CellGeometry,
    radius: f64,
    min_cell_width: f64,
    ties: &[[usize; 3]],
) -> Result<ClusterLabels> {
    let index = SpatialIndex::build(points, geometry, cell_width_for(radius, min_cell_width))?;

    let mut tie_of: Vec<Option<usize>> = try_filled(points.len(), None, "cluster tie map")?;
    for (t, tie) in ties.iter().enumerate() {
        for &p in tie {
            tie_of[p] = Some(t);
        }
    }

    let mut ids: Vec<Option<usize>> = try_filled(points.len(), None, "cluster id array")?;
    // Ids are assigned before a point is pushed, so no buffer outgrows the point count.
    let mut sizes: Vec<usize> = try_vec(points.len(), "cluster sizes")?;
    let mut stack: Vec<usize> = try_vec(points.len(), "flood fill stack")?;

    for seed in 0..points.len() {
        if ids[seed].is_some() {
            continue;
        }
        let id = sizes.len();
        sizes.push(0usize);
        ids[seed] = Some(id);
        stack.push(seed);

        while let Some(p) = stack.pop() {
            sizes[id] += 1;

            index.for_each_within(points, points[p], radius, |q, _| {
                if ids[q].is_none() {
                    ids[q] = Some(id);
                    stack.push(q);
                }
            })?;

            if let Some(t) = tie_of[p] {
                for &q in &ties[t] {
                    if ids[q].is_none() {
                        ids[q] = Some(id);
                        stack.push(q);
                    }
                }
            }
        }
    }

    let mut labels: Vec<usize> = try_vec(points.len(), "cluster labels")?;
    labels.extend(ids.into_iter().flatten());
    Ok(ClusterLabels {
        ids: labels,
        sizes,
    })
}

/// Inclusive bounds on the number of defects in a cluster.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterSizeRange {
    pub min: usize,
    /// `None` means unbounded.
    pub max: Option<usize>,
}

impl ClusterSizeRange {
    /// A maximum below the minimum means no upper bound.
    pub fn new(min: usize, max: Option<usize>) -> Self {
        Self {
            min,
            max: max.filter(|&m| m >= min),
        }
    }

    pub fn contains(&self, size: usize) -> bool {
        size >= self.min && self.max.map_or(true, |max| size <= max)
    }
}

impl Default for ClusterSizeRange {
    fn default() -> Self {
        Self { min: 1, max: None }
    }
}

/// Cluster membership of the defects that survived size filtering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DefectClusters {
    ids: Vec<usize>,
    sizes: Vec<usize>,
}

impl DefectClusters {
    /// Number of clusters.
    pub fn count(&self) -> usize {
        self.sizes.len()
    }

    /// Cluster id of every defect, in [`DefectLists`] order.
    pub fn ids(&self) -> &[usize] {
        &self.ids
    }

    /// Number of logical defects in every cluster.
    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }

    /// Groups `defects` by cluster. `defects` must be the lists these clusters were found for.
    pub fn members(&self, defects: &DefectLists) -> Vec<Vec<Defect>> {
        let mut members: Vec<Vec<Defect>> = self
            .sizes
            .iter()
            .map(|&size| Vec::with_capacity(size))
            .collect();
        for (defect, &id) in defects.iter().zip(&self.ids) {
            members[id].push(defect);
        }
        members
    }
}

/// Clusters `defects`, drops every defect whose cluster size lies outside `range`, and renumbers
/// the remaining clusters contiguously in order of first appearance.
///
/// Vacancies and antisites sit at their reference positions and interstitials at their current
/// positions. A split-interstitial contributes all three of its coordinates, tied into one cluster,
/// but counts as a single defect towards that cluster's size.
pub fn find_defect_clusters(
    defects: &DefectLists,
    input: &Lattice,
    reference: &Lattice,
    geometry: &CellGeometry,
    radius: f64,
    range: ClusterSizeRange,
    min_cell_width: f64,
) -> Result<(DefectLists, DefectClusters)> {
    let singles = defects.vacancies.len() + defects.interstitials.len() + defects.antisites.len();
    let num_points = singles + 3 * defects.split_interstitials.len();

    let mut points = Positions::from(try_vec(num_points, "defect positions")?);
    points.extend(defects.vacancies.iter().map(|&site| reference.position(site)));
    points.extend(defects.interstitials.iter().map(|&atom| input.position(atom)));
    points.extend(defects.antisites.iter().map(|a| reference.position(a.site)));

    let mut ties = try_vec(defects.split_interstitials.len(), "split interstitial ties")?;
    for split in &defects.split_interstitials {
        let first = points.len();
        points.push(reference.position(split.vacancy));
        points.push(input.position(split.atoms[0]));
        points.push(input.position(split.atoms[1]));
        ties.push([first, first + 1, first + 2]);
    }

    let labels = label_clusters(&points, geometry, radius, min_cell_width, &ties)?;

    // Each split-interstitial was counted three times.
    let mut sizes = labels.sizes;
    for tie in &ties {
        sizes[labels.ids[tie[0]]] -= 2;
    }

    // Cluster id of each logical defect, in DefectLists order.
    let logical_ids = labels.ids[..singles]
        .iter()
        .copied()
        .chain(ties.iter().map(|tie| labels.ids[tie[0]]));

    let mut renumber: Vec<Option<usize>> = try_filled(sizes.len(), None, "cluster renumbering")?;
    let mut kept = DefectLists {
        vacancies: try_vec(defects.vacancies.len(), "clustered vacancy list")?,
        interstitials: try_vec(defects.interstitials.len(), "clustered interstitial list")?,
        antisites: try_vec(defects.antisites.len(), "clustered antisite list")?,
        split_interstitials: try_vec(
            defects.split_interstitials.len(),
            "clustered split interstitial list",
        )?,
    };
    let mut ids: Vec<usize> = try_vec(defects.len(), "defect cluster ids")?;
    let mut new_sizes: Vec<usize> = try_vec(sizes.len(), "filtered cluster sizes")?;

    for (defect, old) in defects.iter().zip(logical_ids) {
        if !range.contains(sizes[old]) {
            continue;
        }
        let id = *renumber[old].get_or_insert_with(|| {
            new_sizes.push(0);
            new_sizes.len() - 1
        });
        new_sizes[id] += 1;
        ids.push(id);
        match defect {
            Defect::Vacancy(v) => kept.vacancies.push(v),
            Defect::Interstitial(i) => kept.interstitials.push(i),
            Defect::Antisite(a) => kept.antisites.push(a),
            Defect::SplitInterstitial(s) => kept.split_interstitials.push(s),
        }
    }

    log::debug!(
        "clustering: {} clusters before size filter; {} after; {} defects kept",
        sizes.len(),
        new_sizes.len(),
        ids.len()
    );

    Ok((
        kept,
        DefectClusters {
            ids,
            sizes: new_sizes,
        },
    ))
}

// End of File
