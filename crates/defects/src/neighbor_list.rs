// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::cmp::Ordering;

use common::{CellGeometry, Positions};

use crate::error::{try_vec, DefectError, Result};
use crate::spatial_index::{cell_width_for, SpatialIndex};

/// A target point within cutoff of some source point.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Neighbor {
    pub index: usize,
    pub separation_sq: f64,
}

impl Neighbor {
    fn cmp_by_separation(&self, other: &Self) -> Ordering {
        self.separation_sq
            .total_cmp(&other.separation_sq)
            .then(self.index.cmp(&other.index))
    }
}

/// For each source point, the target points within cutoff, nearest first.
///
/// Equal separations are ordered by target index, so the lists are fully determined by the
/// input and never depend on cell traversal order.
#[derive(Debug, Clone, Default)]
pub struct NeighborList {
    lists: Vec<Vec<Neighbor>>,
}

impl NeighborList {
    /// Builds the list for `source` against `target` using a cell grid over `target`.
    pub fn build(
        source: &Positions,
        target: &Positions,
        geometry: &CellGeometry,
        cutoff: f64,
        min_cell_width: f64,
    ) -> Result<Self> {
        let index = SpatialIndex::build(target, geometry, cell_width_for(cutoff, min_cell_width))?;

        let mut lists = try_vec(source.len(), "neighbour lists")?;
        for center in source.iter() {
            let mut nebs = Vec::new();
            let mut exhausted = false;
            index.for_each_within(target, center, cutoff, |j, sep2| {
                if exhausted || nebs.try_reserve(1).is_err() {
                    exhausted = true;
                    return;
                }
                nebs.push(Neighbor {
                    index: j,
                    separation_sq: sep2,
                });
            })?;
            if exhausted {
                return Err(DefectError::OutOfMemory("neighbour list"));
            }
            nebs.sort_by(Neighbor::cmp_by_separation);
            lists.push(nebs);
        }

        Ok(Self { lists })
    }

    /// Number of source points.
    pub fn len(&self) -> usize {
        self.lists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    /// Neighbours of source point `i`, nearest first.
    pub fn get(&self, i: usize) -> &[Neighbor] {
        &self.lists[i]
    }

    /// The nearest target of source point `i`, if any lies within cutoff.
    pub fn nearest(&self, i: usize) -> Option<&Neighbor> {
        self.lists[i].first()
    }
}

// End of File
