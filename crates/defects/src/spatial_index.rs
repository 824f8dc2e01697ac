// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Uniform cell grid over the simulation cell.
//!
//! The grid covers `[0, extent)` on every axis with at least one cell per axis and cells no
//! narrower than the requested width. Each cell stores the indices of the points currently inside
//! it, so a cutoff query only has to look at the 27 cells around the query point, provided the
//! cutoff does not exceed the cell width.

use common::{Axis, CellGeometry, GeometryError, Positions};
use glam::DVec3;
use smallvec::SmallVec;

use crate::error::{out_of_memory, try_vec, Result};

/// Cell width actually used for a query radius: never narrower than `min_width`, which keeps the
/// number of cells (and empty-cell overhead) bounded for small radii.
#[inline]
pub fn cell_width_for(cutoff: f64, min_width: f64) -> f64 {
    if cutoff > min_width {
        cutoff
    } else {
        min_width
    }
}

pub struct SpatialIndex {
    geometry: CellGeometry,
    counts: [usize; 3],
    widths: DVec3,
    cells: Vec<Vec<usize>>,
}

impl SpatialIndex {
    /// Creates an empty grid whose cells are at least `target_width` wide.
    pub fn new(geometry: &CellGeometry, target_width: f64) -> Result<Self> {
        if !target_width.is_finite() || target_width <= 0.0 {
            return Err(GeometryError::InvalidCellWidth(target_width).into());
        }

        let mut counts = [1usize; 3];
        let mut widths = DVec3::ZERO;
        for axis in Axis::ALL {
            let i = axis.index();
            let extent = geometry.extent(axis);
            let n = (extent / target_width).floor();
            if n >= u32::MAX as f64 {
                return Err(GeometryError::TooManyCells.into());
            }
            counts[i] = (n as usize).max(1);
            widths[i] = extent / counts[i] as f64;
        }

        let total = counts[0]
            .checked_mul(counts[1])
            .and_then(|n| n.checked_mul(counts[2]))
            .filter(|&n| n <= isize::MAX as usize / std::mem::size_of::<Vec<usize>>())
            .ok_or(GeometryError::TooManyCells)?;

        let mut cells = try_vec(total, "spatial index cells")?;
        cells.resize_with(total, Vec::new);

        Ok(Self {
            geometry: *geometry,
            counts,
            widths,
            cells,
        })
    }

    /// Builds a grid and bins every point of `points` into it.
    pub fn build(points: &Positions, geometry: &CellGeometry, target_width: f64) -> Result<Self> {
        let mut index = Self::new(geometry, target_width)?;
        for (i, point) in points.iter().enumerate() {
            index.insert(i, point)?;
        }
        Ok(index)
    }

    /// Places point `index` in the cell containing `point`.
    pub fn insert(&mut self, index: usize, point: DVec3) -> Result<()> {
        let cell = self.cell_of(point)?;
        let members = &mut self.cells[cell];
        members
            .try_reserve(1)
            .map_err(out_of_memory("spatial index cell"))?;
        members.push(index);
        Ok(())
    }

    pub fn geometry(&self) -> &CellGeometry {
        &self.geometry
    }

    /// Number of cells along each axis.
    pub fn counts(&self) -> [usize; 3] {
        self.counts
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Narrowest cell width over the three axes; no query radius may exceed it.
    pub fn min_cell_width(&self) -> f64 {
        self.widths.min_element()
    }

    /// Whether a 27-cell search finds every point within `cutoff`. Axes with fewer than three
    /// cells are always searched in full.
    pub fn supports_cutoff(&self, cutoff: f64) -> bool {
        (0..3).all(|i| self.counts[i] < 3 || cutoff <= self.widths[i] * (1.0 + 1e-12))
    }

    /// Point indices currently in cell `cell`.
    pub fn cell(&self, cell: usize) -> &[usize] {
        &self.cells[cell]
    }

    /// The id of the cell containing `point`.
    ///
    /// Periodic axes wrap the coordinate into the cell first. Along non-periodic axes points
    /// outside the cell are assigned to the nearest edge cell.
    pub fn cell_of(&self, point: DVec3) -> Result<usize, GeometryError> {
        if !point.is_finite() {
            return Err(GeometryError::PointOutOfBounds { position: point });
        }
        let mut coords = [0usize; 3];
        for axis in Axis::ALL {
            let i = axis.index();
            let x = self.geometry.wrap_coordinate(axis, point[i]);
            let c = (x / self.widths[i]).floor();
            let last = (self.counts[i] - 1) as f64;
            coords[i] = c.clamp(0.0, last) as usize;
        }
        Ok(self.linear(coords))
    }

    /// The cells adjacent to `cell` (including itself), wrapping across periodic axes and
    /// dropping out-of-range neighbours along the others. No cell appears twice.
    pub fn neighborhood(&self, cell: usize) -> SmallVec<[usize; 27]> {
        let coords = self.unlinear(cell);

        let mut per_axis: [SmallVec<[usize; 3]>; 3] = Default::default();
        for axis in Axis::ALL {
            let i = axis.index();
            let n = self.counts[i] as isize;
            for offset in -1isize..=1 {
                let mut c = coords[i] as isize + offset;
                if self.geometry.is_periodic(axis) {
                    c = c.rem_euclid(n);
                } else if c < 0 || c >= n {
                    continue;
                }
                let c = c as usize;
                if !per_axis[i].contains(&c) {
                    per_axis[i].push(c);
                }
            }
        }

        let mut result = SmallVec::new();
        for &cx in &per_axis[0] {
            for &cy in &per_axis[1] {
                for &cz in &per_axis[2] {
                    result.push(self.linear([cx, cy, cz]));
                }
            }
        }
        result
    }

    /// Calls `f(j, separation_sq)` for every indexed point `j` strictly within `cutoff` of
    /// `center`, where `points` are the positions the index was built over.
    pub fn for_each_within<F: FnMut(usize, f64)>(
        &self,
        points: &Positions,
        center: DVec3,
        cutoff: f64,
        mut f: F,
    ) -> Result<()> {
        debug_assert!(
            self.supports_cutoff(cutoff),
            "query radius {} exceeds cell width {}",
            cutoff,
            self.min_cell_width()
        );
        let cutoff_sq = cutoff * cutoff;
        let cell = self.cell_of(center)?;
        for neighbor in self.neighborhood(cell) {
            for &j in &self.cells[neighbor] {
                let sep2 = self.geometry.separation_sq(center, points[j]);
                if sep2 < cutoff_sq {
                    f(j, sep2);
                }
            }
        }
        Ok(())
    }

    #[inline]
    fn linear(&self, c: [usize; 3]) -> usize {
        c[0] + self.counts[0] * (c[1] + self.counts[1] * c[2])
    }

    #[inline]
    fn unlinear(&self, cell: usize) -> [usize; 3] {
        let x = cell % self.counts[0];
        let y = (cell / self.counts[0]) % self.counts[1];
        let z = cell / (self.counts[0] * self.counts[1]);
        [x, y, z]
    }
}

// End of File
