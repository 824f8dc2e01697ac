// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::collections::TryReserveError;
use std::ops::Index;

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::cell::Axis;

/// An ordered set of 3D points. Entity `i` of an index space (input atoms or reference sites)
/// lives at `positions[i]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Positions {
    points: Vec<DVec3>,
}

impl Positions {
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty point set with room for `capacity` points, or the reservation failure.
    pub fn try_with_capacity(capacity: usize) -> Result<Self, TryReserveError> {
        let mut points = Vec::new();
        points.try_reserve_exact(capacity)?;
        Ok(Self { points })
    }

    /// Builds a point set from a flat `[x0, y0, z0, x1, ...]` buffer. Returns `None` when the
    /// buffer length is not a multiple of three.
    pub fn from_flat(flat: &[f64]) -> Option<Self> {
        if flat.len() % 3 != 0 {
            return None;
        }
        Some(Self {
            points: flat
                .chunks_exact(3)
                .map(|c| DVec3::new(c[0], c[1], c[2]))
                .collect(),
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn push(&mut self, point: DVec3) {
        self.points.push(point);
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<DVec3> {
        self.points.get(index).copied()
    }

    /// A single coordinate of entity `index`.
    #[inline]
    pub fn coord(&self, index: usize, axis: Axis) -> f64 {
        self.points[index][axis.index()]
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = DVec3> + '_ {
        self.points.iter().copied()
    }

    pub fn as_slice(&self) -> &[DVec3] {
        &self.points
    }

    /// Gathers the points named by `indices`, in that order.
    pub fn gather(&self, indices: &[usize]) -> Result<Positions, TryReserveError> {
        let mut gathered = Self::try_with_capacity(indices.len())?;
        gathered.extend(indices.iter().map(|&i| self.points[i]));
        Ok(gathered)
    }

    /// A copy of this point set shifted by `offset`.
    pub fn translated(&self, offset: DVec3) -> Result<Positions, TryReserveError> {
        let mut shifted = Self::try_with_capacity(self.len())?;
        shifted.extend(self.points.iter().map(|&p| p + offset));
        Ok(shifted)
    }
}

impl Index<usize> for Positions {
    type Output = DVec3;

    #[inline]
    fn index(&self, index: usize) -> &DVec3 {
        &self.points[index]
    }
}

impl From<Vec<DVec3>> for Positions {
    fn from(points: Vec<DVec3>) -> Self {
        Self { points }
    }
}

impl FromIterator<DVec3> for Positions {
    fn from_iter<I: IntoIterator<Item = DVec3>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

impl Extend<DVec3> for Positions {
    fn extend<I: IntoIterator<Item = DVec3>>(&mut self, iter: I) {
        self.points.extend(iter);
    }
}

// End of File
