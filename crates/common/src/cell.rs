// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use glam::DVec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("cell extent along {axis:?} must be positive and finite, got {extent}")]
    DegenerateCell { axis: Axis, extent: f64 },

    #[error("cell width must be positive and finite, got {0}")]
    InvalidCellWidth(f64),

    #[error("cell grid would need more boxes than can be addressed")]
    TooManyCells,

    #[error("point {position:?} cannot be mapped onto the cell grid")]
    PointOutOfBounds { position: DVec3 },
}

/// One of the three Cartesian axes.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

/// An orthorhombic simulation cell spanning `[0, dims)` with a periodic flag per axis.
///
/// All separations computed through a `CellGeometry` follow the minimum-image convention along
/// periodic axes and are plain Cartesian differences along the others.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellGeometry {
    dims: DVec3,
    pbc: [bool; 3],
}

impl CellGeometry {
    /// Creates a cell, rejecting zero, negative, or non-finite extents.
    pub fn new(dims: DVec3, pbc: [bool; 3]) -> Result<Self, GeometryError> {
        for axis in Axis::ALL {
            let extent = dims[axis.index()];
            if !extent.is_finite() || extent <= 0.0 {
                return Err(GeometryError::DegenerateCell { axis, extent });
            }
        }
        Ok(Self { dims, pbc })
    }

    /// Fully periodic cell, the common case for bulk simulations.
    pub fn periodic(dims: DVec3) -> Result<Self, GeometryError> {
        Self::new(dims, [true; 3])
    }

    #[inline]
    pub fn dims(&self) -> DVec3 {
        self.dims
    }

    #[inline]
    pub fn extent(&self, axis: Axis) -> f64 {
        self.dims[axis.index()]
    }

    #[inline]
    pub fn pbc(&self) -> [bool; 3] {
        self.pbc
    }

    #[inline]
    pub fn is_periodic(&self, axis: Axis) -> bool {
        self.pbc[axis.index()]
    }

    /// Separation vector from `a` to `b`, folded to the nearest periodic image.
    pub fn separation(&self, a: DVec3, b: DVec3) -> DVec3 {
        let mut d = b - a;
        for axis in Axis::ALL {
            let i = axis.index();
            if self.pbc[i] {
                d[i] -= (d[i] / self.dims[i]).round() * self.dims[i];
            }
        }
        d
    }

    /// Squared minimum-image distance between `a` and `b`.
    #[inline]
    pub fn separation_sq(&self, a: DVec3, b: DVec3) -> f64 {
        self.separation(a, b).length_squared()
    }

    /// Maps a coordinate into `[0, extent)` along a periodic axis; other axes are returned as is.
    pub fn wrap_coordinate(&self, axis: Axis, value: f64) -> f64 {
        let i = axis.index();
        if !self.pbc[i] {
            return value;
        }
        let extent = self.dims[i];
        let wrapped = value - (value / extent).floor() * extent;
        // Rounding can land exactly on the upper bound for tiny negative inputs.
        if wrapped >= extent {
            0.0
        } else {
            wrapped
        }
    }
}

// End of File
