// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Geometry primitives shared by the defect engine and its front end.
//!
//! [`CellGeometry`] describes the simulation cell (orthorhombic extents plus a periodic flag per
//! axis) and answers minimum-image separation queries. [`Positions`] is the owned point container
//! every pass reads coordinates from, addressed by entity index and axis instead of raw `3*i+axis`
//! offsets into a flat buffer.

mod cell;
mod positions;

pub use cell::{Axis, CellGeometry, GeometryError};
pub use positions::Positions;

// End of File
