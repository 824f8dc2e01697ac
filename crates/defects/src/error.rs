// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::collections::TryReserveError;

use common::GeometryError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DefectError {
    #[error("could not allocate {0}")]
    OutOfMemory(&'static str),

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T, E = DefectError> = std::result::Result<T, E>;

/// Maps a failed reservation to `OutOfMemory` naming the buffer.
pub(crate) fn out_of_memory(what: &'static str) -> impl FnOnce(TryReserveError) -> DefectError {
    move |_| DefectError::OutOfMemory(what)
}

/// An empty vector with room for `capacity` elements, or `OutOfMemory` naming the buffer.
pub(crate) fn try_vec<T>(capacity: usize, what: &'static str) -> Result<Vec<T>> {
    let mut v = Vec::new();
    v.try_reserve_exact(capacity).map_err(out_of_memory(what))?;
    Ok(v)
}

/// A vector of `len` copies of `value`, or `OutOfMemory` naming the buffer.
pub(crate) fn try_filled<T: Clone>(len: usize, value: T, what: &'static str) -> Result<Vec<T>> {
    let mut v = try_vec(len, what)?;
    v.resize(len, value);
    Ok(v)
}


// End of File
