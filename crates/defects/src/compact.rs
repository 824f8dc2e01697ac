// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::error::{try_vec, Result};

/// Keeps the entries of `items` whose slot in `removed` is unset, preserving order.
pub(crate) fn without_removed<T: Copy>(
    items: &[T],
    removed: &[bool],
    what: &'static str,
) -> Result<Vec<T>> {
    debug_assert_eq!(items.len(), removed.len());
    let mut kept = try_vec(items.len(), what)?;
    kept.extend(
        items
            .iter()
            .zip(removed)
            .filter(|(_, &gone)| !gone)
            .map(|(&item, _)| item),
    );
    Ok(kept)
}


// End of File
