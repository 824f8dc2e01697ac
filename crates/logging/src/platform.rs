// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/// [`Info`](log::LevelFilter::Info) on debug builds, [`Warn`](log::LevelFilter::Warn) on release.
pub fn default_level() -> log::LevelFilter {
    if cfg!(debug_assertions) {
        log::LevelFilter::Info
    } else {
        log::LevelFilter::Warn
    }
}

/// Initializes logging for the crates named in `crates` at the [`default_level`]. On native
/// targets `RUST_LOG` takes precedence, like so:
///
/// ```sh
/// $> RUST_LOG=defectscan_defects=trace defectscan settings.toml
/// ```
///
/// Only the first call has any effect.
pub fn init(crates: &[&'static str]) {
    init_with_level(crates, default_level());
}

/// Like [`init`], with an explicit default level.
pub fn init_with_level(crates: &[&'static str], log_level: log::LevelFilter) {
    crate::platform_impl::init_with_level(crates, log_level);
}

// End of File
