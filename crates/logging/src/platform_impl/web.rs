// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

pub(crate) fn init_with_level(_crates: &[&'static str], log_level: log::LevelFilter) {
    // console_log has no per-crate filtering and no "off" level.
    let Some(level) = log_level.to_level() else {
        return;
    };
    if console_log::init_with_level(level).is_err() {
        log::debug!("logger already initialized");
    }
}

// End of File
