// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/// Builds the `RUST_LOG`-style directive enabling `log_level` for each crate in `crates`.
pub(crate) fn filter_directive(crates: &[&'static str], log_level: log::LevelFilter) -> String {
    let level = log_level.as_str().to_ascii_lowercase();
    crates
        .iter()
        .map(|name| format!("{}={}", name, level))
        .collect::<Vec<_>>()
        .join(",")
}

pub(crate) fn init_with_level(crates: &[&'static str], log_level: log::LevelFilter) {
    let directive = filter_directive(crates, log_level);

    // RUST_LOG, when set, replaces the default directive entirely.
    let env = env_logger::Env::default().default_filter_or(directive);
    if let Err(err) = env_logger::Builder::from_env(env).try_init() {
        log::debug!("logger already initialized: {}", err);
    }
}


// End of File
