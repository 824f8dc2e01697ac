// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! # defectscan's Logging Setup
//!
//! Everything in defectscan logs through the [`log`] facade. This crate installs the backend:
//! [`env_logger`] on native targets, reading its configuration from the environment, and
//! `console_log` in the browser.
//!
//! By default, the logging level is set to [`Info`](log::Level::Info) for debug builds, and
//! [`Warn`](log::Level::Warn) for release builds. This can be overridden by setting the `RUST_LOG`
//! environment variable, like so:
//!
//! ```sh
//! $> RUST_LOG=defectscan_defects=debug defectscan settings.toml
//! ```

mod platform;
mod platform_impl;
pub use platform::{default_level, init, init_with_level};

// End of File
