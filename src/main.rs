// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::io::{self, Write};

use anyhow::{bail, Context, Result};
use defectscan::config::RunConfig;
use defectscan::report::write_report;
use defectscan::{analyze, APP_NAME};

fn run() -> Result<()> {
    let Some(path) = std::env::args_os().nth(1) else {
        bail!("usage: {} <settings.toml>", APP_NAME);
    };
    let config = RunConfig::load(&path)
        .with_context(|| format!("Failed to load settings {}", path.to_string_lossy()))?;

    let analysis = analyze(&config)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_report(
        &mut out,
        &analysis.result,
        &analysis.input.lattice,
        &analysis.reference.lattice,
    )?;
    out.flush()?;
    Ok(())
}

fn main() {
    logging::init(&[
        env!("CARGO_PKG_NAME"),
        "defectscan_common",
        "defectscan_defects",
    ]);

    if let Err(err) = run() {
        eprintln!("Error: {}", err);
        for cause in err.chain().skip(1) {
            eprintln!("because: {}", cause);
        }
        std::process::exit(1);
    }
}

// End of File
