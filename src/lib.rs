// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Command-line front end for the point-defect search: reads a reference and an input lattice
//! file, runs [`defects::find_defects`] and reports what it found.

pub mod config;
pub mod lattice_file;
pub mod report;

use anyhow::{Context, Result};
use common::CellGeometry;
use defects::DefectResult;

use crate::config::RunConfig;
use crate::lattice_file::{read_lattice, read_structure_types, LatticeFile};

pub const APP_NAME: &str = "defectscan";

/// The lattices of one run together with the defects found in them.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub input: LatticeFile,
    pub reference: LatticeFile,
    pub result: DefectResult,
}

/// Loads the files named in `config` and searches them for defects.
///
/// The cell is taken from the reference header.
pub fn analyze(config: &RunConfig) -> Result<Analysis> {
    let reference = read_lattice(&config.reference).with_context(|| {
        format!("Failed to read reference lattice {}", config.reference.display())
    })?;
    let input = read_lattice(&config.input)
        .with_context(|| format!("Failed to read input lattice {}", config.input.display()))?;
    if input.dims != reference.dims {
        log::warn!(
            "input cell {} differs from reference cell {}; using the reference",
            input.dims,
            reference.dims
        );
    }

    let structure_types = match &config.structure_types {
        Some(path) => Some(read_structure_types(path).with_context(|| {
            format!("Failed to read structure types {}", path.display())
        })?),
        None => None,
    };

    let geometry =
        CellGeometry::new(reference.dims, config.pbc).context("Invalid reference cell")?;
    let result = defects::find_defects(
        &input.lattice,
        &reference.lattice,
        &geometry,
        &config.defects,
        config.drift(),
        structure_types.as_deref(),
    )
    .context("Defect search failed")?;

    Ok(Analysis {
        input,
        reference,
        result,
    })
}

// End of File
