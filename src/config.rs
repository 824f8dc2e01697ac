// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Run settings, read from a TOML file:
//!
//! ```toml
//! reference = "lattice.dat"
//! input = "final.dat"
//! pbc = [true, true, false]
//!
//! [defects]
//! vacancy_radius = 1.3
//! find_clusters = true
//! ```
//!
//! Relative paths are taken relative to the directory holding the settings file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use defects::DefectSettings;
use glam::DVec3;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid settings: {0}")]
    Toml(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    /// Lattice file holding the perfect reference sites.
    pub reference: PathBuf,
    /// Lattice file holding the configuration to analyse.
    pub input: PathBuf,
    /// Optional per-atom structure types for the input; enables ACNA refinement.
    #[serde(default)]
    pub structure_types: Option<PathBuf>,
    #[serde(default = "all_periodic")]
    pub pbc: [bool; 3],
    /// Offset added to the reference when drift compensation is on.
    #[serde(default)]
    pub drift: Option<[f64; 3]>,
    #[serde(default)]
    pub defects: DefectSettings,
}

fn all_periodic() -> [bool; 3] {
    [true; 3]
}

impl RunConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Reads a settings file and resolves its relative paths.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let mut config = Self::from_toml_str(&fs::read_to_string(path)?)?;
        if let Some(dir) = path.parent() {
            config.resolve_relative_to(dir);
        }
        Ok(config)
    }

    /// Joins every relative path onto `dir`.
    pub fn resolve_relative_to(&mut self, dir: &Path) {
        let resolve = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = dir.join(&*p);
            }
        };
        resolve(&mut self.reference);
        resolve(&mut self.input);
        if let Some(types) = self.structure_types.as_mut() {
            resolve(types);
        }
    }

    pub fn drift(&self) -> Option<DVec3> {
        self.drift.map(DVec3::from_array)
    }
}

// End of File
