// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Readers for LBOMD lattice files and per-atom structure type files.
//!
//! A lattice file holds the atom count, the cell extents and one record per atom:
//!
//! ```text
//! 2
//! 10.0 10.0 10.0
//! Fe 0.0 0.0 0.0 0.0
//! Cr 5.0 5.0 5.0 0.0
//! ```

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::num::{ParseFloatError, ParseIntError};
use std::path::Path;

use defects::Lattice;
use glam::f64::DVec3;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LatticeError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid lattice format: {0}")]
    Parse(String),

    #[error("Invalid floating point number: {0}")]
    FloatParse(#[from] ParseFloatError),

    #[error("Invalid integer: {0}")]
    IntParse(#[from] ParseIntError),
}

/// Contents of a lattice file.
#[derive(Debug, Clone, PartialEq)]
pub struct LatticeFile {
    /// Cell extents from the header.
    pub dims: DVec3,
    pub lattice: Lattice,
    /// Per-atom charges; carried through but not used by the defect search.
    pub charges: Vec<f64>,
}

pub fn read_lattice(path: impl AsRef<Path>) -> Result<LatticeFile, LatticeError> {
    let file = File::open(path)?;
    parse_lattice(BufReader::new(file))
}

pub fn parse_lattice(reader: impl BufRead) -> Result<LatticeFile, LatticeError> {
    // Blank lines carry no records; keep the line numbers of the rest for error messages.
    let mut lines = reader
        .lines()
        .enumerate()
        .map(|(i, line)| line.map(|l| (i + 1, l)))
        .filter(|line| !matches!(line, Ok((_, l)) if l.trim().is_empty()));

    let (line_no, header) = lines
        .next()
        .ok_or_else(|| LatticeError::Parse("Missing number of atoms".to_string()))??;
    let num_atoms: usize = header.trim().parse().map_err(|_| {
        LatticeError::Parse(format!("Invalid number of atoms on line {}: {}", line_no, header))
    })?;

    let (line_no, dims_line) = lines
        .next()
        .ok_or_else(|| LatticeError::Parse("Missing cell dimensions".to_string()))??;
    let dims: Vec<f64> = dims_line
        .split_whitespace()
        .map(str::parse::<f64>)
        .collect::<Result<_, _>>()?;
    let &[xdim, ydim, zdim] = dims.as_slice() else {
        return Err(LatticeError::Parse(format!(
            "Expected three cell dimensions on line {}: {}",
            line_no, dims_line
        )));
    };

    let mut lattice = Lattice::new();
    // Not reserved from the header count, which may be arbitrary.
    let mut charges: Vec<f64> = Vec::new();
    for line in lines {
        let (line_no, line) = line?;
        if lattice.len() == num_atoms {
            return Err(LatticeError::Parse(format!(
                "Expected {} atoms, found another on line {}",
                num_atoms, line_no
            )));
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        let &[symbol, x, y, z, charge] = parts.as_slice() else {
            return Err(LatticeError::Parse(format!(
                "Invalid atom format on line {}: {}",
                line_no, line
            )));
        };
        let position = DVec3::new(x.parse()?, y.parse()?, z.parse()?);
        lattice.add_atom(symbol, position);
        charges.push(charge.parse()?);
    }

    if lattice.len() != num_atoms {
        return Err(LatticeError::Parse(format!(
            "Expected {} atoms, but found {}",
            num_atoms,
            lattice.len()
        )));
    }

    log::debug!(
        "read {} atoms of {} species",
        lattice.len(),
        lattice.species_list().len()
    );

    Ok(LatticeFile {
        dims: DVec3::new(xdim, ydim, zdim),
        lattice,
        charges,
    })
}

/// Reads one structure type per line.
pub fn read_structure_types(path: impl AsRef<Path>) -> Result<Vec<i32>, LatticeError> {
    let file = File::open(path)?;
    parse_structure_types(BufReader::new(file))
}

pub fn parse_structure_types(reader: impl BufRead) -> Result<Vec<i32>, LatticeError> {
    let mut types: Vec<i32> = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if !line.is_empty() {
            types.push(line.parse()?);
        }
    }
    Ok(types)
}

// End of File
