// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use common::Positions;
use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::error::{out_of_memory, try_vec, DefectError, Result};

/// The chemical symbols of a lattice, indexed by species index in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesList {
    symbols: Vec<String>,
}

impl SpeciesList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn symbol(&self, index: usize) -> Option<&str> {
        self.symbols.get(index).map(String::as_str)
    }

    pub fn index_of(&self, symbol: &str) -> Option<usize> {
        self.symbols.iter().position(|s| s == symbol)
    }

    /// Returns the index of `symbol`, appending it if it is new.
    pub fn push_unique(&mut self, symbol: &str) -> usize {
        match self.index_of(symbol) {
            Some(index) => index,
            None => {
                self.symbols.push(symbol.to_string());
                self.symbols.len() - 1
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.symbols.iter().map(String::as_str)
    }
}

impl<S: AsRef<str>> FromIterator<S> for SpeciesList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut list = SpeciesList::new();
        for symbol in iter {
            list.push_unique(symbol.as_ref());
        }
        list
    }
}

/// A point set with a parallel species-index array.
///
/// Used both for the reference (ideal) lattice and for the input configuration; each keeps its
/// own species index space.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "LatticeParts")]
pub struct Lattice {
    positions: Positions,
    species: Vec<usize>,
    species_list: SpeciesList,
}

/// Unchecked serialized form of a [`Lattice`].
#[derive(Deserialize)]
struct LatticeParts {
    positions: Positions,
    species: Vec<usize>,
    species_list: SpeciesList,
}

impl TryFrom<LatticeParts> for Lattice {
    type Error = DefectError;

    fn try_from(parts: LatticeParts) -> Result<Self> {
        Lattice::from_parts(parts.positions, parts.species, parts.species_list)
    }
}

impl Lattice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assembles a lattice from parallel arrays, checking that they agree in length and that
    /// every species index names an entry of `species_list`.
    pub fn from_parts(
        positions: Positions,
        species: Vec<usize>,
        species_list: SpeciesList,
    ) -> Result<Self> {
        if positions.len() != species.len() {
            return Err(DefectError::InvalidInput(format!(
                "{} positions but {} species indices",
                positions.len(),
                species.len()
            )));
        }
        if let Some(&bad) = species.iter().find(|&&s| s >= species_list.len()) {
            return Err(DefectError::InvalidInput(format!(
                "species index {} out of range for {} species",
                bad,
                species_list.len()
            )));
        }
        Ok(Self {
            positions,
            species,
            species_list,
        })
    }

    /// Appends an atom, registering its symbol if needed. Returns the new atom's index.
    pub fn add_atom(&mut self, symbol: &str, position: DVec3) -> usize {
        let species = self.species_list.push_unique(symbol);
        self.positions.push(position);
        self.species.push(species);
        self.species.len() - 1
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// A copy of this lattice with every position shifted by `offset`.
    pub fn translated(&self, offset: DVec3) -> Result<Lattice> {
        let positions = self
            .positions
            .translated(offset)
            .map_err(out_of_memory("translated positions"))?;
        let mut species = try_vec(self.species.len(), "translated species")?;
        species.extend_from_slice(&self.species);
        Ok(Lattice {
            positions,
            species,
            species_list: self.species_list.clone(),
        })
    }

    pub fn positions(&self) -> &Positions {
        &self.positions
    }

    pub fn position(&self, index: usize) -> DVec3 {
        self.positions[index]
    }

    pub fn species(&self) -> &[usize] {
        &self.species
    }

    pub fn species_of(&self, index: usize) -> usize {
        self.species[index]
    }

    pub fn species_list(&self) -> &SpeciesList {
        &self.species_list
    }

    /// The chemical symbol of atom `index`.
    pub fn symbol_of(&self, index: usize) -> &str {
        self.species_list
            .symbol(self.species[index])
            .unwrap_or_default()
    }
}

// End of File
