// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Plain-text summary of a defect search.

use std::io::{self, Write};

use defects::{DefectResult, Lattice, SpeciesList};

/// Writes the defect counts followed by per-species breakdowns.
///
/// Species with a zero count are left out of the breakdowns.
pub fn write_report(
    out: &mut impl Write,
    result: &DefectResult,
    input: &Lattice,
    reference: &Lattice,
) -> io::Result<()> {
    let counts = &result.counts;
    let tallies = &result.tallies;
    let input_species = input.species_list();
    let reference_species = reference.species_list();

    writeln!(out, "Found {} defects", counts.total)?;

    writeln!(out, "  {} vacancies", counts.vacancies)?;
    write_species_counts(out, &tallies.vacancies, reference_species, "vacancies")?;

    writeln!(out, "  {} interstitials", counts.interstitials)?;
    write_species_counts(out, &tallies.interstitials, input_species, "interstitials")?;

    writeln!(out, "  {} antisites", counts.antisites)?;
    for (site, occupants) in tallies.antisite_occupants.iter().enumerate() {
        for (occupant, &n) in occupants.iter().enumerate() {
            if n > 0 {
                writeln!(
                    out,
                    "    {} {} on {} sites",
                    n,
                    symbol(input_species, occupant),
                    symbol(reference_species, site)
                )?;
            }
        }
    }

    writeln!(out, "  {} split interstitials", counts.split_interstitials)?;
    for (first, row) in tallies.split_interstitials.iter().enumerate() {
        for (second, &n) in row.iter().enumerate() {
            if n > 0 {
                writeln!(
                    out,
                    "    {} {}-{} pairs",
                    n,
                    symbol(input_species, first),
                    symbol(input_species, second)
                )?;
            }
        }
    }

    if let Some(clusters) = &result.clusters {
        writeln!(out, "Found {} clusters", clusters.count())?;
        for (id, size) in clusters.sizes().iter().enumerate() {
            writeln!(out, "  cluster {}: {} defects", id, size)?;
        }
    }

    Ok(())
}

fn write_species_counts(
    out: &mut impl Write,
    counts: &[usize],
    species: &SpeciesList,
    noun: &str,
) -> io::Result<()> {
    for (index, &n) in counts.iter().enumerate() {
        if n > 0 {
            writeln!(out, "    {} {} {}", n, symbol(species, index), noun)?;
        }
    }
    Ok(())
}

fn symbol(species: &SpeciesList, index: usize) -> &str {
    species.symbol(index).unwrap_or("?")
}

// End of File
