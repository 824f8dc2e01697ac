// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! # Point defect detection
//!
//! Compares an input configuration of atoms against a reference lattice and reports the point
//! defects: vacancies (empty sites), interstitials (atoms on no site), antisites (sites occupied by
//! the wrong species) and split-interstitials (two interstitials sharing one vacant site).
//! Optionally, structure types from an adaptive common neighbour analysis cancel out spurious
//! vacancy/interstitial pairs, and the surviving defects are grouped into clusters.
//!
//! [`find_defects`] runs every pass in order:
//!
//! 1. site occupancy ([`classify_sites`])
//! 2. ACNA refinement ([`refine_with_acna`]), when structure types are supplied
//! 3. split-interstitial detection ([`resolve_split_interstitials`])
//! 4. filtering by defect type and species ([`filter_defects`])
//! 5. clustering ([`find_defect_clusters`])
//!
//! Each pass is also public so it can be run on its own. All distances go through
//! [`CellGeometry`](common::CellGeometry), which applies the minimum-image convention on periodic
//! axes.

mod acna;
mod cluster;
mod compact;
mod error;
mod filter;
mod lattice;
mod neighbor_list;
mod occupancy;
mod pipeline;
mod result;
mod settings;
mod spatial_index;
mod split;
mod timer;

pub use acna::{refine_with_acna, AcnaInput, AcnaRefinement};
pub use cluster::{
    find_defect_clusters, label_clusters, ClusterLabels, ClusterSizeRange, DefectClusters,
};
pub use error::{DefectError, Result};
pub use filter::{filter_defects, tally_species, DefectTypes, SpeciesExclusions};
pub use lattice::{Lattice, SpeciesList};
pub use neighbor_list::{Neighbor, NeighborList};
pub use occupancy::{classify_sites, validate_vacancy_radius, Occupancy};
pub use pipeline::find_defects;
pub use result::{
    Antisite, Defect, DefectCounts, DefectLists, DefectResult, SpeciesTallies, SplitInterstitial,
};
pub use settings::{AcnaAlgorithm, DefectSettings, SplitAlgorithm, ACNA_FCC};
pub use spatial_index::{cell_width_for, SpatialIndex};
pub use split::{resolve_split_interstitials, SplitInput, SplitResolution};

// End of File
