// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use serde::{Deserialize, Serialize};

use crate::cluster::DefectClusters;

/// A reference site occupied by an input atom of the wrong species.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Antisite {
    /// Reference-site index.
    pub site: usize,
    /// Input-atom index of the occupant.
    pub occupant: usize,
}

/// Two interstitial atoms sharing one vacant reference site, counted as a single defect.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SplitInterstitial {
    /// Reference-site index of the shared vacancy.
    pub vacancy: usize,
    /// Input-atom indices of the two interstitials.
    pub atoms: [usize; 2],
}

/// A single logical defect.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Defect {
    Vacancy(usize),
    Interstitial(usize),
    Antisite(Antisite),
    SplitInterstitial(SplitInterstitial),
}

/// The four disjoint defect categories.
///
/// Wherever defects are enumerated as one sequence (cluster ids, cluster members) the order is
/// vacancies, interstitials, antisites, then split-interstitials.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DefectLists {
    pub vacancies: Vec<usize>,
    pub interstitials: Vec<usize>,
    pub antisites: Vec<Antisite>,
    pub split_interstitials: Vec<SplitInterstitial>,
}

impl DefectLists {
    /// Number of logical defects (a split-interstitial counts once).
    pub fn len(&self) -> usize {
        self.vacancies.len()
            + self.interstitials.len()
            + self.antisites.len()
            + self.split_interstitials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Defect> + '_ {
        self.vacancies
            .iter()
            .map(|&v| Defect::Vacancy(v))
            .chain(self.interstitials.iter().map(|&i| Defect::Interstitial(i)))
            .chain(self.antisites.iter().map(|&a| Defect::Antisite(a)))
            .chain(
                self.split_interstitials
                    .iter()
                    .map(|&s| Defect::SplitInterstitial(s)),
            )
    }
}

/// Number of defects of each kind after all passes and filters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefectCounts {
    pub total: usize,
    pub vacancies: usize,
    pub interstitials: usize,
    pub antisites: usize,
    pub split_interstitials: usize,
    pub clusters: usize,
}

/// Per-species defect counts.
///
/// Reference-species axes are indexed by the reference lattice's species list and
/// input-species axes by the input lattice's.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesTallies {
    /// `[reference species]`
    pub vacancies: Vec<usize>,
    /// `[input species]`
    pub interstitials: Vec<usize>,
    /// `[reference species]` of the antisite's site.
    pub antisites: Vec<usize>,
    /// `[reference species][input species]`: site species against occupant species.
    pub antisite_occupants: Vec<Vec<usize>>,
    /// `[input species][input species]`: first atom's species against second atom's species.
    pub split_interstitials: Vec<Vec<usize>>,
}

/// Everything found in one configuration.
#[derive(Debug, Clone, Default)]
pub struct DefectResult {
    pub defects: DefectLists,
    /// Present when clustering was requested.
    pub clusters: Option<DefectClusters>,
    pub counts: DefectCounts,
    pub tallies: SpeciesTallies,
}

impl DefectResult {
    pub fn vacancies(&self) -> &[usize] {
        &self.defects.vacancies
    }

    pub fn interstitials(&self) -> &[usize] {
        &self.defects.interstitials
    }

    pub fn antisites(&self) -> &[Antisite] {
        &self.defects.antisites
    }

    pub fn split_interstitials(&self) -> &[SplitInterstitial] {
        &self.defects.split_interstitials
    }

    /// Members of every cluster, indexed by cluster id. Empty when clustering was not requested.
    pub fn cluster_members(&self) -> Vec<Vec<Defect>> {
        match &self.clusters {
            Some(clusters) => clusters.members(&self.defects),
            None => Vec::new(),
        }
    }
}

// End of File
