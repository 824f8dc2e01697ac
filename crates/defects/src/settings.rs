// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use serde::{Deserialize, Deserializer, Serialize};

use crate::cluster::ClusterSizeRange;
use crate::error::{DefectError, Result};
use crate::filter::DefectTypes;

/// Structure type the adaptive common neighbour analysis assigns to atoms in a perfect FCC crystal.
pub const ACNA_FCC: i32 = 1;

/// How vacancies and interstitial pairs are merged into split-interstitials.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitAlgorithm {
    /// Two interstitials that both have the vacancy as their nearest vacancy.
    #[default]
    MutualNearest,
    /// Isolated clusters of one vacancy and two interstitials.
    ClusterTriplet,
}

/// How vacancy/interstitial pairs are cancelled using structure types.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AcnaAlgorithm {
    /// Pair each vacancy with its nearest ideal interstitial that prefers it back.
    #[default]
    MutualMatch,
    /// Cancel a vacancy with its only neighbouring interstitial, if that one is ideal.
    BoxScan,
}

/// Tunables of a defect search. Lengths are in the same units as the positions.
///
/// `vacancy_radius` should be small enough that no input atom can be the nearest candidate of two
/// reference sites; with a larger radius the site assignment depends on site order. Set
/// `check_vacancy_radius` to have [`find_defects`](crate::find_defects) reject such a radius.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DefectSettings {
    pub vacancy_radius: f64,
    pub check_vacancy_radius: bool,

    pub include_vacancies: bool,
    pub include_interstitials: bool,
    pub include_antisites: bool,

    pub identify_split_interstitials: bool,
    pub split_algorithm: SplitAlgorithm,

    pub acna_algorithm: AcnaAlgorithm,
    pub acna_structure_type: i32,

    pub find_clusters: bool,
    pub cluster_radius: f64,
    pub min_cluster_size: usize,
    /// A value below `min_cluster_size` (or none at all) means no upper bound. Settings files
    /// may also spell this as any negative number, conventionally `-1`.
    #[serde(deserialize_with = "deserialize_size_bound")]
    pub max_cluster_size: Option<usize>,

    pub drift_compensation: bool,

    /// Symbols to report. `None` shows every species.
    pub visible_species: Option<Vec<String>>,

    /// Lower bound on spatial index cell width.
    pub min_cell_width: f64,
}

/// Reads an optional size bound, mapping negative values to no bound.
fn deserialize_size_bound<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
where
    D: Deserializer<'de>,
{
    let bound = Option::<i64>::deserialize(deserializer)?;
    Ok(bound.and_then(|b| usize::try_from(b).ok()))
}

impl Default for DefectSettings {
    fn default() -> Self {
        Self {
            vacancy_radius: 1.3,
            check_vacancy_radius: false,
            include_vacancies: true,
            include_interstitials: true,
            include_antisites: true,
            identify_split_interstitials: true,
            split_algorithm: SplitAlgorithm::default(),
            acna_algorithm: AcnaAlgorithm::default(),
            acna_structure_type: ACNA_FCC,
            find_clusters: false,
            cluster_radius: 5.0,
            min_cluster_size: 1,
            max_cluster_size: None,
            drift_compensation: false,
            visible_species: None,
            min_cell_width: 3.0,
        }
    }
}

impl DefectSettings {
    pub fn defect_types(&self) -> DefectTypes {
        DefectTypes {
            vacancies: self.include_vacancies,
            interstitials: self.include_interstitials,
            antisites: self.include_antisites,
        }
    }

    pub fn cluster_size_range(&self) -> ClusterSizeRange {
        ClusterSizeRange::new(self.min_cluster_size, self.max_cluster_size)
    }

    /// Rejects radii that are not positive and finite.
    pub fn validate(&self) -> Result<()> {
        let positive = |name: &str, value: f64| {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(DefectError::InvalidInput(format!(
                    "{} must be positive and finite, got {}",
                    name, value
                )))
            }
        };
        positive("vacancy_radius", self.vacancy_radius)?;
        positive("min_cell_width", self.min_cell_width)?;
        if self.find_clusters {
            positive("cluster_radius", self.cluster_radius)?;
        }
        Ok(())
    }
}

// End of File
