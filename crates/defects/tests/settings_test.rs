// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use defectscan_defects::{AcnaAlgorithm, DefectSettings, SplitAlgorithm};

#[test]
fn empty_table_gives_defaults() {
    let settings: DefectSettings = toml::from_str("").unwrap();
    assert_eq!(settings, DefectSettings::default());
    assert_eq!(settings.vacancy_radius, 1.3);
    assert_eq!(settings.cluster_radius, 5.0);
    assert_eq!(settings.min_cell_width, 3.0);
    assert_eq!(settings.acna_structure_type, 1);
    assert!(settings.identify_split_interstitials);
    assert!(!settings.find_clusters);
    assert!(!settings.drift_compensation);
    assert!(settings.visible_species.is_none());
}

#[test]
fn parses_every_field() {
    let settings: DefectSettings = toml::from_str(
        r#"
        vacancy_radius = 1.1
        check_vacancy_radius = true
        include_vacancies = false
        include_interstitials = true
        include_antisites = false
        identify_split_interstitials = false
        split_algorithm = "cluster_triplet"
        acna_algorithm = "box_scan"
        acna_structure_type = 2
        find_clusters = true
        cluster_radius = 4.0
        min_cluster_size = 2
        max_cluster_size = 10
        drift_compensation = true
        visible_species = ["Fe", "Cr"]
        min_cell_width = 4.5
        "#,
    )
    .unwrap();
    assert_eq!(settings.vacancy_radius, 1.1);
    assert!(settings.check_vacancy_radius);
    assert_eq!(settings.split_algorithm, SplitAlgorithm::ClusterTriplet);
    assert_eq!(settings.acna_algorithm, AcnaAlgorithm::BoxScan);
    assert_eq!(settings.max_cluster_size, Some(10));
    assert_eq!(
        settings.visible_species,
        Some(vec!["Fe".to_string(), "Cr".to_string()])
    );

    let types = settings.defect_types();
    assert!(!types.vacancies);
    assert!(types.interstitials);
    assert!(!types.antisites);

    let range = settings.cluster_size_range();
    assert!(range.contains(10));
    assert!(!range.contains(11));
}

#[test]
fn negative_max_cluster_size_means_unbounded() {
    let settings: DefectSettings = toml::from_str(
        r#"
        min_cluster_size = 2
        max_cluster_size = -1
        "#,
    )
    .unwrap();
    assert_eq!(settings.max_cluster_size, None);
    let range = settings.cluster_size_range();
    assert!(!range.contains(1));
    assert!(range.contains(1_000_000));
}

#[test]
fn rejects_unknown_keys() {
    let err = toml::from_str::<DefectSettings>("vacancy_raduis = 1.0").unwrap_err();
    assert!(err.to_string().contains("vacancy_raduis"));
}

#[test]
fn rejects_unknown_algorithm() {
    assert!(toml::from_str::<DefectSettings>(r#"split_algorithm = "nearest""#).is_err());
}

#[test]
fn validate_checks_radii() {
    assert!(DefectSettings::default().validate().is_ok());

    let bad = DefectSettings {
        vacancy_radius: f64::NAN,
        ..DefectSettings::default()
    };
    assert!(bad.validate().is_err());

    // The cluster radius only matters when clustering.
    let unused = DefectSettings {
        cluster_radius: -1.0,
        ..DefectSettings::default()
    };
    assert!(unused.validate().is_ok());
    let used = DefectSettings {
        find_clusters: true,
        ..unused
    };
    assert!(used.validate().is_err());
}

// End of File
