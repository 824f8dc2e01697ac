// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::fs;
use std::path::PathBuf;

use defectscan::config::{ConfigError, RunConfig};
use defects::{DefectSettings, SplitAlgorithm};
use glam::DVec3;
use tempfile::tempdir;

#[test]
fn minimal_settings_use_defaults() {
    let config = RunConfig::from_toml_str(
        r#"
        reference = "ref.dat"
        input = "final.dat"
        "#,
    )
    .unwrap();
    assert_eq!(config.reference, PathBuf::from("ref.dat"));
    assert_eq!(config.input, PathBuf::from("final.dat"));
    assert_eq!(config.structure_types, None);
    assert_eq!(config.pbc, [true; 3]);
    assert_eq!(config.drift(), None);
    assert_eq!(config.defects, DefectSettings::default());
}

#[test]
fn full_settings() {
    let config = RunConfig::from_toml_str(
        r#"
        reference = "ref.dat"
        input = "final.dat"
        structure_types = "types.dat"
        pbc = [true, false, true]
        drift = [0.5, 0.0, -0.25]

        [defects]
        vacancy_radius = 1.1
        split_algorithm = "cluster_triplet"
        find_clusters = true
        drift_compensation = true
        "#,
    )
    .unwrap();
    assert_eq!(config.structure_types, Some(PathBuf::from("types.dat")));
    assert_eq!(config.pbc, [true, false, true]);
    assert_eq!(config.drift(), Some(DVec3::new(0.5, 0.0, -0.25)));
    assert_eq!(config.defects.vacancy_radius, 1.1);
    assert_eq!(config.defects.split_algorithm, SplitAlgorithm::ClusterTriplet);
    assert!(config.defects.find_clusters);
    assert!(config.defects.drift_compensation);
}

#[test]
fn negative_cluster_bound_in_settings_file() {
    let config = RunConfig::from_toml_str(
        r#"
        reference = "ref.dat"
        input = "final.dat"

        [defects]
        max_cluster_size = -1
        "#,
    )
    .unwrap();
    assert_eq!(config.defects.max_cluster_size, None);
}

#[test]
fn unknown_keys_are_rejected() {
    let err = RunConfig::from_toml_str(
        r#"
        reference = "ref.dat"
        input = "final.dat"
        periodic = true
        "#,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::Toml(_)));

    let err = RunConfig::from_toml_str(
        r#"
        reference = "ref.dat"
        input = "final.dat"
        [defects]
        radius = 1.0
        "#,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::Toml(_)));
}

#[test]
fn lattice_paths_are_required() {
    assert!(RunConfig::from_toml_str(r#"input = "final.dat""#).is_err());
    assert!(RunConfig::from_toml_str(r#"reference = "ref.dat""#).is_err());
}

#[test]
fn load_resolves_paths_against_settings_directory() {
    let dir = tempdir().unwrap();
    let absolute = dir.path().join("elsewhere").join("final.dat");
    let path = dir.path().join("run.toml");
    fs::write(
        &path,
        format!(
            "reference = \"ref.dat\"\ninput = {:?}\nstructure_types = \"types/fcc.dat\"\n",
            absolute.to_string_lossy()
        ),
    )
    .unwrap();

    let config = RunConfig::load(&path).unwrap();
    assert_eq!(config.reference, dir.path().join("ref.dat"));
    assert_eq!(config.input, absolute);
    assert_eq!(config.structure_types, Some(dir.path().join("types/fcc.dat")));
}

#[test]
fn load_reports_missing_file() {
    let dir = tempdir().unwrap();
    let err = RunConfig::load(dir.path().join("missing.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

// End of File
