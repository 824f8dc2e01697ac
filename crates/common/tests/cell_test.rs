// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

// Tests for CellGeometry: construction, minimum-image separations and coordinate wrapping.

use defectscan_common::{Axis, CellGeometry, GeometryError};
use glam::DVec3;

const EPS: f64 = 1e-12;

fn cube(side: f64) -> CellGeometry {
    CellGeometry::periodic(DVec3::splat(side)).unwrap()
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn accepts_positive_extents() {
    let cell = CellGeometry::new(DVec3::new(10.0, 20.0, 30.0), [true, false, true]).unwrap();
    assert_eq!(cell.dims(), DVec3::new(10.0, 20.0, 30.0));
    assert_eq!(cell.extent(Axis::Y), 20.0);
    assert_eq!(cell.pbc(), [true, false, true]);
    assert!(cell.is_periodic(Axis::X));
    assert!(!cell.is_periodic(Axis::Y));
}

#[test]
fn rejects_zero_extent() {
    let err = CellGeometry::new(DVec3::new(10.0, 0.0, 10.0), [true; 3]).unwrap_err();
    assert_eq!(
        err,
        GeometryError::DegenerateCell {
            axis: Axis::Y,
            extent: 0.0
        }
    );
}

#[test]
fn rejects_negative_and_non_finite_extents() {
    assert!(CellGeometry::periodic(DVec3::new(-1.0, 1.0, 1.0)).is_err());
    assert!(CellGeometry::periodic(DVec3::new(1.0, f64::NAN, 1.0)).is_err());
    assert!(CellGeometry::periodic(DVec3::new(1.0, 1.0, f64::INFINITY)).is_err());
}

// ============================================================================
// Minimum-image separation
// ============================================================================

#[test]
fn separation_inside_cell_is_plain_difference() {
    let cell = cube(10.0);
    let d = cell.separation(DVec3::new(1.0, 2.0, 3.0), DVec3::new(2.0, 4.0, 6.0));
    assert!((d - DVec3::new(1.0, 2.0, 3.0)).length() < EPS);
}

#[test]
fn separation_folds_across_periodic_boundary() {
    let cell = cube(10.0);
    let d = cell.separation(DVec3::new(0.5, 5.0, 5.0), DVec3::new(9.5, 5.0, 5.0));
    assert!((d.x + 1.0).abs() < EPS, "got {d}");
    assert!((cell.separation_sq(DVec3::new(0.5, 5.0, 5.0), DVec3::new(9.5, 5.0, 5.0)) - 1.0).abs() < EPS);
}

#[test]
fn separation_does_not_fold_non_periodic_axis() {
    let cell = CellGeometry::new(DVec3::splat(10.0), [false, true, true]).unwrap();
    let d = cell.separation(DVec3::new(0.5, 5.0, 5.0), DVec3::new(9.5, 5.0, 5.0));
    assert!((d.x - 9.0).abs() < EPS);
}

#[test]
fn separation_handles_points_outside_the_cell() {
    // Points several images away still fold to the nearest image.
    let cell = cube(10.0);
    let d = cell.separation(DVec3::new(1.0, 1.0, 1.0), DVec3::new(31.5, -18.5, 1.0));
    assert!((d - DVec3::new(0.5, 0.5, 0.0)).length() < EPS, "got {d}");
}

#[test]
fn separation_is_antisymmetric() {
    let cell = CellGeometry::new(DVec3::new(7.0, 9.0, 11.0), [true, true, false]).unwrap();
    let a = DVec3::new(0.3, 8.7, 2.0);
    let b = DVec3::new(6.9, 0.2, 10.0);
    let ab = cell.separation(a, b);
    let ba = cell.separation(b, a);
    assert!((ab + ba).length() < EPS);
}

// ============================================================================
// Wrapping
// ============================================================================

#[test]
fn wrap_maps_into_half_open_range() {
    let cell = cube(10.0);
    assert!((cell.wrap_coordinate(Axis::X, 12.5) - 2.5).abs() < EPS);
    assert!((cell.wrap_coordinate(Axis::X, -0.5) - 9.5).abs() < EPS);
    assert_eq!(cell.wrap_coordinate(Axis::X, 10.0), 0.0);
    assert_eq!(cell.wrap_coordinate(Axis::X, 0.0), 0.0);
}

#[test]
fn wrap_never_returns_the_upper_bound() {
    let cell = cube(10.0);
    let w = cell.wrap_coordinate(Axis::Z, -1e-18);
    assert!((0.0..10.0).contains(&w), "got {w}");
}

#[test]
fn wrap_leaves_non_periodic_axis_alone() {
    let cell = CellGeometry::new(DVec3::splat(10.0), [true, true, false]).unwrap();
    assert_eq!(cell.wrap_coordinate(Axis::Z, -3.0), -3.0);
    assert_eq!(cell.wrap_coordinate(Axis::Z, 13.0), 13.0);
}

// End of File
