// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

// Tests for the SpatialIndex cell grid.
//
// Validates grid sizing, cell assignment under periodic and open boundaries, neighbourhood
// enumeration, and cutoff queries against brute-force enumeration.

use common::{CellGeometry, GeometryError, Positions};
use defectscan_defects::{cell_width_for, DefectError, SpatialIndex};
use glam::DVec3;

fn periodic_cube(side: f64) -> CellGeometry {
    CellGeometry::periodic(DVec3::splat(side)).unwrap()
}

/// Deterministic scatter of `n` points over `[0, side)^3`.
fn scatter(n: usize, side: f64) -> Positions {
    (0..n)
        .map(|i| {
            let f = i as f64;
            DVec3::new(
                (f * 1.7 + 0.13) % side,
                (f * 2.3 + 0.29) % side,
                (f * 3.1 + 0.41) % side,
            )
        })
        .collect()
}

fn brute_force_within(
    points: &Positions,
    geometry: &CellGeometry,
    center: DVec3,
    cutoff: f64,
) -> Vec<usize> {
    points
        .iter()
        .enumerate()
        .filter(|(_, p)| geometry.separation_sq(center, *p) < cutoff * cutoff)
        .map(|(j, _)| j)
        .collect()
}

fn index_within(
    index: &SpatialIndex,
    points: &Positions,
    center: DVec3,
    cutoff: f64,
) -> Vec<usize> {
    let mut found = Vec::new();
    index
        .for_each_within(points, center, cutoff, |j, _| found.push(j))
        .unwrap();
    found.sort();
    found
}

// ============================================================================
// Grid sizing
// ============================================================================

#[test]
fn cell_width_is_at_least_minimum() {
    assert_eq!(cell_width_for(1.3, 3.0), 3.0);
    assert_eq!(cell_width_for(5.0, 3.0), 5.0);
}

#[test]
fn cells_per_axis_floor_extent_over_width() {
    let geometry = CellGeometry::periodic(DVec3::new(10.0, 7.0, 2.0)).unwrap();
    let index = SpatialIndex::new(&geometry, 3.0).unwrap();
    assert_eq!(index.counts(), [3, 2, 1]);
    assert_eq!(index.cell_count(), 6);
    // Actual widths are extent / count, never narrower than requested except on 1-cell axes.
    assert!((index.min_cell_width() - 2.0).abs() < 1e-12);
}

#[test]
fn rejects_invalid_width() {
    let geometry = periodic_cube(10.0);
    for width in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        match SpatialIndex::new(&geometry, width) {
            Err(DefectError::Geometry(GeometryError::InvalidCellWidth(_))) => {}
            other => panic!("width {width}: expected InvalidCellWidth, got {:?}", other.err()),
        }
    }
}

#[test]
fn rejects_unaddressable_grid() {
    let geometry = periodic_cube(1e300);
    match SpatialIndex::new(&geometry, 1.0) {
        Err(DefectError::Geometry(GeometryError::TooManyCells)) => {}
        other => panic!("expected TooManyCells, got {:?}", other.err()),
    }
}

// ============================================================================
// Cell assignment
// ============================================================================

#[test]
fn periodic_images_share_a_cell() {
    let geometry = periodic_cube(12.0);
    let index = SpatialIndex::new(&geometry, 3.0).unwrap();
    let p = DVec3::new(1.0, 5.0, 11.0);
    let home = index.cell_of(p).unwrap();
    assert_eq!(index.cell_of(p + DVec3::new(12.0, 0.0, 0.0)).unwrap(), home);
    assert_eq!(index.cell_of(p - DVec3::new(0.0, 24.0, 0.0)).unwrap(), home);
    assert_eq!(index.cell_of(p + DVec3::new(-12.0, 12.0, 36.0)).unwrap(), home);
}

#[test]
fn open_axis_clamps_to_edge_cells() {
    let geometry = CellGeometry::new(DVec3::splat(12.0), [false; 3]).unwrap();
    let index = SpatialIndex::new(&geometry, 3.0).unwrap();
    let low = index.cell_of(DVec3::new(0.5, 0.5, 0.5)).unwrap();
    let high = index.cell_of(DVec3::new(11.5, 11.5, 11.5)).unwrap();
    assert_eq!(index.cell_of(DVec3::new(-40.0, -1.0, -0.1)).unwrap(), low);
    assert_eq!(index.cell_of(DVec3::new(13.0, 500.0, 12.0)).unwrap(), high);
}

#[test]
fn non_finite_point_is_out_of_bounds() {
    let index = SpatialIndex::new(&periodic_cube(10.0), 3.0).unwrap();
    assert!(matches!(
        index.cell_of(DVec3::new(f64::NAN, 1.0, 1.0)),
        Err(GeometryError::PointOutOfBounds { .. })
    ));
    let mut index = index;
    assert!(index.insert(0, DVec3::new(1.0, f64::INFINITY, 1.0)).is_err());
}

#[test]
fn build_places_every_point_once() {
    let points = scatter(50, 10.0);
    let index = SpatialIndex::build(&points, &periodic_cube(10.0), 3.0).unwrap();
    let mut all: Vec<usize> = (0..index.cell_count())
        .flat_map(|c| index.cell(c).to_vec())
        .collect();
    all.sort();
    assert_eq!(all, (0..50).collect::<Vec<_>>());
}

// ============================================================================
// Neighbourhoods
// ============================================================================

#[test]
fn interior_neighbourhood_has_27_cells() {
    let geometry = CellGeometry::new(DVec3::splat(15.0), [false; 3]).unwrap();
    let index = SpatialIndex::new(&geometry, 3.0).unwrap();
    let center = index.cell_of(DVec3::splat(7.5)).unwrap();
    let hood = index.neighborhood(center);
    assert_eq!(hood.len(), 27);
    assert!(hood.contains(&center));
}

#[test]
fn corner_neighbourhood_on_open_axes_has_8_cells() {
    let geometry = CellGeometry::new(DVec3::splat(15.0), [false; 3]).unwrap();
    let index = SpatialIndex::new(&geometry, 3.0).unwrap();
    let corner = index.cell_of(DVec3::splat(0.1)).unwrap();
    assert_eq!(index.neighborhood(corner).len(), 8);
}

#[test]
fn corner_neighbourhood_wraps_on_periodic_axes() {
    let index = SpatialIndex::new(&periodic_cube(15.0), 3.0).unwrap();
    let corner = index.cell_of(DVec3::splat(0.1)).unwrap();
    let far = index.cell_of(DVec3::splat(14.9)).unwrap();
    let hood = index.neighborhood(corner);
    assert_eq!(hood.len(), 27);
    assert!(hood.contains(&far));
}

#[test]
fn small_periodic_axes_do_not_repeat_cells() {
    // Two cells along x and one along y: wrapping would otherwise revisit cells.
    let geometry = CellGeometry::periodic(DVec3::new(6.0, 3.0, 9.0)).unwrap();
    let index = SpatialIndex::new(&geometry, 3.0).unwrap();
    assert_eq!(index.counts(), [2, 1, 3]);
    let hood = index.neighborhood(0);
    let mut unique = hood.to_vec();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), hood.len());
    assert_eq!(hood.len(), 6);
}

// ============================================================================
// Cutoff queries against brute force
// ============================================================================

#[test]
fn query_matches_brute_force_periodic() {
    let geometry = periodic_cube(10.0);
    let points = scatter(80, 10.0);
    let cutoff = 2.6;
    let index = SpatialIndex::build(&points, &geometry, cell_width_for(cutoff, 3.0)).unwrap();

    for center in points.iter() {
        assert_eq!(
            index_within(&index, &points, center, cutoff),
            brute_force_within(&points, &geometry, center, cutoff)
        );
    }
}

#[test]
fn query_matches_brute_force_mixed_boundaries() {
    let geometry = CellGeometry::new(DVec3::new(10.0, 13.0, 9.0), [true, false, true]).unwrap();
    let points = scatter(80, 9.0);
    let cutoff = 3.5;
    let index = SpatialIndex::build(&points, &geometry, cell_width_for(cutoff, 3.0)).unwrap();

    for center in points.iter() {
        assert_eq!(
            index_within(&index, &points, center, cutoff),
            brute_force_within(&points, &geometry, center, cutoff)
        );
    }
}

#[test]
fn query_finds_neighbour_across_periodic_face() {
    let geometry = periodic_cube(10.0);
    let points: Positions = vec![DVec3::new(0.2, 5.0, 5.0), DVec3::new(9.9, 5.0, 5.0)].into();
    let index = SpatialIndex::build(&points, &geometry, 3.0).unwrap();
    assert_eq!(index_within(&index, &points, points[0], 1.0), vec![0, 1]);
}

#[test]
fn query_uses_strict_cutoff() {
    let geometry = periodic_cube(10.0);
    let points: Positions = vec![DVec3::new(1.0, 1.0, 1.0), DVec3::new(3.0, 1.0, 1.0)].into();
    let index = SpatialIndex::build(&points, &geometry, 3.0).unwrap();
    assert_eq!(index_within(&index, &points, points[0], 2.0), vec![0]);
    assert_eq!(index_within(&index, &points, points[0], 2.01), vec![0, 1]);
}

#[test]
fn query_reports_squared_separation() {
    let geometry = periodic_cube(10.0);
    let points: Positions = vec![DVec3::new(9.5, 0.0, 0.0)].into();
    let index = SpatialIndex::build(&points, &geometry, 3.0).unwrap();
    let mut seps = Vec::new();
    index
        .for_each_within(&points, DVec3::new(0.5, 0.0, 0.0), 2.0, |_, sep2| seps.push(sep2))
        .unwrap();
    assert_eq!(seps.len(), 1);
    assert!((seps[0] - 1.0).abs() < 1e-12);
}

// End of File
