// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Vertex distance, interpolation and equality properties

use approx::assert_relative_eq;
use nalgebra::{Point3, Vector3, Vector4};
use proxygeom::geometry::{Plane, Vertex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_vertex(rng: &mut StdRng) -> Vertex {
    let mut coord = || rng.gen_range(-10.0..10.0);
    let mut vertex = Vertex::new(
        Point3::new(coord(), coord(), coord()),
        Vector3::new(coord(), coord(), coord()),
        Vector4::new(coord(), coord(), coord(), coord()),
    );
    if rng.gen_bool(0.5) {
        vertex.set_normal(Vector3::new(
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
        ));
    }
    vertex
}

#[test]
fn test_distance_three_four_five() {
    let a = Vertex::at(Point3::new(0.0, 0.0, 0.0));
    let b = Vertex::at(Point3::new(3.0, 4.0, 0.0));
    assert_eq!(a.distance(&b), 5.0);
}

#[test]
fn test_interpolation_boundaries() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..500 {
        let a = random_vertex(&mut rng);
        let mut b = random_vertex(&mut rng);
        if a.has_normal() && !b.has_normal() {
            b.set_normal(Vector3::new(0.0, 0.0, 1.0));
        }
        if !a.has_normal() {
            b.clear_normal();
        }

        assert!(a.interpolate(&b, 0.0).equals(&a, 1e-9));
        assert!(a.interpolate(&b, 1.0).equals(&b, 1e-9));
    }
}

#[test]
fn test_equality_is_reflexive_and_symmetric() {
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..500 {
        let a = random_vertex(&mut rng);
        let mut b = a;
        b.coords.x += rng.gen_range(-1e-4..1e-4);
        b.color.y += rng.gen_range(-1e-2..1e-2);

        assert!(a.equals(&a, 1e-5));
        for epsilon in [0.0, 1e-5, 1e-3] {
            assert_eq!(a.equals(&b, epsilon), b.equals(&a, epsilon));
        }
    }
}

#[test]
fn test_clip_against_plane() {
    let plane = Plane::new(Vector3::new(0.0, 0.0, 2.0), 2.0);
    let mut above = Vertex::at(Point3::new(0.0, 0.0, 1.5));
    let mut below = Vertex::at(Point3::new(0.0, 0.0, 0.5));

    assert_relative_eq!(above.distance_to_plane(&plane, 1e-6), 1.0);
    above.clip(&plane, 1e-6).unwrap();
    below.clip(&plane, 1e-6).unwrap();
    assert!(above.is_discarded());
    assert!(!below.is_discarded());
}
