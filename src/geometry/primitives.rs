// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Proxy geometry primitives built from faces

use super::{Face, Vertex};
use nalgebra::{Point3, Vector3, Vector4};

/// Side of an axis-aligned box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaceDirection {
    Left,
    Right,
    Bottom,
    Top,
    Front,
    Back,
}

impl FaceDirection {
    pub const ALL: [FaceDirection; 6] = [
        FaceDirection::Left,
        FaceDirection::Right,
        FaceDirection::Bottom,
        FaceDirection::Top,
        FaceDirection::Front,
        FaceDirection::Back,
    ];

    /// Corners `[ul, ur, lr, ll]` of this side of the box `lo..hi`,
    /// counter-clockwise when seen from outside
    pub fn corners(self, lo: &Vector3<f64>, hi: &Vector3<f64>) -> [Vector3<f64>; 4] {
        let (ll, lr, ur, ul) = match self {
            Self::Left => (
                Vector3::new(lo.x, lo.y, hi.z),
                Vector3::new(lo.x, lo.y, lo.z),
                Vector3::new(lo.x, hi.y, lo.z),
                Vector3::new(lo.x, hi.y, hi.z),
            ),
            Self::Right => (
                Vector3::new(hi.x, lo.y, lo.z),
                Vector3::new(hi.x, lo.y, hi.z),
                Vector3::new(hi.x, hi.y, hi.z),
                Vector3::new(hi.x, hi.y, lo.z),
            ),
            Self::Bottom => (
                Vector3::new(lo.x, lo.y, hi.z),
                Vector3::new(hi.x, lo.y, hi.z),
                Vector3::new(hi.x, lo.y, lo.z),
                Vector3::new(lo.x, lo.y, lo.z),
            ),
            Self::Top => (
                Vector3::new(lo.x, hi.y, lo.z),
                Vector3::new(hi.x, hi.y, lo.z),
                Vector3::new(hi.x, hi.y, hi.z),
                Vector3::new(lo.x, hi.y, hi.z),
            ),
            Self::Front => (
                Vector3::new(lo.x, lo.y, lo.z),
                Vector3::new(hi.x, lo.y, lo.z),
                Vector3::new(hi.x, hi.y, lo.z),
                Vector3::new(lo.x, hi.y, lo.z),
            ),
            Self::Back => (
                Vector3::new(hi.x, lo.y, hi.z),
                Vector3::new(lo.x, lo.y, hi.z),
                Vector3::new(lo.x, hi.y, hi.z),
                Vector3::new(hi.x, hi.y, hi.z),
            ),
        };
        [ul, ur, lr, ll]
    }
}

/// Vertex of a volume proxy: normalized voxel position `vox` in `[0,1]³`
/// becomes coords `(2 vox - 1) * sizing`, texcoords `vox` and color `(vox, 1)`
pub fn proxy_vertex(sizing: &Vector3<f64>, voxcoords: &Vector3<f64>) -> Vertex {
    let vox = voxcoords.map(|c| c.clamp(0.0, 1.0));
    let coords = (vox * 2.0 - Vector3::repeat(1.0)).component_mul(sizing);
    Vertex::new(
        Point3::from(coords),
        vox,
        Vector4::new(vox.x, vox.y, vox.z, 1.0),
    )
}

/// One side of the voxel brick `llf..=urb` of a volume with `dim` voxels.
///
/// Voxel centers sit at integer positions, so the brick extends half a voxel
/// beyond them, widened by `spacing` on both ends. An axis with a
/// non-positive voxel count collapses onto the lower end of the proxy.
pub fn proxy_face(
    sizing: &Vector3<f64>,
    dim: &Vector3<i32>,
    direction: FaceDirection,
    llf: &Vector3<i32>,
    urb: &Vector3<i32>,
    spacing: f64,
) -> Face {
    let half = Vector3::repeat(0.5);
    let widen = Vector3::repeat(spacing);
    let lo = llf.cast::<f64>() - half - widen;
    let hi = urb.cast::<f64>() - half + widen;
    let dim = dim.cast::<f64>();

    direction
        .corners(&lo, &hi)
        .iter()
        .map(|corner| {
            let vox = corner.zip_map(&dim, |c, d| if d > 0.0 { c / d } else { 0.0 });
            proxy_vertex(sizing, &vox)
        })
        .collect()
}

/// Face-based primitives
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    /// Axis-aligned box; texcoords and color map the box onto `[0,1]³`
    Cube { llf: Point3<f64>, urb: Point3<f64> },
    /// Proxy of a voxel brick inside a volume, see [`proxy_face`]
    Brick {
        sizing: Vector3<f64>,
        dim: Vector3<i32>,
        llf: Vector3<i32>,
        urb: Vector3<i32>,
        spacing: f64,
    },
}

impl Primitive {
    pub fn cube(llf: Point3<f64>, urb: Point3<f64>) -> Self {
        Self::Cube { llf, urb }
    }

    /// Cube spanning `[-1,1]³`, the default proxy of a whole volume
    pub fn unit_cube() -> Self {
        Self::cube(Point3::new(-1.0, -1.0, -1.0), Point3::new(1.0, 1.0, 1.0))
    }

    pub fn brick(
        sizing: Vector3<f64>,
        dim: Vector3<i32>,
        llf: Vector3<i32>,
        urb: Vector3<i32>,
        spacing: f64,
    ) -> Self {
        Self::Brick {
            sizing,
            dim,
            llf,
            urb,
            spacing,
        }
    }

    /// The six sides, in [`FaceDirection::ALL`] order
    pub fn to_faces(&self) -> Vec<Face> {
        match self {
            Self::Cube { llf, urb } => generate_cube_faces(llf, urb),
            Self::Brick {
                sizing,
                dim,
                llf,
                urb,
                spacing,
            } => FaceDirection::ALL
                .iter()
                .map(|&direction| proxy_face(sizing, dim, direction, llf, urb, *spacing))
                .collect(),
        }
    }
}

fn generate_cube_faces(llf: &Point3<f64>, urb: &Point3<f64>) -> Vec<Face> {
    let extent = urb - llf;
    let texcoord = |p: &Vector3<f64>| {
        (p - llf.coords).zip_map(&extent, |d, e| if e != 0.0 { d / e } else { 0.0 })
    };

    FaceDirection::ALL
        .iter()
        .map(|direction| {
            direction
                .corners(&llf.coords, &urb.coords)
                .iter()
                .map(|corner| {
                    let tex = texcoord(corner);
                    Vertex::new(
                        Point3::from(*corner),
                        tex,
                        Vector4::new(tex.x, tex.y, tex.z, 1.0),
                    )
                })
                .collect::<Face>()
        })
        .collect()
}
