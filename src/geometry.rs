//! Tessellation of [`Geometry`] descriptions into triangle lists.
//!
//! Everything here runs on the CPU and is independent of the GPU; the
//! renderer calls [`RawGeometry::upload`] the first time a geometry handle
//! shows up in a frame.

use std::f32::consts::{PI, TAU};

use glam::Vec3;

use crate::gpu::GpuContext;
use crate::mesh::{Mesh, Vertex3d};
use crate::resources::Geometry;

/// Vertex and index data before GPU upload.
///
/// Front faces wind counter-clockwise when seen from outside.
#[derive(Clone, Debug)]
pub struct RawGeometry {
    pub vertices: Vec<Vertex3d>,
    pub indices: Vec<u32>,
}

impl RawGeometry {
    pub fn new(vertices: Vec<Vertex3d>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    pub fn from_geometry(geometry: &Geometry) -> Self {
        match *geometry {
            Geometry::Box {
                width,
                height,
                depth,
            } => Self::cuboid(Vec3::new(width, height, depth)),
            Geometry::Plane { width, height } => Self::plane(width, height),
            Geometry::Sphere {
                radius,
                segments,
                rings,
            } => Self::sphere(radius, segments, rings),
        }
    }

    /// Box centered at the origin with the given full extents.
    ///
    /// Each face has its own four vertices so normals stay flat.
    pub fn cuboid(size: Vec3) -> Self {
        // (normal, u axis, v axis); u × v == normal keeps the winding CCW.
        const FACES: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
            ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
            ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
            ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
            ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
            ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
            ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
        ];
        let half = size * 0.5;

        let mut vertices = Vec::with_capacity(24);
        let mut indices = Vec::with_capacity(36);
        for (normal, u, v) in FACES {
            let (n, u, v) = (Vec3::from(normal), Vec3::from(u), Vec3::from(v));
            let base = vertices.len() as u32;
            for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
                let position = (n + u * su + v * sv) * half;
                let uv = [(su + 1.0) * 0.5, (1.0 - sv) * 0.5];
                vertices.push(Vertex3d::new(position.into(), normal, uv));
            }
            indices.extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
        }
        Self::new(vertices, indices)
    }

    /// Rectangle in the XY plane facing +Z.
    pub fn plane(width: f32, height: f32) -> Self {
        let (hw, hh) = (width * 0.5, height * 0.5);
        let normal = [0.0, 0.0, 1.0];
        let vertices = vec![
            Vertex3d::new([-hw, -hh, 0.0], normal, [0.0, 1.0]),
            Vertex3d::new([hw, -hh, 0.0], normal, [1.0, 1.0]),
            Vertex3d::new([hw, hh, 0.0], normal, [1.0, 0.0]),
            Vertex3d::new([-hw, hh, 0.0], normal, [0.0, 0.0]),
        ];
        Self::new(vertices, vec![0, 1, 2, 2, 3, 0])
    }

    /// Latitude/longitude sphere centered at the origin.
    pub fn sphere(radius: f32, segments: u32, rings: u32) -> Self {
        let segments = segments.max(3);
        let rings = rings.max(2);

        let mut vertices = Vec::with_capacity(((segments + 1) * (rings + 1)) as usize);
        for ring in 0..=rings {
            let phi = PI * ring as f32 / rings as f32;
            for seg in 0..=segments {
                let theta = TAU * seg as f32 / segments as f32;
                let normal = Vec3::new(phi.sin() * theta.cos(), phi.cos(), phi.sin() * theta.sin());
                vertices.push(Vertex3d::new(
                    (normal * radius).into(),
                    normal.into(),
                    [seg as f32 / segments as f32, ring as f32 / rings as f32],
                ));
            }
        }

        let mut indices = Vec::with_capacity((segments * rings * 6) as usize);
        for ring in 0..rings {
            for seg in 0..segments {
                let current = ring * (segments + 1) + seg;
                let below = current + segments + 1;
                indices.extend_from_slice(&[
                    current,
                    current + 1,
                    below,
                    current + 1,
                    below + 1,
                    below,
                ]);
            }
        }
        Self::new(vertices, indices)
    }

    /// Axis-aligned `(min, max)` corners.
    pub fn bounds(&self) -> (Vec3, Vec3) {
        self.vertices.iter().fold(
            (Vec3::splat(f32::INFINITY), Vec3::splat(f32::NEG_INFINITY)),
            |(min, max), v| {
                let p = Vec3::from(v.position);
                (min.min(p), max.max(p))
            },
        )
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn upload(&self, gpu: &GpuContext) -> Mesh {
        Mesh::new(gpu, &self.vertices, &self.indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every non-degenerate triangle's face normal agrees with its vertex normals.
    fn assert_outward(raw: &RawGeometry) {
        for tri in raw.indices.chunks(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| raw.vertices[i as usize]);
            let (pa, pb, pc) = (
                Vec3::from(a.position),
                Vec3::from(b.position),
                Vec3::from(c.position),
            );
            let face = (pb - pa).cross(pc - pa);
            if face.length_squared() < 1e-10 {
                continue;
            }
            let normal = Vec3::from(a.normal) + Vec3::from(b.normal) + Vec3::from(c.normal);
            assert!(face.dot(normal) > 0.0, "triangle {tri:?} winds inward");
        }
    }

    #[test]
    fn box_matches_requested_extents() {
        let raw = RawGeometry::from_geometry(&Geometry::cuboid(2.0, 0.5, 1.0));
        let (min, max) = raw.bounds();
        assert_eq!(min, Vec3::new(-1.0, -0.25, -0.5));
        assert_eq!(max, Vec3::new(1.0, 0.25, 0.5));
        assert_eq!(raw.vertices.len(), 24);
        assert_eq!(raw.triangle_count(), 12);
        assert_outward(&raw);
    }

    #[test]
    fn plane_faces_positive_z() {
        let raw = RawGeometry::from_geometry(&Geometry::plane(4.0, 2.0));
        assert_eq!(raw.bounds(), (Vec3::new(-2.0, -1.0, 0.0), Vec3::new(2.0, 1.0, 0.0)));
        assert!(raw.vertices.iter().all(|v| v.normal == [0.0, 0.0, 1.0]));
        assert_outward(&raw);
    }

    #[test]
    fn sphere_vertices_sit_on_the_radius() {
        let raw = RawGeometry::from_geometry(&Geometry::sphere(0.08, 16, 12));
        assert_eq!(raw.vertices.len(), 17 * 13);
        assert_eq!(raw.triangle_count(), 16 * 12 * 2);
        for v in &raw.vertices {
            assert!((Vec3::from(v.position).length() - 0.08).abs() < 1e-5);
        }
        assert_outward(&raw);
    }

    #[test]
    fn sphere_tessellation_has_a_floor() {
        let raw = RawGeometry::sphere(1.0, 0, 0);
        assert_eq!(raw.triangle_count(), 3 * 2 * 2);
    }
}
