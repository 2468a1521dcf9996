//! Bone mesh generation
//!
//! Builds the nine-point tapered bone polyhedron and the CPU-side buffers a
//! renderer consumes: triangle positions with flat normals, and a line list
//! for the wireframe.
//!
//! # Topology
//! Point 0 is the proximal apex. Points 1-4 form the base rectangle and
//! points 5-8 the tapered distal rectangle, which sits at
//! `x = effective_length`.
//!
//! Four triangles join the apex to the base, four quads join the base to the
//! distal rectangle and one quad caps the distal end. Every face winds
//! counter-clockwise seen from outside. The tables below never change.

use super::parameters::{effective_length, ShapeParameters};
use crate::foundation::math::{transform_affine, Mat4, Mat4Ext, Point3, Vec3};

/// Number of points in the bone polyhedron
pub const VERTEX_COUNT: usize = 9;

/// Number of faces in the bone polyhedron
pub const FACE_COUNT: usize = 9;

/// Vertices per face, in face order
pub static POLYGON_COUNTS: [usize; FACE_COUNT] = [3, 3, 3, 3, 4, 4, 4, 4, 4];

/// Face vertex indices, concatenated in face order
pub static POLYGON_CONNECTS: [usize; 32] = [
    0, 1, 2, //
    0, 2, 3, //
    0, 4, 1, //
    0, 3, 4, //
    2, 1, 5, 6, //
    3, 2, 6, 7, //
    1, 4, 8, 5, //
    4, 3, 7, 8, //
    6, 5, 8, 7, //
];

/// Unique edges of the polyhedron
pub static EDGES: [[usize; 2]; 16] = [
    [0, 1], [1, 2], [0, 2], [2, 3],
    [0, 3], [0, 4], [1, 4], [3, 4],
    [1, 5], [5, 6], [2, 6], [6, 7],
    [3, 7], [4, 8], [5, 8], [7, 8],
];

/// Triangles after fan-triangulating every face
pub const TRIANGLE_COUNT: usize = 14;

/// Corners of the unit rectangle at local `x = 0.5`, in point order 1-4 / 5-8
const UNIT_RECTANGLE: [[f64; 3]; 4] = [
    [0.5, -0.5, 0.5],
    [0.5, 0.5, 0.5],
    [0.5, 0.5, -0.5],
    [0.5, -0.5, -0.5],
];

/// The nine transformed points of one bone
#[derive(Debug, Clone, PartialEq)]
pub struct BoneMesh {
    /// Points in object-matrix space
    pub points: [Point3; VERTEX_COUNT],
}

impl BoneMesh {
    /// Iterate over faces as slices into [`POLYGON_CONNECTS`]
    pub fn faces() -> impl Iterator<Item = &'static [usize]> {
        POLYGON_COUNTS.iter().scan(0, |offset, &count| {
            let face = &POLYGON_CONNECTS[*offset..*offset + count];
            *offset += count;
            Some(face)
        })
    }

    /// Flat normal of a face using Newell's method
    ///
    /// Collapsed faces (zero area) get a zero normal instead of NaN.
    pub fn face_normal(&self, face: &[usize]) -> Vec3 {
        let mut normal = Vec3::zeros();
        for (i, &index) in face.iter().enumerate() {
            let current = self.points[index];
            let next = self.points[face[(i + 1) % face.len()]];
            normal.x += (current.y - next.y) * (current.z + next.z);
            normal.y += (current.z - next.z) * (current.x + next.x);
            normal.z += (current.x - next.x) * (current.y + next.y);
        }
        normal.try_normalize(f64::EPSILON).unwrap_or_else(Vec3::zeros)
    }

    /// Triangle positions and per-vertex normals
    ///
    /// Quads are split as a fan from their first vertex; every vertex of a
    /// triangle carries its face's normal.
    pub fn triangulate(&self) -> (Vec<Point3>, Vec<Vec3>) {
        let mut triangles = Vec::with_capacity(TRIANGLE_COUNT * 3);
        let mut normals = Vec::with_capacity(TRIANGLE_COUNT * 3);

        for face in Self::faces() {
            let normal = self.face_normal(face);
            for i in 1..face.len() - 1 {
                for index in [face[0], face[i], face[i + 1]] {
                    triangles.push(self.points[index]);
                    normals.push(normal);
                }
            }
        }

        (triangles, normals)
    }

    /// Line list with two points per edge
    pub fn lines(&self) -> Vec<Point3> {
        EDGES
            .iter()
            .flat_map(|&[a, b]| [self.points[a], self.points[b]])
            .collect()
    }
}

/// Buffers handed to the renderer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderBuffers {
    /// Triangle list positions, three per triangle
    pub triangles: Vec<Point3>,
    /// Normal per triangle-list position
    pub normals: Vec<Vec3>,
    /// Line list positions, two per edge
    pub lines: Vec<Point3>,
}

impl RenderBuffers {
    /// Number of triangles
    pub fn triangle_count(&self) -> usize {
        self.triangles.len() / 3
    }

    /// Number of line segments
    pub fn line_count(&self) -> usize {
        self.lines.len() / 2
    }
}

/// Bone mesh construction
pub struct MeshBuilder;

impl MeshBuilder {
    /// Compute the nine points for a parameter set
    ///
    /// The base rectangle is the unit rectangle scaled by
    /// `(width, height, width)`; the distal one is scaled by
    /// `(2 * effective_length, 1 - taper, 1 - taper)`. Both are then taken
    /// through the object matrix, as is the apex at the origin.
    pub fn build_points(
        width: f64,
        height: f64,
        length: f64,
        taper: f64,
        object_matrix: &Mat4,
    ) -> BoneMesh {
        let length = effective_length(width, height, length);

        let base = object_matrix * Mat4::scale_matrix(&Vec3::new(width, height, width));
        let distal_scale = Vec3::new(length * 2.0, 1.0 - taper, 1.0 - taper);
        let distal = object_matrix * Mat4::scale_matrix(&distal_scale);

        let mut points = [Point3::origin(); VERTEX_COUNT];
        points[0] = transform_affine(object_matrix, &Point3::origin());
        for (i, corner) in UNIT_RECTANGLE.iter().enumerate() {
            let corner = Point3::from(*corner);
            points[1 + i] = transform_affine(&base, &corner);
            points[5 + i] = transform_affine(&distal, &corner);
        }

        BoneMesh { points }
    }

    /// Compute the points for a parameter store
    pub fn build_mesh(params: &ShapeParameters, object_matrix: &Mat4) -> BoneMesh {
        Self::build_points(params.width, params.height, params.length, params.taper, object_matrix)
    }

    /// Build the triangle and line buffers for a parameter store
    ///
    /// Fin groups are not consulted.
    pub fn build(params: &ShapeParameters, object_matrix: &Mat4) -> RenderBuffers {
        let mesh = Self::build_mesh(params, object_matrix);
        let (triangles, normals) = mesh.triangulate();
        let lines = mesh.lines();

        log::trace!(
            "Built bone mesh: {} triangles, {} lines",
            triangles.len() / 3,
            lines.len() / 2
        );

        RenderBuffers { triangles, normals, lines }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::constants::PI;
    use approx::{assert_relative_eq, relative_eq};
    use std::collections::HashSet;

    const EPSILON: f64 = 1e-9;

    fn default_mesh() -> BoneMesh {
        MeshBuilder::build_mesh(&ShapeParameters::new(), &Mat4::identity())
    }

    #[test]
    fn test_topology_tables_are_consistent() {
        assert_eq!(POLYGON_COUNTS.iter().sum::<usize>(), POLYGON_CONNECTS.len());
        assert_eq!(BoneMesh::faces().count(), FACE_COUNT);

        let triangles: usize = POLYGON_COUNTS.iter().map(|count| count - 2).sum();
        assert_eq!(triangles, TRIANGLE_COUNT);

        // Every face edge appears in EDGES, and every edge borders exactly two faces
        let edge_set: HashSet<(usize, usize)> =
            EDGES.iter().map(|&[a, b]| (a.min(b), a.max(b))).collect();
        assert_eq!(edge_set.len(), EDGES.len());

        let mut uses = std::collections::HashMap::new();
        for face in BoneMesh::faces() {
            for i in 0..face.len() {
                let (a, b) = (face[i], face[(i + 1) % face.len()]);
                let key = (a.min(b), a.max(b));
                assert!(edge_set.contains(&key), "Edge {:?} missing from EDGES", key);
                *uses.entry(key).or_insert(0) += 1;
            }
        }
        assert!(uses.values().all(|&count| count == 2));

        // Euler characteristic of a closed polyhedron
        assert_eq!(VERTEX_COUNT as i64 - EDGES.len() as i64 + FACE_COUNT as i64, 2);
    }

    #[test]
    fn test_default_point_positions() {
        let mesh = default_mesh();

        assert_eq!(mesh.points[0], Point3::origin());
        assert_relative_eq!(mesh.points[1], Point3::new(0.5, -0.5, 0.5), epsilon = EPSILON);
        assert_relative_eq!(mesh.points[3], Point3::new(0.5, 0.5, -0.5), epsilon = EPSILON);
        // Distal rectangle at x = effective length, half extent (1 - 0.9) / 2
        assert_relative_eq!(mesh.points[5], Point3::new(1.0, -0.05, 0.05), epsilon = EPSILON);
        assert_relative_eq!(mesh.points[7], Point3::new(1.0, 0.05, -0.05), epsilon = EPSILON);
    }

    #[test]
    fn test_effective_length_moves_distal_rectangle() {
        let mesh = MeshBuilder::build_points(2.0, 5.0, 1.0, 0.5, &Mat4::identity());

        for point in &mesh.points[5..] {
            assert_relative_eq!(point.x, 5.0, epsilon = EPSILON);
        }
        assert_relative_eq!(mesh.points[1], Point3::new(1.0, -2.5, 1.0), epsilon = EPSILON);
    }

    #[test]
    fn test_buffer_sizes_are_fixed() {
        let inputs = [
            (1.0, 1.0, 1.0, 0.9),
            (3.0, 0.5, 10.0, 0.0),
            (0.0, 2.0, 1.0, 1.0),
            (4.0, 4.0, 0.1, 0.3),
        ];

        for (width, height, length, taper) in inputs {
            let params = ShapeParameters::new().with_size(width, height, length, taper);
            let buffers = MeshBuilder::build(&params, &Mat4::identity());

            assert_eq!(buffers.triangle_count(), TRIANGLE_COUNT);
            assert_eq!(buffers.triangles.len(), TRIANGLE_COUNT * 3);
            assert_eq!(buffers.normals.len(), buffers.triangles.len());
            assert_eq!(buffers.line_count(), EDGES.len());
        }
    }

    #[test]
    fn test_full_taper_collapses_distal_rectangle() {
        let params = ShapeParameters::new().with_size(1.0, 2.0, 3.0, 1.0);
        let mesh = MeshBuilder::build_mesh(&params, &Mat4::identity());

        for point in &mesh.points[6..] {
            assert_relative_eq!(*point, mesh.points[5], epsilon = EPSILON);
        }
        for i in 1..5 {
            for j in (i + 1)..5 {
                assert!(!relative_eq!(mesh.points[i], mesh.points[j], epsilon = EPSILON));
            }
        }
    }

    #[test]
    fn test_zero_taper_is_uniform_prism_end() {
        let mesh = MeshBuilder::build_points(1.0, 1.0, 2.0, 0.0, &Mat4::identity());

        assert_relative_eq!(mesh.points[6], Point3::new(2.0, 0.5, 0.5), epsilon = EPSILON);
        assert_relative_eq!(mesh.points[8], Point3::new(2.0, -0.5, -0.5), epsilon = EPSILON);
    }

    #[test]
    fn test_degenerate_sizes_do_not_produce_nan() {
        let params = ShapeParameters::new().with_size(0.0, 0.0, 0.0, 1.0);
        let buffers = MeshBuilder::build(&params, &Mat4::identity());

        assert!(buffers.triangles.iter().all(|p| p.iter().all(|c| c.is_finite())));
        assert!(buffers.normals.iter().all(|n| n.iter().all(|c| c.is_finite())));
    }

    #[test]
    fn test_faces_wind_outward() {
        let mesh = MeshBuilder::build_points(1.0, 1.5, 3.0, 0.4, &Mat4::identity());
        let centroid =
            mesh.points.iter().fold(Vec3::zeros(), |acc, p| acc + p.coords) / VERTEX_COUNT as f64;

        for face in BoneMesh::faces() {
            let center = face
                .iter()
                .fold(Vec3::zeros(), |acc, &i| acc + mesh.points[i].coords)
                / face.len() as f64;
            let outward = center - centroid;
            assert!(
                mesh.face_normal(face).dot(&outward) > 0.0,
                "Face {:?} winds inward",
                face
            );
        }
    }

    #[test]
    fn test_object_matrix_applies_to_every_point() {
        let params = ShapeParameters::new().with_transform(
            Vec3::new(5.0, 0.0, 0.0),
            Vec3::new(0.0, PI, 0.0),
            Vec3::new(1.0, 1.0, 1.0),
        );
        let matrix = params.current_object_matrix();
        let moved = MeshBuilder::build_mesh(&params, &matrix);
        let local = default_mesh();

        for (moved, local) in moved.points.iter().zip(local.points.iter()) {
            assert_relative_eq!(*moved, transform_affine(&matrix, local), epsilon = EPSILON);
        }
        assert_relative_eq!(moved.points[0], Point3::new(5.0, 0.0, 0.0), epsilon = EPSILON);
    }

    #[test]
    fn test_fins_do_not_change_geometry() {
        let plain = ShapeParameters::new();
        let mut finned = plain.clone();
        finned.side_fins.enabled = true;
        finned.front_fin.enabled = true;
        finned.back_fin.enabled = true;
        finned.back_fin.size = 4.0;

        assert_eq!(
            MeshBuilder::build(&plain, &Mat4::identity()),
            MeshBuilder::build(&finned, &Mat4::identity())
        );
    }
}
