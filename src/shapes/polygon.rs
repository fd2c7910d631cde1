use crate::core::prelude::*;

use log::warn;
use std::sync::Arc;

/// Vertex/normal/index storage shared by a model and its triangles. The
/// shared handle doubles as each triangle's back reference to its parent
/// model's surface-smoothing policy.
#[derive(Debug, Clone)]
pub struct MeshData {
    pub positions: Vec<Point3f>,
    pub normals: Vec<Normal3f>,
    pub triangles: Vec<[u32; 3]>,
    /// The mesh is one smooth, one-sided logical surface; triangle hits are
    /// then reported under the owning model's identity.
    pub smooth_surface: bool,
}

impl MeshData {
    pub fn new(
        positions: Vec<Point3f>,
        normals: Vec<Normal3f>,
        triangles: Vec<[u32; 3]>,
        smooth_surface: bool,
    ) -> Self {
        MeshData {
            positions,
            normals,
            triangles,
            smooth_surface,
        }
    }

    #[inline]
    pub fn triangle_positions(&self, v: &[u32; 3]) -> (Point3f, Point3f, Point3f) {
        return (
            self.positions[v[0] as usize],
            self.positions[v[1] as usize],
            self.positions[v[2] as usize],
        );
    }

    /// Area-weighted vertex normals accumulated from the faces. Triangles
    /// with a zero-length edge cross product (points, needles) contribute
    /// nothing and are skipped.
    pub fn compute_vertex_normals(&mut self) {
        let mut acc = vec![Vector3f::ZERO; self.positions.len()];
        let mut skipped = 0usize;
        for v in &self.triangles {
            let (p0, p1, p2) = self.triangle_positions(v);
            let n = (p1 - p0).cross(p2 - p0);
            if n.length_squared() <= 0.0 {
                skipped += 1;
                continue;
            }
            acc[v[0] as usize] += n;
            acc[v[1] as usize] += n;
            acc[v[2] as usize] += n;
        }
        if skipped > 0 {
            warn!(
                "skipped {} degenerate triangles while accumulating vertex normals",
                skipped
            );
        }
        self.normals = acc.iter().map(|n| n.normalize_or_zero()).collect();
    }
}

/// A single triangle with per-vertex normals. Standalone it is a primitive
/// in its own right; inside a `PolygonModel` the model drives the
/// intersection and the triangle supplies geometry and shading data.
#[derive(Clone)]
pub struct Polygon {
    bound: BoundingSphere,
    mesh: Arc<MeshData>,
    v: [u32; 3],
    material: Box<dyn Material>,
}

impl Polygon {
    pub fn new(
        ids: &IdAllocator,
        mesh: &Arc<MeshData>,
        v: &[u32; 3],
        material: Box<dyn Material>,
    ) -> Self {
        let (p0, p1, p2) = mesh.triangle_positions(v);
        let (center, radius) = circumscribe(&p0, &p1, &p2);
        Polygon {
            bound: BoundingSphere::new(ids, &center, radius),
            mesh: Arc::clone(mesh),
            v: *v,
            material,
        }
    }

    /// Free-standing triangle with its own single-triangle mesh.
    pub fn standalone(
        ids: &IdAllocator,
        positions: [Point3f; 3],
        normals: [Normal3f; 3],
        material: Box<dyn Material>,
    ) -> Self {
        let mesh = Arc::new(MeshData::new(
            positions.to_vec(),
            normals.to_vec(),
            vec![[0, 1, 2]],
            false,
        ));
        return Polygon::new(ids, &mesh, &[0, 1, 2], material);
    }

    #[inline]
    pub fn item_id(&self) -> u64 {
        return self.bound.item_id();
    }

    #[inline]
    pub fn positions(&self) -> (Point3f, Point3f, Point3f) {
        return self.mesh.triangle_positions(&self.v);
    }

    pub fn vertex_normals(&self) -> (Normal3f, Normal3f, Normal3f) {
        return (
            self.mesh.normals[self.v[0] as usize],
            self.mesh.normals[self.v[1] as usize],
            self.mesh.normals[self.v[2] as usize],
        );
    }

    pub fn area(&self) -> Float {
        let (p0, p1, p2) = self.positions();
        return 0.5 * (p1 - p0).cross(p2 - p0).length();
    }

    /// Barycentric normal interpolation, falling back to the face normal
    /// when the vertex normals cancel out.
    pub fn shading_normal(&self, b1: Float, b2: Float) -> Normal3f {
        let (n0, n1, n2) = self.vertex_normals();
        let n = n0 * (1.0 - b1 - b2) + n1 * b1 + n2 * b2;
        if n.length_squared() > 0.0 {
            return n.normalize();
        }
        let (p0, p1, p2) = self.positions();
        return (p1 - p0).cross(p2 - p0).normalize_or_zero();
    }
}

fn circumscribe(p0: &Point3f, p1: &Point3f, p2: &Point3f) -> (Point3f, Float) {
    let center = (*p0 + *p1 + *p2) / 3.0;
    let radius = Float::max(
        center.distance(*p0),
        Float::max(center.distance(*p1), center.distance(*p2)),
    );
    return (center, radius);
}

impl Bounded for Polygon {
    fn bound(&self) -> &BoundingSphere {
        return &self.bound;
    }
}

impl Primitive for Polygon {
    fn material(&self) -> &dyn Material {
        return self.material.as_ref();
    }

    fn intersect<'a>(&'a self, ray: &Ray, isect: &mut Intersection<'a>) {
        let (p0, p1, p2) = self.positions();
        let e1 = p1 - p0;
        let e2 = p2 - p0;
        let s1 = ray.d.cross(e2);
        let divisor = s1.dot(e1);
        if divisor == 0.0 {
            // Ray parallel to the triangle plane.
            return;
        }
        let inv_divisor = 1.0 / divisor;

        let s = ray.o - p0;
        let b1 = s.dot(s1) * inv_divisor;
        if !(0.0..=1.0).contains(&b1) {
            return;
        }

        let s2 = s.cross(e1);
        let b2 = ray.d.dot(s2) * inv_divisor;
        if b2 < 0.0 || b1 + b2 > 1.0 {
            return;
        }

        let t = e2.dot(s2) * inv_divisor;
        let n = self.shading_normal(b1, b2);
        let front = n.dot(ray.d) < 0.0;
        isect.record(t, &n, self.bound.face_id(front), self);
    }
}
