use crate::core::prelude::*;
use crate::shapes::polygon::{MeshData, Polygon};

use std::sync::Arc;

/// Triangle mesh primitive. Intersection iterates the triangles in brute
/// force, accepting a supporting-plane hit as inside a triangle when the
/// three sub-triangle areas around the hit point sum to the triangle's own
/// area within `AREA_TOLERANCE`, in place of exact barycentric rejection
/// on models whose triangles may be poorly shaped.
///
/// With `smooth_surface` set on the mesh, triangle hits are reported under
/// the model's own identity (facing bit preserved), so the whole mesh acts
/// as one logical surface.
pub struct PolygonModel {
    bound: BoundingSphere,
    mesh: Arc<MeshData>,
    polygons: Vec<Polygon>,
    material: Box<dyn Material>,
}

impl PolygonModel {
    pub fn new(
        ids: &IdAllocator,
        mesh: MeshData,
        material: Box<dyn Material>,
    ) -> Result<Self, PmError> {
        let (mesh, polygons) = Self::build_polygons(ids, mesh, material.as_ref())?;
        let (center, radius) = bounding_values(&mesh);
        let bound = BoundingSphere::new(ids, &center, radius);
        return Ok(PolygonModel {
            bound,
            mesh,
            polygons,
            material,
        });
    }

    /// Replace the geometry; the model keeps its identity but its bounding
    /// sphere is recomputed from the new vertices.
    pub fn set_geometry(&mut self, ids: &IdAllocator, mesh: MeshData) -> Result<(), PmError> {
        let (mesh, polygons) = Self::build_polygons(ids, mesh, self.material.as_ref())?;
        let (center, radius) = bounding_values(&mesh);
        self.bound.center = center;
        self.bound.radius = radius;
        self.mesh = mesh;
        self.polygons = polygons;
        return Ok(());
    }

    fn build_polygons(
        ids: &IdAllocator,
        mut mesh: MeshData,
        material: &dyn Material,
    ) -> Result<(Arc<MeshData>, Vec<Polygon>), PmError> {
        if mesh.positions.is_empty() || mesh.triangles.is_empty() {
            return Err(PmError::error("polygon model needs vertices and triangles"));
        }
        let n_vertices = mesh.positions.len() as u32;
        for v in &mesh.triangles {
            if v.iter().any(|i| *i >= n_vertices) {
                let msg = format!("triangle index out of range (vertices: {})", n_vertices);
                return Err(PmError::error(&msg));
            }
        }
        if mesh.normals.is_empty() {
            mesh.compute_vertex_normals();
        } else if mesh.normals.len() != mesh.positions.len() {
            return Err(PmError::error("vertex normal count must match positions"));
        }

        let mesh = Arc::new(mesh);
        let polygons: Vec<Polygon> = mesh
            .triangles
            .iter()
            .map(|v| Polygon::new(ids, &mesh, v, material.clone_box()))
            .collect();
        return Ok((mesh, polygons));
    }

    #[inline]
    pub fn item_id(&self) -> u64 {
        return self.bound.item_id();
    }

    pub fn polygons(&self) -> &[Polygon] {
        return &self.polygons;
    }

    pub fn mesh(&self) -> &MeshData {
        return self.mesh.as_ref();
    }
}

/// Centroid of the vertices plus the largest vertex distance.
fn bounding_values(mesh: &MeshData) -> (Point3f, Float) {
    let n = mesh.positions.len() as Float;
    let mut center = Point3f::ZERO;
    for p in &mesh.positions {
        center += *p;
    }
    center /= n;
    let mut radius: Float = 0.0;
    for p in &mesh.positions {
        radius = Float::max(radius, center.distance(*p));
    }
    return (center, radius);
}

impl Bounded for PolygonModel {
    fn bound(&self) -> &BoundingSphere {
        return &self.bound;
    }
}

impl Primitive for PolygonModel {
    fn material(&self) -> &dyn Material {
        return self.material.as_ref();
    }

    fn intersect<'a>(&'a self, ray: &Ray, isect: &mut Intersection<'a>) {
        for polygon in &self.polygons {
            let (p0, p1, p2) = polygon.positions();
            let e1 = p1 - p0;
            let e2 = p2 - p0;
            let cross = e1.cross(e2);
            let full_area = 0.5 * cross.length();
            if full_area <= 0.0 {
                // Point or needle triangle; nothing to hit.
                continue;
            }

            let plane = Plane::new(&p0, &cross);
            let t = match plane.intersect_ray(ray) {
                Some(t) => t,
                None => continue,
            };
            if t >= isect.distance {
                continue;
            }

            // Area-coherence inside test: the three wedge areas around the
            // hit point reproduce the triangle area only for interior points.
            let p = ray.position(t);
            let a0 = 0.5 * (p1 - p).cross(p2 - p).length();
            let a1 = 0.5 * (p2 - p).cross(p0 - p).length();
            let a2 = 0.5 * (p0 - p).cross(p1 - p).length();
            let sum = a0 + a1 + a2;
            if Float::abs(sum - full_area) > AREA_TOLERANCE * full_area {
                continue;
            }

            // Area coordinates double as barycentric weights for shading.
            let b1 = a1 / sum;
            let b2 = a2 / sum;
            let n = polygon.shading_normal(b1, b2);
            let front = n.dot(ray.d) < 0.0;
            let id = if self.mesh.smooth_surface {
                self.bound.face_id(front)
            } else {
                polygon.bound().face_id(front)
            };
            isect.record(t, &n, id, polygon);
        }
    }
}
