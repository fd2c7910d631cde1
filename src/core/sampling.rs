use crate::core::base::*;

#[inline]
pub fn uniform_sample_sphere(u: &Point2f) -> Vector3f {
    let z = 1.0 - 2.0 * u[0];
    let r = Float::sqrt(Float::max(0.0, 1.0 - z * z));
    let phi = 2.0 * PI * u[1];
    return Vector3f::new(r * Float::cos(phi), r * Float::sin(phi), z);
}

#[inline]
pub fn uniform_sphere_pdf() -> Float {
    return INV_4_PI;
}

pub fn concentric_sample_disk(u: &Point2f) -> Point2f {
    // Map uniform random numbers to $[-1,1]^2$
    let u_offset = *u * 2.0 - Vector2f::new(1.0, 1.0);

    // Handle degeneracy at the origin
    if u_offset.x == 0.0 && u_offset.y == 0.0 {
        return Point2f::new(0.0, 0.0);
    }

    // Apply concentric mapping to point
    if Float::abs(u_offset.x) > Float::abs(u_offset.y) {
        let r = u_offset.x;
        let theta = PI_OVER_4 * (u_offset.y / u_offset.x);
        return Point2f::new(r * Float::cos(theta), r * Float::sin(theta));
    } else {
        let r = u_offset.y;
        let theta = PI_OVER_2 - PI_OVER_4 * (u_offset.x / u_offset.y);
        return Point2f::new(r * Float::cos(theta), r * Float::sin(theta));
    }
}

/// Cosine-weighted direction in the hemisphere around +z.
#[inline]
pub fn cosine_sample_hemisphere(u: &Point2f) -> Vector3f {
    let d = concentric_sample_disk(u);
    let z = Float::sqrt(Float::max(0.0, 1.0 - d.x * d.x - d.y * d.y));
    return Vector3f::new(d.x, d.y, z);
}

#[inline]
pub fn cosine_hemisphere_pdf(cos_theta: Float) -> Float {
    return cos_theta * INV_PI;
}

/// Right-handed orthonormal basis with `n` as the third axis.
pub fn coordinate_system(n: &Vector3f) -> (Vector3f, Vector3f) {
    let t = if Float::abs(n.x) > Float::abs(n.y) {
        Vector3f::new(-n.z, 0.0, n.x) / Float::sqrt(n.x * n.x + n.z * n.z)
    } else {
        Vector3f::new(0.0, n.z, -n.y) / Float::sqrt(n.y * n.y + n.z * n.z)
    };
    let b = n.cross(t);
    return (t, b);
}

/// Lift a direction expressed in a local +z-up frame into the frame whose
/// third axis is `n`.
#[inline]
pub fn from_local_frame(v: &Vector3f, n: &Vector3f) -> Vector3f {
    let (t, b) = coordinate_system(n);
    return t * v.x + b * v.y + *n * v.z;
}

/// Cosine-weighted direction in the hemisphere around an arbitrary normal.
#[inline]
pub fn cosine_sample_around(n: &Vector3f, u: &Point2f) -> Vector3f {
    let local = cosine_sample_hemisphere(u);
    return from_local_frame(&local, n).normalize();
}
