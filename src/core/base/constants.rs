use super::types::Float;

pub const PI: Float = std::f32::consts::PI;
pub const INV_PI: Float = std::f32::consts::FRAC_1_PI;
pub const INV_2_PI: Float = INV_PI * 0.5;
pub const INV_4_PI: Float = INV_PI * 0.25;
pub const PI_OVER_2: Float = PI / 2.0;
pub const PI_OVER_4: Float = PI / 4.0;

pub const ONE_MINUS_EPSILON: Float = 0.99999994;

/// Smallest accepted hit distance; intersections closer than this are
/// discarded so that a ray restarted from a surface does not immediately
/// re-hit the surface it left.
pub const DIST_EPSILON: Float = 1e-4;

/// Relative tolerance of the area-coherence inside test used by the
/// triangle-model intersector.
pub const AREA_TOLERANCE: Float = 1e-3;
