pub type Float = f32;

pub type Vector2f = glam::Vec2;
pub type Point2f = glam::Vec2;

pub type Vector3f = glam::Vec3;
pub type Point3f = glam::Vec3;
pub type Normal3f = glam::Vec3;
