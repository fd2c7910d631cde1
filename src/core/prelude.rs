pub use super::base::*;
pub use super::bound::*;
pub use super::error::*;
pub use super::geometry::*;
pub use super::intersection::*;
pub use super::knn::*;
pub use super::light::*;
pub use super::material::*;
pub use super::misc::*;
pub use super::photon::*;
pub use super::primitive::*;
pub use super::rng::*;
pub use super::sampling::*;
pub use super::scene::*;
pub use super::spectrum::*;
