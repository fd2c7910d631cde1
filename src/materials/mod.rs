pub mod emissive;
pub mod glossy;
pub mod matte;
pub mod specular;

pub use emissive::*;
pub use glossy::*;
pub use matte::*;
pub use specular::*;
