use crate::core::base::*;
use crate::core::bound::IdAllocator;
use crate::core::error::PmError;
use crate::core::geometry::ray::Ray;
use crate::core::intersection::Intersection;
use crate::core::light::Light;
use crate::core::material::Material;
use crate::core::primitive::Primitive;
use crate::core::spectrum::Spectrum;

use crate::lights::{AreaLight, PointLight};
use crate::materials::{EmissiveMaterial, GlossyMaterial, MatteMaterial, SpecularMaterial};
use crate::shapes::{MeshData, PolygonModel, Sphere};

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Flat candidate set. Intentionally *not* an acceleration structure: rays
/// are tested against every admitted primitive and merged through one
/// shared accumulator, which is all the intersection protocol requires.
#[derive(Default)]
pub struct Scene {
    pub primitives: Vec<Box<dyn Primitive>>,
    pub lights: Vec<Box<dyn Light>>,
}

impl Scene {
    pub fn new() -> Self {
        Scene {
            primitives: Vec::new(),
            lights: Vec::new(),
        }
    }

    pub fn intersect<'a>(&'a self, ray: &Ray, isect: &mut Intersection<'a>) {
        for primitive in &self.primitives {
            if primitive.admits(ray) {
                primitive.intersect(ray, isect);
            }
        }
    }

    /// Any-hit query bounded by `t_max`.
    pub fn intersect_p(&self, ray: &Ray, t_max: Float) -> bool {
        let mut isect = Intersection::with_bound(ray, t_max);
        self.intersect(ray, &mut isect);
        return isect.is_hit();
    }
}

fn vec3(a: &[Float; 3]) -> Vector3f {
    return Vector3f::new(a[0], a[1], a[2]);
}

fn spectrum(a: &[Float; 3]) -> Spectrum {
    return Spectrum::new(a[0], a[1], a[2]);
}

fn default_eta() -> Float {
    1.5
}

fn default_sharpness() -> Float {
    crate::materials::DEFAULT_SHARPNESS
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MaterialDesc {
    Emissive {
        radiance: [Float; 3],
    },
    Matte {
        kd: [Float; 3],
    },
    Glossy {
        kd: [Float; 3],
        ks: [Float; 3],
        exponent: Float,
    },
    Specular {
        kr: [Float; 3],
        #[serde(default)]
        kt: [Float; 3],
        #[serde(default = "default_eta")]
        eta: Float,
        #[serde(default = "default_sharpness")]
        sharpness: Float,
    },
}

impl MaterialDesc {
    pub fn build(&self) -> Box<dyn Material> {
        match self {
            MaterialDesc::Emissive { radiance } => {
                return Box::new(EmissiveMaterial::new(&spectrum(radiance)));
            }
            MaterialDesc::Matte { kd } => {
                return Box::new(MatteMaterial::new(&spectrum(kd)));
            }
            MaterialDesc::Glossy { kd, ks, exponent } => {
                return Box::new(GlossyMaterial::new(&spectrum(kd), &spectrum(ks), *exponent));
            }
            MaterialDesc::Specular {
                kr,
                kt,
                eta,
                sharpness,
            } => {
                return Box::new(SpecularMaterial::new(
                    &spectrum(kr),
                    &spectrum(kt),
                    *eta,
                    *sharpness,
                ));
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PrimitiveDesc {
    Sphere {
        center: [Float; 3],
        radius: Float,
        material: MaterialDesc,
    },
    Mesh {
        positions: Vec<[Float; 3]>,
        #[serde(default)]
        normals: Vec<[Float; 3]>,
        triangles: Vec<[u32; 3]>,
        #[serde(default)]
        smooth: bool,
        material: MaterialDesc,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LightDesc {
    Point {
        position: [Float; 3],
        power: [Float; 3],
    },
    Area {
        center: [Float; 3],
        normal: [Float; 3],
        radius: Float,
        power: [Float; 3],
    },
}

/// Serializable scene description consumed by the demonstration driver.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SceneDesc {
    #[serde(default)]
    pub primitives: Vec<PrimitiveDesc>,
    #[serde(default)]
    pub lights: Vec<LightDesc>,
}

impl SceneDesc {
    pub fn load(path: &Path) -> Result<SceneDesc, PmError> {
        let text = std::fs::read_to_string(path)?;
        let desc: SceneDesc = serde_json::from_str(&text)?;
        return Ok(desc);
    }

    pub fn build(&self, ids: &IdAllocator) -> Result<Scene, PmError> {
        let mut scene = Scene::new();
        for desc in &self.primitives {
            match desc {
                PrimitiveDesc::Sphere {
                    center,
                    radius,
                    material,
                } => {
                    scene.primitives.push(Box::new(Sphere::new(
                        ids,
                        &vec3(center),
                        *radius,
                        material.build(),
                    )));
                }
                PrimitiveDesc::Mesh {
                    positions,
                    normals,
                    triangles,
                    smooth,
                    material,
                } => {
                    let mesh = MeshData::new(
                        positions.iter().map(vec3).collect(),
                        normals.iter().map(vec3).collect(),
                        triangles.clone(),
                        *smooth,
                    );
                    scene
                        .primitives
                        .push(Box::new(PolygonModel::new(ids, mesh, material.build())?));
                }
            }
        }
        for desc in &self.lights {
            match desc {
                LightDesc::Point { position, power } => {
                    scene
                        .lights
                        .push(Box::new(PointLight::new(&vec3(position), &spectrum(power))));
                }
                LightDesc::Area {
                    center,
                    normal,
                    radius,
                    power,
                } => {
                    scene.lights.push(Box::new(AreaLight::new(
                        &vec3(center),
                        &vec3(normal),
                        *radius,
                        &spectrum(power),
                    )));
                }
            }
        }
        return Ok(scene);
    }
}
