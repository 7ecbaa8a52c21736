//! Named renderer entities.
//!
//! Entities are built by translators and then moved into the container
//! that owns them. Cross references between entities are by name and are
//! resolved by the renderer, not by this crate.

use glam::{Mat4, Vec3};
use serde::Serialize;

use crate::param::ParamMap;
use crate::transform_sequence::TransformSequence;

/// An object that can live in a [`Container`](crate::Container).
pub trait Entity {
    /// Kind of entity, used in error messages and logs.
    const KIND: &'static str;

    /// Unique name within the owning container.
    fn name(&self) -> &str;
}

macro_rules! impl_entity {
    ($ty:ty, $kind:literal) => {
        impl Entity for $ty {
            const KIND: &'static str = $kind;

            fn name(&self) -> &str {
                &self.name
            }
        }
    };
}

/// Renderer light models.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LightModel {
    PointLight,
    SpotLight,
    DirectionalLight,
    SunLight,
}

impl LightModel {
    /// Renderer name of the model.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PointLight => "point_light",
            Self::SpotLight => "spot_light",
            Self::DirectionalLight => "directional_light",
            Self::SunLight => "sun_light",
        }
    }
}

/// Color space of a color entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorSpace {
    LinearRgb,
    Srgb,
}

impl ColorSpace {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LinearRgb => "linear_rgb",
            Self::Srgb => "srgb",
        }
    }
}

/// A light source.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Light {
    pub name: String,
    pub model: LightModel,
    pub params: ParamMap,
    /// World transform
    pub transform: Mat4,
}

impl Light {
    pub fn new(model: LightModel, name: impl Into<String>, params: ParamMap) -> Self {
        Self {
            name: name.into(),
            model,
            params,
            transform: Mat4::IDENTITY,
        }
    }

    pub fn set_transform(&mut self, transform: Mat4) {
        self.transform = transform;
    }
}

impl_entity!(Light, "light");

/// A constant RGB color.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ColorEntity {
    pub name: String,
    pub color_space: ColorSpace,
    pub values: Vec3,
}

impl ColorEntity {
    pub fn new(name: impl Into<String>, color_space: ColorSpace, values: Vec3) -> Self {
        Self {
            name: name.into(),
            color_space,
            values,
        }
    }
}

impl_entity!(ColorEntity, "color");

/// An image texture.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Texture {
    pub name: String,
    pub model: String,
    pub params: ParamMap,
}

impl Texture {
    pub fn new(model: impl Into<String>, name: impl Into<String>, params: ParamMap) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
            params,
        }
    }
}

impl_entity!(Texture, "texture");

/// A placement of a texture with its own sampling settings.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TextureInstance {
    pub name: String,
    /// Name of the instanced texture
    pub texture: String,
    pub params: ParamMap,
    pub transform: Mat4,
}

impl TextureInstance {
    pub fn new(
        name: impl Into<String>,
        params: ParamMap,
        texture: impl Into<String>,
        transform: Mat4,
    ) -> Self {
        Self {
            name: name.into(),
            texture: texture.into(),
            params,
            transform,
        }
    }
}

impl_entity!(TextureInstance, "texture instance");

/// Environment light distribution.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EnvironmentEdf {
    pub name: String,
    pub model: String,
    pub params: ParamMap,
    /// Orientation of the environment over the shutter interval
    pub transforms: TransformSequence,
}

impl EnvironmentEdf {
    pub fn new(model: impl Into<String>, name: impl Into<String>, params: ParamMap) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
            params,
            transforms: TransformSequence::new(),
        }
    }
}

impl_entity!(EnvironmentEdf, "environment EDF");

/// Shader evaluated for camera rays that escape the scene.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EnvironmentShader {
    pub name: String,
    pub model: String,
    pub params: ParamMap,
}

impl EnvironmentShader {
    pub fn new(model: impl Into<String>, name: impl Into<String>, params: ParamMap) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
            params,
        }
    }
}

impl_entity!(EnvironmentShader, "environment shader");

/// Binds an environment EDF and shader; a scene has one active environment.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Environment {
    pub name: String,
    pub params: ParamMap,
}

impl Environment {
    pub fn new(name: impl Into<String>, params: ParamMap) -> Self {
        Self {
            name: name.into(),
            params,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_light_model_names() {
        assert_eq!(LightModel::PointLight.as_str(), "point_light");
        assert_eq!(LightModel::SpotLight.as_str(), "spot_light");
        assert_eq!(LightModel::DirectionalLight.as_str(), "directional_light");
        assert_eq!(LightModel::SunLight.as_str(), "sun_light");
    }

    #[test]
    fn test_color_space_names() {
        assert_eq!(ColorSpace::LinearRgb.as_str(), "linear_rgb");
        assert_eq!(ColorSpace::Srgb.as_str(), "srgb");
    }

    #[test]
    fn test_light_starts_at_identity() {
        let mut light = Light::new(LightModel::PointLight, "Lamp", ParamMap::new());
        assert_eq!(light.transform, Mat4::IDENTITY);
        assert_eq!(light.name(), "Lamp");

        let m = Mat4::from_translation(Vec3::new(0.0, 3.0, 0.0));
        light.set_transform(m);
        assert_eq!(light.transform, m);
    }

    #[test]
    fn test_entity_kinds() {
        assert_eq!(Light::KIND, "light");
        assert_eq!(ColorEntity::KIND, "color");
        assert_eq!(EnvironmentEdf::KIND, "environment EDF");
    }
}
