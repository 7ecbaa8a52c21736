//! World environment settings.
//!
//! The host selects an environment with `env_type`; for `sunsky` the sun
//! model replaces it as the effective type, so a Hosek sky exports as
//! `hosek_environment_edf`. `none` means the world is not exported.

use exporter_core::{Error, Result};
use glam::Vec3;
use serde::Deserialize;

use crate::texture::TextureRef;

/// Renderer sky settings of a host world.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct SkyDesc {
    pub env_type: String,
    /// Only read when `env_type` is `sunsky`
    pub sun_model: String,
    pub env_alpha: f32,
    pub env_tex: Option<TextureRef>,
    pub env_tex_mult: f32,
    pub env_exposure: f32,
    pub ground_albedo: f32,
    pub sun_phi: f32,
    pub sun_theta: f32,
    pub turbidity: f32,
    pub turbidity_multiplier: f32,
    pub luminance_multiplier: f32,
    pub luminance_gamma: f32,
    pub saturation_multiplier: f32,
    pub horizon_shift: f32,
    /// Degrees
    pub vertical_shift: f32,
    /// Degrees
    pub horizontal_shift: f32,
}

impl Default for SkyDesc {
    fn default() -> Self {
        Self {
            env_type: "none".to_owned(),
            sun_model: "hosek".to_owned(),
            env_alpha: 1.0,
            env_tex: None,
            env_tex_mult: 1.0,
            env_exposure: 0.0,
            ground_albedo: 0.3,
            sun_phi: 0.0,
            sun_theta: 0.0,
            turbidity: 1.0,
            turbidity_multiplier: 2.0,
            luminance_multiplier: 1.0,
            luminance_gamma: 1.0,
            saturation_multiplier: 1.0,
            horizon_shift: 0.0,
            vertical_shift: 0.0,
            horizontal_shift: 0.0,
        }
    }
}

/// A world datablock as stored by the host.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct WorldDesc {
    #[serde(default = "default_world_name")]
    pub name: String,
    #[serde(default)]
    pub horizon_color: Vec3,
    #[serde(default)]
    pub zenith_color: Vec3,
    #[serde(default)]
    pub appleseed_sky: SkyDesc,
}

fn default_world_name() -> String {
    "World".to_owned()
}

/// Physical sky models.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkyModel {
    Hosek,
    Preetham,
}

impl SkyModel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hosek => "hosek",
            Self::Preetham => "preetham",
        }
    }
}

/// Parameters shared by the physical sky models.
#[derive(Clone, Debug, PartialEq)]
pub struct PhysicalSkyParams {
    pub ground_albedo: f32,
    pub sun_phi: f32,
    pub sun_theta: f32,
    pub turbidity: f32,
    pub turbidity_multiplier: f32,
    pub luminance_multiplier: f32,
    pub luminance_gamma: f32,
    pub saturation_multiplier: f32,
    pub horizon_shift: f32,
}

/// An image-based environment.
#[derive(Clone, Debug, PartialEq)]
pub struct MapEnvironment {
    pub texture: TextureRef,
    pub radiance_multiplier: f32,
    pub exposure: f32,
}

/// The effective environment type with the settings it reads.
#[derive(Clone, Debug, PartialEq)]
pub enum EnvironmentKind {
    Constant { horizon: Vec3 },
    Gradient { horizon: Vec3, zenith: Vec3 },
    ConstantHemisphere { horizon: Vec3, zenith: Vec3 },
    LatLongMap(MapEnvironment),
    MirrorBallMap(MapEnvironment),
    PhysicalSky {
        model: SkyModel,
        sky: PhysicalSkyParams,
    },
}

impl EnvironmentKind {
    /// The effective environment type name.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Constant { .. } => "constant",
            Self::Gradient { .. } => "gradient",
            Self::ConstantHemisphere { .. } => "constant_hemisphere",
            Self::LatLongMap(_) => "latlong_map",
            Self::MirrorBallMap(_) => "mirrorball_map",
            Self::PhysicalSky { model, .. } => model.as_str(),
        }
    }

    /// Renderer model of the environment EDF.
    pub fn edf_model(&self) -> String {
        format!("{}_environment_edf", self.type_name())
    }

    /// The environment texture, for image-based types.
    pub fn texture(&self) -> Option<&TextureRef> {
        match self {
            Self::LatLongMap(map) | Self::MirrorBallMap(map) => Some(&map.texture),
            _ => None,
        }
    }
}

/// A validated world.
#[derive(Clone, Debug, PartialEq)]
pub struct WorldConfig {
    pub name: String,
    pub env_alpha: f32,
    /// Degrees
    pub vertical_shift: f32,
    /// Degrees
    pub horizontal_shift: f32,
    pub environment: EnvironmentKind,
}

impl WorldConfig {
    /// Validate a host world. Returns `None` when the environment is disabled.
    pub fn parse(desc: &WorldDesc) -> Result<Option<Self>> {
        let sky = &desc.appleseed_sky;

        let environment = match sky.env_type.as_str() {
            "none" => return Ok(None),
            "constant" => EnvironmentKind::Constant {
                horizon: desc.horizon_color,
            },
            "gradient" => EnvironmentKind::Gradient {
                horizon: desc.horizon_color,
                zenith: desc.zenith_color,
            },
            "constant_hemisphere" => EnvironmentKind::ConstantHemisphere {
                horizon: desc.horizon_color,
                zenith: desc.zenith_color,
            },
            "latlong_map" => EnvironmentKind::LatLongMap(map_environment(desc)?),
            "mirrorball_map" => EnvironmentKind::MirrorBallMap(map_environment(desc)?),
            "sunsky" => {
                let model = match sky.sun_model.as_str() {
                    "hosek" => SkyModel::Hosek,
                    "preetham" => SkyModel::Preetham,
                    other => return Err(Error::unsupported("sun model", other)),
                };
                EnvironmentKind::PhysicalSky {
                    model,
                    sky: PhysicalSkyParams {
                        ground_albedo: sky.ground_albedo,
                        sun_phi: sky.sun_phi,
                        sun_theta: sky.sun_theta,
                        turbidity: sky.turbidity,
                        turbidity_multiplier: sky.turbidity_multiplier,
                        luminance_multiplier: sky.luminance_multiplier,
                        luminance_gamma: sky.luminance_gamma,
                        saturation_multiplier: sky.saturation_multiplier,
                        horizon_shift: sky.horizon_shift,
                    },
                }
            }
            other => return Err(Error::unsupported("environment type", other)),
        };

        Ok(Some(Self {
            name: desc.name.clone(),
            env_alpha: sky.env_alpha,
            vertical_shift: sky.vertical_shift,
            horizontal_shift: sky.horizontal_shift,
            environment,
        }))
    }
}

fn map_environment(desc: &WorldDesc) -> Result<MapEnvironment> {
    let sky = &desc.appleseed_sky;
    let texture = sky
        .env_tex
        .clone()
        .ok_or_else(|| Error::missing(desc.name.clone(), "env_tex"))?;

    Ok(MapEnvironment {
        texture,
        radiance_multiplier: sky.env_tex_mult,
        exposure: sky.env_exposure,
    })
}
