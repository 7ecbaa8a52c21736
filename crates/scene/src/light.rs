//! Light definitions as the host stores them, and their validated form.
//!
//! [`LightDesc`] is decoded straight from the host's property groups.
//! [`LightConfig::parse`] applies the lamp model decision table:
//!
//! | host type | sun mode  | kind                      |
//! |-----------|-----------|---------------------------|
//! | `POINT`   | -         | [`LightKind::Point`]       |
//! | `SPOT`    | -         | [`LightKind::Spot`]        |
//! | `SUN`     | `distant` | [`LightKind::Directional`] |
//! | `SUN`     | `sun`     | [`LightKind::Sun`]         |
//! | `AREA`    | -         | [`LightKind::Area`]        |
//!
//! Any other combination is an [`Error::UnsupportedConfiguration`].

use exporter_core::{Error, Result};
use glam::{Mat4, Vec3};
use serde::Deserialize;

use crate::texture::TextureRef;

/// Default spot cone size of the host tool (45 degrees).
const DEFAULT_SPOT_SIZE: f32 = std::f32::consts::FRAC_PI_4;
const DEFAULT_SPOT_BLEND: f32 = 0.15;

fn default_spot_size() -> f32 {
    DEFAULT_SPOT_SIZE
}

fn default_spot_blend() -> f32 {
    DEFAULT_SPOT_BLEND
}

/// Renderer-specific light settings attached to a host light.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct LightSettingsDesc {
    pub radiance: Vec3,
    pub radiance_multiplier: f32,
    pub exposure: f32,
    pub exposure_multiplier: f32,
    pub cast_indirect: bool,
    pub importance_multiplier: f32,
    /// Spot tilt in degrees
    pub tilt_angle: f32,
    /// `distant` or `sun`, only read for `SUN` lights
    pub sun_mode: String,
    pub size_multiplier: f32,
    pub distance: f32,
    pub turbidity: f32,
    pub use_edf: bool,
    pub radiance_use_tex: bool,
    pub radiance_tex: Option<TextureRef>,
    pub radiance_multiplier_use_tex: bool,
    pub radiance_multiplier_tex: Option<TextureRef>,
}

impl Default for LightSettingsDesc {
    fn default() -> Self {
        Self {
            radiance: Vec3::ONE,
            radiance_multiplier: 1.0,
            exposure: 0.0,
            exposure_multiplier: 1.0,
            cast_indirect: true,
            importance_multiplier: 1.0,
            tilt_angle: 0.0,
            sun_mode: "distant".to_owned(),
            size_multiplier: 1.0,
            distance: 1.0,
            turbidity: 1.0,
            use_edf: false,
            radiance_use_tex: false,
            radiance_tex: None,
            radiance_multiplier_use_tex: false,
            radiance_multiplier_tex: None,
        }
    }
}

/// A light object as stored by the host.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct LightDesc {
    pub name: String,
    /// `POINT`, `SPOT`, `SUN` or `AREA`
    #[serde(rename = "type")]
    pub light_type: String,
    #[serde(default)]
    pub matrix_world: Mat4,
    /// Full cone angle in radians
    #[serde(default = "default_spot_size")]
    pub spot_size: f32,
    #[serde(default = "default_spot_blend")]
    pub spot_blend: f32,
    #[serde(default)]
    pub appleseed: LightSettingsDesc,
}

/// Settings shared by every non-area light model.
#[derive(Clone, Debug, PartialEq)]
pub struct LightCommon {
    pub radiance_multiplier: f32,
    pub exposure: f32,
    pub cast_indirect: bool,
    pub importance_multiplier: f32,
}

/// Spot light cone and texture settings.
#[derive(Clone, Debug, PartialEq)]
pub struct SpotLight {
    /// Full cone angle in radians
    pub spot_size: f32,
    /// Fraction of the cone used for the falloff, 0..=1
    pub spot_blend: f32,
    pub exposure_multiplier: f32,
    pub tilt_angle: f32,
    /// Set only when the host enables the texture and one is assigned.
    pub radiance_texture: Option<TextureRef>,
    /// Set only when the host enables the texture and one is assigned.
    pub radiance_multiplier_texture: Option<TextureRef>,
}

impl SpotLight {
    /// Outer cone angle in degrees.
    pub fn outer_angle(&self) -> f32 {
        self.spot_size.to_degrees()
    }

    /// Inner cone angle in degrees.
    pub fn inner_angle(&self) -> f32 {
        (1.0 - self.spot_blend) * self.outer_angle()
    }
}

/// Physical sun settings.
#[derive(Clone, Debug, PartialEq)]
pub struct SunLight {
    pub size_multiplier: f32,
    pub distance: f32,
    pub turbidity: f32,
    /// Bind the sun to the sky EDF of the world.
    pub use_edf: bool,
}

/// The validated light model.
#[derive(Clone, Debug, PartialEq)]
pub enum LightKind {
    Point,
    Spot(SpotLight),
    Directional,
    Sun(SunLight),
    /// Exported as emitting geometry elsewhere.
    Area,
}

impl LightKind {
    /// Short name used in log output.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Point => "point",
            Self::Spot(_) => "spot",
            Self::Directional => "directional",
            Self::Sun(_) => "sun",
            Self::Area => "area",
        }
    }
}

/// A validated host light.
#[derive(Clone, Debug, PartialEq)]
pub struct LightConfig {
    pub name: String,
    pub matrix_world: Mat4,
    pub radiance: Vec3,
    pub common: LightCommon,
    pub kind: LightKind,
}

impl LightConfig {
    /// Validate a host light description.
    pub fn parse(desc: &LightDesc) -> Result<Self> {
        let settings = &desc.appleseed;

        let kind = match desc.light_type.as_str() {
            "POINT" => LightKind::Point,
            "SPOT" => LightKind::Spot(SpotLight {
                spot_size: desc.spot_size,
                spot_blend: desc.spot_blend,
                exposure_multiplier: settings.exposure_multiplier,
                tilt_angle: settings.tilt_angle,
                radiance_texture: enabled_texture(
                    settings.radiance_use_tex,
                    &settings.radiance_tex,
                ),
                radiance_multiplier_texture: enabled_texture(
                    settings.radiance_multiplier_use_tex,
                    &settings.radiance_multiplier_tex,
                ),
            }),
            "SUN" => match settings.sun_mode.as_str() {
                "distant" => LightKind::Directional,
                "sun" => LightKind::Sun(SunLight {
                    size_multiplier: settings.size_multiplier,
                    distance: settings.distance,
                    turbidity: settings.turbidity,
                    use_edf: settings.use_edf,
                }),
                other => return Err(Error::unsupported("sun mode", other)),
            },
            "AREA" => LightKind::Area,
            other => return Err(Error::unsupported("light type", other)),
        };

        Ok(Self {
            name: desc.name.clone(),
            matrix_world: desc.matrix_world,
            radiance: settings.radiance,
            common: LightCommon {
                radiance_multiplier: settings.radiance_multiplier,
                exposure: settings.exposure,
                cast_indirect: settings.cast_indirect,
                importance_multiplier: settings.importance_multiplier,
            },
            kind,
        })
    }

    /// Textures this light samples, in the order they are referenced.
    pub fn textures(&self) -> impl Iterator<Item = &TextureRef> {
        let spot = match &self.kind {
            LightKind::Spot(spot) => Some(spot),
            _ => None,
        };
        spot.into_iter().flat_map(|spot| {
            spot.radiance_texture
                .iter()
                .chain(spot.radiance_multiplier_texture.iter())
        })
    }

    pub fn is_area(&self) -> bool {
        matches!(self.kind, LightKind::Area)
    }
}

fn enabled_texture(use_tex: bool, tex: &Option<TextureRef>) -> Option<TextureRef> {
    if use_tex { tex.clone() } else { None }
}
