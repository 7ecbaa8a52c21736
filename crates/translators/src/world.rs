//! World environment translation.
//!
//! The world always exports as one environment EDF (`sky_edf`), one
//! environment shader (`sky_shader`) and the scene environment (`sky`).
//! Constant and gradient-like environments additionally need color entities
//! for their radiance, which are inserted into the scene before the EDF that
//! references them.

use exporter_renderer::{
    ColorEntity, ColorSpace, Environment, EnvironmentEdf, EnvironmentShader, Handle, ParamMap,
    Scene, TransformSequence,
};
use exporter_scene::{EnvironmentKind, MapEnvironment, Transform, WorldConfig};
use glam::{Mat4, Vec3};
use tracing::{Span, debug};

use crate::error::{TranslateError, TranslateResult};
use crate::translator::TranslatorBase;

/// Name of the environment EDF.
pub const SKY_EDF: &str = "sky_edf";
/// Name of the environment shader.
pub const SKY_SHADER: &str = "sky_shader";
/// Name of the scene environment.
pub const SKY_ENVIRONMENT: &str = "sky";

const HORIZON_COLOR: &str = "horizon_radiance_color";
const ZENITH_COLOR: &str = "zenith_radiance_color";
const ENVIRONMENT_SHADER_MODEL: &str = "edf_environment_shader";

#[derive(Debug)]
enum WorldEntities {
    NotCreated,
    Pending {
        colors: Vec<ColorEntity>,
        edf: EnvironmentEdf,
        shader: EnvironmentShader,
        environment: Environment,
    },
    Flushed {
        colors: Vec<Handle<ColorEntity>>,
        edf: Handle<EnvironmentEdf>,
        shader: Handle<EnvironmentShader>,
    },
}

/// Translates the host world into the scene environment.
#[derive(Debug)]
pub struct WorldTranslator {
    base: TranslatorBase,
    config: WorldConfig,
    xform_seq: TransformSequence,
    entities: WorldEntities,
}

impl WorldTranslator {
    pub fn new(config: WorldConfig, parent: &Span) -> Self {
        Self {
            base: TranslatorBase::new("world", config.name.clone(), parent),
            config,
            xform_seq: TransformSequence::new(),
            entities: WorldEntities::NotCreated,
        }
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Build the colors, EDF, shader and environment.
    pub fn create_entities(&mut self) -> TranslateResult<()> {
        let _span = self.base.span().enter();
        debug!("Creating world entities");

        let environment = &self.config.environment;
        let colors = radiance_colors(environment);

        let edf = EnvironmentEdf::new(environment.edf_model(), SKY_EDF, edf_params(environment));
        debug!(
            "Environment EDF {} with {} colors",
            edf.model,
            colors.len()
        );

        let shader = EnvironmentShader::new(
            ENVIRONMENT_SHADER_MODEL,
            SKY_SHADER,
            ParamMap::new()
                .with("environment_edf", SKY_EDF)
                .with("alpha_value", self.config.env_alpha),
        );

        let environment = Environment::new(
            SKY_ENVIRONMENT,
            ParamMap::new()
                .with("environment_edf", SKY_EDF)
                .with("environment_shader", SKY_SHADER),
        );

        self.entities = WorldEntities::Pending {
            colors,
            edf,
            shader,
            environment,
        };
        Ok(())
    }

    /// Record the sky orientation at shutter time `time`.
    ///
    /// The recorded sequence is given to the environment EDF on flush, so
    /// this must be called before [`WorldTranslator::flush_entities`].
    pub fn set_transform(&mut self, time: f32) {
        let transform = self.convert_matrix(Mat4::IDENTITY);
        self.xform_seq.set_transform(time, transform);
    }

    /// Sky orientations recorded so far.
    pub fn transform_sequence(&self) -> &TransformSequence {
        &self.xform_seq
    }

    /// Apply the world's vertical and horizontal sky shift to `matrix`.
    fn convert_matrix(&self, matrix: Mat4) -> Mat4 {
        Transform::sky_rotation(self.config.vertical_shift, self.config.horizontal_shift) * matrix
    }

    /// Insert colors, EDF and shader into `scene` and make the sky its
    /// environment.
    pub fn flush_entities(&mut self, scene: &mut Scene) -> TranslateResult<()> {
        let _span = self.base.span().enter();

        match std::mem::replace(&mut self.entities, WorldEntities::NotCreated) {
            WorldEntities::NotCreated => Err(TranslateError::NotCreated {
                translator: self.base.kind(),
                name: self.base.appleseed_name().to_owned(),
            }),
            flushed @ WorldEntities::Flushed { .. } => {
                self.entities = flushed;
                Err(TranslateError::AlreadyFlushed {
                    translator: self.base.kind(),
                    name: self.base.appleseed_name().to_owned(),
                })
            }
            WorldEntities::Pending {
                colors,
                mut edf,
                shader,
                environment,
            } => {
                let vacant = colors
                    .iter()
                    .try_for_each(|color| scene.colors().check_vacant(&color.name))
                    .and_then(|()| scene.environment_edfs().check_vacant(&edf.name))
                    .and_then(|()| scene.environment_shaders().check_vacant(&shader.name));
                if let Err(err) = vacant {
                    self.entities = WorldEntities::Pending {
                        colors,
                        edf,
                        shader,
                        environment,
                    };
                    return Err(err.into());
                }

                let colors = colors
                    .into_iter()
                    .map(|color| scene.colors_mut().insert(color))
                    .collect::<Result<Vec<_>, _>>()?;

                edf.transforms = self.xform_seq.clone();
                let edf = scene.environment_edfs_mut().insert(edf)?;
                let shader = scene.environment_shaders_mut().insert(shader)?;

                if let Some(previous) = scene.set_environment(environment) {
                    debug!("Replaced environment '{}'", previous.name);
                }

                self.entities = WorldEntities::Flushed {
                    colors,
                    edf,
                    shader,
                };
                Ok(())
            }
        }
    }

    /// Names of the created, not yet flushed, color entities.
    pub fn color_names(&self) -> Vec<&str> {
        match &self.entities {
            WorldEntities::Pending { colors, .. } => {
                colors.iter().map(|c| c.name.as_str()).collect()
            }
            _ => Vec::new(),
        }
    }

    /// The created, not yet flushed, environment EDF.
    pub fn edf(&self) -> Option<&EnvironmentEdf> {
        match &self.entities {
            WorldEntities::Pending { edf, .. } => Some(edf),
            _ => None,
        }
    }

    /// Handles of the color entities once flushed.
    pub fn color_handles(&self) -> &[Handle<ColorEntity>] {
        match &self.entities {
            WorldEntities::Flushed { colors, .. } => colors,
            _ => &[],
        }
    }

    /// Handle of the environment EDF once flushed.
    pub fn edf_handle(&self) -> Option<Handle<EnvironmentEdf>> {
        match self.entities {
            WorldEntities::Flushed { edf, .. } => Some(edf),
            _ => None,
        }
    }

    /// Handle of the environment shader once flushed.
    pub fn shader_handle(&self) -> Option<Handle<EnvironmentShader>> {
        match self.entities {
            WorldEntities::Flushed { shader, .. } => Some(shader),
            _ => None,
        }
    }
}

/// Color entities an environment type reads its radiance from.
///
/// The horizon color of gradient-like environments is sRGB while every
/// other radiance color is linear.
fn radiance_colors(environment: &EnvironmentKind) -> Vec<ColorEntity> {
    let color = |name: &str, space: ColorSpace, value: Vec3| {
        ColorEntity::new(name, space, TranslatorBase::convert_color(value))
    };

    match environment {
        EnvironmentKind::Constant { horizon } => {
            vec![color(HORIZON_COLOR, ColorSpace::LinearRgb, *horizon)]
        }
        EnvironmentKind::Gradient { horizon, zenith }
        | EnvironmentKind::ConstantHemisphere { horizon, zenith } => vec![
            color(HORIZON_COLOR, ColorSpace::Srgb, *horizon),
            color(ZENITH_COLOR, ColorSpace::LinearRgb, *zenith),
        ],
        EnvironmentKind::LatLongMap(_)
        | EnvironmentKind::MirrorBallMap(_)
        | EnvironmentKind::PhysicalSky { .. } => Vec::new(),
    }
}

fn map_params(map: &MapEnvironment) -> ParamMap {
    ParamMap::new()
        .with("radiance", map.texture.instance_name())
        .with("radiance_multiplier", map.radiance_multiplier)
        .with("exposure", map.exposure)
}

fn edf_params(environment: &EnvironmentKind) -> ParamMap {
    match environment {
        EnvironmentKind::LatLongMap(map) | EnvironmentKind::MirrorBallMap(map) => map_params(map),
        EnvironmentKind::Constant { .. } => ParamMap::new().with("radiance", HORIZON_COLOR),
        EnvironmentKind::Gradient { .. } => ParamMap::new()
            .with("horizon_radiance", HORIZON_COLOR)
            .with("zenith_radiance", ZENITH_COLOR),
        EnvironmentKind::ConstantHemisphere { .. } => ParamMap::new()
            .with("lower_hemi_radiance", HORIZON_COLOR)
            .with("upper_hemi_radiance", ZENITH_COLOR),
        EnvironmentKind::PhysicalSky { sky, .. } => ParamMap::new()
            .with("ground_albedo", sky.ground_albedo)
            .with("sun_phi", sky.sun_phi)
            .with("sun_theta", sky.sun_theta)
            .with("turbidity", sky.turbidity)
            .with("turbidity_multiplier", sky.turbidity_multiplier)
            .with("luminance_multiplier", sky.luminance_multiplier)
            .with("luminance_gamma", sky.luminance_gamma)
            .with("saturation_multiplier", sky.saturation_multiplier)
            .with("horizon_shift", sky.horizon_shift),
    }
}
