//! Lamp translation.
//!
//! A non-area lamp becomes one renderer light plus a linear RGB color entity
//! named `<lamp>_radiance` holding its radiance. The light model and its
//! parameters follow the validated [`LightKind`]:
//!
//! | kind        | model               | parameters |
//! |-------------|---------------------|------------|
//! | point       | `point_light`       | intensity, intensity_multiplier, exposure, cast_indirect_light, importance_multiplier |
//! | spot        | `spot_light`        | point parameters plus exposure_multiplier, tilt_angle, inner_angle, outer_angle |
//! | directional | `directional_light` | irradiance, irradiance_multiplier, exposure, cast_indirect_light, importance_multiplier |
//! | sun         | `sun_light`         | radiance_multiplier, cast_indirect_light, importance_multiplier, size_multiplier, distance, turbidity, optional environment_edf |
//!
//! Area lamps produce no entities here; their emitting geometry is built by
//! the mesh export.

use exporter_renderer::{
    Assembly, ColorEntity, ColorSpace, Handle, Light, LightModel, ParamMap,
};
use exporter_scene::{LightConfig, LightInstance, LightKind, SpotLight, SunLight};
use glam::Mat4;
use tracing::{Span, debug};

use crate::error::{TranslateError, TranslateResult};
use crate::translator::TranslatorBase;
use crate::world::SKY_EDF;

/// Lifecycle of the entities owned by a lamp translator.
#[derive(Debug)]
enum LampEntities {
    NotCreated,
    /// Area lamps have nothing to create or flush.
    Area,
    Pending {
        light: Light,
        radiance: ColorEntity,
    },
    Flushed {
        light: Handle<Light>,
        radiance: Handle<ColorEntity>,
    },
}

/// Translates a host lamp, or one instance of it, into a renderer light.
#[derive(Debug)]
pub struct LampTranslator {
    base: TranslatorBase,
    config: LightConfig,
    matrix_world: Mat4,
    entities: LampEntities,
}

impl LampTranslator {
    pub fn new(config: LightConfig, parent: &Span) -> Self {
        let base = TranslatorBase::new("lamp", config.name.clone(), parent);
        Self {
            base,
            matrix_world: config.matrix_world,
            config,
            entities: LampEntities::NotCreated,
        }
    }

    /// Translator for a lamp placed by a particle system or duplication.
    ///
    /// The instance gets its own light and radiance color, named after the
    /// instance and placed with the instance's matrix. The source lamp's
    /// `<source>_radiance` color is not shared.
    pub fn for_instance(source: &LightConfig, instance: &LightInstance, parent: &Span) -> Self {
        let base = TranslatorBase::new("lamp instance", instance.name.clone(), parent);
        Self {
            base,
            matrix_world: instance.matrix_world,
            config: source.clone(),
            entities: LampEntities::NotCreated,
        }
    }

    pub fn appleseed_name(&self) -> &str {
        self.base.appleseed_name()
    }

    /// Name of the radiance color entity.
    pub fn radiance_name(&self) -> String {
        format!("{}_radiance", self.appleseed_name())
    }

    pub fn config(&self) -> &LightConfig {
        &self.config
    }

    /// Build the light and its radiance color.
    pub fn create_entities(&mut self) -> TranslateResult<()> {
        let _span = self.base.span().enter();

        let radiance_name = self.radiance_name();
        let Some((model, params)) = light_params(&self.config, &radiance_name) else {
            debug!(
                "{} lamp, entities are created by the mesh export",
                self.config.kind.name()
            );
            self.entities = LampEntities::Area;
            return Ok(());
        };

        debug!(
            "Creating {} for {} lamp with {} parameters",
            model.as_str(),
            self.config.kind.name(),
            params.len()
        );

        let mut light = Light::new(model, self.base.appleseed_name(), params);
        light.set_transform(TranslatorBase::convert_matrix(self.matrix_world));

        let radiance = ColorEntity::new(
            radiance_name,
            ColorSpace::LinearRgb,
            TranslatorBase::convert_color(self.config.radiance),
        );

        self.entities = LampEntities::Pending { light, radiance };
        Ok(())
    }

    /// Move the light and radiance color into `assembly`.
    pub fn flush_entities(&mut self, assembly: &mut Assembly) -> TranslateResult<()> {
        let _span = self.base.span().enter();

        match std::mem::replace(&mut self.entities, LampEntities::NotCreated) {
            LampEntities::NotCreated => Err(TranslateError::NotCreated {
                translator: self.base.kind(),
                name: self.appleseed_name().to_owned(),
            }),
            LampEntities::Flushed { light, radiance } => {
                self.entities = LampEntities::Flushed { light, radiance };
                Err(TranslateError::AlreadyFlushed {
                    translator: self.base.kind(),
                    name: self.appleseed_name().to_owned(),
                })
            }
            LampEntities::Area => {
                self.entities = LampEntities::Area;
                Ok(())
            }
            LampEntities::Pending { light, radiance } => {
                // All or nothing: a taken name leaves assembly and translator as they were.
                let vacant = assembly
                    .lights()
                    .check_vacant(&light.name)
                    .and_then(|()| assembly.colors().check_vacant(&radiance.name));
                if let Err(err) = vacant {
                    self.entities = LampEntities::Pending { light, radiance };
                    return Err(err.into());
                }

                let light = assembly.lights_mut().insert(light)?;
                let radiance = assembly.colors_mut().insert(radiance)?;
                debug!("Inserted light into assembly '{}'", assembly.name);
                self.entities = LampEntities::Flushed { light, radiance };
                Ok(())
            }
        }
    }

    /// Parameters of the created, not yet flushed, light.
    pub fn params(&self) -> Option<&ParamMap> {
        match &self.entities {
            LampEntities::Pending { light, .. } => Some(&light.params),
            _ => None,
        }
    }

    /// Model of the created, not yet flushed, light.
    pub fn model(&self) -> Option<LightModel> {
        match &self.entities {
            LampEntities::Pending { light, .. } => Some(light.model),
            _ => None,
        }
    }

    /// Handle of the light once flushed.
    pub fn light_handle(&self) -> Option<Handle<Light>> {
        match self.entities {
            LampEntities::Flushed { light, .. } => Some(light),
            _ => None,
        }
    }

    /// Handle of the radiance color once flushed.
    pub fn radiance_handle(&self) -> Option<Handle<ColorEntity>> {
        match self.entities {
            LampEntities::Flushed { radiance, .. } => Some(radiance),
            _ => None,
        }
    }
}

/// Select the light model and build its parameters.
///
/// Returns `None` for area lamps.
fn light_params(config: &LightConfig, radiance_name: &str) -> Option<(LightModel, ParamMap)> {
    let common = &config.common;

    let params = match &config.kind {
        LightKind::Point => (
            LightModel::PointLight,
            ParamMap::new()
                .with("intensity", radiance_name)
                .with("intensity_multiplier", common.radiance_multiplier)
                .with("exposure", common.exposure)
                .with("cast_indirect_light", common.cast_indirect)
                .with("importance_multiplier", common.importance_multiplier),
        ),
        LightKind::Spot(spot) => (
            LightModel::SpotLight,
            spot_params(config, spot, radiance_name),
        ),
        LightKind::Directional => (
            LightModel::DirectionalLight,
            ParamMap::new()
                .with("irradiance", radiance_name)
                .with("irradiance_multiplier", common.radiance_multiplier)
                .with("exposure", common.exposure)
                .with("cast_indirect_light", common.cast_indirect)
                .with("importance_multiplier", common.importance_multiplier),
        ),
        LightKind::Sun(sun) => (LightModel::SunLight, sun_params(config, sun)),
        LightKind::Area => return None,
    };

    Some(params)
}

fn spot_params(config: &LightConfig, spot: &SpotLight, radiance_name: &str) -> ParamMap {
    let common = &config.common;

    // A texture wins over the constant value it replaces.
    let mut params = ParamMap::new();
    match &spot.radiance_texture {
        Some(tex) => params.insert("intensity", tex.instance_name()),
        None => params.insert("intensity", radiance_name),
    };
    match &spot.radiance_multiplier_texture {
        Some(tex) => params.insert("intensity_multiplier", tex.instance_name()),
        None => params.insert("intensity_multiplier", common.radiance_multiplier),
    };

    params
        .with("exposure", common.exposure)
        .with("cast_indirect_light", common.cast_indirect)
        .with("importance_multiplier", common.importance_multiplier)
        .with("exposure_multiplier", spot.exposure_multiplier)
        .with("tilt_angle", spot.tilt_angle)
        .with("inner_angle", spot.inner_angle())
        .with("outer_angle", spot.outer_angle())
}

fn sun_params(config: &LightConfig, sun: &SunLight) -> ParamMap {
    let common = &config.common;

    let params = ParamMap::new()
        .with("radiance_multiplier", common.radiance_multiplier)
        .with("cast_indirect_light", common.cast_indirect)
        .with("importance_multiplier", common.importance_multiplier)
        .with("size_multiplier", sun.size_multiplier)
        .with("distance", sun.distance)
        .with("turbidity", sun.turbidity);

    if sun.use_edf {
        params.with("environment_edf", SKY_EDF)
    } else {
        params
    }
}
