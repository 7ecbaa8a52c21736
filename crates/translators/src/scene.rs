//! Whole-scene translation.
//!
//! [`SceneTranslator::translate`] builds a project from a validated host
//! scene: it creates one translator per host object, runs every
//! `create_entities`, records the sky orientation, then flushes textures and
//! lamps into the main assembly and the world into the scene.

use std::collections::BTreeMap;
use std::sync::Arc;

use exporter_core::{Error, ExportConfig, Timer};
use exporter_renderer::{Assembly, Environment, ParamMap, Project};
use exporter_scene::{HostScene, TextureRef};
use tracing::{Span, debug, info, warn};

use crate::asset::AssetHandler;
use crate::error::TranslateResult;
use crate::lamp::LampTranslator;
use crate::texture::TextureTranslator;
use crate::world::WorldTranslator;

/// Name of the assembly holding all lamps and textures.
pub const MAIN_ASSEMBLY: &str = "assembly";

/// Placeholder environment set until the world is flushed.
const DEFAULT_ENVIRONMENT: &str = "environment";

/// Translates a host scene into a renderer project.
#[derive(Debug)]
pub struct SceneTranslator {
    asset_handler: Arc<AssetHandler>,
}

/// Translators for a single scene, in the order they are driven.
struct Translators {
    world: Option<WorldTranslator>,
    textures: BTreeMap<String, TextureTranslator>,
    lamps: Vec<LampTranslator>,
}

impl SceneTranslator {
    pub fn new(config: ExportConfig) -> Self {
        Self {
            asset_handler: Arc::new(AssetHandler::new(config)),
        }
    }

    pub fn config(&self) -> &ExportConfig {
        self.asset_handler.config()
    }

    /// Translate `scene` into a new project.
    pub fn translate(&self, scene: &HostScene) -> TranslateResult<Project> {
        let span = tracing::info_span!("translate_scene", scene = %scene.name);
        let _enter = span.enter();

        let mut timer = Timer::started();
        debug!("Translating scene '{}'", scene.name);

        let mut project = self.create_project(&scene.name)?;
        let mut translators = self.create_translators(scene, &span)?;

        if let Some(world) = &mut translators.world {
            world.create_entities()?;
        }
        for texture in translators.textures.values_mut() {
            texture.create_entities()?;
        }
        for lamp in &mut translators.lamps {
            lamp.create_entities()?;
        }

        if let Some(world) = &mut translators.world {
            world.set_transform(0.0);
        }

        let assembly = project.scene.assembly_mut(MAIN_ASSEMBLY)?;
        for texture in translators.textures.values_mut() {
            texture.flush_entities(assembly)?;
        }
        for lamp in &mut translators.lamps {
            lamp.flush_entities(assembly)?;
        }
        let (light_count, texture_count) = (assembly.lights().len(), assembly.textures().len());

        if let Some(world) = &mut translators.world {
            world.flush_entities(&mut project.scene)?;
        }

        timer.stop();
        info!(
            "Scene '{}' translated in {:.3} seconds ({} lights, {} textures, world: {})",
            scene.name,
            timer.elapsed_secs(),
            light_count,
            texture_count,
            translators.world.is_some()
        );

        Ok(project)
    }

    /// Base project: scene, placeholder environment and main assembly.
    fn create_project(&self, name: &str) -> TranslateResult<Project> {
        debug!("Creating project '{}'", name);

        let mut project = Project::new(name);
        project
            .scene
            .set_environment(Environment::new(DEFAULT_ENVIRONMENT, ParamMap::new()));
        project
            .scene
            .assemblies_mut()
            .insert(Assembly::new(MAIN_ASSEMBLY))?;

        for path in &self.config().search_paths {
            project.add_search_path(path.to_string_lossy());
        }

        Ok(project)
    }

    fn create_translators(&self, scene: &HostScene, span: &Span) -> TranslateResult<Translators> {
        let mut translators = Translators {
            world: None,
            textures: BTreeMap::new(),
            lamps: Vec::with_capacity(scene.lights.len() + scene.instances.len()),
        };

        if let Some(world) = &scene.world {
            if let Some(texture) = world.environment.texture() {
                self.add_texture(&mut translators.textures, texture, span);
            }
            translators.world = Some(WorldTranslator::new(world.clone(), span));
        }

        for light in &scene.lights {
            for texture in light.textures() {
                self.add_texture(&mut translators.textures, texture, span);
            }
            translators
                .lamps
                .push(LampTranslator::new(light.clone(), span));
        }

        for instance in &scene.instances {
            let source = scene
                .instance_source(instance)
                .ok_or_else(|| Error::missing(instance.name.clone(), "source"))?;
            translators
                .lamps
                .push(LampTranslator::for_instance(source, instance, span));
        }

        debug!(
            "Created {} lamp and {} texture translators",
            translators.lamps.len(),
            translators.textures.len()
        );
        Ok(translators)
    }

    /// Register a texture once, however many objects sample it.
    fn add_texture(
        &self,
        textures: &mut BTreeMap<String, TextureTranslator>,
        texture: &TextureRef,
        span: &Span,
    ) {
        if let Some(existing) = textures.get(&texture.name) {
            if existing.texture() != texture {
                warn!(
                    "Texture '{}' is referenced with different settings, keeping the first",
                    texture.name
                );
            }
            return;
        }

        textures.insert(
            texture.name.clone(),
            TextureTranslator::new(texture.clone(), Arc::clone(&self.asset_handler), span),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TranslateError;

    #[test]
    fn test_empty_scene_has_placeholder_environment() {
        let scene = HostScene::from_json(r#"{"name": "Empty"}"#).unwrap();
        let project = SceneTranslator::new(ExportConfig::default())
            .translate(&scene)
            .unwrap();

        assert_eq!(project.name, "Empty");
        assert_eq!(project.scene.environment().unwrap().name, "environment");
        assert!(project.scene.assemblies().contains(MAIN_ASSEMBLY));
        assert!(project.scene.environment_edfs().is_empty());
    }

    #[test]
    fn test_search_paths_from_config() {
        let config = ExportConfig {
            search_paths: vec!["/library/textures".into(), "/library/hdri".into()],
            ..Default::default()
        };
        let scene = HostScene::from_json("{}").unwrap();
        let project = SceneTranslator::new(config).translate(&scene).unwrap();

        assert_eq!(project.search_paths, ["/library/textures", "/library/hdri"]);
    }

    #[test]
    fn test_shared_texture_translated_once() {
        let scene = HostScene::from_json(
            r#"{
                "lights": [
                    {"name": "A", "type": "SPOT", "appleseed": {
                        "radiance_use_tex": true,
                        "radiance_tex": {"name": "gobo", "filepath": "//gobo.png"}
                    }},
                    {"name": "B", "type": "SPOT", "appleseed": {
                        "radiance_use_tex": true,
                        "radiance_tex": {"name": "gobo", "filepath": "//gobo.png"}
                    }}
                ]
            }"#,
        )
        .unwrap();

        let mut project = SceneTranslator::new(ExportConfig::default())
            .translate(&scene)
            .unwrap();
        let assembly = project.scene.assembly_mut(MAIN_ASSEMBLY).unwrap();
        assert_eq!(assembly.textures().len(), 1);
        assert_eq!(assembly.texture_instances().len(), 1);
        assert_eq!(assembly.lights().len(), 2);
    }

    #[test]
    fn test_instance_without_source_light_fails() {
        let mut scene = HostScene::from_json(
            r#"{
                "lights": [{"name": "Key", "type": "POINT"}],
                "light_instances": [{"name": "Key|Emitter|0", "source": "Key"}]
            }"#,
        )
        .unwrap();
        scene.lights.clear();

        let err = SceneTranslator::new(ExportConfig::default())
            .translate(&scene)
            .unwrap_err();
        assert!(matches!(
            err,
            TranslateError::Scene(Error::MissingReference { field: "source", .. })
        ));
    }
}
