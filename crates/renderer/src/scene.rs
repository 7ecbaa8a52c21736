//! Assemblies, the scene and the project.

use serde::Serialize;
use tracing::debug;

use crate::container::Container;
use crate::entity::{
    ColorEntity, Entity, Environment, EnvironmentEdf, EnvironmentShader, Light, Texture,
    TextureInstance,
};
use crate::error::{RendererError, RendererResult};

/// A grouping of lights and their supporting entities.
#[derive(Debug, Default, Serialize)]
pub struct Assembly {
    pub name: String,
    lights: Container<Light>,
    colors: Container<ColorEntity>,
    textures: Container<Texture>,
    texture_instances: Container<TextureInstance>,
}

impl Entity for Assembly {
    const KIND: &'static str = "assembly";

    fn name(&self) -> &str {
        &self.name
    }
}

impl Assembly {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn lights(&self) -> &Container<Light> {
        &self.lights
    }

    pub fn lights_mut(&mut self) -> &mut Container<Light> {
        &mut self.lights
    }

    pub fn colors(&self) -> &Container<ColorEntity> {
        &self.colors
    }

    pub fn colors_mut(&mut self) -> &mut Container<ColorEntity> {
        &mut self.colors
    }

    pub fn textures(&self) -> &Container<Texture> {
        &self.textures
    }

    pub fn textures_mut(&mut self) -> &mut Container<Texture> {
        &mut self.textures
    }

    pub fn texture_instances(&self) -> &Container<TextureInstance> {
        &self.texture_instances
    }

    pub fn texture_instances_mut(&mut self) -> &mut Container<TextureInstance> {
        &mut self.texture_instances
    }
}

/// The top-level renderer scene.
#[derive(Debug, Default, Serialize)]
pub struct Scene {
    colors: Container<ColorEntity>,
    environment_edfs: Container<EnvironmentEdf>,
    environment_shaders: Container<EnvironmentShader>,
    assemblies: Container<Assembly>,
    environment: Option<Environment>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn colors(&self) -> &Container<ColorEntity> {
        &self.colors
    }

    pub fn colors_mut(&mut self) -> &mut Container<ColorEntity> {
        &mut self.colors
    }

    pub fn environment_edfs(&self) -> &Container<EnvironmentEdf> {
        &self.environment_edfs
    }

    pub fn environment_edfs_mut(&mut self) -> &mut Container<EnvironmentEdf> {
        &mut self.environment_edfs
    }

    pub fn environment_shaders(&self) -> &Container<EnvironmentShader> {
        &self.environment_shaders
    }

    pub fn environment_shaders_mut(&mut self) -> &mut Container<EnvironmentShader> {
        &mut self.environment_shaders
    }

    pub fn assemblies(&self) -> &Container<Assembly> {
        &self.assemblies
    }

    pub fn assemblies_mut(&mut self) -> &mut Container<Assembly> {
        &mut self.assemblies
    }

    /// Mutable access to an assembly by name.
    pub fn assembly_mut(&mut self, name: &str) -> RendererResult<&mut Assembly> {
        let handle = self
            .assemblies
            .get_by_name(name)
            .ok_or_else(|| RendererError::UnknownAssembly(name.to_owned()))?;
        self.assemblies.try_get_mut(handle)
    }

    /// The active environment.
    pub fn environment(&self) -> Option<&Environment> {
        self.environment.as_ref()
    }

    /// Make `environment` the active one, returning the environment it replaces.
    pub fn set_environment(&mut self, environment: Environment) -> Option<Environment> {
        debug!("Setting scene environment '{}'", environment.name);
        self.environment.replace(environment)
    }
}

/// A render project: the scene plus project-wide settings.
#[derive(Debug, Serialize)]
pub struct Project {
    pub name: String,
    pub scene: Scene,
    /// Directories searched for assets, in priority order
    pub search_paths: Vec<String>,
}

impl Project {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            scene: Scene::new(),
            search_paths: Vec::new(),
        }
    }

    /// Append a search path unless it is already present.
    pub fn add_search_path(&mut self, path: impl Into<String>) {
        let path = path.into();
        if !self.search_paths.contains(&path) {
            self.search_paths.push(path);
        }
    }
}
