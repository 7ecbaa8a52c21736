//! The exported host scene.
//!
//! [`SceneDesc`] is the JSON document a host export hands over;
//! [`HostScene`] is its validated form.

use std::path::Path;

use exporter_core::{Error, Result};
use glam::Mat4;
use serde::Deserialize;
use tracing::debug;

use crate::light::{LightConfig, LightDesc};
use crate::world::{WorldConfig, WorldDesc};

/// A lamp placed by a particle system or object duplication.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct LightInstanceDesc {
    /// Unique instance key
    pub name: String,
    /// Name of the instanced light in [`SceneDesc::lights`]
    pub source: String,
    #[serde(default)]
    pub matrix_world: Mat4,
}

/// The host scene as exported.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct SceneDesc {
    pub name: String,
    pub world: Option<WorldDesc>,
    pub lights: Vec<LightDesc>,
    pub light_instances: Vec<LightInstanceDesc>,
}

/// A validated lamp instance.
#[derive(Clone, Debug, PartialEq)]
pub struct LightInstance {
    pub name: String,
    /// Index into [`HostScene::lights`]
    pub source: usize,
    pub matrix_world: Mat4,
}

/// A validated host scene.
#[derive(Clone, Debug, PartialEq)]
pub struct HostScene {
    pub name: String,
    /// `None` when the world is missing or its environment is disabled.
    pub world: Option<WorldConfig>,
    pub lights: Vec<LightConfig>,
    pub instances: Vec<LightInstance>,
}

impl HostScene {
    /// Validate a decoded scene description.
    pub fn parse(desc: &SceneDesc) -> Result<Self> {
        let world = match &desc.world {
            Some(world) => WorldConfig::parse(world)?,
            None => None,
        };

        let lights = desc
            .lights
            .iter()
            .map(LightConfig::parse)
            .collect::<Result<Vec<_>>>()?;

        let instances = desc
            .light_instances
            .iter()
            .map(|inst| -> Result<LightInstance> {
                let source = lights
                    .iter()
                    .position(|light| light.name == inst.source)
                    .ok_or_else(|| Error::missing(inst.name.clone(), "source"))?;
                Ok(LightInstance {
                    name: inst.name.clone(),
                    source,
                    matrix_world: inst.matrix_world,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(
            "Parsed scene '{}': {} lights, {} instances, world: {}",
            desc.name,
            lights.len(),
            instances.len(),
            world.is_some()
        );

        Ok(Self {
            name: desc.name.clone(),
            world,
            lights,
            instances,
        })
    }

    /// Decode and validate a scene from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        let desc: SceneDesc = serde_json::from_str(text)?;
        Self::parse(&desc)
    }

    /// Read, decode and validate a scene file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// The light an instance was created from.
    ///
    /// `None` when the instance's source index no longer names a light.
    pub fn instance_source(&self, instance: &LightInstance) -> Option<&LightConfig> {
        self.lights.get(instance.source)
    }
}
