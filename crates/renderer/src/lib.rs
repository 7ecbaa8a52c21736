//! Renderer-side scene entities.
//!
//! This crate models the renderer's scene graph as seen by the exporter:
//! - Parameter maps passed to entity constructors
//! - Named entities (lights, colors, textures, environment EDFs and shaders)
//! - Arena containers that own inserted entities and hand out handles
//! - Assemblies, the scene and the project

mod error;

pub mod container;
pub mod entity;
pub mod param;
pub mod scene;
pub mod transform_sequence;

pub use container::{Container, Handle};
pub use entity::{
    ColorEntity, ColorSpace, Entity, Environment, EnvironmentEdf, EnvironmentShader, Light,
    LightModel, Texture, TextureInstance,
};
pub use error::{RendererError, RendererResult};
pub use param::{ParamMap, ParamValue};
pub use scene::{Assembly, Project, Scene};
pub use transform_sequence::TransformSequence;
