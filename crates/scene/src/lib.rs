//! Host scene model.
//!
//! This crate describes the content-creation tool's side of an export:
//! - Raw, serde-decoded property groups as the host stores them
//! - Validated, typed light and world configurations
//! - Texture references
//! - Transform helpers for host matrices

pub mod light;
pub mod scene;
pub mod texture;
pub mod transform;
pub mod world;

pub use light::{
    LightCommon, LightConfig, LightDesc, LightKind, LightSettingsDesc, SpotLight, SunLight,
};
pub use scene::{HostScene, LightInstance, LightInstanceDesc, SceneDesc};
pub use texture::{TextureColorSpace, TextureRef};
pub use transform::Transform;
pub use world::{
    EnvironmentKind, MapEnvironment, PhysicalSkyParams, SkyDesc, SkyModel, WorldConfig, WorldDesc,
};
