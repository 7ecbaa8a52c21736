//! Translation of host scene objects into renderer entities.
//!
//! Each translator follows the same two-phase protocol:
//! 1. `create_entities` builds renderer entities from the host object
//! 2. `flush_entities` moves them into their owning containers and keeps
//!    only the handles the containers return
//!
//! [`SceneTranslator`] drives all translators for a whole scene.

mod error;

pub mod asset;
pub mod lamp;
pub mod scene;
pub mod texture;
pub mod translator;
pub mod world;

pub use asset::AssetHandler;
pub use error::{TranslateError, TranslateResult};
pub use lamp::LampTranslator;
pub use scene::{MAIN_ASSEMBLY, SceneTranslator};
pub use texture::TextureTranslator;
pub use translator::TranslatorBase;
pub use world::{SKY_EDF, SKY_ENVIRONMENT, SKY_SHADER, WorldTranslator};
