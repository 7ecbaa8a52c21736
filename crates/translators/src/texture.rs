//! Image texture translation.
//!
//! Every texture a lamp or the world samples becomes a `disk_texture_2d`
//! texture plus a texture instance named `<texture>_inst`; parameters of
//! other entities reference the instance.

use std::sync::Arc;

use exporter_renderer::{Assembly, Handle, ParamMap, Texture, TextureInstance};
use exporter_scene::TextureRef;
use glam::Mat4;
use tracing::{Span, debug};

use crate::asset::AssetHandler;
use crate::error::{TranslateError, TranslateResult};
use crate::translator::TranslatorBase;

const TEXTURE_MODEL: &str = "disk_texture_2d";

#[derive(Debug)]
enum TextureEntities {
    NotCreated,
    Pending {
        texture: Texture,
        instance: TextureInstance,
    },
    Flushed {
        texture: Handle<Texture>,
        instance: Handle<TextureInstance>,
    },
}

/// Translates an image texture into a renderer texture and instance.
#[derive(Debug)]
pub struct TextureTranslator {
    base: TranslatorBase,
    texture: TextureRef,
    asset_handler: Arc<AssetHandler>,
    entities: TextureEntities,
}

impl TextureTranslator {
    pub fn new(texture: TextureRef, asset_handler: Arc<AssetHandler>, parent: &Span) -> Self {
        Self {
            base: TranslatorBase::new("texture", texture.name.clone(), parent),
            texture,
            asset_handler,
            entities: TextureEntities::NotCreated,
        }
    }

    pub fn appleseed_name(&self) -> &str {
        self.base.appleseed_name()
    }

    pub fn texture(&self) -> &TextureRef {
        &self.texture
    }

    pub fn create_entities(&mut self) -> TranslateResult<()> {
        let _span = self.base.span().enter();

        let filename = self.asset_handler.process_path(&self.texture.filepath);
        debug!("Creating texture from {}", filename);

        let texture = Texture::new(
            TEXTURE_MODEL,
            self.base.appleseed_name(),
            ParamMap::new()
                .with("filename", filename)
                .with("color_space", self.texture.color_space.as_str()),
        );

        let config = self.asset_handler.config();
        let instance = TextureInstance::new(
            self.texture.instance_name(),
            ParamMap::new()
                .with("addressing_mode", config.texture_addressing_mode.as_str())
                .with("filtering_mode", config.texture_filtering_mode.as_str()),
            self.base.appleseed_name(),
            Mat4::IDENTITY,
        );

        self.entities = TextureEntities::Pending { texture, instance };
        Ok(())
    }

    pub fn flush_entities(&mut self, assembly: &mut Assembly) -> TranslateResult<()> {
        let _span = self.base.span().enter();

        match std::mem::replace(&mut self.entities, TextureEntities::NotCreated) {
            TextureEntities::NotCreated => Err(TranslateError::NotCreated {
                translator: self.base.kind(),
                name: self.appleseed_name().to_owned(),
            }),
            flushed @ TextureEntities::Flushed { .. } => {
                self.entities = flushed;
                Err(TranslateError::AlreadyFlushed {
                    translator: self.base.kind(),
                    name: self.appleseed_name().to_owned(),
                })
            }
            TextureEntities::Pending { texture, instance } => {
                let vacant = assembly
                    .textures()
                    .check_vacant(&texture.name)
                    .and_then(|()| assembly.texture_instances().check_vacant(&instance.name));
                if let Err(err) = vacant {
                    self.entities = TextureEntities::Pending { texture, instance };
                    return Err(err.into());
                }

                let texture = assembly.textures_mut().insert(texture)?;
                let instance = assembly.texture_instances_mut().insert(instance)?;
                self.entities = TextureEntities::Flushed { texture, instance };
                Ok(())
            }
        }
    }

    /// Handle of the texture once flushed.
    pub fn texture_handle(&self) -> Option<Handle<Texture>> {
        match self.entities {
            TextureEntities::Flushed { texture, .. } => Some(texture),
            _ => None,
        }
    }

    /// Handle of the texture instance once flushed.
    pub fn instance_handle(&self) -> Option<Handle<TextureInstance>> {
        match self.entities {
            TextureEntities::Flushed { instance, .. } => Some(instance),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use exporter_core::ExportConfig;
    use exporter_scene::TextureColorSpace;

    use super::*;

    fn assets() -> Arc<AssetHandler> {
        Arc::new(AssetHandler::new(ExportConfig {
            blend_dir: PathBuf::from("/projects/shot"),
            texture_filtering_mode: "nearest".to_owned(),
            ..Default::default()
        }))
    }

    fn gobo() -> TextureRef {
        TextureRef {
            name: "gobo.png".to_owned(),
            filepath: "//textures/gobo.png".to_owned(),
            color_space: TextureColorSpace::LinearRgb,
        }
    }

    #[test]
    fn test_texture_and_instance() {
        let mut translator = TextureTranslator::new(gobo(), assets(), &Span::none());
        translator.create_entities().unwrap();

        let mut assembly = Assembly::new("assembly");
        translator.flush_entities(&mut assembly).unwrap();

        let texture = assembly.textures().entity_by_name("gobo.png").unwrap();
        assert_eq!(texture.model, "disk_texture_2d");
        assert_eq!(
            texture.params.get_str("filename"),
            Some("/projects/shot/textures/gobo.png")
        );
        assert_eq!(texture.params.get_str("color_space"), Some("linear_rgb"));

        let instance = assembly
            .texture_instances()
            .entity_by_name("gobo.png_inst")
            .unwrap();
        assert_eq!(instance.texture, "gobo.png");
        assert_eq!(instance.params.get_str("addressing_mode"), Some("wrap"));
        assert_eq!(instance.params.get_str("filtering_mode"), Some("nearest"));
        assert_eq!(instance.transform, Mat4::IDENTITY);
    }

    #[test]
    fn test_flush_rebinds_to_container_handles() {
        let mut translator = TextureTranslator::new(gobo(), assets(), &Span::none());
        translator.create_entities().unwrap();

        let mut assembly = Assembly::new("assembly");
        translator.flush_entities(&mut assembly).unwrap();

        assert_eq!(
            translator.texture_handle(),
            assembly.textures().get_by_name("gobo.png")
        );
        assert_eq!(
            translator.instance_handle(),
            assembly.texture_instances().get_by_name("gobo.png_inst")
        );
    }

    #[test]
    fn test_taken_instance_name_leaves_texture_pending() {
        let mut assembly = Assembly::new("assembly");
        assembly
            .texture_instances_mut()
            .insert(TextureInstance::new(
                "gobo.png_inst",
                ParamMap::new(),
                "other.png",
                Mat4::IDENTITY,
            ))
            .unwrap();

        let mut translator = TextureTranslator::new(gobo(), assets(), &Span::none());
        translator.create_entities().unwrap();
        assert!(matches!(
            translator.flush_entities(&mut assembly),
            Err(TranslateError::Renderer(_))
        ));
        assert!(assembly.textures().is_empty(), "No texture should be inserted");

        let mut clean = Assembly::new("assembly");
        translator.flush_entities(&mut clean).unwrap();
        assert!(translator.texture_handle().is_some());
    }
}
