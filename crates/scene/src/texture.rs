//! Texture references held by lights and worlds.

use serde::Deserialize;

/// Color space a texture file is stored in.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TextureColorSpace {
    LinearRgb,
    #[default]
    Srgb,
    Ciexyz,
}

impl TextureColorSpace {
    /// Renderer name of the color space.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LinearRgb => "linear_rgb",
            Self::Srgb => "srgb",
            Self::Ciexyz => "ciexyz",
        }
    }
}

/// A reference to an image texture datablock.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct TextureRef {
    /// Full datablock name, unique within the host file.
    pub name: String,
    /// Image path as stored by the host, possibly `//`-relative.
    pub filepath: String,
    #[serde(default)]
    pub color_space: TextureColorSpace,
}

impl TextureRef {
    /// Name of the renderer texture instance created for this texture.
    pub fn instance_name(&self) -> String {
        format!("{}_inst", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instance_name() {
        let tex = TextureRef {
            name: "cone_mask.png".to_owned(),
            filepath: "//tex/cone_mask.png".to_owned(),
            color_space: TextureColorSpace::Srgb,
        };
        assert_eq!(tex.instance_name(), "cone_mask.png_inst");
    }

    #[test]
    fn test_color_space_defaults_to_srgb() {
        let tex: TextureRef =
            serde_json::from_str(r#"{"name": "sky", "filepath": "/hdri/sky.exr"}"#).unwrap();
        assert_eq!(tex.color_space, TextureColorSpace::Srgb);
        assert_eq!(tex.color_space.as_str(), "srgb");
    }

    #[test]
    fn test_unknown_color_space_rejected() {
        let result: Result<TextureRef, _> = serde_json::from_str(
            r#"{"name": "sky", "filepath": "/hdri/sky.exr", "color_space": "aces"}"#,
        );
        assert!(result.is_err());
    }
}
