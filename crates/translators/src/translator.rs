//! State and helpers shared by all translators.

use glam::{Mat4, Vec3};
use tracing::Span;

/// Naming and logging context of a single translator.
///
/// The translator's span is created as a child of the span passed in by
/// whoever drives the export, so every log line a translator emits carries
/// its kind and entity name.
#[derive(Debug, Clone)]
pub struct TranslatorBase {
    kind: &'static str,
    name: String,
    span: Span,
}

impl TranslatorBase {
    pub fn new(kind: &'static str, name: impl Into<String>, parent: &Span) -> Self {
        let name = name.into();
        let span = tracing::debug_span!(parent: parent, "translator", kind, name = %name);
        Self { kind, name, span }
    }

    /// Name of the primary renderer entity created by this translator.
    pub fn appleseed_name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &'static str {
        self.kind
    }

    pub fn span(&self) -> &Span {
        &self.span
    }

    /// Convert a host color to renderer RGB.
    ///
    /// The renderer rejects negative and non-finite components, which hosts
    /// allow through drivers and animation curves; those are clamped to zero.
    pub fn convert_color(color: Vec3) -> Vec3 {
        let clamp = |v: f32| if v.is_finite() { v.max(0.0) } else { 0.0 };
        Vec3::new(clamp(color.x), clamp(color.y), clamp(color.z))
    }

    /// Convert a host world matrix to a renderer transform.
    ///
    /// Both sides use right-handed, column-major matrices, so this is a copy.
    pub fn convert_matrix(matrix: Mat4) -> Mat4 {
        matrix
    }
}
