//! Transform helpers for host object matrices.
//!
//! Host objects carry a world matrix; [`Transform`] decomposes and rebuilds
//! such matrices and provides the sky orientation used by the world export.
//!
//! # Example
//!
//! ```
//! use exporter_scene::Transform;
//! use glam::Vec3;
//!
//! let lamp = Transform::new()
//!     .with_position(Vec3::new(0.0, 0.0, 4.0))
//!     .with_scale(Vec3::splat(0.5));
//!
//! let matrix = lamp.matrix();
//! assert_eq!(matrix.transform_point3(Vec3::ZERO), Vec3::new(0.0, 0.0, 4.0));
//! ```

use glam::{Mat4, Quat, Vec3};

/// A transform representing position, rotation, and scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Create a new transform at the origin.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decompose a host world matrix.
    pub fn from_matrix(matrix: Mat4) -> Self {
        let (scale, rotation, position) = matrix.to_scale_rotation_translation();
        Self {
            position,
            rotation,
            scale,
        }
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// The transformation matrix (scale, then rotation, then translation).
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }

    /// Orientation of the sky dome.
    ///
    /// Rotates by `vertical` degrees about +X and `horizontal` degrees about
    /// +Y; the horizontal rotation is applied first.
    pub fn sky_rotation(vertical: f32, horizontal: f32) -> Mat4 {
        let vertical_shift = Mat4::from_axis_angle(Vec3::X, vertical.to_radians());
        let horizontal_shift = Mat4::from_axis_angle(Vec3::Y, horizontal.to_radians());
        vertical_shift * horizontal_shift
    }
}
