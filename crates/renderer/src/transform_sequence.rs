//! Time-indexed transforms for motion blur.

use glam::Mat4;
use serde::Serialize;

/// Transforms keyed by shutter time, kept sorted by time.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TransformSequence {
    keys: Vec<(f32, Mat4)>,
}

impl TransformSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the transform at `time`, replacing any key already at that time.
    pub fn set_transform(&mut self, time: f32, transform: Mat4) {
        match self.keys.binary_search_by(|(t, _)| t.total_cmp(&time)) {
            Ok(index) => self.keys[index].1 = transform,
            Err(index) => self.keys.insert(index, (time, transform)),
        }
    }

    /// The transform recorded at exactly `time`.
    pub fn get(&self, time: f32) -> Option<Mat4> {
        self.keys
            .binary_search_by(|(t, _)| t.total_cmp(&time))
            .ok()
            .map(|index| self.keys[index].1)
    }

    /// Keys in ascending time order.
    pub fn iter(&self) -> impl Iterator<Item = (f32, Mat4)> + '_ {
        self.keys.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
