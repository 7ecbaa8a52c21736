//! Arena containers owning renderer entities.
//!
//! Inserting an entity moves it into the container, which becomes its only
//! owner. The returned [`Handle`] is the authoritative way to reach the
//! entity afterwards; [`Container::get_by_name`] resolves a name to the same
//! handle.
//!
//! # Example
//!
//! ```
//! use exporter_renderer::{ColorEntity, ColorSpace, Container};
//! use glam::Vec3;
//!
//! let mut colors = Container::new();
//! let handle = colors
//!     .insert(ColorEntity::new("Lamp_radiance", ColorSpace::LinearRgb, Vec3::ONE))
//!     .unwrap();
//!
//! assert_eq!(colors.get_by_name("Lamp_radiance"), Some(handle));
//! assert_eq!(colors.get(handle).unwrap().values, Vec3::ONE);
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use indexmap::IndexMap;
use indexmap::map::Entry;
use serde::{Serialize, Serializer};
use tracing::trace;

use crate::entity::Entity;
use crate::error::{RendererError, RendererResult};

/// Typed index of an entity inside a [`Container`].
pub struct Handle<T> {
    index: usize,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Handle<T> {
    fn new(index: usize) -> Self {
        Self {
            index,
            _marker: PhantomData,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }
}

impl<T> Clone for Handle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Handle<T> {}

impl<T> PartialEq for Handle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl<T> Eq for Handle<T> {}

impl<T> Hash for Handle<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state);
    }
}

impl<T> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Handle").field(&self.index).finish()
    }
}

/// A name-indexed arena of entities, kept in insertion order.
pub struct Container<T> {
    entities: IndexMap<String, T>,
}

impl<T> Default for Container<T> {
    fn default() -> Self {
        Self {
            entities: IndexMap::new(),
        }
    }
}

impl<T: Entity> Container<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of `entity`.
    ///
    /// Fails without modifying the container if an entity with the same
    /// name is already present.
    pub fn insert(&mut self, entity: T) -> RendererResult<Handle<T>> {
        match self.entities.entry(entity.name().to_owned()) {
            Entry::Occupied(entry) => Err(RendererError::DuplicateName {
                container: T::KIND,
                name: entry.key().clone(),
            }),
            Entry::Vacant(entry) => {
                let index = entry.index();
                trace!("Inserted {} '{}' at {}", T::KIND, entry.key(), index);
                entry.insert(entity);
                Ok(Handle::new(index))
            }
        }
    }

    /// Fail with the error [`Container::insert`] would return if `name` is
    /// already taken.
    pub fn check_vacant(&self, name: &str) -> RendererResult<()> {
        if self.entities.contains_key(name) {
            return Err(RendererError::DuplicateName {
                container: T::KIND,
                name: name.to_owned(),
            });
        }
        Ok(())
    }

    /// Resolve a name to the handle of the owned entity.
    pub fn get_by_name(&self, name: &str) -> Option<Handle<T>> {
        self.entities.get_index_of(name).map(Handle::new)
    }

    pub fn get(&self, handle: Handle<T>) -> Option<&T> {
        self.entities.get_index(handle.index).map(|(_, entity)| entity)
    }

    pub fn get_mut(&mut self, handle: Handle<T>) -> Option<&mut T> {
        self.entities
            .get_index_mut(handle.index)
            .map(|(_, entity)| entity)
    }

    /// Like [`Container::get`], but reports a foreign handle as an error.
    pub fn try_get(&self, handle: Handle<T>) -> RendererResult<&T> {
        self.get(handle).ok_or(RendererError::InvalidHandle {
            container: T::KIND,
            index: handle.index,
        })
    }

    /// Like [`Container::get_mut`], but reports a foreign handle as an error.
    pub fn try_get_mut(&mut self, handle: Handle<T>) -> RendererResult<&mut T> {
        let index = handle.index;
        self.get_mut(handle).ok_or(RendererError::InvalidHandle {
            container: T::KIND,
            index,
        })
    }

    /// Look up an entity directly by name.
    pub fn entity_by_name(&self, name: &str) -> Option<&T> {
        self.entities.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entities.contains_key(name)
    }

    /// Entities in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entities.values()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl<T: fmt::Debug> fmt::Debug for Container<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.entities.values()).finish()
    }
}

impl<T: Serialize> Serialize for Container<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.entities.values())
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::entity::{ColorEntity, ColorSpace};

    fn color(name: &str) -> ColorEntity {
        ColorEntity::new(name, ColorSpace::LinearRgb, Vec3::ONE)
    }

    #[test]
    fn test_insert_and_lookup() {
        let mut colors = Container::new();
        let a = colors.insert(color("a")).unwrap();
        let b = colors.insert(color("b")).unwrap();

        assert_ne!(a, b);
        assert_eq!(colors.len(), 2);
        assert_eq!(colors.get_by_name("a"), Some(a));
        assert_eq!(colors.get_by_name("b"), Some(b));
        assert_eq!(colors.get(b).unwrap().name, "b");
        assert!(colors.get_by_name("c").is_none());
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut colors = Container::new();
        colors.insert(color("Lamp_radiance")).unwrap();

        let err = colors.insert(color("Lamp_radiance")).unwrap_err();
        assert_eq!(
            err,
            RendererError::DuplicateName {
                container: "color",
                name: "Lamp_radiance".to_owned(),
            }
        );
        assert_eq!(colors.len(), 1);
    }

    #[test]
    fn test_failed_insert_keeps_handles() {
        let mut colors = Container::new();
        let a = colors.insert(color("a")).unwrap();
        assert!(colors.insert(color("a")).is_err());
        let b = colors.insert(color("b")).unwrap();

        assert_eq!(b.index(), 1);
        assert_eq!(colors.get(a).unwrap().name, "a");
        assert_eq!(colors.get_by_name("b"), Some(b));
    }

    #[test]
    fn test_check_vacant() {
        let mut colors = Container::new();
        colors.insert(color("a")).unwrap();

        assert!(colors.check_vacant("b").is_ok());
        assert!(matches!(
            colors.check_vacant("a"),
            Err(RendererError::DuplicateName { container: "color", .. })
        ));
    }

    #[test]
    fn test_foreign_handle() {
        let mut big = Container::new();
        big.insert(color("a")).unwrap();
        let foreign = big.insert(color("b")).unwrap();

        let small: Container<ColorEntity> = Container::new();
        assert!(small.get(foreign).is_none());
        assert!(matches!(
            small.try_get(foreign),
            Err(RendererError::InvalidHandle { index: 1, .. })
        ));
    }

    #[test]
    fn test_mutation_through_handle() {
        let mut colors = Container::new();
        let handle = colors.insert(color("a")).unwrap();
        colors.get_mut(handle).unwrap().values = Vec3::ZERO;

        assert_eq!(colors.entity_by_name("a").unwrap().values, Vec3::ZERO);
    }

    #[test]
    fn test_iter_in_insertion_order() {
        let mut colors = Container::new();
        for name in ["zenith", "horizon"] {
            colors.insert(color(name)).unwrap();
        }
        let names: Vec<_> = colors.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["zenith", "horizon"]);
    }
}
