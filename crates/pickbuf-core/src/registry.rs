//! Mapping from pick colors back to scene objects.

use std::collections::HashMap;

use crate::error::{PickError, Result};
use crate::pick::{index_to_color, PackedColor, MAX_PICK_INDEX};

/// Looks up the object a pick color was assigned to.
pub trait ObjectRegistry {
    /// Handle returned for a resolved color.
    type Object;

    /// Returns the object drawn with `color`, if any.
    ///
    /// Must not have side effects; resolvers may call it many times per probe.
    fn resolve_color(&self, color: PackedColor) -> Option<Self::Object>;

    /// Number of pick identifiers ever issued.
    ///
    /// Bulk picks size their palette from this, so it must be at least the
    /// number of distinct colors that can appear in a single readback.
    fn identifier_count(&self) -> usize;
}

impl<R: ObjectRegistry + ?Sized> ObjectRegistry for &R {
    type Object = R::Object;

    fn resolve_color(&self, color: PackedColor) -> Option<Self::Object> {
        (**self).resolve_color(color)
    }

    fn identifier_count(&self) -> usize {
        (**self).identifier_count()
    }
}

/// Registry that hands out sequential pick colors.
///
/// Identifiers start at 1 and are never reused, so removed objects keep
/// counting toward [`ObjectRegistry::identifier_count`]. At most
/// [`MAX_PICK_INDEX`] objects can be registered over the registry's lifetime.
#[derive(Debug, Clone)]
pub struct PickRegistry<T> {
    objects: HashMap<PackedColor, T>,
    next_id: u32,
}

impl<T> Default for PickRegistry<T> {
    fn default() -> Self {
        Self {
            objects: HashMap::new(),
            next_id: 1,
        }
    }
}

impl<T> PickRegistry<T> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns a fresh pick color to `object` and returns it.
    ///
    /// Fails with [`PickError::PickIdsExhausted`] once every color is taken.
    pub fn register(&mut self, object: T) -> Result<PackedColor> {
        if self.next_id > MAX_PICK_INDEX {
            return Err(PickError::PickIdsExhausted { max: MAX_PICK_INDEX });
        }
        let color = index_to_color(self.next_id);
        self.next_id += 1;
        self.objects.insert(color, object);
        Ok(color)
    }

    /// Removes the object assigned to `color`.
    pub fn remove(&mut self, color: PackedColor) -> Option<T> {
        self.objects.remove(&color)
    }

    /// Gets the object assigned to `color`.
    pub fn get(&self, color: PackedColor) -> Option<&T> {
        self.objects.get(&color)
    }

    /// Number of live objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Returns true if no objects are registered.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Removes all objects. Identifiers keep counting from where they were.
    pub fn clear(&mut self) {
        self.objects.clear();
    }
}

impl<T: Clone> ObjectRegistry for PickRegistry<T> {
    type Object = T;

    fn resolve_color(&self, color: PackedColor) -> Option<T> {
        self.objects.get(&color).cloned()
    }

    fn identifier_count(&self) -> usize {
        (self.next_id - 1) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pick::color_to_index;

    #[test]
    fn test_register_assigns_distinct_colors() {
        let mut registry = PickRegistry::new();
        let a = registry.register("a").unwrap();
        let b = registry.register("b").unwrap();
        assert_ne!(a, b);
        assert_ne!(a, PackedColor::BACKGROUND);
        assert_eq!(registry.resolve_color(a), Some("a"));
        assert_eq!(registry.resolve_color(b), Some("b"));
        assert_eq!(registry.resolve_color(PackedColor::BACKGROUND), None);
    }

    #[test]
    fn test_identifier_count_survives_removal() {
        let mut registry = PickRegistry::new();
        let a = registry.register(1).unwrap();
        registry.register(2).unwrap();
        assert_eq!(registry.remove(a), Some(1));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.identifier_count(), 2);
        registry.clear();
        assert!(registry.is_empty());
        assert_eq!(registry.identifier_count(), 2);
        assert_eq!(registry.resolve_color(a), None);
    }

    #[test]
    fn test_register_fails_when_ids_run_out() {
        let mut registry = PickRegistry::new();
        let first = registry.register("first").unwrap();
        registry.next_id = MAX_PICK_INDEX;
        let last = registry.register("last").unwrap();
        assert_eq!(color_to_index(last), Some(MAX_PICK_INDEX));

        assert!(matches!(
            registry.register("later"),
            Err(PickError::PickIdsExhausted { max: MAX_PICK_INDEX })
        ));
        assert_eq!(registry.resolve_color(first), Some("first"));
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.identifier_count(), MAX_PICK_INDEX as usize);
    }

    #[test]
    fn test_registry_by_reference() {
        let mut registry = PickRegistry::new();
        let color = registry.register(42).unwrap();
        let by_ref = &registry;
        assert_eq!(ObjectRegistry::resolve_color(&by_ref, color), Some(42));
        assert_eq!(ObjectRegistry::identifier_count(&by_ref), 1);
    }
}
