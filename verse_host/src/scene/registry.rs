/// SceneRegistry — ordered slide index -> scene factory table.
///
/// A pure, data-driven lookup: adding a new verse means appending one
/// factory, not editing a central conditional. The registry holds no
/// other state; the Host clamps indices before calling `get`.

use crate::error::{Error, Result};
use super::scene::SceneFactory;

/// Ordered collection of scene factories, one per slide
pub struct SceneRegistry {
    factories: Vec<SceneFactory>,
}

impl SceneRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            factories: Vec::new(),
        }
    }

    /// Append a factory. Its slide index is its registration order.
    pub fn register<F>(&mut self, factory: F)
    where
        F: Fn(&mut super::SceneContext<'_>) -> Result<Box<dyn super::Scene>> + 'static,
    {
        self.factories.push(Box::new(factory));
    }

    /// Number of registered slides
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Whether no factories are registered
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Get the factory for a slide index.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] when `index` is outside the valid
    /// slide count.
    pub fn get(&self, index: usize) -> Result<&SceneFactory> {
        self.factories.get(index).ok_or(Error::OutOfRange {
            index,
            len: self.factories.len(),
        })
    }
}

impl Default for SceneRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
