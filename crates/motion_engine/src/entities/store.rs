//! Entity state store
//!
//! Owns the ordered collection of entities for one mounted controller.
//! Insertion order is the star/skill list order and never changes between
//! reseeds. Mutation goes through closures so callers cannot keep references
//! across a [`EntityStore::replace_all`].

use std::collections::HashSet;
use std::fmt::Display;
use std::hash::Hash;

use crate::engine::EngineError;

/// Anything the store can hold
pub trait Entity {
    /// Stable identifier, unique within one store
    type Id: Clone + Eq + Hash + Display;

    /// Identifier of this entity
    fn id(&self) -> &Self::Id;
}

/// Ordered entity collection with atomic replace and in-place updates
#[derive(Debug, Clone)]
pub struct EntityStore<T: Entity> {
    entities: Vec<T>,
    generation: u64,
}

impl<T: Entity> EntityStore<T> {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            entities: Vec::new(),
            generation: 0,
        }
    }

    /// Current entities in insertion order
    pub fn entities(&self) -> &[T] {
        &self.entities
    }

    /// Number of entities
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Bumped on every [`replace_all`](Self::replace_all)
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Look up an entity by id
    pub fn get(&self, id: &T::Id) -> Option<&T> {
        self.entities.iter().find(|e| e.id() == id)
    }

    /// Owned copy of the current state
    pub fn snapshot(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.entities.clone()
    }

    /// Atomically swap in a new collection.
    ///
    /// The previous collection is kept when `entities` contains a duplicate id.
    pub fn replace_all(&mut self, entities: Vec<T>) -> Result<(), EngineError> {
        let mut seen = HashSet::with_capacity(entities.len());
        if let Some(dup) = entities.iter().find(|e| !seen.insert(e.id().clone())) {
            return Err(EngineError::DuplicateEntity(dup.id().to_string()));
        }

        self.entities = entities;
        self.generation += 1;
        Ok(())
    }

    /// Drop every entity
    pub fn clear(&mut self) {
        self.entities.clear();
        self.generation += 1;
    }

    /// Mutate one entity by id
    pub fn update<R>(&mut self, id: &T::Id, f: impl FnOnce(&mut T) -> R) -> Result<R, EngineError> {
        self.entities
            .iter_mut()
            .find(|e| e.id() == id)
            .map(f)
            .ok_or_else(|| EngineError::UnknownEntity(id.to_string()))
    }

    /// Mutate every entity matching `filter`, returning how many were touched
    pub fn update_where(
        &mut self,
        mut filter: impl FnMut(&T) -> bool,
        mut f: impl FnMut(&mut T),
    ) -> usize {
        let mut touched = 0;
        for entity in self.entities.iter_mut().filter(|e| filter(e)) {
            f(entity);
            touched += 1;
        }
        touched
    }

    /// Mutate the whole collection in place; its length cannot change
    pub fn with_all_mut<R>(&mut self, f: impl FnOnce(&mut [T]) -> R) -> R {
        f(&mut self.entities)
    }
}

impl<T: Entity> Default for EntityStore<T> {
    fn default() -> Self {
        Self::new()
    }
}
