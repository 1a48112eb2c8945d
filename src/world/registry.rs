//! Entity registry resolving host handles to typed entity kinds.
//!
//! Hosts register every wall, agent, target and base once when the episode
//! is set up. Contact reports then carry only a handle, and the kind and
//! team are looked up here instead of being re-derived from tags each tick.

use std::collections::HashMap;

use log::warn;

use super::types::TeamId;
use crate::error::CoreError;

/// Opaque handle the host uses to name one of its entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityHandle(pub u64);

/// What kind of thing an entity is, resolved once at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Wall,
    Agent(TeamId),
    Target,
    Base(TeamId),
}

/// Handle → kind lookup table for one episode.
#[derive(Debug, Clone, Default)]
pub struct EntityRegistry {
    kinds: HashMap<EntityHandle, EntityKind>,
}

impl EntityRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an entity.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::DuplicateEntity`] if the handle is already known.
    pub fn register(&mut self, handle: EntityHandle, kind: EntityKind) -> Result<(), CoreError> {
        if self.kinds.contains_key(&handle) {
            return Err(CoreError::DuplicateEntity(handle));
        }
        self.kinds.insert(handle, kind);
        Ok(())
    }

    /// Resolves a handle, logging unknown ones.
    pub fn resolve(&self, handle: EntityHandle) -> Option<EntityKind> {
        let kind = self.kinds.get(&handle).copied();
        if kind.is_none() {
            warn!("Contact with unregistered entity {:?}", handle);
        }
        kind
    }

    /// Drops every registration, e.g. at episode teardown.
    pub fn clear(&mut self) {
        self.kinds.clear();
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}
