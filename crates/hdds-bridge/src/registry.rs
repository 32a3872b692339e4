// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Entity registry.
//!
//! The caller addresses provider entities by [`InstanceHandle`]. The provider
//! registers each entity it exposes and unregisters it on deletion; boundary
//! functions resolve handles here with a typed lookup.

use std::sync::Arc;

use dashmap::DashMap;

use crate::error::{BridgeError, Result};
use crate::native::{
    DataReader, DataWriter, DomainParticipant, Entity, InstanceHandle, Publisher, Subscriber,
    Topic,
};

/// A registered provider entity.
#[derive(Clone)]
pub enum EntityRef {
    Participant(Arc<dyn DomainParticipant>),
    Topic(Arc<dyn Topic>),
    Publisher(Arc<dyn Publisher>),
    Subscriber(Arc<dyn Subscriber>),
    DataWriter(Arc<dyn DataWriter>),
    DataReader(Arc<dyn DataReader>),
}

impl EntityRef {
    pub fn instance_handle(&self) -> InstanceHandle {
        match self {
            EntityRef::Participant(e) => e.instance_handle(),
            EntityRef::Topic(e) => e.instance_handle(),
            EntityRef::Publisher(e) => e.instance_handle(),
            EntityRef::Subscriber(e) => e.instance_handle(),
            EntityRef::DataWriter(e) => e.instance_handle(),
            EntityRef::DataReader(e) => e.instance_handle(),
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            EntityRef::Participant(_) => "participant",
            EntityRef::Topic(_) => "topic",
            EntityRef::Publisher(_) => "publisher",
            EntityRef::Subscriber(_) => "subscriber",
            EntityRef::DataWriter(_) => "data writer",
            EntityRef::DataReader(_) => "data reader",
        }
    }
}

impl std::fmt::Debug for EntityRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.kind_name(), self.instance_handle())
    }
}

#[derive(Default)]
pub struct EntityRegistry {
    entities: DashMap<InstanceHandle, EntityRef>,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `entity` under its own instance handle.
    ///
    /// Returns the entity previously registered under that handle, if any.
    pub fn register(&self, entity: EntityRef) -> Option<EntityRef> {
        let handle = entity.instance_handle();
        log::debug!("[hdds-bridge] register {:?}", entity);
        let previous = self.entities.insert(handle, entity);
        if let Some(prev) = &previous {
            log::warn!("[hdds-bridge] {} re-registered (was {:?})", handle, prev);
        }
        previous
    }

    pub fn unregister(&self, handle: InstanceHandle) -> Option<EntityRef> {
        self.entities.remove(&handle).map(|(_, entity)| {
            log::debug!("[hdds-bridge] unregister {:?}", entity);
            entity
        })
    }

    pub fn get(&self, handle: InstanceHandle) -> Option<EntityRef> {
        self.entities.get(&handle).map(|e| e.value().clone())
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn participant(&self, handle: InstanceHandle) -> Result<Arc<dyn DomainParticipant>> {
        match self.get(handle) {
            Some(EntityRef::Participant(e)) => Ok(e),
            other => Err(mismatch(handle, other, "participant")),
        }
    }

    pub fn topic(&self, handle: InstanceHandle) -> Result<Arc<dyn Topic>> {
        match self.get(handle) {
            Some(EntityRef::Topic(e)) => Ok(e),
            other => Err(mismatch(handle, other, "topic")),
        }
    }

    pub fn publisher(&self, handle: InstanceHandle) -> Result<Arc<dyn Publisher>> {
        match self.get(handle) {
            Some(EntityRef::Publisher(e)) => Ok(e),
            other => Err(mismatch(handle, other, "publisher")),
        }
    }

    pub fn subscriber(&self, handle: InstanceHandle) -> Result<Arc<dyn Subscriber>> {
        match self.get(handle) {
            Some(EntityRef::Subscriber(e)) => Ok(e),
            other => Err(mismatch(handle, other, "subscriber")),
        }
    }

    pub fn data_writer(&self, handle: InstanceHandle) -> Result<Arc<dyn DataWriter>> {
        match self.get(handle) {
            Some(EntityRef::DataWriter(e)) => Ok(e),
            other => Err(mismatch(handle, other, "data writer")),
        }
    }

    pub fn data_reader(&self, handle: InstanceHandle) -> Result<Arc<dyn DataReader>> {
        match self.get(handle) {
            Some(EntityRef::DataReader(e)) => Ok(e),
            other => Err(mismatch(handle, other, "data reader")),
        }
    }
}

fn mismatch(handle: InstanceHandle, found: Option<EntityRef>, expected: &str) -> BridgeError {
    match found {
        Some(entity) => log::debug!(
            "[hdds-bridge] {} is a {}, expected a {}",
            handle,
            entity.kind_name(),
            expected
        ),
        None => log::debug!("[hdds-bridge] no {} registered as {}", expected, handle),
    }
    BridgeError::UnknownEntity(handle)
}
