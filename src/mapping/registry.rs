use std::collections::HashMap;

use oxrdf::{NamedNode, Triple};
use tracing::warn;

use super::mappers::{
    ActivityMapper, AddressMapper, CodeMapper, ContactMapper, NameMapper, OrganizationMapper,
    SiteMapper,
};
use super::{RecordKind, RecordMapper, Row};
use crate::ids::IdBuilder;

/// Mapper per record kind, sharing one identifier builder
pub struct MapperRegistry {
    ids: IdBuilder,
    mappers: HashMap<RecordKind, Box<dyn RecordMapper>>,
}

impl MapperRegistry {
    /// Create a registry with the mappers of every register file
    pub fn new(ids: IdBuilder) -> Self {
        let mut registry = Self {
            ids,
            mappers: HashMap::new(),
        };

        registry.register(Box::new(OrganizationMapper));
        registry.register(Box::new(NameMapper));
        registry.register(Box::new(SiteMapper));
        registry.register(Box::new(ContactMapper));
        registry.register(Box::new(AddressMapper));
        registry.register(Box::new(ActivityMapper));
        registry.register(Box::new(CodeMapper));

        registry
    }

    /// Register a mapper, replacing the one of the same kind
    pub fn register(&mut self, mapper: Box<dyn RecordMapper>) {
        self.mappers.insert(mapper.kind(), mapper);
    }

    pub fn get_mapper(&self, kind: RecordKind) -> Option<&dyn RecordMapper> {
        self.mappers.get(&kind).map(|m| m.as_ref())
    }

    /// Statements of a row
    pub fn map(&self, kind: RecordKind, row: &Row) -> Vec<Triple> {
        match self.get_mapper(kind) {
            Some(mapper) => mapper.map(&self.ids, row),
            None => {
                warn!("No mapper registered for {}", kind);
                Vec::new()
            }
        }
    }

    /// Identifier a row would be the subject of, without building its statements
    pub fn subject(&self, kind: RecordKind, row: &Row) -> Option<NamedNode> {
        match self.get_mapper(kind) {
            Some(mapper) => mapper.subject(&self.ids, row),
            None => {
                warn!("No mapper registered for {}", kind);
                None
            }
        }
    }

    /// List all registered record kinds
    pub fn list_kinds(&self) -> Vec<RecordKind> {
        RecordKind::ALL
            .into_iter()
            .filter(|kind| self.mappers.contains_key(kind))
            .collect()
    }
}
