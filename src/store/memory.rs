//! In-memory geometry store

use std::collections::BTreeMap;
use std::fmt;

use crate::geometry::{Category, Entity, EntityId, Extents, Geometry, Owner, Point3};

use super::{Definition, GeometryStore, StoreError};

/// An instance was reached again while resolving its own definition
struct Cycle;

/// A complete geometry store held in memory
///
/// Entities are kept in id order, which is also creation order, so queries
/// return results in the order entities were added. Definition names are
/// compared case-insensitively.
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryStore {
    entities: BTreeMap<EntityId, Entity>,
    /// Keyed by the lowercased name
    definitions: BTreeMap<String, Definition>,
    next_id: u64,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self {
            entities: BTreeMap::new(),
            definitions: BTreeMap::new(),
            next_id: 1,
        }
    }
}

fn name_key(name: &str) -> String {
    name.to_lowercase()
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entity to model space
    pub fn add_entity(&mut self, layer: impl Into<String>, geometry: Geometry) -> EntityId {
        let id = self.allocate_id();
        self.entities.insert(
            id,
            Entity {
                id,
                owner: Owner::ModelSpace,
                layer: layer.into(),
                geometry,
            },
        );
        id
    }

    /// Append a new entity directly to an existing definition
    pub fn add_to_definition(
        &mut self,
        definition: &str,
        layer: impl Into<String>,
        geometry: Geometry,
    ) -> Result<EntityId, StoreError> {
        let owner = self.definition(definition)?.name.clone();
        let id = self.allocate_id();
        self.entities.insert(
            id,
            Entity {
                id,
                owner: Owner::Definition(owner),
                layer: layer.into(),
                geometry,
            },
        );
        self.definition_mut(definition)?.entities.push(id);
        Ok(id)
    }

    /// Live model-space entities in store order
    pub fn model_space(&self) -> impl Iterator<Item = &Entity> {
        self.entities
            .values()
            .filter(|e| e.owner == Owner::ModelSpace)
    }

    /// Registered definitions, ordered by name
    pub fn definitions(&self) -> impl Iterator<Item = &Definition> {
        self.definitions.values()
    }

    /// Model-space instances of a definition
    pub fn instances_of<'a>(&'a self, definition: &str) -> impl Iterator<Item = &'a Entity> {
        let key = name_key(definition);
        self.model_space().filter(move |e| {
            matches!(&e.geometry, Geometry::Instance { definition: d, .. } if name_key(d) == key)
        })
    }

    /// Whether an entity with this id is live
    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(&id)
    }

    fn allocate_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    fn definition_mut(&mut self, name: &str) -> Result<&mut Definition, StoreError> {
        self.definitions
            .get_mut(&name_key(name))
            .ok_or_else(|| StoreError::DefinitionNotFound {
                name: name.to_string(),
            })
    }

    /// Name of a definition that contains an instance of itself, directly
    /// or through other definitions
    pub fn find_cycle(&self) -> Option<&str> {
        self.definitions
            .values()
            .find(|def| {
                self.instance_extents(&def.name, &def.origin, &mut Vec::new())
                    .is_err()
            })
            .map(|def| def.name.as_str())
    }

    fn resolved_extents(&self, entity: &Entity) -> Option<Extents> {
        self.entity_extents(entity, &mut Vec::new()).ok().flatten()
    }

    fn entity_extents(
        &self,
        entity: &Entity,
        visiting: &mut Vec<String>,
    ) -> Result<Option<Extents>, Cycle> {
        match &entity.geometry {
            Geometry::Instance {
                definition,
                position,
            } => self.instance_extents(definition, position, visiting),
            geometry => Ok(geometry.local_extents()),
        }
    }

    /// `visiting` holds the definitions currently being resolved
    fn instance_extents(
        &self,
        definition: &str,
        position: &Point3,
        visiting: &mut Vec<String>,
    ) -> Result<Option<Extents>, Cycle> {
        let key = name_key(definition);
        if visiting.contains(&key) {
            return Err(Cycle);
        }
        let Some(def) = self.definitions.get(&key) else {
            return Ok(None);
        };

        visiting.push(key);
        let mut extents: Option<Extents> = None;
        for member in def.entities.iter().filter_map(|id| self.entities.get(id)) {
            if let Some(ext) = self.entity_extents(member, visiting)? {
                extents = Some(match extents {
                    Some(acc) => acc.union(&ext),
                    None => ext,
                });
            }
        }
        visiting.pop();

        Ok(extents.map(|ext| ext.translated(&def.origin, position)))
    }
}

impl GeometryStore for MemoryStore {
    type Savepoint = MemoryStore;

    fn entity(&self, id: EntityId) -> Result<&Entity, StoreError> {
        self.entities
            .get(&id)
            .ok_or(StoreError::EntityNotFound { id })
    }

    fn extents(&self, id: EntityId) -> Result<Extents, StoreError> {
        let entity = self.entity(id)?;
        self.resolved_extents(entity)
            .ok_or(StoreError::NoExtents { id })
    }

    fn entities_on_layer(&self, layer: &str, category: Category) -> Vec<EntityId> {
        self.model_space()
            .filter(|e| e.category() == category && e.layer.eq_ignore_ascii_case(layer))
            .map(|e| e.id)
            .collect()
    }

    fn select_crossing(&self, region: &Extents) -> Vec<EntityId> {
        self.model_space()
            .filter(|e| {
                self.resolved_extents(e)
                    .is_some_and(|ext| ext.intersects(region))
            })
            .map(|e| e.id)
            .collect()
    }

    fn has_definition(&self, name: &str) -> bool {
        self.definitions.contains_key(&name_key(name))
    }

    fn definition(&self, name: &str) -> Result<&Definition, StoreError> {
        self.definitions
            .get(&name_key(name))
            .ok_or_else(|| StoreError::DefinitionNotFound {
                name: name.to_string(),
            })
    }

    fn create_definition(&mut self, name: &str, origin: Point3) -> Result<(), StoreError> {
        if name.trim().is_empty() {
            return Err(StoreError::rejected(
                "create definition",
                "definition name is empty",
            ));
        }
        let key = name_key(name);
        if self.definitions.contains_key(&key) {
            return Err(StoreError::DuplicateDefinition {
                name: name.to_string(),
            });
        }
        self.definitions.insert(key, Definition::new(name, origin));
        Ok(())
    }

    fn clone_into(&mut self, id: EntityId, definition: &str) -> Result<EntityId, StoreError> {
        let source = self.entity(id)?;
        let layer = source.layer.clone();
        let geometry = source.geometry.clone();
        self.add_to_definition(definition, layer, geometry)
    }

    fn insert_instance(
        &mut self,
        definition: &str,
        position: Point3,
    ) -> Result<EntityId, StoreError> {
        let name = self.definition(definition)?.name.clone();
        Ok(self.add_entity(
            "0",
            Geometry::Instance {
                definition: name,
                position,
            },
        ))
    }

    fn erase(&mut self, id: EntityId) -> Result<(), StoreError> {
        let entity = self
            .entities
            .remove(&id)
            .ok_or(StoreError::EntityNotFound { id })?;
        if let Owner::Definition(name) = &entity.owner {
            if let Some(def) = self.definitions.get_mut(&name_key(name)) {
                def.entities.retain(|member| *member != id);
            }
        }
        Ok(())
    }

    fn savepoint(&self) -> MemoryStore {
        self.clone()
    }

    fn restore(&mut self, savepoint: MemoryStore) {
        *self = savepoint;
    }
}

impl fmt::Display for MemoryStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "model space:")?;
        for entity in self.model_space() {
            writeln!(f, "  {} [{}] {}", entity.id, entity.layer, entity.geometry)?;
        }
        for def in self.definitions.values() {
            writeln!(f, "definition '{}' at {}:", def.name, def.origin)?;
            for entity in def.entities.iter().filter_map(|id| self.entities.get(id)) {
                writeln!(f, "  {} [{}] {}", entity.id, entity.layer, entity.geometry)?;
            }
        }
        Ok(())
    }
}
