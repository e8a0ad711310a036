//! TOML scene fixtures
//!
//! A scene describes the contents of a [`MemoryStore`]: model-space entities
//! and named definitions with their members.
//!
//! ```toml
//! [[definition]]
//! name = "Bolt"
//! origin = [0, 0, 0]
//!
//! [[definition.entity]]
//! kind = "circle"
//! center = [0, 0, 0]
//! radius = 0.1
//!
//! [[entity]]
//! kind = "solid"
//! min = [0, 0, 0]
//! max = [1, 1, 1]
//!
//! [[entity]]
//! kind = "text"
//! layer = "block_title"
//! position = [0, 0, 0]
//! content = "Widget"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::{Geometry, Point3};

use super::{GeometryStore, MemoryStore, StoreError};

/// Errors that can occur when loading or saving scenes
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("Failed to read scene file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse scene TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Failed to serialize scene: {0}")]
    SerializeError(#[from] toml::ser::Error),
    #[error("instance refers to unknown definition '{name}'")]
    UnknownDefinition { name: String },
    #[error("definition '{name}' contains an instance of itself")]
    CyclicDefinition { name: String },
    #[error("invalid scene: {0}")]
    Store(#[from] StoreError),
}

/// Serializable description of a store
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Scene {
    #[serde(default, rename = "definition", skip_serializing_if = "Vec::is_empty")]
    pub definitions: Vec<SceneDefinition>,
    #[serde(default, rename = "entity", skip_serializing_if = "Vec::is_empty")]
    pub entities: Vec<SceneEntity>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDefinition {
    pub name: String,
    #[serde(default)]
    pub origin: Point3,
    #[serde(default, rename = "entity", skip_serializing_if = "Vec::is_empty")]
    pub entities: Vec<SceneEntity>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneEntity {
    #[serde(default = "default_layer")]
    pub layer: String,
    #[serde(flatten)]
    pub geometry: Geometry,
}

fn default_layer() -> String {
    "0".to_string()
}

impl Scene {
    /// Load a scene from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, SceneError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load a scene from a TOML string
    pub fn from_str(content: &str) -> Result<Self, SceneError> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml(&self) -> Result<String, SceneError> {
        Ok(toml::to_string(self)?)
    }
}

impl MemoryStore {
    /// Build a store from a scene
    ///
    /// Ids are assigned from 1 in file order: definition members first, then
    /// model space.
    pub fn from_scene(scene: &Scene) -> Result<Self, SceneError> {
        let mut store = MemoryStore::new();
        for def in &scene.definitions {
            store.create_definition(&def.name, def.origin)?;
            for member in &def.entities {
                store.add_to_definition(&def.name, member.layer.clone(), member.geometry.clone())?;
            }
        }
        for entity in &scene.entities {
            store.add_entity(entity.layer.clone(), entity.geometry.clone());
        }

        let all = scene
            .definitions
            .iter()
            .flat_map(|d| d.entities.iter())
            .chain(scene.entities.iter());
        for entity in all {
            if let Geometry::Instance { definition, .. } = &entity.geometry {
                if !store.has_definition(definition) {
                    return Err(SceneError::UnknownDefinition {
                        name: definition.clone(),
                    });
                }
            }
        }
        if let Some(name) = store.find_cycle() {
            return Err(SceneError::CyclicDefinition {
                name: name.to_string(),
            });
        }
        Ok(store)
    }

    /// Describe the store as a scene
    pub fn to_scene(&self) -> Scene {
        let record = |id| {
            self.entity(id).ok().map(|e| SceneEntity {
                layer: e.layer.clone(),
                geometry: e.geometry.clone(),
            })
        };
        Scene {
            definitions: self
                .definitions()
                .map(|def| SceneDefinition {
                    name: def.name.clone(),
                    origin: def.origin,
                    entities: def.entities.iter().filter_map(|id| record(*id)).collect(),
                })
                .collect(),
            entities: self
                .model_space()
                .map(|e| SceneEntity {
                    layer: e.layer.clone(),
                    geometry: e.geometry.clone(),
                })
                .collect(),
        }
    }
}
