//! Block extraction: turn the contents of a boundary solid into a definition
//!
//! [`Extractor::run`] walks these stages:
//!
//! ```text
//! SelectBoundary -> ResolveLabel -> ValidateName -> QueryContents
//!                -> BuildDefinition -> Substitute -> Commit
//! ```
//!
//! Everything after `SelectBoundary` happens inside one [`Transaction`]. Any
//! error drops the transaction uncommitted, which restores the store, and is
//! reported as an [`Outcome`] naming the stage it came from.

pub mod containment;
pub mod definition;
pub mod label;
pub mod substitute;

pub use containment::query_contents;
pub use definition::{build_definition, BuiltDefinition};
pub use label::{resolve_label, Label, LabelQuery};
pub use substitute::substitute;

use std::fmt;

use tracing::{debug, info, info_span, warn};

use crate::config::ExtractConfig;
use crate::error::ExtractError;
use crate::geometry::{Category, EntityId, Extents, Owner};
use crate::store::{GeometryStore, StoreError, Transaction};

/// Steps of one extraction, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    SelectBoundary,
    ResolveLabel,
    ValidateName,
    QueryContents,
    BuildDefinition,
    Substitute,
    Commit,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::SelectBoundary => "select boundary",
            Stage::ResolveLabel => "resolve label",
            Stage::ValidateName => "validate name",
            Stage::QueryContents => "query contents",
            Stage::BuildDefinition => "build definition",
            Stage::Substitute => "substitute",
            Stage::Commit => "commit",
        };
        f.write_str(name)
    }
}

/// What a successful extraction changed
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    /// Name of the new definition, taken from the label
    pub name: String,
    /// Clones inside the definition, boundary first
    pub members: Vec<EntityId>,
    /// The instance that replaced the originals
    pub instance: EntityId,
    /// Original entities removed from the scene
    pub erased: Vec<EntityId>,
}

/// Result of one extraction attempt
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Created(Extraction),
    /// No boundary was selected
    Cancelled,
    /// The selected boundary is not a solid
    Rejected { id: EntityId, found: Category },
    LabelNotFound { layer: String },
    DuplicateName { name: String },
    /// Unexpected failure; the store was rolled back
    Failed { stage: Stage, detail: String },
}

impl Outcome {
    fn from_error(stage: Stage, err: ExtractError) -> Self {
        match err {
            ExtractError::NotASolid { id, found } => Outcome::Rejected { id, found },
            ExtractError::LabelNotFound { layer } => Outcome::LabelNotFound { layer },
            ExtractError::DuplicateName { name } => Outcome::DuplicateName { name },
            ExtractError::Store(e) => Outcome::Failed {
                stage,
                detail: e.to_string(),
            },
        }
    }

    pub fn is_created(&self) -> bool {
        matches!(self, Outcome::Created(_))
    }

    /// Message for the user, `None` when the outcome is silent
    pub fn message(&self) -> Option<String> {
        let message = match self {
            Outcome::Created(extraction) => {
                format!("Block '{}' created successfully", extraction.name)
            }
            Outcome::Cancelled => return None,
            Outcome::Rejected { id, found } => {
                ExtractError::NotASolid { id: *id, found: *found }.to_string()
            }
            Outcome::LabelNotFound { layer } => ExtractError::label_not_found(layer).to_string(),
            Outcome::DuplicateName { name } => ExtractError::duplicate(name).to_string(),
            Outcome::Failed { detail, .. } => {
                format!("An error occurred while creating the block: {}", detail)
            }
        };
        Some(message)
    }
}

/// Runs extractions with a fixed configuration
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    config: ExtractConfig,
}

fn at(stage: Stage) -> impl FnOnce(ExtractError) -> (Stage, ExtractError) {
    move |err| (stage, err)
}

impl Extractor {
    pub fn new(config: ExtractConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExtractConfig {
        &self.config
    }

    /// Extract the contents of `selection` into a new definition
    ///
    /// `None` means the user cancelled the boundary prompt. On anything other
    /// than [`Outcome::Created`] the store is left exactly as it was.
    pub fn run<S: GeometryStore>(&self, store: &mut S, selection: Option<EntityId>) -> Outcome {
        let Some(boundary) = selection else {
            debug!("boundary selection cancelled");
            return Outcome::Cancelled;
        };
        let _span = info_span!("extract_block", %boundary).entered();

        debug!(stage = %Stage::SelectBoundary);
        let region = match boundary_region(store, boundary) {
            Ok(region) => region,
            Err(err) => {
                warn!(stage = %Stage::SelectBoundary, error = %err, "boundary rejected");
                return Outcome::from_error(Stage::SelectBoundary, err);
            }
        };

        let mut tx = Transaction::begin(store);
        let result = self.extract(&mut *tx, boundary, region);
        match result {
            Ok(extraction) => {
                debug!(stage = %Stage::Commit);
                tx.commit();
                info!(
                    name = %extraction.name,
                    members = extraction.members.len(),
                    "block created"
                );
                Outcome::Created(extraction)
            }
            Err((stage, err)) => {
                tx.rollback();
                warn!(%stage, error = %err, "extraction aborted");
                Outcome::from_error(stage, err)
            }
        }
    }

    fn extract<S: GeometryStore>(
        &self,
        store: &mut S,
        boundary: EntityId,
        region: Extents,
    ) -> Result<Extraction, (Stage, ExtractError)> {
        debug!(stage = %Stage::ResolveLabel, corner = %region.min);
        let query = LabelQuery {
            layer: &self.config.marker_layer,
            tolerance: self.config.tolerance,
        };
        let label = resolve_label(store, &region.min, &query).map_err(at(Stage::ResolveLabel))?;

        debug!(stage = %Stage::ValidateName, name = %label.name);
        if store.has_definition(&label.name) {
            return Err((Stage::ValidateName, ExtractError::duplicate(&label.name)));
        }

        debug!(stage = %Stage::QueryContents, region = %region);
        let contents = query_contents(store, &region, &[boundary, label.id]);

        debug!(stage = %Stage::BuildDefinition, contents = contents.len());
        let built = build_definition(store, &label.name, region.min, boundary, &contents)
            .map_err(at(Stage::BuildDefinition))?;

        debug!(stage = %Stage::Substitute);
        let mut erased = Vec::with_capacity(contents.len() + 2);
        erased.push(boundary);
        erased.push(label.id);
        erased.extend_from_slice(&contents);
        let instance = substitute(store, &built.name, region.min, &erased)
            .map_err(at(Stage::Substitute))?;

        Ok(Extraction {
            name: built.name,
            members: built.members,
            instance,
            erased,
        })
    }
}

fn boundary_region<S: GeometryStore>(store: &S, id: EntityId) -> Result<Extents, ExtractError> {
    let entity = store.entity(id)?;
    if entity.owner != Owner::ModelSpace {
        return Err(StoreError::NotInModelSpace { id }.into());
    }
    let found = entity.category();
    if found != Category::Solid {
        return Err(ExtractError::NotASolid { id, found });
    }
    Ok(store.extents(id)?)
}
