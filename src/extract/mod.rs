//! Structural graph extraction from loosely formatted specification documents.
//!
//! A single section-aware scan ([`scan`]) classifies every line and emits
//! facts: components from module sections, entities and fields from entity
//! sections, dependency and relation-table edges. A separate arrow pass covers
//! freeform `a → b` text. The results are assembled into one [`Graph`].
//!
//! Extraction never fails. Structure it does not recognize simply produces a
//! sparser graph.

pub mod entities;
pub mod graph;
pub mod modules;
pub mod relations;
pub mod scan;

pub use entities::{Entity, EntityMap};
pub use graph::{Graph, assemble};
pub use relations::{Relation, RelationSet};
pub use scan::ScanMode;

use scan::Fact;

/// Extract the structural graph of a document.
#[must_use]
pub fn extract(text: &str, mode: ScanMode) -> Graph {
    let mut components = Vec::new();
    let mut entities = EntityMap::default();
    let mut dependencies = Vec::new();
    let mut table_relations = Vec::new();

    for step in scan::scan(text, mode) {
        for fact in step.facts {
            match fact {
                Fact::Component(name) => {
                    if !components.contains(&name) {
                        components.push(name);
                    }
                }
                Fact::Entity(name) => entities.declare(&name),
                Fact::Field { entity, name } => entities.push_field(&entity, name),
                Fact::Dependency(relation) => dependencies.push(relation),
                Fact::TableRelation(relation) => table_relations.push(relation),
            }
        }
    }

    let relations = relations::merge(dependencies, table_relations, relations::arrow_pairs(text));
    tracing::debug!(
        components = components.len(),
        entities = entities.len(),
        relations = relations.len(),
        ?mode,
        "graph extracted"
    );
    assemble(components, entities, relations)
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
