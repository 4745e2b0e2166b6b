//! Graph assembler: the immutable result of one extraction.

use serde::Serialize;

use super::entities::{Entity, EntityMap};
use super::relations::{Relation, RelationSet};

/// Components, entities with their fields, and relations of one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    components: Vec<String>,
    entities: EntityMap,
    relations: RelationSet,
}

/// Combine the extractor outputs without filtering.
#[must_use]
pub fn assemble(components: Vec<String>, entities: EntityMap, relations: RelationSet) -> Graph {
    Graph { components, entities, relations }
}

impl Graph {
    /// Component names in order of first appearance.
    #[must_use]
    pub fn components(&self) -> &[String] {
        &self.components
    }

    /// Entities in order of first declaration.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    /// Field list of a named entity.
    #[must_use]
    pub fn fields(&self, entity: &str) -> Option<&[String]> {
        self.entities.get(entity)
    }

    #[must_use]
    pub fn is_entity(&self, name: &str) -> bool {
        self.entities.contains(name)
    }

    #[must_use]
    pub fn relations(&self) -> &RelationSet {
        &self.relations
    }

    #[must_use]
    pub fn has_relation(&self, source: &str, target: &str) -> bool {
        self.relations.contains(source, target)
    }

    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }
}

#[derive(Serialize)]
struct GraphView<'a> {
    components: &'a [String],
    entities: Vec<&'a Entity>,
    relations: Vec<&'a Relation>,
}

impl Serialize for Graph {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        GraphView {
            components: &self.components,
            entities: self.entities.iter().collect(),
            relations: self.relations.iter().collect(),
        }
        .serialize(serializer)
    }
}
