//! Entity extractor: entity headings and the field rows beneath them.

use serde::Serialize;

use super::scan::{bare_identifier, is_word_char, normalize_title, table_cells};

/// Normalized prefixes of the section titles that list entities.
const ENTITY_SECTION_TITLES: &[&str] = &["엔티티", "entit"];

/// First-cell tokens that belong to table headers, not to fields.
///
/// English headers are matched capitalized only, so a lowercase `name` or
/// `value` row is still a field.
const NON_FIELD_TOKENS: &[&str] = &["필드", "Field", "---", "이름", "Name", "관계", "인덱스", "Index", "값", "Value"];

/// Whether a `##` title opens an entity section.
#[must_use]
pub fn is_entity_section(title: &str) -> bool {
    let normalized = normalize_title(title);
    ENTITY_SECTION_TITLES.iter().any(|prefix| normalized.starts_with(prefix))
}

/// Entity name from a `###` heading, if its first word starts uppercase.
///
/// Only the leading word token counts: `` `Order` `` and `Order (주문)` both
/// name `Order`.
#[must_use]
pub fn heading_entity(text: &str) -> Option<String> {
    let text = text.trim_start();
    let text = text.strip_prefix('`').unwrap_or(text);
    let end = text.find(|c: char| !is_word_char(c)).unwrap_or(text.len());
    let name = &text[..end];
    name.chars()
        .next()
        .is_some_and(char::is_uppercase)
        .then(|| name.to_owned())
}

/// Field name from a table row whose first cell is an identifier.
#[must_use]
pub fn field_name(row: &str) -> Option<String> {
    let cells = table_cells(row);
    let name = bare_identifier(cells.first()?)?;
    (!NON_FIELD_TOKENS.contains(&name)).then(|| name.to_owned())
}

// =============================================================================
// ENTITY MAP
// =============================================================================

/// A named data object and its fields in table-row order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entity {
    pub name: String,
    pub fields: Vec<String>,
}

/// Entity name to field list, in order of first declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityMap {
    entries: Vec<Entity>,
}

impl EntityMap {
    /// Declare an entity; a repeated declaration clears its fields in place.
    pub fn declare(&mut self, name: &str) {
        match self.entries.iter_mut().find(|e| e.name == name) {
            Some(existing) => existing.fields.clear(),
            None => self.entries.push(Entity { name: name.to_owned(), fields: Vec::new() }),
        }
    }

    /// Append a field to a declared entity. Unknown entities are ignored.
    pub fn push_field(&mut self, entity: &str, field: String) {
        if let Some(existing) = self.entries.iter_mut().find(|e| e.name == entity) {
            existing.fields.push(field);
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.entries.iter().find(|e| e.name == name).map(|e| e.fields.as_slice())
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.name == name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entity> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a EntityMap {
    type Item = &'a Entity;
    type IntoIter = std::slice::Iter<'a, Entity>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
#[path = "entities_test.rs"]
mod tests;
