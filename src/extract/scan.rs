//! Section classifier: one forward pass over the document's lines.
//!
//! Each line is first classified by shape (section heading, sub-heading,
//! table row, plain text). The [`ScanState`] then advances one line at a
//! time, returning the next state plus whatever facts the line contributed.
//! The state is a plain value threaded through the scan, so two scans of the
//! same text can never observe each other.

use super::relations::Relation;
use super::{entities, modules, relations};

// =============================================================================
// LINE SHAPES
// =============================================================================

/// The structural shape of one raw document line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    /// `## title`: a top-level section boundary.
    Section(&'a str),
    /// `### text`: a module or entity heading, depending on the section.
    SubHeading(&'a str),
    /// `| a | b |`: a table row (leading indentation allowed).
    TableRow(&'a str),
    /// Anything else, including blank lines.
    Text(&'a str),
}

/// Classify a raw line by shape.
///
/// Only exactly two or three `#` characters followed by whitespace count as
/// headings; `#` and `####` lines are plain text.
#[must_use]
pub fn classify_line(raw: &str) -> Line<'_> {
    if let Some(title) = heading_text(raw, 2) {
        return Line::Section(title);
    }
    if let Some(text) = heading_text(raw, 3) {
        return Line::SubHeading(text);
    }
    let trimmed = raw.trim_start();
    if trimmed.starts_with('|') {
        return Line::TableRow(trimmed);
    }
    Line::Text(raw)
}

fn heading_text(raw: &str, level: usize) -> Option<&str> {
    let rest = raw.strip_prefix(&"#".repeat(level)[..])?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    Some(rest.trim())
}

// =============================================================================
// WORD AND TABLE HELPERS
// =============================================================================

/// Word characters: Unicode alphanumerics and `_`.
#[must_use]
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Cells of a table row that are closed by a trailing `|`.
///
/// `| a | b |` yields `[" a ", " b "]`; `| a | b` yields `[" a "]`.
#[must_use]
pub fn table_cells(row: &str) -> Vec<&str> {
    let Some(body) = row.trim_start().strip_prefix('|') else {
        return Vec::new();
    };
    let mut parts: Vec<&str> = body.split('|').collect();
    parts.pop();
    parts
}

/// A cell holding a single bare or backtick-quoted identifier.
#[must_use]
pub fn bare_identifier(cell: &str) -> Option<&str> {
    let cell = cell.trim();
    let cell = cell.strip_prefix('`').unwrap_or(cell);
    let cell = cell.strip_suffix('`').unwrap_or(cell);
    (!cell.is_empty() && cell.chars().all(is_word_char)).then_some(cell)
}

/// Lowercase a title and drop whitespace, `-` and `_` so titles compare
/// regardless of spacing and hyphenation.
#[must_use]
pub fn normalize_title(title: &str) -> String {
    title
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

// =============================================================================
// SCANNER STATE
// =============================================================================

/// How strictly entity headings are tied to entity sections.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScanMode {
    /// Entities are only recognized inside an explicit entity section.
    #[default]
    Strict,
    /// Any capitalized sub-heading opens an entity, module headings included,
    /// and the current entity survives section boundaries.
    Relaxed,
}

/// The semantic section the scan is currently in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Section {
    #[default]
    None,
    Module,
    Entity,
}

/// Scanner state after a line has been consumed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanState {
    pub section: Section,
    pub module: Option<String>,
    pub entity: Option<String>,
    pub relation_table: bool,
}

/// A fact contributed by a single line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fact {
    Component(String),
    Entity(String),
    Field { entity: String, name: String },
    Dependency(Relation),
    TableRelation(Relation),
}

/// Result of advancing the scanner by one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub state: ScanState,
    pub facts: Vec<Fact>,
}

impl ScanState {
    /// Advance past `line`, returning the successor state and its facts.
    #[must_use]
    pub fn step(&self, line: &Line<'_>, mode: ScanMode) -> Step {
        match *line {
            Line::Section(title) => Step { state: self.open(title, mode), facts: Vec::new() },
            Line::SubHeading(text) => self.sub_heading(text, mode),
            Line::TableRow(row) => self.table_row(row),
            Line::Text(text) => self.text(text),
        }
    }

    fn open(&self, title: &str, mode: ScanMode) -> Self {
        let section = if modules::is_module_section(title) {
            Section::Module
        } else if entities::is_entity_section(title) {
            Section::Entity
        } else {
            Section::None
        };
        let entity = match mode {
            ScanMode::Strict => None,
            ScanMode::Relaxed => self.entity.clone(),
        };
        Self { section, entity, ..Self::default() }
    }

    fn collects_entities(&self, mode: ScanMode) -> bool {
        match mode {
            ScanMode::Strict => self.section == Section::Entity,
            ScanMode::Relaxed => true,
        }
    }

    fn sub_heading(&self, text: &str, mode: ScanMode) -> Step {
        let mut state = Self { relation_table: false, ..self.clone() };
        let mut facts = Vec::new();

        if self.section == Section::Module {
            let name = modules::heading_name(text);
            if modules::is_plausible(&name) {
                facts.push(Fact::Component(name.clone()));
            }
            state.module = (!name.is_empty()).then_some(name);
        }
        if self.collects_entities(mode) {
            // A lowercase heading leaves the previous entity current.
            if let Some(name) = entities::heading_entity(text) {
                facts.push(Fact::Entity(name.clone()));
                state.entity = Some(name);
            }
        }

        Step { state, facts }
    }

    fn table_row(&self, row: &str) -> Step {
        let mut state = self.clone();
        let mut facts = Vec::new();

        let Some(entity) = &self.entity else {
            return Step { state, facts };
        };

        if self.relation_table {
            if let Some(target) = relations::table_target(row) {
                facts.push(Fact::TableRelation(Relation::new(entity, target)));
            }
        } else if relations::is_relation_header(row) {
            state.relation_table = true;
            return Step { state, facts };
        }

        if let Some(name) = entities::field_name(row) {
            facts.push(Fact::Field { entity: entity.clone(), name });
        }

        Step { state, facts }
    }

    fn text(&self, text: &str) -> Step {
        let state = Self { relation_table: false, ..self.clone() };
        let mut facts = Vec::new();

        if let (Section::Module, Some(module)) = (self.section, &self.module) {
            for target in relations::dependency_targets(text) {
                facts.push(Fact::Dependency(Relation::new(module, target)));
            }
        }

        Step { state, facts }
    }
}

/// Scan `text` line by line, yielding the step produced by every line.
pub fn scan(text: &str, mode: ScanMode) -> impl Iterator<Item = Step> + '_ {
    text.lines().scan(ScanState::default(), move |state, raw| {
        let step = state.step(&classify_line(raw), mode);
        state.clone_from(&step.state);
        Some(step)
    })
}

#[cfg(test)]
#[path = "scan_test.rs"]
mod tests;
