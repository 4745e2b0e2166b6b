//! Relation extractor: three discovery passes merged into one set.
//!
//! DESIGN
//! ======
//! Hand-written documents express relations in three idioms depending on the
//! section they sit in:
//! - dependency lists under module headings (`- **dependency**: A, B (desc)`)
//! - relation tables under entity headings (`| relation | target | ... |`)
//! - freeform arrows anywhere (`OrderService → PaymentService`)
//!
//! The first two are produced by the section scan; the arrow pass runs over
//! the raw text. [`merge`] inserts them in that order into a [`RelationSet`],
//! which keeps first-seen order and drops repeated pairs.

use std::collections::HashSet;

use serde::{Serialize, Serializer};

use super::modules::trim_decoration;
use super::scan::{bare_identifier, is_word_char, table_cells};

/// Dependency values meaning "no dependencies".
const NONE_SENTINELS: &[&str] = &["없음", "none", "—", "-", ""];

/// Bold labels that introduce a dependency list.
const DEPENDENCY_LABELS: &[&str] = &["의존성", "dependency", "dependencies"];

const RELATION_HEADERS: &[&str] = &["관계", "relation", "relations"];
const TARGET_HEADERS: &[&str] = &["대상", "target", "targets"];

/// Target cell that is never an entity name.
const TARGET_HEADER_CELL: &str = "대상";

// =============================================================================
// RELATION SET
// =============================================================================

/// A directed edge between two opaque names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Relation {
    pub source: String,
    pub target: String,
}

impl Relation {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self { source: source.into(), target: target.into() }
    }
}

/// Ordered pairs, each stored at most once, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelationSet {
    order: Vec<Relation>,
    seen: HashSet<Relation>,
}

impl RelationSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a relation; returns `false` when the pair was already present.
    pub fn insert(&mut self, relation: Relation) -> bool {
        if self.seen.contains(&relation) {
            return false;
        }
        self.seen.insert(relation.clone());
        self.order.push(relation);
        true
    }

    #[must_use]
    pub fn contains(&self, source: &str, target: &str) -> bool {
        self.order.iter().any(|r| r.source == source && r.target == target)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Relation> {
        self.order.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl<'a> IntoIterator for &'a RelationSet {
    type Item = &'a Relation;
    type IntoIter = std::slice::Iter<'a, Relation>;

    fn into_iter(self) -> Self::IntoIter {
        self.order.iter()
    }
}

impl Extend<Relation> for RelationSet {
    fn extend<I: IntoIterator<Item = Relation>>(&mut self, iter: I) {
        for relation in iter {
            self.insert(relation);
        }
    }
}

impl Serialize for RelationSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.order)
    }
}

/// Merge the three passes in their fixed order.
#[must_use]
pub fn merge(dependencies: Vec<Relation>, table_relations: Vec<Relation>, arrows: Vec<Relation>) -> RelationSet {
    let mut set = RelationSet::new();
    set.extend(dependencies);
    set.extend(table_relations);
    set.extend(arrows);
    set
}

// =============================================================================
// PASS 1: DEPENDENCY LISTS
// =============================================================================

/// Targets named on a `- **dependency**: a (desc), b` line.
///
/// Returns an empty list for any other line and for "none" values.
#[must_use]
pub fn dependency_targets(line: &str) -> Vec<String> {
    let Some(list) = dependency_list(line) else {
        return Vec::new();
    };
    if is_sentinel(list) {
        return Vec::new();
    }
    split_top_level(list)
        .into_iter()
        .map(|item| trim_decoration(strip_parentheticals(item).trim()).to_owned())
        .filter(|name| !is_sentinel(name))
        .collect()
}

fn dependency_list(line: &str) -> Option<&str> {
    let rest = line.trim_start().strip_prefix('-')?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let rest = rest.trim_start().strip_prefix("**")?;
    let (label, rest) = rest.split_once("**")?;
    if !DEPENDENCY_LABELS.iter().any(|l| l.eq_ignore_ascii_case(label)) {
        return None;
    }
    let list = rest.trim_start().strip_prefix(':')?;
    Some(list.trim())
}

/// Whether a dependency value means "none".
#[must_use]
pub fn is_sentinel(value: &str) -> bool {
    let lowered = value.trim().to_lowercase();
    NONE_SENTINELS.contains(&lowered.as_str())
}

/// Split on commas that are not inside parentheses.
fn split_top_level(list: &str) -> Vec<&str> {
    let mut items = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (idx, c) in list.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                items.push(&list[start..idx]);
                start = idx + c.len_utf8();
            }
            _ => {}
        }
    }
    items.push(&list[start..]);
    items
}

fn strip_parentheticals(item: &str) -> String {
    let mut out = String::with_capacity(item.len());
    let mut depth = 0usize;
    for c in item.chars() {
        match c {
            '(' => depth += 1,
            ')' if depth > 0 => depth -= 1,
            _ if depth == 0 => out.push(c),
            _ => {}
        }
    }
    out
}

// =============================================================================
// PASS 2: RELATION TABLES
// =============================================================================

/// Whether a row is a `| relation | target | ...` header.
#[must_use]
pub fn is_relation_header(row: &str) -> bool {
    let cells = table_cells(row);
    let [relation, target, ..] = cells.as_slice() else {
        return false;
    };
    matches_header(relation, RELATION_HEADERS) && matches_header(target, TARGET_HEADERS)
}

fn matches_header(cell: &str, names: &[&str]) -> bool {
    let cell = cell.trim();
    names.iter().any(|name| name.eq_ignore_ascii_case(cell))
}

/// Whether a row is a `|---|:--:|` separator.
#[must_use]
pub fn is_separator_row(row: &str) -> bool {
    table_cells(row).first().is_some_and(|cell| {
        let cell = cell.trim();
        !cell.is_empty() && cell.chars().all(|c| c == '-' || c == ':')
    })
}

/// Target named in the second column of a relation-table row.
#[must_use]
pub fn table_target(row: &str) -> Option<String> {
    if is_separator_row(row) {
        return None;
    }
    let cells = table_cells(row);
    let [relation, target, ..] = cells.as_slice() else {
        return None;
    };
    if relation.is_empty() {
        return None;
    }
    let target = bare_identifier(target)?;
    // A repeated Korean header cell; English words may be real entity names.
    if target == TARGET_HEADER_CELL {
        return None;
    }
    Some(target.to_owned())
}

// =============================================================================
// PASS 3: ARROWS
// =============================================================================

/// Every `a → b` or `a -> b` pair in the text, section-agnostic.
///
/// Whitespace (including line breaks) may surround the arrow. In a chain
/// `a -> b -> c` the middle token participates in both pairs.
#[must_use]
pub fn arrow_pairs(text: &str) -> Vec<Relation> {
    let mut pairs = Vec::new();
    for (idx, c) in text.char_indices() {
        let arrow_len = match c {
            '→' => c.len_utf8(),
            '-' if text[idx..].starts_with("->") => 2,
            _ => continue,
        };
        let source = trailing_word(&text[..idx]);
        let target = leading_word(&text[idx + arrow_len..]);
        if !source.is_empty() && !target.is_empty() {
            pairs.push(Relation::new(source, target));
        }
    }
    pairs
}

fn trailing_word(text: &str) -> &str {
    let text = text.trim_end();
    let start = text
        .char_indices()
        .rev()
        .take_while(|(_, c)| is_word_char(*c))
        .last()
        .map_or(text.len(), |(idx, _)| idx);
    &text[start..]
}

fn leading_word(text: &str) -> &str {
    let text = text.trim_start();
    let end = text.find(|c: char| !is_word_char(c)).unwrap_or(text.len());
    &text[..end]
}

#[cfg(test)]
#[path = "relations_test.rs"]
mod tests;
