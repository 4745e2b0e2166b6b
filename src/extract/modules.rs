//! Module extractor: component names from module-section sub-headings.

use super::scan::normalize_title;

/// Names at or above this many characters are treated as noise.
pub const MAX_NAME_CHARS: usize = 50;

/// Normalized prefixes of the section titles that list modules.
const MODULE_SECTION_TITLES: &[&str] = &[
    "모듈책임",
    "도메인내부모듈상세",
    "컴포넌트",
    "moduleresponsibilit",
    "domaininternalmoduledetail",
    "component",
];

/// Whether a `##` title opens a module section.
#[must_use]
pub fn is_module_section(title: &str) -> bool {
    let normalized = normalize_title(title);
    MODULE_SECTION_TITLES.iter().any(|prefix| normalized.starts_with(prefix))
}

/// Component name from a `###` heading: `device (단말기 도메인)` becomes `device`.
#[must_use]
pub fn heading_name(text: &str) -> String {
    trim_decoration(strip_trailing_parenthetical(text.trim())).to_owned()
}

/// Whether a heading name is kept as a component.
#[must_use]
pub fn is_plausible(name: &str) -> bool {
    !name.is_empty() && name.chars().count() < MAX_NAME_CHARS
}

/// Strip surrounding markdown emphasis, code quotes and spaces.
#[must_use]
pub fn trim_decoration(text: &str) -> &str {
    text.trim_matches(|c| matches!(c, '`' | '*' | '_' | ' '))
}

fn strip_trailing_parenthetical(text: &str) -> &str {
    if !text.ends_with(')') {
        return text;
    }
    match text.find('(') {
        Some(open) => text[..open].trim_end(),
        None => text,
    }
}

#[cfg(test)]
#[path = "modules_test.rs"]
mod tests;
