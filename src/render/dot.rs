//! DOT source builder and the generic graph-drawing backend.

use super::DiagramKind;
use crate::extract::Graph;

/// Entity records list at most this many fields.
pub const MAX_RECORD_FIELDS: usize = 10;

const FONT: &str = "Helvetica";

// =============================================================================
// BUILDER
// =============================================================================

/// Attribute list: `(name, value)` pairs, values quoted on output.
pub type Attrs<'a> = &'a [(&'a str, &'a str)];

/// Incrementally assembled `digraph` source.
#[derive(Debug)]
pub struct DotBuilder {
    body: String,
    depth: usize,
}

impl DotBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self { body: String::new(), depth: 1 }
    }

    pub fn graph_attrs(&mut self, attrs: Attrs<'_>) -> &mut Self {
        self.statement(&format!("graph [{}]", format_attrs(attrs)))
    }

    pub fn node_defaults(&mut self, attrs: Attrs<'_>) -> &mut Self {
        self.statement(&format!("node [{}]", format_attrs(attrs)))
    }

    pub fn edge_defaults(&mut self, attrs: Attrs<'_>) -> &mut Self {
        self.statement(&format!("edge [{}]", format_attrs(attrs)))
    }

    pub fn node(&mut self, id: &str, attrs: Attrs<'_>) -> &mut Self {
        if attrs.is_empty() {
            self.statement(&quote(id))
        } else {
            self.statement(&format!("{} [{}]", quote(id), format_attrs(attrs)))
        }
    }

    /// Node whose `label` is record syntax produced by [`record_label`].
    pub fn record_node(&mut self, id: &str, label: &str) -> &mut Self {
        self.statement(&format!("{} [label=\"{label}\"]", quote(id)))
    }

    pub fn edge(&mut self, from: &str, to: &str) -> &mut Self {
        self.statement(&format!("{} -> {}", quote(from), quote(to)))
    }

    pub fn open_cluster(&mut self, name: &str, attrs: Attrs<'_>) -> &mut Self {
        self.line(&format!("subgraph {} {{", quote(&format!("cluster_{name}"))));
        self.depth += 1;
        self.graph_attrs(attrs)
    }

    pub fn close_cluster(&mut self) -> &mut Self {
        self.depth = self.depth.saturating_sub(1);
        self.line("}")
    }

    #[must_use]
    pub fn finish(&self) -> String {
        format!("digraph {{\n{}}}\n", self.body)
    }

    fn statement(&mut self, text: &str) -> &mut Self {
        self.line(&format!("{text};"))
    }

    fn line(&mut self, text: &str) -> &mut Self {
        for _ in 0..self.depth {
            self.body.push_str("  ");
        }
        self.body.push_str(text);
        self.body.push('\n');
        self
    }
}

impl Default for DotBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Quote a DOT identifier or attribute value.
#[must_use]
pub fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '"' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

fn format_attrs(attrs: Attrs<'_>) -> String {
    attrs
        .iter()
        .map(|(name, value)| format!("{name}={}", quote(value)))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Escape text for use inside a record label field.
#[must_use]
pub fn escape_record(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '{' | '}' | '|' | '<' | '>' | '"' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// `{Entity|field1|field2}` with at most [`MAX_RECORD_FIELDS`] fields.
#[must_use]
pub fn record_label(entity: &str, fields: &[String]) -> String {
    let fields: Vec<String> = fields.iter().take(MAX_RECORD_FIELDS).map(|f| escape_record(f)).collect();
    format!("{{{}|{}}}", escape_record(entity), fields.join("|"))
}

// =============================================================================
// GENERIC BACKEND
// =============================================================================

struct Style {
    rankdir: &'static str,
    node: &'static [(&'static str, &'static str)],
    edge: &'static [(&'static str, &'static str)],
}

const DEPENDENCY_STYLE: Style = Style {
    rankdir: "TB",
    node: &[("shape", "box"), ("style", "rounded,filled"), ("fillcolor", "#E8F4FD"), ("fontname", FONT), ("fontsize", "11")],
    edge: &[("color", "#4A90D9"), ("fontname", FONT), ("fontsize", "9")],
};

const INTERACTION_STYLE: Style = Style {
    rankdir: "LR",
    node: &[("shape", "component"), ("style", "filled"), ("fillcolor", "#FFF3E0"), ("fontname", FONT), ("fontsize", "11")],
    edge: &[("color", "#E65100"), ("fontname", FONT), ("fontsize", "9")],
};

const ARCHITECTURE_STYLE: Style = Style {
    rankdir: "TB",
    node: &[("shape", "box"), ("style", "filled"), ("fillcolor", "#F3F6F9"), ("fontname", FONT), ("fontsize", "11")],
    edge: &[("color", "#7B8894"), ("fontname", FONT), ("fontsize", "9")],
};

/// DOT source for any diagram kind using plain Graphviz shapes.
#[must_use]
pub fn generic(graph: &Graph, kind: DiagramKind, title: &str) -> String {
    match kind {
        DiagramKind::Er => entity_relationship(graph, title),
        DiagramKind::Dependency => component_graph(graph, title, &DEPENDENCY_STYLE),
        DiagramKind::Interaction => component_graph(graph, title, &INTERACTION_STYLE),
        DiagramKind::Architecture | DiagramKind::Domain => component_graph(graph, title, &ARCHITECTURE_STYLE),
    }
}

fn header(dot: &mut DotBuilder, title: &str, rankdir: &str) {
    dot.graph_attrs(&[("label", title), ("labelloc", "t"), ("rankdir", rankdir), ("bgcolor", "white"), ("fontname", FONT)]);
}

/// Entities as records; edges only between known entities.
fn entity_relationship(graph: &Graph, title: &str) -> String {
    let mut dot = DotBuilder::new();
    header(&mut dot, title, "LR");
    dot.node_defaults(&[("shape", "record"), ("fontname", FONT), ("fontsize", "10")]);
    dot.edge_defaults(&[("fontname", FONT), ("fontsize", "9")]);

    for entity in graph.entities() {
        dot.record_node(&entity.name, &record_label(&entity.name, &entity.fields));
    }
    for relation in graph.relations() {
        if graph.is_entity(&relation.source) && graph.is_entity(&relation.target) {
            dot.edge(&relation.source, &relation.target);
        }
    }
    dot.finish()
}

/// Components as plain nodes; every relation drawn.
fn component_graph(graph: &Graph, title: &str, style: &Style) -> String {
    let mut dot = DotBuilder::new();
    header(&mut dot, title, style.rankdir);
    dot.node_defaults(style.node);
    dot.edge_defaults(style.edge);

    for component in graph.components() {
        dot.node(component, &[]);
    }
    for relation in graph.relations() {
        dot.edge(&relation.source, &relation.target);
    }
    dot.finish()
}

#[cfg(test)]
#[path = "dot_test.rs"]
mod tests;
