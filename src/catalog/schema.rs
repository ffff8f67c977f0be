//! Schema rendering
//!
//! Turns a [`SchemaNode`] tree into the nested, JSON-like text shown in the
//! documentation view. References to named schemas are rendered as labels
//! pointing at the schema's anchor and are never expanded, so mutually
//! referencing schemas cannot make rendering recurse forever.

use std::fmt;

use crate::core::constants::labels;
use crate::core::types::{OrderedMap, SchemaNode, SchemaType};

const INDENT: &str = "  ";

/// Target markup of a rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Markup {
    /// Plain text for terminals and JSON output
    Text,
    /// HTML fragment with anchors for references
    Html,
}

/// Lazily rendered view of a schema node.
///
/// Nothing is built until the view is formatted; the rendering recurses once
/// per nesting level of the schema.
#[derive(Debug, Clone, Copy)]
pub struct SchemaView<'a> {
    node: &'a SchemaNode,
    schemas: &'a OrderedMap<SchemaNode>,
    markup: Markup,
}

impl<'a> SchemaView<'a> {
    pub fn new(node: &'a SchemaNode, schemas: &'a OrderedMap<SchemaNode>) -> Self {
        Self {
            node,
            schemas,
            markup: Markup::Text,
        }
    }

    pub fn html(mut self) -> Self {
        self.markup = Markup::Html;
        self
    }

    fn write_node(
        &self,
        f: &mut fmt::Formatter<'_>,
        node: &SchemaNode,
        depth: usize,
    ) -> fmt::Result {
        if let Some(name) = node.reference_name() {
            return self.write_reference(f, name);
        }

        match node.schema_type {
            Some(SchemaType::Object) => self.write_object(f, node, depth),
            Some(SchemaType::Array) => self.write_array(f, node, depth),
            Some(primitive) => self.write_leaf(f, primitive),
            None => Ok(()),
        }
    }

    fn write_reference(&self, f: &mut fmt::Formatter<'_>, name: &str) -> fmt::Result {
        match self.markup {
            Markup::Text => f.write_str(name),
            Markup::Html => {
                let class = if self.schemas.contains_key(name) {
                    "schema-ref"
                } else {
                    "schema-ref unresolved"
                };
                write!(
                    f,
                    r##"<a href="#{}" class="{class}">{}</a>"##,
                    escape_html(&schema_anchor(name)),
                    escape_html(name)
                )
            }
        }
    }

    fn write_leaf(&self, f: &mut fmt::Formatter<'_>, schema_type: SchemaType) -> fmt::Result {
        match self.markup {
            Markup::Text => f.write_str(schema_type.as_str()),
            Markup::Html => write!(f, r#"<span class="schema-type">{schema_type}</span>"#),
        }
    }

    fn write_key(&self, f: &mut fmt::Formatter<'_>, key: &str) -> fmt::Result {
        match self.markup {
            Markup::Text => {
                let quoted = serde_json::to_string(key).map_err(|_| fmt::Error)?;
                f.write_str(&quoted)
            }
            Markup::Html => write!(
                f,
                r#"<span class="schema-key">"{}"</span>"#,
                escape_html(key)
            ),
        }
    }

    fn write_object(
        &self,
        f: &mut fmt::Formatter<'_>,
        node: &SchemaNode,
        depth: usize,
    ) -> fmt::Result {
        let properties = match node.properties.as_ref() {
            Some(properties) if !properties.is_empty() => properties,
            _ => return f.write_str("{}"),
        };

        f.write_str("{\n")?;
        let last = properties.len() - 1;
        for (index, (name, child)) in properties.iter().enumerate() {
            write_indent(f, depth + 1)?;
            self.write_key(f, name)?;
            f.write_str(": ")?;
            self.write_node(f, child, depth + 1)?;
            if index < last {
                f.write_str(",")?;
            }
            f.write_str("\n")?;
        }
        write_indent(f, depth)?;
        f.write_str("}")
    }

    fn write_array(
        &self,
        f: &mut fmt::Formatter<'_>,
        node: &SchemaNode,
        depth: usize,
    ) -> fmt::Result {
        let Some(items) = node.items.as_deref() else {
            return f.write_str("[]");
        };

        f.write_str("[\n")?;
        write_indent(f, depth + 1)?;
        self.write_node(f, items, depth + 1)?;
        f.write_str("\n")?;
        write_indent(f, depth)?;
        f.write_str("]")
    }
}

impl fmt::Display for SchemaView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_node(f, self.node, 0)
    }
}

fn write_indent(f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
    for _ in 0..depth {
        f.write_str(INDENT)?;
    }
    Ok(())
}

/// Render a schema node as plain text.
pub fn render_schema(node: &SchemaNode, schemas: &OrderedMap<SchemaNode>) -> String {
    SchemaView::new(node, schemas).to_string()
}

/// Render a schema node as an HTML fragment.
pub fn render_schema_html(node: &SchemaNode, schemas: &OrderedMap<SchemaNode>) -> String {
    SchemaView::new(node, schemas).html().to_string()
}

/// Anchor id under which a named schema is documented.
pub fn schema_anchor(name: &str) -> String {
    format!("{}{name}", labels::SCHEMA_ANCHOR_PREFIX)
}

/// Number of nested delimiter blocks the rendering of `node` produces.
///
/// References and primitives are leaves; they do not count.
pub fn nesting_depth(node: &SchemaNode) -> usize {
    if node.reference.is_some() {
        return 0;
    }
    match node.schema_type {
        Some(SchemaType::Object) => {
            1 + node
                .properties
                .iter()
                .flat_map(|properties| properties.iter())
                .map(|(_, child)| nesting_depth(child))
                .max()
                .unwrap_or(0)
        }
        Some(SchemaType::Array) => 1 + node.items.as_deref().map(nesting_depth).unwrap_or(0),
        _ => 0,
    }
}

/// Names referenced anywhere below `node` that the schema table does not define.
pub fn unresolved_references<'a>(
    node: &'a SchemaNode,
    schemas: &OrderedMap<SchemaNode>,
) -> Vec<&'a str> {
    let mut missing = Vec::new();
    collect_unresolved(node, schemas, &mut missing);
    missing
}

fn collect_unresolved<'a>(
    node: &'a SchemaNode,
    schemas: &OrderedMap<SchemaNode>,
    missing: &mut Vec<&'a str>,
) {
    if let Some(name) = node.reference_name() {
        if !schemas.contains_key(name) && !missing.contains(&name) {
            missing.push(name);
        }
        return;
    }
    if let Some(properties) = &node.properties {
        for (_, child) in properties.iter() {
            collect_unresolved(child, schemas, missing);
        }
    }
    if let Some(items) = node.items.as_deref() {
        collect_unresolved(items, schemas, missing);
    }
}

pub(crate) fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
