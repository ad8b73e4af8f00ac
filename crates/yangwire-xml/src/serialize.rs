//! Tree-to-XML encoding: serializing a normalized data tree to an XML
//! stream under a schema anchor.
//!
//! The encoder walks data and schema in lock-step, depth-first and
//! pre-order. Element namespaces are declared as a default `xmlns`
//! whenever a node's namespace differs from its parent's. List nodes
//! emit one element per entry, key leaves first. An optional annotation
//! tree contributes prefixed attributes on the matching elements, with
//! the operations namespace declared per the process-wide probed
//! strategy.
//!
//! Every opened element is closed on every exit path, including
//! mid-traversal sink faults; a fault is reported tagged with the path
//! of the node being visited.

use std::io::{self, Write};

use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};

use yangwire_model::{
    Annotation, AnnotationNode, DataNode, LeafType, ListEntry, PathArg, QName, ScalarValue,
    SchemaKind, SchemaNode,
};

use crate::error::XmlError;
use crate::namespaces::{NETCONF_NAMESPACE, NsStrategy, OPERATIONS_PREFIX, namespace_strategy};

/// Serialize a normalized data tree to the sink, anchored at the given
/// schema node.
///
/// # Errors
///
/// Returns [`XmlError::SchemaMismatch`] if the tree disagrees with the
/// schema, or [`XmlError::Write`] tagged with the node being visited if
/// the sink faults mid-traversal.
pub fn write_tree<W: Write>(node: &DataNode, anchor: &SchemaNode, sink: W) -> Result<(), XmlError> {
    write_tree_with_annotations(node, anchor, sink, None)
}

/// Serialize a normalized data tree with a parallel annotation tree.
///
/// Annotation attributes are written on the element of the data node
/// their path selects, before any child content. The namespace
/// declaration strategy is the cached outcome of the one-time
/// capability probe; a probe failure fails the encode.
///
/// # Errors
///
/// As [`write_tree`]; additionally [`XmlError::Value`] if an annotation
/// path resolves to no data node, and [`XmlError::Probe`] if no
/// namespace strategy could be determined.
pub fn write_tree_with_annotations<W: Write>(
    node: &DataNode,
    anchor: &SchemaNode,
    sink: W,
    annotations: Option<&AnnotationNode>,
) -> Result<(), XmlError> {
    let strategy = match annotations {
        Some(a) => {
            a.validate_against(node).map_err(|e| XmlError::Value {
                path: "/".to_string(),
                source: e,
            })?;
            Some(namespace_strategy()?)
        }
        None => None,
    };

    let mut encoder = Encoder {
        writer: Writer::new(sink),
        strategy,
        path: Vec::new(),
    };
    encoder.encode_root(node, anchor, annotations)
}

struct Encoder<W: Write> {
    writer: Writer<W>,
    strategy: Option<NsStrategy>,
    path: Vec<String>,
}

impl<W: Write> Encoder<W> {
    fn encode_root(
        &mut self,
        node: &DataNode,
        anchor: &SchemaNode,
        annotations: Option<&AnnotationNode>,
    ) -> Result<(), XmlError> {
        let name = node.name();
        if !anchor.name().matches(&name.namespace, &name.local) {
            return Err(self.mismatch(name, "tree root does not match schema anchor"));
        }
        match node {
            // A list root has no single element of its own; the
            // annotation tree's children select individual entries.
            DataNode::List { name, entries } => {
                if !matches!(anchor.kind(), SchemaKind::List { .. }) {
                    return Err(self.mismatch(name, "node kind does not match schema"));
                }
                for entry in entries {
                    let arg = entry_arg(name, entry);
                    let ann = annotations.and_then(|a| a.child_for(&arg));
                    self.encode_entry(name, entry, anchor, ann, None)?;
                }
                Ok(())
            }
            _ => self.encode_node(node, anchor, annotations, None),
        }
    }

    fn encode_node(
        &mut self,
        node: &DataNode,
        schema: &SchemaNode,
        ann: Option<&AnnotationNode>,
        parent_ns: Option<&str>,
    ) -> Result<(), XmlError> {
        match (node, schema.kind()) {
            (DataNode::Container { name, children }, SchemaKind::Container) => self.element(
                name,
                parent_ns,
                ann.map_or(&[], AnnotationNode::attrs),
                |enc| {
                    for child in children {
                        enc.encode_child(child, schema, ann, &name.namespace)?;
                    }
                    Ok(())
                },
            ),
            (DataNode::Leaf { name, value }, SchemaKind::Leaf(leaf_type)) => {
                self.scalar_element(name, value, *leaf_type, ann, parent_ns)
            }
            (DataNode::LeafList { name, entries }, SchemaKind::LeafList(leaf_type)) => {
                for value in entries {
                    self.scalar_element(name, value, *leaf_type, ann, parent_ns)?;
                }
                Ok(())
            }
            _ => Err(self.mismatch(node.name(), "node kind does not match schema")),
        }
    }

    /// Encode one child of an interior node, resolving its schema and
    /// annotation. List children expand into one element per entry here,
    /// so that the entry path argument selects the per-entry annotation.
    fn encode_child(
        &mut self,
        child: &DataNode,
        parent_schema: &SchemaNode,
        parent_ann: Option<&AnnotationNode>,
        parent_ns: &str,
    ) -> Result<(), XmlError> {
        let name = child.name();
        let Some(child_schema) = parent_schema.child(&name.namespace, &name.local) else {
            return Err(self.mismatch(name, "no such child in schema"));
        };
        match child {
            DataNode::List { name, entries } => {
                if !matches!(child_schema.kind(), SchemaKind::List { .. }) {
                    return Err(self.mismatch(name, "node kind does not match schema"));
                }
                for entry in entries {
                    let arg = entry_arg(name, entry);
                    let ann = parent_ann.and_then(|a| a.child_for(&arg));
                    self.encode_entry(name, entry, child_schema, ann, Some(parent_ns))?;
                }
                Ok(())
            }
            _ => {
                let arg = PathArg::Node(name.clone());
                let ann = parent_ann.and_then(|a| a.child_for(&arg));
                self.encode_node(child, child_schema, ann, Some(parent_ns))
            }
        }
    }

    fn encode_entry(
        &mut self,
        name: &QName,
        entry: &ListEntry,
        schema: &SchemaNode,
        ann: Option<&AnnotationNode>,
        parent_ns: Option<&str>,
    ) -> Result<(), XmlError> {
        let expected: Vec<&QName> = schema.key_names().iter().collect();
        let actual: Vec<&QName> = entry.keys.iter().map(|(k, _)| k).collect();
        if expected != actual {
            return Err(self.mismatch(name, "list entry keys do not match schema"));
        }

        self.path.push(entry_arg(name, entry).to_string());
        let result = self.element_inner(
            name,
            parent_ns,
            ann.map_or(&[], AnnotationNode::attrs),
            |enc| {
                for (key, value) in &entry.keys {
                    enc.path.push(key.to_string());
                    let r = enc.element_inner(key, Some(&name.namespace), &[], |e| {
                        e.text(&value.render_text())
                    });
                    enc.path.pop();
                    r?;
                }
                for child in &entry.children {
                    enc.encode_child(child, schema, ann, &name.namespace)?;
                }
                Ok(())
            },
        );
        self.path.pop();
        result
    }

    fn scalar_element(
        &mut self,
        name: &QName,
        value: &ScalarValue,
        leaf_type: LeafType,
        ann: Option<&AnnotationNode>,
        parent_ns: Option<&str>,
    ) -> Result<(), XmlError> {
        if !scalar_matches(value, leaf_type) {
            return Err(self.mismatch(name, "leaf value does not match declared type"));
        }
        self.element(name, parent_ns, ann.map_or(&[], AnnotationNode::attrs), |enc| {
            enc.text(&value.render_text())
        })
    }

    /// Open an element, run the body, and close the element on every
    /// exit path. A body failure takes precedence over a close failure;
    /// the close failure is then logged, never escalated.
    fn element<F>(
        &mut self,
        name: &QName,
        parent_ns: Option<&str>,
        attrs: &[Annotation],
        body: F,
    ) -> Result<(), XmlError>
    where
        F: FnOnce(&mut Self) -> Result<(), XmlError>,
    {
        self.path.push(name.to_string());
        let result = self.element_inner(name, parent_ns, attrs, body);
        self.path.pop();
        result
    }

    fn element_inner<F>(
        &mut self,
        name: &QName,
        parent_ns: Option<&str>,
        attrs: &[Annotation],
        body: F,
    ) -> Result<(), XmlError>
    where
        F: FnOnce(&mut Self) -> Result<(), XmlError>,
    {
        let mut start = BytesStart::new(name.local.clone());
        if parent_ns != Some(name.namespace.as_str()) {
            start.push_attribute(("xmlns", name.namespace.as_str()));
        }
        // A list-root tree encodes as a forest; with the root-context
        // strategy every root-level element must carry the declaration
        // since siblings do not inherit from one another.
        let declare_op = match self.strategy {
            Some(NsStrategy::RootContext) => self.path.len() == 1,
            Some(NsStrategy::PerElement) => !attrs.is_empty(),
            None => false,
        };
        if declare_op {
            start.push_attribute((
                format!("xmlns:{OPERATIONS_PREFIX}").as_str(),
                NETCONF_NAMESPACE,
            ));
        }
        for attr in attrs {
            start.push_attribute((
                format!("{OPERATIONS_PREFIX}:{}", attr.name).as_str(),
                attr.value.as_str(),
            ));
        }

        self.writer
            .write_event(Event::Start(start))
            .map_err(|e| self.fault(e))?;
        let body_result = body(self);
        let close_result = self
            .writer
            .write_event(Event::End(BytesEnd::new(name.local.clone())));

        match (body_result, close_result) {
            (Err(primary), Err(close)) => {
                tracing::warn!(error = %close, "failed to close element after write fault");
                Err(primary)
            }
            (Err(primary), Ok(())) => Err(primary),
            (Ok(()), Err(close)) => Err(self.fault(close)),
            (Ok(()), Ok(())) => Ok(()),
        }
    }

    fn text(&mut self, content: &str) -> Result<(), XmlError> {
        if content.is_empty() {
            return Ok(());
        }
        self.writer
            .write_event(Event::Text(BytesText::new(content)))
            .map_err(|e| self.fault(e))
    }

    fn fault(&self, source: io::Error) -> XmlError {
        XmlError::Write {
            path: self.current_path(),
            source,
        }
    }

    fn mismatch(&self, name: &QName, detail: &str) -> XmlError {
        let mut segments = self.path.clone();
        segments.push(name.to_string());
        XmlError::SchemaMismatch {
            path: format!("/{}", segments.join("/")),
            detail: detail.to_string(),
        }
    }

    fn current_path(&self) -> String {
        if self.path.is_empty() {
            "/".to_string()
        } else {
            format!("/{}", self.path.join("/"))
        }
    }
}

fn entry_arg(name: &QName, entry: &ListEntry) -> PathArg {
    PathArg::ListEntry {
        name: name.clone(),
        keys: entry.keys.clone(),
    }
}

fn scalar_matches(value: &ScalarValue, leaf_type: LeafType) -> bool {
    matches!(
        (value, leaf_type),
        (ScalarValue::Str(_), LeafType::String)
            | (ScalarValue::Int(_), LeafType::Int)
            | (ScalarValue::Uint(_), LeafType::Uint)
            | (ScalarValue::Bool(_), LeafType::Bool)
            | (ScalarValue::Binary(_), LeafType::Binary)
            | (ScalarValue::Timestamp(_), LeafType::Timestamp)
            | (ScalarValue::Empty, LeafType::Empty)
    )
}
