//! XML-to-tree decoding: parsing a document into a normalized data tree
//! under a schema context.
//!
//! The document's top-level elements resolve against a synthetic
//! data-root view of the supplied context; the synthetic container
//! itself never appears in the result. Elements are resolved against
//! schema as they stream by, threading the current schema node down the
//! element stack; a container registered as a mount point switches
//! resolution to the mounted context's top level. Repeated list and
//! leaf-list elements fold into a single node preserving document
//! order. Any element with no schema counterpart fails the decode; a
//! partial tree is never returned.

use std::sync::Arc;

use quick_xml::NsReader;
use quick_xml::events::{BytesText, Event};
use quick_xml::name::ResolveResult;

use yangwire_model::{
    DataNode, LeafType, ListEntry, MountPointContext, QName, ScalarValue, SchemaContext,
    SchemaKind, SchemaNode,
};

use crate::error::XmlError;

/// Decode an XML document into a normalized data tree under a
/// mount-point context.
///
/// # Errors
///
/// Returns [`XmlError::SchemaMismatch`] naming the offending element's
/// path if the document disagrees with the schema, or
/// [`XmlError::Parse`] / [`XmlError::QuickXml`] for a malformed
/// document.
pub fn read_tree(document: &[u8], context: &MountPointContext) -> Result<DataNode, XmlError> {
    Decoder::new(document, context).run()
}

/// Decode under a bare schema context, wrapped transparently in an
/// empty mount-point context.
///
/// # Errors
///
/// As [`read_tree`].
pub fn read_tree_in(document: &[u8], context: Arc<SchemaContext>) -> Result<DataNode, XmlError> {
    read_tree(document, &MountPointContext::empty(context))
}

/// Where the children of the current element resolve.
#[derive(Debug, Clone, Copy)]
enum Scope<'s> {
    /// The synthetic data root: top-level nodes of the host context.
    Root(&'s MountPointContext),
    /// A regular schema node's children.
    Node(&'s SchemaNode),
    /// The top level of a mounted context.
    Mounted(&'s SchemaContext),
}

impl<'s> Scope<'s> {
    fn resolve(self, namespace: &str, local: &str) -> Option<&'s SchemaNode> {
        match self {
            Self::Root(ctx) => ctx.context().child(namespace, local),
            Self::Node(node) => node.child(namespace, local),
            Self::Mounted(ctx) => ctx.child(namespace, local),
        }
    }
}

enum Frame<'s> {
    Inner {
        name: QName,
        schema: &'s SchemaNode,
        scope: Scope<'s>,
        children: Vec<DataNode>,
        entry: bool,
    },
    Scalar {
        name: QName,
        leaf_type: LeafType,
        leaf_list: bool,
        text: String,
    },
}

struct Decoder<'s, 'd> {
    reader: NsReader<&'d [u8]>,
    context: &'s MountPointContext,
    stack: Vec<Frame<'s>>,
    path: Vec<String>,
    result: Option<DataNode>,
}

impl<'s, 'd> Decoder<'s, 'd> {
    fn new(document: &'d [u8], context: &'s MountPointContext) -> Self {
        let mut reader = NsReader::from_reader(document);
        reader.config_mut().trim_text(true);
        Self {
            reader,
            context,
            stack: Vec::new(),
            path: Vec::new(),
            result: None,
        }
    }

    fn run(mut self) -> Result<DataNode, XmlError> {
        loop {
            let (resolution, event) = self.reader.read_resolved_event()?;
            match event {
                Event::Start(e) => {
                    let ns = bound_namespace(&resolution);
                    let local = local_name(e.local_name().as_ref())?;
                    self.on_start(ns, local)?;
                }
                Event::Empty(e) => {
                    let ns = bound_namespace(&resolution);
                    let local = local_name(e.local_name().as_ref())?;
                    self.on_start(ns, local)?;
                    self.on_end()?;
                }
                Event::Text(t) => self.on_text(&t)?,
                Event::End(_) => self.on_end()?,
                Event::Eof => break,
                // Declarations, comments, processing instructions.
                _ => {}
            }
        }

        if !self.stack.is_empty() {
            return Err(XmlError::Parse("unexpected end of document".to_string()));
        }
        self.result
            .ok_or_else(|| XmlError::Parse("document holds no data element".to_string()))
    }

    fn on_start(&mut self, namespace: String, local: String) -> Result<(), XmlError> {
        let scope = match self.stack.last() {
            None => Scope::Root(self.context),
            Some(Frame::Inner { scope, .. }) => *scope,
            Some(Frame::Scalar { .. }) => {
                return Err(self.mismatch(&namespace, &local, "element inside leaf content"));
            }
        };

        let Some(schema) = scope.resolve(&namespace, &local) else {
            return Err(self.mismatch(&namespace, &local, "no such element in schema"));
        };

        let name = QName::new(namespace, local);
        self.path.push(name.to_string());
        let frame = match schema.kind() {
            SchemaKind::Container => Frame::Inner {
                name,
                schema,
                scope: self.child_scope(schema),
                children: Vec::new(),
                entry: false,
            },
            SchemaKind::List { .. } => Frame::Inner {
                name,
                schema,
                scope: self.child_scope(schema),
                children: Vec::new(),
                entry: true,
            },
            SchemaKind::Leaf(leaf_type) => Frame::Scalar {
                name,
                leaf_type: *leaf_type,
                leaf_list: false,
                text: String::new(),
            },
            SchemaKind::LeafList(leaf_type) => Frame::Scalar {
                name,
                leaf_type: *leaf_type,
                leaf_list: true,
                text: String::new(),
            },
        };
        self.stack.push(frame);
        Ok(())
    }

    /// Children of a mount-point container resolve against the mounted
    /// context's top level instead of the host schema node.
    fn child_scope(&self, schema: &'s SchemaNode) -> Scope<'s> {
        self.context
            .mount_for(schema.name())
            .map_or(Scope::Node(schema), Scope::Mounted)
    }

    fn on_text(&mut self, raw: &BytesText<'_>) -> Result<(), XmlError> {
        let decoded = raw
            .decode()
            .map_err(|e| XmlError::Parse(e.to_string()))?;
        let unescaped =
            quick_xml::escape::unescape(&decoded).map_err(|e| XmlError::Parse(e.to_string()))?;
        match self.stack.last_mut() {
            Some(Frame::Scalar { text, .. }) => {
                text.push_str(&unescaped);
                Ok(())
            }
            _ => Err(XmlError::Parse(format!(
                "mixed content at {}",
                self.current_path()
            ))),
        }
    }

    fn on_end(&mut self) -> Result<(), XmlError> {
        let Some(frame) = self.stack.pop() else {
            return Err(XmlError::Parse("unbalanced end tag".to_string()));
        };

        match frame {
            Frame::Scalar {
                name,
                leaf_type,
                leaf_list,
                text,
            } => {
                let value =
                    ScalarValue::parse_text(leaf_type, &text).map_err(|e| XmlError::Value {
                        path: self.current_path(),
                        source: e,
                    })?;
                self.path.pop();
                if leaf_list {
                    self.attach_leaf_list_entry(name, value)
                } else {
                    self.attach(DataNode::Leaf { name, value })
                }
            }
            Frame::Inner {
                name,
                schema,
                children,
                entry,
                ..
            } => {
                if entry {
                    let entry = self.build_entry(schema, children)?;
                    self.path.pop();
                    self.attach_list_entry(name, entry)
                } else {
                    self.path.pop();
                    self.attach(DataNode::Container { name, children })
                }
            }
        }
    }

    /// Pull key leaves out of an entry's children, in schema key order.
    fn build_entry(
        &self,
        schema: &SchemaNode,
        mut children: Vec<DataNode>,
    ) -> Result<ListEntry, XmlError> {
        let mut keys = Vec::with_capacity(schema.key_names().len());
        for key_name in schema.key_names() {
            let position = children.iter().position(|c| {
                matches!(c, DataNode::Leaf { name, .. }
                    if name.matches(&key_name.namespace, &key_name.local))
            });
            let Some(position) = position else {
                return Err(XmlError::SchemaMismatch {
                    path: self.current_path(),
                    detail: format!("missing key leaf {key_name}"),
                });
            };
            let DataNode::Leaf { name, value } = children.remove(position) else {
                unreachable!("position matched a leaf");
            };
            keys.push((name, value));
        }
        Ok(ListEntry::new(keys, children))
    }

    fn attach(&mut self, node: DataNode) -> Result<(), XmlError> {
        match self.stack.last_mut() {
            Some(Frame::Inner { children, .. }) => {
                let name = node.name();
                if children
                    .iter()
                    .any(|c| c.name().matches(&name.namespace, &name.local))
                {
                    return Err(XmlError::SchemaMismatch {
                        path: format!("{}/{name}", self.current_path()),
                        detail: "duplicate element".to_string(),
                    });
                }
                children.push(node);
                Ok(())
            }
            Some(Frame::Scalar { .. }) => unreachable!("guarded in on_start"),
            None => self.finish_root(node),
        }
    }

    fn attach_leaf_list_entry(&mut self, name: QName, value: ScalarValue) -> Result<(), XmlError> {
        match self.stack.last_mut() {
            Some(Frame::Inner { children, .. }) => {
                let existing = children.iter_mut().find_map(|c| match c {
                    DataNode::LeafList { name: n, entries }
                        if n.matches(&name.namespace, &name.local) =>
                    {
                        Some(entries)
                    }
                    _ => None,
                });
                if let Some(entries) = existing {
                    entries.push(value);
                } else {
                    children.push(DataNode::LeafList {
                        name,
                        entries: vec![value],
                    });
                }
                Ok(())
            }
            Some(Frame::Scalar { .. }) => unreachable!("guarded in on_start"),
            None => self.finish_root(DataNode::LeafList {
                name,
                entries: vec![value],
            }),
        }
    }

    fn attach_list_entry(&mut self, name: QName, entry: ListEntry) -> Result<(), XmlError> {
        match self.stack.last_mut() {
            Some(Frame::Inner { children, .. }) => {
                let existing = children.iter_mut().find_map(|c| match c {
                    DataNode::List { name: n, entries }
                        if n.matches(&name.namespace, &name.local) =>
                    {
                        Some(entries)
                    }
                    _ => None,
                });
                if let Some(entries) = existing {
                    entries.push(entry);
                } else {
                    children.push(DataNode::List {
                        name,
                        entries: vec![entry],
                    });
                }
                Ok(())
            }
            Some(Frame::Scalar { .. }) => unreachable!("guarded in on_start"),
            None => self.finish_root(DataNode::List {
                name,
                entries: vec![entry],
            }),
        }
    }

    fn finish_root(&mut self, node: DataNode) -> Result<(), XmlError> {
        if self.result.is_some() {
            return Err(XmlError::Parse("multiple document roots".to_string()));
        }
        self.result = Some(node);
        Ok(())
    }

    fn mismatch(&self, namespace: &str, local: &str, detail: &str) -> XmlError {
        XmlError::SchemaMismatch {
            path: format!("{}/{{{namespace}}}{local}", self.current_path()),
            detail: detail.to_string(),
        }
    }

    fn current_path(&self) -> String {
        if self.path.is_empty() {
            String::new()
        } else {
            format!("/{}", self.path.join("/"))
        }
    }
}

fn bound_namespace(resolution: &ResolveResult<'_>) -> String {
    match resolution {
        ResolveResult::Bound(ns) => String::from_utf8_lossy(ns.as_ref()).into_owned(),
        _ => String::new(),
    }
}

fn local_name(raw: &[u8]) -> Result<String, XmlError> {
    std::str::from_utf8(raw)
        .map(ToString::to_string)
        .map_err(|e| XmlError::Parse(e.to_string()))
}
