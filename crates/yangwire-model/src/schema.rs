//! Read-only schema model the codecs validate against.
//!
//! The codec layer only ever queries this model: resolve a child schema
//! node by qualified name under a parent, fetch a list's key order, read
//! a leaf's declared type. Construction happens up front (typically from
//! a compiled module set); nothing here is mutated after that.

use std::collections::HashMap;
use std::sync::Arc;

use crate::path::QName;

/// Declared type of a leaf or leaf-list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeafType {
    /// Arbitrary string.
    String,
    /// Signed 64-bit integer.
    Int,
    /// Unsigned 64-bit integer.
    Uint,
    /// Boolean.
    Bool,
    /// Opaque binary, base64 on the wire.
    Binary,
    /// ISO 8601 date-and-time.
    Timestamp,
    /// Presence-only leaf with no content.
    Empty,
}

/// Structural kind of a schema node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaKind {
    /// Interior node holding named children.
    Container,
    /// Keyed list; entries are distinguished by the named key leaves.
    List {
        /// Key leaf names, in declaration order.
        keys: Vec<QName>,
    },
    /// Leaf carrying a typed scalar.
    Leaf(LeafType),
    /// Leaf-list carrying ordered typed scalars.
    LeafList(LeafType),
}

/// One node of the schema tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaNode {
    name: QName,
    kind: SchemaKind,
    children: Vec<SchemaNode>,
}

impl SchemaNode {
    /// Create a container schema node.
    #[must_use]
    pub fn container(name: QName) -> Self {
        Self {
            name,
            kind: SchemaKind::Container,
            children: Vec::new(),
        }
    }

    /// Create a keyed-list schema node.
    #[must_use]
    pub fn list(name: QName, keys: Vec<QName>) -> Self {
        Self {
            name,
            kind: SchemaKind::List { keys },
            children: Vec::new(),
        }
    }

    /// Create a leaf schema node.
    #[must_use]
    pub fn leaf(name: QName, leaf_type: LeafType) -> Self {
        Self {
            name,
            kind: SchemaKind::Leaf(leaf_type),
            children: Vec::new(),
        }
    }

    /// Create a leaf-list schema node.
    #[must_use]
    pub fn leaf_list(name: QName, leaf_type: LeafType) -> Self {
        Self {
            name,
            kind: SchemaKind::LeafList(leaf_type),
            children: Vec::new(),
        }
    }

    /// Append a child schema node, builder style.
    #[must_use]
    pub fn with_child(mut self, child: SchemaNode) -> Self {
        self.children.push(child);
        self
    }

    /// Qualified name of this node.
    #[must_use]
    pub fn name(&self) -> &QName {
        &self.name
    }

    /// Structural kind of this node.
    #[must_use]
    pub fn kind(&self) -> &SchemaKind {
        &self.kind
    }

    /// Resolve a direct child by namespace and local name.
    #[must_use]
    pub fn child(&self, namespace: &str, local: &str) -> Option<&SchemaNode> {
        self.children.iter().find(|c| c.name.matches(namespace, local))
    }

    /// Declared children, in schema order.
    #[must_use]
    pub fn children(&self) -> &[SchemaNode] {
        &self.children
    }

    /// Key leaf names if this is a list, empty otherwise.
    #[must_use]
    pub fn key_names(&self) -> &[QName] {
        match &self.kind {
            SchemaKind::List { keys } => keys,
            _ => &[],
        }
    }

    /// Declared leaf type if this is a leaf or leaf-list.
    #[must_use]
    pub fn leaf_type(&self) -> Option<LeafType> {
        match self.kind {
            SchemaKind::Leaf(t) | SchemaKind::LeafList(t) => Some(t),
            _ => None,
        }
    }
}

/// A compiled schema: the set of top-level data nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaContext {
    top: Vec<SchemaNode>,
}

impl SchemaContext {
    /// Create a schema context from its top-level nodes.
    #[must_use]
    pub fn new(top: Vec<SchemaNode>) -> Self {
        Self { top }
    }

    /// Top-level schema nodes, in declaration order.
    #[must_use]
    pub fn top(&self) -> &[SchemaNode] {
        &self.top
    }

    /// Resolve a top-level node by namespace and local name.
    #[must_use]
    pub fn child(&self, namespace: &str, local: &str) -> Option<&SchemaNode> {
        self.top.iter().find(|c| c.name().matches(namespace, local))
    }
}

/// A schema context composed across mount points.
///
/// A mount point grafts a foreign schema under a container of the host
/// schema: children of that container resolve against the mounted
/// context's top level instead of the host node's children.
#[derive(Debug, Clone)]
pub struct MountPointContext {
    context: Arc<SchemaContext>,
    mounts: HashMap<QName, Arc<SchemaContext>>,
}

impl MountPointContext {
    /// Wrap a bare schema context with no mount points.
    #[must_use]
    pub fn empty(context: Arc<SchemaContext>) -> Self {
        Self {
            context,
            mounts: HashMap::new(),
        }
    }

    /// Register a mounted schema under the named host container.
    #[must_use]
    pub fn with_mount(mut self, at: QName, mounted: Arc<SchemaContext>) -> Self {
        self.mounts.insert(at, mounted);
        self
    }

    /// The host schema context.
    #[must_use]
    pub fn context(&self) -> &SchemaContext {
        &self.context
    }

    /// The schema mounted under the given container, if any.
    #[must_use]
    pub fn mount_for(&self, at: &QName) -> Option<&SchemaContext> {
        self.mounts.get(at).map(Arc::as_ref)
    }
}
