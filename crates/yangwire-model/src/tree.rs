//! The normalized data tree.
//!
//! A [`DataNode`] is the wire-independent form of one subtree of
//! management data. Sibling names under one parent are unique: repeated
//! list entries and leaf-list entries fold into a single `List` /
//! `LeafList` node whose entries preserve document order. List keys live
//! in the entry's key map (in schema key order), not in its children.

use serde::{Deserialize, Serialize};

use crate::path::{PathArg, QName};
use crate::value::ScalarValue;

/// One node of the normalized data tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataNode {
    /// Interior node with ordered, uniquely named children.
    Container {
        /// Qualified name of the container.
        name: QName,
        /// Children in tree order.
        children: Vec<DataNode>,
    },
    /// Keyed list holding ordered entries.
    List {
        /// Qualified name shared by all entries.
        name: QName,
        /// Entries in tree order.
        entries: Vec<ListEntry>,
    },
    /// Leaf carrying one typed scalar.
    Leaf {
        /// Qualified name of the leaf.
        name: QName,
        /// The scalar payload.
        value: ScalarValue,
    },
    /// Leaf-list holding ordered scalar entries.
    LeafList {
        /// Qualified name shared by all entries.
        name: QName,
        /// Entry values in tree order.
        entries: Vec<ScalarValue>,
    },
}

/// One entry of a keyed list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListEntry {
    /// Key values in schema key order.
    pub keys: Vec<(QName, ScalarValue)>,
    /// Non-key children in tree order.
    pub children: Vec<DataNode>,
}

impl DataNode {
    /// Create a container node.
    #[must_use]
    pub fn container(name: QName, children: Vec<DataNode>) -> Self {
        Self::Container { name, children }
    }

    /// Create a list node.
    #[must_use]
    pub fn list(name: QName, entries: Vec<ListEntry>) -> Self {
        Self::List { name, entries }
    }

    /// Create a leaf node.
    #[must_use]
    pub fn leaf(name: QName, value: ScalarValue) -> Self {
        Self::Leaf { name, value }
    }

    /// Create a leaf-list node.
    #[must_use]
    pub fn leaf_list(name: QName, entries: Vec<ScalarValue>) -> Self {
        Self::LeafList { name, entries }
    }

    /// Qualified name of this node.
    #[must_use]
    pub fn name(&self) -> &QName {
        match self {
            Self::Container { name, .. }
            | Self::List { name, .. }
            | Self::Leaf { name, .. }
            | Self::LeafList { name, .. } => name,
        }
    }

    /// Children of a container, empty for other kinds.
    #[must_use]
    pub fn children(&self) -> &[DataNode] {
        match self {
            Self::Container { children, .. } => children,
            _ => &[],
        }
    }

    /// Look up a direct child of a container by name.
    #[must_use]
    pub fn child(&self, namespace: &str, local: &str) -> Option<&DataNode> {
        self.children()
            .iter()
            .find(|c| c.name().matches(namespace, local))
    }

    /// Resolve one path step against this node.
    ///
    /// A `Node` step matches a child of any kind by name. A `ListEntry`
    /// step selects one entry of a child list by its keys; against a
    /// list node naming the list itself it selects one of the node's
    /// own entries, so entries of a list-rooted tree are addressable.
    #[must_use]
    pub fn resolve_step<'a>(&'a self, arg: &PathArg) -> Option<StepTarget<'a>> {
        match arg {
            PathArg::Node(name) => self
                .child(&name.namespace, &name.local)
                .map(StepTarget::Node),
            PathArg::ListEntry { name, keys } => {
                if let Self::List { name: own, entries } = self
                    && own.matches(&name.namespace, &name.local)
                {
                    return entries
                        .iter()
                        .find(|e| e.keys == *keys)
                        .map(StepTarget::Entry);
                }
                match self.child(&name.namespace, &name.local)? {
                    DataNode::List { entries, .. } => entries
                        .iter()
                        .find(|e| e.keys == *keys)
                        .map(StepTarget::Entry),
                    _ => None,
                }
            }
        }
    }
}

impl ListEntry {
    /// Create an entry from keys and non-key children.
    #[must_use]
    pub fn new(keys: Vec<(QName, ScalarValue)>, children: Vec<DataNode>) -> Self {
        Self { keys, children }
    }

    /// Look up a direct non-key child by name.
    #[must_use]
    pub fn child(&self, namespace: &str, local: &str) -> Option<&DataNode> {
        self.children
            .iter()
            .find(|c| c.name().matches(namespace, local))
    }

    /// Resolve one path step against this entry's children.
    #[must_use]
    pub fn resolve_step<'a>(&'a self, arg: &PathArg) -> Option<StepTarget<'a>> {
        match arg {
            PathArg::Node(name) => self
                .child(&name.namespace, &name.local)
                .map(StepTarget::Node),
            PathArg::ListEntry { name, keys } => {
                match self.child(&name.namespace, &name.local)? {
                    DataNode::List { entries, .. } => entries
                        .iter()
                        .find(|e| e.keys == *keys)
                        .map(StepTarget::Entry),
                    _ => None,
                }
            }
        }
    }
}

/// The target of one resolved path step: either a named node or one
/// entry of a list.
#[derive(Debug, Clone, Copy)]
pub enum StepTarget<'a> {
    /// A container, list, leaf, or leaf-list child.
    Node(&'a DataNode),
    /// One keyed entry of a list child.
    Entry(&'a ListEntry),
}

impl<'a> StepTarget<'a> {
    /// Resolve a further path step beneath this target.
    #[must_use]
    pub fn resolve_step(&self, arg: &PathArg) -> Option<StepTarget<'a>> {
        match self {
            Self::Node(node) => node.resolve_step(arg),
            Self::Entry(entry) => entry.resolve_step(arg),
        }
    }
}
