//! Qualified names and node identifiers.
//!
//! A [`QName`] names one schema or data node: a namespace URI, an
//! optional module revision, and a local name. A [`PathArg`] is one step
//! of an identifier; list-entry steps carry key predicates that
//! distinguish siblings. A [`DataPath`] is the ordered sequence of steps
//! from the conceptual root to a target node.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value::ScalarValue;

/// A qualified node name: namespace URI, optional revision, local name.
///
/// Wire matching compares namespace and local name only; a received
/// document carries no revision information.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QName {
    /// Namespace URI of the defining module.
    pub namespace: String,
    /// Module revision, if known.
    pub revision: Option<String>,
    /// Local element name.
    pub local: String,
}

impl QName {
    /// Create a qualified name without a revision.
    #[must_use]
    pub fn new(namespace: impl Into<String>, local: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            revision: None,
            local: local.into(),
        }
    }

    /// Create a revision-qualified name.
    #[must_use]
    pub fn with_revision(
        namespace: impl Into<String>,
        revision: impl Into<String>,
        local: impl Into<String>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            revision: Some(revision.into()),
            local: local.into(),
        }
    }

    /// Whether this name matches the given namespace and local name,
    /// ignoring revision.
    #[must_use]
    pub fn matches(&self, namespace: &str, local: &str) -> bool {
        self.namespace == namespace && self.local == local
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}{}", self.namespace, self.local)
    }
}

/// One step of a node identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PathArg {
    /// A container, leaf, leaf-list, or whole-list step.
    Node(QName),
    /// A list-entry step with key predicates distinguishing siblings.
    ListEntry {
        /// The list name.
        name: QName,
        /// Key predicates, in schema key order.
        keys: Vec<(QName, ScalarValue)>,
    },
}

impl PathArg {
    /// The qualified name of this step.
    #[must_use]
    pub fn name(&self) -> &QName {
        match self {
            Self::Node(name) | Self::ListEntry { name, .. } => name,
        }
    }
}

impl fmt::Display for PathArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Node(name) => write!(f, "{name}"),
            Self::ListEntry { name, keys } => {
                write!(f, "{name}[")?;
                for (i, (key, value)) in keys.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}={}", key.local, value.render_text())?;
                }
                f.write_str("]")
            }
        }
    }
}

/// An ordered sequence of path arguments locating a node in the tree.
///
/// The empty path denotes the root itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DataPath(Vec<PathArg>);

impl DataPath {
    /// The empty path, denoting the root.
    #[must_use]
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Build a path from explicit arguments.
    #[must_use]
    pub fn of(args: Vec<PathArg>) -> Self {
        Self(args)
    }

    /// Extend with a plain node step.
    #[must_use]
    pub fn node(mut self, name: QName) -> Self {
        self.0.push(PathArg::Node(name));
        self
    }

    /// Extend with a list-entry step.
    #[must_use]
    pub fn entry(mut self, name: QName, keys: Vec<(QName, ScalarValue)>) -> Self {
        self.0.push(PathArg::ListEntry { name, keys });
        self
    }

    /// The path arguments, root-most first.
    #[must_use]
    pub fn args(&self) -> &[PathArg] {
        &self.0
    }

    /// Whether this path denotes the root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of steps in the path.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for DataPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("/");
        }
        for arg in &self.0 {
            write!(f, "/{arg}")?;
        }
        Ok(())
    }
}
