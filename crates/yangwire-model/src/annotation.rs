//! Out-of-band metadata parallel to the data tree.
//!
//! An [`AnnotationNode`] mirrors the shape of a data subtree and carries
//! attribute pairs to be rendered on the corresponding elements.
//! Annotations never introduce data nodes of their own; every child path
//! must resolve to an existing node in the data tree it accompanies.

use crate::error::ModelError;
use crate::path::PathArg;
use crate::tree::{DataNode, StepTarget};

/// One attribute to render on an element, e.g. `op:operation="merge"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    /// Attribute local name, qualified with the operations prefix on
    /// the wire.
    pub name: String,
    /// Attribute value.
    pub value: String,
}

/// Metadata attached to one data node and, recursively, its descendants.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnotationNode {
    attrs: Vec<Annotation>,
    children: Vec<(PathArg, AnnotationNode)>,
}

impl AnnotationNode {
    /// An annotation node with no attributes or children.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach an attribute, builder style.
    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push(Annotation {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    /// Attach a child annotation under the given path step.
    #[must_use]
    pub fn child(mut self, arg: PathArg, node: AnnotationNode) -> Self {
        self.children.push((arg, node));
        self
    }

    /// Attributes to render on the corresponding element.
    #[must_use]
    pub fn attrs(&self) -> &[Annotation] {
        &self.attrs
    }

    /// The child annotation for the given path step, if any.
    #[must_use]
    pub fn child_for(&self, arg: &PathArg) -> Option<&AnnotationNode> {
        self.children
            .iter()
            .find(|(a, _)| a == arg)
            .map(|(_, n)| n)
    }

    /// Check that every annotation path resolves to a node of `data`.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::AnnotationWithoutData`] naming the first
    /// step that has no data counterpart.
    pub fn validate_against(&self, data: &DataNode) -> Result<(), ModelError> {
        self.validate_children(StepTarget::Node(data), String::new())
    }

    fn validate_children(&self, target: StepTarget<'_>, prefix: String) -> Result<(), ModelError> {
        for (arg, child) in &self.children {
            let path = format!("{prefix}/{arg}");
            let Some(next) = target.resolve_step(arg) else {
                return Err(ModelError::AnnotationWithoutData(path));
            };
            child.validate_children(next, path)?;
        }
        Ok(())
    }
}
