//! The two-state node message envelope.

use std::io::{Read, Write};

use yangwire_model::{DataNode, DataPath};

use crate::codec;
use crate::error::MsgError;

/// A message carrying a data tree together with the path it belongs at.
///
/// The two states are explicit: a message is either [`Empty`], the
/// receive-side starting point, or [`Populated`] with both fields
/// present. There is no half-populated state, and a failed
/// [`deserialize`](Self::deserialize) leaves the message exactly as it
/// was.
///
/// [`Empty`]: NodeMessage::Empty
/// [`Populated`]: NodeMessage::Populated
#[derive(Debug, Clone, PartialEq, Default)]
pub enum NodeMessage {
    /// No payload yet; the state a receiver starts from.
    #[default]
    Empty,
    /// A path and the data tree rooted there.
    Populated {
        /// Where the tree belongs, from the conceptual root.
        path: DataPath,
        /// The data tree itself.
        node: DataNode,
    },
}

impl NodeMessage {
    /// An empty message, ready to receive into.
    #[must_use]
    pub fn empty() -> Self {
        Self::Empty
    }

    /// A populated message.
    #[must_use]
    pub fn of(path: DataPath, node: DataNode) -> Self {
        Self::Populated { path, node }
    }

    /// The path, if populated.
    #[must_use]
    pub fn path(&self) -> Option<&DataPath> {
        match self {
            Self::Empty => None,
            Self::Populated { path, .. } => Some(path),
        }
    }

    /// The data tree, if populated.
    #[must_use]
    pub fn node(&self) -> Option<&DataNode> {
        match self {
            Self::Empty => None,
            Self::Populated { node, .. } => Some(node),
        }
    }

    /// Whether the message carries a payload.
    #[must_use]
    pub fn is_populated(&self) -> bool {
        matches!(self, Self::Populated { .. })
    }

    /// Consume the message, yielding its payload if populated.
    #[must_use]
    pub fn into_parts(self) -> Option<(DataPath, DataNode)> {
        match self {
            Self::Empty => None,
            Self::Populated { path, node } => Some((path, node)),
        }
    }

    /// Encode the payload into the sink.
    ///
    /// # Errors
    ///
    /// Returns [`MsgError::Empty`] for an empty message, or
    /// [`MsgError::Encode`] if the sink faults.
    pub fn serialize<W: Write>(&self, out: W) -> Result<(), MsgError> {
        match self {
            Self::Empty => Err(MsgError::Empty),
            Self::Populated { path, node } => codec::write_path_and_node(out, path, node),
        }
    }

    /// Decode a payload from the input, replacing this message.
    ///
    /// Decodes into locals first and replaces `self` wholesale, so a
    /// failed decode leaves the previous state untouched.
    ///
    /// # Errors
    ///
    /// Returns [`MsgError::Decode`] for truncated or malformed input.
    pub fn deserialize<R: Read>(&mut self, input: R) -> Result<(), MsgError> {
        let (path, node) = codec::read_path_and_node(input)?;
        *self = Self::Populated { path, node };
        Ok(())
    }
}
