//! Error types for the YangWire XML codec.

use std::io;

use yangwire_model::ModelError;

/// Errors raised while transcoding between normalized data and XML.
#[derive(Debug, thiserror::Error)]
pub enum XmlError {
    /// An I/O error outside the element-writing path.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// An error from the underlying quick-xml library.
    #[error("XML processing error: {0}")]
    QuickXml(#[from] quick_xml::Error),

    /// An error from quick-xml attribute handling.
    #[error("XML attribute error: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    /// A stream fault while writing, tagged with the node being visited.
    #[error("stream fault while writing {path}: {source}")]
    Write {
        /// Path of the node being encoded when the sink faulted.
        path: String,
        /// The underlying sink error.
        #[source]
        source: io::Error,
    },

    /// A structurally malformed document.
    #[error("malformed document: {0}")]
    Parse(String),

    /// An element that does not correspond to a known schema child.
    #[error("element at {path} does not match schema: {detail}")]
    SchemaMismatch {
        /// Path of the offending element.
        path: String,
        /// What the mismatch was.
        detail: String,
    },

    /// A filter path that cannot be resolved against the schema. This is
    /// a caller contract violation; nothing is committed to the sink.
    #[error("filter path not resolvable at {path}")]
    Precondition {
        /// The unresolvable step, with its resolved ancestry.
        path: String,
    },

    /// A leaf's text content that does not parse as its declared type.
    #[error("invalid value at {path}: {source}")]
    Value {
        /// Path of the offending leaf.
        path: String,
        /// The underlying scalar codec error.
        #[source]
        source: ModelError,
    },

    /// The one-time namespace capability probe failed; no encode call can
    /// produce correct XML.
    #[error("namespace capability probe failed: {0}")]
    Probe(#[from] ProbeError),

    /// A received document that is not an affirmative reply envelope.
    #[error("received document is not an ok reply: {0}")]
    NotOkReply(String),
}

/// Failure of the one-time namespace capability probe.
///
/// Cloneable so the cached probe outcome can be handed to every
/// subsequent caller.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{0}")]
pub struct ProbeError(pub(crate) String);
