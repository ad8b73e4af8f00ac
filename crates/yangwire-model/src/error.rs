//! Error types for the YangWire data model.

/// Errors raised by model-level validation and the scalar text codec.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// A leaf's text content does not parse as the schema-declared type.
    #[error("cannot parse {text:?} as {kind} leaf value")]
    Scalar {
        /// Name of the expected leaf type.
        kind: &'static str,
        /// The offending text content.
        text: String,
    },

    /// An annotation path does not resolve to an existing data node.
    #[error("annotation path {0} does not resolve to a data node")]
    AnnotationWithoutData(String),
}
