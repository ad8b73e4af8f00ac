//! Normalized data model for `YangWire`.
//!
//! This crate defines the wire-independent representation of management
//! data: an ordered, schema-typed tree ([`DataNode`]), the identifiers
//! that locate nodes within it ([`DataPath`]), typed leaf payloads
//! ([`ScalarValue`]) with their textual codec, the parallel annotation
//! tree ([`AnnotationNode`]), and the read-only schema model
//! ([`schema`]) the codecs validate against.
//!
//! Types that cross a serialization boundary (paths and tree fragments)
//! derive serde traits so the message layer can ship them as one
//! self-describing unit.

pub mod annotation;
pub mod error;
pub mod path;
pub mod schema;
pub mod tree;
pub mod value;

pub use annotation::{Annotation, AnnotationNode};
pub use error::ModelError;
pub use path::{DataPath, PathArg, QName};
pub use schema::{LeafType, MountPointContext, SchemaContext, SchemaKind, SchemaNode};
pub use tree::{DataNode, ListEntry};
pub use value::ScalarValue;
