//! NETCONF-style XML transcoding for `YangWire`.
//!
//! This crate converts between normalized data trees and the XML wire
//! format, handling encode, decode, subtree filters, and reply
//! checking.
//!
//! # Key components
//!
//! - [`write_tree`] and [`write_tree_with_annotations`] for encoding a
//!   tree into an XML sink, schema-checked element by element
//! - [`read_tree`] and [`read_tree_in`] for decoding a document back
//!   into a tree, including across schema mount points
//! - [`write_filter`] for serializing a data path as a subtree filter
//! - [`check_reply_ok`] for validating an affirmative `rpc-reply`
//! - [`namespace_strategy`] for the one-time, cached capability probe
//!   that picks where `xmlns:op` declarations are placed
//!
//! # XML conventions
//!
//! - Base protocol namespace: `urn:ietf:params:xml:ns:netconf:base:1.0`
//! - Element namespaces: default `xmlns` declarations, re-declared only
//!   where the namespace changes from the parent
//! - Annotation attributes: qualified with the `op` prefix
//! - Booleans: lowercase `true`/`false`
//! - Timestamps: ISO 8601 with millisecond precision (`2006-02-03T16:45:09.000Z`)

pub mod deserialize;
pub mod error;
pub mod filter;
pub mod namespaces;
pub mod reply;
pub mod serialize;

pub use deserialize::{read_tree, read_tree_in};
pub use error::{ProbeError, XmlError};
pub use filter::write_filter;
pub use namespaces::{NETCONF_NAMESPACE, NsStrategy, OPERATIONS_PREFIX, namespace_strategy};
pub use reply::check_reply_ok;
pub use serialize::{write_tree, write_tree_with_annotations};
