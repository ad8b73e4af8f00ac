//! Point-to-point message envelope for `YangWire`.
//!
//! This crate moves a normalized data tree and the path it belongs at
//! between peers as one self-describing CBOR unit.
//!
//! # Key components
//!
//! - [`NodeMessage`] — the explicit two-state envelope: empty on the
//!   receive side, populated with `(path, node)` on the send side
//! - [`codec`] — the underlying path+tree binary codec

pub mod codec;
pub mod envelope;
pub mod error;

pub use codec::{read_path_and_node, write_path_and_node};
pub use envelope::NodeMessage;
pub use error::MsgError;
