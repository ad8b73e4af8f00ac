//! Error types for the YangWire message envelope.

use std::io;

/// Errors raised while encoding or decoding a node message.
#[derive(Debug, thiserror::Error)]
pub enum MsgError {
    /// An attempt to serialize a message that carries no payload.
    #[error("cannot serialize an empty node message")]
    Empty,

    /// A CBOR encoding failure.
    #[error("message encode error: {0}")]
    Encode(#[from] ciborium::ser::Error<io::Error>),

    /// A CBOR decoding failure.
    #[error("message decode error: {0}")]
    Decode(#[from] ciborium::de::Error<io::Error>),
}
