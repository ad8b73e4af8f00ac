//! Binary codec for a `(path, node)` unit.
//!
//! The path and its data tree always travel together as one
//! self-describing CBOR value, so a reader needs no out-of-band length
//! or version information to decode it.

use std::io::{Read, Write};

use serde::{Deserialize, Serialize};

use yangwire_model::{DataNode, DataPath};

use crate::error::MsgError;

#[derive(Serialize)]
struct UnitRef<'a> {
    path: &'a DataPath,
    node: &'a DataNode,
}

#[derive(Deserialize)]
struct Unit {
    path: DataPath,
    node: DataNode,
}

/// Encode a path and its data tree into the sink as one CBOR unit.
///
/// # Errors
///
/// Returns [`MsgError::Encode`] if the sink faults or a value cannot be
/// represented.
pub fn write_path_and_node<W: Write>(
    out: W,
    path: &DataPath,
    node: &DataNode,
) -> Result<(), MsgError> {
    ciborium::into_writer(&UnitRef { path, node }, out)?;
    Ok(())
}

/// Decode one CBOR unit back into its path and data tree.
///
/// # Errors
///
/// Returns [`MsgError::Decode`] for truncated or malformed input.
pub fn read_path_and_node<R: Read>(input: R) -> Result<(DataPath, DataNode), MsgError> {
    let unit: Unit = ciborium::from_reader(input)?;
    Ok((unit.path, unit.node))
}
