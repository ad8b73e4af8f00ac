//! Integration tests for the YangWire transcoder.
//!
//! These tests exercise the crates together: model trees through the
//! XML codec and back, filters against the shared schema, and the
//! message envelope over the model's serde impls. They run under plain
//! `cargo test`; no external process is involved.

use std::sync::{Arc, Once};

use yangwire_model::{
    DataNode, LeafType, ListEntry, QName, ScalarValue, SchemaContext, SchemaNode,
};

/// Namespace of the device test schema.
pub const DEVICE_NS: &str = "urn:example:device";

static INIT: Once = Once::new();

/// Initialize tracing (once).
pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

/// Qualified name in the device namespace.
#[must_use]
pub fn qn(local: &str) -> QName {
    QName::new(DEVICE_NS, local)
}

/// The shared device schema: a `system` container of assorted leaf
/// types and an `interfaces` container holding a keyed list.
#[must_use]
pub fn device_schema() -> Arc<SchemaContext> {
    init_tracing();
    Arc::new(SchemaContext::new(vec![
        SchemaNode::container(qn("system"))
            .with_child(SchemaNode::leaf(qn("hostname"), LeafType::String))
            .with_child(SchemaNode::leaf(qn("enabled"), LeafType::Bool))
            .with_child(SchemaNode::leaf(qn("fingerprint"), LeafType::Binary))
            .with_child(SchemaNode::leaf(qn("last-boot"), LeafType::Timestamp))
            .with_child(SchemaNode::leaf(qn("maintenance-mode"), LeafType::Empty))
            .with_child(SchemaNode::leaf_list(qn("ntp-server"), LeafType::String)),
        SchemaNode::container(qn("interfaces")).with_child(
            SchemaNode::list(qn("interface"), vec![qn("name")])
                .with_child(SchemaNode::leaf(qn("name"), LeafType::String))
                .with_child(SchemaNode::leaf(qn("mtu"), LeafType::Uint))
                .with_child(SchemaNode::leaf_list(qn("address"), LeafType::String))
                .with_child(
                    SchemaNode::container(qn("statistics"))
                        .with_child(SchemaNode::leaf(qn("in-octets"), LeafType::Uint)),
                ),
        ),
    ]))
}

/// A top-level schema node from the device schema, cloned for use as an
/// encode anchor.
///
/// # Panics
///
/// Panics if the name is not a top-level node of the device schema.
#[must_use]
pub fn device_anchor(local: &str) -> SchemaNode {
    device_schema()
        .child(DEVICE_NS, local)
        .unwrap_or_else(|| panic!("no top-level schema node named {local}"))
        .clone()
}

/// An `interfaces` tree with two entries and a folded leaf-list.
#[must_use]
pub fn interfaces_tree() -> DataNode {
    DataNode::container(
        qn("interfaces"),
        vec![DataNode::list(
            qn("interface"),
            vec![
                ListEntry::new(
                    vec![(qn("name"), ScalarValue::Str("eth0".to_string()))],
                    vec![
                        DataNode::leaf(qn("mtu"), ScalarValue::Uint(1500)),
                        DataNode::leaf_list(
                            qn("address"),
                            vec![
                                ScalarValue::Str("10.0.0.1".to_string()),
                                ScalarValue::Str("10.0.0.2".to_string()),
                            ],
                        ),
                        DataNode::container(
                            qn("statistics"),
                            vec![DataNode::leaf(qn("in-octets"), ScalarValue::Uint(912_044))],
                        ),
                    ],
                ),
                ListEntry::new(
                    vec![(qn("name"), ScalarValue::Str("eth1".to_string()))],
                    vec![DataNode::leaf(qn("mtu"), ScalarValue::Uint(9000))],
                ),
            ],
        )],
    )
}

/// A `system` tree covering every scalar shape the codec supports.
#[must_use]
pub fn system_tree() -> DataNode {
    use chrono::TimeZone;

    let boot = chrono::Utc
        .with_ymd_and_hms(2024, 5, 17, 8, 30, 0)
        .single()
        .unwrap_or_else(|| unreachable!("fixed timestamp is unambiguous"));
    DataNode::container(
        qn("system"),
        vec![
            DataNode::leaf(qn("hostname"), ScalarValue::Str("router0".to_string())),
            DataNode::leaf(qn("enabled"), ScalarValue::Bool(true)),
            DataNode::leaf(
                qn("fingerprint"),
                ScalarValue::Binary(bytes::Bytes::from_static(b"\x01\x02\xfe\xff")),
            ),
            DataNode::leaf(qn("last-boot"), ScalarValue::Timestamp(boot)),
            DataNode::leaf(qn("maintenance-mode"), ScalarValue::Empty),
            DataNode::leaf_list(
                qn("ntp-server"),
                vec![
                    ScalarValue::Str("ntp1.example.com".to_string()),
                    ScalarValue::Str("ntp2.example.com".to_string()),
                ],
            ),
        ],
    )
}

mod test_annotations;
mod test_envelope;
mod test_fault;
mod test_filter;
mod test_probe;
mod test_reply;
mod test_roundtrip;
