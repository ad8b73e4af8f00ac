//! Protocol namespace constants and the capability probe.
//!
//! Annotation attributes are qualified with the operations prefix, which
//! must resolve correctly from the first element of an encoded document
//! onward. XML writer backends disagree on whether a namespace
//! declaration placed once on the root element is honored for attributes
//! on nested elements, so the declaration strategy is probed exactly
//! once per process against a discarded document and cached: the probe
//! writes a root-level declaration with a nested prefixed attribute,
//! reads the document back through the namespace-resolving reader, and
//! checks the attribute resolves to the operations namespace.

use std::sync::OnceLock;

use quick_xml::NsReader;
use quick_xml::Writer;
use quick_xml::events::Event;
use quick_xml::name::ResolveResult;

use crate::error::ProbeError;

/// The NETCONF base protocol namespace.
pub const NETCONF_NAMESPACE: &str = "urn:ietf:params:xml:ns:netconf:base:1.0";

/// Prefix under which annotation attributes are written.
pub const OPERATIONS_PREFIX: &str = "op";

/// Local name of the synthetic data-root element.
pub const DATA_ELEMENT: &str = "data";

/// Local name of the reply envelope element.
pub const RPC_REPLY_ELEMENT: &str = "rpc-reply";

/// Local name of the affirmative reply marker.
pub const OK_ELEMENT: &str = "ok";

/// How the operations namespace is declared for annotation attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NsStrategy {
    /// Declare `xmlns:op` once on the root element; nested prefixed
    /// attributes resolve against it.
    RootContext,
    /// Declare `xmlns:op` on every element that carries annotation
    /// attributes.
    PerElement,
}

static STRATEGY: OnceLock<Result<NsStrategy, ProbeError>> = OnceLock::new();

/// The process-wide namespace strategy, probed at most once and cached.
///
/// Call this during startup so a probe failure surfaces before any
/// encode work begins; repeated calls return the identical cached
/// outcome.
///
/// # Errors
///
/// Returns [`ProbeError`] if the probe document cannot be written or
/// read back at all. This is fatal for encoding: no strategy can
/// produce correct annotated XML.
pub fn namespace_strategy() -> Result<NsStrategy, ProbeError> {
    STRATEGY.get_or_init(probe).clone()
}

fn probe() -> Result<NsStrategy, ProbeError> {
    let mut buf = Vec::with_capacity(128);
    write_probe_document(&mut buf)
        .map_err(|e| ProbeError(format!("cannot write probe document: {e}")))?;

    match nested_attribute_resolves(&buf) {
        Ok(true) => Ok(NsStrategy::RootContext),
        Ok(false) => {
            tracing::warn!(
                "root-level namespace declaration not honored for nested attributes, \
                 falling back to per-element declarations"
            );
            Ok(NsStrategy::PerElement)
        }
        Err(e) => Err(ProbeError(format!("cannot read probe document back: {e}"))),
    }
}

fn write_probe_document(buf: &mut Vec<u8>) -> std::io::Result<()> {
    let mut writer = Writer::new(buf);
    writer
        .create_element("probe")
        .with_attribute((format!("xmlns:{OPERATIONS_PREFIX}").as_str(), NETCONF_NAMESPACE))
        .write_inner_content(|w| {
            w.create_element("target")
                .with_attribute((format!("{OPERATIONS_PREFIX}:flag").as_str(), "probe"))
                .write_empty()?;
            Ok(())
        })?;
    Ok(())
}

fn nested_attribute_resolves(document: &[u8]) -> Result<bool, quick_xml::Error> {
    let mut reader = NsReader::from_reader(document);
    loop {
        match reader.read_resolved_event()? {
            (_, Event::Empty(e)) if e.local_name().as_ref() == b"target" => {
                for attr in e.attributes() {
                    let attr = attr.map_err(quick_xml::Error::from)?;
                    if attr.key.as_namespace_binding().is_some() {
                        continue;
                    }
                    let (resolution, local) = reader.resolve_attribute(attr.key);
                    if local.as_ref() == b"flag" {
                        return Ok(matches!(
                            resolution,
                            ResolveResult::Bound(ns) if ns.as_ref() == NETCONF_NAMESPACE.as_bytes()
                        ));
                    }
                }
                return Ok(false);
            }
            (_, Event::Eof) => return Ok(false),
            _ => {}
        }
    }
}
