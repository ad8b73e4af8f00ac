//! Affirmative reply checking.
//!
//! Protocol replies to edit operations carry either a bare `<ok/>`
//! marker or error content. Callers only need the yes/no answer, but a
//! negative answer must carry the full reply text so the failure can be
//! diagnosed upstream.

use quick_xml::NsReader;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;

use crate::error::XmlError;
use crate::namespaces::{NETCONF_NAMESPACE, OK_ELEMENT, RPC_REPLY_ELEMENT};

/// Check that a reply document is an `rpc-reply` envelope whose only
/// content is the `ok` marker.
///
/// # Errors
///
/// Returns [`XmlError::NotOkReply`] carrying the document text if the
/// reply holds anything else, or [`XmlError::QuickXml`] for a document
/// that does not parse at all.
pub fn check_reply_ok(document: &[u8]) -> Result<(), XmlError> {
    if reply_is_ok(document)? {
        Ok(())
    } else {
        Err(XmlError::NotOkReply(
            String::from_utf8_lossy(document).into_owned(),
        ))
    }
}

fn reply_is_ok(document: &[u8]) -> Result<bool, XmlError> {
    let mut reader = NsReader::from_reader(document);
    reader.config_mut().trim_text(true);

    let mut depth = 0usize;
    let mut saw_ok = false;
    loop {
        let (resolution, event) = reader.read_resolved_event()?;
        match event {
            Event::Start(e) => {
                if !element_allowed(&resolution, &e, depth, saw_ok) {
                    return Ok(false);
                }
                if depth == 1 {
                    saw_ok = true;
                }
                depth += 1;
            }
            Event::Empty(e) => {
                if !element_allowed(&resolution, &e, depth, saw_ok) {
                    return Ok(false);
                }
                if depth == 1 {
                    saw_ok = true;
                } else {
                    // An empty rpc-reply envelope has no ok marker.
                    return Ok(false);
                }
            }
            Event::End(_) => depth -= 1,
            Event::Text(_) | Event::CData(_) => return Ok(false),
            Event::Eof => return Ok(saw_ok),
            _ => {}
        }
    }
}

fn element_allowed(
    resolution: &ResolveResult<'_>,
    element: &BytesStart<'_>,
    depth: usize,
    saw_ok: bool,
) -> bool {
    let in_base = matches!(
        resolution,
        ResolveResult::Bound(ns) if ns.as_ref() == NETCONF_NAMESPACE.as_bytes()
    );
    let local = element.local_name();
    match depth {
        0 => in_base && local.as_ref() == RPC_REPLY_ELEMENT.as_bytes(),
        1 => in_base && local.as_ref() == OK_ELEMENT.as_bytes() && !saw_ok,
        _ => false,
    }
}
