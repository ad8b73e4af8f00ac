//! Subtree filter encoding: serializing the path to a node, not its
//! subtree.
//!
//! A filter is a chain of nested elements, one per path argument, with
//! the final element left empty: in subtree-filter semantics an empty
//! element means "return everything beneath this node". Each path
//! argument resolves against the previously resolved schema node, never
//! against the root, because local names are not globally unique across
//! reusable groupings. List-entry arguments before the final one also
//! emit their key leaves so the chain selects a single entry.

use std::io::Write;

use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};

use yangwire_model::{DataPath, PathArg, QName, SchemaContext, SchemaKind, SchemaNode};

use crate::error::XmlError;

/// Serialize a subtree filter for the given path.
///
/// An empty path writes nothing: no filter means no restriction. The
/// whole path is resolved against the schema before any output is
/// committed, so an unresolvable path is a caller contract violation
/// that leaves the sink untouched.
///
/// # Errors
///
/// Returns [`XmlError::Precondition`] if a path argument does not
/// resolve, or [`XmlError::Write`] if the sink faults; opened elements
/// are closed even on the fault path.
pub fn write_filter<W: Write>(
    path: &DataPath,
    context: &SchemaContext,
    sink: W,
) -> Result<(), XmlError> {
    if path.is_empty() {
        return Ok(());
    }

    let chain = resolve_chain(path, context)?;

    let mut writer = Writer::new(sink);
    let mut opened: Vec<String> = Vec::new();
    let result = write_chain(&mut writer, &chain, &mut opened);

    // Close everything that was opened, on success and failure alike.
    let mut close_fault = None;
    for local in opened.drain(..).rev() {
        if let Err(e) = writer.write_event(Event::End(BytesEnd::new(local))) {
            close_fault.get_or_insert(e);
        }
    }

    match (result, close_fault) {
        (Err(primary), Some(close)) => {
            tracing::warn!(error = %close, "failed to close filter elements after write fault");
            Err(primary)
        }
        (Err(primary), None) => Err(primary),
        (Ok(()), Some(close)) => Err(XmlError::Write {
            path: path.to_string(),
            source: close,
        }),
        (Ok(()), None) => Ok(()),
    }
}

/// Resolve every path argument step by step: the first against the
/// context's top level, each subsequent one against the node the
/// previous step resolved to.
fn resolve_chain<'a>(
    path: &'a DataPath,
    context: &'a SchemaContext,
) -> Result<Vec<(&'a PathArg, &'a SchemaNode)>, XmlError> {
    let args = path.args();
    let mut chain = Vec::with_capacity(args.len());
    let mut resolved = String::new();

    let mut current: Option<&SchemaNode> = None;
    for arg in args {
        let name = arg.name();
        let next = match current {
            None => context.child(&name.namespace, &name.local),
            Some(node) => node.child(&name.namespace, &name.local),
        };
        let Some(next) = next else {
            return Err(XmlError::Precondition {
                path: format!("{resolved}/{arg}"),
            });
        };
        if matches!(arg, PathArg::ListEntry { .. })
            && !matches!(next.kind(), SchemaKind::List { .. })
        {
            return Err(XmlError::Precondition {
                path: format!("{resolved}/{arg}"),
            });
        }
        resolved.push_str(&format!("/{arg}"));
        chain.push((arg, next));
        current = Some(next);
    }
    Ok(chain)
}

fn write_chain<W: Write>(
    writer: &mut Writer<W>,
    chain: &[(&PathArg, &SchemaNode)],
    opened: &mut Vec<String>,
) -> Result<(), XmlError> {
    let mut parent_ns: Option<&str> = None;
    let last = chain.len() - 1;

    for (depth, (arg, _)) in chain.iter().enumerate() {
        let name = arg.name();
        let mut start = BytesStart::new(name.local.clone());
        if parent_ns != Some(name.namespace.as_str()) {
            start.push_attribute(("xmlns", name.namespace.as_str()));
        }
        writer
            .write_event(Event::Start(start))
            .map_err(|e| fault(chain, depth, e))?;
        opened.push(name.local.clone());

        // Key predicates select one entry; the final element stays
        // empty regardless so the filter matches its whole subtree.
        if depth < last {
            if let PathArg::ListEntry { keys, .. } = arg {
                for (key, value) in keys {
                    write_key_leaf(writer, key, value, &name.namespace)
                        .map_err(|e| fault(chain, depth, e))?;
                }
            }
        }
        parent_ns = Some(name.namespace.as_str());
    }
    Ok(())
}

fn write_key_leaf<W: Write>(
    writer: &mut Writer<W>,
    key: &QName,
    value: &yangwire_model::ScalarValue,
    parent_ns: &str,
) -> std::io::Result<()> {
    let mut start = BytesStart::new(key.local.clone());
    if key.namespace != parent_ns {
        start.push_attribute(("xmlns", key.namespace.as_str()));
    }
    writer.write_event(Event::Start(start))?;
    let text = value.render_text();
    if !text.is_empty() {
        writer.write_event(Event::Text(BytesText::new(&text)))?;
    }
    writer.write_event(Event::End(BytesEnd::new(key.local.clone())))
}

fn fault(chain: &[(&PathArg, &SchemaNode)], depth: usize, source: std::io::Error) -> XmlError {
    let path: String = chain[..=depth]
        .iter()
        .map(|(arg, _)| format!("/{arg}"))
        .collect();
    XmlError::Write { path, source }
}
