//! Reply envelope sanity checks.

#[cfg(test)]
mod tests {
    use yangwire_xml::{NETCONF_NAMESPACE, XmlError, check_reply_ok};

    #[test]
    fn test_should_accept_affirmative_reply() {
        let doc = format!("<rpc-reply xmlns=\"{NETCONF_NAMESPACE}\"><ok/></rpc-reply>");
        check_reply_ok(doc.as_bytes()).expect("ok reply accepted");
    }

    #[test]
    fn test_should_surface_error_reply_text() {
        let doc = format!(
            "<rpc-reply xmlns=\"{NETCONF_NAMESPACE}\">\
               <rpc-error><error-message>access denied</error-message></rpc-error>\
             </rpc-reply>"
        );
        let err = check_reply_ok(doc.as_bytes()).unwrap_err();
        let XmlError::NotOkReply(text) = err else {
            panic!("expected not-ok reply, got {err}");
        };
        assert!(text.contains("access denied"), "full reply preserved: {text}");
    }
}
