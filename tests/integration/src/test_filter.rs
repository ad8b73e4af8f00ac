//! Subtree filter shape tests.

#[cfg(test)]
mod tests {
    use yangwire_model::{DataPath, ScalarValue};
    use yangwire_xml::{XmlError, write_filter};

    use crate::{DEVICE_NS, device_schema, qn};

    fn filter(path: &DataPath) -> String {
        let mut buf = Vec::new();
        write_filter(path, &device_schema(), &mut buf).expect("filter encodes");
        String::from_utf8(buf).expect("valid UTF-8")
    }

    #[test]
    fn test_should_write_no_filter_for_root_path() {
        assert_eq!(filter(&DataPath::root()), "");
    }

    #[test]
    fn test_should_select_single_entry_subtree() {
        let path = DataPath::root()
            .node(qn("interfaces"))
            .entry(
                qn("interface"),
                vec![(qn("name"), ScalarValue::Str("eth0".to_string()))],
            )
            .node(qn("statistics"));

        assert_eq!(
            filter(&path),
            format!(
                "<interfaces xmlns=\"{DEVICE_NS}\"><interface><name>eth0</name>\
                 <statistics></statistics></interface></interfaces>"
            )
        );
    }

    #[test]
    fn test_should_leave_final_list_entry_element_empty() {
        let path = DataPath::root().node(qn("interfaces")).entry(
            qn("interface"),
            vec![(qn("name"), ScalarValue::Str("eth0".to_string()))],
        );
        let xml = filter(&path);
        assert!(
            xml.ends_with("<interface></interface></interfaces>"),
            "final element carries no content: {xml}"
        );
    }

    #[test]
    fn test_should_leave_sink_untouched_on_unresolvable_path() {
        let path = DataPath::root().node(qn("interfaces")).node(qn("bogus"));
        let mut buf = Vec::new();
        let err = write_filter(&path, &device_schema(), &mut buf).unwrap_err();
        let XmlError::Precondition { path } = err else {
            panic!("expected precondition failure, got {err}");
        };
        assert!(path.contains("bogus"));
        assert!(buf.is_empty());
    }
}
