//! Annotation attribute placement tests.

#[cfg(test)]
mod tests {
    use yangwire_model::{AnnotationNode, PathArg, ScalarValue};
    use yangwire_xml::{NETCONF_NAMESPACE, XmlError, write_tree_with_annotations};

    use crate::{device_anchor, interfaces_tree, qn};

    fn eth0_arg() -> PathArg {
        PathArg::ListEntry {
            name: qn("interface"),
            keys: vec![(qn("name"), ScalarValue::Str("eth0".to_string()))],
        }
    }

    #[test]
    fn test_should_place_attribute_on_selected_entry_only() {
        let annotations = AnnotationNode::new().child(
            eth0_arg(),
            AnnotationNode::new().attr("operation", "replace"),
        );
        let mut buf = Vec::new();
        write_tree_with_annotations(
            &interfaces_tree(),
            &device_anchor("interfaces"),
            &mut buf,
            Some(&annotations),
        )
        .expect("encodes");
        let xml = String::from_utf8(buf).expect("valid UTF-8");

        assert_eq!(xml.matches("op:operation=\"replace\"").count(), 1);
        assert!(
            xml.contains("<interface op:operation=\"replace\"><name>eth0</name>"),
            "attribute belongs to the eth0 entry: {xml}"
        );
        assert!(
            !xml.contains("<interface op:operation=\"replace\"><name>eth1</name>"),
            "eth1 entry must stay unannotated: {xml}"
        );
    }

    #[test]
    fn test_should_declare_operations_namespace_for_annotated_document() {
        let annotations = AnnotationNode::new().child(
            eth0_arg(),
            AnnotationNode::new().child(
                PathArg::Node(qn("mtu")),
                AnnotationNode::new().attr("operation", "delete"),
            ),
        );
        let mut buf = Vec::new();
        write_tree_with_annotations(
            &interfaces_tree(),
            &device_anchor("interfaces"),
            &mut buf,
            Some(&annotations),
        )
        .expect("encodes");
        let xml = String::from_utf8(buf).expect("valid UTF-8");

        assert!(xml.contains(&format!("xmlns:op=\"{NETCONF_NAMESPACE}\"")));
        assert!(xml.contains("<mtu op:operation=\"delete\">1500</mtu>"), "nested leaf annotated: {xml}");
    }

    #[test]
    fn test_should_reject_annotation_path_without_data() {
        let annotations = AnnotationNode::new().child(
            PathArg::ListEntry {
                name: qn("interface"),
                keys: vec![(qn("name"), ScalarValue::Str("eth7".to_string()))],
            },
            AnnotationNode::new().attr("operation", "delete"),
        );
        let mut buf = Vec::new();
        let err = write_tree_with_annotations(
            &interfaces_tree(),
            &device_anchor("interfaces"),
            &mut buf,
            Some(&annotations),
        )
        .unwrap_err();
        assert!(matches!(err, XmlError::Value { .. }));
    }

    #[test]
    fn test_should_ignore_annotation_machinery_when_none_supplied() {
        let mut buf = Vec::new();
        write_tree_with_annotations(
            &interfaces_tree(),
            &device_anchor("interfaces"),
            &mut buf,
            None,
        )
        .expect("encodes");
        let xml = String::from_utf8(buf).expect("valid UTF-8");
        assert!(!xml.contains("xmlns:op"), "no operations declaration without annotations");
    }
}
