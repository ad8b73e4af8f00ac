//! Encode/decode round-trip tests.

#[cfg(test)]
mod tests {
    use yangwire_model::DataNode;
    use yangwire_xml::{read_tree_in, write_tree};

    use crate::{DEVICE_NS, device_anchor, device_schema, interfaces_tree, qn, system_tree};

    fn round_trip(tree: &DataNode, anchor_local: &str) -> DataNode {
        let mut buf = Vec::new();
        write_tree(tree, &device_anchor(anchor_local), &mut buf).expect("encodes");
        read_tree_in(&buf, device_schema()).expect("decodes back")
    }

    #[test]
    fn test_should_round_trip_interfaces_tree() {
        let tree = interfaces_tree();
        assert_eq!(round_trip(&tree, "interfaces"), tree);
    }

    #[test]
    fn test_should_round_trip_every_scalar_shape() {
        let tree = system_tree();
        assert_eq!(round_trip(&tree, "system"), tree);
    }

    #[test]
    fn test_should_preserve_child_order() {
        let tree = interfaces_tree();
        let decoded = round_trip(&tree, "interfaces");

        let DataNode::Container { children, .. } = &decoded else {
            panic!("expected container root");
        };
        let DataNode::List { entries, .. } = &children[0] else {
            panic!("expected list child");
        };
        let first_names: Vec<_> = entries[0].children.iter().map(DataNode::name).collect();
        assert_eq!(
            first_names,
            vec![&qn("mtu"), &qn("address"), &qn("statistics")],
            "children must come back in document order"
        );
    }

    #[test]
    fn test_should_render_scalars_in_wire_text_forms() {
        let mut buf = Vec::new();
        write_tree(&system_tree(), &device_anchor("system"), &mut buf).expect("encodes");
        let xml = String::from_utf8(buf).expect("valid UTF-8");

        assert!(xml.contains("<enabled>true</enabled>"), "lowercase bool: {xml}");
        assert!(
            xml.contains("<last-boot>2024-05-17T08:30:00.000Z</last-boot>"),
            "millisecond timestamp: {xml}"
        );
        assert!(xml.contains("<fingerprint>AQL+/w==</fingerprint>"), "base64 binary: {xml}");
        assert!(
            xml.contains("<maintenance-mode></maintenance-mode>"),
            "presence leaf carries no content: {xml}"
        );
    }

    #[test]
    fn test_should_declare_namespace_once_for_single_namespace_tree() {
        let mut buf = Vec::new();
        write_tree(&interfaces_tree(), &device_anchor("interfaces"), &mut buf).expect("encodes");
        let xml = String::from_utf8(buf).expect("valid UTF-8");
        assert_eq!(xml.matches(&format!("xmlns=\"{DEVICE_NS}\"")).count(), 1);
    }
}
