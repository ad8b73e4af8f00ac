//! Message envelope symmetry tests.

#[cfg(test)]
mod tests {
    use yangwire_model::DataPath;
    use yangwire_msg::{MsgError, NodeMessage};

    use crate::{interfaces_tree, qn, system_tree};

    #[test]
    fn test_should_carry_tree_and_path_between_peers() {
        let sent = NodeMessage::of(DataPath::root().node(qn("interfaces")), interfaces_tree());
        let mut wire = Vec::new();
        sent.serialize(&mut wire).expect("encodes");

        let mut received = NodeMessage::empty();
        received.deserialize(wire.as_slice()).expect("decodes");
        assert_eq!(received, sent);
        assert_eq!(received.node(), Some(&interfaces_tree()));
    }

    #[test]
    fn test_should_round_trip_every_scalar_shape_through_envelope() {
        let sent = NodeMessage::of(DataPath::root().node(qn("system")), system_tree());
        let mut wire = Vec::new();
        sent.serialize(&mut wire).expect("encodes");

        let mut received = NodeMessage::empty();
        received.deserialize(wire.as_slice()).expect("decodes");
        assert_eq!(received.into_parts(), sent.into_parts());
    }

    #[test]
    fn test_should_keep_previous_state_when_decode_fails() {
        let mut wire = Vec::new();
        NodeMessage::of(DataPath::root().node(qn("system")), system_tree())
            .serialize(&mut wire)
            .expect("encodes");
        wire.truncate(wire.len() - 1);

        let mut received = NodeMessage::empty();
        assert!(matches!(
            received.deserialize(wire.as_slice()),
            Err(MsgError::Decode(_))
        ));
        assert_eq!(received, NodeMessage::empty(), "failed decode must not populate");
    }
}
