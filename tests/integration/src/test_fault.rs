//! Balanced output under injected sink faults.

#[cfg(test)]
mod tests {
    use std::io::{self, Write};

    use quick_xml::Reader;
    use quick_xml::events::Event;
    use yangwire_xml::{XmlError, write_tree};

    use crate::{device_anchor, interfaces_tree};

    /// Rejects exactly one write, matched by content so the fault lands
    /// on an event boundary, then recovers.
    struct FaultOn {
        inner: Vec<u8>,
        needle: &'static [u8],
        faulted: bool,
    }

    impl Write for FaultOn {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if !self.faulted && buf == self.needle {
                self.faulted = true;
                return Err(io::Error::other("induced fault"));
            }
            self.inner.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn assert_balanced(document: &[u8]) {
        let mut reader = Reader::from_reader(document);
        let mut depth = 0i32;
        loop {
            match reader.read_event().expect("flushed output stays well-formed") {
                Event::Start(_) => depth += 1,
                Event::End(_) => depth -= 1,
                Event::Eof => break,
                _ => {}
            }
        }
        assert_eq!(depth, 0, "every opened element must be closed");
    }

    #[test]
    fn test_should_close_all_elements_when_deep_leaf_write_faults() {
        let mut sink = FaultOn {
            inner: Vec::new(),
            needle: b"912044",
            faulted: false,
        };
        let err = write_tree(&interfaces_tree(), &device_anchor("interfaces"), &mut sink)
            .unwrap_err();

        let XmlError::Write { path, .. } = err else {
            panic!("expected write fault, got {err}");
        };
        assert!(path.contains("in-octets"), "fault names the leaf: {path}");
        assert!(sink.faulted);
        assert_balanced(&sink.inner);
    }

    #[test]
    fn test_should_report_first_fault_even_when_close_also_faults() {
        // Faulting on a key leaf exercises closes of entry, list parent
        // and root on the error path.
        let mut sink = FaultOn {
            inner: Vec::new(),
            needle: b"eth0",
            faulted: false,
        };
        let err = write_tree(&interfaces_tree(), &device_anchor("interfaces"), &mut sink)
            .unwrap_err();
        assert!(matches!(err, XmlError::Write { .. }), "unexpected: {err}");
        assert_balanced(&sink.inner);
    }
}
