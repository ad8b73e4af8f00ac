//! Capability probe behavior.

#[cfg(test)]
mod tests {
    use yangwire_xml::namespace_strategy;

    use crate::init_tracing;

    #[test]
    fn test_should_return_stable_strategy_across_calls() {
        init_tracing();
        let first = namespace_strategy().expect("probe succeeds");
        for _ in 0..8 {
            assert_eq!(namespace_strategy().expect("probe succeeds"), first);
        }
    }
}
