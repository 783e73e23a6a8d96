#[cfg(test)]
mod tests {
    use beck_core::{Error, ParameterKey, Value};
    use beck_embed::Binder;
    use beck_tests::{init_logs, silent_logs};

    fn keys() -> [ParameterKey; 2] {
        [ParameterKey::Index(1), ParameterKey::Name("b".into())]
    }

    #[test]
    fn unknown_key_is_rejected() {
        let mut binder = Binder::new(&keys());
        let error;
        silent_logs! {
            error = binder
                .bind(&ParameterKey::Name("missing".into()), Value::Int32(Some(1)))
                .expect_err("An undeclared key must be rejected");
        };
        assert!(matches!(error, Error::UnknownParameter(..)), "{error}");
    }

    #[test]
    fn sealing_names_every_missing_key() {
        let mut binder = Binder::new(&keys());
        let error;
        silent_logs! {
            error = binder.add().expect_err("Unbound slots must fail the seal");
        };
        assert!(
            error.to_string().starts_with("unbound parameters:"),
            "{error}"
        );
        let Error::BindIncomplete { missing } = error else {
            panic!("unexpected error: {error}");
        };
        assert!(missing.contains("$1"), "{missing}");
        assert!(missing.contains(":b"), "{missing}");
    }

    #[test]
    fn rebinding_overwrites_and_sealing_resets() {
        init_logs();
        let mut binder = Binder::new(&keys());
        binder
            .bind(&ParameterKey::Index(1), Value::Int32(Some(1)))
            .unwrap();
        binder
            .bind(&ParameterKey::Index(1), Value::Int32(Some(7)))
            .unwrap();
        binder
            .bind(&ParameterKey::Name("b".into()), Value::Varchar(Some("x".into())))
            .unwrap();
        binder.add().unwrap();
        assert!(!binder.has_bound());
        assert_eq!(binder.batches(), 1);
        let batches = binder.take_batches().unwrap();
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0][0], Value::Int32(Some(7)));
    }

    #[test]
    fn dispatch_seals_the_current_binds_implicitly() {
        init_logs();
        let mut binder = Binder::new(&keys());
        binder
            .bind(&ParameterKey::Index(1), Value::Int32(Some(1)))
            .unwrap();
        binder
            .bind(&ParameterKey::Name("b".into()), Value::Null)
            .unwrap();
        let batches = binder.take_batches().unwrap();
        assert_eq!(batches.len(), 1);
    }

    #[test]
    fn dispatch_seals_trailing_binds_after_a_seal() {
        init_logs();
        let mut binder = Binder::new(&[ParameterKey::Index(1)]);
        binder
            .bind(&ParameterKey::Index(1), Value::Int32(Some(1)))
            .unwrap();
        binder.add().unwrap();
        binder
            .bind(&ParameterKey::Index(1), Value::Int32(Some(2)))
            .unwrap();
        let batches = binder.take_batches().unwrap();
        assert_eq!(batches.len(), 2);
        assert_eq!(batches[1][0], Value::Int32(Some(2)));
    }

    #[test]
    fn incomplete_trailing_binds_fail_the_dispatch() {
        let mut binder = Binder::new(&keys());
        binder
            .bind(&ParameterKey::Index(1), Value::Int32(Some(1)))
            .unwrap();
        silent_logs! {
            assert!(matches!(
                binder.take_batches(),
                Err(Error::BindIncomplete { .. })
            ));
        };
    }

    #[test]
    fn a_statement_without_parameters_forms_one_empty_batch() {
        init_logs();
        let mut binder = Binder::new(&[]);
        let batches = binder.take_batches().unwrap();
        assert_eq!(batches.len(), 1);
        assert!(batches[0].is_empty());
    }
}
