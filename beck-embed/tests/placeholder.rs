#[cfg(test)]
mod tests {
    use beck_core::{Error, ParameterKey};
    use beck_embed::{PlaceholderKind, parse_placeholders};
    use beck_tests::{init_logs, silent_logs};

    #[test]
    fn finds_every_style() {
        init_logs();
        let sql = "SELECT * FROM t WHERE a = ? AND b = $2 AND c = :name";
        let found = parse_placeholders(sql).expect("Failed to parse");
        assert_eq!(found.len(), 3);
        assert_eq!(found[0].kind, PlaceholderKind::Positional);
        assert_eq!(found[0].key, ParameterKey::Index(1));
        assert_eq!(found[1].kind, PlaceholderKind::Indexed);
        assert_eq!(found[1].key, ParameterKey::Index(2));
        assert_eq!(found[2].kind, PlaceholderKind::Named);
        assert_eq!(found[2].key, ParameterKey::Name("name".into()));
        assert_eq!(&sql[found[1].offset..found[1].offset + found[1].len], "$2");
        assert_eq!(
            &sql[found[2].offset..found[2].offset + found[2].len],
            ":name"
        );
    }

    #[test]
    fn positional_markers_take_ordinals() {
        init_logs();
        let found =
            parse_placeholders("INSERT INTO t VALUES (?, ?, ?)").expect("Failed to parse");
        assert_eq!(
            found.iter().map(|p| p.key.clone()).collect::<Vec<_>>(),
            [
                ParameterKey::Index(1),
                ParameterKey::Index(2),
                ParameterKey::Index(3)
            ]
        );
    }

    #[test]
    fn literals_and_comments_are_opaque() {
        init_logs();
        let sql = "SELECT 'is it ?', \":not_me\" -- trailing :other\n\
                   FROM \"weird?table\" /* block $1 /* nested :x */ still */ WHERE a = :real";
        let found = parse_placeholders(sql).expect("Failed to parse");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].key, ParameterKey::Name("real".into()));
    }

    #[test]
    fn doubled_quote_escape() {
        init_logs();
        let found =
            parse_placeholders("SELECT 'it''s not a ? marker', ?").expect("Failed to parse");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].key, ParameterKey::Index(1));
    }

    #[test]
    fn unterminated_literal_runs_to_the_end() {
        init_logs();
        let found = parse_placeholders("SELECT 'oops ? $1 :name").expect("Failed to parse");
        assert!(found.is_empty());
    }

    #[test]
    fn cast_syntax_is_not_a_parameter() {
        init_logs();
        let found = parse_placeholders("SELECT a::INT, b FROM t WHERE c = :x")
            .expect("Failed to parse");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].key, ParameterKey::Name("x".into()));
    }

    #[test]
    fn dollar_without_digit_is_plain_text() {
        init_logs();
        let found = parse_placeholders("SELECT price$ FROM t").expect("Failed to parse");
        assert!(found.is_empty());
    }

    #[test]
    fn rejects_zero_index() {
        let error;
        silent_logs! {
            error = parse_placeholders("SELECT $0").expect_err("$0 must be rejected");
        };
        assert!(matches!(error, Error::Parse { offset: 7, .. }), "{error}");
    }

    #[test]
    fn rejects_out_of_range_index() {
        silent_logs! {
            assert!(parse_placeholders("SELECT $4294967296").is_err());
        };
    }

    #[test]
    fn rejects_empty_name() {
        silent_logs! {
            assert!(parse_placeholders("SELECT : FROM t").is_err());
        };
    }

    #[test]
    fn rejects_name_starting_with_digit() {
        silent_logs! {
            assert!(parse_placeholders("SELECT :1abc").is_err());
        };
    }

    #[test]
    fn parsing_is_deterministic() {
        init_logs();
        let sql = "SELECT * FROM t WHERE a = :a AND b = ? AND c = $4 OR d = :a";
        assert_eq!(
            parse_placeholders(sql).expect("Failed to parse"),
            parse_placeholders(sql).expect("Failed to parse")
        );
    }
}
