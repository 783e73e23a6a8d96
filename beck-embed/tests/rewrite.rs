#[cfg(test)]
mod tests {
    use beck_core::ParameterKey;
    use beck_embed::{Rewritten, parse_placeholders, rewrite};
    use beck_tests::init_logs;

    fn rewritten(sql: &str) -> Rewritten {
        rewrite(sql, &parse_placeholders(sql).expect("Failed to parse"))
    }

    #[test]
    fn positional_markers_number_in_order() {
        init_logs();
        let result = rewritten("INSERT INTO t VALUES (?, ?)");
        assert_eq!(result.native_sql, "INSERT INTO t VALUES (?1, ?2)");
        assert_eq!(
            result.slots.as_ref(),
            [ParameterKey::Index(1), ParameterKey::Index(2)]
        );
    }

    #[test]
    fn named_occurrences_share_one_marker() {
        init_logs();
        let result = rewritten("INSERT INTO t VALUES (:a, :b, :a)");
        assert_eq!(result.native_sql, "INSERT INTO t VALUES (?1, ?2, ?1)");
        assert_eq!(
            result.slots.as_ref(),
            [
                ParameterKey::Name("a".into()),
                ParameterKey::Name("b".into())
            ]
        );
    }

    #[test]
    fn indexed_slots_lay_out_ascending() {
        init_logs();
        let result = rewritten("INSERT INTO t VALUES ($2, $1)");
        assert_eq!(result.native_sql, "INSERT INTO t VALUES (?2, ?1)");
        assert_eq!(
            result.slots.as_ref(),
            [ParameterKey::Index(1), ParameterKey::Index(2)]
        );
    }

    #[test]
    fn indexed_duplicates_collapse_and_gaps_stay() {
        init_logs();
        let result = rewritten("SELECT * FROM t WHERE a = $5 OR b = $2 OR c = $5");
        assert_eq!(
            result.native_sql,
            "SELECT * FROM t WHERE a = ?2 OR b = ?1 OR c = ?2"
        );
        assert_eq!(
            result.slots.as_ref(),
            [ParameterKey::Index(2), ParameterKey::Index(5)]
        );
    }

    #[test]
    fn mixed_styles_share_the_integer_key_space() {
        init_logs();
        let result = rewritten("SELECT * FROM t WHERE a = ? AND b = :n AND c = $3");
        assert_eq!(
            result.native_sql,
            "SELECT * FROM t WHERE a = ?1 AND b = ?2 AND c = ?3"
        );
        assert_eq!(
            result.slots.as_ref(),
            [
                ParameterKey::Index(1),
                ParameterKey::Name("n".into()),
                ParameterKey::Index(3)
            ]
        );
    }

    #[test]
    fn positional_and_indexed_collide_on_the_same_key() {
        init_logs();
        // The first `?` and `$1` are the same logical parameter.
        let result = rewritten("SELECT * FROM t WHERE a = ? AND b = $1");
        assert_eq!(result.native_sql, "SELECT * FROM t WHERE a = ?1 AND b = ?1");
        assert_eq!(result.slots.as_ref(), [ParameterKey::Index(1)]);
    }

    #[test]
    fn text_without_placeholders_is_untouched() {
        init_logs();
        let sql = "CREATE TABLE t (a INT, b VARCHAR)";
        assert_eq!(rewritten(sql).native_sql, sql);
        assert!(rewritten(sql).slots.is_empty());
    }

    #[test]
    fn opaque_regions_are_preserved() {
        init_logs();
        let result = rewritten("SELECT 'really?' FROM t WHERE a = ?");
        assert_eq!(result.native_sql, "SELECT 'really?' FROM t WHERE a = ?1");
    }
}
