use crate::run_sql;
use beck::{Connection, Statement, stream::StreamExt};

/// When a label is declared twice the last declaration wins the lookup,
/// for the metadata and for the value alike. Index access still reaches
/// the shadowed column.
pub async fn duplicate_labels_last_match<C: Connection>(connection: &mut C) {
    run_sql(connection, "DROP TABLE IF EXISTS dup_label").await;
    run_sql(
        connection,
        "CREATE TABLE dup_label (col1 VARCHAR, col2 VARCHAR)",
    )
    .await;
    run_sql(
        connection,
        "INSERT INTO dup_label VALUES ('first', 'second')",
    )
    .await;

    let mut statement = connection
        .statement("SELECT col1 AS value, col2 AS value FROM dup_label")
        .expect("Failed to prepare the select");
    let rows = statement.fetch().collect::<Vec<_>>().await;
    assert_eq!(rows.len(), 1);
    let row = rows[0].as_ref().expect("Failed to read the row");

    let column = row
        .metadata()
        .column_metadata("value")
        .expect("The label must resolve");
    assert_eq!(column.name, "COL2");
    assert_eq!(column.index, 1);
    // Lookup is case insensitive.
    assert_eq!(row.metadata().column_metadata("VaLuE"), Some(column));

    assert_eq!(row.try_get_column::<String>("value").unwrap(), "second");
    assert_eq!(row.try_get::<String>(0).unwrap(), "first");
}

/// Labels canonicalize to uppercase and deduplicate, while membership
/// checks accept any casing.
pub async fn column_names_casing<C: Connection>(connection: &mut C) {
    run_sql(connection, "DROP TABLE IF EXISTS casing").await;
    run_sql(connection, "CREATE TABLE casing (id INT, label VARCHAR)").await;
    run_sql(connection, "INSERT INTO casing VALUES (1, 'x')").await;

    let mut statement = connection
        .statement("SELECT id AS a, label AS b, id AS A FROM casing")
        .expect("Failed to prepare the select");
    let rows = statement.fetch().collect::<Vec<_>>().await;
    assert_eq!(rows.len(), 1);
    let names = rows[0]
        .as_ref()
        .expect("Failed to read the row")
        .metadata()
        .column_names();
    assert_eq!(names.len(), 2);
    assert_eq!(names.iter().collect::<Vec<_>>(), ["A", "B"]);
    assert!(names.contains("a"));
    assert!(names.contains("A"));
    assert!(names.contains("b"));
    assert!(!names.contains("c"));
}
