use crate::run_sql;
use beck::{Connection, Statement, stream::StreamExt};

/// Anonymous `?` markers are addressed by 1-based position.
pub async fn positional_markers<C: Connection>(connection: &mut C) {
    run_sql(connection, "DROP TABLE IF EXISTS positional").await;
    run_sql(
        connection,
        "CREATE TABLE positional (id INT, label VARCHAR)",
    )
    .await;

    let mut statement = connection
        .statement("INSERT INTO positional VALUES (?, ?)")
        .expect("Failed to prepare the positional insert");
    statement
        .bind(1, 7)
        .expect("Failed to bind position 1")
        .bind(2, "seven")
        .expect("Failed to bind position 2");
    let affected = statement
        .execute()
        .await
        .expect("Failed to execute the positional insert");
    assert_eq!(affected.rows_affected, 1);

    let mut statement = connection
        .statement("SELECT label FROM positional WHERE id = ?")
        .expect("Failed to prepare the positional select");
    statement.bind(1, 7).expect("Failed to bind the filter");
    let rows = statement.fetch().collect::<Vec<_>>().await;
    assert_eq!(rows.len(), 1);
    let row = rows[0].as_ref().expect("Failed to read the row");
    assert_eq!(
        row.try_get::<String>(0).expect("Failed to decode the label"),
        "seven"
    );
}

/// A named parameter occurring several times is one logical parameter:
/// a single bind feeds every occurrence.
pub async fn named_reuse<C: Connection>(connection: &mut C) {
    run_sql(connection, "DROP TABLE IF EXISTS named").await;
    run_sql(connection, "CREATE TABLE named (lhs INT, rhs INT)").await;

    let mut statement = connection
        .statement("INSERT INTO named VALUES (:a, :a)")
        .expect("Failed to prepare the named insert");
    statement.bind("a", 42).expect("Failed to bind `a`");
    let affected = statement
        .execute()
        .await
        .expect("Failed to execute the named insert");
    assert_eq!(affected.rows_affected, 1);

    let mut statement = connection
        .statement("SELECT lhs, rhs FROM named")
        .expect("Failed to prepare the named select");
    let rows = statement.fetch().collect::<Vec<_>>().await;
    assert_eq!(rows.len(), 1);
    let row = rows[0].as_ref().expect("Failed to read the row");
    assert_eq!(row.try_get::<i32>(0).unwrap(), 42);
    assert_eq!(row.try_get::<i32>(1).unwrap(), 42);
}

/// Indexed markers bind by their declared index, not by the position the
/// marker happens to occupy in the text.
pub async fn indexed_in_ascending_order<C: Connection>(connection: &mut C) {
    run_sql(connection, "DROP TABLE IF EXISTS pairs").await;
    run_sql(connection, "CREATE TABLE pairs (first INT, second INT)").await;

    let mut statement = connection
        .statement("INSERT INTO pairs VALUES ($2, $1)")
        .expect("Failed to prepare the indexed insert");
    statement
        .bind(1, 100)
        .expect("Failed to bind $1")
        .bind(2, 300)
        .expect("Failed to bind $2");
    statement
        .execute()
        .await
        .expect("Failed to execute the indexed insert");

    let mut statement = connection
        .statement("SELECT first, second FROM pairs")
        .expect("Failed to prepare the indexed select");
    let rows = statement.fetch().collect::<Vec<_>>().await;
    assert_eq!(rows.len(), 1);
    let row = rows[0].as_ref().expect("Failed to read the row");
    assert_eq!(row.try_get::<i32>(0).unwrap(), 300);
    assert_eq!(row.try_get::<i32>(1).unwrap(), 100);
}
