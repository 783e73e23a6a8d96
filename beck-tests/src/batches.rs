use crate::run_sql;
use beck::{Connection, QueryResult, Statement, stream::StreamExt};

/// One execute cycle covering several batches. The trailing binds seal
/// into a final batch implicitly.
pub async fn multiple_batches<C: Connection>(connection: &mut C) {
    run_sql(connection, "DROP TABLE IF EXISTS batched").await;
    run_sql(connection, "CREATE TABLE batched (id INT, label VARCHAR)").await;

    let mut statement = connection
        .statement("INSERT INTO batched VALUES (?, ?)")
        .expect("Failed to prepare the insert");
    statement
        .bind(1, 1)
        .expect("Failed to bind")
        .bind(2, "one")
        .expect("Failed to bind")
        .add()
        .expect("Failed to seal batch 1")
        .bind(1, 2)
        .expect("Failed to bind")
        .bind(2, "two")
        .expect("Failed to bind")
        .add()
        .expect("Failed to seal batch 2")
        .bind(1, 3)
        .expect("Failed to bind")
        .bind(2, "three")
        .expect("Failed to bind");
    let affected = statement
        .execute()
        .await
        .expect("Failed to execute the batched insert");
    assert_eq!(affected.rows_affected, 3);
}

/// Batches execute in submission order and emit their results in that
/// same order.
pub async fn batch_results_in_order<C: Connection>(connection: &mut C) {
    run_sql(connection, "DROP TABLE IF EXISTS batch_del").await;
    run_sql(connection, "CREATE TABLE batch_del (id INT)").await;
    run_sql(
        connection,
        "INSERT INTO batch_del VALUES (1), (1), (2)",
    )
    .await;

    let mut statement = connection
        .statement("DELETE FROM batch_del WHERE id = ?")
        .expect("Failed to prepare the delete");
    statement
        .bind(1, 1)
        .expect("Failed to bind batch 1")
        .add()
        .expect("Failed to seal batch 1")
        .bind(1, 2)
        .expect("Failed to bind batch 2");
    let results = statement.run().collect::<Vec<_>>().await;
    let counts = results
        .into_iter()
        .map(|result| match result.expect("Failed to read a result") {
            QueryResult::Affected(v) => v.rows_affected,
            QueryResult::RowLabeled(..) => panic!("A delete must not emit rows"),
        })
        .collect::<Vec<_>>();
    assert_eq!(counts, [2, 1]);
}

/// Rows of an earlier batch arrive before any row of a later one.
pub async fn select_batches_in_order<C: Connection>(connection: &mut C) {
    run_sql(connection, "DROP TABLE IF EXISTS batch_sel").await;
    run_sql(connection, "CREATE TABLE batch_sel (id INT, label VARCHAR)").await;
    run_sql(
        connection,
        "INSERT INTO batch_sel VALUES (1, 'alpha'), (2, 'bravo'), (2, 'charlie')",
    )
    .await;

    let mut statement = connection
        .statement("SELECT label FROM batch_sel WHERE id = ?")
        .expect("Failed to prepare the select");
    statement
        .bind(1, 2)
        .expect("Failed to bind batch 1")
        .add()
        .expect("Failed to seal batch 1")
        .bind(1, 1)
        .expect("Failed to bind batch 2");
    let labels = statement
        .fetch()
        .map(|row| {
            row.expect("Failed to read a row")
                .try_get::<String>(0)
                .expect("Failed to decode the label")
        })
        .collect::<Vec<_>>()
        .await;
    assert_eq!(labels, ["bravo", "charlie", "alpha"]);
}
