use crate::{run_sql, silent_logs};
use beck::{Connection, Error, Statement, stream::StreamExt};

/// A statement issues exactly one execute cycle.
pub async fn double_execute_fails<C: Connection>(connection: &mut C) {
    run_sql(connection, "DROP TABLE IF EXISTS once").await;
    run_sql(connection, "CREATE TABLE once (id INT)").await;

    let mut statement = connection
        .statement("INSERT INTO once VALUES (?)")
        .expect("Failed to prepare the insert");
    statement.bind(1, 1).expect("Failed to bind");
    statement.execute().await.expect("Failed to execute");
    let error;
    silent_logs! {
        error = statement
            .execute()
            .await
            .expect_err("A second execute must fail");
    };
    assert!(
        matches!(&error, Error::IllegalState(..)),
        "unexpected error: {error}"
    );

    // The failed execute reached nothing: exactly one row exists.
    let mut statement = connection
        .statement("SELECT * FROM once")
        .expect("Failed to prepare the select");
    assert_eq!(statement.fetch().collect::<Vec<_>>().await.len(), 1);
}

/// After the execute cycle started the bind surface is gone.
pub async fn late_bind_fails<C: Connection>(connection: &mut C) {
    run_sql(connection, "DROP TABLE IF EXISTS late").await;
    run_sql(connection, "CREATE TABLE late (id INT)").await;

    let mut statement = connection
        .statement("INSERT INTO late VALUES (?)")
        .expect("Failed to prepare the insert");
    statement.bind(1, 1).expect("Failed to bind");
    statement.execute().await.expect("Failed to execute");
    silent_logs! {
        assert!(matches!(
            statement.bind(1, 2),
            Err(Error::IllegalState(..))
        ));
        assert!(matches!(statement.add(), Err(Error::IllegalState(..))));
    };
}

/// Dropping a result stream midway releases the cursor; the connection
/// keeps serving later statements.
pub async fn cancel_midway<C: Connection>(connection: &mut C) {
    run_sql(connection, "DROP TABLE IF EXISTS cancel").await;
    run_sql(connection, "CREATE TABLE cancel (id INT)").await;
    run_sql(
        connection,
        "INSERT INTO cancel VALUES (1), (2), (3), (4)",
    )
    .await;

    let mut statement = connection
        .statement("SELECT id FROM cancel")
        .expect("Failed to prepare the select");
    {
        let mut results = statement.run();
        let first = results
            .next()
            .await
            .expect("The stream must yield a first row")
            .expect("Failed to read the first row");
        assert!(first.as_row().is_some());
    }

    let mut statement = connection
        .statement("SELECT id FROM cancel WHERE id = ?")
        .expect("Failed to prepare the follow-up select");
    statement.bind(1, 4).expect("Failed to bind");
    let rows = statement.fetch().collect::<Vec<_>>().await;
    assert_eq!(rows.len(), 1);
}

/// Native failures surface with the engine's message, unaltered.
pub async fn engine_errors_pass_through<C: Connection>(connection: &mut C) {
    run_sql(connection, "DROP TABLE IF EXISTS nope").await;
    let mut statement = connection
        .statement("SELECT * FROM nope")
        .expect("Failed to prepare the select");
    let error;
    silent_logs! {
        error = statement
            .fetch()
            .collect::<Vec<_>>()
            .await
            .pop()
            .expect("The failure must be reported")
            .expect_err("Selecting from a missing table must fail");
    };
    assert!(
        matches!(&error, Error::Engine(message) if message.contains("no such table")),
        "unexpected error: {error}"
    );
}
