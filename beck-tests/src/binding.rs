use crate::{run_sql, silent_logs};
use beck::{Connection, DataType, Error, Statement, stream::StreamExt};

/// Sealing a batch with unbound parameters fails before the engine is
/// ever invoked; completing the binds makes the same statement
/// executable again.
pub async fn incomplete_bind_fails<C: Connection>(connection: &mut C) {
    run_sql(connection, "DROP TABLE IF EXISTS incomplete").await;
    run_sql(connection, "CREATE TABLE incomplete (id INT, label VARCHAR)").await;

    let mut statement = connection
        .statement("INSERT INTO incomplete VALUES (?, ?)")
        .expect("Failed to prepare the insert");
    statement.bind(1, 1).expect("Failed to bind position 1");
    let error;
    silent_logs! {
        error = statement
            .execute()
            .await
            .expect_err("An incomplete bind set must not execute");
    };
    assert!(
        matches!(&error, Error::BindIncomplete { missing } if missing.contains("$2")),
        "unexpected error: {error}"
    );

    // Nothing reached the engine.
    let mut check = connection
        .statement("SELECT * FROM incomplete")
        .expect("Failed to prepare the verification select");
    assert_eq!(check.fetch().collect::<Vec<_>>().await.len(), 0);

    // The earlier binds survived the failed attempt.
    statement.bind(2, "one").expect("Failed to complete the binds");
    let affected = statement
        .execute()
        .await
        .expect("The statement must be retryable once the binds are complete");
    assert_eq!(affected.rows_affected, 1);

    let mut check = connection
        .statement("SELECT * FROM incomplete")
        .expect("Failed to prepare the verification select");
    assert_eq!(check.fetch().collect::<Vec<_>>().await.len(), 1);
}

/// Binding a key the statement does not declare fails, without disturbing
/// the statement's bind state.
pub async fn unknown_parameter_fails<C: Connection>(connection: &mut C) {
    run_sql(connection, "DROP TABLE IF EXISTS unknown_param").await;
    run_sql(connection, "CREATE TABLE unknown_param (id INT)").await;

    let mut statement = connection
        .statement("INSERT INTO unknown_param VALUES (:id)")
        .expect("Failed to prepare the insert");
    let error;
    silent_logs! {
        error = match statement.bind("missing", 1) {
            Ok(..) => panic!("Binding an undeclared key must fail"),
            Err(error) => error,
        };
    };
    assert!(
        matches!(&error, Error::UnknownParameter(..)),
        "unexpected error: {error}"
    );
    // An out of range integer key is reported with its face value.
    let error;
    silent_logs! {
        error = match statement.bind(-3, 1) {
            Ok(..) => panic!("Binding a negative key must fail"),
            Err(error) => error,
        };
    };
    assert!(error.to_string().contains("$-3"), "unexpected error: {error}");
    statement.bind("id", 9).expect("Failed to bind `id`");
    let affected = statement
        .execute()
        .await
        .expect("The statement must stay usable after a rejected bind");
    assert_eq!(affected.rows_affected, 1);
}

/// Rebinding a key before the batch is sealed overwrites the value.
pub async fn rebind_overwrites<C: Connection>(connection: &mut C) {
    run_sql(connection, "DROP TABLE IF EXISTS rebind").await;
    run_sql(connection, "CREATE TABLE rebind (id INT)").await;

    let mut statement = connection
        .statement("INSERT INTO rebind VALUES (?)")
        .expect("Failed to prepare the insert");
    statement
        .bind(1, 5)
        .expect("Failed to bind the first value")
        .bind(1, 7)
        .expect("Failed to rebind");
    statement.execute().await.expect("Failed to execute");

    let mut statement = connection
        .statement("SELECT id FROM rebind")
        .expect("Failed to prepare the select");
    let rows = statement.fetch().collect::<Vec<_>>().await;
    assert_eq!(rows.len(), 1);
    let row = rows[0].as_ref().expect("Failed to read the row");
    assert_eq!(row.try_get::<i32>(0).unwrap(), 7);
}

/// Typed nulls round through the engine and decode as `None`.
pub async fn bind_null_typed<C: Connection>(connection: &mut C) {
    run_sql(connection, "DROP TABLE IF EXISTS nullable").await;
    run_sql(connection, "CREATE TABLE nullable (id INT, label VARCHAR)").await;

    let mut statement = connection
        .statement("INSERT INTO nullable VALUES (?, ?)")
        .expect("Failed to prepare the insert");
    statement
        .bind(1, 3)
        .expect("Failed to bind the id")
        .bind_null(2, DataType::Varchar)
        .expect("Failed to bind the null");
    statement.execute().await.expect("Failed to execute");

    let mut statement = connection
        .statement("SELECT label FROM nullable WHERE id = ?")
        .expect("Failed to prepare the select");
    statement.bind(1, 3).expect("Failed to bind the filter");
    let rows = statement.fetch().collect::<Vec<_>>().await;
    assert_eq!(rows.len(), 1);
    let row = rows[0].as_ref().expect("Failed to read the row");
    assert!(row.get(0).expect("Missing column").is_null());
    assert_eq!(row.try_get::<Option<String>>(0).unwrap(), None);
}
