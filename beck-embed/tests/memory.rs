#[cfg(test)]
mod tests {
    use beck_core::{Connection, Error, Statement, stream::StreamExt};
    use beck_embed::EmbedConnection;
    use beck_tests::{MemoryEngine, execute_tests, init_logs, silent_logs};

    type MemoryConnection = EmbedConnection<MemoryEngine>;

    async fn exec(connection: &mut MemoryConnection, sql: &str) {
        connection
            .statement(sql)
            .unwrap_or_else(|e| panic!("Failed to prepare `{sql}`: {e}"))
            .execute()
            .await
            .unwrap_or_else(|e| panic!("Failed to execute `{sql}`: {e}"));
    }

    #[tokio::test]
    async fn memory() {
        init_logs();
        let connection = MemoryConnection::connect("memory://scenarios")
            .await
            .expect("Could not open the database");
        execute_tests(connection).await;
    }

    #[tokio::test]
    async fn wrong_url() {
        silent_logs! {
            assert!(
                MemoryConnection::connect("duckdb://some_value")
                    .await
                    .is_err()
            );
        };
    }

    #[tokio::test]
    async fn native_sql() {
        init_logs();
        let mut connection = MemoryConnection::connect("memory://rewrite")
            .await
            .expect("Could not open the database");
        let statement = connection
            .statement("INSERT INTO t VALUES (:a, :a)")
            .expect("Failed to prepare");
        assert_eq!(statement.native_sql(), "INSERT INTO t VALUES (?1, ?1)");
        // The second preparation hits the statement cache.
        let again = connection
            .statement("INSERT INTO t VALUES (:a, :a)")
            .expect("Failed to prepare");
        assert_eq!(again.native_sql(), "INSERT INTO t VALUES (?1, ?1)");
    }

    #[tokio::test]
    async fn malformed_placeholder_fails_preparation() {
        let mut connection = MemoryConnection::connect("memory://malformed")
            .await
            .expect("Could not open the database");
        silent_logs! {
            assert!(matches!(
                connection.statement("SELECT $0"),
                Err(Error::Parse { .. })
            ));
        };
    }

    #[tokio::test]
    async fn close_drains_then_rejects() {
        init_logs();
        let mut connection = MemoryConnection::connect("memory://closing")
            .await
            .expect("Could not open the database");
        exec(&mut connection, "CREATE TABLE closing (id INT)").await;
        exec(&mut connection, "INSERT INTO closing VALUES (1)").await;
        let mut statement = connection
            .statement("SELECT id FROM closing")
            .expect("Failed to prepare");
        connection.close().await.expect("Failed to close");
        let error;
        silent_logs! {
            error = statement
                .execute()
                .await
                .expect_err("Executing on a closed connection must fail");
        };
        assert!(matches!(error, Error::Closed), "{error}");
    }

    #[tokio::test]
    async fn closed_result_reports_consumed_once() {
        init_logs();
        let mut connection = MemoryConnection::connect("memory://consumed")
            .await
            .expect("Could not open the database");
        exec(&mut connection, "CREATE TABLE consumed (id INT)").await;
        exec(&mut connection, "INSERT INTO consumed VALUES (1), (2)").await;
        let mut statement = connection
            .statement("SELECT id FROM consumed")
            .expect("Failed to prepare");
        let mut results = statement.dispatch().expect("Failed to dispatch");
        results
            .next()
            .await
            .expect("The stream must yield a first row")
            .expect("Failed to read the first row");
        results.close();
        assert!(matches!(
            results.next().await,
            Some(Err(Error::ResultConsumed))
        ));
        assert!(results.next().await.is_none());
    }

    #[tokio::test]
    async fn auto_commit_flag() {
        init_logs();
        let mut connection = MemoryConnection::connect("memory://autocommit")
            .await
            .expect("Could not open the database");
        assert!(connection.is_auto_commit());
        connection.set_auto_commit(false);
        assert!(!connection.is_auto_commit());
    }
}
