#[cfg(test)]
mod tests {
    use beck::{Connection, Statement, Value, stream::StreamExt};
    use beck_embed::EmbedConnection;
    use beck_tests::{MemoryEngine, init_logs};

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
    async fn insert_and_query_through_the_facade() {
        init_logs();
        let mut connection = MemoryConnection::connect("memory://facade")
            .await
            .expect("Could not open the database");
        exec(
            &mut connection,
            "CREATE TABLE account (id INT, owner VARCHAR, balance DOUBLE)",
        )
        .await;

        let mut statement = connection
            .statement("INSERT INTO account VALUES (:id, :owner, :balance)")
            .expect("Failed to prepare the insert");
        statement
            .bind("id", 1)
            .expect("Failed to bind")
            .bind("owner", "ada")
            .expect("Failed to bind")
            .bind("balance", 12.5)
            .expect("Failed to bind")
            .add()
            .expect("Failed to seal")
            .bind("id", 2)
            .expect("Failed to bind")
            .bind("owner", "grace")
            .expect("Failed to bind")
            .bind("balance", 0.0)
            .expect("Failed to bind");
        let affected = statement
            .execute()
            .await
            .expect("Failed to execute the insert");
        assert_eq!(affected.rows_affected, 2);

        let mut statement = connection
            .statement("SELECT owner FROM account WHERE id = $2 OR id = $1")
            .expect("Failed to prepare the select");
        statement
            .bind(1, 1)
            .expect("Failed to bind $1")
            .bind(2, 2)
            .expect("Failed to bind $2");
        let owners = statement
            .fetch()
            .map(|row| {
                row.expect("Failed to read a row")
                    .try_get::<String>(0)
                    .expect("Failed to decode the owner")
            })
            .collect::<Vec<_>>()
            .await;
        assert_eq!(owners, ["ada", "grace"]);

        connection.close().await.expect("Failed to close");
    }

    #[tokio::test]
    async fn row_mapping_with_metadata() {
        init_logs();
        let mut connection = MemoryConnection::connect("memory://mapping")
            .await
            .expect("Could not open the database");
        exec(
            &mut connection,
            "CREATE TABLE city (name VARCHAR, population INT)",
        )
        .await;
        exec(
            &mut connection,
            "INSERT INTO city VALUES ('Rome', 2800000), ('Oslo', 700000)",
        )
        .await;

        let mut statement = connection
            .statement("SELECT name, population FROM city")
            .expect("Failed to prepare the select");
        let cities = statement
            .dispatch()
            .expect("Failed to dispatch")
            .map_rows(|row, metadata| {
                let name = metadata
                    .column_metadata("NAME")
                    .expect("The name column must resolve");
                match &row[name.index] {
                    Value::Varchar(Some(v)) => v.clone(),
                    other => panic!("unexpected value: {other:?}"),
                }
            })
            .collect::<Vec<_>>()
            .await;
        let cities = cities
            .into_iter()
            .collect::<beck::Result<Vec<_>>>()
            .expect("Failed to map the rows");
        assert_eq!(cities, ["Rome", "Oslo"]);

        connection.close().await.expect("Failed to close");
    }
}
