use crate::{Engine, Execution, Rewritten};
use beck_core::{ColumnDescriptor, QueryResult, Result, Row, RowLabeled, RowMetadata};
use std::sync::Arc;

pub(crate) enum Task {
    Execute {
        statement: Arc<Rewritten>,
        batches: Vec<Row>,
        auto_commit: bool,
        results: flume::Sender<Result<QueryResult>>,
    },
    Close {
        ack: flume::Sender<()>,
    },
}

/// Dedicated execution loop of one connection.
///
/// Owns the engine handle exclusively and drains the task queue in FIFO
/// order, which is what serializes statements per connection. Exits when
/// the connection is dropped (channel disconnects, after the queue runs
/// dry) or explicitly closed.
pub(crate) fn run_worker<E: Engine>(mut engine: E, tasks: flume::Receiver<Task>) {
    while let Ok(task) = tasks.recv() {
        match task {
            Task::Execute {
                statement,
                batches,
                auto_commit,
                results,
            } => execute_task(&mut engine, &statement, batches, auto_commit, &results),
            Task::Close { ack } => {
                let _ = ack.send(());
                return;
            }
        }
    }
}

/// Runs every batch of one statement in insertion order. The results
/// channel is a rendezvous: each send suspends until the consumer demands
/// the item, so the cursor never advances ahead of demand. A disconnected
/// consumer cancels the remainder of the task and drops the cursor.
fn execute_task<E: Engine>(
    engine: &mut E,
    statement: &Rewritten,
    batches: Vec<Row>,
    auto_commit: bool,
    results: &flume::Sender<Result<QueryResult>>,
) {
    for params in batches {
        let execution = match engine.execute(&statement.native_sql, &params, auto_commit) {
            Ok(execution) => execution,
            Err(error) => {
                log::error!("{error}");
                let _ = results.send(Err(error));
                return;
            }
        };
        match execution {
            Execution::Affected(affected) => {
                if results.send(Ok(QueryResult::Affected(affected))).is_err() {
                    return;
                }
            }
            Execution::ResultSet {
                columns,
                mut cursor,
            } => {
                let metadata = Arc::new(RowMetadata::new(columns.into_iter().enumerate().map(
                    |(index, column)| ColumnDescriptor {
                        label: column.label,
                        name: column.name,
                        index,
                        data_type: column.data_type,
                    },
                )));
                loop {
                    match cursor.next_row() {
                        Ok(Some(values)) => {
                            let row = RowLabeled::new(metadata.clone(), values);
                            if results.send(Ok(QueryResult::RowLabeled(row))).is_err() {
                                return;
                            }
                        }
                        Ok(None) => break,
                        Err(error) => {
                            log::error!("{error}");
                            let _ = results.send(Err(error));
                            return;
                        }
                    }
                }
            }
        }
    }
}
