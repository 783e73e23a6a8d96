use crate::{
    AsValue, DataType, ParameterKey, QueryResult, Result, RowLabeled, RowsAffected,
    stream::{Stream, StreamExt, TryStreamExt},
};
use std::future::Future;

/// A parameterized statement bound to one connection.
///
/// Placeholders discovered in the SQL text (`?`, `$n`, `:name`) become
/// logical parameters addressed by [`ParameterKey`]. A statement issues
/// exactly one execute cycle, which may cover several batches:
///
/// ```text
/// created --(bind* add)*--> run --> completed | failed
/// ```
///
/// Rebinding a key before `add` overwrites the previous value. Every
/// distinct key must be bound when a batch is sealed, otherwise the
/// operation fails with `BindIncomplete` and the engine is never invoked.
pub trait Statement: Send {
    /// Bind a value to a parameter. Integer keys address positional and
    /// indexed placeholders, string keys address named ones.
    fn bind(&mut self, key: impl Into<ParameterKey>, value: impl AsValue) -> Result<&mut Self>;

    /// Bind a typed null.
    fn bind_null(&mut self, key: impl Into<ParameterKey>, data_type: DataType)
    -> Result<&mut Self>;

    /// Seal the currently bound values into a batch and reset every slot
    /// for the next one.
    fn add(&mut self) -> Result<&mut Self>;

    /// Dispatch the execute cycle. With no prior `add` the current binds
    /// form a single implicit batch. Batches execute in submission order
    /// and their results are emitted in that same order; each batch yields
    /// either one update count or its rows, as decided by the engine.
    fn run(&mut self) -> impl Stream<Item = Result<QueryResult>> + Send + Unpin;

    /// Execute the statement and return the rows.
    fn fetch(&mut self) -> impl Stream<Item = Result<RowLabeled>> + Send {
        self.run().filter_map(|v| async move {
            match v {
                Ok(QueryResult::RowLabeled(v)) => Some(Ok(v)),
                Err(e) => Some(Err(e)),
                _ => None,
            }
        })
    }

    /// Execute the statement and return the total number of rows affected.
    fn execute(&mut self) -> impl Future<Output = Result<RowsAffected>> + Send {
        self.run()
            .filter_map(|v| async move {
                match v {
                    Ok(QueryResult::Affected(v)) => Some(Ok(v)),
                    Err(e) => Some(Err(e)),
                    _ => None,
                }
            })
            .try_collect()
    }
}
