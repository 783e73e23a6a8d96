use crate::{Result, Statement};
use std::future::Future;

/// Exclusive owner of one database handle.
///
/// All native calls of one connection are serialized on a dedicated
/// execution context: statements run in the order their execute was
/// invoked, concurrent executes queue behind the in-flight one. The public
/// surface never blocks the caller's thread.
pub trait Connection: Send + Sized {
    type Statement: Statement;

    /// Open a connection to the given URL.
    fn connect(url: &str) -> impl Future<Output = Result<Self>> + Send;

    /// Create a statement for the given SQL text. Placeholder discovery
    /// and rewriting happen here; malformed placeholders fail statement
    /// creation with `Parse`.
    fn statement(&mut self, sql: &str) -> Result<Self::Statement>;

    /// Whether executions outside an explicit transaction commit
    /// implicitly. The flag is snapshotted per execute and handed to the
    /// engine, which owns the actual transaction scope.
    fn is_auto_commit(&self) -> bool;

    fn set_auto_commit(&mut self, auto_commit: bool);

    /// Close the connection, waiting for the queued executions to finish.
    fn close(self) -> impl Future<Output = Result<()>> + Send;
}
