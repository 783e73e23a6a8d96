use crate::{Binder, QueryStream, Rewritten, worker::Task};
use beck_core::{
    AsValue, DataType, Error, ParameterKey, QueryResult, Result, Statement, Value,
    stream::{self, Stream},
};
use futures::future::{Either, ready};
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

/// Statement over an embedded engine connection.
///
/// Holds the rewritten SQL (shared through the connection's statement
/// cache) and the bind state. One instance issues exactly one execute
/// cycle; bind, add and run after that cycle started fail with
/// `IllegalState`.
pub struct EmbedStatement {
    rewritten: Arc<Rewritten>,
    binder: Binder,
    executed: bool,
    tasks: flume::Sender<Task>,
    auto_commit: Arc<AtomicBool>,
}

impl EmbedStatement {
    pub(crate) fn new(
        rewritten: Arc<Rewritten>,
        tasks: flume::Sender<Task>,
        auto_commit: Arc<AtomicBool>,
    ) -> Self {
        let binder = Binder::new(&rewritten.slots);
        Self {
            rewritten,
            binder,
            executed: false,
            tasks,
            auto_commit,
        }
    }

    /// The engine-native form of the SQL.
    pub fn native_sql(&self) -> &str {
        &self.rewritten.native_sql
    }

    fn check_open(&self, operation: &str) -> Result<()> {
        if self.executed {
            let error = Error::IllegalState(format!(
                "cannot {operation}: the statement has already been executed"
            ));
            log::error!("{error}");
            return Err(error);
        }
        Ok(())
    }

    /// Validates completeness, snapshots the batches and queues them on
    /// the connection's execution context. Nothing reaches the engine when
    /// validation fails and the statement stays bindable, so the caller
    /// can complete the binds and retry.
    pub fn dispatch(&mut self) -> Result<QueryStream> {
        self.check_open("execute")?;
        let batches = self.binder.take_batches()?;
        self.executed = true;
        let (results, stream) = QueryStream::channel();
        log::debug!(
            "executing `{}` with {} batch(es)",
            self.rewritten.native_sql,
            batches.len()
        );
        self.tasks
            .send(Task::Execute {
                statement: self.rewritten.clone(),
                batches,
                auto_commit: self.auto_commit.load(Ordering::Relaxed),
                results,
            })
            .map_err(|_| {
                let error = Error::Closed;
                log::error!("{error}");
                error
            })?;
        Ok(stream)
    }
}

impl Statement for EmbedStatement {
    fn bind(&mut self, key: impl Into<ParameterKey>, value: impl AsValue) -> Result<&mut Self> {
        self.check_open("bind")?;
        self.binder.bind(&key.into(), value.as_value())?;
        Ok(self)
    }

    fn bind_null(
        &mut self,
        key: impl Into<ParameterKey>,
        data_type: DataType,
    ) -> Result<&mut Self> {
        self.check_open("bind")?;
        self.binder.bind(&key.into(), Value::null_of(data_type))?;
        Ok(self)
    }

    fn add(&mut self) -> Result<&mut Self> {
        self.check_open("add")?;
        self.binder.add()?;
        Ok(self)
    }

    fn run(&mut self) -> impl Stream<Item = Result<QueryResult>> + Send + Unpin {
        match self.dispatch() {
            Ok(stream) => Either::Left(stream),
            Err(error) => Either::Right(stream::once(ready(Err(error)))),
        }
    }
}
