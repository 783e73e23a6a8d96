use crate::{
    EmbedStatement, Engine, Rewritten, parse_placeholders, rewrite,
    worker::{Task, run_worker},
};
use beck_core::{Connection, Error, Result};
use std::{
    collections::HashMap,
    marker::PhantomData,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    thread,
};

/// Rewritten statements, cached per distinct SQL text. Rewriting is pure,
/// so repeated `statement` calls for the same text share one result.
#[derive(Default)]
struct StatementCache {
    rewritten: HashMap<String, Arc<Rewritten>>,
}

impl StatementCache {
    fn get_or_rewrite(&mut self, sql: &str) -> Result<Arc<Rewritten>> {
        if let Some(rewritten) = self.rewritten.get(sql) {
            return Ok(rewritten.clone());
        }
        let placeholders = parse_placeholders(sql)?;
        let rewritten = Arc::new(rewrite(sql, &placeholders));
        self.rewritten.insert(sql.to_owned(), rewritten.clone());
        Ok(rewritten)
    }
}

/// Connection to an embedded engine.
///
/// Exclusively owns the engine handle through a dedicated execution
/// thread: every native call of this connection runs there, in the order
/// it was queued, and the asynchronous surface never blocks the caller.
pub struct EmbedConnection<E: Engine> {
    tasks: flume::Sender<Task>,
    worker: Option<thread::JoinHandle<()>>,
    auto_commit: Arc<AtomicBool>,
    statements: StatementCache,
    _engine: PhantomData<E>,
}

impl<E: Engine> EmbedConnection<E> {
    /// Wraps an already opened engine, spawning its execution thread.
    pub fn open(engine: E) -> Result<Self> {
        let (tasks, queue) = flume::unbounded();
        let worker = thread::Builder::new()
            .name(format!("{}-exec", E::NAME))
            .spawn(move || run_worker(engine, queue))
            .map_err(|e| {
                let error =
                    Error::Configuration(format!("cannot spawn the execution thread: {e}"));
                log::error!("{error}");
                error
            })?;
        Ok(Self {
            tasks,
            worker: Some(worker),
            auto_commit: Arc::new(AtomicBool::new(true)),
            statements: StatementCache::default(),
            _engine: PhantomData,
        })
    }
}

impl<E: Engine> Connection for EmbedConnection<E> {
    type Statement = EmbedStatement;

    async fn connect(url: &str) -> Result<Self> {
        let prefix = format!("{}://", E::NAME);
        let Some(target) = url.strip_prefix(&prefix) else {
            let error = Error::Configuration(format!(
                "expected the connection url to start with `{prefix}`"
            ));
            log::error!("{error}");
            return Err(error);
        };
        Self::open(E::open(target)?)
    }

    fn statement(&mut self, sql: &str) -> Result<EmbedStatement> {
        let rewritten = self.statements.get_or_rewrite(sql)?;
        Ok(EmbedStatement::new(
            rewritten,
            self.tasks.clone(),
            self.auto_commit.clone(),
        ))
    }

    fn is_auto_commit(&self) -> bool {
        self.auto_commit.load(Ordering::Relaxed)
    }

    fn set_auto_commit(&mut self, auto_commit: bool) {
        self.auto_commit.store(auto_commit, Ordering::Relaxed);
    }

    /// Queues a close marker behind the pending executions and waits for
    /// the worker to acknowledge it.
    async fn close(mut self) -> Result<()> {
        let (ack, done) = flume::bounded(1);
        self.tasks
            .send(Task::Close { ack })
            .map_err(|_| Error::Closed)?;
        done.recv_async().await.map_err(|_| Error::Closed)?;
        if let Some(worker) = self.worker.take() {
            // Already acknowledged, the thread is returning.
            let _ = worker.join();
        }
        Ok(())
    }
}
