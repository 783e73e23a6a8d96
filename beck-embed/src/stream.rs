use beck_core::{Error, QueryResult, Result, Row, RowMetadata};
use futures::{Stream, StreamExt, future::ready};
use std::{
    pin::Pin,
    task::{Context, Poll},
};

/// Lazily delivered results of one execute cycle.
///
/// Forward-only, single pass, finite. Each item is pulled from the
/// execution worker through a rendezvous channel, so the engine cursor
/// advances only when the consumer demands the next row. Dropping the
/// stream before exhaustion releases the cursor and cancels the remaining
/// batches without blocking the worker.
pub struct QueryStream {
    results: Option<flume::r#async::RecvStream<'static, Result<QueryResult>>>,
    reported: bool,
}

impl QueryStream {
    pub(crate) fn channel() -> (flume::Sender<Result<QueryResult>>, Self) {
        // Rendezvous: the worker blocks in send until the consumer polls.
        let (sender, receiver) = flume::bounded(0);
        (
            sender,
            Self {
                results: Some(receiver.into_stream()),
                reported: false,
            },
        )
    }

    /// Releases the underlying cursor. Any later poll reports
    /// `ResultConsumed` once and then ends the stream.
    pub fn close(&mut self) {
        self.results = None;
    }

    /// Hands every row to the caller supplied mapping together with the
    /// result metadata, skipping update counts.
    pub fn map_rows<T, F>(self, mut f: F) -> impl Stream<Item = Result<T>> + Send
    where
        F: FnMut(&Row, &RowMetadata) -> T + Send,
        T: Send,
    {
        self.filter_map(move |item| {
            ready(match item {
                Ok(QueryResult::RowLabeled(row)) => Some(Ok(f(&row.values, &row.metadata))),
                Ok(QueryResult::Affected(..)) => None,
                Err(error) => Some(Err(error)),
            })
        })
    }
}

impl Stream for QueryStream {
    type Item = Result<QueryResult>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        if let Some(results) = this.results.as_mut() {
            match results.poll_next_unpin(cx) {
                Poll::Ready(None) => {
                    this.results = None;
                    Poll::Ready(None)
                }
                other => other,
            }
        } else if !this.reported {
            this.reported = true;
            Poll::Ready(Some(Err(Error::ResultConsumed)))
        } else {
            Poll::Ready(None)
        }
    }
}
