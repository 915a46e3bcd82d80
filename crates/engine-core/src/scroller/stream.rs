use super::{Advance, ResultScroller};
use connectors::error::FetchError;
use futures::{Stream, stream};
use tokio_util::sync::CancellationToken;

impl<R: Send + 'static> ResultScroller<R> {
    /// Turns the scroller into a stream of records.
    ///
    /// The stream ends on exhaustion. In strict mode a refill failure is
    /// yielded as the final item.
    pub fn into_stream(self, cancel: CancellationToken) -> impl Stream<Item = Result<R, FetchError>> {
        stream::unfold(Some(self), move |state| {
            let cancel = cancel.clone();
            async move {
                let mut scroller = state?;
                match scroller.advance(&cancel).await {
                    Advance::HasMore => {
                        let record = scroller.next_record();
                        Some((Ok(record), Some(scroller)))
                    }
                    Advance::Exhausted => None,
                    Advance::FetchFailed(err) => Some((Err(err), None)),
                }
            }
        })
    }
}
