/**
 * Stream Composition Helpers
 *
 * Handlers describe their behavior as streams derived from the per-request
 * outcome buses. `futures_util::StreamExt` already covers `map`, `filter`,
 * `filter_map` and `stream::select`/`select_all` (merge); this module adds the
 * two pieces it lacks:
 *
 * - `subscribe` - turn a broadcast sender into a fresh outcome stream
 * - `combine_latest` - join two streams into pairs of their latest values
 *
 * # Subscription Timing
 *
 * A broadcast receiver only sees values sent after it was created. Handlers
 * therefore call `select*` while composing their sinks, before the dispatch
 * loop starts executing anything, so no outcome can be missed.
 */
use futures_util::future::{self, Either};
use futures_util::stream::{self, BoxStream, Stream, StreamExt};
use tokio::sync::broadcast;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::wrappers::BroadcastStream;

/// Subscribe to a broadcast bus as a stream
///
/// The stream ends only when every sender has been dropped. Lagged receivers
/// log a warning and continue with the next available value.
pub fn subscribe<T>(sender: &broadcast::Sender<T>) -> BoxStream<'static, T>
where
    T: Clone + Send + 'static,
{
    BroadcastStream::new(sender.subscribe())
        .filter_map(|item| {
            future::ready(match item {
                Ok(value) => Some(value),
                Err(BroadcastStreamRecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "outcome subscriber lagged, values dropped");
                    None
                }
            })
        })
        .boxed()
}

/// Pair every new value with the latest value of the other stream
///
/// Nothing is emitted until both sides have produced at least once. After
/// that, each value from either side yields one `(left, right)` pair.
pub fn combine_latest<A, B, SA, SB>(left: SA, right: SB) -> BoxStream<'static, (A, B)>
where
    A: Clone + Send + 'static,
    B: Clone + Send + 'static,
    SA: Stream<Item = A> + Send + 'static,
    SB: Stream<Item = B> + Send + 'static,
{
    stream::select(left.map(Either::Left), right.map(Either::Right))
        .scan(
            (None, None),
            |latest: &mut (Option<A>, Option<B>), item| {
                match item {
                    Either::Left(value) => latest.0 = Some(value),
                    Either::Right(value) => latest.1 = Some(value),
                }
                future::ready(Some(latest.0.clone().zip(latest.1.clone())))
            },
        )
        .filter_map(future::ready)
        .boxed()
}
