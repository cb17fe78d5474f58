/**
 * HTTP Call Channel
 *
 * Mirror image of the effect runtime for outbound calls. The channel performs
 * declared calls through a shared `HttpClient` and publishes each outcome,
 * correlated by category, on a broadcast bus owned by one request.
 *
 * Handlers read outcomes through `HttpSource::select_response`, which yields
 * success and failure on a single stream so a handler can react to both in
 * one place.
 */
use std::sync::Arc;

use futures_util::future;
use futures_util::stream::{BoxStream, Stream, StreamExt};
use tokio::sync::broadcast;

use crate::backend::http::client::HttpClient;
use crate::backend::http::descriptor::{HttpCallDescriptor, HttpOutcome};
use crate::backend::streams::subscribe;

const OUTCOME_CAPACITY: usize = 64;
const MAX_IN_FLIGHT: usize = 16;

/// Per-request outbound call executor
pub struct HttpChannel {
    client: Arc<dyn HttpClient>,
    outcomes: broadcast::Sender<HttpOutcome>,
}

impl HttpChannel {
    /// Create a channel for one request on top of a shared client
    pub fn new(client: Arc<dyn HttpClient>) -> Self {
        let (outcomes, _) = broadcast::channel(OUTCOME_CAPACITY);
        Self { client, outcomes }
    }

    /// Read-only view over this channel's outcomes
    pub fn source(&self) -> HttpSource {
        HttpSource {
            outcomes: self.outcomes.clone(),
        }
    }

    /// Perform every call from `calls`, yielding outcomes as they settle
    ///
    /// Calls are made once each, concurrently. Dropping the returned stream
    /// abandons calls still in flight; their results are never published.
    pub fn run<S>(&self, calls: S) -> BoxStream<'static, HttpOutcome>
    where
        S: Stream<Item = HttpCallDescriptor> + Send + 'static,
    {
        let client = self.client.clone();
        let outcomes = self.outcomes.clone();
        calls
            .map(move |call| perform(client.clone(), outcomes.clone(), call))
            .buffer_unordered(MAX_IN_FLIGHT)
            .boxed()
    }
}

async fn perform(
    client: Arc<dyn HttpClient>,
    outcomes: broadcast::Sender<HttpOutcome>,
    call: HttpCallDescriptor,
) -> HttpOutcome {
    tracing::debug!(category = %call.category, method = %call.method, "sending request");

    let result = client.send(&call).await;
    match &result {
        Ok(response) => {
            tracing::debug!(category = %call.category, status = response.status, "response received")
        }
        Err(error) => tracing::debug!(category = %call.category, %error, "request failed"),
    }

    let outcome = HttpOutcome {
        category: call.category,
        result,
    };
    let _ = outcomes.send(outcome.clone());
    outcome
}

/// Read-only, category-filtered view over a channel's outcomes
#[derive(Clone)]
pub struct HttpSource {
    outcomes: broadcast::Sender<HttpOutcome>,
}

impl HttpSource {
    /// Outcomes for `category`, or for every category when `None`
    ///
    /// Success and failure arrive on the same stream; inspect
    /// `HttpOutcome::result` to tell them apart.
    pub fn select_response(&self, category: Option<&str>) -> BoxStream<'static, HttpOutcome> {
        let category = category.map(str::to_owned);
        subscribe(&self.outcomes)
            .filter(move |outcome| {
                future::ready(match &category {
                    Some(category) => outcome.category == *category,
                    None => true,
                })
            })
            .boxed()
    }
}
