/**
 * Effect Runtime
 *
 * The runtime executes effect descriptors and publishes their outcomes on a
 * broadcast bus owned by one request. Handlers never touch the runtime
 * directly; they receive an `EffectSource`, a read-only view that can only
 * subscribe to the bus.
 *
 * # Execution
 *
 * `EffectRuntime::run` turns a stream of descriptors into a stream of
 * outcomes. Producers run concurrently (up to `MAX_IN_FLIGHT` at once) with
 * no ordering guarantee between descriptors. Each outcome is published to the
 * bus before it is yielded, so every view subscribed at composition time
 * observes it.
 *
 * # Failure Containment
 *
 * A producer that returns `Err` produces an outcome with the error branch
 * set. A producer that panics is caught with `catch_unwind` and reported as
 * `EffectError::Panicked`; the runtime keeps running.
 */
use std::any::Any;
use std::panic::AssertUnwindSafe;

use futures_util::future::{self, FutureExt};
use futures_util::stream::{BoxStream, Stream, StreamExt};
use serde_json::Value;
use tokio::sync::broadcast;

use crate::backend::effects::descriptor::{EffectDescriptor, EffectError, EffectOutcome};
use crate::backend::streams::subscribe;

/// Tag that selects outcomes of every tag
pub const WILDCARD: &str = "*";

/// Buffered outcomes per request before slow views start lagging
const OUTCOME_CAPACITY: usize = 64;

/// Producers allowed to run concurrently for one request
const MAX_IN_FLIGHT: usize = 32;

/// Per-request effect executor
///
/// Construct one per request; outcomes never cross request boundaries.
pub struct EffectRuntime {
    outcomes: broadcast::Sender<EffectOutcome>,
}

impl EffectRuntime {
    pub fn new() -> Self {
        let (outcomes, _) = broadcast::channel(OUTCOME_CAPACITY);
        Self { outcomes }
    }

    /// Read-only view over this runtime's outcomes
    pub fn source(&self) -> EffectSource {
        EffectSource {
            outcomes: self.outcomes.clone(),
        }
    }

    /// Execute every descriptor from `effects`, yielding outcomes as they settle
    ///
    /// Nothing runs until the returned stream is polled. Dropping the stream
    /// drops every producer that has not settled yet.
    pub fn run<S>(&self, effects: S) -> BoxStream<'static, EffectOutcome>
    where
        S: Stream<Item = EffectDescriptor> + Send + 'static,
    {
        let outcomes = self.outcomes.clone();
        effects
            .map(move |descriptor| execute(outcomes.clone(), descriptor))
            .buffer_unordered(MAX_IN_FLIGHT)
            .boxed()
    }
}

impl Default for EffectRuntime {
    fn default() -> Self {
        Self::new()
    }
}

async fn execute(
    outcomes: broadcast::Sender<EffectOutcome>,
    descriptor: EffectDescriptor,
) -> EffectOutcome {
    let (tag, producer) = descriptor.into_parts();
    tracing::debug!(%tag, "invoking effect");

    let result = AssertUnwindSafe(async move { producer().await })
        .catch_unwind()
        .await
        .unwrap_or_else(|panic| Err(EffectError::Panicked(panic_message(panic.as_ref()))));

    if let Err(error) = &result {
        tracing::debug!(%tag, %error, "effect failed");
    }

    let outcome = EffectOutcome { tag, result };
    // No subscribers is fine: the handler did not ask for this outcome
    let _ = outcomes.send(outcome.clone());
    outcome
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Read-only, tag-filtered views over an effect runtime's outcomes
///
/// Every `select*` call creates an independent subscription. Call them while
/// composing sinks so the subscription exists before the effect runs.
#[derive(Clone)]
pub struct EffectSource {
    outcomes: broadcast::Sender<EffectOutcome>,
}

impl EffectSource {
    /// Every outcome for `tag`, success or failure
    pub fn select(&self, tag: &str) -> BoxStream<'static, EffectOutcome> {
        let tag = tag.to_owned();
        subscribe(&self.outcomes)
            .filter(move |outcome| future::ready(tag == WILDCARD || outcome.tag == tag))
            .boxed()
    }

    /// Successful values for `tag`
    pub fn select_value(&self, tag: &str) -> BoxStream<'static, Value> {
        self.select(tag)
            .filter_map(|outcome| future::ready(outcome.result.ok()))
            .boxed()
    }

    /// Errors for `tag`
    pub fn select_error(&self, tag: &str) -> BoxStream<'static, EffectError> {
        self.select(tag)
            .filter_map(|outcome| future::ready(outcome.result.err()))
            .boxed()
    }
}
