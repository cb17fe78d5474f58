/**
 * Dispatch Loop
 *
 * The dispatcher is the only place where a handler's declared work actually
 * runs. For every request it creates a fresh `EffectRuntime` and
 * `HttpChannel`, asks the handler for its sinks, then drives all four sinks
 * from a single task until the first response envelope arrives.
 *
 * # Termination
 *
 * The loop ends on the first of:
 * - an envelope on the response sink (the normal case)
 * - the response sink finishing without an envelope
 * - the configured request deadline passing
 *
 * The last two are reported as a generic 500 with an error log entry.
 *
 * # Cancellation
 *
 * Every stream in the graph is owned by the loop. Once it returns, the graph
 * is dropped: producers that never started are never invoked and in-flight
 * calls are abandoned without their results being observed. Log entries that
 * are already available are written before the graph is dropped.
 */
use std::sync::Arc;

use futures_util::{FutureExt, StreamExt};
use tracing::Instrument;

use crate::backend::dispatch::envelope::{LogEntry, ResponseEnvelope};
use crate::backend::dispatch::request::ApiRequest;
use crate::backend::dispatch::sinks::{Handler, Sources};
use crate::backend::effects::EffectRuntime;
use crate::backend::http::{HttpChannel, HttpClient};
use crate::shared::config::AppConfig;

/// Result of dispatching one request
#[derive(Debug)]
pub struct Dispatched {
    /// The terminal envelope
    pub response: ResponseEnvelope,
    /// Every log entry written while the request ran, in order
    pub logs: Vec<LogEntry>,
}

/// Runs handlers against live runtimes
///
/// The dispatcher itself is shared across requests; only the HTTP client
/// inside it is. Runtimes are created per call to [`Dispatcher::dispatch`].
#[derive(Clone)]
pub struct Dispatcher {
    config: Arc<AppConfig>,
    http_client: Arc<dyn HttpClient>,
}

impl Dispatcher {
    pub fn new(config: Arc<AppConfig>, http_client: Arc<dyn HttpClient>) -> Self {
        Self { config, http_client }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Dispatch `request` to `handler` and wait for its terminal response
    ///
    /// # Arguments
    ///
    /// * `handler` - The handler that composes the request's sinks
    /// * `request` - The extracted request
    ///
    /// # Returns
    ///
    /// The first response envelope together with the log trail
    pub async fn dispatch(&self, handler: &dyn Handler, request: ApiRequest) -> Dispatched {
        let span = tracing::info_span!(
            "request",
            request_id = %request.id,
            handler = handler.name()
        );
        self.drive(handler, request).instrument(span).await
    }

    async fn drive(&self, handler: &dyn Handler, request: ApiRequest) -> Dispatched {
        tracing::debug!(method = %request.method, path = %request.path, "dispatching request");

        let effects = EffectRuntime::new();
        let calls = HttpChannel::new(self.http_client.clone());
        let sources = Sources {
            effect: effects.source(),
            http: calls.source(),
        };

        let sinks = handler.handle(&request, &self.config, sources);

        let mut logs = sinks.log.fuse();
        let mut responses = sinks.response.fuse();
        let mut effect_outcomes = effects.run(sinks.effect).fuse();
        let mut call_outcomes = calls.run(sinks.http).fuse();

        let deadline = tokio::time::sleep(self.config.request_timeout);
        tokio::pin!(deadline);

        let mut written = Vec::new();
        let mut write = |entry: LogEntry| {
            entry.write();
            written.push(entry);
        };

        let response = loop {
            tokio::select! {
                biased;

                Some(entry) = logs.next() => write(entry),

                response = responses.next() => match response {
                    Some(envelope) => break envelope,
                    None => {
                        write(LogEntry::error(["handler finished without a response"]));
                        break ResponseEnvelope::internal_error();
                    }
                },

                Some(_) = effect_outcomes.next() => {}

                Some(_) = call_outcomes.next() => {}

                _ = &mut deadline => {
                    write(LogEntry::error([format!(
                        "no response after {}s",
                        self.config.request_timeout.as_secs_f64()
                    )]));
                    break ResponseEnvelope::internal_error();
                }
            }
        };

        while let Some(Some(entry)) = logs.next().now_or_never() {
            write(entry);
        }

        tracing::info!(status = response.status.as_u16(), "request complete");

        Dispatched {
            response,
            logs: written,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::dispatch::{LogLevel, Sinks};
    use crate::backend::effects::EffectDescriptor;
    use crate::backend::http::{HttpCallDescriptor, HttpCallError, HttpResponse};
    use async_trait::async_trait;
    use axum::http::{Method, StatusCode};
    use futures_util::stream;
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct NoNetwork;

    #[async_trait]
    impl HttpClient for NoNetwork {
        async fn send(&self, call: &HttpCallDescriptor) -> Result<HttpResponse, HttpCallError> {
            Err(HttpCallError::new(&call.category, "network disabled"))
        }
    }

    /// Handler built from a closure so each test can describe its own graph
    struct FnHandler<F>(F);

    impl<F> Handler for FnHandler<F>
    where
        F: Fn(Sources) -> Sinks + Send + Sync,
    {
        fn name(&self) -> &'static str {
            "test"
        }

        fn handle(&self, _: &ApiRequest, _: &AppConfig, sources: Sources) -> Sinks {
            (self.0)(sources)
        }
    }

    fn dispatcher(timeout: Duration) -> Dispatcher {
        let config = AppConfig::builder()
            .gh_client_id("id")
            .gh_client_secret("secret")
            .secret("signing-key")
            .request_timeout(timeout)
            .build()
            .unwrap();
        Dispatcher::new(Arc::new(config), Arc::new(NoNetwork))
    }

    fn request() -> ApiRequest {
        ApiRequest::new(Method::GET, "/api/test", Value::Null)
    }

    #[tokio::test]
    async fn test_first_response_wins() {
        let handler = FnHandler(|_: Sources| {
            Sinks::new(stream::iter([
                ResponseEnvelope::ok(json!("first")),
                ResponseEnvelope::ok(json!("second")),
            ]))
        });

        let dispatched = dispatcher(Duration::from_secs(5)).dispatch(&handler, request()).await;
        assert_eq!(dispatched.response.body, json!("first"));
    }

    #[tokio::test]
    async fn test_response_derived_from_effect_outcome() {
        let handler = FnHandler(|sources: Sources| {
            let response = sources
                .effect
                .select_value("ANSWER")
                .map(ResponseEnvelope::ok);
            let log = sources
                .effect
                .select_value("ANSWER")
                .map(|value| LogEntry::info([json!("answer"), value]));
            Sinks::new(response)
                .with_log(log)
                .with_effect(stream::iter([EffectDescriptor::new("ANSWER", || async {
                    Ok(json!(42))
                })]))
        });

        let dispatched = dispatcher(Duration::from_secs(5)).dispatch(&handler, request()).await;
        assert_eq!(dispatched.response.status, StatusCode::OK);
        assert_eq!(dispatched.response.body, json!(42));
        assert_eq!(dispatched.logs, vec![LogEntry::info([json!("answer"), json!(42)])]);
    }

    #[tokio::test]
    async fn test_missing_response_times_out() {
        let handler = FnHandler(|_: Sources| Sinks::new(stream::pending()));

        let dispatched = dispatcher(Duration::from_millis(50)).dispatch(&handler, request()).await;
        assert_eq!(dispatched.response, ResponseEnvelope::internal_error());
        assert_eq!(dispatched.logs.len(), 1);
        assert_eq!(dispatched.logs[0].level, LogLevel::Error);
    }

    #[tokio::test]
    async fn test_finished_response_sink_is_internal_error() {
        let handler = FnHandler(|_: Sources| Sinks::new(stream::empty()));

        let dispatched = dispatcher(Duration::from_secs(5)).dispatch(&handler, request()).await;
        assert_eq!(dispatched.response, ResponseEnvelope::internal_error());
        assert_eq!(dispatched.logs[0].render(), "handler finished without a response");
    }

    #[tokio::test]
    async fn test_pending_effects_are_dropped_after_response() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let handler = FnHandler(move |_: Sources| {
            let counter = counter.clone();
            Sinks::respond(ResponseEnvelope::ok(Value::Null)).with_effect(
                stream::iter([EffectDescriptor::new("LATE", move || {
                    counter.fetch_add(1, Ordering::SeqCst);
                    async { Ok(Value::Null) }
                })]),
            )
        });

        dispatcher(Duration::from_secs(5)).dispatch(&handler, request()).await;
        tokio::task::yield_now().await;
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_ready_logs_are_written_after_response() {
        let handler = FnHandler(|_: Sources| {
            Sinks::respond(ResponseEnvelope::ok(Value::Null))
                .with_log(stream::iter([
                    LogEntry::info(["one"]),
                    LogEntry::warn(["two"]),
                ]))
        });

        let dispatched = dispatcher(Duration::from_secs(5)).dispatch(&handler, request()).await;
        let rendered: Vec<_> = dispatched.logs.iter().map(LogEntry::render).collect();
        assert_eq!(rendered, vec!["one", "two"]);
    }
}
