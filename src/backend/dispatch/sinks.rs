/**
 * Handler Contract
 *
 * A handler is a pure composition step. Given the request, the configuration
 * and read-only views over this request's runtimes, it returns the streams
 * that describe what should happen. It must not perform any I/O itself; all
 * work is wrapped in descriptors and executed by the dispatcher.
 */
use futures_util::stream::{self, BoxStream, Stream, StreamExt};

use crate::backend::dispatch::envelope::{LogEntry, ResponseEnvelope};
use crate::backend::dispatch::request::ApiRequest;
use crate::backend::effects::{EffectDescriptor, EffectSource};
use crate::backend::http::{HttpCallDescriptor, HttpSource};
use crate::shared::config::AppConfig;

/// Read-only views over the runtimes owned by one dispatch
#[derive(Clone)]
pub struct Sources {
    pub effect: EffectSource,
    pub http: HttpSource,
}

/// Output streams declared by a handler
///
/// Only the first envelope on `response` is honored. The other sinks are
/// driven until that envelope arrives and are dropped afterwards.
pub struct Sinks {
    pub response: BoxStream<'static, ResponseEnvelope>,
    pub log: BoxStream<'static, LogEntry>,
    pub http: BoxStream<'static, HttpCallDescriptor>,
    pub effect: BoxStream<'static, EffectDescriptor>,
}

impl Sinks {
    /// Sinks with the given response stream and nothing else
    pub fn new<S>(response: S) -> Self
    where
        S: Stream<Item = ResponseEnvelope> + Send + 'static,
    {
        Self {
            response: response.boxed(),
            log: stream::empty().boxed(),
            http: stream::empty().boxed(),
            effect: stream::empty().boxed(),
        }
    }

    /// A single, immediate response
    pub fn respond(envelope: ResponseEnvelope) -> Self {
        Self::new(stream::once(async move { envelope }))
    }

    pub fn with_log<S>(mut self, log: S) -> Self
    where
        S: Stream<Item = LogEntry> + Send + 'static,
    {
        self.log = log.boxed();
        self
    }

    pub fn with_http<S>(mut self, http: S) -> Self
    where
        S: Stream<Item = HttpCallDescriptor> + Send + 'static,
    {
        self.http = http.boxed();
        self
    }

    pub fn with_effect<S>(mut self, effect: S) -> Self
    where
        S: Stream<Item = EffectDescriptor> + Send + 'static,
    {
        self.effect = effect.boxed();
        self
    }
}

/// A request handler
///
/// Implementations should subscribe to every view they need inside `handle`
/// so no outcome is published before its subscriber exists.
pub trait Handler: Send + Sync {
    /// Short name used in log spans
    fn name(&self) -> &'static str;

    /// Compose the sinks for one request
    fn handle(&self, request: &ApiRequest, config: &AppConfig, sources: Sources) -> Sinks;
}
