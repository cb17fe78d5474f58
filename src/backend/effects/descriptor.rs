/**
 * Effect Descriptors and Outcomes
 *
 * An `EffectDescriptor` is plain data until the runtime invokes its producer.
 * The producer is stored as a boxed `FnOnce`, so a descriptor can be invoked
 * at most once and is consumed by doing so.
 */
use futures_util::future::{BoxFuture, FutureExt};
use serde_json::Value;
use std::fmt;
use std::future::Future;
use thiserror::Error;

/// Result produced by an effect
pub type EffectResult = Result<Value, EffectError>;

type Producer = Box<dyn FnOnce() -> BoxFuture<'static, EffectResult> + Send>;

/// Failure of a single effect
///
/// Cloneable so one failure can be delivered to every subscriber of the
/// outcome bus.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EffectError {
    /// The folder store rejected the operation
    #[error("storage error: {0}")]
    Storage(String),

    /// A session token could not be signed
    #[error("token signing failed: {0}")]
    Signing(String),

    /// The producer panicked; the panic was caught by the runtime
    #[error("effect panicked: {0}")]
    Panicked(String),

    /// Any other producer failure
    #[error("{0}")]
    Failed(String),
}

/// A declared, not-yet-executed unit of work
pub struct EffectDescriptor {
    tag: String,
    producer: Producer,
}

impl EffectDescriptor {
    /// Declare an effect
    ///
    /// `producer` is not called here; it runs once the dispatch loop submits
    /// the descriptor to an [`EffectRuntime`](super::EffectRuntime).
    ///
    /// # Example
    ///
    /// ```rust
    /// use smolcms::backend::effects::EffectDescriptor;
    ///
    /// let effect = EffectDescriptor::new("GET_ANSWER", || async {
    ///     Ok(serde_json::json!(42))
    /// });
    /// assert_eq!(effect.tag(), "GET_ANSWER");
    /// ```
    pub fn new<F, Fut>(tag: impl Into<String>, producer: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = EffectResult> + Send + 'static,
    {
        Self {
            tag: tag.into(),
            producer: Box::new(move || producer().boxed()),
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub(crate) fn into_parts(self) -> (String, Producer) {
        (self.tag, self.producer)
    }
}

impl fmt::Debug for EffectDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EffectDescriptor")
            .field("tag", &self.tag)
            .finish_non_exhaustive()
    }
}

/// The single outcome of one effect, correlated by tag
#[derive(Debug, Clone, PartialEq)]
pub struct EffectOutcome {
    pub tag: String,
    pub result: EffectResult,
}

impl EffectOutcome {
    pub fn value(&self) -> Option<&Value> {
        self.result.as_ref().ok()
    }

    pub fn error(&self) -> Option<&EffectError> {
        self.result.as_ref().err()
    }

    pub fn is_error(&self) -> bool {
        self.result.is_err()
    }
}
