use std::any::Any;
use std::error::Error;
use std::fmt::Display;
use std::io;

/// What kind of failure a [`NormalizedError`] was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ErrorKind {
    /// A callable producer returned an error value.
    Failed,
    /// An awaitable settled with an error value.
    Rejected,
    /// The producer panicked while being called or polled.
    Panicked,
    /// A deferred promise was dropped before it settled.
    Abandoned,
    /// No callable was supplied where one was required.
    NotCallable,
}

/// The one error shape every entry point hands back.
///
/// Whatever the producer failed with, a string, an `io::Error`, a panic
/// payload, it ends up here with its string form as the message. Two
/// failures with the same kind and message compare equal.
///
/// ```
/// use safe_invoke::{ErrorKind, NormalizedError};
///
/// let err = NormalizedError::coerce(ErrorKind::Rejected, "nope");
/// assert_eq!(err.message(), "nope");
/// assert_eq!(err.to_string(), "nope");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[error("{message}")]
pub struct NormalizedError {
    kind: ErrorKind,
    message: String,
}

const NOT_CALLABLE: &str = "producer must be callable";
const UNKNOWN_PANIC: &str = "unknown panic";

impl NormalizedError {
    /// Build an error from a kind and a ready-made message.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// The `TypeError`-class failure for a missing callable.
    pub fn not_callable() -> Self {
        Self::new(ErrorKind::NotCallable, NOT_CALLABLE)
    }

    /// Normalize an arbitrary failure value.
    ///
    /// A value that already is a `NormalizedError` passes through untouched,
    /// `kind` included. Anything else keeps only its `Display` output.
    pub fn coerce<E: Display + 'static>(kind: ErrorKind, err: E) -> Self {
        if let Some(normalized) = (&err as &dyn Any).downcast_ref::<NormalizedError>() {
            return normalized.clone();
        }
        Self::new(kind, err.to_string())
    }

    /// Normalize the payload of a caught panic.
    ///
    /// String payloads and error values raised with `panic_any` keep their
    /// text. Anything else reads `unknown panic`.
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let payload = match payload.downcast::<NormalizedError>() {
            Ok(normalized) => return *normalized,
            Err(payload) => payload,
        };
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else if let Some(err) = payload.downcast_ref::<io::Error>() {
            err.to_string()
        } else if let Some(err) = payload.downcast_ref::<Box<dyn Error + Send + Sync>>() {
            err.to_string()
        } else {
            UNKNOWN_PANIC.to_string()
        };
        Self::new(ErrorKind::Panicked, message)
    }

    /// Which kind of failure this came from.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The string form of the original failure.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// `true` if the producer panicked.
    pub fn is_panic(&self) -> bool {
        self.kind == ErrorKind::Panicked
    }
}
