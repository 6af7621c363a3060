//! Function-wrapper form for synchronous producers.
//!
//! The callable runs once, on the caller's thread, inside a panic boundary.
//! Nothing is awaited.
use std::fmt::Display;
use std::panic::{catch_unwind, AssertUnwindSafe};

use crate::{ErrorKind, NormalizedError, Outcome};

/// Run a producer that returns a plain value.
///
/// The only way this can fail is a panic.
///
/// ```
/// use safe_invoke::call;
///
/// assert_eq!(call(|| 42), Ok(42));
///
/// let err = call(|| -> u32 { panic!("boom") }).unwrap_err();
/// assert_eq!(err.message(), "boom");
/// ```
pub fn call<T, F>(producer: F) -> Outcome<T>
where
    F: FnOnce() -> T,
{
    let outcome = catch_unwind(AssertUnwindSafe(producer)).map_err(NormalizedError::from_panic);
    trace_outcome(&outcome);
    outcome
}

/// Run a producer that reports failure through its return value.
///
/// An `Err(e)` comes back as [`ErrorKind::Failed`] carrying `e.to_string()`.
///
/// ```
/// use safe_invoke::try_call;
///
/// let err = try_call(|| "x".parse::<u8>()).unwrap_err();
/// assert_eq!(err.message(), "invalid digit found in string");
/// ```
pub fn try_call<T, E, F>(producer: F) -> Outcome<T>
where
    F: FnOnce() -> Result<T, E>,
    E: Display + 'static,
{
    let outcome = match catch_unwind(AssertUnwindSafe(producer)) {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(err)) => Err(NormalizedError::coerce(ErrorKind::Failed, err)),
        Err(payload) => Err(NormalizedError::from_panic(payload)),
    };
    trace_outcome(&outcome);
    outcome
}

pub(crate) fn trace_outcome<T>(outcome: &Outcome<T>) {
    match outcome {
        Ok(_) => tracing::trace!("producer completed"),
        Err(err) => {
            tracing::debug!(kind = ?err.kind(), message = %err.message(), "producer failed")
        }
    }
}
