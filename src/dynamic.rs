//! Fully-dynamic form: one entry point for producers that may hand back a
//! finished value or something still to await.
//!
//! Which of the two it is shows up in the producer's return type,
//! [`Produced`], so the branch is picked by the producer itself and not by
//! inspecting the value at runtime.
use std::fmt::{self, Display};
use std::future::Future;
use std::panic::{catch_unwind, AssertUnwindSafe};

use futures::future::BoxFuture;
use futures::FutureExt;

use crate::invoke::trace_outcome;
use crate::{settle, DataErr, ErrorKind, NormalizedError, Outcome, Present};

/// What a dynamic producer returns.
pub enum Produced<T, E> {
    /// Already finished, nothing to await.
    Value(Result<T, E>),
    /// Still running; settles later.
    Awaitable(BoxFuture<'static, Result<T, E>>),
}

impl<T, E> Produced<T, E> {
    /// A finished success.
    pub fn value(value: T) -> Self {
        Produced::Value(Ok(value))
    }

    /// A finished failure.
    pub fn failure(err: E) -> Self {
        Produced::Value(Err(err))
    }

    /// Box a future to be settled later.
    pub fn awaitable<Fut>(awaitable: Fut) -> Self
    where
        Fut: Future<Output = Result<T, E>> + Send + 'static,
    {
        Produced::Awaitable(awaitable.boxed())
    }

    /// `true` if there is still something to await.
    pub fn is_awaitable(&self) -> bool {
        matches!(self, Produced::Awaitable(_))
    }
}

impl<T, E> From<Result<T, E>> for Produced<T, E> {
    fn from(result: Result<T, E>) -> Self {
        Produced::Value(result)
    }
}

impl<T, E> fmt::Debug for Produced<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Produced::Value(_) => f.write_str("Produced::Value(..)"),
            Produced::Awaitable(_) => f.write_str("Produced::Awaitable(..)"),
        }
    }
}

/// Run whatever sits in the producer slot and report it as `{ data, err }`.
///
/// An empty slot is not raised: it comes back as an
/// [`ErrorKind::NotCallable`] error reading `producer must be callable`.
/// A finished [`Produced::Value`] is reported without suspending; an
/// error in it is [`ErrorKind::Failed`]. An awaitable is settled the way
/// [`settle`] does it.
///
/// ```
/// use safe_invoke::{attempt, Produced};
/// use futures::executor::block_on;
///
/// let shaped = block_on(attempt(Some(|| Produced::<_, String>::value(42))));
/// assert_eq!(shaped.data, Some(42));
///
/// type Producer = fn() -> Produced<u8, String>;
/// let shaped = block_on(attempt(None::<Producer>));
/// assert_eq!(shaped.err.unwrap().message(), "producer must be callable");
/// ```
pub async fn attempt<T, E, F>(producer: Option<F>) -> DataErr<T>
where
    F: FnOnce() -> Produced<T, E>,
    E: Display + 'static,
{
    let Some(producer) = producer else {
        let outcome: Outcome<T> = Err(NormalizedError::not_callable());
        trace_outcome(&outcome);
        return outcome.into_data_err();
    };
    let outcome = match catch_unwind(AssertUnwindSafe(producer)) {
        Ok(Produced::Value(Ok(value))) => Ok(value),
        Ok(Produced::Value(Err(err))) => Err(NormalizedError::coerce(ErrorKind::Failed, err)),
        Ok(Produced::Awaitable(awaitable)) => return settle(awaitable).await.into_data_err(),
        Err(payload) => Err(NormalizedError::from_panic(payload)),
    };
    trace_outcome(&outcome);
    outcome.into_data_err()
}
