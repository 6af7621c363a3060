//! Promise-wrapper form and the asynchronous function-wrapper form.
//!
//! Each entry point awaits exactly one future. A panic raised while polling
//! it is caught at that await and normalized like any other failure.
use std::fmt::Display;
use std::future::Future;
use std::panic::{catch_unwind, AssertUnwindSafe};

use futures::future::join_all;
use futures::FutureExt;

use crate::invoke::trace_outcome;
use crate::{ErrorKind, NormalizedError, Outcome};

/// Await an awaitable that already exists.
///
/// `Err(e)` comes back as [`ErrorKind::Rejected`].
///
/// ```
/// use safe_invoke::settle;
/// use futures::executor::block_on;
/// use futures::future::ready;
///
/// let outcome = block_on(settle(ready(Err::<(), _>("nope"))));
/// assert_eq!(outcome.unwrap_err().message(), "nope");
/// ```
pub async fn settle<T, E, Fut>(awaitable: Fut) -> Outcome<T>
where
    Fut: Future<Output = Result<T, E>>,
    E: Display + 'static,
{
    let outcome = match AssertUnwindSafe(awaitable).catch_unwind().await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(err)) => Err(NormalizedError::coerce(ErrorKind::Rejected, err)),
        Err(payload) => Err(NormalizedError::from_panic(payload)),
    };
    trace_outcome(&outcome);
    outcome
}

/// Call a producer that returns a future of a plain value, then await it.
///
/// The callable runs synchronously before anything is awaited; a panic there
/// is captured the same way as a panic while polling.
pub async fn call_async<T, F, Fut>(producer: F) -> Outcome<T>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = T>,
{
    let awaitable = match catch_unwind(AssertUnwindSafe(producer)) {
        Ok(awaitable) => awaitable,
        Err(payload) => return panicked(payload),
    };
    let outcome = AssertUnwindSafe(awaitable)
        .catch_unwind()
        .await
        .map_err(NormalizedError::from_panic);
    trace_outcome(&outcome);
    outcome
}

/// Call a producer that returns a fallible future, then await it.
///
/// ```
/// use safe_invoke::try_call_async;
/// use futures::executor::block_on;
///
/// let outcome = block_on(try_call_async(|| async { Ok::<_, String>(42) }));
/// assert_eq!(outcome, Ok(42));
/// ```
pub async fn try_call_async<T, E, F, Fut>(producer: F) -> Outcome<T>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display + 'static,
{
    match catch_unwind(AssertUnwindSafe(producer)) {
        Ok(awaitable) => settle(awaitable).await,
        Err(payload) => panicked(payload),
    }
}

/// Settle every awaitable concurrently on the current task.
///
/// Outcomes come back in input order. A failing branch never cuts the
/// others short.
pub async fn settle_all<T, E, Fut, I>(awaitables: I) -> Vec<Outcome<T>>
where
    I: IntoIterator<Item = Fut>,
    Fut: Future<Output = Result<T, E>>,
    E: Display + 'static,
{
    join_all(awaitables.into_iter().map(settle)).await
}

fn panicked<T>(payload: Box<dyn std::any::Any + Send>) -> Outcome<T> {
    let outcome = Err(NormalizedError::from_panic(payload));
    trace_outcome(&outcome);
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use futures::future::{ready, BoxFuture};

    #[derive(Debug, Clone, PartialEq)]
    struct Record {
        id: u32,
    }

    #[test]
    fn settled_value_passes_through() {
        let outcome = block_on(settle(ready(Ok::<_, String>(Record { id: 1 }))));
        assert_eq!(outcome, Ok(Record { id: 1 }));
    }

    #[test]
    fn rejection_is_coerced() {
        let err = block_on(settle(ready(Err::<(), _>("nope")))).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Rejected);
        assert_eq!(err.message(), "nope");
    }

    #[test]
    fn panic_while_polling_is_captured() {
        let outcome = block_on(settle(async {
            if true {
                panic!("poll boom");
            }
            Ok::<(), String>(())
        }));
        let err = outcome.unwrap_err();
        assert!(err.is_panic());
        assert_eq!(err.message(), "poll boom");
    }

    #[test]
    fn panic_before_the_future_exists() {
        let outcome = block_on(call_async(|| -> BoxFuture<'static, u8> {
            panic!("boom");
        }));
        assert_eq!(outcome.unwrap_err().message(), "boom");

        let outcome = block_on(try_call_async(|| -> BoxFuture<'static, Result<u8, String>> {
            panic!("boom");
        }));
        assert_eq!(outcome.unwrap_err().message(), "boom");
    }

    #[test]
    fn async_producers() {
        assert_eq!(block_on(call_async(|| async { "ok" })), Ok("ok"));

        let outcome = block_on(try_call_async(|| async { Err::<(), _>(String::from("nope")) }));
        let err = outcome.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Rejected);
        assert_eq!(err.message(), "nope");
    }

    #[test]
    fn call_async_panic_while_polling() {
        let outcome = block_on(call_async(|| async {
            if true {
                panic!("poll boom");
            }
            1_u8
        }));
        let err = outcome.unwrap_err();
        assert!(err.is_panic());
        assert_eq!(err.message(), "poll boom");
    }

    #[test]
    fn settle_all_keeps_every_branch() {
        let branches: Vec<BoxFuture<'static, Result<u32, String>>> = vec![
            ready(Ok::<u32, String>(1)).boxed(),
            ready(Err::<u32, String>("second".into())).boxed(),
            async {
                if true {
                    panic!("third");
                }
                Ok::<u32, String>(3)
            }
            .boxed(),
            ready(Ok::<u32, String>(4)).boxed(),
        ];
        let outcomes = block_on(settle_all(branches));
        assert_eq!(outcomes.len(), 4);
        assert_eq!(outcomes[0], Ok(1));
        assert_eq!(outcomes[1].as_ref().unwrap_err().message(), "second");
        assert!(outcomes[2].as_ref().unwrap_err().is_panic());
        assert_eq!(outcomes[3], Ok(4));
    }
}
