use std::fmt::Display;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::task::{Context, Poll, Waker};

use crate::{ErrorKind, NormalizedError, Outcome};

/// A one-shot promise settled from the outside.
///
/// The `Resolver` half settles it once, from any thread. The `Pending` half
/// is the awaitable, and can be handed to [`settle`](crate::settle) like any
/// other future.
///
/// # Examples
///
/// ```
/// use safe_invoke::{deferred, settle};
/// use futures::executor::block_on;
/// use std::thread;
///
/// let (resolver, pending) = deferred::<String>();
/// let task1 = thread::spawn(move || block_on(settle(pending)));
/// resolver.reject("nope");
/// let outcome = task1.join().expect("The task1 thread has panicked.");
/// assert_eq!(outcome.unwrap_err().message(), "nope");
/// ```
pub fn deferred<T>() -> (Resolver<T>, Pending<T>) {
    let inner = Arc::new(Mutex::new(Inner {
        value: None,
        waker: Err(WakerState::Fresh),
    }));
    (
        Resolver {
            promise: inner.clone(),
        },
        Pending { promise: inner },
    )
}

/// The settling half of a [`deferred`] promise.
#[derive(Debug)]
pub struct Resolver<T> {
    promise: Arc<Mutex<Inner<T>>>,
}

/// The awaitable half of a [`deferred`] promise.
#[derive(Debug)]
pub struct Pending<T> {
    promise: Arc<Mutex<Inner<T>>>,
}

#[derive(Debug)]
enum WakerState {
    Fresh,
    Tainted,
}

#[derive(Debug)]
struct Inner<T> {
    value: Option<Outcome<T>>,
    waker: Result<Waker, WakerState>,
}

const ABANDONED: &str = "promise dropped without settling";

fn lock<T>(promise: &Mutex<Inner<T>>) -> MutexGuard<'_, Inner<T>> {
    promise.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<T> Resolver<T> {
    /// Settle successfully.
    pub fn resolve(self, value: T) {
        self.settle(Ok(value));
    }

    /// Settle with a failure; `reason` is normalized as a rejection.
    pub fn reject<E: Display + 'static>(self, reason: E) {
        self.settle(Err(NormalizedError::coerce(ErrorKind::Rejected, reason)));
    }

    fn settle(&self, outcome: Outcome<T>) {
        let mut promise = lock(&self.promise);
        promise.value = Some(outcome);
        let waker = std::mem::replace(&mut promise.waker, Err(WakerState::Tainted));
        drop(promise);
        wake(waker);
    }
}

impl<T> Drop for Resolver<T> {
    /// An unsettled resolver wakes the waiter; it will see `Abandoned`.
    fn drop(&mut self) {
        let mut promise = lock(&self.promise);
        let waker = std::mem::replace(&mut promise.waker, Err(WakerState::Tainted));
        drop(promise);
        wake(waker);
    }
}

// The lock must be released first: a waker may poll `Pending` inline.
fn wake(waker: Result<Waker, WakerState>) {
    if let Ok(waker) = waker {
        waker.wake()
    }
}

impl<T> Future for Pending<T> {
    type Output = Outcome<T>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut promise = lock(&self.promise);
        match promise.value.take() {
            Some(value) => Poll::Ready(value),
            None => match std::mem::replace(&mut promise.waker, Ok(cx.waker().clone())) {
                Err(WakerState::Tainted) => {
                    promise.waker = Err(WakerState::Tainted);
                    Poll::Ready(Err(NormalizedError::new(ErrorKind::Abandoned, ABANDONED)))
                }
                _ => Poll::Pending,
            },
        }
    }
}
