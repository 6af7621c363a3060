//! Run a producer once and get its failure back as data.
//!
//! A producer is a zero-argument callable, or a future that already exists.
//! Whatever goes wrong, an `Err` return, a rejected future, a panic, ends up
//! as a [`NormalizedError`] inside the returned [`Outcome`]. None of the entry
//! points panic or return early on the caller's behalf.
//!
//! | producer                                         | entry point        |
//! |--------------------------------------------------|--------------------|
//! | `FnOnce() -> T`                                  | [`call`]           |
//! | `FnOnce() -> Result<T, E>`                       | [`try_call`]       |
//! | `FnOnce() -> impl Future<Output = T>`            | [`call_async`]     |
//! | `FnOnce() -> impl Future<Output = Result<T, E>>` | [`try_call_async`] |
//! | `impl Future<Output = Result<T, E>>`             | [`settle`]         |
//! | `Option<FnOnce() -> Produced<T, E>>`             | [`attempt`]        |
//!
//! Because no entry point ever fails, several of them can be driven side by
//! side without one failure cutting the others short; [`settle_all`] does
//! exactly that.
//!
//! ```
//! use safe_invoke::{settle, try_call, Present};
//! use futures::executor::block_on;
//!
//! let shaped = try_call(|| "42".parse::<u32>()).into_data_err();
//! assert_eq!(shaped.data, Some(42));
//!
//! let (value, err) = block_on(settle(async { Err::<u32, _>("nope") })).into_pair();
//! assert_eq!(value, None);
//! assert_eq!(err.unwrap().message(), "nope");
//! ```

mod deferred;
mod dynamic;
mod error;
mod invoke;
mod outcome;
mod settle;

pub use deferred::{deferred, Pending, Resolver};
pub use dynamic::{attempt, Produced};
pub use error::{ErrorKind, NormalizedError};
pub use invoke::{call, try_call};
pub use outcome::{DataErr, Outcome, Pair, Present, ResultError, Shape};
pub use settle::{call_async, settle, settle_all, try_call_async};
