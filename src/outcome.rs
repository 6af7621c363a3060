//! The value every entry point returns, and the shapes it can be presented in.
//!
//! [`Outcome`] is the canonical form. [`DataErr`], [`ResultError`] and
//! [`Pair`] carry the same content under different field names; pick one
//! with [`Present`].
use crate::NormalizedError;

/// Either the producer's payload or the failure it was normalized into.
pub type Outcome<T> = Result<T, NormalizedError>;

/// `{ data, err }`: exactly one of the two fields is `Some`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DataErr<T> {
    pub data: Option<T>,
    pub err: Option<NormalizedError>,
}

/// `{ result, error }`: exactly one of the two fields is `Some`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResultError<T> {
    pub result: Option<T>,
    pub error: Option<NormalizedError>,
}

/// `(value, error)` ordered pair.
pub type Pair<T> = (Option<T>, Option<NormalizedError>);

/// A presentation of an [`Outcome`].
pub trait Shape<T>: Sized {
    fn from_outcome(outcome: Outcome<T>) -> Self;

    /// Back to the canonical form. `None` if both or neither side is set,
    /// which only happens for values built by hand.
    fn into_outcome(self) -> Option<Outcome<T>>;
}

fn from_fields<T>(value: Option<T>, error: Option<NormalizedError>) -> Option<Outcome<T>> {
    match (value, error) {
        (Some(value), None) => Some(Ok(value)),
        (None, Some(error)) => Some(Err(error)),
        _ => None,
    }
}

impl<T> Shape<T> for Outcome<T> {
    fn from_outcome(outcome: Outcome<T>) -> Self {
        outcome
    }

    fn into_outcome(self) -> Option<Outcome<T>> {
        Some(self)
    }
}

impl<T> Shape<T> for DataErr<T> {
    fn from_outcome(outcome: Outcome<T>) -> Self {
        let (data, err) = <Pair<T> as Shape<T>>::from_outcome(outcome);
        Self { data, err }
    }

    fn into_outcome(self) -> Option<Outcome<T>> {
        from_fields(self.data, self.err)
    }
}

impl<T> Shape<T> for ResultError<T> {
    fn from_outcome(outcome: Outcome<T>) -> Self {
        let (result, error) = <Pair<T> as Shape<T>>::from_outcome(outcome);
        Self { result, error }
    }

    fn into_outcome(self) -> Option<Outcome<T>> {
        from_fields(self.result, self.error)
    }
}

impl<T> Shape<T> for Pair<T> {
    fn from_outcome(outcome: Outcome<T>) -> Self {
        match outcome {
            Ok(value) => (Some(value), None),
            Err(error) => (None, Some(error)),
        }
    }

    fn into_outcome(self) -> Option<Outcome<T>> {
        from_fields(self.0, self.1)
    }
}

impl<T> DataErr<T> {
    pub fn is_ok(&self) -> bool {
        self.err.is_none()
    }

    pub fn is_err(&self) -> bool {
        self.err.is_some()
    }
}

impl<T> ResultError<T> {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    pub fn is_err(&self) -> bool {
        self.error.is_some()
    }
}

impl<T> From<Outcome<T>> for DataErr<T> {
    fn from(outcome: Outcome<T>) -> Self {
        Self::from_outcome(outcome)
    }
}

impl<T> From<Outcome<T>> for ResultError<T> {
    fn from(outcome: Outcome<T>) -> Self {
        Self::from_outcome(outcome)
    }
}

/// Converts an [`Outcome`] into the shape a caller destructures.
///
/// ```
/// use safe_invoke::{try_call, Present};
///
/// let (value, err) = try_call(|| "7".parse::<u8>()).into_pair();
/// assert_eq!(value, Some(7));
/// assert!(err.is_none());
/// ```
pub trait Present<T> {
    fn present<S: Shape<T>>(self) -> S;

    fn into_data_err(self) -> DataErr<T>
    where
        Self: Sized,
    {
        self.present()
    }

    fn into_result_error(self) -> ResultError<T>
    where
        Self: Sized,
    {
        self.present()
    }

    fn into_pair(self) -> Pair<T>
    where
        Self: Sized,
    {
        self.present()
    }
}

impl<T> Present<T> for Outcome<T> {
    fn present<S: Shape<T>>(self) -> S {
        S::from_outcome(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    fn failure() -> NormalizedError {
        NormalizedError::new(ErrorKind::Failed, "boom")
    }

    #[test]
    fn shapes_are_mutually_exclusive() {
        let ok: Outcome<i32> = Ok(42);
        let err: Outcome<i32> = Err(failure());

        let shaped = ok.clone().into_data_err();
        assert_eq!(
            shaped,
            DataErr {
                data: Some(42),
                err: None,
            }
        );
        assert!(shaped.is_ok());
        let shaped = err.clone().into_data_err();
        assert_eq!(
            shaped,
            DataErr {
                data: None,
                err: Some(failure()),
            }
        );
        assert!(shaped.is_err());

        let shaped = ok.clone().into_result_error();
        assert_eq!(
            shaped,
            ResultError {
                result: Some(42),
                error: None,
            }
        );
        let shaped = err.clone().into_result_error();
        assert_eq!(
            shaped,
            ResultError {
                result: None,
                error: Some(failure()),
            }
        );
        assert!(shaped.is_err());

        assert_eq!(ok.into_pair(), (Some(42), None));
        assert_eq!(err.into_pair(), (None, Some(failure())));
    }

    #[test]
    fn shapes_convert_back() {
        let ok: Outcome<&str> = Ok("ok");
        let shaped: ResultError<&str> = ok.present();
        assert_eq!(shaped.into_outcome(), Some(Ok("ok")));

        let err: Outcome<&str> = Err(failure());
        let shaped: Pair<&str> = err.present();
        assert_eq!(shaped.into_outcome(), Some(Err(failure())));
    }

    #[test]
    fn hand_built_shapes_can_be_invalid() {
        let both = DataErr {
            data: Some(1),
            err: Some(failure()),
        };
        assert_eq!(both.into_outcome(), None);

        let neither: Pair<i32> = (None, None);
        assert_eq!(neither.into_outcome(), None);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serialized_fields() {
        let ok: Outcome<u32> = Ok(42);
        let shaped = DataErr::from(ok);
        let json = serde_json::to_value(&shaped).unwrap();
        assert_eq!(json, serde_json::json!({ "data": 42, "err": null }));

        let err: Outcome<u32> = Err(failure());
        let shaped = ResultError::from(err);
        let json = serde_json::to_value(&shaped).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "result": null,
                "error": { "kind": "failed", "message": "boom" }
            })
        );
    }
}
