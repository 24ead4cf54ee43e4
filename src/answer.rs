//! Result wrapper that keeps caught failures visible to the caller.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::error::ClientError;

/// Value substituted for a failed call when failures are caught.
pub trait Fallback {
    fn fallback() -> Self;
}

impl Fallback for Map<String, Value> {
    fn fallback() -> Self {
        Map::new()
    }
}

impl<T> Fallback for Vec<T> {
    fn fallback() -> Self {
        Vec::new()
    }
}

impl<T> Fallback for Option<T> {
    fn fallback() -> Self {
        None
    }
}

impl Fallback for bool {
    fn fallback() -> Self {
        false
    }
}

impl Fallback for Value {
    fn fallback() -> Self {
        Value::Bool(false)
    }
}

/// Where the value of an [`Answer`] came from.
#[derive(Debug, Clone, PartialEq)]
pub enum Origin {
    /// Returned by the client collaborator.
    Remote,
    /// Served from the query cache.
    Cache,
    /// The call failed and the failure was caught; the value is the
    /// operation's fallback.
    Fallback(Arc<ClientError>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Answer<T> {
    value: T,
    origin: Origin,
}

impl<T> Answer<T> {
    pub(crate) fn remote(value: T) -> Self {
        Self {
            value,
            origin: Origin::Remote,
        }
    }

    pub(crate) fn cached(value: T) -> Self {
        Self {
            value,
            origin: Origin::Cache,
        }
    }

    pub(crate) fn fallback(value: T, error: ClientError) -> Self {
        Self {
            value,
            origin: Origin::Fallback(Arc::new(error)),
        }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn into_value(self) -> T {
        self.value
    }

    pub fn origin(&self) -> &Origin {
        &self.origin
    }

    pub fn is_cached(&self) -> bool {
        matches!(self.origin, Origin::Cache)
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self.origin, Origin::Fallback(_))
    }

    /// The caught failure, if the value is a fallback.
    pub fn error(&self) -> Option<&ClientError> {
        match &self.origin {
            Origin::Fallback(error) => Some(error),
            _ => None,
        }
    }

    /// Turns a caught failure back into an error.
    pub fn into_result(self) -> Result<T, Arc<ClientError>> {
        match self.origin {
            Origin::Fallback(error) => Err(error),
            Origin::Remote | Origin::Cache => Ok(self.value),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Answer<U> {
        Answer {
            value: f(self.value),
            origin: self.origin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_answer_exposes_the_error() {
        let answer: Answer<bool> =
            Answer::fallback(bool::fallback(), ClientError::transport("connection reset"));

        assert!(answer.is_fallback());
        assert!(!answer.value());
        assert_eq!(answer.error(), Some(&ClientError::transport("connection reset")));

        let err = answer.into_result().expect_err("fallback converts to error");
        assert_eq!(*err, ClientError::transport("connection reset"));
    }

    #[test]
    fn map_preserves_origin() {
        let answer = Answer::cached(3_i64).map(|n| n * 2);
        assert!(answer.is_cached());
        assert_eq!(answer.into_result().ok(), Some(6));
    }

    #[test]
    fn fallback_values_are_empty_or_false() {
        assert!(Map::<String, Value>::fallback().is_empty());
        assert!(Vec::<u8>::fallback().is_empty());
        assert_eq!(Option::<i64>::fallback(), None);
        assert_eq!(Value::fallback(), Value::Bool(false));
    }
}
