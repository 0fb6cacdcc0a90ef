//! Deferred configuration values.

use std::fmt;

/// A value supplied either directly or as a closure evaluated at publication.
///
/// Closures let a field map name types that are registered later.
pub enum Thunk<T> {
    Value(T),
    Lazy(Box<dyn FnOnce() -> T + Send>),
}

impl<T> Thunk<T> {
    pub fn lazy(f: impl FnOnce() -> T + Send + 'static) -> Self {
        Self::Lazy(Box::new(f))
    }

    /// Evaluates the thunk. Consumes it, so a closure runs at most once.
    pub fn resolve(self) -> T {
        match self {
            Self::Value(value) => value,
            Self::Lazy(f) => f(),
        }
    }
}

impl<T> From<T> for Thunk<T> {
    fn from(value: T) -> Self {
        Self::Value(value)
    }
}

impl<T: Default> Default for Thunk<T> {
    fn default() -> Self {
        Self::Value(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Thunk<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Self::Lazy(_) => f.write_str("Lazy(..)"),
        }
    }
}
