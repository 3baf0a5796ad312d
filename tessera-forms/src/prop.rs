//! Comparable callback handles used by slider arguments.
//!
//! ## Usage
//!
//! Hand closures to [`crate::slider::SliderArgs`] for change notification and
//! value formatting.

use std::{fmt, sync::Arc};

type Handler<T, R> = dyn Fn(T) -> R + Send + Sync;

/// A host closure that a slider calls with a value, such as a change
/// notification or a label formatter.
///
/// Cloning shares the closure. Equality is pointer identity, which lets
/// [`crate::slider::SliderArgs`] compare configurations without comparing
/// closures.
pub struct CallbackWith<T, R = ()> {
    handler: Arc<Handler<T, R>>,
}

impl<T, R> CallbackWith<T, R> {
    /// Wraps `handler`.
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(T) -> R + Send + Sync + 'static,
    {
        Self {
            handler: Arc::new(handler),
        }
    }

    /// Runs the closure.
    pub fn call(&self, value: T) -> R {
        (self.handler)(value)
    }
}

impl<T, R, F> From<F> for CallbackWith<T, R>
where
    F: Fn(T) -> R + Send + Sync + 'static,
{
    fn from(handler: F) -> Self {
        Self::new(handler)
    }
}

/// Ignores every value.
impl<T> Default for CallbackWith<T> {
    fn default() -> Self {
        Self::new(|_| ())
    }
}

impl<T, R> Clone for CallbackWith<T, R> {
    fn clone(&self) -> Self {
        Self {
            handler: Arc::clone(&self.handler),
        }
    }
}

impl<T, R> PartialEq for CallbackWith<T, R> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.handler, &other.handler)
    }
}

impl<T, R> Eq for CallbackWith<T, R> {}

impl<T, R> fmt::Debug for CallbackWith<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CallbackWith({:p})", Arc::as_ptr(&self.handler).cast::<()>())
    }
}
