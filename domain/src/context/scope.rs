//! Context-shaped logging behind a trait.
//!
//! [`ContextLogger`] is implemented by [`Context`] and by [`NoContext`], a
//! stateless implementation where every operation is a no-op and every
//! child is `NoContext` again. Code generic over `C: ContextLogger` can be
//! handed either one, so tracing is switched off at the call site instead of
//! by branching on an `Option<Context>` everywhere.

use super::node::{Context, UserContext};
use crate::core::error::ScopedError;
use serde_json::Value;
use std::fmt;
use std::future::Future;
use std::pin::Pin;

/// Title and extra user-context entries of a child context.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChildScope {
    pub title: String,
    pub user_context: UserContext,
}

impl ChildScope {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            user_context: UserContext::new(),
        }
    }

    pub fn with_user_entry(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.user_context.insert(key.into(), value.into());
        self
    }
}

impl From<&str> for ChildScope {
    fn from(title: &str) -> Self {
        ChildScope::new(title)
    }
}

impl From<String> for ChildScope {
    fn from(title: String) -> Self {
        ChildScope::new(title)
    }
}

/// Future returned by [`ContextLogger::with_child_async`].
pub type ScopeFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// Logging and scoping operations shared by [`Context`] and [`NoContext`].
pub trait ContextLogger: Sized + Send + Sync {
    fn error_with<E, D>(&self, error: &E, data: D)
    where
        E: fmt::Display + fmt::Debug + ?Sized,
        D: Into<Option<Value>>;

    fn error<E>(&self, error: &E)
    where
        E: fmt::Display + fmt::Debug + ?Sized,
    {
        self.error_with(error, None::<Value>)
    }

    fn warning_with<T: Into<String>, D: Into<Option<Value>>>(&self, text: T, data: D);

    fn warning<T: Into<String>>(&self, text: T) {
        self.warning_with(text, None::<Value>)
    }

    fn info_with<T: Into<String>, D: Into<Option<Value>>>(&self, text: T, data: D);

    fn info<T: Into<String>>(&self, text: T) {
        self.info_with(text, None::<Value>)
    }

    fn start_child<S: Into<ChildScope>>(&self, scope: S) -> Self;

    fn with_child<S, T, E, F>(&self, scope: S, callback: F) -> Result<T, E>
    where
        S: Into<ChildScope>,
        F: FnOnce(&Self) -> Result<T, E>,
        E: ScopedError;

    /// The child is created by the call itself; the returned future runs
    /// the callback.
    fn with_child_async<'a, S, T, E, F, Fut>(
        &'a self,
        scope: S,
        callback: F,
    ) -> ScopeFuture<'a, T, E>
    where
        S: Into<ChildScope> + 'a,
        F: FnOnce(Self) -> Fut + Send + 'a,
        Fut: Future<Output = Result<T, E>> + Send + 'a,
        T: Send + 'a,
        E: ScopedError + Send + 'a;

    /// Returns whether this call ended the context.
    fn end(&self) -> bool;

    fn terminate(&self);
}

impl ContextLogger for Context {
    fn error_with<E, D>(&self, error: &E, data: D)
    where
        E: fmt::Display + fmt::Debug + ?Sized,
        D: Into<Option<Value>>,
    {
        Context::error_with(self, error, data)
    }

    fn warning_with<T: Into<String>, D: Into<Option<Value>>>(&self, text: T, data: D) {
        Context::warning_with(self, text, data)
    }

    fn info_with<T: Into<String>, D: Into<Option<Value>>>(&self, text: T, data: D) {
        Context::info_with(self, text, data)
    }

    fn start_child<S: Into<ChildScope>>(&self, scope: S) -> Self {
        Context::start_child(self, scope)
    }

    fn with_child<S, T, E, F>(&self, scope: S, callback: F) -> Result<T, E>
    where
        S: Into<ChildScope>,
        F: FnOnce(&Self) -> Result<T, E>,
        E: ScopedError,
    {
        Context::with_child(self, scope, callback)
    }

    fn with_child_async<'a, S, T, E, F, Fut>(
        &'a self,
        scope: S,
        callback: F,
    ) -> ScopeFuture<'a, T, E>
    where
        S: Into<ChildScope> + 'a,
        F: FnOnce(Self) -> Fut + Send + 'a,
        Fut: Future<Output = Result<T, E>> + Send + 'a,
        T: Send + 'a,
        E: ScopedError + Send + 'a,
    {
        Box::pin(Context::with_child_async(self, scope, callback))
    }

    fn end(&self) -> bool {
        Context::end(self)
    }

    fn terminate(&self) {
        Context::terminate(self)
    }
}

/// Context logger that records nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoContext;

impl ContextLogger for NoContext {
    fn error_with<E, D>(&self, _error: &E, _data: D)
    where
        E: fmt::Display + fmt::Debug + ?Sized,
        D: Into<Option<Value>>,
    {
    }

    fn warning_with<T: Into<String>, D: Into<Option<Value>>>(&self, _text: T, _data: D) {}

    fn info_with<T: Into<String>, D: Into<Option<Value>>>(&self, _text: T, _data: D) {}

    fn start_child<S: Into<ChildScope>>(&self, _scope: S) -> Self {
        NoContext
    }

    fn with_child<S, T, E, F>(&self, _scope: S, callback: F) -> Result<T, E>
    where
        S: Into<ChildScope>,
        F: FnOnce(&Self) -> Result<T, E>,
        E: ScopedError,
    {
        callback(&NoContext)
    }

    fn with_child_async<'a, S, T, E, F, Fut>(
        &'a self,
        _scope: S,
        callback: F,
    ) -> ScopeFuture<'a, T, E>
    where
        S: Into<ChildScope> + 'a,
        F: FnOnce(Self) -> Fut + Send + 'a,
        Fut: Future<Output = Result<T, E>> + Send + 'a,
        T: Send + 'a,
        E: ScopedError + Send + 'a,
    {
        Box::pin(callback(NoContext))
    }

    fn end(&self) -> bool {
        false
    }

    fn terminate(&self) {}
}
