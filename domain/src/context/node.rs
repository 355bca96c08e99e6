//! Execution-context tree nodes.
//!
//! A [`Context`] is a cheap, clonable handle on a node. Each node owns its
//! children; the parent link is a [`Weak`] back-reference, so the tree is
//! kept alive by its root handle and never forms an ownership cycle.
//!
//! Status and elapsed time are derived from the tree on every call:
//!
//! - **Status**: `Failed` if the node or any descendant context directly
//!   holds an error log, otherwise `Success` once ended, otherwise `Running`.
//! - **Elapsed**: `end - from` once ended; while running, the largest elapsed
//!   time (from the same origin) among the children, or `None` if no child
//!   has one yet.

use super::channel::LogDispatch;
use super::log::{ErrorRecord, Log, LogKind};
use super::report::ContextReport;
use super::scope::ChildScope;
use crate::core::clock::{Clock, MonotonicClock};
use crate::core::error::ScopedError;
use crate::util::lock_or_recover;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::future::Future;
use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;

/// Key/value entries attached to a context and inherited by its children.
pub type UserContext = BTreeMap<String, Value>;

const SCOPE_PANICKED: &str = "scope panicked";

/// Derived status of a context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContextStatus {
    Success,
    Running,
    Failed,
}

impl fmt::Display for ContextStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextStatus::Success => write!(f, "success"),
            ContextStatus::Running => write!(f, "running"),
            ContextStatus::Failed => write!(f, "failed"),
        }
    }
}

/// A child of a context: a nested context or a log entry.
#[derive(Clone)]
pub enum ContextEntry {
    Context(Context),
    Log(Arc<Log>),
}

impl ContextEntry {
    pub fn id(&self) -> &str {
        match self {
            ContextEntry::Context(context) => context.id(),
            ContextEntry::Log(log) => log.id(),
        }
    }

    pub fn as_context(&self) -> Option<&Context> {
        match self {
            ContextEntry::Context(context) => Some(context),
            ContextEntry::Log(_) => None,
        }
    }

    pub fn as_log(&self) -> Option<&Arc<Log>> {
        match self {
            ContextEntry::Log(log) => Some(log),
            ContextEntry::Context(_) => None,
        }
    }

    pub fn elapsed_from(&self, from: Duration) -> Option<Duration> {
        match self {
            ContextEntry::Context(context) => context.elapsed_from(from),
            ContextEntry::Log(log) => Some(log.elapsed_from(from)),
        }
    }
}

impl fmt::Debug for ContextEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextEntry::Context(context) => context.fmt(f),
            ContextEntry::Log(log) => log.fmt(f),
        }
    }
}

/// Construction options of a root context.
#[derive(Default)]
pub struct ContextOptions {
    user_context: UserContext,
    channels: Vec<Arc<dyn LogDispatch>>,
    clock: Option<Arc<dyn Clock>>,
}

impl ContextOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user_entry(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.user_context.insert(key.into(), value.into());
        self
    }

    pub fn with_user_context(mut self, user_context: UserContext) -> Self {
        self.user_context.extend(user_context);
        self
    }

    /// Attach a channel; it receives the logs of the whole tree.
    pub fn with_channel(mut self, channel: impl LogDispatch + 'static) -> Self {
        self.channels.push(Arc::new(channel));
        self
    }

    pub fn with_shared_channel(mut self, channel: Arc<dyn LogDispatch>) -> Self {
        self.channels.push(channel);
        self
    }

    /// Time source of the tree; a [`MonotonicClock`] by default.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }
}

pub(crate) struct ContextNode {
    id: String,
    title: String,
    start_timestamp: Duration,
    end_timestamp: Mutex<Option<Duration>>,
    user_context: UserContext,
    children: Mutex<Vec<ContextEntry>>,
    parent: Option<Weak<ContextNode>>,
    channels: Arc<[Arc<dyn LogDispatch>]>,
    clock: Arc<dyn Clock>,
}

/// Handle on one node of an execution-context tree.
#[derive(Clone)]
pub struct Context {
    node: Arc<ContextNode>,
}

impl Context {
    /// Create a root context without user context or channels.
    pub fn new(title: impl Into<String>) -> Self {
        Self::with_options(title, ContextOptions::default())
    }

    pub fn with_options(title: impl Into<String>, options: ContextOptions) -> Self {
        let clock = options
            .clock
            .unwrap_or_else(|| Arc::new(MonotonicClock::new()));
        Self::from_node(Arc::new(ContextNode {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.into(),
            start_timestamp: clock.now(),
            end_timestamp: Mutex::new(None),
            user_context: options.user_context,
            children: Mutex::new(Vec::new()),
            parent: None,
            channels: options.channels.into(),
            clock,
        }))
    }

    pub(crate) fn from_node(node: Arc<ContextNode>) -> Self {
        Self { node }
    }

    pub fn id(&self) -> &str {
        &self.node.id
    }

    pub fn title(&self) -> &str {
        &self.node.title
    }

    pub fn start_timestamp(&self) -> Duration {
        self.node.start_timestamp
    }

    pub fn end_timestamp(&self) -> Option<Duration> {
        *lock_or_recover(&self.node.end_timestamp)
    }

    pub fn is_ended(&self) -> bool {
        self.end_timestamp().is_some()
    }

    pub fn user_context(&self) -> &UserContext {
        &self.node.user_context
    }

    /// Number of channels shared by this tree.
    pub fn channel_count(&self) -> usize {
        self.node.channels.len()
    }

    /// The parent context, `None` for a root (or once the parent is dropped).
    pub fn parent(&self) -> Option<Context> {
        self.node
            .parent
            .as_ref()
            .and_then(Weak::upgrade)
            .map(Self::from_node)
    }

    pub fn root(&self) -> Context {
        match self.parent() {
            Some(parent) => parent.root(),
            None => self.clone(),
        }
    }

    /// Snapshot of the children, in insertion order.
    pub fn children(&self) -> Vec<ContextEntry> {
        lock_or_recover(&self.node.children).clone()
    }

    /// Create and append a child context. The caller must [`end`](Self::end) it.
    ///
    /// The child's user context is this context's, merged with the scope's
    /// entries.
    pub fn start_child<S: Into<ChildScope>>(&self, scope: S) -> Context {
        let scope = scope.into();
        let mut user_context = self.node.user_context.clone();
        user_context.extend(scope.user_context);

        let child = Self::from_node(Arc::new(ContextNode {
            id: uuid::Uuid::new_v4().to_string(),
            title: scope.title,
            start_timestamp: self.node.clock.now(),
            end_timestamp: Mutex::new(None),
            user_context,
            children: Mutex::new(Vec::new()),
            parent: Some(Arc::downgrade(&self.node)),
            channels: Arc::clone(&self.node.channels),
            clock: Arc::clone(&self.node.clock),
        }));
        lock_or_recover(&self.node.children).push(ContextEntry::Context(child.clone()));
        child
    }

    /// Run `callback` inside a new child context.
    ///
    /// The child is ended when the callback returns. An `Err` is first
    /// recorded as an error log of the child (with the error's data), then
    /// returned unchanged. This context is never ended by the call.
    pub fn with_child<S, T, E, F>(&self, scope: S, callback: F) -> Result<T, E>
    where
        S: Into<ChildScope>,
        F: FnOnce(&Context) -> Result<T, E>,
        E: ScopedError,
    {
        let child = self.start_child(scope);
        let mut guard = PanicGuard::new(&child);
        let result = callback(&child);
        guard.disarm();
        child.close_scope(result)
    }

    /// Async version of [`with_child`](Self::with_child).
    ///
    /// The child is appended when this method is called, not when the
    /// returned future is first polled, so children keep the order of the
    /// calls. A scope whose future is dropped before completion stays running.
    pub fn with_child_async<S, T, E, F, Fut>(
        &self,
        scope: S,
        callback: F,
    ) -> impl Future<Output = Result<T, E>>
    where
        S: Into<ChildScope>,
        F: FnOnce(Context) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: ScopedError,
    {
        let child = self.start_child(scope);
        async move {
            let mut guard = PanicGuard::new(&child);
            let result = callback(child.clone()).await;
            guard.disarm();
            child.close_scope(result)
        }
    }

    fn close_scope<T, E: ScopedError>(&self, result: Result<T, E>) -> Result<T, E> {
        if let Err(error) = &result {
            self.error_with(error, error.data());
        }
        self.end();
        result
    }

    pub fn error<E: fmt::Display + fmt::Debug + ?Sized>(&self, error: &E) {
        self.error_with(error, None::<Value>)
    }

    pub fn error_with<E, D>(&self, error: &E, data: D)
    where
        E: fmt::Display + fmt::Debug + ?Sized,
        D: Into<Option<Value>>,
    {
        let record = ErrorRecord::capture(error);
        self.append_log(
            LogKind::Error,
            record.message.clone(),
            data.into(),
            Some(record),
        );
    }

    pub fn warning<T: Into<String>>(&self, text: T) {
        self.warning_with(text, None::<Value>)
    }

    pub fn warning_with<T: Into<String>, D: Into<Option<Value>>>(&self, text: T, data: D) {
        self.append_log(LogKind::Warning, text.into(), data.into(), None);
    }

    pub fn info<T: Into<String>>(&self, text: T) {
        self.info_with(text, None::<Value>)
    }

    pub fn info_with<T: Into<String>, D: Into<Option<Value>>>(&self, text: T, data: D) {
        self.append_log(LogKind::Info, text.into(), data.into(), None);
    }

    fn append_log(
        &self,
        kind: LogKind,
        text: String,
        data: Option<Value>,
        error: Option<ErrorRecord>,
    ) {
        let log = Arc::new(Log::new(
            Arc::downgrade(&self.node),
            self.node.clock.now(),
            kind,
            text,
            data,
            error,
        ));
        lock_or_recover(&self.node.children).push(ContextEntry::Log(Arc::clone(&log)));

        for channel in self.node.channels.iter() {
            channel.dispatch(&log);
        }
    }

    /// Set the end timestamp. Returns `false` (and keeps the first
    /// timestamp) if the context was already ended.
    pub fn end(&self) -> bool {
        let mut end = lock_or_recover(&self.node.end_timestamp);
        if end.is_some() {
            return false;
        }
        *end = Some(self.node.clock.now());
        true
    }

    /// End this context and every ancestor up to the root.
    pub fn terminate(&self) {
        self.end();
        if let Some(parent) = self.parent() {
            parent.terminate();
        }
    }

    pub fn status(&self) -> ContextStatus {
        if self.contains_error() {
            ContextStatus::Failed
        } else if self.is_ended() {
            ContextStatus::Success
        } else {
            ContextStatus::Running
        }
    }

    fn contains_error(&self) -> bool {
        self.children().iter().any(|child| match child {
            ContextEntry::Log(log) => log.is_error(),
            ContextEntry::Context(context) => context.contains_error(),
        })
    }

    /// Elapsed time since this context started, see the module docs.
    pub fn elapsed(&self) -> Option<Duration> {
        self.elapsed_from(self.node.start_timestamp)
    }

    pub fn elapsed_from(&self, from: Duration) -> Option<Duration> {
        if let Some(end) = self.end_timestamp() {
            return Some(end.saturating_sub(from));
        }
        self.children()
            .iter()
            .filter_map(|child| child.elapsed_from(from))
            .max()
    }

    /// Serializable snapshot of the subtree rooted here.
    pub fn report(&self) -> ContextReport {
        ContextReport::from_context(self)
    }
}

impl PartialEq for Context {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.node, &other.node)
    }
}

impl Eq for Context {}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("id", &self.node.id)
            .field("title", &self.node.title)
            .field("ended", &self.is_ended())
            .finish_non_exhaustive()
    }
}

/// Records an error and ends the child when a scope callback unwinds.
struct PanicGuard<'a> {
    context: &'a Context,
    armed: bool,
}

impl<'a> PanicGuard<'a> {
    fn new(context: &'a Context) -> Self {
        Self {
            context,
            armed: true,
        }
    }

    fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for PanicGuard<'_> {
    fn drop(&mut self) {
        if self.armed && std::thread::panicking() {
            self.context.error(SCOPE_PANICKED);
            self.context.end();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::channel::LogChannel;
    use crate::core::clock::ManualClock;
    use crate::core::error::TraceError;
    use serde_json::json;

    fn manual_root(title: &str) -> (Context, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new());
        let root = Context::with_options(title, ContextOptions::new().with_clock(clock.clone()));
        (root, clock)
    }

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn test_elapsed_of_ended_root() {
        let clock = Arc::new(ManualClock::new());
        clock.set_millis(10);
        let root = Context::with_options("root", ContextOptions::new().with_clock(clock.clone()));
        clock.set_millis(35);
        assert!(root.end());
        assert_eq!(root.start_timestamp(), ms(10));
        assert_eq!(root.elapsed(), Some(ms(25)));
    }

    #[test]
    fn test_elapsed_of_running_root_is_max_over_descendants() {
        let (root, clock) = manual_root("root");

        let ended = root.start_child("ended");
        clock.set_millis(50);
        ended.end();

        clock.set_millis(10);
        let running = root.start_child("running");
        clock.set_millis(20);
        let grandchild = running.start_child("grandchild");
        clock.set_millis(80);
        grandchild.end();

        assert!(!root.is_ended());
        assert!(!running.is_ended());
        assert_eq!(root.elapsed(), Some(ms(80)));
        assert_eq!(running.elapsed(), Some(ms(70)));
    }

    #[test]
    fn test_elapsed_undefined_until_something_happens() {
        let (root, clock) = manual_root("root");
        let child = root.start_child("child");
        assert_eq!(root.elapsed(), None);
        assert_eq!(child.elapsed(), None);

        clock.set_millis(30);
        child.info("progress");
        assert_eq!(root.elapsed(), Some(ms(30)));
    }

    #[test]
    fn test_status_lifecycle() {
        let root = Context::new("root");
        assert_eq!(root.status(), ContextStatus::Running);
        root.warning("only a warning");
        root.end();
        assert_eq!(root.status(), ContextStatus::Success);
    }

    #[test]
    fn test_status_failed_from_deep_error() {
        let root = Context::new("root");
        let child = root.start_child("child");
        let grandchild = child.start_child("grandchild");
        grandchild.error(&TraceError::failed("deep failure"));
        grandchild.end();
        child.end();
        root.end();

        assert_eq!(grandchild.status(), ContextStatus::Failed);
        assert_eq!(child.status(), ContextStatus::Failed);
        assert_eq!(root.status(), ContextStatus::Failed);
    }

    #[test]
    fn test_failed_takes_precedence_over_running() {
        let root = Context::new("root");
        root.error("not ended yet");
        assert_eq!(root.status(), ContextStatus::Failed);
    }

    #[test]
    fn test_with_child_success() {
        let root = Context::new("root");
        let value: Result<u32, TraceError> = root.with_child("compute", |ctx| {
            ctx.info("working");
            Ok(42)
        });

        assert_eq!(value.unwrap(), 42);
        let children = root.children();
        assert_eq!(children.len(), 1);
        let child = children[0].as_context().unwrap();
        assert_eq!(child.title(), "compute");
        assert_eq!(child.status(), ContextStatus::Success);
        assert!(!root.is_ended());
    }

    #[test]
    fn test_with_child_records_and_rethrows() {
        let root = Context::new("root");
        let result: Result<(), TraceError> = root.with_child("failing", |_ctx| {
            Err(TraceError::with_data("boom", json!({"code": 7})))
        });

        let error = result.unwrap_err();
        assert_eq!(error.to_string(), "boom");

        let children = root.children();
        let child = children[0].as_context().unwrap();
        assert!(child.is_ended());
        assert_eq!(child.status(), ContextStatus::Failed);

        let logs = child.children();
        let log = logs[0].as_log().unwrap();
        assert_eq!(log.kind(), LogKind::Error);
        assert_eq!(log.text(), "boom");
        assert_eq!(log.data(), Some(&json!({"code": 7})));
        assert_eq!(log.error().map(|e| e.message.as_str()), Some("boom"));

        assert!(!root.is_ended());
        assert_eq!(root.status(), ContextStatus::Failed);
    }

    #[test]
    fn test_with_child_panic_is_recorded() {
        let root = Context::new("root");
        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _: Result<(), TraceError> = root.with_child("panicking", |_ctx| panic!("kaboom"));
        }));
        assert!(outcome.is_err());

        let children = root.children();
        let child = children[0].as_context().unwrap();
        assert!(child.is_ended());
        let logs = child.children();
        assert_eq!(logs[0].as_log().unwrap().text(), SCOPE_PANICKED);
    }

    #[test]
    fn test_user_context_inherited_and_merged() {
        let root = Context::with_options(
            "root",
            ContextOptions::new()
                .with_user_entry("user", "alice")
                .with_user_entry("tab", 1),
        );
        let child = root.start_child(ChildScope::new("child").with_user_entry("tab", 2));
        let grandchild = child.start_child("grandchild");

        assert_eq!(child.user_context().get("user"), Some(&json!("alice")));
        assert_eq!(child.user_context().get("tab"), Some(&json!(2)));
        assert_eq!(grandchild.user_context().get("tab"), Some(&json!(2)));
        assert_eq!(root.user_context().get("tab"), Some(&json!(1)));
    }

    #[test]
    fn test_children_keep_insertion_order_and_unique_ids() {
        let root = Context::new("root");
        let first = root.start_child("first");
        root.info("between");
        let second = root.start_child("second");

        let children = root.children();
        assert_eq!(children.len(), 3);
        assert_eq!(children[0].as_context(), Some(&first));
        assert!(children[1].as_log().is_some());
        assert_eq!(children[2].as_context(), Some(&second));

        let mut ids: Vec<&str> = children.iter().map(ContextEntry::id).collect();
        ids.push(root.id());
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 4);
    }

    #[test]
    fn test_second_end_is_ignored() {
        let (root, clock) = manual_root("root");
        clock.set_millis(10);
        assert!(root.end());
        clock.set_millis(20);
        assert!(!root.end());
        assert_eq!(root.end_timestamp(), Some(ms(10)));
    }

    #[test]
    fn test_terminate_closes_ancestor_chain() {
        let root = Context::new("root");
        let child = root.start_child("child");
        let sibling = root.start_child("sibling");
        let grandchild = child.start_child("grandchild");

        grandchild.terminate();

        assert!(grandchild.is_ended());
        assert!(child.is_ended());
        assert!(root.is_ended());
        assert!(!sibling.is_ended());
    }

    #[test]
    fn test_root_and_parent() {
        let root = Context::new("root");
        let grandchild = root.start_child("child").start_child("grandchild");
        assert_eq!(grandchild.root(), root);
        assert_eq!(grandchild.parent().unwrap().title(), "child");
        assert!(root.parent().is_none());
        assert_eq!(root.root(), root);
    }

    #[test]
    fn test_log_back_reference() {
        let root = Context::new("root");
        let child = root.start_child("child");
        child.info_with("hello", json!([1, 2]));

        let children = child.children();
        let log = children[0].as_log().unwrap();
        assert_eq!(log.context(), Some(child.clone()));
        assert_eq!(log.kind(), LogKind::Info);
        assert_eq!(log.data(), Some(&json!([1, 2])));
    }

    #[test]
    fn test_channels_shared_by_whole_tree() {
        let received = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&received);
        let channel = LogChannel::mapped(Log::is_error, |log: &Arc<Log>| log.text().to_string())
            .with_pipe(move |text: String| sink.lock().unwrap().push(text));

        let root = Context::with_options("root", ContextOptions::new().with_channel(channel));
        root.info("ignored");
        let child = root.start_child("child");
        assert_eq!(child.channel_count(), 1);
        child.error("child failed");
        let _: Result<(), TraceError> =
            child.with_child("nested", |_| Err(TraceError::failed("nested failed")));

        assert_eq!(
            *received.lock().unwrap(),
            vec!["child failed".to_string(), "nested failed".to_string()]
        );
    }

    #[test]
    fn test_identity_channel_publishes_logs() {
        let received = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&received);
        let channel = LogChannel::new(|log: &Log| log.kind() == LogKind::Warning)
            .with_pipe(move |log: Arc<Log>| sink.lock().unwrap().push(log));

        let root = Context::with_options("root", ContextOptions::new().with_channel(channel));
        root.warning("careful");
        root.info("fine");

        let received = received.lock().unwrap();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].text(), "careful");
        assert_eq!(received[0].context(), Some(root.clone()));
    }

    #[tokio::test]
    async fn test_with_child_async_success_and_failure() {
        let root = Context::new("root");

        let value = root
            .with_child_async("fetch", |ctx| async move {
                ctx.info("fetching");
                tokio::task::yield_now().await;
                Ok::<_, TraceError>("payload")
            })
            .await
            .unwrap();
        assert_eq!(value, "payload");

        let error = root
            .with_child_async("store", |_ctx| async move {
                Err::<(), _>(TraceError::with_data("disk full", json!("sda1")))
            })
            .await
            .unwrap_err();
        assert_eq!(error.to_string(), "disk full");

        let children = root.children();
        let fetch = children[0].as_context().unwrap();
        let store = children[1].as_context().unwrap();
        assert_eq!(fetch.status(), ContextStatus::Success);
        assert_eq!(store.status(), ContextStatus::Failed);
        assert!(store.is_ended());
        assert_eq!(
            store.children()[0].as_log().unwrap().data(),
            Some(&json!("sda1"))
        );
    }

    #[tokio::test]
    async fn test_interleaved_async_scopes_keep_construction_order() {
        let root = Context::new("root");

        let slow = root.with_child_async("slow", |ctx| async move {
            tokio::task::yield_now().await;
            tokio::task::yield_now().await;
            ctx.info("slow done");
            Ok::<_, TraceError>(1)
        });
        let fast = root.with_child_async("fast", |ctx| async move {
            ctx.info("fast done");
            Ok::<_, TraceError>(2)
        });
        let (slow, fast) = futures::join!(slow, fast);
        assert_eq!((slow.unwrap(), fast.unwrap()), (1, 2));

        let titles: Vec<String> = root
            .children()
            .iter()
            .filter_map(|entry| entry.as_context().map(|c| c.title().to_string()))
            .collect();
        assert_eq!(titles, vec!["slow", "fast"]);
    }

    #[tokio::test]
    async fn test_async_children_follow_call_order_not_poll_order() {
        let root = Context::new("root");

        let first = root.with_child_async("a", |ctx| async move {
            ctx.info("a done");
            Ok::<_, TraceError>(1)
        });
        let second = root.with_child_async("b", |ctx| async move {
            ctx.info("b done");
            Ok::<_, TraceError>(2)
        });
        assert_eq!(root.children().len(), 2);

        let (second, first) = futures::join!(second, first);
        assert_eq!((first.unwrap(), second.unwrap()), (1, 2));

        let titles: Vec<String> = root
            .children()
            .iter()
            .filter_map(|entry| entry.as_context().map(|c| c.title().to_string()))
            .collect();
        assert_eq!(titles, vec!["a", "b"]);
        assert!(root.children().iter().all(|entry| {
            entry
                .as_context()
                .is_some_and(|c| c.status() == ContextStatus::Success)
        }));
    }

    #[test]
    fn test_unpolled_async_scope_is_appended_and_running() {
        let root = Context::new("root");
        let pending = root.with_child_async("never polled", |_ctx| async move {
            Ok::<_, TraceError>(())
        });
        drop(pending);

        let children = root.children();
        let child = children[0].as_context().unwrap();
        assert_eq!(child.title(), "never polled");
        assert_eq!(child.status(), ContextStatus::Running);
    }

    #[tokio::test]
    async fn test_dropped_async_scope_stays_running() {
        let root = Context::new("root");
        {
            let pending = root.with_child_async("abandoned", |_ctx| async move {
                std::future::pending::<()>().await;
                Ok::<_, TraceError>(())
            });
            let mut pending = Box::pin(pending);
            let waker = futures::task::noop_waker();
            let mut cx = std::task::Context::from_waker(&waker);
            assert!(pending.as_mut().poll(&mut cx).is_pending());
        }

        let children = root.children();
        let abandoned = children[0].as_context().unwrap();
        assert_eq!(abandoned.status(), ContextStatus::Running);
        assert!(abandoned.children().is_empty());
    }
}
