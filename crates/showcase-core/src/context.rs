//! Scoped context propagation
//!
//! A `Context` is an immutable, persistent set of named string bindings that
//! is passed explicitly down the call chain. Binding a key produces a derived
//! context; the receiver is untouched, so an outer binding is observable again
//! as soon as the inner extent returns, on every exit path.
//!
//! Workers see bindings only when they are handed a copy:
//! - `Context::spawn_inherited` copies the active set into the worker
//! - `Context::spawn_bare` starts the worker with an empty set

use crate::error::{Result, ShowcaseError};
use crate::fanout::ScopedHandle;
use im::Vector;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::Arc;

/// Named context key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContextKey {
    name: &'static str,
}

impl ContextKey {
    /// Declare a key
    #[inline]
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self { name }
    }

    /// Key name
    #[inline]
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

/// Calling user
pub const USER_ID: ContextKey = ContextKey::new("user_id");
/// Current request
pub const REQUEST_ID: ContextKey = ContextKey::new("request_id");
/// Owning tenant
pub const TENANT_ID: ContextKey = ContextKey::new("tenant_id");

/// Fallback user id when none is bound
pub const ANONYMOUS_USER: &str = "usuario-anonimo";

#[derive(Debug, Clone)]
struct Binding {
    key: ContextKey,
    value: Arc<str>,
}

/// Immutable binding set, in binding order
#[derive(Debug, Clone, Default)]
pub struct Context {
    bindings: Vector<Binding>,
}

impl Context {
    /// Context with no bindings
    #[inline]
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// Derive a context with `key` bound to `value`
    ///
    /// Shadows any outer binding of `key` for holders of the derived context.
    #[must_use]
    pub fn bind(&self, key: ContextKey, value: impl Into<Arc<str>>) -> Self {
        let mut bindings = self.bindings.clone();
        bindings.push_back(Binding {
            key,
            value: value.into(),
        });
        Self { bindings }
    }

    /// Run `f` within this binding set
    #[inline]
    pub fn call<R>(&self, f: impl FnOnce(&Context) -> R) -> R {
        f(self)
    }

    /// Run an async unit of work within this binding set
    pub async fn call_async<F, Fut>(&self, f: F) -> Fut::Output
    where
        F: FnOnce(Context) -> Fut,
        Fut: Future,
    {
        f(self.clone()).await
    }

    /// Innermost value bound to `key`
    ///
    /// # Errors
    /// - `ShowcaseError::Unbound` if `key` has no binding
    pub fn get(&self, key: ContextKey) -> Result<&str> {
        self.lookup(key).ok_or(ShowcaseError::Unbound(key.name))
    }

    /// Check whether `key` has a binding
    #[inline]
    #[must_use]
    pub fn is_bound(&self, key: ContextKey) -> bool {
        self.lookup(key).is_some()
    }

    /// Innermost value bound to `key`, or `fallback`
    #[inline]
    #[must_use]
    pub fn get_or<'a>(&'a self, key: ContextKey, fallback: &'a str) -> &'a str {
        self.lookup(key).unwrap_or(fallback)
    }

    /// Visible bindings in the order they were made
    ///
    /// A shadowed binding is reported at the position of its innermost rebinding.
    #[must_use]
    pub fn bindings(&self) -> Vec<(&'static str, &str)> {
        let mut visible: Vec<(&'static str, &str)> = Vec::with_capacity(self.bindings.len());
        for binding in &self.bindings {
            visible.retain(|(name, _)| *name != binding.key.name);
            visible.push((binding.key.name, &*binding.value));
        }
        visible
    }

    /// Number of visible bindings
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings().len()
    }

    /// Check for an empty binding set
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Start a worker that receives a copy of the active bindings
    pub fn spawn_inherited<F, Fut>(&self, f: F) -> ScopedHandle<Fut::Output>
    where
        F: FnOnce(Context) -> Fut,
        Fut: Future + Send + 'static,
        Fut::Output: Send + 'static,
    {
        ScopedHandle::spawn(f(self.clone()))
    }

    /// Start a worker with no bindings at all
    pub fn spawn_bare<F, Fut>(f: F) -> ScopedHandle<Fut::Output>
    where
        F: FnOnce(Context) -> Fut,
        Fut: Future + Send + 'static,
        Fut::Output: Send + 'static,
    {
        ScopedHandle::spawn(f(Context::root()))
    }

    fn lookup(&self, key: ContextKey) -> Option<&str> {
        self.bindings
            .iter()
            .rev()
            .find(|b| b.key == key)
            .map(|b| &*b.value)
    }
}

/// How `process_with_concurrency` starts its workers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpawnMode {
    /// Plain worker start, bindings are not inherited
    #[default]
    Bare,
    /// Structured start, bindings are copied into the worker
    Inherited,
}

/// Scoped context demo component
#[derive(Debug, Clone, Copy, Default)]
pub struct ScopedValuesDemo;

impl ScopedValuesDemo {
    /// Create the component
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Bind user, request and tenant, then read them back in a nested call
    ///
    /// # Errors
    /// - `ShowcaseError::Unbound` if a binding is missing in the operation
    pub fn process_with_context(&self, user_id: &str, request_id: &str, tenant_id: &str) -> Result<String> {
        tracing::info!(user_id, request_id, tenant_id, "processing with context");
        Context::root()
            .bind(USER_ID, user_id)
            .bind(REQUEST_ID, request_id)
            .bind(TENANT_ID, tenant_id)
            .call(perform_operation)
    }

    /// Bind the user and read it from two concurrent workers
    ///
    /// With `SpawnMode::Bare` the workers observe no user id.
    ///
    /// # Errors
    /// - `ShowcaseError::WorkerFailed` if a worker panics
    pub async fn process_with_concurrency(&self, user_id: &str, mode: SpawnMode) -> Result<String> {
        tracing::info!(user_id, ?mode, "processing with concurrent workers");
        Context::root()
            .bind(USER_ID, user_id)
            .call_async(|ctx| async move {
                let (t1, t2) = match mode {
                    SpawnMode::Bare => (
                        Context::spawn_bare(|w| async move { task_label(1, &w) }),
                        Context::spawn_bare(|w| async move { task_label(2, &w) }),
                    ),
                    SpawnMode::Inherited => (
                        ctx.spawn_inherited(|w| async move { task_label(1, &w) }),
                        ctx.spawn_inherited(|w| async move { task_label(2, &w) }),
                    ),
                };
                let (r1, r2) = tokio::try_join!(t1.join(), t2.join())?;
                Ok::<_, ShowcaseError>(format!("{r1} | {r2}"))
            })
            .await
    }

    /// `process_with_concurrency` with workers that inherit the bindings
    ///
    /// # Errors
    /// - `ShowcaseError::WorkerFailed` if a worker panics
    pub async fn process_with_inherited_context(&self, user_id: &str) -> Result<String> {
        self.process_with_concurrency(user_id, SpawnMode::Inherited).await
    }

    /// Shadow the tenant in an inner extent, then read the outer one again
    #[must_use]
    pub fn nested_scopes(&self) -> String {
        Context::root().bind(TENANT_ID, "tenant-1").call(|outer| {
            let inner_result = outer
                .bind(TENANT_ID, "tenant-2")
                .call(|inner| format!("Inner tenant: {}", inner.get_or(TENANT_ID, "")));

            format!("Outer tenant: {} | {inner_result}", outer.get_or(TENANT_ID, ""))
        })
    }

    /// User id or the anonymous fallback
    #[must_use]
    pub fn user_id_or_default(&self, ctx: &Context) -> String {
        ctx.get_or(USER_ID, ANONYMOUS_USER).to_string()
    }

    /// Check whether a user id is bound
    #[inline]
    #[must_use]
    pub fn has_user_context(&self, ctx: &Context) -> bool {
        ctx.is_bound(USER_ID)
    }
}

fn perform_operation(ctx: &Context) -> Result<String> {
    let result = format!(
        "Procesando operación - User: {}, Request: {}, Tenant: {}",
        ctx.get(USER_ID)?,
        ctx.get(REQUEST_ID)?,
        ctx.get(TENANT_ID)?,
    );

    nested_operation(ctx);

    Ok(result)
}

fn nested_operation(ctx: &Context) {
    if let Ok(user_id) = ctx.get(USER_ID) {
        tracing::debug!(user_id, "nested operation");
    }
}

fn task_label(task: u8, worker: &Context) -> String {
    if !worker.is_bound(USER_ID) {
        tracing::debug!(task, "worker started without bindings");
    }
    format!("Task {task} ejecutada por: {}", worker.get_or(USER_ID, ""))
}
