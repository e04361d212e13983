//! Serialised, self-restoring environment variable mutation.
//!
//! Every mutation runs under one global re-entrant lock and yields an
//! [`EnvVarGuard`] that puts the previous value back (or removes the
//! variable) when dropped. Guards for the same key nest and unwind in LIFO
//! order.
//!
//! Tests that read several variables while other tests may be writing should
//! hold an [`EnvScope`], which keeps the lock for its whole lifetime.
//!
//! # Examples
//!
//! ```
//! use optbind_test_helpers::env;
//!
//! let _scope = env::scope_with(|lock| {
//!     vec![lock.set_var("PORT", "8080"), lock.remove_var("HOST")]
//! });
//! assert_eq!(std::env::var("PORT").as_deref(), Ok("8080"));
//! ```

use parking_lot::{ReentrantMutex, ReentrantMutexGuard};
use std::env;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::sync::LazyLock;

static ENV_MUTEX: LazyLock<ReentrantMutex<()>> = LazyLock::new(ReentrantMutex::default);

type EnvLockGuard = ReentrantMutexGuard<'static, ()>;

/// Restores one variable to its earlier state on drop.
#[must_use = "dropping restores the prior value"]
pub struct EnvVarGuard {
    key: String,
    original: Option<OsString>,
}

impl EnvVarGuard {
    /// Name of the guarded variable.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        let _lock = ENV_MUTEX.lock();
        // SAFETY: `ENV_MUTEX` is held for the write.
        unsafe { write(&self.key, self.original.take().as_deref()) };
    }
}

impl fmt::Debug for EnvVarGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvVarGuard")
            .field("key", &self.key)
            .field("had_original", &self.original.is_some())
            .finish()
    }
}

/// Holds the global lock so a series of mutations cannot interleave with
/// other tests.
#[must_use = "dropping releases the environment lock"]
pub struct EnvVarLock {
    _guard: EnvLockGuard,
}

impl EnvVarLock {
    /// Sets `key` while the lock is held.
    pub fn set_var<K, V>(&self, key: K, value: V) -> EnvVarGuard
    where
        K: Into<String>,
        V: AsRef<OsStr>,
    {
        replace(key.into(), Some(value.as_ref()))
    }

    /// Removes `key` while the lock is held.
    pub fn remove_var<K>(&self, key: K) -> EnvVarGuard
    where
        K: Into<String>,
    {
        replace(key.into(), None)
    }
}

/// Keeps the lock and a set of guards alive together.
///
/// Guards are restored before the lock is released.
#[must_use = "dropping releases the environment lock and restores guards"]
pub struct EnvScope {
    guards: Vec<EnvVarGuard>,
    _lock: EnvVarLock,
}

impl EnvScope {
    /// Keys guarded by this scope, in creation order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.guards.iter().map(EnvVarGuard::key)
    }
}

impl Drop for EnvScope {
    fn drop(&mut self) {
        while let Some(guard) = self.guards.pop() {
            drop(guard);
        }
    }
}

/// Acquires the global environment lock.
pub fn lock() -> EnvVarLock {
    EnvVarLock {
        _guard: ENV_MUTEX.lock(),
    }
}

/// Sets `key` to `value` until the guard is dropped.
pub fn set_var<K, V>(key: K, value: V) -> EnvVarGuard
where
    K: Into<String>,
    V: AsRef<OsStr>,
{
    lock().set_var(key, value)
}

/// Removes `key` until the guard is dropped.
pub fn remove_var<K>(key: K) -> EnvVarGuard
where
    K: Into<String>,
{
    lock().remove_var(key)
}

/// Runs `builder` under the lock and keeps the lock for the scope's lifetime.
pub fn scope_with<F>(builder: F) -> EnvScope
where
    F: FnOnce(&EnvVarLock) -> Vec<EnvVarGuard>,
{
    let held = lock();
    let guards = builder(&held);
    EnvScope {
        guards,
        _lock: held,
    }
}

/// Sets or clears each `(key, value)` pair inside one scope.
///
/// `None` removes the variable, which is how tests assert that an option is
/// not picked up from a stray value in the developer's shell.
///
/// # Examples
///
/// ```
/// use optbind_test_helpers::env;
///
/// let _scope = env::vars([("MAX_RETRY_COUNT", Some("3")), ("PORT", None)]);
/// assert_eq!(std::env::var("MAX_RETRY_COUNT").as_deref(), Ok("3"));
/// assert!(std::env::var("PORT").is_err());
/// ```
pub fn vars<'v, I>(pairs: I) -> EnvScope
where
    I: IntoIterator<Item = (&'v str, Option<&'v str>)>,
{
    scope_with(|lock| {
        pairs
            .into_iter()
            .map(|(key, value)| match value {
                Some(value) => lock.set_var(key, value),
                None => lock.remove_var(key),
            })
            .collect()
    })
}

fn replace(key: String, value: Option<&OsStr>) -> EnvVarGuard {
    let original = env::var_os(&key);
    // SAFETY: every caller holds `ENV_MUTEX`.
    unsafe { write(&key, value) };
    EnvVarGuard { key, original }
}

/// Sets or removes `key`.
///
/// # Safety
///
/// Callers must hold `ENV_MUTEX`.
unsafe fn write(key: &str, value: Option<&OsStr>) {
    match value {
        // SAFETY: upheld by the caller.
        Some(value) => unsafe { env::set_var(key, value) },
        // SAFETY: upheld by the caller.
        None => unsafe { env::remove_var(key) },
    }
}

#[cfg(test)]
mod tests;
