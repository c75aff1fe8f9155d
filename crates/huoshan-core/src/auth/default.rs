//! Cached default credential.

use std::sync::{Arc, LazyLock, PoisonError, RwLock};

use super::credential::Credential;
use super::error::AuthError;
use super::resolver::CredentialResolver;

/// Strategy that produces a credential when the default is first needed.
pub trait CredentialSource: Send + Sync {
    /// Resolve a credential, or `None` if no source has one.
    fn resolve(&self) -> Option<Credential>;
}

impl CredentialSource for CredentialResolver {
    fn resolve(&self) -> Option<Credential> {
        self.resolve_default()
    }
}

impl<F> CredentialSource for F
where
    F: Fn() -> Option<Credential> + Send + Sync,
{
    fn resolve(&self) -> Option<Credential> {
        self()
    }
}

static SHARED: LazyLock<DefaultCredentials> = LazyLock::new(DefaultCredentials::new);

/// Holder for the default credential used when a client is built without one.
///
/// The source runs on the first [`get`](Self::get) only. After a successful
/// resolution the cached value is returned until [`set`](Self::set) or
/// [`reset`](Self::reset) is called, even if files or environment change.
///
/// Concurrent first calls may each run the source, but the cache keeps the
/// first value stored and every caller receives that same `Arc`.
pub struct DefaultCredentials {
    source: Box<dyn CredentialSource>,
    cached: RwLock<Option<Arc<Credential>>>,
}

impl Default for DefaultCredentials {
    fn default() -> Self {
        Self::new()
    }
}

impl DefaultCredentials {
    /// Create a holder backed by the standard [`CredentialResolver`] chain.
    pub fn new() -> Self {
        Self::with_source(CredentialResolver::new())
    }

    /// Create a holder backed by a custom source.
    pub fn with_source(source: impl CredentialSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            cached: RwLock::new(None),
        }
    }

    /// The process-wide holder.
    pub fn shared() -> &'static Self {
        &SHARED
    }

    /// Return the cached credential, resolving it on first use.
    pub fn get(&self) -> Result<Arc<Credential>, AuthError> {
        if let Some(cached) = self.cached() {
            return Ok(cached);
        }

        let resolved = self.source.resolve().ok_or_else(|| {
            tracing::warn!("No API credential found in config files or environment");
            AuthError::CredentialNotFound
        })?;

        let mut slot = self.cached.write().unwrap_or_else(PoisonError::into_inner);
        Ok(Arc::clone(slot.get_or_insert_with(|| Arc::new(resolved))))
    }

    /// Replace the cached credential.
    pub fn set(&self, credential: Credential) {
        *self.cached.write().unwrap_or_else(PoisonError::into_inner) = Some(Arc::new(credential));
    }

    /// Drop the cached credential so the next `get` resolves again.
    ///
    /// Test hook for swapping credential sources between cases.
    #[doc(hidden)]
    pub fn reset(&self) {
        *self.cached.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Return the cached credential without resolving.
    pub fn cached(&self) -> Option<Arc<Credential>> {
        self.cached
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// Return the process-wide default credential, resolving it on first use.
///
/// Shorthand for `DefaultCredentials::shared().get()`.
pub fn get_default() -> Result<Arc<Credential>, AuthError> {
    DefaultCredentials::shared().get()
}

/// Replace the process-wide default credential.
pub fn set_default(credential: Credential) {
    DefaultCredentials::shared().set(credential);
}
