//! `Prepkit` builder and top-level handle.
//!
//! This is the entry point for embedding the SDK in a host UI. It ties
//! together all the layers: token store → transport → session, plus the
//! notification queue alongside.

use std::sync::Arc;
use std::time::Duration;

use prepkit_notify::NotificationCenter;
use prepkit_session::SessionManager;
use prepkit_transport::{ApiClient, ApiConfig, FileTokenStore, TokenStore, TransportError};

/// Builder for configuring and assembling a [`Prepkit`] handle.
///
/// # Example
///
/// ```rust,no_run
/// use prepkit::prelude::*;
///
/// # async fn run() -> Result<(), TransportError> {
/// let app = Prepkit::builder()
///     .base_url("https://api.prepkit.dev/api")
///     .on_unauthorized(|| { /* navigate to the login screen */ })
///     .build()?;
///
/// app.start().await; // resume a stored session, if any
/// # Ok(())
/// # }
/// ```
pub struct PrepkitBuilder {
    config: ApiConfig,
    store: Option<Arc<dyn TokenStore>>,
    on_unauthorized: Option<Box<dyn Fn() + Send + Sync>>,
}

impl PrepkitBuilder {
    /// Creates a builder with default settings (local backend, 10 s
    /// timeout, token file under the platform data dir).
    pub fn new() -> Self {
        Self {
            config: ApiConfig::default(),
            store: None,
            on_unauthorized: None,
        }
    }

    /// Sets the backend base address.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = base_url.into();
        self
    }

    /// Sets the per-request budget.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Replaces the default file-backed token store. Tests and throwaway
    /// tools pass a `MemoryTokenStore` here.
    pub fn token_store(mut self, store: Arc<dyn TokenStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Registers the host's reaction to an authorization-denied response
    /// — typically a hard navigation to the login screen.
    pub fn on_unauthorized(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_unauthorized = Some(Box::new(hook));
        self
    }

    /// Assembles the handle.
    ///
    /// # Errors
    /// Fails if the HTTP client can't be constructed or, when no store
    /// was supplied, the platform has no data directory for the default
    /// token file.
    pub fn build(self) -> Result<Prepkit, TransportError> {
        let store: Arc<dyn TokenStore> = match self.store {
            Some(store) => store,
            None => Arc::new(FileTokenStore::at_default_path()?),
        };

        let api = ApiClient::new(self.config, Arc::clone(&store))?;
        if let Some(hook) = self.on_unauthorized {
            api.set_unauthorized_hook(move || hook());
        }

        let session = SessionManager::new(api.clone(), store);

        tracing::debug!("prepkit client assembled");
        Ok(Prepkit {
            api,
            session,
            notifications: NotificationCenter::new(),
        })
    }
}

impl Default for PrepkitBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// The assembled SDK: one session, one notification queue, one shared
/// HTTP client.
pub struct Prepkit {
    api: ApiClient,
    session: SessionManager<ApiClient>,
    notifications: NotificationCenter,
}

impl Prepkit {
    /// Creates a new builder.
    pub fn builder() -> PrepkitBuilder {
        PrepkitBuilder::new()
    }

    /// Runs the startup restore: resumes the session from a stored token
    /// or degrades silently to anonymous. Returns whether a session was
    /// restored.
    pub async fn start(&self) -> bool {
        self.session.restore().await
    }

    /// The session state machine.
    pub fn session(&self) -> &SessionManager<ApiClient> {
        &self.session
    }

    /// The shared notification queue.
    pub fn notifications(&self) -> &NotificationCenter {
        &self.notifications
    }

    /// The underlying HTTP client, for per-resource request wrappers
    /// built on top of the SDK.
    pub fn api(&self) -> &ApiClient {
        &self.api
    }
}
