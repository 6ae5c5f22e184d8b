//! The HTTP client every request goes through.
//!
//! Two cross-cutting behaviors live here, and only here:
//!
//! 1. **Outbound**: if the token store holds a credential, it is injected
//!    as a bearer `Authorization` header. Every request, no opt-out.
//! 2. **Inbound**: an authorization-denied response (401) evicts the
//!    stored token and fires the registered unauthorized hook before the
//!    rejection is handed back to the caller.
//!
//! Everything else — which endpoint, which body, what the response means —
//! belongs to the layers above.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::{TokenStore, TransportError};

/// Callback invoked when the server denies authorization.
///
/// The hosting UI registers its hard-navigation here (the original did
/// `window.location.href = "/login"`); the transport itself stays free of
/// any navigation dependency and tests register a probe instead.
pub type UnauthorizedHook = Arc<dyn Fn() + Send + Sync>;

// ---------------------------------------------------------------------------
// ApiConfig
// ---------------------------------------------------------------------------

/// Fixed-at-construction transport settings. There is deliberately no
/// per-request override.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base address every path is joined onto, e.g.
    /// `https://api.example.com/api`.
    pub base_url: String,

    /// Total budget for a request; exceeding it fails with
    /// [`TransportError::Timeout`].
    pub timeout: Duration,

    /// Budget for establishing the connection alone.
    pub connect_timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/api".to_owned(),
            timeout: Duration::from_secs(10),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

impl ApiConfig {
    /// Config with a given base URL and default timeouts.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

// ---------------------------------------------------------------------------
// ApiClient
// ---------------------------------------------------------------------------

/// Handle to the shared HTTP client. Cheap to clone — all clones issue
/// requests through the same connection pool, token store, and hook.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: reqwest::Client,
    base_url: String,
    store: Arc<dyn TokenStore>,
    on_unauthorized: RwLock<Option<UnauthorizedHook>>,
}

impl ApiClient {
    /// Builds the client. The reqwest pool, base address, and timeouts
    /// are fixed here for the life of the client.
    pub fn new(
        config: ApiConfig,
        store: Arc<dyn TokenStore>,
    ) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(TransportError::Network)?;

        Ok(Self {
            inner: Arc::new(ClientInner {
                http,
                base_url: config.base_url.trim_end_matches('/').to_owned(),
                store,
                on_unauthorized: RwLock::new(None),
            }),
        })
    }

    /// The durable token store this client injects from.
    pub fn token_store(&self) -> Arc<dyn TokenStore> {
        Arc::clone(&self.inner.store)
    }

    /// Registers the callback fired on authorization-denied responses.
    /// Replaces any previously registered hook.
    pub fn set_unauthorized_hook(&self, hook: impl Fn() + Send + Sync + 'static) {
        let mut slot = self
            .inner
            .on_unauthorized
            .write()
            .expect("unauthorized hook lock poisoned");
        *slot = Some(Arc::new(hook));
    }

    /// `GET {base_url}{path}`.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, TransportError> {
        self.dispatch(Method::GET, path, None::<&()>).await
    }

    /// `POST {base_url}{path}` with a JSON body.
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, TransportError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.dispatch(Method::POST, path, Some(body)).await
    }

    /// `PUT {base_url}{path}` with a JSON body.
    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, TransportError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.dispatch(Method::PUT, path, Some(body)).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.inner.base_url, path)
    }

    async fn dispatch<B, T>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, TransportError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let mut request = self.inner.http.request(method.clone(), self.url(path));
        if let Some(body) = body {
            request = request.json(body);
        }

        // Outbound hook: bearer injection from durable storage. A store
        // read failure downgrades to an anonymous request rather than
        // failing the call.
        match self.inner.store.load() {
            Ok(Some(token)) => request = request.bearer_auth(token),
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(error = %e, "token load failed; sending without credentials");
            }
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                TransportError::Timeout
            } else {
                TransportError::Network(e)
            }
        })?;

        let status = response.status();
        tracing::debug!(%method, path, status = status.as_u16(), "api response");

        // Inbound hook: authorization denied. Side effects first, then the
        // rejection still reaches the caller.
        if status == StatusCode::UNAUTHORIZED {
            let detail = read_detail(response).await;
            if let Err(e) = self.inner.store.clear() {
                tracing::warn!(error = %e, "failed to evict stored token");
            }
            tracing::warn!(path, "authorization denied; stored token evicted");
            let hook = self
                .inner
                .on_unauthorized
                .read()
                .expect("unauthorized hook lock poisoned")
                .clone();
            if let Some(hook) = hook {
                hook();
            }
            return Err(TransportError::Unauthorized { detail });
        }

        if !status.is_success() {
            let detail = read_detail(response).await;
            return Err(TransportError::Api {
                status: status.as_u16(),
                detail,
            });
        }

        response.json::<T>().await.map_err(TransportError::Decode)
    }
}

/// Pulls the `{"detail": "..."}` field out of an error body, if the
/// server sent one. Validation errors carry a structured `detail` array
/// instead of a string; those surface as "no detail" rather than JSON
/// noise.
async fn read_detail(response: reqwest::Response) -> Option<String> {
    let value: serde_json::Value = response.json().await.ok()?;
    value.get("detail")?.as_str().map(str::to_owned)
}
