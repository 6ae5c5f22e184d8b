//! The typed endpoint seam between the session manager and the backend.
//!
//! The manager never touches HTTP directly — it calls this trait. The
//! real implementation lives on the transport's `ApiClient`; tests
//! substitute a scripted mock and exercise the full state machine without
//! a server.

use std::future::Future;

use prepkit_transport::{ApiClient, TransportError};
use prepkit_types::{Credentials, ProfileUpdate, Registration, TokenResponse, User};

/// The four backend operations the session lifecycle is built on.
///
/// # Trait bounds
///
/// `Send + Sync + 'static` so one implementation can be shared across
/// async tasks for the life of the process, and the returned futures are
/// `Send` so operations can run on any runtime thread.
pub trait AuthApi: Send + Sync + 'static {
    /// Exchanges credentials for an opaque access token.
    fn login(
        &self,
        credentials: &Credentials,
    ) -> impl Future<Output = Result<TokenResponse, TransportError>> + Send;

    /// Creates an account. Succeeding is all that matters — the caller
    /// follows up with a fresh [`login`](Self::login) rather than trusting
    /// the registration response body.
    fn register(
        &self,
        registration: &Registration,
    ) -> impl Future<Output = Result<(), TransportError>> + Send;

    /// Fetches the full current-user record.
    fn fetch_profile(&self) -> impl Future<Output = Result<User, TransportError>> + Send;

    /// Applies a partial update and returns the full updated record.
    fn update_profile(
        &self,
        update: &ProfileUpdate,
    ) -> impl Future<Output = Result<User, TransportError>> + Send;
}

impl AuthApi for ApiClient {
    async fn login(&self, credentials: &Credentials) -> Result<TokenResponse, TransportError> {
        self.post("/auth/login", credentials).await
    }

    async fn register(&self, registration: &Registration) -> Result<(), TransportError> {
        // The created record comes back in the body; it is decoded loosely
        // and dropped. Success gates the auto-login that follows.
        let _: serde_json::Value = self.post("/auth/register", registration).await?;
        Ok(())
    }

    async fn fetch_profile(&self) -> Result<User, TransportError> {
        self.get("/users/me").await
    }

    async fn update_profile(&self, update: &ProfileUpdate) -> Result<User, TransportError> {
        self.put("/users/me", update).await
    }
}
