//! The session manager: the one owner of session state.
//!
//! All reads go through [`SessionManager::snapshot`] or a
//! [`SessionManager::subscribe`] receiver; all writes happen inside the
//! operations below. There is no other way to touch the state — no
//! ambient globals.
//!
//! # Operation lifecycle
//!
//! Every operation draws a sequence number when it starts and marks the
//! session as loading. When its network round trip resolves, the result
//! is applied only if no newer operation has started in the meantime;
//! a superseded result is discarded wholesale (no state change, no
//! storage write). The operation that currently owns the sequence number
//! is also the one that releases the loading flag — on success and on
//! failure alike.
//!
//! ```text
//! login() ──→ POST /auth/login ──→ store token ──→ GET /users/me ──→ Authenticated
//!                  │                                    │
//!                  ▼                                    ▼
//!            last_error set                   reset to Anonymous
//!            (token untouched)              (issued token discarded)
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use prepkit_transport::{TokenStore, TransportError};
use prepkit_types::{Credentials, ProfileUpdate, Registration};
use tokio::sync::watch;

use crate::{AuthApi, SessionSnapshot};

/// Owns the session snapshot and runs the lifecycle operations against a
/// backend implementation of [`AuthApi`].
///
/// Operations never raise: each resolves to a `bool` and records failure
/// detail in the snapshot's `last_error`. Callers decide whether a
/// failure also deserves a notification.
pub struct SessionManager<A: AuthApi> {
    api: A,
    store: Arc<dyn TokenStore>,

    /// The single owner of the observable state. `send_modify` makes
    /// every mutation one whole step for subscribers.
    state: watch::Sender<SessionSnapshot>,

    /// Sequence number of the most recently issued operation. A
    /// completion compares against this to detect that it has been
    /// superseded.
    ops: AtomicU64,
}

impl<A: AuthApi> SessionManager<A> {
    /// Creates a manager starting anonymous. Call
    /// [`restore`](Self::restore) afterwards to resume a stored session.
    pub fn new(api: A, store: Arc<dyn TokenStore>) -> Self {
        Self {
            api,
            store,
            state: watch::Sender::new(SessionSnapshot::default()),
            ops: AtomicU64::new(0),
        }
    }

    // -- Observation --------------------------------------------------------

    /// A point-in-time copy of the session state.
    pub fn snapshot(&self) -> SessionSnapshot {
        self.state.borrow().clone()
    }

    /// Subscribes to state changes. Every mutation is observed as one
    /// whole snapshot, in order.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.state.subscribe()
    }

    // -- Operations ---------------------------------------------------------

    /// Exchanges credentials for a token, persists it, and fetches the
    /// profile. Succeeds only if both round trips succeed; a token that
    /// was issued but whose profile fetch failed is discarded rather than
    /// leaving the session half-authenticated. A failure before any token
    /// was issued leaves a previously stored token untouched.
    pub async fn login(&self, email: &str, password: &str) -> bool {
        let op = self.begin_op();
        let credentials = Credentials::new(email, password);

        let token = match self.api.login(&credentials).await {
            Ok(response) => response.access_token,
            Err(e) => {
                tracing::warn!(error = %e, "login failed");
                let message = error_message(&e, "Login failed");
                self.apply(op, |s| s.last_error = Some(message));
                return false;
            }
        };

        // A superseded login must not touch durable storage either — the
        // newer operation owns it now.
        if !self.is_current(op) {
            tracing::debug!(op, "superseded login; discarding issued token");
            return false;
        }
        if let Err(e) = self.store.store(&token) {
            tracing::warn!(error = %e, "failed to persist token");
        }
        self.state.send_modify(|s| s.token = Some(token));

        match self.api.fetch_profile().await {
            Ok(user) => {
                let applied = self.apply(op, |s| s.user = Some(user));
                if applied {
                    tracing::info!("login succeeded");
                }
                applied
            }
            Err(e) => {
                tracing::warn!(error = %e, "profile fetch after login failed; resetting to anonymous");
                if !self.is_current(op) {
                    return false;
                }
                let message = error_message(&e, "Failed to fetch user profile");
                self.clear_store();
                self.apply(op, |s| {
                    s.token = None;
                    s.user = None;
                    s.last_error = Some(message);
                });
                false
            }
        }
    }

    /// Creates the account, then immediately logs in with the same
    /// credentials. The login owns the overall outcome; a registration
    /// failure (duplicate email, validation) short-circuits with the
    /// server's detail message and never attempts the login.
    pub async fn register(&self, registration: &Registration) -> bool {
        let op = self.begin_op();

        if let Err(e) = self.api.register(registration).await {
            tracing::warn!(error = %e, "registration failed");
            let message = error_message(&e, "Registration failed");
            self.apply(op, |s| s.last_error = Some(message));
            return false;
        }

        tracing::info!("registration accepted; logging in");
        self.login(&registration.email, &registration.password).await
    }

    /// Refetches the current-user record, replacing the in-memory copy in
    /// full. Requires a token; any failure forces a logout — a session is
    /// never left claiming authentication with a stale or absent user.
    pub async fn fetch_profile(&self) -> bool {
        if self.state.borrow().token.is_none() {
            tracing::warn!("fetch_profile called without a token");
            return false;
        }
        let op = self.begin_op();

        match self.api.fetch_profile().await {
            Ok(user) => self.apply(op, |s| s.user = Some(user)),
            Err(e) => {
                tracing::warn!(error = %e, "profile fetch failed; forcing logout");
                if !self.is_current(op) {
                    return false;
                }
                self.clear_store();
                self.apply(op, |s| {
                    s.token = None;
                    s.user = None;
                    s.last_error = None;
                });
                false
            }
        }
    }

    /// Sends a partial profile update. On success the server's returned
    /// record replaces the in-memory user wholesale (the server is
    /// authoritative — no local merge); on failure the existing record is
    /// left untouched and the detail recorded.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> bool {
        if !self.state.borrow().is_authenticated() {
            tracing::warn!("update_profile requires an authenticated session");
            return false;
        }
        let op = self.begin_op();

        match self.api.update_profile(update).await {
            Ok(user) => self.apply(op, |s| s.user = Some(user)),
            Err(e) => {
                tracing::warn!(error = %e, "profile update failed");
                let message = error_message(&e, "Profile update failed");
                self.apply(op, |s| s.last_error = Some(message));
                false
            }
        }
    }

    /// Clears the session: token (memory and durable storage — which is
    /// also what stops the auth-header injection), user, and error.
    /// Never fails, callable from any state, and supersedes any in-flight
    /// operation so its late completion is discarded.
    pub fn logout(&self) {
        self.ops.fetch_add(1, Ordering::SeqCst);
        self.clear_store();
        self.state.send_modify(|s| {
            s.token = None;
            s.user = None;
            s.last_error = None;
            s.loading = false;
        });
        tracing::info!("session cleared");
    }

    /// The startup path: if durable storage holds a token, try to resume
    /// the session by fetching the profile. Degrades silently to
    /// anonymous on any failure (clearing the bad token) — the user took
    /// no action, so no error is surfaced.
    pub async fn restore(&self) -> bool {
        let token = match self.store.load() {
            Ok(Some(token)) => token,
            Ok(None) => {
                tracing::debug!("no stored token; starting anonymous");
                return false;
            }
            Err(e) => {
                tracing::warn!(error = %e, "token store unreadable; starting anonymous");
                return false;
            }
        };

        let op = self.begin_op();
        self.state.send_modify(|s| s.token = Some(token));

        match self.api.fetch_profile().await {
            Ok(user) => {
                let applied = self.apply(op, |s| s.user = Some(user));
                if applied {
                    tracing::info!("session restored from stored token");
                }
                applied
            }
            Err(e) => {
                tracing::info!(error = %e, "stored token rejected; starting anonymous");
                if !self.is_current(op) {
                    return false;
                }
                self.clear_store();
                self.apply(op, |s| {
                    s.token = None;
                    s.user = None;
                    s.last_error = None;
                });
                false
            }
        }
    }

    // -- Sequencing helpers ---------------------------------------------------

    /// Starts an operation: bumps the sequence number, raises the loading
    /// flag, clears the previous error.
    fn begin_op(&self) -> u64 {
        let op = self.ops.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.send_modify(|s| {
            s.loading = true;
            s.last_error = None;
        });
        op
    }

    fn is_current(&self, op: u64) -> bool {
        self.ops.load(Ordering::SeqCst) == op
    }

    /// Applies an operation's outcome unless it has been superseded, and
    /// releases the loading flag with it. This is the guaranteed-release
    /// point: every operation funnels each exit path through here (or
    /// returns before mutating anything).
    fn apply(&self, op: u64, outcome: impl FnOnce(&mut SessionSnapshot)) -> bool {
        if !self.is_current(op) {
            tracing::debug!(op, "superseded operation; result discarded");
            return false;
        }
        self.state.send_modify(|s| {
            outcome(s);
            s.loading = false;
        });
        true
    }

    fn clear_store(&self) {
        if let Err(e) = self.store.clear() {
            tracing::warn!(error = %e, "failed to clear stored token");
        }
    }
}

/// The server's detail message when it sent one, else the operation's
/// generic fallback. Network and timeout failures never surface raw
/// error internals to the user.
fn error_message(error: &TransportError, fallback: &str) -> String {
    error
        .detail()
        .map(str::to_owned)
        .unwrap_or_else(|| fallback.to_owned())
}
