//! Session lifecycle for Prepkit.
//!
//! This crate owns the current user's identity across the life of the
//! process:
//!
//! 1. **State** — one [`SessionSnapshot`] (token, user, loading flag,
//!    last error) published through a `watch` channel ([`SessionManager`]).
//! 2. **Operations** — `login`, `register`, `fetch_profile`,
//!    `update_profile`, `logout`, and the startup `restore`, each
//!    resolving to a success flag and recording failure detail in the
//!    snapshot rather than raising.
//! 3. **Endpoints** — the [`AuthApi`] trait seam, implemented for the
//!    transport's `ApiClient` and mocked freely in tests.
//!
//! # How it fits in the stack
//!
//! ```text
//! UI layer (above)  ← subscribes to snapshots, calls operations
//!     ↕
//! Session layer (this crate)  ← identity, token lifecycle, error state
//!     ↕
//! Transport layer (below)  ← header injection, 401 eviction, token store
//! ```

mod api;
mod manager;
mod state;

pub use api::AuthApi;
pub use manager::SessionManager;
pub use state::{SessionPhase, SessionSnapshot};
