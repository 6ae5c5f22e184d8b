//! # Prepkit
//!
//! Client session and feedback SDK for the Prepkit career-preparation
//! platform.
//!
//! Prepkit keeps the authenticated user's identity and access token alive
//! across restarts, attaches the token to every outgoing request, reacts
//! to authorization failures with a forced logout, and owns the transient
//! notification queue the UI renders.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use prepkit::prelude::*;
//!
//! # async fn run() -> Result<(), TransportError> {
//! let app = Prepkit::builder()
//!     .base_url("https://api.prepkit.dev/api")
//!     .on_unauthorized(|| { /* hard-navigate to /login */ })
//!     .build()?;
//!
//! // Resume the previous session, if a token survived.
//! app.start().await;
//!
//! if app.session().login("ada@example.edu", "hunter2").await {
//!     app.notifications().success("Welcome back!");
//! } else if let Some(reason) = app.session().snapshot().last_error {
//!     app.notifications().error(reason);
//! }
//! # Ok(())
//! # }
//! ```

mod client;

pub use client::{Prepkit, PrepkitBuilder};

/// One-stop imports for embedding the SDK.
pub mod prelude {
    pub use crate::{Prepkit, PrepkitBuilder};
    pub use prepkit_notify::{
        Notification, NotificationCenter, NotificationId, NotificationKind, NotificationSpec,
    };
    pub use prepkit_session::{AuthApi, SessionManager, SessionPhase, SessionSnapshot};
    pub use prepkit_transport::{
        ApiClient, ApiConfig, FileTokenStore, MemoryTokenStore, TokenStore, TransportError,
    };
    pub use prepkit_types::{
        Credentials, ProfileUpdate, Registration, TokenResponse, User, UserGoals, UserProfile,
        UserProgress, UserRole, UserSkills,
    };
}
