//! Wire and data types for Prepkit.
//!
//! This crate defines the shapes that travel between the client and the
//! backend API:
//!
//! - **User record** ([`User`] and its nested profile/skills/goals/progress
//!   sections) — what the profile endpoint returns.
//! - **Request bodies** ([`Credentials`], [`Registration`],
//!   [`ProfileUpdate`]) — what the auth and profile endpoints accept.
//! - **Responses** ([`TokenResponse`]) — what the login endpoint returns.
//!
//! # Architecture
//!
//! The types layer sits below everything else. It knows nothing about
//! HTTP, storage, or session state — it only describes data.
//!
//! ```text
//! Transport (requests) → Types (bodies) ← Session (state)
//! ```

mod auth;
mod user;

pub use auth::{Credentials, ProfileUpdate, Registration, TokenResponse};
pub use user::{User, UserGoals, UserProfile, UserProgress, UserRole, UserSkills};
