//! Session state: what consumers observe.

use prepkit_types::User;

// ---------------------------------------------------------------------------
// SessionPhase
// ---------------------------------------------------------------------------

/// The coarse lifecycle state a session is in.
///
/// ```text
///   Anonymous ──(login / register / restore)──→ Authenticating
///       ↑                                            │
///       │                              success       ▼
///       ├──(logout / forced logout)──────── Authenticated
///       │                                            │
///       └────────── Error ←──(operation failure)─────┘
/// ```
///
/// Derived from the snapshot, never stored. Any in-flight operation
/// reports `Authenticating`; the loading flag is what distinguishes
/// "working on it" from a settled state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// No identity. The initial state, and the result of logout or any
    /// forced logout.
    Anonymous,
    /// An operation is in flight (login, register, profile fetch/update).
    Authenticating,
    /// Token and user record both present.
    Authenticated,
    /// The last operation failed and its message is available in
    /// [`SessionSnapshot::last_error`].
    Error,
}

// ---------------------------------------------------------------------------
// SessionSnapshot
// ---------------------------------------------------------------------------

/// A point-in-time view of the session, published on every change.
///
/// Invariants the manager maintains:
/// - `user` is never present while `token` is absent.
/// - `loading` is true exactly while one operation is in flight; it is
///   released on every exit path, including failures.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionSnapshot {
    /// The opaque access token, mirrored from durable storage.
    pub token: Option<String>,
    /// The full profile record, present iff a profile fetch has
    /// succeeded since the token was set.
    pub user: Option<User>,
    /// True while a login/register/fetch/update round trip is running.
    pub loading: bool,
    /// Human-readable failure from the most recent operation; cleared
    /// when a new operation starts.
    pub last_error: Option<String>,
}

impl SessionSnapshot {
    /// Authenticated means both halves are in place: a token to present
    /// and a user record fetched with it.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some() && self.user.is_some()
    }

    /// `"First Last"` for the signed-in user, empty otherwise.
    pub fn display_name(&self) -> String {
        self.user.as_ref().map(User::display_name).unwrap_or_default()
    }

    /// The coarse state, derived.
    pub fn phase(&self) -> SessionPhase {
        if self.loading {
            SessionPhase::Authenticating
        } else if self.is_authenticated() {
            SessionPhase::Authenticated
        } else if self.last_error.is_some() {
            SessionPhase::Error
        } else {
            SessionPhase::Anonymous
        }
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use prepkit_types::{UserProfile, UserRole};

    fn user(first: &str, last: &str) -> User {
        User {
            id: "u-1".into(),
            email: "user@example.edu".into(),
            role: UserRole::Student,
            is_active: true,
            is_verified: true,
            profile: UserProfile {
                first_name: first.into(),
                last_name: last.into(),
                ..UserProfile::default()
            },
            skills: Default::default(),
            goals: Default::default(),
            progress: Default::default(),
            created_at: chrono_epoch(),
            updated_at: chrono_epoch(),
            last_login: None,
        }
    }

    fn chrono_epoch() -> chrono::DateTime<chrono::Utc> {
        chrono::DateTime::from_timestamp(0, 0).expect("epoch is valid")
    }

    #[test]
    fn test_default_snapshot_is_anonymous() {
        let snapshot = SessionSnapshot::default();
        assert!(!snapshot.is_authenticated());
        assert_eq!(snapshot.phase(), SessionPhase::Anonymous);
        assert_eq!(snapshot.display_name(), "");
    }

    #[test]
    fn test_token_alone_is_not_authenticated() {
        // A restored token without a fetched profile is not a session.
        let snapshot = SessionSnapshot {
            token: Some("T1".into()),
            ..SessionSnapshot::default()
        };
        assert!(!snapshot.is_authenticated());
    }

    #[test]
    fn test_token_and_user_is_authenticated() {
        let snapshot = SessionSnapshot {
            token: Some("T1".into()),
            user: Some(user("Ada", "Lovelace")),
            ..SessionSnapshot::default()
        };
        assert!(snapshot.is_authenticated());
        assert_eq!(snapshot.phase(), SessionPhase::Authenticated);
    }

    #[test]
    fn test_loading_reports_authenticating() {
        let snapshot = SessionSnapshot {
            loading: true,
            ..SessionSnapshot::default()
        };
        assert_eq!(snapshot.phase(), SessionPhase::Authenticating);
    }

    #[test]
    fn test_settled_failure_reports_error() {
        let snapshot = SessionSnapshot {
            last_error: Some("Login failed".into()),
            ..SessionSnapshot::default()
        };
        assert_eq!(snapshot.phase(), SessionPhase::Error);
    }

    #[test]
    fn test_display_name_joins_profile_names() {
        let snapshot = SessionSnapshot {
            token: Some("T1".into()),
            user: Some(user("Ada", "Lovelace")),
            ..SessionSnapshot::default()
        };
        assert_eq!(snapshot.display_name(), "Ada Lovelace");
    }
}
