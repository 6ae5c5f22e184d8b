//! Request and response bodies for the auth and profile endpoints.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{UserGoals, UserProfile, UserSkills};

// ---------------------------------------------------------------------------
// Credentials
// ---------------------------------------------------------------------------

/// Body of `POST /auth/login`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Keeps the password out of logs. Debug output is the one place a
/// credential could leak into telemetry.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

/// Body of `POST /auth/register`.
///
/// First/last name are required; institution details are optional and
/// omitted from the JSON entirely when unset.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub university: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub major: Option<String>,
}

impl Registration {
    /// The login credentials embedded in this registration — used for the
    /// automatic login that follows a successful registration.
    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.email.clone(), self.password.clone())
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("university", &self.university)
            .field("major", &self.major)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// TokenResponse
// ---------------------------------------------------------------------------

/// Response of `POST /auth/login`: an opaque bearer credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    /// Always `"bearer"` today; carried for wire fidelity.
    pub token_type: String,
}

// ---------------------------------------------------------------------------
// ProfileUpdate
// ---------------------------------------------------------------------------

/// Body of `PUT /users/me`: a partial update.
///
/// Only the sections present are sent; the server applies them and
/// returns the full updated record. The client never merges locally —
/// the server's response replaces the in-memory user wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ProfileUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<UserProfile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<UserSkills>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goals: Option<UserGoals>,
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_json_shape() {
        let body = Credentials::new("ada@example.edu", "hunter2");
        let json: serde_json::Value = serde_json::to_value(&body).unwrap();
        assert_eq!(json["email"], "ada@example.edu");
        assert_eq!(json["password"], "hunter2");
    }

    #[test]
    fn test_credentials_debug_redacts_password() {
        let body = Credentials::new("ada@example.edu", "hunter2");
        let debug = format!("{body:?}");
        assert!(debug.contains("ada@example.edu"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_registration_omits_unset_optionals() {
        let body = Registration {
            email: "b@x.com".into(),
            password: "pw".into(),
            first_name: "B".into(),
            last_name: "X".into(),
            university: None,
            major: None,
        };
        let json: serde_json::Value = serde_json::to_value(&body).unwrap();
        let obj = json.as_object().unwrap();
        assert!(!obj.contains_key("university"));
        assert!(!obj.contains_key("major"));
    }

    #[test]
    fn test_registration_credentials_match_body() {
        let body = Registration {
            email: "b@x.com".into(),
            password: "pw".into(),
            first_name: "B".into(),
            last_name: "X".into(),
            university: Some("MIT".into()),
            major: None,
        };
        let creds = body.credentials();
        assert_eq!(creds.email, "b@x.com");
        assert_eq!(creds.password, "pw");
    }

    #[test]
    fn test_token_response_parses() {
        let json = r#"{"access_token": "T1", "token_type": "bearer"}"#;
        let resp: TokenResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.access_token, "T1");
        assert_eq!(resp.token_type, "bearer");
    }

    #[test]
    fn test_profile_update_empty_serializes_to_empty_object() {
        let update = ProfileUpdate::default();
        let json = serde_json::to_string(&update).unwrap();
        assert_eq!(json, "{}");
    }

    #[test]
    fn test_profile_update_sends_only_present_sections() {
        let update = ProfileUpdate {
            skills: Some(UserSkills {
                technical_skills: vec!["Rust".into()],
                ..UserSkills::default()
            }),
            ..ProfileUpdate::default()
        };
        let json: serde_json::Value = serde_json::to_value(&update).unwrap();
        let obj = json.as_object().unwrap();
        assert!(obj.contains_key("skills"));
        assert!(!obj.contains_key("profile"));
        assert!(!obj.contains_key("goals"));
    }
}
