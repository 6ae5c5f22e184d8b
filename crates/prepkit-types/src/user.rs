//! The user record returned by the profile endpoint.
//!
//! The backend stores one document per user with four nested sections
//! (profile, skills, goals, progress). `GET /users/me` and
//! `PUT /users/me` both return the record in full — the client never
//! merges partial state, it replaces the whole thing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// UserRole
// ---------------------------------------------------------------------------

/// The role assigned to an account.
///
/// Lowercase on the wire: `"student"` / `"admin"`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// A regular learner account. The default for new registrations.
    #[default]
    Student,
    /// Platform administrator.
    Admin,
}

// ---------------------------------------------------------------------------
// Nested sections
// ---------------------------------------------------------------------------

/// Identity and contact details. Only first/last name are required at
/// registration; everything else is filled in later from the profile page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct UserProfile {
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub university: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub major: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graduation_year: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portfolio_url: Option<String>,
}

/// Skill inventory. All lists default to empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct UserSkills {
    #[serde(default)]
    pub technical_skills: Vec<String>,
    #[serde(default)]
    pub soft_skills: Vec<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub certifications: Vec<String>,
}

/// Career goals the platform tailors content towards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct UserGoals {
    #[serde(default)]
    pub target_roles: Vec<String>,
    #[serde(default)]
    pub target_companies: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub career_level: Option<String>,
    #[serde(default)]
    pub preferred_locations: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary_expectation: Option<String>,
}

/// Activity counters maintained server-side. Read-only for the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProgress {
    #[serde(default)]
    pub total_quizzes_taken: u32,
    #[serde(default)]
    pub total_challenges_completed: u32,
    #[serde(default)]
    pub total_interviews_completed: u32,
    #[serde(default)]
    pub badges_earned: Vec<String>,
    #[serde(default)]
    pub total_points: u32,
    /// Levels start at 1, not 0.
    #[serde(default = "default_level")]
    pub level: u32,
}

fn default_level() -> u32 {
    1
}

impl Default for UserProgress {
    fn default() -> Self {
        Self {
            total_quizzes_taken: 0,
            total_challenges_completed: 0,
            total_interviews_completed: 0,
            badges_earned: Vec::new(),
            total_points: 0,
            level: 1,
        }
    }
}

// ---------------------------------------------------------------------------
// User
// ---------------------------------------------------------------------------

/// The full current-user record.
///
/// The backend may serialize the identifier under `_id` (its document
/// store's key) — the alias accepts both spellings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(alias = "_id")]
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub role: UserRole,
    pub is_active: bool,
    pub is_verified: bool,
    pub profile: UserProfile,
    #[serde(default)]
    pub skills: UserSkills,
    #[serde(default)]
    pub goals: UserGoals,
    #[serde(default)]
    pub progress: UserProgress,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login: Option<DateTime<Utc>>,
}

impl User {
    /// The name shown in the UI chrome: `"First Last"`.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.profile.first_name, self.profile.last_name)
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    //! The backend defines the exact JSON shapes; these tests pin the
    //! serde attributes to them so a drift shows up here instead of as a
    //! decode failure in production.

    use super::*;

    /// A realistic `GET /users/me` payload with every section present.
    fn full_user_json() -> serde_json::Value {
        serde_json::json!({
            "id": "7f9c2ba4-e1a5-4a3b-8f2d-0123456789ab",
            "email": "ada@example.edu",
            "role": "student",
            "is_active": true,
            "is_verified": false,
            "profile": {
                "first_name": "Ada",
                "last_name": "Lovelace",
                "university": "Analytical U",
                "major": "Mathematics"
            },
            "skills": {
                "technical_skills": ["Rust", "SQL"],
                "soft_skills": [],
                "languages": ["English"],
                "certifications": []
            },
            "goals": {
                "target_roles": ["Backend Engineer"],
                "target_companies": [],
                "preferred_locations": ["Remote"]
            },
            "progress": {
                "total_quizzes_taken": 3,
                "total_challenges_completed": 1,
                "total_interviews_completed": 0,
                "badges_earned": ["first-quiz"],
                "total_points": 120,
                "level": 2
            },
            "created_at": "2024-01-15T09:30:00Z",
            "updated_at": "2024-03-02T18:00:00Z",
            "last_login": "2024-03-02T18:00:00Z"
        })
    }

    #[test]
    fn test_user_parses_full_payload() {
        let user: User = serde_json::from_value(full_user_json()).unwrap();
        assert_eq!(user.email, "ada@example.edu");
        assert_eq!(user.role, UserRole::Student);
        assert_eq!(user.skills.technical_skills, vec!["Rust", "SQL"]);
        assert_eq!(user.progress.level, 2);
        assert_eq!(user.last_login.unwrap().to_rfc3339(), "2024-03-02T18:00:00+00:00");
    }

    #[test]
    fn test_user_accepts_underscore_id_alias() {
        // The document store serializes the key as "_id".
        let mut json = full_user_json();
        let id = json["id"].take();
        json["_id"] = id;
        json.as_object_mut().unwrap().remove("id");

        let user: User = serde_json::from_value(json).unwrap();
        assert_eq!(user.id, "7f9c2ba4-e1a5-4a3b-8f2d-0123456789ab");
    }

    #[test]
    fn test_user_missing_sections_default() {
        // A freshly registered user may come back without skills/goals/
        // progress populated. Those sections default rather than failing
        // the decode.
        let json = serde_json::json!({
            "id": "u-1",
            "email": "new@example.edu",
            "is_active": true,
            "is_verified": false,
            "profile": { "first_name": "New", "last_name": "User" },
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-01T00:00:00Z"
        });
        let user: User = serde_json::from_value(json).unwrap();
        assert_eq!(user.role, UserRole::Student);
        assert!(user.skills.technical_skills.is_empty());
        assert!(user.goals.target_roles.is_empty());
        assert_eq!(user.progress.level, 1);
        assert!(user.last_login.is_none());
    }

    #[test]
    fn test_user_role_is_lowercase_on_the_wire() {
        assert_eq!(serde_json::to_string(&UserRole::Student).unwrap(), "\"student\"");
        assert_eq!(serde_json::to_string(&UserRole::Admin).unwrap(), "\"admin\"");
    }

    #[test]
    fn test_user_role_rejects_unknown_variant() {
        let result: Result<UserRole, _> = serde_json::from_str("\"wizard\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_progress_default_level_is_one() {
        let progress = UserProgress::default();
        assert_eq!(progress.level, 1);
        assert_eq!(progress.total_points, 0);
    }

    #[test]
    fn test_progress_missing_level_defaults_to_one() {
        let progress: UserProgress = serde_json::from_str("{}").unwrap();
        assert_eq!(progress.level, 1);
    }

    #[test]
    fn test_display_name_joins_first_and_last() {
        let user: User = serde_json::from_value(full_user_json()).unwrap();
        assert_eq!(user.display_name(), "Ada Lovelace");
    }

    #[test]
    fn test_profile_omits_absent_optionals() {
        // The PUT body must not send nulls for fields the user never set;
        // the backend treats missing and null differently.
        let profile = UserProfile {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            ..UserProfile::default()
        };
        let json = serde_json::to_value(&profile).unwrap();
        let obj = json.as_object().unwrap();
        assert!(obj.contains_key("first_name"));
        assert!(!obj.contains_key("phone"));
        assert!(!obj.contains_key("github_url"));
    }

    #[test]
    fn test_user_round_trip() {
        let user: User = serde_json::from_value(full_user_json()).unwrap();
        let bytes = serde_json::to_vec(&user).unwrap();
        let decoded: User = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(user, decoded);
    }
}
