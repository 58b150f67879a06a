//! User registration DTOs.

use chrono::{DateTime, Utc};
use roster_core::{Gender, InterestId, SkillId, UserId};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// Request to register a new user.
///
/// Every scalar is optional on the wire so that a missing field is reported
/// as a validation failure on that field rather than as a malformed body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RegisterUserRequest {
    #[serde(default)]
    #[schema(example = "Ivan")]
    pub name: Option<String>,

    #[serde(default)]
    #[schema(example = "Ivanovich")]
    pub patronymic: Option<String>,

    #[serde(default)]
    #[schema(example = "Ivanov")]
    pub surname: Option<String>,

    #[serde(default)]
    #[schema(example = "ivan@example.com")]
    pub email: Option<String>,

    #[serde(default)]
    #[schema(example = 30, minimum = 1, maximum = 90)]
    pub age: Option<i32>,

    #[serde(default)]
    #[schema(example = "Russian")]
    pub nationality: Option<String>,

    #[serde(default)]
    #[schema(example = "Russia")]
    pub country: Option<String>,

    /// `male` or `female`.
    #[serde(default)]
    #[schema(example = "male")]
    pub gender: Option<String>,

    /// Interest names, matched exactly. `null` reads as empty.
    #[serde(default, deserialize_with = "null_as_default")]
    pub interests: Vec<String>,

    /// Comma-separated skill names. `null` reads as empty.
    #[serde(default, deserialize_with = "null_as_default")]
    #[schema(example = "Ruby, Rails, SQL")]
    pub skills: String,
}

impl RegisterUserRequest {
    /// Returns the skill names listed in [`skills`](Self::skills).
    #[must_use]
    pub fn skill_names(&self) -> Vec<String> {
        parse_skill_names(&self.skills)
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Splits a comma-separated skill list into trimmed, non-empty names.
#[must_use]
pub fn parse_skill_names(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Interest linked to a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct InterestResponse {
    pub id: InterestId,
    pub name: String,
}

/// Skill linked to a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SkillResponse {
    pub id: SkillId,
    pub name: String,
}

/// Registered user.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: UserId,
    pub name: String,
    pub patronymic: String,
    pub surname: Option<String>,
    pub email: String,
    pub age: i32,
    pub nationality: String,
    pub country: String,
    pub gender: Gender,
    /// `surname name patronymic`, surname omitted when absent.
    #[schema(example = "Ivanov Ivan Ivanovich")]
    pub full_name: String,
    pub interests: Vec<InterestResponse>,
    pub skills: Vec<SkillResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skill_names_are_trimmed() {
        assert_eq!(parse_skill_names("Ruby, Rails, SQL"), vec!["Ruby", "Rails", "SQL"]);
        assert_eq!(parse_skill_names(" Ruby "), vec!["Ruby"]);
    }

    #[test]
    fn test_skill_names_drop_empty_tokens() {
        assert!(parse_skill_names("").is_empty());
        assert!(parse_skill_names(" , ,").is_empty());
        assert_eq!(parse_skill_names("Ruby,,SQL,"), vec!["Ruby", "SQL"]);
    }

    #[test]
    fn test_request_defaults() {
        let request: RegisterUserRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request, RegisterUserRequest::default());
        assert!(request.interests.is_empty());
        assert!(request.skills.is_empty());
        assert!(request.skill_names().is_empty());
    }

    #[test]
    fn test_null_lists_read_as_empty() {
        let request: RegisterUserRequest =
            serde_json::from_str(r#"{"name":"Ivan","interests":null,"skills":null}"#).unwrap();

        assert_eq!(request.name.as_deref(), Some("Ivan"));
        assert!(request.interests.is_empty());
        assert!(request.skills.is_empty());
    }

    #[test]
    fn test_request_deserializes_all_fields() {
        let request: RegisterUserRequest = serde_json::from_str(
            r#"{
                "name": "Ivan",
                "patronymic": "Ivanovich",
                "email": "ivan@example.com",
                "age": 30,
                "nationality": "Russian",
                "country": "Russia",
                "gender": "male",
                "interests": ["reading"],
                "skills": "Ruby, Rails"
            }"#,
        )
        .unwrap();

        assert_eq!(request.name.as_deref(), Some("Ivan"));
        assert!(request.surname.is_none());
        assert_eq!(request.age, Some(30));
        assert_eq!(request.interests, vec!["reading"]);
        assert_eq!(request.skill_names(), vec!["Ruby", "Rails"]);
    }
}
