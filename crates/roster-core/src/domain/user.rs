//! User entity.

use super::{Gender, Interest, Skill};
use crate::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Scalar attributes supplied when registering a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAttributes {
    pub name: String,
    pub patronymic: String,
    pub surname: Option<String>,
    pub email: String,
    pub age: i32,
    pub nationality: String,
    pub country: String,
    pub gender: Gender,
}

/// A registered user.
///
/// The `validate` rules mirror the column limits of the `users` table so a
/// row the database would reject is caught before the insert is attempted.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct User {
    /// Unique identifier for the user.
    pub id: UserId,

    #[validate(length(max = 255, message = "is too long (maximum is 255 characters)"))]
    pub name: String,

    #[validate(length(max = 255, message = "is too long (maximum is 255 characters)"))]
    pub patronymic: String,

    #[validate(length(max = 255, message = "is too long (maximum is 255 characters)"))]
    pub surname: Option<String>,

    /// Unique email address, stored as submitted.
    #[validate(length(max = 255, message = "is too long (maximum is 255 characters)"))]
    pub email: String,

    #[validate(range(min = 1, max = 90, message = "must be between 1 and 90"))]
    pub age: i32,

    #[validate(length(max = 255, message = "is too long (maximum is 255 characters)"))]
    pub nationality: String,

    #[validate(length(max = 255, message = "is too long (maximum is 255 characters)"))]
    pub country: String,

    pub gender: Gender,

    /// `surname name patronymic`, surname omitted when absent.
    pub full_name: String,

    /// Linked interests, unordered and without duplicates.
    pub interests: Vec<Interest>,

    /// Linked skills, unordered and without duplicates.
    pub skills: Vec<Skill>,

    /// Account creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new, not yet persisted user with no associations.
    #[must_use]
    pub fn new(attributes: UserAttributes) -> Self {
        let full_name = build_full_name(
            attributes.surname.as_deref(),
            &attributes.name,
            &attributes.patronymic,
        );
        let now = Utc::now();

        Self {
            id: UserId::new(),
            name: attributes.name,
            patronymic: attributes.patronymic,
            surname: attributes.surname,
            email: attributes.email,
            age: attributes.age,
            nationality: attributes.nationality,
            country: attributes.country,
            gender: attributes.gender,
            full_name,
            interests: Vec::new(),
            skills: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Links interests to the user, ignoring ones already linked.
    pub fn attach_interests(&mut self, interests: impl IntoIterator<Item = Interest>) {
        for interest in interests {
            if !self.interests.iter().any(|i| i.id == interest.id) {
                self.interests.push(interest);
            }
        }
    }

    /// Links skills to the user, ignoring ones already linked.
    pub fn attach_skills(&mut self, skills: impl IntoIterator<Item = Skill>) {
        for skill in skills {
            if !self.skills.iter().any(|s| s.id == skill.id) {
                self.skills.push(skill);
            }
        }
    }
}

/// Joins surname, name and patronymic with single spaces.
///
/// A missing or blank surname is left out entirely.
#[must_use]
pub fn build_full_name(surname: Option<&str>, name: &str, patronymic: &str) -> String {
    surname
        .filter(|s| !s.trim().is_empty())
        .into_iter()
        .chain([name, patronymic])
        .collect::<Vec<_>>()
        .join(" ")
}
