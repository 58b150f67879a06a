//! Entity-DTO mappers.

use crate::dto::{InterestResponse, SkillResponse, UserResponse};
use roster_core::{Interest, Skill, User};

impl From<Interest> for InterestResponse {
    fn from(interest: Interest) -> Self {
        Self {
            id: interest.id,
            name: interest.name,
        }
    }
}

impl From<Skill> for SkillResponse {
    fn from(skill: Skill) -> Self {
        Self {
            id: skill.id,
            name: skill.name,
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            patronymic: user.patronymic,
            surname: user.surname,
            email: user.email,
            age: user.age,
            nationality: user.nationality,
            country: user.country,
            gender: user.gender,
            full_name: user.full_name,
            interests: user.interests.into_iter().map(InterestResponse::from).collect(),
            skills: user.skills.into_iter().map(SkillResponse::from).collect(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_core::{Gender, UserAttributes};

    #[test]
    fn test_user_response_from_user() {
        let mut user = User::new(UserAttributes {
            name: "Ivan".to_string(),
            patronymic: "Ivanovich".to_string(),
            surname: None,
            email: "ivan@example.com".to_string(),
            age: 42,
            nationality: "Russian".to_string(),
            country: "Russia".to_string(),
            gender: Gender::Male,
        });
        let reading = Interest::new("reading");
        user.attach_interests([reading.clone()]);
        user.attach_skills([Skill::new("Ruby")]);

        let response = UserResponse::from(user.clone());

        assert_eq!(response.id, user.id);
        assert_eq!(response.full_name, "Ivan Ivanovich");
        assert_eq!(response.age, 42);
        assert_eq!(
            response.interests,
            vec![InterestResponse {
                id: reading.id,
                name: "reading".to_string()
            }]
        );
        assert_eq!(response.skills[0].name, "Ruby");
    }

    #[test]
    fn test_user_response_serializes_gender_lowercase() {
        let user = User::new(UserAttributes {
            name: "Anna".to_string(),
            patronymic: "Petrovna".to_string(),
            surname: Some("Ivanova".to_string()),
            email: "anna@example.com".to_string(),
            age: 25,
            nationality: "Russian".to_string(),
            country: "Russia".to_string(),
            gender: Gender::Female,
        });

        let json = serde_json::to_value(UserResponse::from(user)).unwrap();
        assert_eq!(json["gender"], "female");
        assert_eq!(json["full_name"], "Ivanova Anna Petrovna");
    }
}
