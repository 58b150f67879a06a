//! MySQL user repository implementation.

use super::{parse_uuid, ReferenceRow};
use crate::{traits::UserRepository, DatabasePoolInterface};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use roster_core::{Gender, Interest, RosterError, RosterResult, Skill, User, UserId};
use shaku::Component;
use sqlx::{FromRow, MySql, QueryBuilder};
use std::sync::Arc;
use tracing::{debug, info};

/// MySQL user repository implementation.
#[derive(Component, Clone)]
#[shaku(interface = UserRepository)]
pub struct MySqlUserRepository {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
}

impl MySqlUserRepository {
    /// Creates a new MySQL user repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }

    async fn interests_of(&self, id: &str) -> RosterResult<Vec<Interest>> {
        let rows = sqlx::query_as::<_, ReferenceRow>(
            r#"
            SELECT i.id, i.name
            FROM interests i
            JOIN interests_users iu ON iu.interest_id = i.id
            WHERE iu.user_id = ?
            ORDER BY i.name
            "#,
        )
        .bind(id)
        .fetch_all(self.pool.inner())
        .await?;

        rows.into_iter().map(Interest::try_from).collect()
    }

    async fn skills_of(&self, id: &str) -> RosterResult<Vec<Skill>> {
        let rows = sqlx::query_as::<_, ReferenceRow>(
            r#"
            SELECT s.id, s.name
            FROM skills s
            JOIN skills_users su ON su.skill_id = s.id
            WHERE su.user_id = ?
            ORDER BY s.name
            "#,
        )
        .bind(id)
        .fetch_all(self.pool.inner())
        .await?;

        rows.into_iter().map(Skill::try_from).collect()
    }
}

/// Database row representation of a user.
#[derive(Debug, FromRow)]
struct UserRow {
    id: String, // MySQL stores UUID as CHAR(36)
    name: String,
    patronymic: String,
    surname: Option<String>,
    email: String,
    age: i32,
    nationality: String,
    country: String,
    gender: String,
    user_full_name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = RosterError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let gender: Gender = row
            .gender
            .parse()
            .map_err(|e| RosterError::Internal(format!("Invalid gender in database: {}", e)))?;

        Ok(User {
            id: UserId::from_uuid(parse_uuid(&row.id)?),
            name: row.name,
            patronymic: row.patronymic,
            surname: row.surname,
            email: row.email,
            age: row.age,
            nationality: row.nationality,
            country: row.country,
            gender,
            full_name: row.user_full_name,
            interests: Vec::new(),
            skills: Vec::new(),
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn exists_by_email(&self, email: &str) -> RosterResult<bool> {
        let result: Option<i64> = sqlx::query_scalar("SELECT 1 FROM users WHERE email = ? LIMIT 1")
            .bind(email)
            .fetch_optional(self.pool.inner())
            .await?;

        Ok(result.is_some())
    }

    async fn find_by_id(&self, id: UserId) -> RosterResult<Option<User>> {
        debug!("Finding user by id: {}", id);

        let id_str = id.into_inner().to_string();
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, patronymic, surname, email, age, nationality,
                   country, gender, user_full_name, created_at, updated_at
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(&id_str)
        .fetch_optional(self.pool.inner())
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let mut user = User::try_from(row)?;
        user.interests = self.interests_of(&id_str).await?;
        user.skills = self.skills_of(&id_str).await?;
        Ok(Some(user))
    }

    async fn create(&self, user: &User) -> RosterResult<User> {
        debug!("Creating user: {}", user.email);

        let id_str = user.id.into_inner().to_string();
        let mut tx = self.pool.inner().begin().await?;

        sqlx::query(
            r#"
            INSERT INTO users (id, name, patronymic, surname, email, age, nationality,
                               country, gender, user_full_name, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id_str)
        .bind(&user.name)
        .bind(&user.patronymic)
        .bind(&user.surname)
        .bind(&user.email)
        .bind(user.age)
        .bind(&user.nationality)
        .bind(&user.country)
        .bind(user.gender.as_str())
        .bind(&user.full_name)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&mut *tx)
        .await?;

        if !user.interests.is_empty() {
            let mut links =
                QueryBuilder::<MySql>::new("INSERT INTO interests_users (user_id, interest_id) ");
            links.push_values(&user.interests, |mut row, interest| {
                row.push_bind(id_str.clone()).push_bind(interest.id.to_string());
            });
            links.build().execute(&mut *tx).await?;
        }

        if !user.skills.is_empty() {
            let mut links =
                QueryBuilder::<MySql>::new("INSERT INTO skills_users (user_id, skill_id) ");
            links.push_values(&user.skills, |mut row, skill| {
                row.push_bind(id_str.clone()).push_bind(skill.id.to_string());
            });
            links.build().execute(&mut *tx).await?;
        }

        tx.commit().await?;

        info!(
            user_id = %user.id,
            interests = user.interests.len(),
            skills = user.skills.len(),
            "User row committed"
        );

        // MySQL doesn't support RETURNING, so insert then select
        self.find_by_id(user.id)
            .await?
            .ok_or_else(|| RosterError::Internal("Failed to fetch inserted user".to_string()))
    }

    async fn count(&self) -> RosterResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(self.pool.inner())
            .await?;

        Ok(count as u64)
    }
}

impl std::fmt::Debug for MySqlUserRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MySqlUserRepository").finish_non_exhaustive()
    }
}
