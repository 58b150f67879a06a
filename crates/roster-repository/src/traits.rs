//! Repository trait definitions.

use async_trait::async_trait;
use roster_core::{Interest, Interface, RosterResult, Skill, User, UserId};

/// User repository trait.
#[async_trait]
pub trait UserRepository: Interface + Send + Sync {
    /// Checks if a user with exactly this email exists.
    async fn exists_by_email(&self, email: &str) -> RosterResult<bool>;

    /// Finds a user by ID, with its interests and skills.
    async fn find_by_id(&self, id: UserId) -> RosterResult<Option<User>>;

    /// Inserts the user together with its interest and skill links.
    ///
    /// The user row and both link sets are written in one transaction:
    /// either all of them are stored or none are. A duplicate email fails
    /// with [`roster_core::RosterError::Conflict`], a rejected check or
    /// foreign key with [`roster_core::RosterError::Constraint`].
    async fn create(&self, user: &User) -> RosterResult<User>;

    /// Counts all users.
    async fn count(&self) -> RosterResult<u64>;
}

/// Interest lookup.
#[async_trait]
pub trait InterestRepository: Interface + Send + Sync {
    /// Returns the interests whose name exactly equals one of `names`.
    ///
    /// Unknown names are skipped. An empty slice returns an empty list.
    async fn find_by_names(&self, names: &[String]) -> RosterResult<Vec<Interest>>;
}

/// Skill lookup.
#[async_trait]
pub trait SkillRepository: Interface + Send + Sync {
    /// Returns the skills whose name exactly equals one of `names`.
    ///
    /// Unknown names are skipped. An empty slice returns an empty list.
    async fn find_by_names(&self, names: &[String]) -> RosterResult<Vec<Skill>>;
}
