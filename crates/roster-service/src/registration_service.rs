//! Registration service trait definition.

use crate::dto::{RegisterUserRequest, UserResponse};
use async_trait::async_trait;
use roster_core::{Interface, RosterResult};

/// Registration service trait.
#[async_trait]
pub trait RegistrationService: Interface + Send + Sync {
    /// Validates the request and stores a new user linked to the named
    /// interests and skills.
    ///
    /// Every failed rule is reported at once as
    /// [`roster_core::RosterError::Invalid`]; nothing is stored in that case.
    async fn register_user(&self, request: RegisterUserRequest) -> RosterResult<UserResponse>;
}
