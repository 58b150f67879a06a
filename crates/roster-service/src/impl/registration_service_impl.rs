//! Registration service implementations.

use crate::dto::{RegisterUserRequest, UserResponse};
use crate::registration_service::RegistrationService;
use async_trait::async_trait;
use roster_core::validation::{codes, messages, rules};
use roster_core::{FieldErrors, Gender, RosterError, RosterResult, User, UserAttributes};
use roster_repository::{InterestRepository, SkillRepository, UserRepository};
use shaku::Component;
use std::sync::Arc;
use tracing::{debug, info, warn};
use validator::Validate;

/// Generic registration service implementation (non-DI).
pub struct RegistrationServiceImpl<U, I, S>
where
    U: UserRepository,
    I: InterestRepository,
    S: SkillRepository,
{
    user_repository: Arc<U>,
    interest_repository: Arc<I>,
    skill_repository: Arc<S>,
}

impl<U, I, S> RegistrationServiceImpl<U, I, S>
where
    U: UserRepository,
    I: InterestRepository,
    S: SkillRepository,
{
    /// Creates a new registration service.
    pub fn new(user_repository: Arc<U>, interest_repository: Arc<I>, skill_repository: Arc<S>) -> Self {
        Self {
            user_repository,
            interest_repository,
            skill_repository,
        }
    }
}

#[async_trait]
impl<U, I, S> RegistrationService for RegistrationServiceImpl<U, I, S>
where
    U: UserRepository + 'static,
    I: InterestRepository + 'static,
    S: SkillRepository + 'static,
{
    async fn register_user(&self, request: RegisterUserRequest) -> RosterResult<UserResponse> {
        let registrar = Registrar {
            users: &*self.user_repository,
            interests: &*self.interest_repository,
            skills: &*self.skill_repository,
        };
        registrar.register(request).await.map(UserResponse::from)
    }
}

/// Registration service implementation resolved through the DI module.
#[derive(Component)]
#[shaku(interface = RegistrationService)]
pub struct RegistrationServiceComponent {
    #[shaku(inject)]
    user_repository: Arc<dyn UserRepository>,
    #[shaku(inject)]
    interest_repository: Arc<dyn InterestRepository>,
    #[shaku(inject)]
    skill_repository: Arc<dyn SkillRepository>,
}

#[async_trait]
impl RegistrationService for RegistrationServiceComponent {
    async fn register_user(&self, request: RegisterUserRequest) -> RosterResult<UserResponse> {
        let registrar = Registrar {
            users: &*self.user_repository,
            interests: &*self.interest_repository,
            skills: &*self.skill_repository,
        };
        registrar.register(request).await.map(UserResponse::from)
    }
}

impl std::fmt::Debug for RegistrationServiceComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistrationServiceComponent").finish_non_exhaustive()
    }
}

/// The registration use case over borrowed repositories.
struct Registrar<'a> {
    users: &'a dyn UserRepository,
    interests: &'a dyn InterestRepository,
    skills: &'a dyn SkillRepository,
}

impl Registrar<'_> {
    async fn register(&self, request: RegisterUserRequest) -> RosterResult<User> {
        debug!(email = ?request.email, "Registering user");

        let attributes = self.validate(&request).await?;
        let mut user = User::new(attributes);

        if let Err(entity_errors) = user.validate() {
            let mut errors = FieldErrors::new();
            errors.merge_validator_errors(&entity_errors);
            debug!(%errors, "User entity rejected");
            return Err(RosterError::Invalid(errors));
        }

        user.attach_interests(self.interests.find_by_names(&request.interests).await?);
        user.attach_skills(self.skills.find_by_names(&request.skill_names()).await?);

        let saved = self.users.create(&user).await.map_err(storage_rejection)?;

        info!(
            user_id = %saved.id,
            interests = saved.interests.len(),
            skills = saved.skills.len(),
            "User registered"
        );
        Ok(saved)
    }

    /// Runs every input rule and the uniqueness check, collecting all
    /// failures before deciding.
    async fn validate(&self, request: &RegisterUserRequest) -> RosterResult<UserAttributes> {
        let mut errors = FieldErrors::new();

        let email = request.email.as_deref();
        let gender = request.gender.as_deref();

        errors.check("name", rules::present(request.name.as_deref()));
        errors.check("patronymic", rules::present(request.patronymic.as_deref()));
        errors.check("email", rules::present(email));
        errors.check("email", rules::email_format(email.unwrap_or_default()));
        errors.check("age", rules::age(request.age));
        errors.check("nationality", rules::present(request.nationality.as_deref()));
        errors.check("country", rules::present(request.country.as_deref()));
        errors.check("gender", rules::present(gender));
        errors.check(
            "gender",
            rules::inclusion(gender.unwrap_or_default(), &Gender::VALUES),
        );

        if let Some(email) = email.filter(|e| !e.trim().is_empty()) {
            if self.users.exists_by_email(email).await? {
                errors.add("email", codes::TAKEN, messages::TAKEN);
            }
        }

        if !errors.is_empty() {
            debug!(%errors, "Registration rejected");
        }
        errors.into_result()?;

        let gender = gender
            .unwrap_or_default()
            .parse::<Gender>()
            .map_err(|_| {
                RosterError::Invalid(FieldErrors::single(
                    "gender",
                    codes::INCLUSION,
                    messages::INCLUSION,
                ))
            })?;

        Ok(UserAttributes {
            name: request.name.clone().unwrap_or_default(),
            patronymic: request.patronymic.clone().unwrap_or_default(),
            surname: request.surname.clone(),
            email: request.email.clone().unwrap_or_default(),
            age: request.age.unwrap_or_default(),
            nationality: request.nationality.clone().unwrap_or_default(),
            country: request.country.clone().unwrap_or_default(),
            gender,
        })
    }
}

/// Folds storage-level rejections into field errors.
///
/// A unique-key conflict means another registration claimed the email after
/// the existence check passed.
fn storage_rejection(err: RosterError) -> RosterError {
    match err {
        RosterError::Conflict(message) => {
            warn!(%message, "Email claimed concurrently");
            RosterError::Invalid(FieldErrors::single("email", codes::TAKEN, messages::TAKEN))
        }
        RosterError::Constraint(message) => {
            warn!(%message, "Storage rejected user");
            let mut errors = FieldErrors::new();
            errors.add_base(message);
            RosterError::Invalid(errors)
        }
        other => other,
    }
}
