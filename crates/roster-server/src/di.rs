//! Dependency injection module using Shaku.
//!
//! `RegistrationModule` holds the whole stack of one process: the MySQL
//! pool, the three repositories and the registration service on top.

use roster_core::{module, HasComponent};
use roster_repository::{
    DatabasePool, DatabasePoolInterface, InterestRepository, MySqlInterestRepository,
    MySqlSkillRepository, MySqlUserRepository, SkillRepository, UserRepository,
};
use roster_service::{RegistrationService, RegistrationServiceComponent};
use std::sync::Arc;

module! {
    pub RegistrationModule {
        components = [
            DatabasePool,
            MySqlUserRepository,
            MySqlInterestRepository,
            MySqlSkillRepository,
            RegistrationServiceComponent,
        ],
        providers = [],
    }
}

/// Builds the module around an existing pool.
#[must_use]
pub fn build_registration_module(pool: &DatabasePool) -> Arc<RegistrationModule> {
    let module = RegistrationModule::builder()
        .with_component_parameters::<DatabasePool>(pool.parameters())
        .build();

    Arc::new(module)
}

/// Resolves business services from a module.
pub trait ServiceResolver {
    fn registration_service(&self) -> Arc<dyn RegistrationService>;
}

impl ServiceResolver for RegistrationModule {
    fn registration_service(&self) -> Arc<dyn RegistrationService> {
        self.resolve()
    }
}

/// Resolves the database pool from a module.
pub trait DatabaseResolver {
    fn database_pool(&self) -> Arc<dyn DatabasePoolInterface>;
}

impl DatabaseResolver for RegistrationModule {
    fn database_pool(&self) -> Arc<dyn DatabasePoolInterface> {
        self.resolve()
    }
}

/// Resolves repositories from a module.
pub trait RepositoryResolver {
    fn user_repository(&self) -> Arc<dyn UserRepository>;

    fn interest_repository(&self) -> Arc<dyn InterestRepository>;

    fn skill_repository(&self) -> Arc<dyn SkillRepository>;
}

impl RepositoryResolver for RegistrationModule {
    fn user_repository(&self) -> Arc<dyn UserRepository> {
        self.resolve()
    }

    fn interest_repository(&self) -> Arc<dyn InterestRepository> {
        self.resolve()
    }

    fn skill_repository(&self) -> Arc<dyn SkillRepository> {
        self.resolve()
    }
}
