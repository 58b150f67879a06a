//! # Roster Service
//!
//! The user registration use case: input validation that reports every
//! failure at once, the email uniqueness check, full name derivation and
//! linking of existing interests and skills.

pub mod dto;
pub mod r#impl;
pub mod mappers;
pub mod registration_service;

pub use dto::*;
pub use r#impl::{RegistrationServiceComponent, RegistrationServiceImpl};
pub use registration_service::*;
