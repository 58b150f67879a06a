//! Registration service implementations.
//!
//! This module contains the concrete implementations of service traits.
//! Trait definitions live in the parent module (e.g. `registration_service.rs`).

pub mod registration_service_impl;

pub use registration_service_impl::{RegistrationServiceComponent, RegistrationServiceImpl};
