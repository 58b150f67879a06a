//! # Roster Core
//!
//! Core types, traits, and error definitions for the Roster registration
//! service. This crate provides the domain model and the field-keyed error
//! collection shared by every layer above it.

pub mod domain;
pub mod error;
pub mod id;
pub mod result;
pub mod telemetry;
pub mod traits;
pub mod validation;

pub use domain::*;
pub use error::*;
pub use id::*;
pub use result::*;
pub use traits::*;
pub use validation::*;

// Re-export shaku for dependency injection
pub use shaku::{module, HasComponent, Interface};
