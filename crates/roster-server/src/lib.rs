//! # Roster Server Library
//!
//! Wires configuration, the database pool, the Shaku module and the HTTP
//! router into a runnable [`app::Application`].

pub mod app;
pub mod di;
pub mod startup;
