//! Reference records a user can be linked to.
//!
//! Interests and skills are created outside the registration flow and are
//! only ever looked up by exact name.

use crate::{InterestId, SkillId};
use serde::{Deserialize, Serialize};

/// A named interest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interest {
    pub id: InterestId,
    pub name: String,
}

impl Interest {
    /// Creates a new interest with a fresh ID.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: InterestId::new(),
            name: name.into(),
        }
    }
}

/// A named skill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub id: SkillId,
    pub name: String,
}

impl Skill {
    /// Creates a new skill with a fresh ID.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: SkillId::new(),
            name: name.into(),
        }
    }
}
