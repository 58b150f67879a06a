//! MySQL skill repository implementation.

use super::{fetch_by_names, parse_uuid, ReferenceRow};
use crate::{traits::SkillRepository, DatabasePoolInterface};
use async_trait::async_trait;
use roster_core::{RosterError, RosterResult, Skill, SkillId};
use shaku::Component;
use std::sync::Arc;
use tracing::debug;

/// MySQL skill repository implementation.
#[derive(Component, Clone)]
#[shaku(interface = SkillRepository)]
pub struct MySqlSkillRepository {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
}

impl MySqlSkillRepository {
    /// Creates a new MySQL skill repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

impl TryFrom<ReferenceRow> for Skill {
    type Error = RosterError;

    fn try_from(row: ReferenceRow) -> Result<Self, Self::Error> {
        Ok(Skill {
            id: SkillId::from_uuid(parse_uuid(&row.id)?),
            name: row.name,
        })
    }
}

#[async_trait]
impl SkillRepository for MySqlSkillRepository {
    async fn find_by_names(&self, names: &[String]) -> RosterResult<Vec<Skill>> {
        debug!("Finding skills by name: {:?}", names);

        fetch_by_names(self.pool.inner(), "skills", names)
            .await?
            .into_iter()
            .map(Skill::try_from)
            .collect()
    }
}

impl std::fmt::Debug for MySqlSkillRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MySqlSkillRepository").finish_non_exhaustive()
    }
}
