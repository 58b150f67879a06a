//! MySQL interest repository implementation.

use super::{fetch_by_names, parse_uuid, ReferenceRow};
use crate::{traits::InterestRepository, DatabasePoolInterface};
use async_trait::async_trait;
use roster_core::{Interest, InterestId, RosterError, RosterResult};
use shaku::Component;
use std::sync::Arc;
use tracing::debug;

/// MySQL interest repository implementation.
#[derive(Component, Clone)]
#[shaku(interface = InterestRepository)]
pub struct MySqlInterestRepository {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
}

impl MySqlInterestRepository {
    /// Creates a new MySQL interest repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

impl TryFrom<ReferenceRow> for Interest {
    type Error = RosterError;

    fn try_from(row: ReferenceRow) -> Result<Self, Self::Error> {
        Ok(Interest {
            id: InterestId::from_uuid(parse_uuid(&row.id)?),
            name: row.name,
        })
    }
}

#[async_trait]
impl InterestRepository for MySqlInterestRepository {
    async fn find_by_names(&self, names: &[String]) -> RosterResult<Vec<Interest>> {
        debug!("Finding interests by name: {:?}", names);

        fetch_by_names(self.pool.inner(), "interests", names)
            .await?
            .into_iter()
            .map(Interest::try_from)
            .collect()
    }
}

impl std::fmt::Debug for MySqlInterestRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MySqlInterestRepository").finish_non_exhaustive()
    }
}
