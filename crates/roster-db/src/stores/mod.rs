//! Entity stores and the team/user association store
//!
//! Each store owns a clone of the connection handle and touches exactly one
//! table. Build them once with [`Stores::new`] and share the bundle.

mod organization_store;
mod team_store;
mod team_user_store;
mod user_store;

pub use organization_store::{NewOrganization, OrganizationStore};
pub use team_store::{NewTeam, TeamStore};
pub use team_user_store::TeamUserStore;
pub use user_store::{NewUser, UserStore};

use sea_orm::DatabaseConnection;

use crate::error::StoreError;
use crate::expand::Expander;

/// Every store plus the expansion engine, built from one connection.
#[derive(Clone)]
pub struct Stores {
    pub users: UserStore,
    pub teams: TeamStore,
    pub organizations: OrganizationStore,
    pub team_users: TeamUserStore,
    pub expander: Expander,
}

impl Stores {
    pub fn new(db: &DatabaseConnection) -> Self {
        Self {
            users: UserStore::new(db.clone()),
            teams: TeamStore::new(db.clone()),
            organizations: OrganizationStore::new(db.clone()),
            team_users: TeamUserStore::new(db.clone()),
            expander: Expander::new(db.clone()),
        }
    }
}

pub(crate) fn require_non_empty(
    collection: &'static str,
    field: &'static str,
    value: &str,
) -> Result<(), StoreError> {
    if value.trim().is_empty() {
        return Err(StoreError::Validation { collection, field });
    }
    Ok(())
}

/// Turn a missing read-back into [`StoreError::Vanished`].
///
/// Insert and read-back are separate statements, so a concurrent delete in
/// between lands here.
pub(crate) fn read_back<M>(
    found: Option<M>,
    collection: &'static str,
    id: String,
) -> Result<M, StoreError> {
    found.ok_or(StoreError::Vanished { collection, id })
}
