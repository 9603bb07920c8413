//! Relationship expansion
//!
//! Rebuilds a team's member list or a user's team list from the
//! `team_users` association. Each expansion is a single statement:
//!
//! ```text
//! teams  LEFT JOIN team_users ON team_users.team_id = teams.id
//!        LEFT JOIN users      ON users.id = team_users.user_id
//! WHERE  teams.id = ?
//! ORDER  BY teams.id, team_users.created_at, team_users.id
//! ```
//!
//! so the root and its related records come from one snapshot, with no
//! per-member round trips. The related list follows the order the
//! associations were created. Associations pointing at a missing record are
//! skipped.

use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};
use serde::Serialize;
use tracing::{debug, error, info};

use crate::entities::{team, team_user, user};
use crate::error::StoreError;
use crate::object_id::ObjectId;

/// A team with the full records of its members. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamWithUsers {
    #[serde(flatten)]
    pub team: team::Model,
    pub users: Vec<user::Model>,
}

/// A user with the full records of the teams it belongs to. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserWithTeams {
    #[serde(flatten)]
    pub user: user::Model,
    pub teams: Vec<team::Model>,
}

/// Read-only join engine over teams, users and their associations.
#[derive(Clone)]
pub struct Expander {
    db: DatabaseConnection,
}

impl Expander {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// The team with every associated user attached.
    ///
    /// `Ok(None)` when the team does not exist; a team without members comes
    /// back with an empty `users` list.
    pub async fn team_with_users(
        &self,
        team_id: &str,
    ) -> Result<Option<TeamWithUsers>, StoreError> {
        debug!("Expander::team_with_users({})", team_id);

        let id = ObjectId::parse(team_id)?;
        let rows = team::Entity::find_by_id(id.to_hex())
            .find_with_related(user::Entity)
            .order_by_asc(team_user::Column::CreatedAt)
            .order_by_asc(team_user::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to fetch team w/ id=[{}], error= {}", team_id, e);
                StoreError::from(e)
            })?;

        let expanded = rows
            .into_iter()
            .next()
            .map(|(team, users)| TeamWithUsers { team, users });

        match &expanded {
            Some(found) => info!(
                "Fetched team w/ id=[{}], name=[{}], users=[{}]",
                team_id,
                found.team.name,
                found.users.len()
            ),
            None => info!("Team w/ id=[{}] not found", team_id),
        }

        Ok(expanded)
    }

    /// The user with every team it is associated with attached.
    ///
    /// `Ok(None)` when the user does not exist.
    pub async fn user_with_teams(
        &self,
        user_id: &str,
    ) -> Result<Option<UserWithTeams>, StoreError> {
        debug!("Expander::user_with_teams({})", user_id);

        let id = ObjectId::parse(user_id)?;
        let rows = user::Entity::find_by_id(id.to_hex())
            .find_with_related(team::Entity)
            .order_by_asc(team_user::Column::CreatedAt)
            .order_by_asc(team_user::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| {
                error!(
                    "Failed to find teams for userId=[{}], error= {}",
                    user_id, e
                );
                StoreError::from(e)
            })?;

        let expanded = rows
            .into_iter()
            .next()
            .map(|(user, teams)| UserWithTeams { user, teams });

        match &expanded {
            Some(found) => info!(
                "Fetched teams for user w/ id=[{}], teams=[{}]",
                user_id,
                found.teams.len()
            ),
            None => info!("User w/ id=[{}] not found", user_id),
        }

        Ok(expanded)
    }
}
