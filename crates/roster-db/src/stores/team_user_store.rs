use chrono::Utc;
use sea_orm::{
    ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
};
use tracing::{debug, error, info, warn};

use super::read_back;
use crate::entities::team_user::{self, Entity as TeamUser};
use crate::error::StoreError;
use crate::object_id::ObjectId;

const COLLECTION: &str = "team_users";

/// Store for the `team_users` association.
///
/// Records are never updated: moving a user means delete then create. The
/// store does not check that the referenced team or user exist.
#[derive(Clone)]
pub struct TeamUserStore {
    db: DatabaseConnection,
}

impl TeamUserStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Add a user to a team.
    ///
    /// Both ids are parsed before anything is sent to storage. A pair that
    /// already exists fails with [`StoreError::DuplicateKey`].
    pub async fn create(
        &self,
        team_id: &str,
        user_id: &str,
    ) -> Result<team_user::Model, StoreError> {
        info!("TeamUserStore::create({}, {})", team_id, user_id);

        let team = ObjectId::parse(team_id)?;
        let user = ObjectId::parse(user_id)?;

        let id = ObjectId::new().to_hex();
        let model = team_user::ActiveModel {
            id: Set(id.clone()),
            team_id: Set(team.to_hex()),
            user_id: Set(user.to_hex()),
            created_at: Set(Utc::now()),
        };

        TeamUser::insert(model)
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| {
                let err = StoreError::from_insert(COLLECTION, e);
                error!(
                    "Failed to add user=[{}] to team=[{}], error= {}",
                    user_id, team_id, err
                );
                err
            })?;

        let found = TeamUser::find_by_id(id.clone()).one(&self.db).await?;
        let inserted = read_back(found, COLLECTION, id)?;
        debug!("Success, added user=[{}] to team=[{}]", user_id, team_id);

        Ok(inserted)
    }

    /// Remove a user from a team.
    ///
    /// Returns `false` when no association matched. At most one record is
    /// removed.
    pub async fn delete(&self, team_id: &str, user_id: &str) -> Result<bool, StoreError> {
        info!("TeamUserStore::delete({}, {})", team_id, user_id);

        let team = ObjectId::parse(team_id)?;
        let user = ObjectId::parse(user_id)?;

        let Some(existing) = self.pair(team, user).await? else {
            warn!(
                "UserId=[{}] and teamId=[{}] not found in team_users",
                user_id, team_id
            );
            return Ok(false);
        };

        let result = TeamUser::delete_by_id(existing.id)
            .exec(&self.db)
            .await
            .map_err(|e| {
                error!(
                    "Failed to delete userId=[{}] from teamId=[{}], error= {}",
                    user_id, team_id, e
                );
                StoreError::from(e)
            })?;

        if result.rows_affected == 1 {
            info!("Deleted userId=[{}] from teamId=[{}]", user_id, team_id);
            Ok(true)
        } else {
            warn!(
                "UserId=[{}] and teamId=[{}] removed concurrently",
                user_id, team_id
            );
            Ok(false)
        }
    }

    /// The association for a team/user pair, if present.
    pub async fn find_by_pair(
        &self,
        team_id: &str,
        user_id: &str,
    ) -> Result<Option<team_user::Model>, StoreError> {
        let team = ObjectId::parse(team_id)?;
        let user = ObjectId::parse(user_id)?;
        self.pair(team, user).await
    }

    /// Total number of associations.
    pub async fn count(&self) -> Result<u64, StoreError> {
        Ok(TeamUser::find().count(&self.db).await?)
    }

    async fn pair(
        &self,
        team: ObjectId,
        user: ObjectId,
    ) -> Result<Option<team_user::Model>, StoreError> {
        let found = TeamUser::find()
            .filter(team_user::Column::TeamId.eq(team.to_hex()))
            .filter(team_user::Column::UserId.eq(user.to_hex()))
            .one(&self.db)
            .await?;
        Ok(found)
    }
}
