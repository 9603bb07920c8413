use chrono::Utc;
use sea_orm::{
    ActiveValue::Set, Condition, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};
use tracing::{debug, error, info};

use super::{read_back, require_non_empty};
use crate::entities::team::{self, Entity as Team};
use crate::error::StoreError;
use crate::object_id::ObjectId;
use crate::page::{first_page, Page};

const COLLECTION: &str = "teams";

/// Input for [`TeamStore::create`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTeam {
    /// Caller-chosen id; generated when `None`
    pub id: Option<ObjectId>,
    pub name: String,
    pub description: Option<String>,
}

impl NewTeam {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_id(mut self, id: ObjectId) -> Self {
        self.id = Some(id);
        self
    }
}

/// Store for the `teams` table. Membership lives in [`super::TeamUserStore`].
#[derive(Clone)]
pub struct TeamStore {
    db: DatabaseConnection,
}

impl TeamStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, team: NewTeam) -> Result<team::Model, StoreError> {
        debug!("TeamStore::create(), name={}", team.name);

        require_non_empty(COLLECTION, "name", &team.name)?;

        let id = team.id.unwrap_or_else(ObjectId::new).to_hex();
        let model = team::ActiveModel {
            id: Set(id.clone()),
            name: Set(team.name),
            description: Set(team.description),
            created_at: Set(Utc::now()),
        };

        Team::insert(model)
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| {
                let err = StoreError::from_insert(COLLECTION, e);
                error!("Failed to create the team, error= {}", err);
                err
            })?;

        let found = Team::find_by_id(id.clone()).one(&self.db).await?;
        let inserted = read_back(found, COLLECTION, id)?;
        debug!("Success, created a new team= {:?}", inserted);

        Ok(inserted)
    }

    pub async fn find(&self, filter: Condition) -> Result<Page<team::Model>, StoreError> {
        debug!("TeamStore::find()");

        let select = Team::find()
            .filter(filter)
            .order_by_asc(team::Column::CreatedAt)
            .order_by_asc(team::Column::Id);

        let page = first_page(select, &self.db).await.map_err(|e| {
            error!("Failed to fetch teams, error= {}", e);
            StoreError::from(e)
        })?;
        info!("Fetched [{}] of [{}] teams", page.items.len(), page.total_count);

        Ok(page)
    }

    /// Plain team lookup without members; see [`crate::Expander`] for those.
    pub async fn find_by_id(&self, team_id: &str) -> Result<Option<team::Model>, StoreError> {
        debug!("TeamStore::find_by_id({})", team_id);

        let id = ObjectId::parse(team_id)?;
        let found = Team::find_by_id(id.to_hex()).one(&self.db).await?;

        if found.is_none() {
            info!("Team w/ id=[{}] not found", team_id);
        }

        Ok(found)
    }
}
