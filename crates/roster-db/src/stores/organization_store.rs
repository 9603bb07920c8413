use chrono::Utc;
use sea_orm::{
    ActiveValue::Set, Condition, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};
use tracing::{debug, error, info};

use super::{read_back, require_non_empty};
use crate::entities::organization::{self, Entity as Organization};
use crate::error::StoreError;
use crate::object_id::ObjectId;
use crate::page::{first_page, Page};

const COLLECTION: &str = "organizations";

/// Input for [`OrganizationStore::create`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrganization {
    pub id: Option<ObjectId>,
    pub name: String,
    /// Must be unique across organizations
    pub billing_id: String,
}

impl NewOrganization {
    pub fn new(name: impl Into<String>, billing_id: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            billing_id: billing_id.into(),
        }
    }
}

#[derive(Clone)]
pub struct OrganizationStore {
    db: DatabaseConnection,
}

impl OrganizationStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Insert an organization and return it as persisted.
    ///
    /// A reused billing id fails with [`StoreError::DuplicateKey`].
    pub async fn create(
        &self,
        organization: NewOrganization,
    ) -> Result<organization::Model, StoreError> {
        debug!("Create a new organization, name={}", organization.name);

        require_non_empty(COLLECTION, "name", &organization.name)?;

        let id = organization.id.unwrap_or_else(ObjectId::new).to_hex();
        let model = organization::ActiveModel {
            id: Set(id.clone()),
            name: Set(organization.name),
            billing_id: Set(organization.billing_id),
            created_at: Set(Utc::now()),
        };

        Organization::insert(model)
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| {
                let err = StoreError::from_insert(COLLECTION, e);
                error!("Failed to create organization, error= {}", err);
                err
            })?;

        let found = Organization::find_by_id(id.clone()).one(&self.db).await?;
        let inserted = read_back(found, COLLECTION, id)?;
        debug!("Success, created a new organization= {:?}", inserted);

        Ok(inserted)
    }

    pub async fn find(&self, filter: Condition) -> Result<Page<organization::Model>, StoreError> {
        debug!("Fetch a list of organizations");

        let select = Organization::find()
            .filter(filter)
            .order_by_asc(organization::Column::CreatedAt)
            .order_by_asc(organization::Column::Id);

        let page = first_page(select, &self.db).await.map_err(|e| {
            error!("Failed to fetch organizations, error= {}", e);
            StoreError::from(e)
        })?;
        info!(
            "Fetched [{}] of [{}] organizations",
            page.items.len(),
            page.total_count
        );

        Ok(page)
    }

    pub async fn find_by_id(
        &self,
        organization_id: &str,
    ) -> Result<Option<organization::Model>, StoreError> {
        debug!("Get organization w/ id=[{}]", organization_id);

        let id = ObjectId::parse(organization_id)?;
        let found = Organization::find_by_id(id.to_hex()).one(&self.db).await?;

        match &found {
            Some(org) => info!(
                "Fetched organization w/ id=[{}], name=[{}]",
                organization_id, org.name
            ),
            None => info!("Organization w/ id=[{}] not found", organization_id),
        }

        Ok(found)
    }
}
