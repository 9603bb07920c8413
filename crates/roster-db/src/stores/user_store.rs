use chrono::Utc;
use sea_orm::{
    ActiveValue::Set, Condition, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};
use tracing::{debug, error, info};

use super::{read_back, require_non_empty};
use crate::entities::user::{self, Entity as User};
use crate::error::StoreError;
use crate::object_id::ObjectId;
use crate::page::{first_page, Page};

const COLLECTION: &str = "users";

/// Input for [`UserStore::create`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// Caller-chosen id; generated when `None`
    pub id: Option<ObjectId>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl NewUser {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
        }
    }

    pub fn with_id(mut self, id: ObjectId) -> Self {
        self.id = Some(id);
        self
    }
}

/// Store for the `users` table
#[derive(Clone)]
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Insert a user and return it as persisted.
    ///
    /// Fails with [`StoreError::DuplicateKey`] when the email is taken.
    pub async fn create(&self, user: NewUser) -> Result<user::Model, StoreError> {
        debug!("UserStore::create(), email={}", user.email);

        require_non_empty(COLLECTION, "first_name", &user.first_name)?;
        require_non_empty(COLLECTION, "last_name", &user.last_name)?;
        require_non_empty(COLLECTION, "email", &user.email)?;

        let id = user.id.unwrap_or_else(ObjectId::new).to_hex();
        let model = user::ActiveModel {
            id: Set(id.clone()),
            first_name: Set(user.first_name),
            last_name: Set(user.last_name),
            email: Set(user.email),
            created_at: Set(Utc::now()),
        };

        User::insert(model)
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| {
                let err = StoreError::from_insert(COLLECTION, e);
                error!("Failed to create user, error= {}", err);
                err
            })?;

        let found = User::find_by_id(id.clone()).one(&self.db).await?;
        let inserted = read_back(found, COLLECTION, id)?;
        debug!("Success, created a new user= {:?}", inserted);

        Ok(inserted)
    }

    /// First page of users matching `filter`, plus the full match count.
    pub async fn find(&self, filter: Condition) -> Result<Page<user::Model>, StoreError> {
        debug!("UserStore::find()");

        let select = User::find()
            .filter(filter)
            .order_by_asc(user::Column::CreatedAt)
            .order_by_asc(user::Column::Id);

        let page = first_page(select, &self.db).await.map_err(|e| {
            error!("Failed to fetch users, error= {}", e);
            StoreError::from(e)
        })?;
        info!("Fetched [{}] of [{}] users", page.items.len(), page.total_count);

        Ok(page)
    }

    /// Look a user up by its hex id. `Ok(None)` means no such user.
    pub async fn find_by_id(&self, user_id: &str) -> Result<Option<user::Model>, StoreError> {
        debug!("UserStore::find_by_id({})", user_id);

        let id = ObjectId::parse(user_id)?;
        let found = User::find_by_id(id.to_hex()).one(&self.db).await?;

        match &found {
            Some(user) => info!("Fetched user w/ id=[{}], email=[{}]", user_id, user.email),
            None => info!("User w/ id=[{}] not found", user_id),
        }

        Ok(found)
    }
}
