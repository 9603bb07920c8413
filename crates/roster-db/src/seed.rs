//! Development fixture data
//!
//! A small, fixed data set (two teams, four users, one organization) used by
//! `roster seed` and by tests that need populated tables.

use chrono::Utc;
use sea_orm::{DatabaseConnection, EntityTrait, TransactionTrait};
use tracing::info;

use crate::entities::{organization, team, team_user, user};
use crate::error::StoreError;
use crate::object_id::ObjectId;

#[derive(Debug, Clone)]
pub struct SeedData {
    pub users: Vec<user::Model>,
    pub teams: Vec<team::Model>,
    pub team_users: Vec<team_user::Model>,
    pub organizations: Vec<organization::Model>,
}

impl SeedData {
    /// Buffalo Bills (four receivers) and Green Bay Packers (Don Beebe).
    pub fn bills() -> Self {
        let now = Utc::now();

        let user = |first: &str, last: &str, email: &str| user::Model {
            id: ObjectId::new().to_hex(),
            first_name: first.to_string(),
            last_name: last.to_string(),
            email: email.to_string(),
            created_at: now,
        };
        let users = vec![
            user("Andre", "Reed", "andre@bills.com"),
            user("Bobby", "Chandler", "bobby@bills.com"),
            user("Don", "Beebe", "don@bills.com"),
            user("James", "Lofton", "james@bills.com"),
        ];

        let team = |name: &str, description: &str| team::Model {
            id: ObjectId::new().to_hex(),
            name: name.to_string(),
            description: Some(description.to_string()),
            created_at: now,
        };
        let teams = vec![
            team("Buffalo Bills", "AFC East Champions"),
            team("Green Bay Packers", "Cheese Heads"),
        ];

        let link = |t: &team::Model, u: &user::Model| team_user::Model {
            id: ObjectId::new().to_hex(),
            team_id: t.id.clone(),
            user_id: u.id.clone(),
            created_at: now,
        };
        let mut team_users: Vec<team_user::Model> =
            users.iter().map(|u| link(&teams[0], u)).collect();
        team_users.push(link(&teams[1], &users[2]));

        let organizations = vec![organization::Model {
            id: ObjectId::new().to_hex(),
            name: "Buffalo Bills Inc.".to_string(),
            billing_id: "bills-0001".to_string(),
            created_at: now,
        }];

        Self {
            users,
            teams,
            team_users,
            organizations,
        }
    }

    pub fn user_by_email(&self, email: &str) -> Option<&user::Model> {
        self.users.iter().find(|u| u.email == email)
    }

    pub fn team_by_name(&self, name: &str) -> Option<&team::Model> {
        self.teams.iter().find(|t| t.name == name)
    }
}

/// Bulk-insert the fixture set in one transaction.
///
/// Fails with [`StoreError::DuplicateKey`] if any record already exists, in
/// which case nothing is written.
pub async fn seed(db: &DatabaseConnection, data: &SeedData) -> Result<(), StoreError> {
    let txn = db.begin().await?;

    if !data.users.is_empty() {
        user::Entity::insert_many(data.users.iter().cloned().map(user::ActiveModel::from))
            .exec_without_returning(&txn)
            .await
            .map_err(|e| StoreError::from_insert("users", e))?;
    }

    if !data.teams.is_empty() {
        team::Entity::insert_many(data.teams.iter().cloned().map(team::ActiveModel::from))
            .exec_without_returning(&txn)
            .await
            .map_err(|e| StoreError::from_insert("teams", e))?;
    }

    if !data.team_users.is_empty() {
        team_user::Entity::insert_many(
            data.team_users
                .iter()
                .cloned()
                .map(team_user::ActiveModel::from),
        )
        .exec_without_returning(&txn)
        .await
        .map_err(|e| StoreError::from_insert("team_users", e))?;
    }

    if !data.organizations.is_empty() {
        organization::Entity::insert_many(
            data.organizations
                .iter()
                .cloned()
                .map(organization::ActiveModel::from),
        )
        .exec_without_returning(&txn)
        .await
        .map_err(|e| StoreError::from_insert("organizations", e))?;
    }

    txn.commit().await?;

    info!(
        "Seeded [{}] users, [{}] teams, [{}] team_users, [{}] organizations",
        data.users.len(),
        data.teams.len(),
        data.team_users.len(),
        data.organizations.len()
    );

    Ok(())
}
