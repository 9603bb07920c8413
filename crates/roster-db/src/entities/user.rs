//! User entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Canonical hex id (primary key)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub first_name: String,

    pub last_name: String,

    /// User email (unique)
    #[sea_orm(unique)]
    pub email: String,

    /// When the user was created
    pub created_at: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// User appears in team associations
    #[sea_orm(has_many = "super::team_user::Entity")]
    TeamUsers,
}

impl Related<super::team_user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TeamUsers.def()
    }
}

/// Users reach teams through the `team_users` association.
impl Related<super::team::Entity> for Entity {
    fn to() -> RelationDef {
        super::team_user::Relation::Team.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::team_user::Relation::User.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
