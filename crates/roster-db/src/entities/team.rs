//! Team entity
//!
//! Membership is not stored on the team; it lives in `team_users`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "teams")]
pub struct Model {
    /// Canonical hex id (primary key)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Team name
    pub name: String,

    /// Free-form description (optional)
    pub description: Option<String>,

    /// When the team was created
    pub created_at: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Team appears in user associations
    #[sea_orm(has_many = "super::team_user::Entity")]
    TeamUsers,
}

impl Related<super::team_user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TeamUsers.def()
    }
}

/// Teams reach users through the `team_users` association.
impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        super::team_user::Relation::User.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::team_user::Relation::Team.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
