//! Organization entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "organizations")]
pub struct Model {
    /// Canonical hex id (primary key)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Company name
    pub name: String,

    /// Billing account reference (unique)
    #[sea_orm(unique)]
    pub billing_id: String,

    /// When the organization was created
    pub created_at: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
