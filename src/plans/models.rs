use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A set of transfers describing what should happen.
///
/// Plans without results are the to-do list. Reworking with the same
/// containers adds to an existing plan; reworking with different containers
/// starts a new one.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "plans")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub created_by: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub assigned_to: Option<String>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::transfers::models::Entity")]
    Transfers,
}

impl Related<super::transfers::models::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transfers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "plan {}", self.id)
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PlanCreate {
    #[serde(default)]
    pub name: String,
    pub created_by: String,
    pub assigned_to: Option<String>,
}
