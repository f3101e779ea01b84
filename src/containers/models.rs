use crate::codec::short_code;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A container is uniquely identified by its code and has wells.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "containers")]
pub struct Model {
    /// Format key followed by the zero-padded `sequence_number`
    #[sea_orm(primary_key, auto_increment = false)]
    pub code: String,
    pub format_key: String,
    pub external_id: Option<i64>,
    /// Number encoded in `code`: the external id when given, else allocated
    pub sequence_number: i64,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::formats::models::Entity",
        from = "Column::FormatKey",
        to = "crate::formats::models::Column::FormatKey",
        on_update = "Restrict",
        on_delete = "Restrict"
    )]
    Formats,
    #[sea_orm(has_many = "crate::wells::models::Entity")]
    Wells,
}

impl Related<crate::formats::models::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Formats.def()
    }
}

impl Related<crate::wells::models::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Wells.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(short_code(&self.code))
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ContainerCreate {
    pub format_key: String,
    /// Use this number in the code instead of allocating one
    pub external_id: Option<u64>,
    /// Create every well of the format along with the container
    #[serde(default)]
    pub fill: bool,
}
