use crate::codec::Format;
use crate::common::errors::LabwareResult;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Rows, columns, and planned usage of a class of containers.
///
/// Bottom row and right column default to a 8 * 12 == 96-well plate.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "formats")]
pub struct Model {
    /// Bottom row, zero-padded right column, and prefix packed together
    #[sea_orm(primary_key, auto_increment = false)]
    pub format_key: String,
    pub bottom_row: String,
    pub right_column: i16,
    #[sea_orm(unique)]
    pub prefix: String,
    /// How contents should be interpreted
    #[sea_orm(column_type = "Text", unique)]
    pub purpose: String,
    /// Last container number handed out by the sequence allocator
    pub last_number: i64,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "crate::containers::models::Entity")]
    Containers,
}

impl Related<crate::containers::models::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Containers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Re-validate the stored shape.
    pub fn format(&self) -> LabwareResult<Format> {
        Format::new(
            &self.bottom_row,
            i32::from(self.right_column),
            &self.prefix,
        )
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.prefix)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FormatCreate {
    pub bottom_row: String,
    pub right_column: i32,
    pub prefix: String,
    pub purpose: String,
}

impl Default for FormatCreate {
    fn default() -> Self {
        Self {
            bottom_row: "H".to_string(),
            right_column: 12,
            prefix: String::new(),
            purpose: String::new(),
        }
    }
}
