use crate::codec::{LABEL_COLUMN_WIDTH, compose_key, short_code};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of multiple positions on a plate, or the single position of a vial,
/// tube, or trough.
///
/// Positions are stored and displayed in Battleship notation: one row letter
/// beginning with `A`, then the column zero padded to two digits beginning
/// with `01`.
///
/// | container          | labels      |
/// |--------------------|-------------|
/// | vial, tube, trough | `A01`       |
/// | 6-well plate       | `A01`-`B03` |
/// | 24-well plate      | `A01`-`D06` |
/// | 96-well plate      | `A01`-`H12` |
/// | 384-well plate     | `A01`-`P24` |
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "wells")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub container_code: String,
    pub row_letter: String,
    pub column_number: i16,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::containers::models::Entity",
        from = "Column::ContainerCode",
        to = "crate::containers::models::Column::Code",
        on_update = "Restrict",
        on_delete = "Restrict"
    )]
    Containers,
}

impl Related<crate::containers::models::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Containers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Battleship label (`A01`)
    pub fn label(&self) -> String {
        format!(
            "{}{:0width$}",
            self.row_letter,
            self.column_number,
            width = LABEL_COLUMN_WIDTH
        )
    }

    /// Container code and label (`H12f00000000001.A01`)
    pub fn key(&self) -> String {
        compose_key(&self.container_code, &self.label())
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            compose_key(short_code(&self.container_code), &self.label())
        )
    }
}
