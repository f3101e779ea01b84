use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Movement from one well to another.
///
/// The same (source, sink) pair may appear several times in one plan, to move
/// a volume larger than the pipette or tip, and in several plans, for repeated
/// rounds of transfer and drying.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "transfers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub plan_id: Uuid,
    pub source_id: Uuid,
    pub sink_id: Uuid,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::plans::models::Entity",
        from = "Column::PlanId",
        to = "crate::plans::models::Column::Id",
        on_update = "Restrict",
        on_delete = "Restrict"
    )]
    Plans,
    #[sea_orm(
        belongs_to = "crate::wells::models::Entity",
        from = "Column::SourceId",
        to = "crate::wells::models::Column::Id",
        on_update = "Restrict",
        on_delete = "Restrict"
    )]
    Source,
    #[sea_orm(
        belongs_to = "crate::wells::models::Entity",
        from = "Column::SinkId",
        to = "crate::wells::models::Column::Id",
        on_update = "Restrict",
        on_delete = "Restrict"
    )]
    Sink,
}

impl Related<crate::plans::models::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Plans.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TransferCreate {
    pub plan_id: Uuid,
    /// Defaults to the start well when the real source is not known yet
    pub source_id: Option<Uuid>,
    /// Defaults to the end well when the real sink is not known yet
    pub sink_id: Option<Uuid>,
}
