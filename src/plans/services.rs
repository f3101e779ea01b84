use super::models::{ActiveModel, Column, Entity, Model, PlanCreate};
use super::transfers::models as transfers;
use crate::common::errors::{DbErrorExt, LabwareError, LabwareResult, ValidationError};
use crate::sentinels::{end_well, start_well};
use crate::wells::{models as wells, services::get_well_by_id};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

pub async fn create_plan<C: ConnectionTrait>(db: &C, create: PlanCreate) -> LabwareResult<Model> {
    let mut violations = Vec::new();
    if create.name.trim().is_empty() {
        violations.push(ValidationError::new("name", "must not be blank"));
    }
    if create.created_by.trim().is_empty() {
        violations.push(ValidationError::new("created_by", "must not be blank"));
    }
    if create
        .assigned_to
        .as_deref()
        .is_some_and(|assignee| assignee.trim().is_empty())
    {
        violations.push(ValidationError::new("assigned_to", "must not be blank"));
    }
    if !violations.is_empty() {
        return Err(LabwareError::Validation(violations));
    }

    let id = Uuid::new_v4();
    let active_model = ActiveModel {
        id: Set(id),
        name: Set(create.name),
        created_by: Set(create.created_by),
        assigned_to: Set(create.assigned_to),
        created_at: Set(chrono::Utc::now().into()),
    };
    let model = active_model
        .insert(db)
        .await
        .map_err(|e| e.to_labware_error("plan", "id", &id.to_string()))?;

    tracing::info!("Created plan {} '{}' by {}", model.id, model.name, model.created_by);
    Ok(model)
}

pub async fn get_plan<C: ConnectionTrait>(db: &C, id: Uuid) -> LabwareResult<Model> {
    Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| LabwareError::not_found("plan", id))
}

/// Plans assigned to someone, newest first.
pub async fn list_plans_assigned_to<C: ConnectionTrait>(
    db: &C,
    assignee: &str,
) -> LabwareResult<Vec<Model>> {
    Ok(Entity::find()
        .filter(Column::AssignedTo.eq(assignee))
        .order_by_desc(Column::CreatedAt)
        .all(db)
        .await?)
}

/// Record a planned transfer. A missing source or sink falls back to the
/// start or end well.
pub async fn add_transfer<C: ConnectionTrait>(
    db: &C,
    create: transfers::TransferCreate,
) -> LabwareResult<transfers::Model> {
    let plan = get_plan(db, create.plan_id).await?;
    let source = match create.source_id {
        Some(id) => get_well_by_id(db, id).await?,
        None => start_well(db).await?,
    };
    let sink = match create.sink_id {
        Some(id) => get_well_by_id(db, id).await?,
        None => end_well(db).await?,
    };

    let id = Uuid::new_v4();
    let active_model = transfers::ActiveModel {
        id: Set(id),
        plan_id: Set(plan.id),
        source_id: Set(source.id),
        sink_id: Set(sink.id),
        created_at: Set(chrono::Utc::now().into()),
    };
    let model = active_model
        .insert(db)
        .await
        .map_err(|e| e.to_labware_error("transfer", "id", &id.to_string()))?;

    tracing::info!("Planned transfer {source} -> {sink} in {plan}");
    Ok(model)
}

/// Transfers of a plan in the order they were planned.
pub async fn list_transfers<C: ConnectionTrait>(
    db: &C,
    plan_id: Uuid,
) -> LabwareResult<Vec<transfers::Model>> {
    Ok(transfers::Entity::find()
        .filter(transfers::Column::PlanId.eq(plan_id))
        .order_by_asc(transfers::Column::CreatedAt)
        .all(db)
        .await?)
}

async fn wells_by_id<C: ConnectionTrait>(db: &C, ids: Vec<Uuid>) -> LabwareResult<Vec<wells::Model>> {
    Ok(wells::Entity::find()
        .filter(wells::Column::Id.is_in(ids))
        .order_by_asc(wells::Column::ContainerCode)
        .order_by_asc(wells::Column::RowLetter)
        .order_by_asc(wells::Column::ColumnNumber)
        .all(db)
        .await?)
}

/// Wells that receive liquid from `well_id` in any plan.
pub async fn sinks_of<C: ConnectionTrait>(db: &C, well_id: Uuid) -> LabwareResult<Vec<wells::Model>> {
    let ids = transfers::Entity::find()
        .filter(transfers::Column::SourceId.eq(well_id))
        .all(db)
        .await?
        .into_iter()
        .map(|transfer| transfer.sink_id)
        .collect();
    wells_by_id(db, ids).await
}

/// Wells that give liquid to `well_id` in any plan.
pub async fn sources_of<C: ConnectionTrait>(
    db: &C,
    well_id: Uuid,
) -> LabwareResult<Vec<wells::Model>> {
    let ids = transfers::Entity::find()
        .filter(transfers::Column::SinkId.eq(well_id))
        .all(db)
        .await?
        .into_iter()
        .map(|transfer| transfer.source_id)
        .collect();
    wells_by_id(db, ids).await
}

/// `start0000000.A01 -> end000000999.A01`
pub async fn describe_transfer<C: ConnectionTrait>(
    db: &C,
    transfer: &transfers::Model,
) -> LabwareResult<String> {
    let source = get_well_by_id(db, transfer.source_id).await?;
    let sink = get_well_by_id(db, transfer.sink_id).await?;
    Ok(format!("{source} -> {sink}"))
}
