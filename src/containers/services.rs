use super::models::{ActiveModel, Column, ContainerCreate, Entity, Model};
use crate::codec::{Format, compose_key, decode_well_label};
use crate::common::errors::{DbErrorExt, LabwareError, LabwareResult};
use crate::formats::services::get_format;
use crate::sequences::{allocate_next_in, to_db_number};
use crate::validation::validate_uniqueness;
use crate::wells::{models as wells, services as well_services};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use std::collections::HashSet;

pub async fn get_container<C: ConnectionTrait>(db: &C, code: &str) -> LabwareResult<Model> {
    Entity::find_by_id(code.to_string())
        .one(db)
        .await?
        .ok_or_else(|| LabwareError::not_found("container", code))
}

/// A container together with the validated shape of its format.
pub async fn container_format<C: ConnectionTrait>(
    db: &C,
    code: &str,
) -> LabwareResult<(Model, Format)> {
    let container = get_container(db, code).await?;
    let format = get_format(db, &container.format_key).await?.format()?;
    Ok((container, format))
}

/// Create a container under a format.
///
/// The code carries the external id when one is given, otherwise the next
/// number of the format's counter. Allocation, insert, and the optional wells
/// share one transaction, so a failure leaves the counter untouched.
pub async fn create_container(
    db: &DatabaseConnection,
    create: ContainerCreate,
) -> LabwareResult<Model> {
    let txn = db.begin().await?;

    let format = get_format(&txn, &create.format_key).await?.format()?;
    let format_key = format.key();
    let number = match create.external_id {
        Some(external_id) => external_id,
        None => allocate_next_in(&txn, &format_key).await?,
    };
    let code = format.container_code(number)?;

    let taken: Vec<String> = Entity::find()
        .select_only()
        .column(Column::Code)
        .filter(Column::Code.eq(code.as_str()))
        .into_tuple()
        .all(&txn)
        .await?;
    validate_uniqueness(
        "container",
        "code",
        &code,
        &taken.into_iter().collect::<HashSet<_>>(),
    )?;

    let external_id = create
        .external_id
        .map(|id| to_db_number("external_id", id))
        .transpose()?;
    let active_model = ActiveModel {
        code: Set(code.clone()),
        format_key: Set(format_key),
        external_id: Set(external_id),
        sequence_number: Set(to_db_number("sequence_number", number)?),
        created_at: Set(chrono::Utc::now().into()),
    };
    let model = active_model
        .insert(&txn)
        .await
        .map_err(|e| e.to_labware_error("container", "code", &code))?;

    if create.fill {
        let filled = well_services::fill_container(&txn, &code).await?;
        tracing::info!("Created {} wells in container {code}", filled.len());
    }

    txn.commit().await?;
    tracing::info!("Created container {code}");
    Ok(model)
}

/// Containers sorted by code, optionally restricted to one format.
pub async fn list_containers<C: ConnectionTrait>(
    db: &C,
    format_key: Option<&str>,
) -> LabwareResult<Vec<Model>> {
    let mut query = Entity::find().order_by_asc(Column::Code);
    if let Some(format_key) = format_key {
        query = query.filter(Column::FormatKey.eq(format_key));
    }
    Ok(query.all(db).await?)
}

/// Look up a well of a container by label (`A01`, or unpadded `A1`).
///
/// The label is checked against the container's format first, so an
/// out-of-range label is a range error rather than a missing well.
pub async fn get_well<C: ConnectionTrait>(
    db: &C,
    container_code: &str,
    label: &str,
) -> LabwareResult<wells::Model> {
    let (container, format) = container_format(db, container_code).await?;
    let (row, column) = decode_well_label(label, &format)?;
    well_services::find_well(db, &container.code, row, column)
        .await?
        .ok_or_else(|| LabwareError::not_found("well", compose_key(&container.code, label)))
}
