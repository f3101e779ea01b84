use super::models::{ActiveModel, Column, Entity, Model};
use crate::codec::{compose_key, encode_well_label, split_key};
use crate::common::errors::{DbErrorExt, LabwareError, LabwareResult};
use crate::containers::services::{container_format, get_well};
use crate::validation::{validate_uniqueness, validate_well_bounds};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use std::collections::HashSet;
use uuid::Uuid;

pub async fn find_well<C: ConnectionTrait>(
    db: &C,
    container_code: &str,
    row: char,
    column: u8,
) -> LabwareResult<Option<Model>> {
    Ok(Entity::find()
        .filter(Column::ContainerCode.eq(container_code))
        .filter(Column::RowLetter.eq(row.to_string()))
        .filter(Column::ColumnNumber.eq(i16::from(column)))
        .one(db)
        .await?)
}

pub async fn get_well_by_id<C: ConnectionTrait>(db: &C, id: Uuid) -> LabwareResult<Model> {
    Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| LabwareError::not_found("well", id))
}

/// Look up a well by its full key (`H12f00000000001.A01`).
pub async fn find_well_by_key<C: ConnectionTrait>(db: &C, key: &str) -> LabwareResult<Model> {
    let (container_code, label) = split_key(key)?;
    get_well(db, container_code, label).await
}

/// Wells of a container in label order.
pub async fn list_wells<C: ConnectionTrait>(
    db: &C,
    container_code: &str,
) -> LabwareResult<Vec<Model>> {
    Ok(Entity::find()
        .filter(Column::ContainerCode.eq(container_code))
        .order_by_asc(Column::RowLetter)
        .order_by_asc(Column::ColumnNumber)
        .all(db)
        .await?)
}

/// Add one well to a container after checking it against the container's format.
pub async fn create_well<C: ConnectionTrait>(
    db: &C,
    container_code: &str,
    row: &str,
    column: i32,
) -> LabwareResult<Model> {
    let (container, format) = container_format(db, container_code).await?;

    let mut letters = row.chars();
    let row = match (letters.next(), letters.next()) {
        (Some(letter), None) => letter,
        _ => return Err(LabwareError::parse(row, "a single row letter")),
    };
    validate_well_bounds(row, column, &format)?;
    let column = u8::try_from(column)
        .map_err(|_| LabwareError::range("column", column, 1, format.right_column()))?;

    insert_well(db, &container.code, row, column).await
}

/// Create every well of a container's format that does not exist yet.
pub async fn fill_container<C: ConnectionTrait>(
    db: &C,
    container_code: &str,
) -> LabwareResult<Vec<Model>> {
    let (container, format) = container_format(db, container_code).await?;
    let existing: HashSet<String> = list_wells(db, &container.code)
        .await?
        .iter()
        .map(Model::label)
        .collect();

    let mut created = 0usize;
    for (row, column) in format.labels() {
        if existing.contains(&encode_well_label(row, column)?) {
            continue;
        }
        insert_well(db, &container.code, row, column).await?;
        created += 1;
    }
    tracing::debug!(
        "Filled container {} with {created} of {} wells",
        container.code,
        format.capacity()
    );

    list_wells(db, &container.code).await
}

async fn insert_well<C: ConnectionTrait>(
    db: &C,
    container_code: &str,
    row: char,
    column: u8,
) -> LabwareResult<Model> {
    let key = compose_key(container_code, &encode_well_label(row, column)?);
    let taken: HashSet<String> = find_well(db, container_code, row, column)
        .await?
        .iter()
        .map(Model::key)
        .collect();
    validate_uniqueness("well", "label", &key, &taken)?;

    let active_model = ActiveModel {
        id: Set(Uuid::new_v4()),
        container_code: Set(container_code.to_string()),
        row_letter: Set(row.to_string()),
        column_number: Set(i16::from(column)),
        created_at: Set(chrono::Utc::now().into()),
    };
    active_model
        .insert(db)
        .await
        .map_err(|e| e.to_labware_error("well", "label", &key))
}
