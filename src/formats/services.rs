use super::models::{ActiveModel, Column, Entity, FormatCreate, Model};
use crate::codec::Format;
use crate::common::errors::{DbErrorExt, LabwareError, LabwareResult};
use crate::validation::{validate_format_bounds, validate_purpose, validate_uniqueness};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use std::collections::HashSet;

/// Values of `column` equal to `candidate`; empty unless it is taken.
async fn taken<C: ConnectionTrait>(
    db: &C,
    column: Column,
    candidate: &str,
) -> LabwareResult<HashSet<String>> {
    let values: Vec<String> = Entity::find()
        .select_only()
        .column(column)
        .filter(column.eq(candidate))
        .into_tuple()
        .all(db)
        .await?;
    Ok(values.into_iter().collect())
}

/// Validate and store a new format. Every bounds violation is reported at once.
pub async fn create_format<C: ConnectionTrait>(
    db: &C,
    create: FormatCreate,
) -> LabwareResult<Model> {
    let mut violations =
        validate_format_bounds(&create.bottom_row, create.right_column, &create.prefix)
            .err()
            .unwrap_or_default();
    if let Err(violation) = validate_purpose(&create.purpose) {
        violations.push(violation);
    }
    if !violations.is_empty() {
        tracing::warn!(
            "Rejected format {:?}: {} violation(s)",
            create.prefix,
            violations.len()
        );
        return Err(LabwareError::Validation(violations));
    }

    let format = Format::new(&create.bottom_row, create.right_column, &create.prefix)?;
    let format_key = format.key();

    validate_uniqueness(
        "format",
        "format_key",
        &format_key,
        &taken(db, Column::FormatKey, &format_key).await?,
    )?;
    validate_uniqueness(
        "format",
        "prefix",
        &create.prefix,
        &taken(db, Column::Prefix, &create.prefix).await?,
    )?;
    validate_uniqueness(
        "format",
        "purpose",
        &create.purpose,
        &taken(db, Column::Purpose, &create.purpose).await?,
    )?;

    let active_model = ActiveModel {
        format_key: Set(format_key.clone()),
        bottom_row: Set(format.bottom_row().to_string()),
        right_column: Set(i16::from(format.right_column())),
        prefix: Set(format.prefix().to_string()),
        purpose: Set(create.purpose),
        last_number: Set(0),
        created_at: Set(chrono::Utc::now().into()),
    };
    let model = active_model
        .insert(db)
        .await
        .map_err(|e| e.to_labware_error("format", "format_key", &format_key))?;

    tracing::info!("Created format {format_key} ({})", model.purpose);
    Ok(model)
}

pub async fn get_format<C: ConnectionTrait>(db: &C, format_key: &str) -> LabwareResult<Model> {
    Entity::find_by_id(format_key.to_string())
        .one(db)
        .await?
        .ok_or_else(|| LabwareError::not_found("format", format_key))
}

pub async fn find_format_by_purpose<C: ConnectionTrait>(
    db: &C,
    purpose: &str,
) -> LabwareResult<Option<Model>> {
    Ok(Entity::find()
        .filter(Column::Purpose.eq(purpose))
        .one(db)
        .await?)
}

/// All formats, sorted by key.
pub async fn list_formats<C: ConnectionTrait>(db: &C) -> LabwareResult<Vec<Model>> {
    Ok(Entity::find()
        .order_by_asc(Column::FormatKey)
        .all(db)
        .await?)
}
