//! Next unused container number for a format
//!
//! A format's counter only moves forward. Allocation holds an exclusive lock
//! (a mutex in-process, a row lock in the store) for the read, the increment,
//! and the write, and nothing else. In the store the counter steps over
//! numbers that containers of the format already carry as external ids.

use crate::codec::Format;
use crate::common::errors::{LabwareError, LabwareResult};
use crate::containers::models as containers;
use crate::formats::models as formats;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QuerySelect, Set, TransactionTrait,
};
use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

/// In-process counter for one format.
#[derive(Debug)]
pub struct SequenceCounter {
    format_key: String,
    width: usize,
    max: u64,
    current: Mutex<u64>,
}

impl SequenceCounter {
    pub fn new(format: &Format) -> Self {
        Self::starting_after(format, 0)
    }

    /// Counter whose next allocation is `current + 1`.
    pub fn starting_after(format: &Format, current: u64) -> Self {
        Self {
            format_key: format.key(),
            width: format.sequence_width(),
            max: format.max_sequence(),
            current: Mutex::new(current),
        }
    }

    /// Increment and return the counter. Fails without advancing when the
    /// next number would not fit the format's digits.
    pub fn allocate_next(&self) -> LabwareResult<u64> {
        // A u64 cannot be left half-written, so a poisoned lock is still usable
        let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        let next = next_number(&self.format_key, self.width, self.max, *current)?;
        *current = next;
        Ok(next)
    }

    pub fn current(&self) -> u64 {
        *self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn next_number(format_key: &str, width: usize, max: u64, current: u64) -> LabwareResult<u64> {
    current
        .checked_add(1)
        .filter(|next| *next <= max)
        .ok_or_else(|| LabwareError::Exhausted {
            format_key: format_key.to_string(),
            width,
            max,
        })
}

pub(crate) fn to_db_number(field: &'static str, number: u64) -> LabwareResult<i64> {
    i64::try_from(number).map_err(|_| LabwareError::range(field, number, 0, i64::MAX))
}

pub(crate) fn from_db_number(field: &'static str, number: i64) -> LabwareResult<u64> {
    u64::try_from(number).map_err(|_| LabwareError::range(field, number, 0, i64::MAX))
}

/// Allocate the next number of a format inside the caller's transaction.
///
/// The format row stays locked until that transaction ends, so a caller that
/// inserts a container in the same transaction either keeps both the number
/// and the container or neither.
pub async fn allocate_next_in<C: ConnectionTrait>(conn: &C, format_key: &str) -> LabwareResult<u64> {
    let model = formats::Entity::find_by_id(format_key.to_string())
        .lock_exclusive()
        .one(conn)
        .await?
        .ok_or_else(|| LabwareError::not_found("format", format_key))?;

    let format = model.format()?;
    let current = from_db_number("last_number", model.last_number)?;

    // Numbers above the counter may already be held by external ids
    let taken: HashSet<i64> = containers::Entity::find()
        .select_only()
        .column(containers::Column::SequenceNumber)
        .filter(containers::Column::FormatKey.eq(format_key))
        .filter(containers::Column::SequenceNumber.gt(model.last_number))
        .into_tuple()
        .all(conn)
        .await?
        .into_iter()
        .collect();

    let mut next = next_number(
        format_key,
        format.sequence_width(),
        format.max_sequence(),
        current,
    )?;
    while taken.contains(&to_db_number("last_number", next)?) {
        next = next_number(
            format_key,
            format.sequence_width(),
            format.max_sequence(),
            next,
        )?;
    }

    let mut active_model: formats::ActiveModel = model.into();
    active_model.last_number = Set(to_db_number("last_number", next)?);
    active_model.update(conn).await?;

    tracing::debug!("Allocated sequence number {next} for format {format_key}");
    Ok(next)
}

/// Allocate the next number of a format in a transaction of its own.
pub async fn allocate_next(db: &DatabaseConnection, format_key: &str) -> LabwareResult<u64> {
    let txn = db.begin().await?;
    let next = allocate_next_in(&txn, format_key).await?;
    txn.commit().await?;
    Ok(next)
}
