//! Fixed start and end points of material flow
//!
//! The start well is the unbounded source and the end well the unbounded sink
//! used when the real source or sink of a transfer is not known yet.

use crate::codec::Format;
use crate::common::errors::LabwareResult;
use crate::containers::{models::ContainerCreate, services as containers};
use crate::formats::{models::FormatCreate, services as formats};
use crate::wells::{models as wells, services::fill_container};
use sea_orm::{ConnectionTrait, DatabaseConnection};

pub struct Sentinel {
    pub purpose: &'static str,
    pub prefix: &'static str,
    pub number: u64,
}

pub const START: Sentinel = Sentinel {
    purpose: "start",
    prefix: "start",
    number: 0,
};

pub const END: Sentinel = Sentinel {
    purpose: "end",
    prefix: "end",
    number: 999,
};

impl Sentinel {
    /// Single-well format: bottom row `A`, right column `1`
    pub fn format(&self) -> LabwareResult<Format> {
        Format::new("A", 1, self.prefix)
    }

    /// `A01start0000000` or `A01end000000999`
    pub fn container_code(&self) -> LabwareResult<String> {
        self.format()?.container_code(self.number)
    }

    async fn well<C: ConnectionTrait>(&self, db: &C) -> LabwareResult<wells::Model> {
        containers::get_well(db, &self.container_code()?, "A01").await
    }

    async fn ensure(&self, db: &DatabaseConnection) -> LabwareResult<wells::Model> {
        let format = self.format()?;
        if formats::find_format_by_purpose(db, self.purpose)
            .await?
            .is_none()
        {
            formats::create_format(
                db,
                FormatCreate {
                    bottom_row: format.bottom_row().to_string(),
                    right_column: i32::from(format.right_column()),
                    prefix: format.prefix().to_string(),
                    purpose: self.purpose.to_string(),
                },
            )
            .await?;
        }

        let code = self.container_code()?;
        if containers::list_containers(db, Some(&format.key()))
            .await?
            .iter()
            .any(|container| container.code == code)
        {
            fill_container(db, &code).await?;
        } else {
            containers::create_container(
                db,
                ContainerCreate {
                    format_key: format.key(),
                    external_id: Some(self.number),
                    fill: true,
                },
            )
            .await?;
        }
        self.well(db).await
    }
}

/// Create the start and end formats, containers, and wells if missing.
pub async fn ensure_sentinels(
    db: &DatabaseConnection,
) -> LabwareResult<(wells::Model, wells::Model)> {
    let start = START.ensure(db).await?;
    let end = END.ensure(db).await?;
    tracing::debug!("Sentinel wells ready: {start}, {end}");
    Ok((start, end))
}

/// The infinite source well
pub async fn start_well<C: ConnectionTrait>(db: &C) -> LabwareResult<wells::Model> {
    START.well(db).await
}

/// The infinite sink well
pub async fn end_well<C: ConnectionTrait>(db: &C) -> LabwareResult<wells::Model> {
    END.well(db).await
}
