/// Shared builders for test records
///
/// Records follow the hierarchy Formats → Containers → Wells, and
/// Plans → Transfers between wells.
use crate::containers::{models as containers, models::ContainerCreate, services::create_container};
use crate::formats::{models as formats, models::FormatCreate, services::create_format};
use crate::plans::{models as plans, models::PlanCreate, services::create_plan};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

/// Create a format with a unique purpose
pub async fn create_test_format(
    db: &DatabaseConnection,
    bottom_row: &str,
    right_column: i32,
    prefix: &str,
) -> formats::Model {
    create_format(
        db,
        FormatCreate {
            bottom_row: bottom_row.to_string(),
            right_column,
            prefix: prefix.to_string(),
            purpose: format!("Test {prefix} {}", Uuid::new_v4()),
        },
    )
    .await
    .expect("Failed to create test format")
}

/// Create an empty container with an allocated number
pub async fn create_test_container(
    db: &DatabaseConnection,
    format_key: &str,
) -> containers::Model {
    create_container(
        db,
        ContainerCreate {
            format_key: format_key.to_string(),
            external_id: None,
            fill: false,
        },
    )
    .await
    .expect("Failed to create test container")
}

/// Create a 96-well plate format and one plate with all its wells
pub async fn create_test_plate(db: &DatabaseConnection) -> (formats::Model, containers::Model) {
    let format = create_test_format(db, "H", 12, "pl").await;
    let plate = create_container(
        db,
        ContainerCreate {
            format_key: format.format_key.clone(),
            external_id: None,
            fill: true,
        },
    )
    .await
    .expect("Failed to create test plate");
    (format, plate)
}

pub async fn create_test_plan(db: &DatabaseConnection) -> plans::Model {
    create_plan(
        db,
        PlanCreate {
            name: format!("Test Plan {}", Uuid::new_v4()),
            created_by: "test.user".to_string(),
            assigned_to: None,
        },
    )
    .await
    .expect("Failed to create test plan")
}
