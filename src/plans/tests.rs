use super::models::PlanCreate;
use super::services::{
    add_transfer, create_plan, describe_transfer, get_plan, list_plans_assigned_to,
    list_transfers, sinks_of, sources_of,
};
use super::transfers::models::TransferCreate;
use crate::common::errors::LabwareError;
use crate::config::test_helpers::setup_test_db;
use crate::containers::services::get_well;
use crate::sentinels::{end_well, start_well};
use crate::test_helpers::{create_test_plan, create_test_plate};
use sea_orm::ModelTrait;
use uuid::Uuid;

#[tokio::test]
async fn test_create_plan() {
    let db = setup_test_db().await;
    let plan = create_plan(
        &db,
        PlanCreate {
            name: "Dilution series".to_string(),
            created_by: "alice".to_string(),
            assigned_to: Some("bob".to_string()),
        },
    )
    .await
    .unwrap();

    assert_eq!(plan.to_string(), format!("plan {}", plan.id));
    assert_eq!(get_plan(&db, plan.id).await.unwrap(), plan);

    let assigned = list_plans_assigned_to(&db, "bob").await.unwrap();
    assert_eq!(assigned, [plan]);
    assert!(list_plans_assigned_to(&db, "alice").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_plan_rejects_blank_fields() {
    let db = setup_test_db().await;
    let err = create_plan(
        &db,
        PlanCreate {
            name: " ".to_string(),
            created_by: String::new(),
            assigned_to: Some(String::new()),
        },
    )
    .await
    .unwrap_err();
    let fields: Vec<_> = err.violations().iter().map(|v| v.field).collect();
    assert_eq!(fields, ["name", "created_by", "assigned_to"]);
}

#[tokio::test]
async fn test_get_missing_plan() {
    let db = setup_test_db().await;
    assert!(matches!(
        get_plan(&db, Uuid::new_v4()).await,
        Err(LabwareError::NotFound { resource: "plan", .. })
    ));
}

#[tokio::test]
async fn test_transfer_defaults_to_sentinels() {
    let db = setup_test_db().await;
    let plan = create_test_plan(&db).await;

    let transfer = add_transfer(
        &db,
        TransferCreate {
            plan_id: plan.id,
            ..TransferCreate::default()
        },
    )
    .await
    .unwrap();

    assert_eq!(transfer.source_id, start_well(&db).await.unwrap().id);
    assert_eq!(transfer.sink_id, end_well(&db).await.unwrap().id);
    assert_eq!(
        describe_transfer(&db, &transfer).await.unwrap(),
        "start0000000.A01 -> end000000999.A01"
    );
}

#[tokio::test]
async fn test_transfer_sources_and_sinks() {
    let db = setup_test_db().await;
    let plan = create_test_plan(&db).await;
    let (_, plate) = create_test_plate(&db).await;
    let a01 = get_well(&db, &plate.code, "A01").await.unwrap();
    let b01 = get_well(&db, &plate.code, "B01").await.unwrap();
    let a02 = get_well(&db, &plate.code, "A02").await.unwrap();

    for sink in [&b01, &a02] {
        add_transfer(
            &db,
            TransferCreate {
                plan_id: plan.id,
                source_id: Some(a01.id),
                sink_id: Some(sink.id),
            },
        )
        .await
        .unwrap();
    }

    let sinks = sinks_of(&db, a01.id).await.unwrap();
    assert_eq!(sinks, [a02.clone(), b01.clone()]);
    assert_eq!(sources_of(&db, b01.id).await.unwrap(), [a01.clone()]);
    assert!(sources_of(&db, a01.id).await.unwrap().is_empty());
    assert_eq!(list_transfers(&db, plan.id).await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_repeated_transfers_allowed() {
    let db = setup_test_db().await;
    let first = create_test_plan(&db).await;
    let second = create_test_plan(&db).await;

    // Twice in one plan for a volume larger than the tip, once more in another
    for plan_id in [first.id, first.id, second.id] {
        add_transfer(
            &db,
            TransferCreate {
                plan_id,
                ..TransferCreate::default()
            },
        )
        .await
        .unwrap();
    }

    assert_eq!(list_transfers(&db, first.id).await.unwrap().len(), 2);
    assert_eq!(list_transfers(&db, second.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_transfer_unknown_references() {
    let db = setup_test_db().await;
    let plan = create_test_plan(&db).await;

    assert!(matches!(
        add_transfer(
            &db,
            TransferCreate {
                plan_id: Uuid::new_v4(),
                ..TransferCreate::default()
            },
        )
        .await,
        Err(LabwareError::NotFound { resource: "plan", .. })
    ));
    assert!(matches!(
        add_transfer(
            &db,
            TransferCreate {
                plan_id: plan.id,
                source_id: Some(Uuid::new_v4()),
                sink_id: None,
            },
        )
        .await,
        Err(LabwareError::NotFound { resource: "well", .. })
    ));
    assert!(list_transfers(&db, plan.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_wells_in_transfers_cannot_be_deleted() {
    let db = setup_test_db().await;
    let plan = create_test_plan(&db).await;
    add_transfer(
        &db,
        TransferCreate {
            plan_id: plan.id,
            ..TransferCreate::default()
        },
    )
    .await
    .unwrap();

    let start = start_well(&db).await.unwrap();
    assert!(start.clone().delete(&db).await.is_err());
    assert_eq!(start_well(&db).await.unwrap(), start);
}
