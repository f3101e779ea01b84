pub use sea_orm_migration::prelude::*;

mod m20241001_000001_create_labware_schema;
mod m20241001_000002_labware_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20241001_000001_create_labware_schema::Migration),
            Box::new(m20241001_000002_labware_indexes::Migration),
        ]
    }
}
