use sea_orm_migration::prelude::*;

use crate::m20240301_000001_create_ship::Ship;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Ship: index on ship_type (exact-match filter)
        manager
            .create_index(
                Index::create()
                    .name("idx_ship_type")
                    .table(Ship::Table)
                    .col(Ship::ShipType)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // Ship: index on prod_date (after/before bounds and DATE ordering)
        manager
            .create_index(
                Index::create()
                    .name("idx_ship_prod_date")
                    .table(Ship::Table)
                    .col(Ship::ProdDate)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_ship_prod_date").table(Ship::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_ship_type").table(Ship::Table).to_owned())
            .await
    }
}
