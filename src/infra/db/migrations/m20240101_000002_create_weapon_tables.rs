//! Migration: create base_weapons, weapon_catalog and weapons tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(BaseWeapons::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BaseWeapons::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(BaseWeapons::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(BaseWeapons::DefaultPrice).integer().not_null())
                    .col(
                        ColumnDef::new(BaseWeapons::DefaultProductionCost)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(BaseWeapons::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BaseWeapons::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(WeaponCatalog::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(WeaponCatalog::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(WeaponCatalog::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(WeaponCatalog::SalePrice).integer().not_null())
                    .col(
                        ColumnDef::new(WeaponCatalog::ProductionCost)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Weapons::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Weapons::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Weapons::Timestamp)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Weapons::UserId).integer().not_null())
                    .col(ColumnDef::new(Weapons::BaseWeaponId).integer().not_null())
                    .col(ColumnDef::new(Weapons::Holder).string().not_null())
                    .col(ColumnDef::new(Weapons::SerialNumber).string().not_null())
                    .col(ColumnDef::new(Weapons::Price).integer().not_null())
                    .col(ColumnDef::new(Weapons::ProductionCost).integer().not_null())
                    .col(
                        ColumnDef::new(Weapons::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Weapons::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_weapons_user")
                            .from(Weapons::Table, Weapons::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_weapons_base_weapon")
                            .from(Weapons::Table, Weapons::BaseWeaponId)
                            .to(BaseWeapons::Table, BaseWeapons::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_weapons_user_id")
                    .table(Weapons::Table)
                    .col(Weapons::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Weapons::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(WeaponCatalog::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(BaseWeapons::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum BaseWeapons {
    Table,
    Id,
    Name,
    DefaultPrice,
    DefaultProductionCost,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum WeaponCatalog {
    Table,
    Id,
    Name,
    SalePrice,
    ProductionCost,
}

#[derive(Iden)]
enum Weapons {
    Table,
    Id,
    Timestamp,
    UserId,
    BaseWeaponId,
    Holder,
    SerialNumber,
    Price,
    ProductionCost,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
