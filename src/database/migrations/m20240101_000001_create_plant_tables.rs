use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Plants::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Plants::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Plants::Name).string_len(30).not_null())
                    .col(ColumnDef::new(Plants::Nickname).string())
                    .col(ColumnDef::new(Plants::Scientific).string())
                    .col(ColumnDef::new(Plants::WateringFrequencyDays).integer())
                    .col(ColumnDef::new(Plants::AcquisitionDate).date().not_null())
                    .col(
                        ColumnDef::new(Plants::HealthStatus)
                            .string_len(16)
                            .not_null()
                            .default("healthy"),
                    )
                    .col(ColumnDef::new(Plants::ParentId).integer())
                    // Parentage is informational: removing a parent orphans its children
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_plants_parent_id")
                            .from(Plants::Table, Plants::ParentId)
                            .to(Plants::Table, Plants::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Waterings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Waterings::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Waterings::PlantId).integer().not_null())
                    .col(ColumnDef::new(Waterings::Date).date().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_waterings_plant_id")
                            .from(Waterings::Table, Waterings::PlantId)
                            .to(Plants::Table, Plants::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Photos::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Photos::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Photos::PlantId).integer().not_null())
                    .col(ColumnDef::new(Photos::Date).date().not_null())
                    .col(ColumnDef::new(Photos::Path).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_photos_plant_id")
                            .from(Photos::Table, Photos::PlantId)
                            .to(Plants::Table, Plants::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Notes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Notes::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Notes::PlantId).integer().not_null())
                    .col(ColumnDef::new(Notes::Date).date().not_null())
                    .col(ColumnDef::new(Notes::Note).string_len(300).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_notes_plant_id")
                            .from(Notes::Table, Notes::PlantId)
                            .to(Plants::Table, Plants::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_plants_parent_id")
                    .table(Plants::Table)
                    .col(Plants::ParentId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_waterings_plant_id_date")
                    .table(Waterings::Table)
                    .col(Waterings::PlantId)
                    .col(Waterings::Date)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_photos_plant_id_date")
                    .table(Photos::Table)
                    .col(Photos::PlantId)
                    .col(Photos::Date)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_notes_plant_id_date")
                    .table(Notes::Table)
                    .col(Notes::PlantId)
                    .col(Notes::Date)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Notes::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Photos::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Waterings::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Plants::Table).if_exists().to_owned())
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum Plants {
    Table,
    Id,
    Name,
    Nickname,
    Scientific,
    WateringFrequencyDays,
    AcquisitionDate,
    HealthStatus,
    ParentId,
}

#[derive(Iden)]
enum Waterings {
    Table,
    Id,
    PlantId,
    Date,
}

#[derive(Iden)]
enum Photos {
    Table,
    Id,
    PlantId,
    Date,
    Path,
}

#[derive(Iden)]
enum Notes {
    Table,
    Id,
    PlantId,
    Date,
    Note,
}
