use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(
            Table::create()
                .table(Strategies::Table)
                .if_not_exists()
                .col(
                    ColumnDef::new(Strategies::Id)
                        .integer()
                        .not_null()
                        .auto_increment()
                        .primary_key()
                )
                .col(ColumnDef::new(Strategies::Type).string().not_null())
                .col(ColumnDef::new(Strategies::Tenure).integer().not_null())
                // Rates are kept at full precision; rounding is a display concern
                .col(ColumnDef::new(Strategies::Yield).decimal().not_null())
                .col(ColumnDef::new(Strategies::Relief).decimal().not_null())
                .col(
                    ColumnDef::new(Strategies::CreatedAt)
                        .timestamp_with_time_zone()
                        .not_null()
                        .default(Expr::current_timestamp())
                )
                .col(
                    ColumnDef::new(Strategies::UpdatedAt)
                        .timestamp_with_time_zone()
                        .not_null()
                        .default(Expr::current_timestamp())
                )
                .to_owned()
        ).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Strategies::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Strategies {
    Table,
    Id,
    Type,
    Tenure,
    Yield,
    Relief,
    CreatedAt,
    UpdatedAt,
}
