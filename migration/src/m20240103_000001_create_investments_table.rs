use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(
            Table::create()
                .table(Investments::Table)
                .if_not_exists()
                .col(
                    ColumnDef::new(Investments::Id)
                        .integer()
                        .not_null()
                        .auto_increment()
                        .primary_key()
                )
                .col(ColumnDef::new(Investments::UserId).integer().not_null())
                .col(ColumnDef::new(Investments::StrategyId).integer().not_null())
                .col(ColumnDef::new(Investments::Successful).boolean().not_null())
                .col(ColumnDef::new(Investments::Amount).decimal().not_null())
                .col(ColumnDef::new(Investments::Returns).decimal().not_null())
                .col(
                    ColumnDef::new(Investments::CreatedAt)
                        .timestamp_with_time_zone()
                        .not_null()
                        .default(Expr::current_timestamp())
                )
                .col(
                    ColumnDef::new(Investments::UpdatedAt)
                        .timestamp_with_time_zone()
                        .not_null()
                        .default(Expr::current_timestamp())
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_investments_user")
                        .from(Investments::Table, Investments::UserId)
                        .to(Users::Table, Users::Id)
                        .on_delete(ForeignKeyAction::Restrict)
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_investments_strategy")
                        .from(Investments::Table, Investments::StrategyId)
                        .to(Strategies::Table, Strategies::Id)
                        .on_delete(ForeignKeyAction::Restrict)
                )
                .to_owned()
        ).await?;

        manager.create_index(
            Index::create()
                .if_not_exists()
                .name("idx_investments_user_id")
                .table(Investments::Table)
                .col(Investments::UserId)
                .to_owned()
        ).await?;

        manager.create_index(
            Index::create()
                .if_not_exists()
                .name("idx_investments_strategy_id")
                .table(Investments::Table)
                .col(Investments::StrategyId)
                .to_owned()
        ).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Investments::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Investments {
    Table,
    Id,
    UserId,
    StrategyId,
    Successful,
    Amount,
    Returns,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Strategies {
    Table,
    Id,
}
