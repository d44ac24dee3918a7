use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AiQueries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AiQueries::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AiQueries::UserQuestion).text().not_null())
                    .col(ColumnDef::new(AiQueries::AiAnswer).text().not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AiQueries::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum AiQueries {
    Table,
    Id,
    UserQuestion,
    AiAnswer,
}
