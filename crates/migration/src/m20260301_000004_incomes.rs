use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum Incomes {
    Table,
    Id,
    Username,
    Source,
    AmountCents,
    Description,
    Date,
}

#[derive(Iden)]
enum Users {
    Table,
    Username,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Incomes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Incomes::Id)
                            .blob()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Incomes::Username).string().not_null())
                    .col(ColumnDef::new(Incomes::Source).string().not_null())
                    .col(
                        ColumnDef::new(Incomes::AmountCents)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Incomes::Description).text())
                    .col(ColumnDef::new(Incomes::Date).date().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-incomes-username")
                            .from(Incomes::Table, Incomes::Username)
                            .to(Users::Table, Users::Username)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Incomes::Table).to_owned())
            .await?;
        Ok(())
    }
}
