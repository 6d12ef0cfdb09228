use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    #[allow(clippy::too_many_lines)]
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Enable UUID generation for PostgreSQL
        if manager.get_database_backend() == sea_orm::DatabaseBackend::Postgres {
            manager
                .get_connection()
                .execute_unprepared("CREATE EXTENSION IF NOT EXISTS \"uuid-ossp\";")
                .await?;
        }

        // Users table (the directory the import pipeline matches names against)
        let mut users_table = Table::create()
            .table(Users::Table)
            .if_not_exists()
            .col(ColumnDef::new(Users::Name).string())
            .col(ColumnDef::new(Users::Email).string().not_null().unique_key())
            .col(ColumnDef::new(Users::Role).string().not_null())
            .col(
                ColumnDef::new(Users::CreatedAt)
                    .timestamp_with_time_zone()
                    .not_null()
                    .default(Expr::current_timestamp()),
            )
            .col(
                ColumnDef::new(Users::LastUpdated)
                    .timestamp_with_time_zone()
                    .not_null()
                    .default(Expr::current_timestamp()),
            )
            .to_owned();
        add_uuid_primary_key(manager, &mut users_table, Users::Id)?;
        manager.create_table(users_table).await?;

        // Colour legend: role-scoped colour -> shift mappings
        let mut legends_table = Table::create()
            .table(ShiftColorLegends::Table)
            .if_not_exists()
            .col(ColumnDef::new(ShiftColorLegends::Role).string().not_null())
            .col(
                ColumnDef::new(ShiftColorLegends::ColorCode)
                    .string()
                    .not_null(),
            )
            .col(
                ColumnDef::new(ShiftColorLegends::ColorName)
                    .string()
                    .not_null(),
            )
            .col(
                ColumnDef::new(ShiftColorLegends::ShiftName)
                    .string()
                    .not_null(),
            )
            .col(
                ColumnDef::new(ShiftColorLegends::StartTime)
                    .string()
                    .not_null(),
            )
            .col(
                ColumnDef::new(ShiftColorLegends::EndTime)
                    .string()
                    .not_null(),
            )
            .col(ColumnDef::new(ShiftColorLegends::Description).text())
            .col(
                ColumnDef::new(ShiftColorLegends::CreatedAt)
                    .timestamp_with_time_zone()
                    .not_null()
                    .default(Expr::current_timestamp()),
            )
            .col(
                ColumnDef::new(ShiftColorLegends::LastUpdated)
                    .timestamp_with_time_zone()
                    .not_null()
                    .default(Expr::current_timestamp()),
            )
            .to_owned();
        add_uuid_primary_key(manager, &mut legends_table, ShiftColorLegends::Id)?;
        manager.create_table(legends_table).await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_shift_color_legends_role_color")
                    .table(ShiftColorLegends::Table)
                    .col(ShiftColorLegends::Role)
                    .col(ShiftColorLegends::ColorCode)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Persisted schedule rows, unique per (user, date)
        let mut schedules_table = Table::create()
            .table(Schedules::Table)
            .if_not_exists()
            .col(ColumnDef::new(Schedules::UserId).uuid().not_null())
            .col(ColumnDef::new(Schedules::Date).date().not_null())
            .col(ColumnDef::new(Schedules::ShiftColor).string())
            .col(ColumnDef::new(Schedules::ShiftHours).string())
            .col(
                ColumnDef::new(Schedules::CreatedAt)
                    .timestamp_with_time_zone()
                    .not_null()
                    .default(Expr::current_timestamp()),
            )
            .col(
                ColumnDef::new(Schedules::LastUpdated)
                    .timestamp_with_time_zone()
                    .not_null()
                    .default(Expr::current_timestamp()),
            )
            .foreign_key(
                ForeignKey::create()
                    .name("fk_schedules_user_id")
                    .from(Schedules::Table, Schedules::UserId)
                    .to(Users::Table, Users::Id)
                    .on_delete(ForeignKeyAction::Cascade),
            )
            .to_owned();
        add_uuid_primary_key(manager, &mut schedules_table, Schedules::Id)?;
        manager.create_table(schedules_table).await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_schedules_user_date")
                    .table(Schedules::Table)
                    .col(Schedules::UserId)
                    .col(Schedules::Date)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_schedules_date")
                    .table(Schedules::Table)
                    .col(Schedules::Date)
                    .to_owned(),
            )
            .await?;

        // Admin-defined spreadsheet layout profiles
        let mut configs_table = Table::create()
            .table(ExcelImportConfigs::Table)
            .if_not_exists()
            .col(
                ColumnDef::new(ExcelImportConfigs::Name)
                    .string()
                    .not_null()
                    .unique_key(),
            )
            .col(
                ColumnDef::new(ExcelImportConfigs::Role)
                    .string()
                    .not_null(),
            )
            .col(
                ColumnDef::new(ExcelImportConfigs::DateRow)
                    .integer()
                    .not_null(),
            )
            .col(
                ColumnDef::new(ExcelImportConfigs::NameColumn)
                    .integer()
                    .not_null(),
            )
            .col(
                ColumnDef::new(ExcelImportConfigs::FirstNameRow)
                    .integer()
                    .not_null(),
            )
            .col(
                ColumnDef::new(ExcelImportConfigs::LastNameRow)
                    .integer()
                    .not_null(),
            )
            .col(
                ColumnDef::new(ExcelImportConfigs::FirstDateColumn)
                    .integer()
                    .not_null(),
            )
            .col(
                ColumnDef::new(ExcelImportConfigs::LastDateColumn)
                    .integer()
                    .not_null(),
            )
            .col(
                ColumnDef::new(ExcelImportConfigs::SkipValues)
                    .string()
                    .not_null()
                    .default(""),
            )
            .col(ColumnDef::new(ExcelImportConfigs::Description).text())
            .col(
                ColumnDef::new(ExcelImportConfigs::CreatedAt)
                    .timestamp_with_time_zone()
                    .not_null()
                    .default(Expr::current_timestamp()),
            )
            .col(
                ColumnDef::new(ExcelImportConfigs::LastUpdated)
                    .timestamp_with_time_zone()
                    .not_null()
                    .default(Expr::current_timestamp()),
            )
            .to_owned();
        add_uuid_primary_key(manager, &mut configs_table, ExcelImportConfigs::Id)?;
        manager.create_table(configs_table).await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_excel_import_configs_role")
                    .table(ExcelImportConfigs::Table)
                    .col(ExcelImportConfigs::Role)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ExcelImportConfigs::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Schedules::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ShiftColorLegends::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;

        Ok(())
    }
}

/// Add a uuid primary key column with a backend-appropriate default.
fn add_uuid_primary_key<T: IntoIden + 'static>(
    manager: &SchemaManager<'_>,
    table: &mut TableCreateStatement,
    id: T,
) -> Result<(), DbErr> {
    match manager.get_database_backend() {
        sea_orm::DatabaseBackend::Postgres => {
            table.col(
                ColumnDef::new(id)
                    .uuid()
                    .not_null()
                    .primary_key()
                    .default(Expr::cust("uuid_generate_v4()")),
            );
        }
        sea_orm::DatabaseBackend::Sqlite => {
            table.col(ColumnDef::new(id).uuid().not_null().primary_key());
        }
        sea_orm::DatabaseBackend::MySql => {
            return Err(DbErr::Custom("Unsupported database backend".to_string()));
        }
    }
    Ok(())
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Name,
    Email,
    Role,
    CreatedAt,
    LastUpdated,
}

#[derive(DeriveIden)]
enum ShiftColorLegends {
    Table,
    Id,
    Role,
    ColorCode,
    ColorName,
    ShiftName,
    StartTime,
    EndTime,
    Description,
    CreatedAt,
    LastUpdated,
}

#[derive(DeriveIden)]
enum Schedules {
    Table,
    Id,
    UserId,
    Date,
    ShiftColor,
    ShiftHours,
    CreatedAt,
    LastUpdated,
}

#[derive(DeriveIden)]
enum ExcelImportConfigs {
    Table,
    Id,
    Name,
    Role,
    DateRow,
    NameColumn,
    FirstNameRow,
    LastNameRow,
    FirstDateColumn,
    LastDateColumn,
    SkipValues,
    Description,
    CreatedAt,
    LastUpdated,
}
