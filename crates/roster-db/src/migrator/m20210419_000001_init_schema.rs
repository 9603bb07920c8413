//! Initial schema: entity tables, the team/user association and unique indexes

use sea_orm_migration::{prelude::*, schema::*};

/// Width of the canonical hex identifier.
const ID_LEN: u32 = 24;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ============================================================
        // 1. users
        // ============================================================
        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(string_len(User::Id, ID_LEN).primary_key())
                    .col(string_len(User::FirstName, 255).not_null())
                    .col(string_len(User::LastName, 255).not_null())
                    .col(string_len(User::Email, 255).not_null())
                    .col(
                        timestamp_with_time_zone(User::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_users_email")
                    .table(User::Table)
                    .col(User::Email)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // ============================================================
        // 2. teams
        // ============================================================
        manager
            .create_table(
                Table::create()
                    .table(Team::Table)
                    .if_not_exists()
                    .col(string_len(Team::Id, ID_LEN).primary_key())
                    .col(string_len(Team::Name, 255).not_null())
                    .col(ColumnDef::new(Team::Description).text().null())
                    .col(
                        timestamp_with_time_zone(Team::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // ============================================================
        // 3. organizations
        // ============================================================
        manager
            .create_table(
                Table::create()
                    .table(Organization::Table)
                    .if_not_exists()
                    .col(string_len(Organization::Id, ID_LEN).primary_key())
                    .col(string_len(Organization::Name, 255).not_null())
                    .col(string_len(Organization::BillingId, 255).not_null())
                    .col(
                        timestamp_with_time_zone(Organization::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_organizations_billing_id")
                    .table(Organization::Table)
                    .col(Organization::BillingId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // ============================================================
        // 4. team_users association
        // ============================================================
        // Plain references: no foreign keys, orphaned rows are skipped by
        // the expansion joins.
        manager
            .create_table(
                Table::create()
                    .table(TeamUser::Table)
                    .if_not_exists()
                    .col(string_len(TeamUser::Id, ID_LEN).primary_key())
                    .col(string_len(TeamUser::TeamId, ID_LEN).not_null())
                    .col(string_len(TeamUser::UserId, ID_LEN).not_null())
                    .col(
                        timestamp_with_time_zone(TeamUser::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_team_users_team_id_user_id")
                    .table(TeamUser::Table)
                    .col(TeamUser::TeamId)
                    .col(TeamUser::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_team_users_user_id")
                    .table(TeamUser::Table)
                    .col(TeamUser::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TeamUser::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Organization::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Team::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(User::Table).to_owned())
            .await?;

        Ok(())
    }
}

// ============================================================
// Table identifiers
// ============================================================

#[derive(DeriveIden)]
enum User {
    #[sea_orm(iden = "users")]
    Table,
    Id,
    FirstName,
    LastName,
    Email,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Team {
    #[sea_orm(iden = "teams")]
    Table,
    Id,
    Name,
    Description,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Organization {
    #[sea_orm(iden = "organizations")]
    Table,
    Id,
    Name,
    BillingId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum TeamUser {
    #[sea_orm(iden = "team_users")]
    Table,
    Id,
    TeamId,
    UserId,
    CreatedAt,
}
