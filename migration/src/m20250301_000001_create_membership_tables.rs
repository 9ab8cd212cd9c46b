use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Profiles (FIRST - purchases reference this)
        manager
            .create_table(
                Table::create()
                    .table(Profiles::Table)
                    .if_not_exists()
                    .col(string(Profiles::UserId).primary_key())
                    .col(string_null(Profiles::Membership))
                    .col(string_null(Profiles::MembershipPeriod))
                    .col(
                        timestamp_with_time_zone(Profiles::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp_with_time_zone(Profiles::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(MembershipPurchases::Table)
                    .if_not_exists()
                    .col(pk_uuid(MembershipPurchases::Id))
                    .col(string(MembershipPurchases::UserId))
                    .col(string(MembershipPurchases::ProductId))
                    .col(string(MembershipPurchases::Tier))
                    .col(string(MembershipPurchases::Period))
                    .col(string(MembershipPurchases::Platform))
                    .col(string(MembershipPurchases::TransactionId).unique_key())
                    .col(string_null(MembershipPurchases::OriginalTransactionId))
                    .col(timestamp_with_time_zone(MembershipPurchases::PurchasedAt))
                    .col(timestamp_with_time_zone_null(MembershipPurchases::ExpiresAt))
                    .col(
                        timestamp_with_time_zone(MembershipPurchases::VerifiedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_membership_purchases_user_id")
                            .from(MembershipPurchases::Table, MembershipPurchases::UserId)
                            .to(Profiles::Table, Profiles::UserId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_membership_purchases_user_id")
                    .table(MembershipPurchases::Table)
                    .col(MembershipPurchases::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MembershipPurchases::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Profiles::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Profiles {
    Table,
    UserId,
    Membership,
    MembershipPeriod,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum MembershipPurchases {
    Table,
    Id,
    UserId,
    ProductId,
    Tier,
    Period,
    Platform,
    TransactionId,
    OriginalTransactionId,
    PurchasedAt,
    ExpiresAt,
    VerifiedAt,
}
