use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Provisioning seed for the single administrative account.
/// The stored hash is carried for parity with the original deployment; the
/// login route authenticates against the configured credential pair.
const ADMIN_USERNAME: &str = "admin";
const ADMIN_EMAIL: &str = "admin@jobdesk.local";
const ADMIN_PASSWORD_HASH: &str = "$2a$10$92IXUNpkjO0rOQ5byMi.Ye4oKoEa3Ro9llC/.og/at2.uheWG/igi";

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let insert = Query::insert()
            .into_table(Users::Table)
            .columns([
                Users::Username,
                Users::Email,
                Users::PasswordHash,
                Users::Role,
                Users::CreatedAt,
                Users::UpdatedAt,
            ])
            .values_panic([
                ADMIN_USERNAME.into(),
                ADMIN_EMAIL.into(),
                ADMIN_PASSWORD_HASH.into(),
                "super_admin".into(),
                Expr::current_timestamp().into(),
                Expr::current_timestamp().into(),
            ])
            .to_owned();

        manager.exec_stmt(insert).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let delete = Query::delete()
            .from_table(Users::Table)
            .and_where(Expr::col(Users::Username).eq(ADMIN_USERNAME))
            .to_owned();

        manager.exec_stmt(delete).await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Username,
    Email,
    PasswordHash,
    Role,
    CreatedAt,
    UpdatedAt,
}
