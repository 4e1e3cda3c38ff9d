use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create users table
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(pk_auto(Users::Id))
                    .col(string(Users::Username).unique_key())
                    .col(string(Users::Email).unique_key())
                    .col(string(Users::PasswordHash))
                    .col(string(Users::Role).default("admin"))
                    .col(timestamp_with_time_zone(Users::CreatedAt))
                    .col(timestamp_with_time_zone(Users::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        // Create jobs table
        manager
            .create_table(
                Table::create()
                    .table(Jobs::Table)
                    .if_not_exists()
                    .col(pk_auto(Jobs::Id))
                    .col(string(Jobs::Title))
                    .col(string(Jobs::Company))
                    .col(string(Jobs::Location))
                    .col(string_null(Jobs::SalaryRange))
                    .col(string(Jobs::JobType).default("full-time"))
                    .col(text(Jobs::Description))
                    .col(text(Jobs::Requirements))
                    .col(text_null(Jobs::Responsibilities))
                    .col(boolean(Jobs::IsActive).default(true))
                    .col(integer_null(Jobs::CreatedBy))
                    .col(timestamp_with_time_zone(Jobs::CreatedAt))
                    .col(timestamp_with_time_zone(Jobs::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_job_created_by")
                            .from(Jobs::Table, Jobs::CreatedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create applications table
        manager
            .create_table(
                Table::create()
                    .table(Applications::Table)
                    .if_not_exists()
                    .col(pk_auto(Applications::Id))
                    .col(string(Applications::TrackingId).unique_key())
                    .col(integer_null(Applications::JobId))
                    .col(string(Applications::JobTitle))
                    .col(string(Applications::JobCompany))
                    .col(string(Applications::ApplicantName))
                    .col(string(Applications::ApplicantEmail))
                    .col(string(Applications::ApplicantPhone))
                    .col(text_null(Applications::CoverLetter))
                    .col(string(Applications::ResumeFilename))
                    .col(string(Applications::Status).default("pending"))
                    .col(text_null(Applications::Notes))
                    .col(timestamp_with_time_zone(Applications::AppliedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_application_job")
                            .from(Applications::Table, Applications::JobId)
                            .to(Jobs::Table, Jobs::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Index for the default newest-first listing of applications
        manager
            .create_index(
                Index::create()
                    .name("idx_applications_applied_at")
                    .table(Applications::Table)
                    .col(Applications::AppliedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Applications::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Jobs::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Username,
    Email,
    PasswordHash,
    Role,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Jobs {
    Table,
    Id,
    Title,
    Company,
    Location,
    SalaryRange,
    JobType,
    Description,
    Requirements,
    Responsibilities,
    IsActive,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Applications {
    Table,
    Id,
    TrackingId,
    JobId,
    JobTitle,
    JobCompany,
    ApplicantName,
    ApplicantEmail,
    ApplicantPhone,
    CoverLetter,
    ResumeFilename,
    Status,
    Notes,
    AppliedAt,
}
