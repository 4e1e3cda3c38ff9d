use super::job;
use sea_orm::entity::prelude::*;

/// Review status of a submitted application.
/// Any value may be set at any time; there is no enforced transition order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum ApplicationStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "reviewed")]
    Reviewed,
    #[sea_orm(string_value = "accepted")]
    Accepted,
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

/// A submitted job application.
/// `tracking_id` is the public-facing identifier handed back to the
/// applicant; `id` stays internal. Job title and company are denormalized at
/// submission time so the record stays meaningful if the posting is removed.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "applications")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub tracking_id: String,
    pub job_id: Option<i32>,
    /// Snapshot of the posting title at submission time; empty if the
    /// applicant did not apply against a specific posting.
    pub job_title: String,
    pub job_company: String,
    pub applicant_name: String,
    pub applicant_email: String,
    pub applicant_phone: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub cover_letter: Option<String>,
    /// Name of the stored resume file. The file is written to the upload
    /// directory before this row is inserted.
    pub resume_filename: String,
    pub status: ApplicationStatus,
    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,
    pub applied_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// An application optionally references the posting it was submitted for.
    #[sea_orm(
        belongs_to = "job::Entity",
        from = "Column::JobId",
        to = "job::Column::Id",
        on_delete = "SetNull"
    )]
    Job,
}

impl Related<job::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Job.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
