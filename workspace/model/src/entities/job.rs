use super::user;
use sea_orm::entity::prelude::*;

/// Employment type of a posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum JobType {
    #[sea_orm(string_value = "full-time")]
    FullTime,
    #[sea_orm(string_value = "part-time")]
    PartTime,
    #[sea_orm(string_value = "contract")]
    Contract,
    #[sea_orm(string_value = "temporary")]
    Temporary,
}

/// A job posting shown on the public board.
/// Postings are never hard-deleted; `is_active` is flipped to false instead,
/// so applications keep a meaningful snapshot to point at.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "jobs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub company: String,
    pub location: String,
    /// Free-text salary range, e.g. "$60,000 - $80,000".
    pub salary_range: Option<String>,
    pub job_type: JobType,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    #[sea_orm(column_type = "Text")]
    pub requirements: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub responsibilities: Option<String>,
    /// Public reads only ever see rows with this set.
    #[sea_orm(default_value = "true")]
    pub is_active: bool,
    /// The account that created the posting. Cleared if that account is removed.
    pub created_by: Option<i32>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// A posting belongs to the account that created it.
    #[sea_orm(
        belongs_to = "user::Entity",
        from = "Column::CreatedBy",
        to = "user::Column::Id",
        on_delete = "SetNull"
    )]
    User,
    #[sea_orm(has_many = "super::application::Entity")]
    Application,
}

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
