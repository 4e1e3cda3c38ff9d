use sea_orm::entity::prelude::*;

/// Administrative role attached to an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum UserRole {
    #[sea_orm(string_value = "admin")]
    Admin,
    #[sea_orm(string_value = "super_admin")]
    SuperAdmin,
}

/// An administrative account. A single record is seeded at provisioning time;
/// it is read during login and token verification and never deleted.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub username: String,
    #[sea_orm(unique)]
    pub email: String,
    /// Stored credential hash, carried over from the provisioning seed.
    /// Login authenticates against the configured credential pair, so this
    /// column is never compared against.
    pub password_hash: String,
    pub role: UserRole,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    // A user can create multiple job postings.
    #[sea_orm(has_many = "super::job::Entity")]
    Job,
}

impl ActiveModelBehavior for ActiveModel {}
