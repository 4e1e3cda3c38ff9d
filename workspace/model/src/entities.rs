//! This file serves as the root for all SeaORM entity modules.
//! We define the data models for the job-board application here:
//! administrative accounts, job postings, and submitted applications.

pub mod application;
pub mod job;
pub mod user;

pub mod prelude {
    //! A prelude module for easy importing of all entities.
    pub use super::application::Entity as Application;
    pub use super::job::Entity as Job;
    pub use super::user::Entity as User;
}

#[cfg(test)]
mod test {
    use chrono::Utc;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{
        ActiveModelTrait, ColumnTrait, ConnectionTrait, Database, DatabaseConnection, DbErr,
        EntityTrait, QueryFilter, Set,
    };

    use super::*;
    use prelude::*;

    async fn setup_db() -> Result<DatabaseConnection, DbErr> {
        // Connect to the SQLite database
        let db = Database::connect("sqlite::memory:").await?;

        // Enable foreign keys
        db.execute_unprepared("PRAGMA foreign_keys = ON;").await?;

        // Try to apply migrations first
        Migrator::up(&db, None).await.expect("Migrations failed.");
        Ok(db)
    }

    #[tokio::test]
    async fn test_entity_integration() -> Result<(), DbErr> {
        // Setup database
        let db = setup_db().await?;

        // The migration seeds a single administrative account
        let admin = User::find()
            .filter(user::Column::Username.eq("admin"))
            .one(&db)
            .await?
            .expect("seeded admin account missing");
        assert_eq!(admin.role, user::UserRole::SuperAdmin);

        // Create job postings
        let job1 = job::ActiveModel {
            title: Set("Senior Web Developer".to_string()),
            company: Set("Tech Solutions Inc.".to_string()),
            location: Set("Makati, Manila".to_string()),
            salary_range: Set(Some("$60,000 - $80,000".to_string())),
            job_type: Set(job::JobType::FullTime),
            description: Set("We are looking for an experienced developer.".to_string()),
            requirements: Set("5+ years experience in web development.".to_string()),
            responsibilities: Set(Some("Develop and maintain web applications.".to_string())),
            is_active: Set(true),
            created_by: Set(Some(admin.id)),
            created_at: Set(Utc::now()),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        let job2 = job::ActiveModel {
            title: Set("Registered Nurse".to_string()),
            company: Set("Metro Medical Center".to_string()),
            location: Set("Quezon City".to_string()),
            salary_range: Set(None),
            job_type: Set(job::JobType::Contract),
            description: Set("Join our healthcare team.".to_string()),
            requirements: Set("Valid nursing license.".to_string()),
            responsibilities: Set(None),
            is_active: Set(true),
            created_by: Set(Some(admin.id)),
            created_at: Set(Utc::now()),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        // Create an application against the first posting
        let application = application::ActiveModel {
            tracking_id: Set("APP1700000000000123456".to_string()),
            job_id: Set(Some(job1.id)),
            job_title: Set(job1.title.clone()),
            job_company: Set(job1.company.clone()),
            applicant_name: Set("Jane Applicant".to_string()),
            applicant_email: Set("jane@example.com".to_string()),
            applicant_phone: Set("+1 555 0100".to_string()),
            cover_letter: Set(Some("I would love to join.".to_string())),
            resume_filename: Set("resume-1700000000000-123456789.pdf".to_string()),
            status: Set(application::ApplicationStatus::Pending),
            notes: Set(None),
            applied_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        // Verify jobs
        let jobs = Job::find().all(&db).await?;
        assert_eq!(jobs.len(), 2);
        assert!(jobs.iter().any(|j| j.title == "Senior Web Developer"));
        assert!(jobs.iter().any(|j| j.title == "Registered Nurse"));

        // Soft delete: flip is_active and check the public filter excludes it
        let mut job2_active: job::ActiveModel = job2.into();
        job2_active.is_active = Set(false);
        job2_active.update(&db).await?;

        let active_jobs = Job::find()
            .filter(job::Column::IsActive.eq(true))
            .all(&db)
            .await?;
        assert_eq!(active_jobs.len(), 1);
        assert_eq!(active_jobs[0].id, job1.id);

        // Verify the application round-trips with its status enum
        let stored = Application::find_by_id(application.id)
            .one(&db)
            .await?
            .unwrap();
        assert_eq!(stored.status, application::ApplicationStatus::Pending);
        assert_eq!(stored.job_id, Some(job1.id));
        assert_eq!(stored.job_title, "Senior Web Developer");

        // The tracking id column is unique
        let duplicate = application::ActiveModel {
            tracking_id: Set(stored.tracking_id.clone()),
            job_id: Set(None),
            job_title: Set(String::new()),
            job_company: Set(String::new()),
            applicant_name: Set("Someone Else".to_string()),
            applicant_email: Set("else@example.com".to_string()),
            applicant_phone: Set("+1 555 0101".to_string()),
            cover_letter: Set(None),
            resume_filename: Set("resume-1700000000001-987654321.pdf".to_string()),
            status: Set(application::ApplicationStatus::Pending),
            notes: Set(None),
            applied_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&db)
        .await;
        assert!(duplicate.is_err());

        // Hard-deleting a referenced posting clears the weak reference
        Job::delete_by_id(job1.id).exec(&db).await?;
        let stored = Application::find_by_id(application.id)
            .one(&db)
            .await?
            .unwrap();
        assert_eq!(stored.job_id, None);
        assert_eq!(stored.job_title, "Senior Web Developer");

        Ok(())
    }
}
