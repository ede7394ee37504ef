//! PostgreSQL adapters against a real database.
//!
//! Run with a scratch database:
//!
//! ```text
//! DATABASE_URL=postgres://localhost/orgdesk_test cargo test --test postgres_integration -- --ignored
//! ```
//!
//! Every test uses fresh unique keys, so runs can share one database.

use chrono::{NaiveDate, NaiveTime, Utc};
use sqlx::PgPool;

use orgdesk::adapters::postgres::{
    run_migrations, PostgresEventRepository, PostgresMemberRepository,
    PostgresProfileRepository, PostgresRequirementRepository, PostgresUserRepository,
};
use orgdesk::domain::event::{EventStatus, NewEvent, RegistrationKey};
use orgdesk::domain::foundation::{ErrorCode, FirebaseUid, PageRequest, SchoolIdNumber};
use orgdesk::domain::member::{NewMember, Program};
use orgdesk::domain::requirement::{ComplianceStatus, NewRequirement, RequirementStatus};
use orgdesk::domain::user::{AccountDetails, NewUser, Role};
use orgdesk::ports::{
    EventRepository, MemberRepository, ProfileRepository, RequirementRepository, UserRepository,
};

async fn pool() -> PgPool {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = PgPool::connect(&url).await.unwrap();
    run_migrations(&pool).await.unwrap();
    pool
}

fn unique(prefix: &str) -> String {
    format!("{}-{}", prefix, Utc::now().timestamp_nanos_opt().unwrap())
}

fn new_member(school_id: &str) -> NewMember {
    NewMember {
        first_name: "Barbara".into(),
        last_name: "Liskov".into(),
        suffix: None,
        id_school_number: SchoolIdNumber::new(school_id).unwrap(),
        email: None,
        birth_date: NaiveDate::from_ymd_opt(2001, 11, 7).unwrap(),
        enrollment_date: NaiveDate::from_ymd_opt(2019, 8, 12).unwrap(),
        program: Program::Bscs,
        year: 4,
        is_paid: true,
    }
}

fn new_user(email: &str) -> NewUser {
    NewUser {
        first_name: "Frances".into(),
        last_name: "Allen".into(),
        email: email.into(),
        email_verified: false,
        firebase_uid: Some(FirebaseUid::new(unique("uid")).unwrap()),
        id_school_number: None,
        role: Role::User,
        password_hash: None,
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Users and Profiles
// ════════════════════════════════════════════════════════════════════════════

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn user_is_created_with_its_profile() {
    let pool = pool().await;
    let users = PostgresUserRepository::new(pool.clone());
    let profiles = PostgresProfileRepository::new(pool);
    let email = format!("{}@example.edu", unique("frances"));

    let user = users.create_with_profile(&new_user(&email)).await.unwrap();
    let profile = profiles.find_by_user(user.id).await.unwrap().unwrap();

    assert_eq!(profile.first_name, "Frances");
    assert_eq!(profile.email.as_deref(), Some(email.as_str()));
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn duplicate_email_is_conflict() {
    let pool = pool().await;
    let users = PostgresUserRepository::new(pool);
    let email = format!("{}@example.edu", unique("dup"));
    users.create_with_profile(&new_user(&email)).await.unwrap();

    let err = users.create_with_profile(&new_user(&email)).await.unwrap_err();

    assert_eq!(err.code, ErrorCode::Conflict);
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn failed_account_update_changes_nothing() {
    let pool = pool().await;
    let users = PostgresUserRepository::new(pool.clone());
    let profiles = PostgresProfileRepository::new(pool);
    let email = format!("{}@example.edu", unique("acct"));
    let user = users.create_with_profile(&new_user(&email)).await.unwrap();

    let result = profiles
        .update_account(
            user.id,
            &AccountDetails {
                email: format!("{}@example.edu", unique("moved")),
                phone_number: "0".repeat(30),
                gender: "female".into(),
            },
        )
        .await;

    assert!(result.is_err());
    let reloaded = users.find_by_id(user.id).await.unwrap().unwrap();
    assert_eq!(reloaded.email, email);
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn student_listing_excludes_admins() {
    let pool = pool().await;
    let users = PostgresUserRepository::new(pool);
    let mut admin = new_user(&format!("{}@example.edu", unique("admin")));
    admin.role = Role::Admin;
    let admin = users.create_with_profile(&admin).await.unwrap();

    let page = users
        .list_students(PageRequest::new(1, 100))
        .await
        .unwrap();

    assert!(page.items.iter().all(|u| u.id != admin.id));
}

// ════════════════════════════════════════════════════════════════════════════
// Members and Events
// ════════════════════════════════════════════════════════════════════════════

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn member_reads_back_with_program_name() {
    let pool = pool().await;
    let members = PostgresMemberRepository::new(pool);
    let school_id = unique("S");

    let created = members.create(&new_member(&school_id)).await.unwrap();
    let by_school = members
        .find_by_id_or_school_id(&school_id)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(by_school.id, created.id);
    assert!(by_school.program_name.is_some());
    let err = members.create(&new_member(&school_id)).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::Conflict);
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn registration_is_unique_per_event_and_member() {
    let pool = pool().await;
    let members = PostgresMemberRepository::new(pool.clone());
    let events = PostgresEventRepository::new(pool);
    let member = members.create(&new_member(&unique("R"))).await.unwrap();
    let event = events
        .create(&NewEvent {
            name: "Code Retreat".into(),
            description: String::new(),
            venue: "Lab 3".into(),
            event_date: Utc::now().date_naive(),
            time_from: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            time_to: NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
            registration_start: None,
            registration_end: None,
            max_participants: Some(20),
            status: EventStatus::Upcoming,
        })
        .await
        .unwrap();
    let key = RegistrationKey {
        event_id: event.id,
        member_id: member.id,
    };

    events.register(key).await.unwrap();
    let err = events.register(key).await.unwrap_err();

    assert_eq!(err.code, ErrorCode::Conflict);
    assert!(events.find_registration(key).await.unwrap().is_some());
}

// ════════════════════════════════════════════════════════════════════════════
// Requirements
// ════════════════════════════════════════════════════════════════════════════

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn compliance_upserts_and_counts_by_status() {
    let pool = pool().await;
    let members = PostgresMemberRepository::new(pool.clone());
    let requirements = PostgresRequirementRepository::new(pool);
    let first = members.create(&new_member(&unique("C"))).await.unwrap();
    let second = members.create(&new_member(&unique("C"))).await.unwrap();
    let requirement = requirements
        .create(&NewRequirement {
            name: "Parental Consent".into(),
            description: None,
            status: RequirementStatus::Open,
            requirement_date: NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
        })
        .await
        .unwrap();

    requirements
        .record_compliance(requirement.id, first.id, ComplianceStatus::Pending)
        .await
        .unwrap();
    requirements
        .record_compliance(requirement.id, first.id, ComplianceStatus::Complied)
        .await
        .unwrap();
    requirements
        .record_compliance(requirement.id, second.id, ComplianceStatus::NotComplied)
        .await
        .unwrap();

    let mut counts = requirements
        .compliance_counts(&[requirement.id])
        .await
        .unwrap();
    counts.sort_by(|a, b| a.status.cmp(&b.status));

    let summary: Vec<(&str, i64)> = counts.iter().map(|c| (c.status.as_str(), c.count)).collect();
    assert_eq!(summary, vec![("complied", 1), ("not_complied", 1)]);
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn archive_keeps_the_row() {
    let pool = pool().await;
    let requirements = PostgresRequirementRepository::new(pool);
    let requirement = requirements
        .create(&NewRequirement {
            name: "Waiver 2025".into(),
            description: Some("Superseded".into()),
            status: RequirementStatus::Closed,
            requirement_date: NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
        })
        .await
        .unwrap();

    assert!(requirements.archive(requirement.id).await.unwrap());

    let archived = requirements.find_by_id(requirement.id).await.unwrap().unwrap();
    assert_eq!(archived.status, RequirementStatus::Archived);
}
