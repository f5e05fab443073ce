//! Integration tests for the group files queries and the Postgres approval store.
//!
//! Exercises the repository layer against a real database:
//! - Group rows restricted to a grouping, with empty groups kept
//! - Member votes including members who never voted
//! - Vote upserts
//! - Approval summaries built through `PgApprovalStore`
//! - Overall status scoped to the publication of the resolved record

use assert_matches::assert_matches;
use publication_core::approval::{OverallStatus, VotePolicy};
use publication_core::display::StrftimeDisplay;
use publication_core::error::CoreError;
use publication_core::summary::ApprovalAggregator;
use publication_core::types::{DbId, StoredFile};
use publication_db::models::group_approval::UpsertGroupApproval;
use publication_db::models::publication_file::CreatePublicationFile;
use publication_db::repositories::{GroupApprovalRepo, GroupRepo, PublicationFileRepo, PublicationRepo};
use publication_db::PgApprovalStore;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const COURSE: DbId = 3;

async fn insert_user(pool: &PgPool, first: &str, last: &str) -> DbId {
    let (id,): (DbId,) =
        sqlx::query_as("INSERT INTO users (first_name, last_name) VALUES ($1, $2) RETURNING id")
            .bind(first)
            .bind(last)
            .fetch_one(pool)
            .await
            .unwrap();
    id
}

async fn insert_group(pool: &PgPool, name: &str, members: &[DbId]) -> DbId {
    let (id,): (DbId,) =
        sqlx::query_as("INSERT INTO course_groups (course_id, name) VALUES ($1, $2) RETURNING id")
            .bind(COURSE)
            .bind(name)
            .fetch_one(pool)
            .await
            .unwrap();
    for user_id in members {
        sqlx::query("INSERT INTO group_members (group_id, user_id) VALUES ($1, $2)")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await
            .unwrap();
    }
    id
}

async fn add_to_grouping(pool: &PgPool, grouping_id: DbId, group_id: DbId) {
    sqlx::query("INSERT INTO groupings_groups (grouping_id, group_id) VALUES ($1, $2)")
        .bind(grouping_id)
        .bind(group_id)
        .execute(pool)
        .await
        .unwrap();
}

async fn insert_publication(pool: &PgPool, grouping_id: Option<DbId>, group_approval: i16) -> DbId {
    let import_from: Option<DbId> = match grouping_id {
        Some(grouping) => {
            let (id,): (DbId,) = sqlx::query_as(
                "INSERT INTO assignments (course_id, team_submission_grouping_id)
                 VALUES ($1, $2) RETURNING id",
            )
            .bind(COURSE)
            .bind(grouping)
            .fetch_one(pool)
            .await
            .unwrap();
            Some(id)
        }
        None => None,
    };
    let (id,): (DbId,) = sqlx::query_as(
        "INSERT INTO publications (course_id, name, import_from, obtain_student_approval, group_approval)
         VALUES ($1, 'Essays', $2, TRUE, $3) RETURNING id",
    )
    .bind(COURSE)
    .bind(import_from)
    .bind(group_approval)
    .fetch_one(pool)
    .await
    .unwrap();
    id
}

fn new_file(publication_id: DbId, group_id: DbId, file_id: DbId, student_approval: Option<i16>) -> CreatePublicationFile {
    CreatePublicationFile {
        publication_id,
        user_id: group_id,
        file_id,
        filename: format!("file-{file_id}.pdf"),
        student_approval,
        teacher_approval: None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn group_rows_follow_team_grouping(pool: PgPool) {
    let ann = insert_user(&pool, "Ann", "Able").await;
    let red = insert_group(&pool, "Red", &[ann]).await;
    let blue = insert_group(&pool, "Blue", &[]).await;
    let outside = insert_group(&pool, "Outside", &[]).await;
    add_to_grouping(&pool, 8, red).await;
    add_to_grouping(&pool, 8, blue).await;

    let publication_id = insert_publication(&pool, Some(8), 0).await;
    PublicationFileRepo::create(&pool, &new_file(publication_id, red, 100, Some(2)))
        .await
        .unwrap();
    PublicationFileRepo::create(&pool, &new_file(publication_id, red, 101, Some(1)))
        .await
        .unwrap();
    PublicationFileRepo::create(&pool, &new_file(publication_id, outside, 102, None))
        .await
        .unwrap();

    let publication = PublicationRepo::find_by_id(&pool, publication_id)
        .await
        .unwrap()
        .unwrap();
    let grouping = PublicationRepo::team_grouping_id(&pool, &publication).await.unwrap();
    assert_eq!(grouping, 8);

    let rows = GroupRepo::list_group_rows(&pool, &publication, grouping).await.unwrap();
    let names: Vec<_> = rows.iter().map(|r| r.group_name.as_str()).collect();
    assert_eq!(names, ["Blue", "Red"]);

    assert_eq!(rows[0].file_count, 0);
    assert_eq!(rows[0].student_approval, None);
    assert!(rows[0].time_modified.is_none());

    assert_eq!(rows[1].file_count, 2);
    assert_eq!(rows[1].student_approval, Some(3));
    assert!(rows[1].time_modified.is_some());

    let all = GroupRepo::list_group_rows(&pool, &publication, 0).await.unwrap();
    assert_eq!(all.len(), 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn votes_include_members_without_vote(pool: PgPool) {
    let ann = insert_user(&pool, "Ann", "Able").await;
    let ben = insert_user(&pool, "Ben", "Baker").await;
    let group = insert_group(&pool, "Red", &[ann, ben]).await;
    let publication_id = insert_publication(&pool, None, 0).await;
    let file = PublicationFileRepo::create(&pool, &new_file(publication_id, group, 100, None))
        .await
        .unwrap();

    GroupApprovalRepo::upsert(
        &pool,
        &UpsertGroupApproval {
            file_id: file.id,
            user_id: ann,
            approval: Some(1),
        },
    )
    .await
    .unwrap();

    let votes = GroupApprovalRepo::list_votes(&pool, file.id).await.unwrap();
    assert_eq!(votes.len(), 2);
    assert_eq!(votes[0].user_id, ann);
    assert_eq!(votes[0].approval, Some(1));
    assert!(votes[0].approved_at.is_some());
    assert_eq!(votes[1].user_id, ben);
    assert_eq!(votes[1].approval, None);
    assert!(votes[1].approved_at.is_none());

    // Withdrawing a vote clears the time again.
    GroupApprovalRepo::upsert(
        &pool,
        &UpsertGroupApproval {
            file_id: file.id,
            user_id: ann,
            approval: None,
        },
    )
    .await
    .unwrap();
    let votes = GroupApprovalRepo::list_votes(&pool, file.id).await.unwrap();
    assert_eq!(votes[0].approval, None);
    assert!(votes[0].approved_at.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn store_builds_summary(pool: PgPool) {
    let ann = insert_user(&pool, "Ann", "Able").await;
    let ben = insert_user(&pool, "Ben", "Baker").await;
    let cid = insert_user(&pool, "Cid", "Cole").await;
    let group = insert_group(&pool, "Red", &[ann, ben, cid]).await;
    let publication_id = insert_publication(&pool, None, 1).await;
    let file = PublicationFileRepo::create(&pool, &new_file(publication_id, group, 100, Some(2)))
        .await
        .unwrap();
    for (user_id, approval) in [(ann, Some(1)), (ben, Some(0))] {
        GroupApprovalRepo::upsert(
            &pool,
            &UpsertGroupApproval {
                file_id: file.id,
                user_id,
                approval,
            },
        )
        .await
        .unwrap();
    }

    let publication = PublicationRepo::find_by_id(&pool, publication_id)
        .await
        .unwrap()
        .unwrap();
    let store = PgApprovalStore::new(pool.clone());
    let display = StrftimeDisplay::default();
    let aggregator = ApprovalAggregator::new(&store, &display, VotePolicy::Strict);

    let summary = aggregator
        .summarize(&publication.context().unwrap(), &file.stored_file())
        .await
        .unwrap();

    assert_eq!(summary.approved.len(), 1);
    assert_eq!(summary.approved[0].name, "Ann Able");
    assert_ne!(summary.approved[0].time, "-");
    assert_eq!(summary.rejected[0].name, "Ben Baker");
    assert_eq!(summary.pending[0].name, "Cid Cole");
    assert_eq!(summary.pending[0].time, "-");
    assert_eq!(summary.overall(), OverallStatus::Approved);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn store_rejects_file_of_other_publication(pool: PgPool) {
    let group = insert_group(&pool, "Red", &[]).await;
    let first = insert_publication(&pool, None, 0).await;
    let second = insert_publication(&pool, None, 0).await;
    PublicationFileRepo::create(&pool, &new_file(first, group, 100, None))
        .await
        .unwrap();

    let publication = PublicationRepo::find_by_id(&pool, second)
        .await
        .unwrap()
        .unwrap();
    let store = PgApprovalStore::new(pool.clone());
    let display = StrftimeDisplay::default();
    let file = StoredFile {
        id: 100,
        filename: "file-100.pdf".into(),
    };

    let result = ApprovalAggregator::new(&store, &display, VotePolicy::Strict)
        .summarize(&publication.context().unwrap(), &file)
        .await;

    assert_matches!(result, Err(CoreError::NotFound { id: 100, .. }));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn shared_file_id_reads_status_of_its_own_publication(pool: PgPool) {
    let group = insert_group(&pool, "Red", &[]).await;
    let first = insert_publication(&pool, None, 0).await;
    let second = insert_publication(&pool, None, 0).await;
    PublicationFileRepo::create(&pool, &new_file(first, group, 100, Some(2)))
        .await
        .unwrap();
    let file = PublicationFileRepo::create(&pool, &new_file(second, group, 100, Some(1)))
        .await
        .unwrap();

    let store = PgApprovalStore::new(pool.clone());
    let display = StrftimeDisplay::default();
    let aggregator = ApprovalAggregator::new(&store, &display, VotePolicy::Strict);

    let publication = PublicationRepo::find_by_id(&pool, second)
        .await
        .unwrap()
        .unwrap();
    let summary = aggregator
        .summarize(&publication.context().unwrap(), &file.stored_file())
        .await
        .unwrap();
    assert_eq!(summary.overall(), OverallStatus::Rejected);
    assert!(summary.status.rejected);
    assert!(!summary.status.approved);

    let publication = PublicationRepo::find_by_id(&pool, first)
        .await
        .unwrap()
        .unwrap();
    let summary = aggregator
        .summarize(&publication.context().unwrap(), &file.stored_file())
        .await
        .unwrap();
    assert_eq!(summary.overall(), OverallStatus::Approved);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn malformed_vote_surfaces_as_integrity_error(pool: PgPool) {
    let ann = insert_user(&pool, "Ann", "Able").await;
    let group = insert_group(&pool, "Red", &[ann]).await;
    let publication_id = insert_publication(&pool, None, 0).await;
    let file = PublicationFileRepo::create(&pool, &new_file(publication_id, group, 100, None))
        .await
        .unwrap();
    sqlx::query("INSERT INTO publication_group_approvals (file_id, user_id, approval) VALUES ($1, $2, 5)")
        .bind(file.id)
        .bind(ann)
        .execute(&pool)
        .await
        .unwrap();

    let publication = PublicationRepo::find_by_id(&pool, publication_id)
        .await
        .unwrap()
        .unwrap();
    let store = PgApprovalStore::new(pool.clone());
    let display = StrftimeDisplay::default();

    let strict = ApprovalAggregator::new(&store, &display, VotePolicy::Strict)
        .summarize(&publication.context().unwrap(), &file.stored_file())
        .await;
    assert_matches!(strict, Err(CoreError::DataIntegrity(_)));

    let lenient = ApprovalAggregator::new(&store, &display, VotePolicy::Lenient)
        .summarize(&publication.context().unwrap(), &file.stored_file())
        .await
        .unwrap();
    assert_eq!(lenient.member_count(), 0);
}
