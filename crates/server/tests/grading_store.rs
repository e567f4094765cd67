use std::collections::BTreeMap;
use std::time::Duration;

use codeforge_core::domain::{Difficulty, Language, SubmissionStatus, TestCase};
use codeforge_migration::{Migrator, MigratorTrait};
use codeforge_server::entity::{problem_solved, submission, test_case_result};
use codeforge_server::repository::{
    NewProblem, NewUser, ProblemRepository, SeaOrmGradingStore, SeaOrmProblemRepository,
    SeaOrmUserRepository, UserRepository,
};
use judge_orchestrator::{
    GradingStore, NewSubmission, NewTestCaseResult, ProblemCatalog, UserDirectory,
};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, EntityTrait};

async fn setup() -> DatabaseConnection {
    // A single pooled connection keeps the in-memory database alive and
    // shared for the whole test.
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1);

    let db = Database::connect(options)
        .await
        .expect("connect to in-memory sqlite");
    Migrator::up(&db, None).await.expect("apply migrations");
    db
}

async fn seed_user_and_problem(
    db: &DatabaseConnection,
) -> (
    codeforge_server::repository::UserRecord,
    codeforge_server::repository::ProblemRecord,
) {
    let users = SeaOrmUserRepository::new(db.clone());
    let problems = SeaOrmProblemRepository::new(db.clone());

    let user = users
        .create(NewUser {
            external_id: "ext-alice".to_string(),
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
        })
        .await
        .expect("create user");

    let problem = problems
        .create(NewProblem {
            user_id: user.id,
            title: "Sum of Two Numbers".to_string(),
            description: "Read two integers and print their sum.".to_string(),
            difficulty: Difficulty::Easy,
            tags: vec!["math".to_string()],
            examples: Vec::new(),
            constraints: "0 <= a, b <= 1000".to_string(),
            code_snippets: BTreeMap::new(),
            reference_solutions: BTreeMap::from([(
                "PYTHON".to_string(),
                "a, b = map(int, input().split()); print(a + b)".to_string(),
            )]),
            test_cases: vec![
                TestCase {
                    input: "1 2".to_string(),
                    expected_output: "3".to_string(),
                },
                TestCase {
                    input: "4 5".to_string(),
                    expected_output: "9".to_string(),
                },
            ],
        })
        .await
        .expect("create problem");

    (user, problem)
}

fn result_row(test_case: i32, passed: bool) -> NewTestCaseResult {
    NewTestCaseResult {
        test_case,
        passed,
        stdout: Some(if passed { "3" } else { "0" }.to_string()),
        stderr: None,
        compile_output: None,
        expected: "3".to_string(),
        status: if passed { "Accepted" } else { "Wrong Answer" }.to_string(),
    }
}

fn new_submission(
    user: &codeforge_server::repository::UserRecord,
    problem: &codeforge_server::repository::ProblemRecord,
    status: SubmissionStatus,
) -> NewSubmission {
    NewSubmission {
        user_id: user.id,
        problem_id: problem.id,
        language: Language::Python,
        status,
        source_code: "a, b = map(int, input().split()); print(a + b)".to_string(),
    }
}

#[tokio::test]
async fn create_submission_persists_submission_and_results_together() {
    let db = setup().await;
    let (user, problem) = seed_user_and_problem(&db).await;
    let store = SeaOrmGradingStore::new(db.clone());

    let record = store
        .create_submission_with_results(
            new_submission(&user, &problem, SubmissionStatus::Accepted),
            vec![result_row(1, true), result_row(2, true)],
        )
        .await
        .expect("persist submission with results");

    assert_eq!(record.user_id, user.id);
    assert_eq!(record.problem_id, problem.id);
    assert_eq!(record.status, SubmissionStatus::Accepted);
    assert_eq!(record.language, Language::Python);

    let submissions = submission::Entity::find().all(&db).await.expect("query submissions");
    assert_eq!(submissions.len(), 1);

    let results = test_case_result::Entity::find()
        .all(&db)
        .await
        .expect("query test case results");
    assert_eq!(results.len(), 2);
    assert!(results
        .iter()
        .all(|row| row.submission_id == record.id.to_string()));
    assert_eq!(
        results.iter().map(|row| row.test_case).collect::<Vec<_>>(),
        vec![1, 2]
    );
}

#[tokio::test]
async fn upsert_problem_solved_is_idempotent() {
    let db = setup().await;
    let (user, problem) = seed_user_and_problem(&db).await;
    let store = SeaOrmGradingStore::new(db.clone());

    store
        .upsert_problem_solved(user.id, problem.id)
        .await
        .expect("first upsert");
    store
        .upsert_problem_solved(user.id, problem.id)
        .await
        .expect("second upsert must be a no-op");

    let rows = problem_solved::Entity::find()
        .all(&db)
        .await
        .expect("query problem_solved");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].user_id, user.id.to_string());
    assert_eq!(rows[0].problem_id, problem.id.to_string());

    let solved = store
        .solved_problems_for_user(user.id)
        .await
        .expect("list solved problems");
    assert_eq!(solved, vec![problem.id]);
}

#[tokio::test]
async fn submissions_are_listed_newest_first() {
    let db = setup().await;
    let (user, problem) = seed_user_and_problem(&db).await;
    let store = SeaOrmGradingStore::new(db.clone());

    let first = store
        .create_submission_with_results(
            new_submission(&user, &problem, SubmissionStatus::WrongAnswer),
            vec![result_row(1, false)],
        )
        .await
        .expect("persist first submission");

    tokio::time::sleep(Duration::from_millis(10)).await;

    let second = store
        .create_submission_with_results(
            new_submission(&user, &problem, SubmissionStatus::Accepted),
            vec![result_row(1, true)],
        )
        .await
        .expect("persist second submission");

    let listed = store
        .submissions_for_user_and_problem(user.id, problem.id)
        .await
        .expect("list submissions");

    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].id, second.id);
    assert_eq!(listed[1].id, first.id);
    assert_eq!(listed[0].status, SubmissionStatus::Accepted);
    assert_eq!(listed[1].status, SubmissionStatus::WrongAnswer);
}

#[tokio::test]
async fn problem_catalog_returns_ordered_test_cases() {
    let db = setup().await;
    let (_, problem) = seed_user_and_problem(&db).await;
    let problems = SeaOrmProblemRepository::new(db);

    let catalog_problem = ProblemCatalog::find_by_id(&problems, problem.id)
        .await
        .expect("catalog lookup")
        .expect("problem should exist");

    assert_eq!(catalog_problem.title, "Sum of Two Numbers");
    assert_eq!(catalog_problem.test_cases.len(), 2);
    assert_eq!(catalog_problem.test_cases[0].input, "1 2");
    assert_eq!(catalog_problem.test_cases[1].expected_output, "9");
}

#[tokio::test]
async fn user_directory_resolves_external_identity() {
    let db = setup().await;
    let (user, _) = seed_user_and_problem(&db).await;
    let users = SeaOrmUserRepository::new(db);

    let resolved = users
        .find_by_external_id("ext-alice")
        .await
        .expect("directory lookup")
        .expect("user should exist");
    assert_eq!(resolved.id, user.id);
    assert_eq!(resolved.username, "alice");

    let missing = users
        .find_by_external_id("ext-nobody")
        .await
        .expect("directory lookup");
    assert!(missing.is_none());
}
