use sea_orm_migration::prelude::*;
use sea_orm_migration::schema::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(string_len(User::Id, 36).primary_key())
                    // Subject identifier from the upstream auth provider.
                    .col(string_len(User::ExternalId, 255).unique_key())
                    .col(string_len(User::Username, 50).unique_key())
                    .col(string_len(User::Email, 255).unique_key())
                    .col(timestamp(User::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp(User::UpdatedAt).default(Expr::current_timestamp()))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Problem::Table)
                    .if_not_exists()
                    .col(string_len(Problem::Id, 36).primary_key())
                    .col(string_len(Problem::UserId, 36))
                    .col(string_len(Problem::Title, 200))
                    .col(text(Problem::Description))
                    // Difficulty enum is represented in app code. DB stores compact numeric code.
                    // 0=easy, 1=medium, 2=hard
                    .col(
                        small_integer(Problem::Difficulty)
                            .check(Expr::col(Problem::Difficulty).gte(0))
                            .check(Expr::col(Problem::Difficulty).lte(2)),
                    )
                    .col(json(Problem::Tags))
                    .col(json(Problem::Examples))
                    .col(text(Problem::Constraints))
                    // Keyed by canonical uppercase language name.
                    .col(json(Problem::CodeSnippets))
                    .col(json(Problem::ReferenceSolutions))
                    // Ordered array; test cases have no lifecycle of their own.
                    .col(json(Problem::TestCases))
                    .col(timestamp(Problem::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp(Problem::UpdatedAt).default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-problem-user_id")
                            .from(Problem::Table, Problem::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Submission::Table)
                    .if_not_exists()
                    .col(string_len(Submission::Id, 36).primary_key())
                    .col(string_len(Submission::UserId, 36))
                    .col(string_len(Submission::ProblemId, 36))
                    .col(text(Submission::SourceCode))
                    // Language enum is represented in app code.
                    // 0=cpp, 1=java, 2=python, 3=javascript
                    .col(
                        small_integer(Submission::Language)
                            .check(Expr::col(Submission::Language).gte(0))
                            .check(Expr::col(Submission::Language).lte(3)),
                    )
                    // Only terminal verdicts are stored: 0=accepted, 1=wrong_answer.
                    .col(
                        small_integer(Submission::Status)
                            .check(Expr::col(Submission::Status).gte(0))
                            .check(Expr::col(Submission::Status).lte(1)),
                    )
                    .col(timestamp(Submission::CreatedAt).default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-submission-user_id")
                            .from(Submission::Table, Submission::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-submission-problem_id")
                            .from(Submission::Table, Submission::ProblemId)
                            .to(Problem::Table, Problem::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TestCaseResult::Table)
                    .if_not_exists()
                    .col(string_len(TestCaseResult::Id, 36).primary_key())
                    .col(string_len(TestCaseResult::SubmissionId, 36))
                    // 1-based ordinal within the submission's batch.
                    .col(integer(TestCaseResult::TestCase))
                    .col(boolean(TestCaseResult::Passed))
                    .col(text_null(TestCaseResult::Stdout))
                    .col(text_null(TestCaseResult::Stderr))
                    .col(text_null(TestCaseResult::CompileOutput))
                    .col(text(TestCaseResult::Expected))
                    .col(string_len(TestCaseResult::Status, 100))
                    .col(timestamp(TestCaseResult::CreatedAt).default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-test_case_result-submission_id")
                            .from(TestCaseResult::Table, TestCaseResult::SubmissionId)
                            .to(Submission::Table, Submission::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ProblemSolved::Table)
                    .if_not_exists()
                    .col(string_len(ProblemSolved::UserId, 36))
                    .col(string_len(ProblemSolved::ProblemId, 36))
                    .col(timestamp(ProblemSolved::CreatedAt).default(Expr::current_timestamp()))
                    // Composite key enforces at most one row per (user, problem).
                    .primary_key(
                        Index::create()
                            .col(ProblemSolved::UserId)
                            .col(ProblemSolved::ProblemId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-problem_solved-user_id")
                            .from(ProblemSolved::Table, ProblemSolved::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-problem_solved-problem_id")
                            .from(ProblemSolved::Table, ProblemSolved::ProblemId)
                            .to(Problem::Table, Problem::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_submission_user_problem")
                    .table(Submission::Table)
                    .col(Submission::UserId)
                    .col(Submission::ProblemId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_submission_created_at")
                    .table(Submission::Table)
                    .col(Submission::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_test_case_result_submission_id")
                    .table(TestCaseResult::Table)
                    .col(TestCaseResult::SubmissionId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_problem_created_at")
                    .table(Problem::Table)
                    .col(Problem::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ProblemSolved::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(TestCaseResult::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Submission::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Problem::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(User::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum User {
    Table,
    Id,
    ExternalId,
    Username,
    Email,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Problem {
    Table,
    Id,
    UserId,
    Title,
    Description,
    Difficulty,
    Tags,
    Examples,
    Constraints,
    CodeSnippets,
    ReferenceSolutions,
    TestCases,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Submission {
    Table,
    Id,
    UserId,
    ProblemId,
    SourceCode,
    Language,
    Status,
    CreatedAt,
}

#[derive(DeriveIden)]
enum TestCaseResult {
    Table,
    Id,
    SubmissionId,
    TestCase,
    Passed,
    Stdout,
    Stderr,
    CompileOutput,
    Expected,
    Status,
    CreatedAt,
}

#[derive(DeriveIden)]
enum ProblemSolved {
    Table,
    UserId,
    ProblemId,
    CreatedAt,
}
