pub mod grading_repository;
pub mod problem_repository;
pub mod user_repository;

pub use grading_repository::SeaOrmGradingStore;
pub use problem_repository::{NewProblem, ProblemRecord, ProblemRepository, SeaOrmProblemRepository};
pub use user_repository::{NewUser, SeaOrmUserRepository, UserRecord, UserRepository};
