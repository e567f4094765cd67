mod difficulty;
mod ids;
mod language;
mod submission_status;
mod test_case;

pub use difficulty::Difficulty;
pub use ids::{ProblemId, SubmissionId, UserId};
pub use language::Language;
pub use submission_status::SubmissionStatus;
pub use test_case::{Example, TestCase};
