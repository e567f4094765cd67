use serde::{Deserialize, Serialize};

/// Terminal grading verdict persisted on a submission.
///
/// No in-flight status is ever stored; a submission row only exists once
/// grading has finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubmissionStatus {
    Accepted,
    WrongAnswer,
}
