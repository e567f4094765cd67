/// Execution outcome categories reported by the remote execution service.
///
/// The service speaks in numeric status ids; `from_id` is the only place
/// that numbering scheme appears, so call sites never compare raw integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExecutionStatus {
    Queued,
    Running,
    Accepted,
    WrongAnswer,
    TimeLimitExceeded,
    CompileError,
    RuntimeError,
    Other,
}

impl ExecutionStatus {
    pub fn from_id(id: i32) -> Self {
        match id {
            1 => Self::Queued,
            2 => Self::Running,
            3 => Self::Accepted,
            4 => Self::WrongAnswer,
            5 => Self::TimeLimitExceeded,
            6 => Self::CompileError,
            // The service reserves a block of ids for runtime error variants.
            7..=12 => Self::RuntimeError,
            _ => Self::Other,
        }
    }

    /// Terminal statuses never change on re-query; only queued and running
    /// batches are worth polling again.
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Queued | Self::Running)
    }
}

#[cfg(test)]
mod tests {
    use super::ExecutionStatus;

    #[test]
    fn maps_known_ids() {
        assert_eq!(ExecutionStatus::from_id(1), ExecutionStatus::Queued);
        assert_eq!(ExecutionStatus::from_id(2), ExecutionStatus::Running);
        assert_eq!(ExecutionStatus::from_id(3), ExecutionStatus::Accepted);
        assert_eq!(ExecutionStatus::from_id(4), ExecutionStatus::WrongAnswer);
        assert_eq!(ExecutionStatus::from_id(5), ExecutionStatus::TimeLimitExceeded);
        assert_eq!(ExecutionStatus::from_id(6), ExecutionStatus::CompileError);
        assert_eq!(ExecutionStatus::from_id(11), ExecutionStatus::RuntimeError);
        assert_eq!(ExecutionStatus::from_id(13), ExecutionStatus::Other);
    }

    #[test]
    fn only_queued_and_running_are_non_terminal() {
        assert!(!ExecutionStatus::Queued.is_terminal());
        assert!(!ExecutionStatus::Running.is_terminal());
        assert!(ExecutionStatus::Accepted.is_terminal());
        assert!(ExecutionStatus::WrongAnswer.is_terminal());
        assert!(ExecutionStatus::Other.is_terminal());
    }
}
