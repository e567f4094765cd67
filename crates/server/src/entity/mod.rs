pub mod problem;
pub mod problem_solved;
pub mod submission;
pub mod test_case_result;
pub mod user;
