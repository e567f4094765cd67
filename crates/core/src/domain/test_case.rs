use serde::{Deserialize, Serialize};

/// One stdin/expected-stdout pair owned by a problem.
///
/// Test cases are part of the problem's value and have no independent
/// lifecycle; they are stored as an ordered JSON array on the problem row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    pub input: String,
    #[serde(rename = "output")]
    pub expected_output: String,
}

/// Worked example shown alongside the problem statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Example {
    pub input: String,
    pub output: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::TestCase;

    #[test]
    fn test_case_round_trips_with_output_field_name() {
        let case = TestCase {
            input: "1 2".to_string(),
            expected_output: "3".to_string(),
        };

        let json = serde_json::to_string(&case).expect("serialize test case");
        assert!(json.contains("\"output\":\"3\""));

        let decoded: TestCase = serde_json::from_str(&json).expect("deserialize test case");
        assert_eq!(decoded, case);
    }
}
