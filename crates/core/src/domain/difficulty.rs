use serde::{Deserialize, Serialize};

/// Problem difficulty, ordered Easy < Medium < Hard.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

#[cfg(test)]
mod tests {
    use super::Difficulty;

    #[test]
    fn difficulty_is_ordered() {
        assert!(Difficulty::Easy < Difficulty::Medium);
        assert!(Difficulty::Medium < Difficulty::Hard);
    }

    #[test]
    fn difficulty_serializes_uppercase() {
        let json = serde_json::to_string(&Difficulty::Medium).expect("serialize difficulty");
        assert_eq!(json, "\"MEDIUM\"");
    }
}
