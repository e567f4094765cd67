use std::fmt;

use serde::{Deserialize, Serialize};

/// Languages the evaluation pipeline accepts for grading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Language {
    Cpp,
    Java,
    Python,
    JavaScript,
}

impl Language {
    /// Resolves a human-readable language name, case-insensitively.
    ///
    /// Returns `None` for unsupported names; callers treat absence as a
    /// request-validation failure, not a pipeline failure.
    pub fn resolve(name: &str) -> Option<Self> {
        match name.to_ascii_uppercase().as_str() {
            "CPP" => Some(Self::Cpp),
            "JAVA" => Some(Self::Java),
            "PYTHON" => Some(Self::Python),
            "JAVASCRIPT" => Some(Self::JavaScript),
            _ => None,
        }
    }

    /// Canonical uppercase name, used as the key in problem snippet and
    /// reference-solution maps.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cpp => "CPP",
            Self::Java => "JAVA",
            Self::Python => "PYTHON",
            Self::JavaScript => "JAVASCRIPT",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::Language;

    #[test]
    fn resolve_is_case_insensitive() {
        assert_eq!(Language::resolve("python"), Some(Language::Python));
        assert_eq!(Language::resolve("Python"), Some(Language::Python));
        assert_eq!(Language::resolve("JAVASCRIPT"), Some(Language::JavaScript));
    }

    #[test]
    fn resolve_rejects_unsupported_names() {
        assert_eq!(Language::resolve("COBOL"), None);
        assert_eq!(Language::resolve(""), None);
    }
}
