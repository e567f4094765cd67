//! Maps supported languages to the execution service's numeric identifiers.

use codeforge_core::domain::Language;

/// Identifier the remote execution service assigns to each supported
/// language. These are service-defined and stable.
pub fn execution_language_id(language: Language) -> i32 {
    match language {
        Language::Cpp => 54,
        Language::Java => 62,
        Language::Python => 71,
        Language::JavaScript => 63,
    }
}

/// Resolves a human-readable language name (case-insensitive) to the pair of
/// domain language and execution-service id. `None` means the language is
/// unsupported, which callers surface as a validation failure.
pub fn resolve_language_id(name: &str) -> Option<(Language, i32)> {
    Language::resolve(name).map(|language| (language, execution_language_id(language)))
}

#[cfg(test)]
mod tests {
    use codeforge_core::domain::Language;

    use super::resolve_language_id;

    #[test]
    fn resolves_supported_languages_case_insensitively() {
        assert_eq!(resolve_language_id("python"), Some((Language::Python, 71)));
        assert_eq!(resolve_language_id("CPP"), Some((Language::Cpp, 54)));
        assert_eq!(resolve_language_id("Java"), Some((Language::Java, 62)));
        assert_eq!(
            resolve_language_id("javascript"),
            Some((Language::JavaScript, 63))
        );
    }

    #[test]
    fn unsupported_names_are_absent() {
        assert_eq!(resolve_language_id("COBOL"), None);
    }
}
