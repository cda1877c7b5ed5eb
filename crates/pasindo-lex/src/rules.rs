//! Loading the DFA rules document (spec §3, §6).
//!
//! The shipped binary embeds a default rules document via `include_str!` so
//! it needs no runtime file lookup (mirroring the original's
//! `lexer/dfa_rules.json` convention, but baked in rather than read from
//! disk at startup); [`load_rules`] also accepts an explicit path so tests
//! and hosts can supply their own document.

use std::path::Path;

use crate::dfa::DfaRules;
use crate::LexicalError;

const DEFAULT_RULES_JSON: &str = include_str!("../resources/dfa_rules.json");

/// Parses the embedded default DFA rules document.
pub fn default_rules() -> DfaRules {
    serde_json::from_str(DEFAULT_RULES_JSON).expect("embedded dfa_rules.json must parse")
}

/// Loads a DFA rules document from an explicit path override.
pub fn load_rules(path: &Path) -> Result<DfaRules, LexicalError> {
    let text = std::fs::read_to_string(path).map_err(|e| LexicalError::RulesIo {
        path: path.display().to_string(),
        source: e.to_string(),
    })?;
    serde_json::from_str(&text).map_err(|e| LexicalError::RulesParse {
        path: path.display().to_string(),
        source: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rules_parse_and_have_expected_keywords() {
        let rules = default_rules();
        assert!(rules.keywords.iter().any(|k| k == "program"));
        assert!(rules.keywords.iter().any(|k| k == "selesai"));
        assert!(rules.word_arithmetic.iter().any(|k| k == "bagi"));
        assert!(rules.word_logical.iter().any(|k| k == "dan"));
        assert!(!rules.final_states.is_empty());
    }

    #[test]
    fn missing_path_is_an_io_error() {
        let err = load_rules(Path::new("/nonexistent/dfa_rules.json")).unwrap_err();
        assert!(matches!(err, LexicalError::RulesIo { .. }));
    }
}
