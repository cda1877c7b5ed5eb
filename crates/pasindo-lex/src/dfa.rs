//! The DFA engine: character classification and the pure transition step.
//!
//! Per spec §4.1 this is stateless and data-driven. `DfaRules` is the
//! external rule document (§3, §6); `char_category` and `step` are the two
//! contracts the lexer's maximal-munch driver is built on. Neither function
//! knows anything about Pascal-S-Indo specifically — they operate purely on
//! whatever rule document they're handed.

use std::collections::HashMap;

use serde::Deserialize;

/// Character classification used as a transition trigger alongside literal
/// characters and the `ANY` wildcard.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CharCategory {
    Letter,
    Digit,
    Newline,
    Whitespace,
    Underscore,
    Unknown,
}

/// Classifies a Unicode scalar per spec §4.1. Non-ASCII letters (e.g. any
/// script unicode `is_alphabetic` accepts) are `Letter`, so an identifier
/// need not be ASCII for the DFA to accept it (spec §6: "non-ASCII
/// identifiers are permitted if `char_category` classifies the characters
/// as letters").
pub fn char_category(c: char) -> CharCategory {
    match c {
        '\r' | '\n' => CharCategory::Newline,
        '_' => CharCategory::Underscore,
        c if c.is_ascii_digit() => CharCategory::Digit,
        c if c.is_alphabetic() => CharCategory::Letter,
        c if c.is_whitespace() => CharCategory::Whitespace,
        _ => CharCategory::Unknown,
    }
}

/// One final-state record: the token kind it accepts into, and whether that
/// token should be dropped rather than emitted (whitespace, comments).
#[derive(Clone, Debug, Deserialize)]
pub struct FinalState {
    pub token: String,
    #[serde(default)]
    pub ignore: bool,
}

/// The DFA rules document, loaded from the companion JSON resource (or an
/// explicit override path, or an embedded `include_str!` default — see
/// [`crate::rules::load_rules`]).
#[derive(Clone, Debug, Deserialize)]
pub struct DfaRules {
    pub initial_state: String,
    pub final_states: HashMap<String, FinalState>,
    pub transitions: HashMap<String, HashMap<String, String>>,
    #[serde(rename = "KEYWORDS")]
    pub keywords: Vec<String>,
    #[serde(rename = "WORD_ARITHMETIC")]
    pub word_arithmetic: Vec<String>,
    #[serde(rename = "WORD_LOGICAL")]
    pub word_logical: Vec<String>,
}

impl DfaRules {
    /// Looks up the next state for `state` on input character `c`.
    ///
    /// Lookup precedence, per spec §4.1: a literal single-character trigger
    /// first, then the character's category, then the `ANY` wildcard. A
    /// trigger key in `transitions[state]` is either a single character
    /// (the trigger *is* that character), one of the category names
    /// (`LETTER`, `DIGIT`, `NEWLINE`, `WHITESPACE`, `UNDERSCORE`), or `ANY`.
    pub fn step(&self, state: &str, c: char) -> Option<&str> {
        let row = self.transitions.get(state)?;

        let literal_key = c.to_string();
        if let Some(next) = row.get(&literal_key) {
            return Some(next.as_str());
        }

        let category_key = match char_category(c) {
            CharCategory::Letter => Some("LETTER"),
            CharCategory::Digit => Some("DIGIT"),
            CharCategory::Newline => Some("NEWLINE"),
            CharCategory::Whitespace => Some("WHITESPACE"),
            CharCategory::Underscore => Some("UNDERSCORE"),
            CharCategory::Unknown => None,
        };
        if let Some(key) = category_key {
            if let Some(next) = row.get(key) {
                return Some(next.as_str());
            }
        }

        row.get("ANY").map(|s| s.as_str())
    }

    pub fn final_state(&self, state: &str) -> Option<&FinalState> {
        self.final_states.get(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_letters_and_digits() {
        assert_eq!(char_category('a'), CharCategory::Letter);
        assert_eq!(char_category('Z'), CharCategory::Letter);
        assert_eq!(char_category('7'), CharCategory::Digit);
        assert_eq!(char_category('_'), CharCategory::Underscore);
        assert_eq!(char_category('\n'), CharCategory::Newline);
        assert_eq!(char_category('\r'), CharCategory::Newline);
        assert_eq!(char_category(' '), CharCategory::Whitespace);
        assert_eq!(char_category('@'), CharCategory::Unknown);
    }

    #[test]
    fn classifies_non_ascii_letters() {
        assert_eq!(char_category('α'), CharCategory::Letter);
        assert_eq!(char_category('状'), CharCategory::Letter);
    }

    #[test]
    fn step_prefers_literal_over_category_over_any() {
        let mut transitions = HashMap::new();
        let mut row = HashMap::new();
        row.insert("x".to_string(), "LITERAL".to_string());
        row.insert("LETTER".to_string(), "CATEGORY".to_string());
        row.insert("ANY".to_string(), "WILDCARD".to_string());
        transitions.insert("S0".to_string(), row);

        let rules = DfaRules {
            initial_state: "S0".to_string(),
            final_states: HashMap::new(),
            transitions,
            keywords: vec![],
            word_arithmetic: vec![],
            word_logical: vec![],
        };

        assert_eq!(rules.step("S0", 'x'), Some("LITERAL"));
        assert_eq!(rules.step("S0", 'y'), Some("CATEGORY"));
        assert_eq!(rules.step("S0", '@'), Some("WILDCARD"));
    }

    #[test]
    fn step_returns_none_with_no_matching_rule() {
        let rules = DfaRules {
            initial_state: "S0".to_string(),
            final_states: HashMap::new(),
            transitions: HashMap::new(),
            keywords: vec![],
            word_arithmetic: vec![],
            word_logical: vec![],
        };
        assert_eq!(rules.step("S0", 'x'), None);
    }
}
