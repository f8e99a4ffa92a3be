use serde::{Deserialize, Serialize};

use crate::{edit_distance, is_contained, normalize};

/// Hint words this close to a forbidden word count as using it.
pub const MAX_EDIT_DISTANCE: usize = 1;

/// Whether a hint may be shown to the guessing side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Forbidden,
    Ok,
}

/// Why a hint word was matched against a forbidden word.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchReason {
    /// One token is a (possibly suffix-trimmed) substring of the other.
    Contained,
    /// The tokens are within [`MAX_EDIT_DISTANCE`] edits of each other.
    EditDistance(usize),
}

/// The first (forbidden part, hint word) pair that made a hint illegal.
///
/// Both words are given in normalized form. Only useful for diagnostics,
/// callers should not depend on which pair is reported when several match.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Violation {
    pub forbidden_part: String,
    pub hint_word: String,
    pub reason: MatchReason,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.reason {
            MatchReason::Contained => write!(
                f,
                "'{}' is a derivative of the forbidden word '{}'",
                self.hint_word, self.forbidden_part
            ),
            MatchReason::EditDistance(dist) => write!(
                f,
                "'{}' is {} edit(s) away from the forbidden word '{}'",
                self.hint_word, dist, self.forbidden_part
            ),
        }
    }
}

/// Looks for a hint word that gives away one of the forbidden words.
///
/// Forbidden entries may be phrases; they are split on whitespace and every
/// part is compared on its own. Pairs are checked in forbidden-entry order,
/// then hint-word order, and the first match is returned. Tokens that
/// normalize to nothing (pure punctuation) are compared as empty words, so
/// they still match any word of at most one char.
pub fn find_violation<F, H>(forbidden_words: &[F], hint_main_words: &[H]) -> Option<Violation>
where
    F: AsRef<str>,
    H: AsRef<str>,
{
    let hint_words: Vec<String> = hint_main_words
        .iter()
        .map(|word| normalize(word.as_ref()))
        .collect();

    for entry in forbidden_words {
        for part in entry.as_ref().split_whitespace().map(normalize) {
            for hint_word in &hint_words {
                let reason = if is_contained(&part, hint_word) {
                    MatchReason::Contained
                } else {
                    let dist = edit_distance(&part, hint_word);
                    if dist > MAX_EDIT_DISTANCE {
                        continue;
                    }
                    MatchReason::EditDistance(dist)
                };
                return Some(Violation {
                    forbidden_part: part,
                    hint_word: hint_word.clone(),
                    reason,
                });
            }
        }
    }
    None
}

/// Binary form of [`find_violation()`].
pub fn evaluate<F, H>(forbidden_words: &[F], hint_main_words: &[H]) -> Verdict
where
    F: AsRef<str>,
    H: AsRef<str>,
{
    match find_violation(forbidden_words, hint_main_words) {
        Some(_) => Verdict::Forbidden,
        None => Verdict::Ok,
    }
}

/// Checks a hint for a card, treating the target word as forbidden too.
pub fn check_hint<H: AsRef<str>>(
    target: &str,
    forbidden: &[String],
    hint_main_words: &[H],
) -> Option<Violation> {
    let mut forbidden_words: Vec<&str> = forbidden.iter().map(String::as_str).collect();
    forbidden_words.push(target);
    find_violation(&forbidden_words, hint_main_words)
}
