//! Text command parser with positional `said()` matching.
//!
//! The grammar is deliberately trivial: verb first, object second, synonyms
//! collapsed to group ids by the dictionary, filler discarded. This is not a
//! general grammar parser; positional matching plus synonym groups covers the
//! whole command surface of a verb/object adventure while keeping the
//! vocabulary author-friendly.

use crate::dictionary::{Dictionary, FILLER};
use log::debug;

/// Sentinel group id matching the rest of the input unconditionally
/// ("radio <anything>" style commands).
pub const WILDCARD: u16 = 9999;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedWord {
    /// The surface form as matched (multi-word forms keep their space).
    pub word: String,
    pub group: u16,
}

/// Outcome of one `parse` call. Filler entries are already removed; on
/// failure `unknown` carries the first unrecognized token and `words` whatever
/// was recognized before it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseResult {
    pub ok: bool,
    pub words: Vec<ParsedWord>,
    pub unknown: Option<String>,
}

impl ParseResult {
    /// Positional match against the recognized words. The expected id at
    /// position 0 must equal the first group id, and so on. [`WILDCARD`] at
    /// any position succeeds unconditionally, including on an empty
    /// successful parse. Trailing unmatched input is allowed.
    pub fn said(&self, expected: &[u16]) -> bool {
        if !self.ok {
            return false;
        }
        for (i, &exp) in expected.iter().enumerate() {
            if exp == WILDCARD {
                return true;
            }
            match self.words.get(i) {
                Some(w) if w.group == exp => {}
                _ => return false,
            }
        }
        true
    }

    /// Group id at position 0, if any.
    pub fn verb(&self) -> Option<u16> {
        self.words.first().map(|w| w.group)
    }

    /// Group id at position 1, if any.
    pub fn noun(&self) -> Option<u16> {
        self.words.get(1).map(|w| w.group)
    }

    /// Whether any recognized word belongs to `group`.
    pub fn has(&self, group: u16) -> bool {
        self.words.iter().any(|w| w.group == group)
    }
}

pub struct TextParser {
    dictionary: Dictionary,
    last: ParseResult,
}

impl TextParser {
    pub fn new(dictionary: Dictionary) -> TextParser {
        TextParser {
            dictionary,
            last: ParseResult {
                ok: false,
                words: Vec::new(),
                unknown: None,
            },
        }
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    pub fn dictionary_mut(&mut self) -> &mut Dictionary {
        &mut self.dictionary
    }

    /// Parse a typed command: lowercase, strip non-alphanumeric characters,
    /// split on whitespace, drop bare "a"/"i" noise, then greedily match the
    /// longest dictionary phrase at each position. Filler is dropped; the
    /// first unknown token fails the parse and is reported.
    pub fn parse(&mut self, input: &str) -> ParseResult {
        let cleaned: String = input
            .to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
            .collect();
        let tokens: Vec<&str> = cleaned.split_whitespace().collect();

        let mut words = Vec::new();
        let mut unknown = None;
        let mut i = 0;
        while i < tokens.len() {
            let token = tokens[i];
            if token.len() == 1 && (token == "a" || token == "i") {
                i += 1;
                continue;
            }
            let window = self.dictionary.max_phrase_len().min(tokens.len() - i);
            let mut matched = None;
            for n in (1..=window).rev() {
                let phrase = tokens[i..i + n].join(" ");
                if let Some(group) = self.dictionary.lookup(&phrase) {
                    matched = Some((n, phrase, group));
                    break;
                }
            }
            match matched {
                Some((n, phrase, group)) => {
                    if group != FILLER {
                        words.push(ParsedWord {
                            word: phrase,
                            group,
                        });
                    }
                    i += n;
                }
                None => {
                    unknown = Some(token.to_string());
                    break;
                }
            }
        }

        let ok = unknown.is_none() && !tokens.is_empty();
        let result = ParseResult { ok, words, unknown };
        debug!(
            "parse {:?} -> ok={} words={:?} unknown={:?}",
            input,
            result.ok,
            result
                .words
                .iter()
                .map(|w| (w.word.as_str(), w.group))
                .collect::<Vec<_>>(),
            result.unknown
        );
        self.last = result.clone();
        result
    }

    /// Positional match against the most recent parse. Fails if the last
    /// parse failed.
    pub fn said(&self, expected: &[u16]) -> bool {
        self.last.said(expected)
    }

    pub fn has(&self, group: u16) -> bool {
        self.last.ok && self.last.has(group)
    }

    pub fn verb(&self) -> Option<u16> {
        self.last.verb()
    }

    pub fn noun(&self) -> Option<u16> {
        self.last.noun()
    }

    /// The most recent parse result.
    pub fn last(&self) -> &ParseResult {
        &self.last
    }
}

impl Default for TextParser {
    fn default() -> TextParser {
        TextParser::new(Dictionary::standard())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::groups;

    #[test]
    fn parse_is_idempotent() {
        let mut p = TextParser::default();
        let a = p.parse("get the gun");
        let b = p.parse("get the gun");
        assert_eq!(a, b);
    }

    #[test]
    fn get_gun_scenario() {
        let mut p = TextParser::default();
        let r = p.parse("get gun");
        assert!(r.ok);
        assert_eq!(r.verb(), Some(2));
        assert_eq!(r.noun(), Some(51));
        assert!(r.said(&[2, 51]));
        assert!(!r.said(&[2, 52]));
        assert!(p.said(&[2, 51]));
    }

    #[test]
    fn filler_never_survives() {
        let mut p = TextParser::default();
        let r = p.parse("pick up the gun from the desk");
        assert!(r.ok);
        let groups: Vec<u16> = r.words.iter().map(|w| w.group).collect();
        assert_eq!(groups, vec![2, 51, 57]);
        assert!(!r.words.iter().any(|w| w.group == FILLER));
    }

    #[test]
    fn first_unknown_token_fails_the_parse() {
        let mut p = TextParser::default();
        let r = p.parse("get flibbertigibbet gun");
        assert!(!r.ok);
        assert_eq!(r.unknown.as_deref(), Some("flibbertigibbet"));
        // The recognized prefix is reported for feedback.
        assert_eq!(r.words.len(), 1);
        assert_eq!(r.words[0].group, groups::GET);
        assert!(!p.said(&[groups::GET]));
    }

    #[test]
    fn punctuation_and_case_are_stripped() {
        let mut p = TextParser::default();
        let r = p.parse("  Open, the DOOR!  ");
        assert!(r.ok);
        assert!(r.said(&[groups::OPEN, 60]));
    }

    #[test]
    fn single_letter_noise_is_dropped() {
        let mut p = TextParser::default();
        let r = p.parse("i get a gun");
        assert!(r.ok);
        assert!(r.said(&[groups::GET, 51]));
    }

    #[test]
    fn wildcard_matches_rest_of_input() {
        let mut p = TextParser::default();
        let r = p.parse("call the captain about the warrant");
        assert!(r.ok);
        assert!(r.said(&[groups::CALL, WILDCARD]));
        assert!(r.said(&[WILDCARD]));
    }

    #[test]
    fn wildcard_matches_an_empty_successful_parse() {
        // All-filler input parses successfully to zero words; a leading
        // wildcard still matches.
        let mut p = TextParser::default();
        let r = p.parse("the the on");
        assert!(r.ok);
        assert!(r.words.is_empty());
        assert!(r.said(&[WILDCARD]));
        assert!(!r.said(&[groups::LOOK]));
    }

    #[test]
    fn empty_input_fails_without_unknown() {
        let mut p = TextParser::default();
        let r = p.parse("   ");
        assert!(!r.ok);
        assert_eq!(r.unknown, None);
        assert!(!r.said(&[WILDCARD]));
    }

    #[test]
    fn multi_word_forms_match_greedily() {
        let mut p = TextParser::default();
        let r = p.parse("read the case file");
        assert!(r.ok);
        assert!(r.said(&[groups::LOOK, 67]));
        assert_eq!(r.words[1].word, "case file");

        let r = p.parse("put on the uniform");
        assert!(r.ok);
        assert!(r.said(&[groups::WEAR, 56]));
    }

    #[test]
    fn shorter_match_applies_when_phrase_misses() {
        // "file" alone must still resolve when not followed by a phrase tail.
        let mut p = TextParser::default();
        let r = p.parse("open file");
        assert!(r.ok);
        assert!(r.said(&[groups::OPEN, 67]));
    }

    #[test]
    fn trailing_words_beyond_expectation_are_allowed() {
        let mut p = TextParser::default();
        let r = p.parse("get gun desk");
        assert!(r.said(&[groups::GET]));
        assert!(r.said(&[groups::GET, 51]));
    }
}
