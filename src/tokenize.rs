//! Splitting input strings into tokens, and comparing tokens.
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A single word or character, borrowed from the input string.
pub type Token<'a> = &'a str;
/// The tokens of one input string, in order.
pub type Sequence<'a> = Vec<Token<'a>>;

/// Runs of whitespace, periods and hyphens separate words.
pub const DEFAULT_SEPARATOR: &str = r"[\s.\-]+";

lazy_static! {
    static ref SEPARATOR: Regex = Regex::new(DEFAULT_SEPARATOR).unwrap();
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    /// One token per word.
    Word,
    /// One token per character.
    #[default]
    Char,
}

impl Mode {
    /// The string used to join tokens back together for display.
    pub fn separator(&self) -> &'static str {
        match self {
            Mode::Word => " ",
            Mode::Char => "",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Tokenizer {
    mode: Mode,
    separator: Regex,
}

impl Tokenizer {
    /// A tokenizer splitting words on the given regex pattern.
    /// The pattern is ignored in character mode, but must still be valid.
    pub fn new(mode: Mode, separator: &str) -> Result<Self> {
        Ok(Tokenizer {
            mode,
            separator: Regex::new(separator)?,
        })
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn tokenize<'a>(&self, input: &'a str) -> Sequence<'a> {
        split(input, self.mode, &self.separator)
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Tokenizer {
            mode: Mode::default(),
            separator: SEPARATOR.clone(),
        }
    }
}

fn split<'a>(input: &'a str, mode: Mode, separator: &Regex) -> Sequence<'a> {
    match mode {
        Mode::Word => separator
            .split(input)
            .filter(|t| !t.is_empty())
            .collect(),
        Mode::Char => input
            .char_indices()
            .map(|(i, c)| &input[i..i + c.len_utf8()])
            .collect(),
    }
}

/// Tokenize `input` using the default word separator.
pub fn tokenize(input: &str, mode: Mode) -> Sequence<'_> {
    split(input, mode, &SEPARATOR)
}

/// Token equality, optionally ignoring case.
pub fn equal(a: &str, b: &str, case_sensitive: bool) -> bool {
    if case_sensitive || a == b {
        return a == b;
    }
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn words() {
        assert_eq!(
            tokenize("the quick  brown-fox. jumps", Mode::Word),
            ["the", "quick", "brown", "fox", "jumps"]
        );
        assert_eq!(tokenize("  .leading and trailing- ", Mode::Word), ["leading", "and", "trailing"]);
        assert!(tokenize(" .-\t\n", Mode::Word).is_empty());
    }

    #[test]
    fn chars() {
        assert_eq!(tokenize("a b", Mode::Char), ["a", " ", "b"]);
        assert_eq!(tokenize("héllo", Mode::Char), ["h", "é", "l", "l", "o"]);
    }

    #[test]
    fn empty() {
        assert!(tokenize("", Mode::Word).is_empty());
        assert!(tokenize("", Mode::Char).is_empty());
    }

    #[test]
    fn default_tokenizer_matches_free_function() {
        let t = Tokenizer::default();
        assert_eq!(t.mode(), Mode::Char);
        let input = "well-known. words";
        assert_eq!(t.tokenize(input), tokenize(input, Mode::Char));
        let t = Tokenizer::new(Mode::Word, DEFAULT_SEPARATOR).unwrap();
        assert_eq!(t.tokenize(input), tokenize(input, Mode::Word));
        assert_eq!(tokenize(input, Mode::Word), ["well", "known", "words"]);
    }

    #[test]
    fn custom_separator() {
        let t = Tokenizer::new(Mode::Word, ",").unwrap();
        assert_eq!(t.tokenize("a,b,,c d"), ["a", "b", "c d"]);
        assert!(Tokenizer::new(Mode::Word, "[").is_err());
    }

    #[test]
    fn case_folding() {
        assert!(equal("Hello", "Hello", true));
        assert!(!equal("Hello", "hello", true));
        assert!(equal("Hello", "hELLO", false));
        assert!(equal("ÉCOLE", "école", false));
        assert!(!equal("hello", "hell", false));
    }
}
