//! Splits a raw search string into `command:value` phrases
//!
//! The grammar is word based:
//!
//! ```text
//! query   := phrase (BOUNDARY phrase)*
//! BOUNDARY:= "AND" | "OR"            (any case, outside a closed pair of double quotes)
//! range   := "dateRange:" start "TO" end
//! ```
//!
//! A `dateRange` phrase takes its start and its `TO` clause as words, so the
//! dates are never split apart; a boundary where a date is expected still
//! ends the phrase. Spacing between the words of a phrase is kept. Values are kept literal here; pattern metacharacters are escaped when a
//! value is compiled into a match condition.

use regex::Regex;
use std::sync::OnceLock;

const DATE_RANGE_PREFIX: &str = "dateRange:";
const RANGE_KEYWORD: &str = "TO";

fn separator_regex() -> &'static Regex {
    static SEPARATOR: OnceLock<Regex> = OnceLock::new();
    SEPARATOR.get_or_init(|| Regex::new(r"\s*:\s*").expect("separator pattern is valid"))
}

fn word_regex() -> &'static Regex {
    static WORD: OnceLock<Regex> = OnceLock::new();
    WORD.get_or_init(|| Regex::new(r"\S+").expect("word pattern is valid"))
}

/// Progress through a `dateRange:<start> TO <end>` phrase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RangeState {
    Closed,
    AwaitStart,
    AwaitKeyword,
    AwaitEnd,
}

fn is_boundary(word: &str) -> bool {
    word.eq_ignore_ascii_case("AND") || word.eq_ignore_ascii_case("OR")
}

/// Byte spans enclosed by a pair of double quotes
///
/// Quotes pair up left to right; a final quote without a partner opens
/// nothing.
fn quoted_spans(source: &str) -> Vec<(usize, usize)> {
    let quotes: Vec<usize> = source.match_indices('"').map(|(i, _)| i).collect();
    quotes
        .chunks_exact(2)
        .map(|pair| (pair[0], pair[1]))
        .collect()
}

/// Accumulates the words of one phrase, keeping the spacing between them
struct PhraseBuilder<'a> {
    source: &'a str,
    text: String,
    last_end: Option<usize>,
}

impl<'a> PhraseBuilder<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            text: String::new(),
            last_end: None,
        }
    }

    fn is_empty(&self) -> bool {
        self.last_end.is_none()
    }

    /// Append `text` for the word spanning `start..end`
    fn push(&mut self, start: usize, end: usize, text: &str) {
        if let Some(last_end) = self.last_end {
            self.text.push_str(&self.source[last_end..start]);
        }
        self.text.push_str(text);
        self.last_end = Some(end);
    }

    fn flush(&mut self, phrases: &mut Vec<String>) {
        let phrase = self.text.replace('"', "");
        let phrase = phrase.trim();
        if !phrase.is_empty() {
            phrases.push(phrase.to_string());
        }
        self.text.clear();
        self.last_end = None;
    }
}

/// Tokenize a raw search string
///
/// Empty, absent or whitespace-only input yields no phrases. Never fails:
/// fragments that are not valid commands are dropped later by the resolver.
pub fn tokenize(raw: Option<&str>) -> Vec<String> {
    let raw = match raw.map(str::trim) {
        Some(raw) if !raw.is_empty() => raw,
        _ => return Vec::new(),
    };

    let normalized = separator_regex().replace_all(raw, ":");
    let quoted = quoted_spans(&normalized);
    let is_quoted = |pos: usize| quoted.iter().any(|&(open, close)| open < pos && pos < close);

    let mut phrases = Vec::new();
    let mut current = PhraseBuilder::new(&normalized);
    let mut range = RangeState::Closed;

    for word in word_regex().find_iter(&normalized) {
        let (start, end, text) = (word.start(), word.end(), word.as_str());
        let boundary = is_boundary(text) && !is_quoted(start);

        match range {
            RangeState::AwaitStart | RangeState::AwaitEnd if boundary => {
                range = RangeState::Closed;
            }
            RangeState::AwaitStart => {
                current.push(start, end, text);
                range = RangeState::AwaitKeyword;
                continue;
            }
            RangeState::AwaitKeyword if text.eq_ignore_ascii_case(RANGE_KEYWORD) => {
                current.push(start, end, RANGE_KEYWORD);
                range = RangeState::AwaitEnd;
                continue;
            }
            RangeState::AwaitEnd => {
                current.push(start, end, text);
                range = RangeState::Closed;
                continue;
            }
            // A range without its TO clause ends here, the word is read normally
            RangeState::AwaitKeyword => range = RangeState::Closed,
            RangeState::Closed => {}
        }

        if boundary {
            current.flush(&mut phrases);
            continue;
        }

        if current.is_empty() {
            if let Some(rest) = text.strip_prefix(DATE_RANGE_PREFIX) {
                range = if rest.is_empty() {
                    RangeState::AwaitStart
                } else {
                    RangeState::AwaitKeyword
                };
            }
        }

        current.push(start, end, text);
    }

    current.flush(&mut phrases);
    phrases
}
