//! Word splitting and camel-casing of resource names

use regex::Regex;
use std::sync::LazyLock;

static SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\p{L}\p{N}]+").expect("separator pattern is valid"));

#[derive(Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Upper,
    Lower,
    Digit,
    Other,
}

fn classify(c: char) -> CharClass {
    if c.is_uppercase() {
        CharClass::Upper
    } else if c.is_lowercase() {
        CharClass::Lower
    } else if c.is_numeric() {
        CharClass::Digit
    } else {
        CharClass::Other
    }
}

/// Split an identifier into words
///
/// Words break on separators, lower→upper transitions, letter↔digit
/// transitions and at the end of an acronym (`HTTPRequest` → `HTTP`, `Request`).
pub fn words(input: &str) -> Vec<String> {
    let cleaned: String = input.chars().filter(|c| !matches!(c, '\'' | '’')).collect();
    let mut words = Vec::new();

    for chunk in SEPARATORS.split(&cleaned).filter(|chunk| !chunk.is_empty()) {
        let chars: Vec<char> = chunk.chars().collect();
        let mut current = String::new();

        for (i, &c) in chars.iter().enumerate() {
            if let Some(&prev) = i.checked_sub(1).and_then(|p| chars.get(p)) {
                let (prev_class, class) = (classify(prev), classify(c));
                let next_is_lower = chars
                    .get(i + 1)
                    .is_some_and(|&n| classify(n) == CharClass::Lower);

                let boundary = match (prev_class, class) {
                    (CharClass::Lower, CharClass::Upper) => true,
                    (CharClass::Upper, CharClass::Upper) => next_is_lower,
                    (CharClass::Digit, CharClass::Upper | CharClass::Lower) => true,
                    (CharClass::Upper | CharClass::Lower, CharClass::Digit) => true,
                    _ => false,
                };

                if boundary && !current.is_empty() {
                    words.push(std::mem::take(&mut current));
                }
            }
            current.push(c);
        }

        if !current.is_empty() {
            words.push(current);
        }
    }

    words
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Convert an identifier to camelCase (`UserProfile` → `userProfile`)
pub fn camel_case(input: &str) -> String {
    words(input)
        .iter()
        .enumerate()
        .map(|(i, word)| {
            if i == 0 {
                word.to_lowercase()
            } else {
                capitalize(word)
            }
        })
        .collect()
}
