//! Grammars for pulling structure out of free-text model output.
//!
//! Everything here is a pure function over `&str`; the services call these
//! after the generator returns and before touching the database.

use thiserror::Error;

pub const START_TEXT: &str = "[START_TEXT]";
pub const END_TEXT: &str = "[END_TEXT]";
pub const START_QUESTIONS: &str = "[START_QUESTIONS]";
pub const END_QUESTIONS: &str = "[END_QUESTIONS]";

pub const LISTENING_QUESTION_COUNT: usize = 3;

pub const VERDICT_CORRECT: &str = "CORRECT";
pub const VERDICT_WRONG: &str = "WRONG";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("missing section marker {0}")]
    MissingMarker(&'static str),
    #[error("empty passage between [START_TEXT] and [END_TEXT]")]
    EmptyPassage,
    #[error("expected {expected} questions, found {found}")]
    QuestionCount { expected: usize, found: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListeningSections {
    pub text: String,
    pub questions: Vec<String>,
}

/// Splits a numbered list into its items.
///
/// Lines are trimmed, a leading `<digits>.` plus whitespace is removed, and
/// lines left empty are dropped. Numbering gaps are ignored; order is kept.
pub fn parse_numbered_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(strip_list_number)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn strip_list_number(line: &str) -> &str {
    let digits = line.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return line;
    }
    match line[digits..].strip_prefix('.') {
        Some(rest) => rest.trim(),
        None => line,
    }
}

/// Returns the trimmed text between the first `start` marker and the next `end` marker.
pub fn extract_section<'a>(
    text: &'a str,
    start: &'static str,
    end: &'static str,
) -> Result<&'a str, ParseError> {
    let (_, after_start) = text
        .split_once(start)
        .ok_or(ParseError::MissingMarker(start))?;
    let (inner, _) = after_start
        .split_once(end)
        .ok_or(ParseError::MissingMarker(end))?;
    Ok(inner.trim())
}

pub fn parse_listening_sections(text: &str) -> Result<ListeningSections, ParseError> {
    let passage = extract_section(text, START_TEXT, END_TEXT)?;
    let questions_block = extract_section(text, START_QUESTIONS, END_QUESTIONS)?;

    if passage.is_empty() {
        return Err(ParseError::EmptyPassage);
    }

    let questions = parse_numbered_list(questions_block);
    if questions.len() != LISTENING_QUESTION_COUNT {
        return Err(ParseError::QuestionCount {
            expected: LISTENING_QUESTION_COUNT,
            found: questions.len(),
        });
    }

    Ok(ListeningSections {
        text: passage.to_string(),
        questions,
    })
}

/// Case-insensitive substring check for the "correct" verdict token.
pub fn parse_verdict(response: &str) -> bool {
    response.to_uppercase().contains(VERDICT_CORRECT)
}
