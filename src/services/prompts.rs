use crate::services::parser::{
    END_QUESTIONS, END_TEXT, LISTENING_QUESTION_COUNT, START_QUESTIONS, START_TEXT, VERDICT_CORRECT,
    VERDICT_WRONG,
};

pub const SENTENCES_PER_WORD: usize = 5;

pub fn example_sentences(word: &str, language: &str) -> String {
    let mut example = String::new();
    for n in 1..=SENTENCES_PER_WORD {
        example.push_str(&format!("{n}. Sentence {n}.\n"));
    }

    format!(
        r#"Write exactly {SENTENCES_PER_WORD} example sentences in the language "{language}" that use the word "{word}".
The sentences must range from simple to complex and explore different contexts.
Format the answer as a numbered list with one sentence per line and nothing else. Example:
{example}"#
    )
}

pub fn word_detail(word: &str, language: &str) -> String {
    format!(
        r#"Explain the word "{word}" (language: {language}) to a language learner.
List its main meanings, the contexts in which each meaning is used, common collocations,
and any register or usage notes. Keep it concise and well organised."#
    )
}

pub fn verify_translation(original_sentence: &str, user_answer: &str) -> String {
    format!(
        r#"Is the following translation correct? Answer with only the word '{VERDICT_CORRECT}' or '{VERDICT_WRONG}'.
Original sentence: "{original_sentence}".
Translation: "{user_answer}"."#
    )
}

pub fn listening_exercise() -> String {
    let mut numbered = String::new();
    for n in 1..=LISTENING_QUESTION_COUNT {
        numbered.push_str(&format!("{n}. (question {n})\n"));
    }

    format!(
        r#"Write an English text for an intermediate-level student.
The text must be at most 300 characters long.
Pick a varied context (everyday life, academic, cultural, a short news item, etc.) and change the topic on every request.
After the text, write exactly {LISTENING_QUESTION_COUNT} comprehension questions about it, in English.

Format the answer EXACTLY as follows, without any other text or formatting:
{START_TEXT}
(your English text)
{END_TEXT}
{START_QUESTIONS}
{numbered}{END_QUESTIONS}"#
    )
}

pub fn listening_feedback(
    text: &str,
    questions: &[String],
    answers: &[String],
    feedback_language: &str,
) -> String {
    let mut pairs = String::new();
    for (i, (question, answer)) in questions.iter().zip(answers).enumerate() {
        pairs.push_str(&format!(
            "{}. Question: \"{}\"\n   Answer: \"{}\"\n",
            i + 1,
            question,
            answer
        ));
    }

    format!(
        r#"Grade a student's answers to the following reading-comprehension questions.
Be a friendly reviewer and give constructive feedback in {feedback_language}.
For each answer say whether it is correct, partially correct or incorrect, and briefly explain why.

Original text: "{text}"

Questions and student answers:
{pairs}
Give overall feedback on the answers in a single paragraph."#
    )
}
