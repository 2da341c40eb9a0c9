use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::services::llm_provider::TextGenerator;
use crate::services::{parser, prompts, ServiceError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListeningExercise {
    pub text: String,
    pub questions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListeningAnswers {
    pub text: String,
    pub questions: Vec<String>,
    pub answers: Vec<String>,
}

#[derive(Clone)]
pub struct ListeningService {
    generator: Arc<dyn TextGenerator>,
    feedback_language: String,
}

impl ListeningService {
    pub fn new(generator: Arc<dyn TextGenerator>, feedback_language: impl Into<String>) -> Self {
        Self {
            generator,
            feedback_language: feedback_language.into(),
        }
    }

    pub async fn start(&self) -> Result<ListeningExercise, ServiceError> {
        let raw = self.generator.generate(&prompts::listening_exercise()).await?;
        let sections = parser::parse_listening_sections(&raw)?;
        debug!(chars = sections.text.chars().count(), "listening exercise generated");

        Ok(ListeningExercise {
            text: sections.text,
            questions: sections.questions,
        })
    }

    /// Returns the generator's feedback verbatim; nothing is persisted.
    pub async fn check(&self, submission: &ListeningAnswers) -> Result<String, ServiceError> {
        if submission.text.trim().is_empty() {
            return Err(ServiceError::invalid("text is required"));
        }
        if submission.questions.is_empty() {
            return Err(ServiceError::invalid("questions are required"));
        }
        if submission.answers.len() != submission.questions.len() {
            return Err(ServiceError::invalid(format!(
                "expected {} answers, got {}",
                submission.questions.len(),
                submission.answers.len()
            )));
        }

        let prompt = prompts::listening_feedback(
            &submission.text,
            &submission.questions,
            &submission.answers,
            &self.feedback_language,
        );
        Ok(self.generator.generate(&prompt).await?)
    }
}
