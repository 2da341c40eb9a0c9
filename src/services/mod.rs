pub mod lesson;
pub mod listening;
pub mod llm_provider;
pub mod parser;
pub mod prompts;
pub mod words;

use thiserror::Error;

use crate::services::llm_provider::LLMError;
use crate::services::parser::ParseError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("word \"{0}\" already exists")]
    DuplicateWord(String),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("generator returned no usable sentences")]
    EmptyGeneration,
    #[error("generator output was malformed: {0}")]
    MalformedGeneration(#[from] ParseError),
    #[error("storage failure: {0}")]
    Storage(#[from] sqlx::Error),
    #[error("generation failure: {0}")]
    Generation(#[from] LLMError),
}

impl ServiceError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }
}
