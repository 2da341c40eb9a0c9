use std::sync::Arc;

use serde::Serialize;
use sqlx::{Sqlite, Transaction};
use tracing::{debug, info, warn};

use crate::config::LessonSettings;
use crate::db::operations::content::{self, Word, WordDetail};
use crate::db::{is_unique_violation, Database};
use crate::services::llm_provider::TextGenerator;
use crate::services::{parser, prompts, ServiceError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddedWord {
    pub id: i64,
    pub word: String,
    pub sentence_count: usize,
    pub has_detail: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationCheck {
    pub sentence_id: i64,
    pub word_id: i64,
    pub original_sentence: String,
    pub user_answer: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    Incorrect,
    Correct { word_learned: bool, remaining: i64 },
}

/// Word lifecycle: creation with generated content, answer checks that retire
/// sentences, and the learning → learned transition.
#[derive(Clone)]
pub struct WordService {
    db: Database,
    generator: Arc<dyn TextGenerator>,
    settings: LessonSettings,
}

impl WordService {
    pub fn new(db: Database, generator: Arc<dyn TextGenerator>, settings: LessonSettings) -> Self {
        Self {
            db,
            generator,
            settings,
        }
    }

    pub async fn list_words(&self) -> Result<Vec<Word>, ServiceError> {
        Ok(content::list_words(self.db.pool()).await?)
    }

    /// Generates the word's sentences (and detail, when enabled), then
    /// persists the word and everything generated in one short transaction.
    /// The write lock is only taken once generation has finished, so a slow
    /// generator never holds up other writers. Nothing is persisted unless
    /// every step succeeds.
    pub async fn add_word(&self, word: &str, language: Option<&str>) -> Result<AddedWord, ServiceError> {
        let word = word.trim();
        if word.is_empty() {
            return Err(ServiceError::invalid("word is required"));
        }
        let language = language
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .unwrap_or(self.settings.default_language.as_str());

        if content::find_word_by_text(self.db.pool(), word).await?.is_some() {
            return Err(ServiceError::DuplicateWord(word.to_string()));
        }

        let generated = self.generate_content(word, language).await?;

        let mut tx = self.db.pool().begin().await?;
        match persist_word(&mut tx, word, language, &generated).await {
            Ok(word_id) => {
                tx.commit().await?;
                let added = AddedWord {
                    id: word_id,
                    word: word.to_string(),
                    sentence_count: generated.sentences.len(),
                    has_detail: generated.detail.is_some(),
                };
                info!(
                    word_id = added.id,
                    word = %added.word,
                    sentences = added.sentence_count,
                    has_detail = added.has_detail,
                    "word added"
                );
                Ok(added)
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback().await {
                    warn!(error = %rollback_err, "add word rollback failed");
                }
                Err(err)
            }
        }
    }

    async fn generate_content(&self, word: &str, language: &str) -> Result<GeneratedContent, ServiceError> {
        let raw = self
            .generator
            .generate(&prompts::example_sentences(word, language))
            .await?;
        let sentences = parser::parse_numbered_list(&raw);
        if sentences.is_empty() {
            return Err(ServiceError::EmptyGeneration);
        }
        if sentences.len() != prompts::SENTENCES_PER_WORD {
            debug!(
                word,
                requested = prompts::SENTENCES_PER_WORD,
                received = sentences.len(),
                "sentence count differs from request"
            );
        }

        let detail = if self.settings.generate_details {
            Some(
                self.generator
                    .generate(&prompts::word_detail(word, language))
                    .await?,
            )
        } else {
            None
        };

        Ok(GeneratedContent { sentences, detail })
    }

    /// Asks the generator to judge a translation. A correct answer retires the
    /// sentence and, when it was the word's last one, marks the word learned.
    /// A sentence that does not belong to `word_id` is `NotFound("sentence")`.
    pub async fn check_translation(&self, check: &TranslationCheck) -> Result<CheckOutcome, ServiceError> {
        if check.sentence_id <= 0 || check.word_id <= 0 {
            return Err(ServiceError::invalid("sentence and word ids must be positive"));
        }
        if check.original_sentence.trim().is_empty() || check.user_answer.trim().is_empty() {
            return Err(ServiceError::invalid("original sentence and answer are required"));
        }

        let verdict = self
            .generator
            .generate(&prompts::verify_translation(&check.original_sentence, &check.user_answer))
            .await?;
        if !parser::parse_verdict(&verdict) {
            debug!(sentence_id = check.sentence_id, "translation judged incorrect");
            return Ok(CheckOutcome::Incorrect);
        }

        let mut tx = self.db.pool().begin().await?;
        match retire_sentence(&mut tx, check.sentence_id, check.word_id).await {
            Ok(outcome) => {
                tx.commit().await?;
                Ok(outcome)
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback().await {
                    warn!(error = %rollback_err, "check answer rollback failed");
                }
                Err(err)
            }
        }
    }

    pub async fn delete_word(&self, word_id: i64) -> Result<(), ServiceError> {
        let affected = content::delete_word(self.db.pool(), word_id).await?;
        if affected == 0 {
            return Err(ServiceError::NotFound("word"));
        }
        info!(word_id, "word deleted");
        Ok(())
    }

    /// `NotFound("word")` when the word is gone, `NotFound("word detail")`
    /// when it exists but was added without a detail.
    pub async fn word_detail(&self, word_id: i64) -> Result<WordDetail, ServiceError> {
        if let Some(detail) = content::get_word_detail(self.db.pool(), word_id).await? {
            return Ok(detail);
        }
        match content::get_word(self.db.pool(), word_id).await? {
            Some(_) => Err(ServiceError::NotFound("word detail")),
            None => Err(ServiceError::NotFound("word")),
        }
    }
}

struct GeneratedContent {
    sentences: Vec<String>,
    detail: Option<String>,
}

async fn persist_word(
    tx: &mut Transaction<'_, Sqlite>,
    word: &str,
    language: &str,
    generated: &GeneratedContent,
) -> Result<i64, ServiceError> {
    // A concurrent add of the same text can pass the existence check; the
    // unique index decides the winner.
    let word_id = content::insert_word(&mut **tx, word, language)
        .await
        .map_err(|err| {
            if is_unique_violation(&err) {
                ServiceError::DuplicateWord(word.to_string())
            } else {
                ServiceError::Storage(err)
            }
        })?;

    for sentence in &generated.sentences {
        content::insert_sentence(&mut **tx, word_id, sentence).await?;
    }
    if let Some(detail) = &generated.detail {
        content::insert_detail(&mut **tx, word_id, detail).await?;
    }

    Ok(word_id)
}

// Count-then-update is not guarded by a row lock: two concurrent correct
// answers for the same word can both observe a non-zero count.
async fn retire_sentence(
    tx: &mut Transaction<'_, Sqlite>,
    sentence_id: i64,
    word_id: i64,
) -> Result<CheckOutcome, ServiceError> {
    let deleted = content::delete_sentence(&mut **tx, sentence_id, word_id).await?;
    if deleted == 0 {
        debug!(sentence_id, word_id, "sentence not found for word");
        return Err(ServiceError::NotFound("sentence"));
    }
    let remaining = content::count_sentences(&mut **tx, word_id).await?;

    let word_learned = remaining == 0;
    if word_learned {
        content::mark_word_learned(&mut **tx, word_id).await?;
        info!(word_id, "word learned");
    }

    Ok(CheckOutcome::Correct {
        word_learned,
        remaining,
    })
}
