use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteExecutor};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WordStatus {
    Learning,
    Learned,
}

impl WordStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Learning => "learning",
            Self::Learned => "learned",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "learning" => Some(Self::Learning),
            "learned" => Some(Self::Learned),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    pub id: i64,
    pub word: String,
    pub language: String,
    pub status: WordStatus,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    pub id: i64,
    pub word_id: i64,
    pub sentence_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordDetail {
    #[serde(flatten)]
    pub word: Word,
    pub detail: String,
}

pub async fn insert_word<'e>(
    executor: impl SqliteExecutor<'e>,
    word: &str,
    language: &str,
) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(r#"INSERT INTO "words" ("word", "language", "status") VALUES (?, ?, ?)"#)
        .bind(word)
        .bind(language)
        .bind(WordStatus::Learning.as_str())
        .execute(executor)
        .await?;
    Ok(result.last_insert_rowid())
}

pub async fn insert_sentence<'e>(
    executor: impl SqliteExecutor<'e>,
    word_id: i64,
    sentence_text: &str,
) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(r#"INSERT INTO "sentences" ("word_id", "sentence_text") VALUES (?, ?)"#)
        .bind(word_id)
        .bind(sentence_text)
        .execute(executor)
        .await?;
    Ok(result.last_insert_rowid())
}

pub async fn insert_detail<'e>(
    executor: impl SqliteExecutor<'e>,
    word_id: i64,
    detail_text: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query(r#"INSERT INTO "word_details" ("word_id", "detail_text") VALUES (?, ?)"#)
        .bind(word_id)
        .bind(detail_text)
        .execute(executor)
        .await?;
    Ok(())
}

pub async fn list_words<'e>(executor: impl SqliteExecutor<'e>) -> Result<Vec<Word>, sqlx::Error> {
    let rows = sqlx::query(r#"SELECT * FROM "words" ORDER BY "word""#)
        .fetch_all(executor)
        .await?;
    rows.iter().map(map_word).collect()
}

pub async fn find_word_by_text<'e>(
    executor: impl SqliteExecutor<'e>,
    word: &str,
) -> Result<Option<Word>, sqlx::Error> {
    let row = sqlx::query(r#"SELECT * FROM "words" WHERE "word" = ? LIMIT 1"#)
        .bind(word)
        .fetch_optional(executor)
        .await?;
    row.as_ref().map(map_word).transpose()
}

pub async fn get_word<'e>(
    executor: impl SqliteExecutor<'e>,
    word_id: i64,
) -> Result<Option<Word>, sqlx::Error> {
    let row = sqlx::query(r#"SELECT * FROM "words" WHERE "id" = ? LIMIT 1"#)
        .bind(word_id)
        .fetch_optional(executor)
        .await?;
    row.as_ref().map(map_word).transpose()
}

pub async fn delete_word<'e>(
    executor: impl SqliteExecutor<'e>,
    word_id: i64,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(r#"DELETE FROM "words" WHERE "id" = ?"#)
        .bind(word_id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected())
}

pub async fn mark_word_learned<'e>(
    executor: impl SqliteExecutor<'e>,
    word_id: i64,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(r#"UPDATE "words" SET "status" = ? WHERE "id" = ?"#)
        .bind(WordStatus::Learned.as_str())
        .bind(word_id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected())
}

/// Deletes the sentence only when it belongs to `word_id`.
pub async fn delete_sentence<'e>(
    executor: impl SqliteExecutor<'e>,
    sentence_id: i64,
    word_id: i64,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(r#"DELETE FROM "sentences" WHERE "id" = ? AND "word_id" = ?"#)
        .bind(sentence_id)
        .bind(word_id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected())
}

pub async fn count_sentences<'e>(
    executor: impl SqliteExecutor<'e>,
    word_id: i64,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(r#"SELECT COUNT(*) FROM "sentences" WHERE "word_id" = ?"#)
        .bind(word_id)
        .fetch_one(executor)
        .await
}

pub async fn random_learning_sentence<'e>(
    executor: impl SqliteExecutor<'e>,
) -> Result<Option<Sentence>, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT s."id", s."word_id", s."sentence_text"
        FROM "sentences" s
        JOIN "words" w ON s."word_id" = w."id"
        WHERE w."status" = ?
        ORDER BY RANDOM()
        LIMIT 1
        "#,
    )
    .bind(WordStatus::Learning.as_str())
    .fetch_optional(executor)
    .await?;
    row.as_ref().map(map_sentence).transpose()
}

pub async fn get_word_detail<'e>(
    executor: impl SqliteExecutor<'e>,
    word_id: i64,
) -> Result<Option<WordDetail>, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT w."id", w."word", w."language", w."status", w."created_at", d."detail_text"
        FROM "words" w
        JOIN "word_details" d ON d."word_id" = w."id"
        WHERE w."id" = ?
        "#,
    )
    .bind(word_id)
    .fetch_optional(executor)
    .await?;

    row.map(|r| -> Result<WordDetail, sqlx::Error> {
        Ok(WordDetail {
            word: map_word(&r)?,
            detail: r.try_get("detail_text")?,
        })
    })
    .transpose()
}

fn map_word(row: &SqliteRow) -> Result<Word, sqlx::Error> {
    let status: String = row.try_get("status")?;
    let status = WordStatus::from_str(&status).ok_or_else(|| sqlx::Error::ColumnDecode {
        index: "status".to_string(),
        source: format!("unknown word status: {status}").into(),
    })?;

    Ok(Word {
        id: row.try_get("id")?,
        word: row.try_get("word")?,
        language: row.try_get("language")?,
        status,
        created_at: row.try_get("created_at")?,
    })
}

fn map_sentence(row: &SqliteRow) -> Result<Sentence, sqlx::Error> {
    Ok(Sentence {
        id: row.try_get("id")?,
        word_id: row.try_get("word_id")?,
        sentence_text: row.try_get("sentence_text")?,
    })
}
