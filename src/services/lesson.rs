use crate::db::operations::content::{self, Sentence};
use crate::db::Database;
use crate::services::ServiceError;

#[derive(Clone)]
pub struct LessonService {
    db: Database,
}

impl LessonService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// A random sentence belonging to a word still being learned, or `None`
    /// when every word is learned.
    pub async fn next_sentence(&self) -> Result<Option<Sentence>, ServiceError> {
        Ok(content::random_learning_sentence(self.db.pool()).await?)
    }
}
