use std::sync::Arc;
use std::time::{Instant, SystemTime};

use crate::config::LessonSettings;
use crate::db::Database;
use crate::services::lesson::LessonService;
use crate::services::listening::ListeningService;
use crate::services::llm_provider::TextGenerator;
use crate::services::words::WordService;

/// Shared handler state. The database and generator are constructed by the
/// caller and passed in, so tests can inject an in-memory store and a fake
/// generator.
#[derive(Clone)]
pub struct AppState {
    started_at: Instant,
    started_at_system: SystemTime,
    db: Database,
    words: Arc<WordService>,
    lessons: Arc<LessonService>,
    listening: Arc<ListeningService>,
}

impl AppState {
    pub fn new(db: Database, generator: Arc<dyn TextGenerator>, settings: LessonSettings) -> Self {
        let listening = ListeningService::new(Arc::clone(&generator), settings.feedback_language.clone());
        let words = WordService::new(db.clone(), generator, settings);

        Self {
            started_at: Instant::now(),
            started_at_system: SystemTime::now(),
            lessons: Arc::new(LessonService::new(db.clone())),
            words: Arc::new(words),
            listening: Arc::new(listening),
            db,
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }

    pub fn started_at_system(&self) -> SystemTime {
        self.started_at_system
    }

    pub fn db(&self) -> &Database {
        &self.db
    }

    pub fn words(&self) -> Arc<WordService> {
        Arc::clone(&self.words)
    }

    pub fn lessons(&self) -> Arc<LessonService> {
        Arc::clone(&self.lessons)
    }

    pub fn listening(&self) -> Arc<ListeningService> {
        Arc::clone(&self.listening)
    }
}
