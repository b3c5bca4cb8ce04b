use chrono::{DateTime, Utc};
use serde::Serialize;

use super::domain::{AssessmentSession, SessionId};
use super::store::AnswerStore;

/// Repository record: the session metadata plus its current answer store.
#[derive(Debug, Clone)]
pub struct SessionRecord {
    pub session: AssessmentSession,
    pub store: AnswerStore,
}

impl SessionRecord {
    pub fn session_view(&self) -> SessionView {
        SessionView {
            session_id: self.session.id.clone(),
            company_name: self.session.company.company_name.clone(),
            sector: self.session.company.sector.clone(),
            template_code: self.session.template_code.clone(),
            status: self.session.status().label(),
            created_at: self.session.created_at,
            closed_at: self.session.closed_at,
            question_count: self.store.len(),
        }
    }
}

/// Storage abstraction so the service module can be exercised in isolation.
pub trait SessionRepository: Send + Sync {
    fn insert(&self, record: SessionRecord) -> Result<SessionRecord, RepositoryError>;
    fn update(&self, record: SessionRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &SessionId) -> Result<Option<SessionRecord>, RepositoryError>;
    fn list(&self) -> Result<Vec<SessionRecord>, RepositoryError>;
    fn remove(&self, id: &SessionId) -> Result<(), RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("session already exists")]
    Conflict,
    #[error("session not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Sanitized representation of a session's exposed metadata.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub session_id: SessionId,
    pub company_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,
    pub template_code: String,
    pub status: &'static str,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closed_at: Option<DateTime<Utc>>,
    pub question_count: usize,
}
