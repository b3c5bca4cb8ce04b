use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::info;

use super::domain::{
    Answer, AnswerRecord, AssessmentSession, CompanyProfile, DomainError, SessionId,
};
use super::report::views::AssessmentReportSummary;
use super::report::AssessmentReport;
use super::repository::{RepositoryError, SessionRecord, SessionRepository};
use super::scoring::ClassificationBands;
use super::store::{AnswerStore, StoreError};
use super::template::AssessmentTemplate;

/// Service composing the template, the repository, and the scoring engine.
///
/// Aggregation only ever runs against a stored record, which holds both the
/// template-seeded store and the session metadata, so there is no ordering
/// hazard between template and answer loading.
pub struct AssessmentService<R> {
    repository: Arc<R>,
    template: Arc<AssessmentTemplate>,
    bands: ClassificationBands,
}

static SESSION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_session_id() -> SessionId {
    let id = SESSION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    SessionId(format!("session-{id:06}"))
}

impl<R> AssessmentService<R>
where
    R: SessionRepository + 'static,
{
    pub fn new(repository: Arc<R>, template: AssessmentTemplate, bands: ClassificationBands) -> Self {
        Self {
            repository,
            template: Arc::new(template),
            bands: bands.normalized(),
        }
    }

    pub fn template(&self) -> &AssessmentTemplate {
        &self.template
    }

    pub fn bands(&self) -> &ClassificationBands {
        &self.bands
    }

    /// Open a new session: one default answer per template question.
    pub fn create(&self, company: CompanyProfile) -> Result<SessionRecord, ServiceError> {
        let session = AssessmentSession {
            id: next_session_id(),
            company,
            template_code: self.template.code.clone(),
            created_at: Utc::now(),
            closed_at: None,
        };

        let record = SessionRecord {
            store: AnswerStore::seeded(&self.template),
            session,
        };

        let stored = self.repository.insert(record)?;
        info!(session_id = %stored.session.id, questions = stored.store.len(), "assessment session opened");
        Ok(stored)
    }

    pub fn get(&self, session_id: &SessionId) -> Result<SessionRecord, ServiceError> {
        let record = self
            .repository
            .fetch(session_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    /// All sessions, newest first.
    pub fn list(&self) -> Result<Vec<SessionRecord>, ServiceError> {
        let mut records = self.repository.list()?;
        records.sort_by(|a, b| b.session.created_at.cmp(&a.session.created_at));
        Ok(records)
    }

    /// Full-store upsert of the submitted records.
    ///
    /// Every record is validated and applied to a working copy before the
    /// repository is touched, so a rejected submission leaves the stored
    /// state byte-for-byte unchanged and the client can retry. Re-submitting
    /// the same payload converges to the same stored state.
    pub fn submit(
        &self,
        session_id: &SessionId,
        records: Vec<AnswerRecord>,
    ) -> Result<SubmissionReceipt, ServiceError> {
        let mut record = self.get(session_id)?;
        if record.session.closed_at.is_some() {
            return Err(ServiceError::SessionClosed(session_id.clone()));
        }

        let accepted = records.len();
        let mut store = record.store.clone();
        for wire in records {
            let answer = Answer::try_from(wire)?;
            store.apply(answer)?;
        }

        record.store = store;
        self.repository.update(record)?;

        Ok(SubmissionReceipt {
            session_id: session_id.clone(),
            accepted,
            total_questions: self.template.question_count(),
        })
    }

    /// The flat ordered answer array — the sole input shape of the
    /// aggregation engine.
    pub fn results(&self, session_id: &SessionId) -> Result<Vec<AnswerRecord>, ServiceError> {
        let record = self.get(session_id)?;
        Ok(record.store.records())
    }

    /// Recompute the full report from the current answers.
    pub fn report(&self, session_id: &SessionId) -> Result<AssessmentReportSummary, ServiceError> {
        let record = self.get(session_id)?;
        let report = AssessmentReport::build(record.store.all(), &self.bands);
        Ok(report.summary())
    }

    /// Close the session, timestamping the first call; closing an already
    /// closed session is a no-op that returns the original timestamp.
    pub fn close(&self, session_id: &SessionId) -> Result<AssessmentSession, ServiceError> {
        let mut record = self.get(session_id)?;
        if record.session.closed_at.is_none() {
            record.session.closed_at = Some(Utc::now());
            self.repository.update(record.clone())?;
            info!(session_id = %session_id, "assessment session closed");
        }
        Ok(record.session)
    }

    /// Admin-only hard delete.
    pub fn delete(&self, session_id: &SessionId) -> Result<(), ServiceError> {
        self.repository.remove(session_id)?;
        info!(session_id = %session_id, "assessment session deleted");
        Ok(())
    }
}

/// Acknowledgement returned by a successful submission.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionReceipt {
    pub session_id: SessionId,
    pub accepted: usize,
    pub total_questions: usize,
}

/// Error raised by the assessment service.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("session {0} is closed and no longer accepts answers")]
    SessionClosed(SessionId),
}
