use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for assessment sessions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The four fixed maturity domains every question belongs to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Category {
    Governance,
    #[serde(rename = "Monitoring & Control")]
    MonitoringControl,
    Technology,
    Organization,
}

impl Category {
    pub const fn label(self) -> &'static str {
        match self {
            Category::Governance => "Governance",
            Category::MonitoringControl => "Monitoring & Control",
            Category::Technology => "Technology",
            Category::Organization => "Organization",
        }
    }

    /// Canonical presentation order, matching the questionnaire layout.
    pub fn ordered() -> [Category; 4] {
        [
            Category::Governance,
            Category::MonitoringControl,
            Category::Technology,
            Category::Organization,
        ]
    }

    pub fn from_label(label: &str) -> Option<Category> {
        Category::ordered()
            .into_iter()
            .find(|category| category.label().eq_ignore_ascii_case(label.trim()))
    }
}

/// Composite identity of one evaluable item. Lookups join on the full tuple.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuestionKey {
    pub process: String,
    pub activity: String,
    pub category: Category,
    pub dimension: String,
}

impl fmt::Display for QuestionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} / {} / {} / {}",
            self.process,
            self.activity,
            self.category.label(),
            self.dimension
        )
    }
}

pub const MIN_SCORE: u8 = 0;
pub const MAX_SCORE: u8 = 5;

/// A maturity score. Not-applicable answers carry no rating at all, so a
/// rating can never be read while the entry is excluded from averaging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Score {
    Rating(u8),
    NotApplicable,
}

impl Score {
    /// Validated constructor for applicable scores.
    pub fn rating(value: u8) -> Result<Score, DomainError> {
        if value > MAX_SCORE {
            return Err(DomainError::ScoreOutOfRange { found: value });
        }
        Ok(Score::Rating(value))
    }

    pub fn value(self) -> Option<u8> {
        match self {
            Score::Rating(value) => Some(value),
            Score::NotApplicable => None,
        }
    }

    pub fn is_not_applicable(self) -> bool {
        matches!(self, Score::NotApplicable)
    }
}

/// One answered question. Exactly one exists per template question once a
/// session has been seeded.
#[derive(Debug, Clone, PartialEq)]
pub struct Answer {
    pub key: QuestionKey,
    pub score: Score,
    pub note: String,
}

/// Flat wire shape used by the results and submit endpoints. The domain keeps
/// `Score` as a sum type; this record is the boundary representation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub process: String,
    pub activity: String,
    pub category: Category,
    pub dimension: String,
    pub score: u8,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub is_not_applicable: bool,
}

impl AnswerRecord {
    pub fn key(&self) -> QuestionKey {
        QuestionKey {
            process: self.process.clone(),
            activity: self.activity.clone(),
            category: self.category,
            dimension: self.dimension.clone(),
        }
    }
}

impl TryFrom<AnswerRecord> for Answer {
    type Error = DomainError;

    fn try_from(record: AnswerRecord) -> Result<Self, Self::Error> {
        let key = record.key();
        let score = if record.is_not_applicable {
            Score::NotApplicable
        } else {
            Score::rating(record.score)?
        };

        Ok(Answer {
            key,
            score,
            note: record.note,
        })
    }
}

impl From<&Answer> for AnswerRecord {
    fn from(answer: &Answer) -> Self {
        AnswerRecord {
            process: answer.key.process.clone(),
            activity: answer.key.activity.clone(),
            category: answer.key.category,
            dimension: answer.key.dimension.clone(),
            // Placeholder for excluded answers; the domain type has no rating
            // to expose, and consumers must key off `is_not_applicable`.
            score: answer.score.value().unwrap_or(0),
            note: answer.note.clone(),
            is_not_applicable: answer.score.is_not_applicable(),
        }
    }
}

/// Validation errors for inbound answer data.
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("score {found} is outside the allowed range {MIN_SCORE}..={MAX_SCORE}")]
    ScoreOutOfRange { found: u8 },
}

/// Company metadata captured when an assessment is opened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyProfile {
    pub company_name: String,
    #[serde(default)]
    pub sector: Option<String>,
    #[serde(default)]
    pub contact_email: Option<String>,
    #[serde(default)]
    pub conducted_by: Option<String>,
}

/// A company's single assessment instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentSession {
    pub id: SessionId,
    pub company: CompanyProfile,
    pub template_code: String,
    pub created_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
}

impl AssessmentSession {
    pub fn status(&self) -> SessionStatus {
        if self.closed_at.is_some() {
            SessionStatus::Closed
        } else {
            SessionStatus::Open
        }
    }
}

/// Lifecycle status derived from the closing timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionStatus {
    Open,
    Closed,
}

impl SessionStatus {
    pub const fn label(self) -> &'static str {
        match self {
            SessionStatus::Open => "open",
            SessionStatus::Closed => "closed",
        }
    }
}
