use std::collections::HashMap;

use super::domain::{Answer, AnswerRecord, QuestionKey, Score};
use super::template::AssessmentTemplate;

/// Score every freshly-seeded answer starts from.
pub const DEFAULT_SCORE: u8 = 3;

/// In-memory mapping from question identity to its current answer.
///
/// The store is seeded once from a template (one answer per question, default
/// score, applicable) and afterwards only accepts point updates for known
/// identities. Iteration order is the template order and never changes across
/// updates, so repeated reads within one render pass are stable.
#[derive(Debug, Clone, Default)]
pub struct AnswerStore {
    entries: Vec<Answer>,
    index: HashMap<QuestionKey, usize>,
}

/// Partial update for one answer; `None` fields keep their current value.
#[derive(Debug, Clone)]
pub struct AnswerUpdate {
    pub key: QuestionKey,
    pub score: Option<Score>,
    pub note: Option<String>,
}

impl AnswerStore {
    /// Build the initial store for a session: exactly one answer per template
    /// question, in template order.
    pub fn seeded(template: &AssessmentTemplate) -> Self {
        let mut store = Self::default();
        for key in template.question_keys() {
            store.insert(Answer {
                key,
                score: Score::Rating(DEFAULT_SCORE),
                note: String::new(),
            });
        }
        store
    }

    fn insert(&mut self, answer: Answer) {
        match self.index.get(&answer.key) {
            Some(&position) => self.entries[position] = answer,
            None => {
                self.index.insert(answer.key.clone(), self.entries.len());
                self.entries.push(answer);
            }
        }
    }

    /// Point lookup. Absence is a normal state while a template is mid-load;
    /// callers skip missing rows rather than treating this as an error.
    pub fn get(&self, key: &QuestionKey) -> Option<&Answer> {
        self.index.get(key).map(|&position| &self.entries[position])
    }

    /// Last-write-wins upsert for a known identity, preserving any field the
    /// update does not supply. An identity outside the seeded template is a
    /// template/answer mismatch and is surfaced, never silently defaulted.
    pub fn upsert(&mut self, update: AnswerUpdate) -> Result<(), StoreError> {
        let position = *self
            .index
            .get(&update.key)
            .ok_or_else(|| StoreError::UnknownQuestion {
                key: update.key.clone(),
            })?;

        let entry = &mut self.entries[position];
        if let Some(score) = update.score {
            entry.score = score;
        }
        if let Some(note) = update.note {
            entry.note = note;
        }
        Ok(())
    }

    /// Apply one full wire record (all fields supplied).
    pub fn apply(&mut self, answer: Answer) -> Result<(), StoreError> {
        self.upsert(AnswerUpdate {
            key: answer.key,
            score: Some(answer.score),
            note: Some(answer.note),
        })
    }

    /// All answers in stable template order; the serialization unit for
    /// submissions.
    pub fn all(&self) -> &[Answer] {
        &self.entries
    }

    pub fn records(&self) -> Vec<AnswerRecord> {
        self.entries.iter().map(AnswerRecord::from).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("question not present in the loaded template: {key}")]
    UnknownQuestion { key: QuestionKey },
}
